//! Form sessions: several fields over one row set, driven the way an
//! editing screen drives them.

use std::rc::Rc;

use anyhow::Result;
use tempfile::tempdir;

use rowbind_core::types::{CodecContext, ColumnCodec, Decoded};
use rowbind_core::{
    BindConfig, BindError, BooleanPolicy, BoundField, CodecError, CodecRegistry, ColumnType,
    FieldOptions, RowCursor, SqlValue, TextBuffer, TextDocument,
};

use super::helpers::{customers, document};

struct Form {
    fields: Vec<(BoundField, Rc<TextDocument>)>,
}

impl Form {
    fn open(cursor: Rc<dyn RowCursor>, columns: &[&str], options: FieldOptions) -> Result<Self> {
        let mut fields = Vec::new();
        for column in columns {
            let doc = document();
            let mut field = BoundField::new(doc.clone()).with_options(options);
            field.bind(Rc::clone(&cursor), *column)?;
            fields.push((field, doc));
        }
        Ok(Self { fields })
    }

    fn doc(&self, column: &str) -> &TextDocument {
        self.fields
            .iter()
            .find(|(field, _)| field.column_name() == Some(column))
            .map(|(_, doc)| doc.as_ref())
            .unwrap()
    }

    fn texts(&self) -> Vec<String> {
        self.fields.iter().map(|(_, doc)| doc.text()).collect()
    }
}

#[test]
fn test_edit_commit_and_cancel() -> Result<()> {
    let rows = customers();
    let form = Form::open(rows.clone(), &["id", "name", "active"], FieldOptions::default())?;
    assert_eq!(form.texts(), vec!["1", "Ada", "true"]);

    form.doc("name").replace("Ada King");
    assert!(rows.is_row_dirty());
    assert!(rows.commit_row()?);
    assert!(!rows.has_pending_changes());

    form.doc("active").replace("false");
    assert!(rows.cancel_row_updates()?);
    assert_eq!(form.texts(), vec!["1", "Ada King", "true"]);
    Ok(())
}

#[test]
fn test_insert_and_delete_rows() -> Result<()> {
    let rows = customers();
    let form = Form::open(rows.clone(), &["id", "name", "born"], FieldOptions::default())?;

    rows.insert_row(vec![
        SqlValue::I32(3),
        SqlValue::Null,
        SqlValue::Null,
        SqlValue::Null,
        SqlValue::Null,
    ])?;
    assert_eq!(rows.position(), Some(2));
    assert_eq!(form.texts(), vec!["3", "", ""]);

    form.doc("name").replace("Barbara");
    form.doc("born").replace("1939-11-07");
    assert_eq!(rows.value_at(2, 1)?, SqlValue::from("Barbara"));
    assert_eq!(form.doc("born").text(), "1939-11-07");

    rows.delete_row()?;
    assert_eq!(rows.row_count(), 2);
    assert_eq!(form.texts(), vec!["2", "Grace", ""]);

    rows.reload(Vec::new())?;
    assert_eq!(form.texts(), vec!["", "", ""]);
    Ok(())
}

#[test]
fn test_config_file_options() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("rowbind.json");
    std::fs::write(
        &path,
        r#"{"defaults": {"allow_null": false, "boolean_policy": "strict"}}"#,
    )?;
    let config = BindConfig::from_file(&path)?;
    assert_eq!(config.defaults.boolean_policy, BooleanPolicy::Strict);

    let rows = customers();
    let form = Form::open(rows.clone(), &["name", "active"], config.defaults)?;

    form.doc("active").replace("maybe");
    assert_eq!(rows.get_value(3)?, SqlValue::Bool(true));
    let (active, _) = &form.fields[1];
    assert_eq!(
        active.write_through(),
        Err(BindError::Codec(CodecError::InvalidBooleanLiteral {
            column: "active".to_string(),
            text: "maybe".to_string(),
        }))
    );

    form.doc("name").clear();
    assert_eq!(rows.get_value(1)?, SqlValue::from("Ada"));
    Ok(())
}

fn encode_yes_no(value: &SqlValue, ctx: &CodecContext<'_>) -> Result<String, CodecError> {
    match value {
        SqlValue::Bool(true) => Ok("yes".to_string()),
        SqlValue::Bool(false) => Ok("no".to_string()),
        other => Err(CodecError::ValueTypeMismatch {
            column: ctx.column.to_string(),
            column_type: ctx.column_type,
            got: other.kind_name(),
        }),
    }
}

fn decode_yes_no(text: &str, _ctx: &CodecContext<'_>) -> Result<Decoded, CodecError> {
    Ok(Decoded::Value(SqlValue::Bool(text.eq_ignore_ascii_case("yes"))))
}

#[test]
fn test_shared_custom_registry() -> Result<()> {
    let mut registry = CodecRegistry::with_builtin_codecs();
    registry.replace(ColumnType::Boolean, ColumnCodec::new(encode_yes_no, decode_yes_no));
    registry.remove(ColumnType::Date);
    let registry = Rc::new(registry);

    let rows = customers();
    let doc = document();
    let mut active = BoundField::new(doc.clone()).with_codecs(Rc::clone(&registry));
    active.bind(rows.clone(), "active")?;
    assert_eq!(doc.text(), "yes");

    doc.replace("no");
    assert_eq!(rows.get_value(3)?, SqlValue::Bool(false));

    let mut born = BoundField::new(document()).with_codecs(registry);
    let err = born.bind(rows.clone(), "born").unwrap_err();
    assert!(matches!(
        err,
        BindError::Codec(CodecError::UnsupportedColumnType {
            column_type: ColumnType::Date,
            ..
        })
    ));
    assert!(!born.is_bound());
    Ok(())
}

#[test]
fn test_closing_form_releases_cursor() -> Result<()> {
    let rows = customers();
    let form = Form::open(
        rows.clone(),
        &["id", "name", "born", "active", "balance"],
        FieldOptions::default(),
    )?;
    assert_eq!(rows.listener_count(), 5);

    drop(form);
    assert_eq!(rows.listener_count(), 0);
    rows.next();
    assert_eq!(rows.value_at(1, 1)?, SqlValue::from("Grace"));
    Ok(())
}
