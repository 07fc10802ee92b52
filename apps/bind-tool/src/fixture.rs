//! Fixture files: the row set, the bound fields and the scripted actions.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;

use rowbind_core::{
    BooleanPolicy, CodecRegistry, ColumnMeta, ColumnRef, ColumnType, Decoded, FieldOptions,
    SqlValue,
};

/// A scripted form session.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Debug, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    /// Type name as accepted by `ColumnType::from_str`, e.g. `VARCHAR`
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

/// Column identifier in a fixture: a name or a zero-based index.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColumnKey {
    Index(usize),
    Name(String),
}

impl From<&ColumnKey> for ColumnRef {
    fn from(key: &ColumnKey) -> Self {
        match key {
            ColumnKey::Index(index) => ColumnRef::Index(*index),
            ColumnKey::Name(name) => ColumnRef::Name(name.clone()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FieldSpec {
    pub column: ColumnKey,
    pub allow_null: Option<bool>,
    pub allow_empty_string: Option<bool>,
}

impl FieldSpec {
    /// Applies the per-field overrides on top of `defaults`.
    pub fn options(&self, defaults: FieldOptions) -> FieldOptions {
        FieldOptions {
            allow_null: self.allow_null.unwrap_or(defaults.allow_null),
            allow_empty_string: self.allow_empty_string.unwrap_or(defaults.allow_empty_string),
            ..defaults
        }
    }
}

/// One scripted step. `field` names a bound field by its column name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    First,
    Last,
    Next,
    Previous,
    Absolute(usize),
    Type { field: String, text: String },
    Insert { field: String, offset: usize, text: String },
    Remove { field: String, offset: usize, len: usize },
    Commit,
    Cancel,
}

impl Fixture {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid fixture JSON")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        Self::from_json_str(&content)
    }

    /// Column metadata with type names resolved.
    pub fn column_meta(&self) -> Result<Vec<ColumnMeta>> {
        self.columns
            .iter()
            .map(|spec| {
                let column_type: ColumnType = spec
                    .column_type
                    .parse()
                    .with_context(|| format!("Column {}", spec.name))?;
                let meta = ColumnMeta::new(spec.name.clone(), column_type);
                Ok(if spec.nullable { meta } else { meta.not_null() })
            })
            .collect()
    }

    /// Converts the JSON rows to native values.
    pub fn row_values(&self, columns: &[ColumnMeta], codecs: &CodecRegistry) -> Result<Vec<Vec<SqlValue>>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row, values)| {
                if values.len() != columns.len() {
                    bail!(
                        "Row {} has {} values, expected {}",
                        row,
                        values.len(),
                        columns.len()
                    );
                }
                columns
                    .iter()
                    .zip(values)
                    .map(|(meta, value)| {
                        to_sql_value(meta, value, codecs)
                            .with_context(|| format!("Row {}, column {}", row, meta.name))
                    })
                    .collect()
            })
            .collect()
    }
}

/// Converts one JSON cell by running its text form through the column's codec.
pub fn to_sql_value(meta: &ColumnMeta, value: &Value, codecs: &CodecRegistry) -> Result<SqlValue> {
    let text = match value {
        Value::Null => return Ok(SqlValue::Null),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => bail!("Unsupported JSON value {}", other),
    };
    let options = FieldOptions {
        allow_null: true,
        allow_empty_string: true,
        boolean_policy: BooleanPolicy::Strict,
    };
    match codecs.decode(&meta.name, meta.column_type, Some(&text), &options)? {
        Decoded::Value(value) => Ok(value),
        Decoded::Incomplete => bail!("Incomplete value {:?}", text),
    }
}
