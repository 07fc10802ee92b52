//! Replays fixture actions against bound fields.

use std::rc::Rc;

use anyhow::{bail, Context, Result};

use rowbind_core::{BindConfig, BoundField, CodecRegistry, MemoryRowSet, TextBuffer, TextDocument};

use crate::fixture::{Action, Fixture};

struct SessionField {
    field: BoundField,
    document: Rc<TextDocument>,
}

impl SessionField {
    fn label(&self) -> &str {
        self.field.column_name().unwrap_or_default()
    }
}

/// A row set with one bound text document per fixture field.
pub struct Session {
    rows: Rc<MemoryRowSet>,
    fields: Vec<SessionField>,
}

impl Session {
    /// Builds the row set, binds every field and moves to the first row.
    pub fn open(fixture: &Fixture, config: &BindConfig) -> Result<Self> {
        let codecs = Rc::new(CodecRegistry::with_builtin_codecs());
        let columns = fixture.column_meta()?;
        let values = fixture.row_values(&columns, &codecs)?;
        let rows = Rc::new(MemoryRowSet::with_rows(columns, values).context("Invalid rows")?);

        let mut fields = Vec::with_capacity(fixture.fields.len());
        for spec in &fixture.fields {
            let document = Rc::new(TextDocument::new());
            let mut field = BoundField::new(document.clone())
                .with_options(spec.options(config.defaults))
                .with_codecs(Rc::clone(&codecs));
            field
                .bind(rows.clone(), &spec.column)
                .with_context(|| format!("Failed to bind field {:?}", spec.column))?;
            fields.push(SessionField { field, document });
        }

        rows.first();
        tracing::info!(
            "Opened session with {} rows and {} fields",
            rows.row_count(),
            fields.len()
        );
        Ok(Self { rows, fields })
    }

    /// Runs one action.
    pub fn apply(&self, action: &Action) -> Result<()> {
        tracing::debug!("Applying {:?}", action);
        match action {
            Action::First => {
                self.rows.first();
            }
            Action::Last => {
                self.rows.last();
            }
            Action::Next => {
                self.rows.next();
            }
            Action::Previous => {
                self.rows.previous();
            }
            Action::Absolute(index) => {
                self.rows.absolute(*index);
            }
            Action::Type { field, text } => self.find(field)?.document.replace(text),
            Action::Insert {
                field,
                offset,
                text,
            } => self.find(field)?.document.insert(*offset, text)?,
            Action::Remove { field, offset, len } => {
                self.find(field)?.document.remove(*offset, *len)?
            }
            Action::Commit => {
                self.rows.commit_row()?;
            }
            Action::Cancel => {
                self.rows.cancel_row_updates()?;
            }
        }
        Ok(())
    }

    /// One line: the cursor position followed by every field's buffer.
    pub fn render(&self) -> String {
        let mut line = match self.rows.position() {
            Some(index) => format!("row {}", index),
            None => "no row".to_string(),
        };
        if self.rows.is_row_dirty() {
            line.push('*');
        }
        for f in &self.fields {
            line.push_str(&format!(" | {}={:?}", f.label(), f.document.text()));
        }
        line
    }

    fn find(&self, column: &str) -> Result<&SessionField> {
        match self
            .fields
            .iter()
            .find(|f| f.label().eq_ignore_ascii_case(column))
        {
            Some(f) => Ok(f),
            None => bail!("No field bound to column {}", column),
        }
    }
}
