use std::collections::HashMap;

use crate::config::FieldOptions;

use super::builtin_codecs::{codec_for_family, SUPPORTED_TYPES};
use super::codec::{CodecContext, ColumnCodec, Decoded};
use super::column_type::ColumnType;
use super::error::CodecError;
use super::value::SqlValue;

/// Registry of codecs keyed by column type.
///
/// Null and empty-text handling is shared by every type and lives here;
/// the registered codecs only ever see non-null values and non-empty text.
#[derive(Debug, Default, Clone)]
pub struct CodecRegistry {
    codecs: HashMap<ColumnType, ColumnCodec>,
}

impl CodecRegistry {
    /// Creates a new empty codec registry.
    pub fn new() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Creates a registry holding the built-in codec for every supported type.
    pub fn with_builtin_codecs() -> Self {
        let codecs = SUPPORTED_TYPES
            .iter()
            .filter_map(|&t| codec_for_family(t.family()).map(|codec| (t, codec)))
            .collect();
        Self { codecs }
    }

    /// Registers a codec for a column type.
    ///
    /// # Returns
    /// `Ok(())` if successful, `Err(CodecError::AlreadyRegistered)` if the
    /// type already has a codec.
    pub fn register(&mut self, column_type: ColumnType, codec: ColumnCodec) -> Result<(), CodecError> {
        if self.codecs.contains_key(&column_type) {
            return Err(CodecError::AlreadyRegistered { column_type });
        }
        self.codecs.insert(column_type, codec);
        Ok(())
    }

    /// Installs a codec, returning the one it replaced.
    pub fn replace(&mut self, column_type: ColumnType, codec: ColumnCodec) -> Option<ColumnCodec> {
        self.codecs.insert(column_type, codec)
    }

    /// Retrieves the codec for a column type.
    pub fn get(&self, column_type: ColumnType) -> Option<ColumnCodec> {
        self.codecs.get(&column_type).copied()
    }

    /// Checks if a column type has a codec.
    pub fn contains(&self, column_type: ColumnType) -> bool {
        self.codecs.contains_key(&column_type)
    }

    /// Removes a codec. Returns `true` if one was registered.
    pub fn remove(&mut self, column_type: ColumnType) -> bool {
        self.codecs.remove(&column_type).is_some()
    }

    /// Returns all column types with a registered codec.
    pub fn column_types(&self) -> Vec<ColumnType> {
        self.codecs.keys().copied().collect()
    }

    /// Looks up the codec for a column, failing with `UnsupportedColumnType`.
    pub fn require(&self, column: &str, column_type: ColumnType) -> Result<ColumnCodec, CodecError> {
        self.get(column_type)
            .ok_or_else(|| CodecError::UnsupportedColumnType {
                column: column.to_string(),
                column_type,
            })
    }

    /// Encodes a native value to its display text.
    ///
    /// # Returns
    /// `Ok(None)` for the null marker, `Ok(Some(text))` otherwise.
    pub fn encode(
        &self,
        column: &str,
        column_type: ColumnType,
        value: &SqlValue,
    ) -> Result<Option<String>, CodecError> {
        let codec = self.require(column, column_type)?;
        if value.is_null() {
            return Ok(None);
        }
        let ctx = CodecContext {
            column,
            column_type,
            boolean_policy: Default::default(),
        };
        (codec.encode)(value, &ctx).map(Some)
    }

    /// Decodes user text into a native value.
    ///
    /// Empty or absent text becomes the null marker, except that a character
    /// column with `allow_empty_string` set keeps `""`. A null result for a
    /// field that disallows null fails with `NullNotAllowed`.
    pub fn decode(
        &self,
        column: &str,
        column_type: ColumnType,
        text: Option<&str>,
        options: &FieldOptions,
    ) -> Result<Decoded, CodecError> {
        let codec = self.require(column, column_type)?;
        match text {
            Some(t) if !t.is_empty() => {
                let ctx = CodecContext {
                    column,
                    column_type,
                    boolean_policy: options.boolean_policy,
                };
                (codec.decode)(t, &ctx)
            }
            Some(_) if options.allow_empty_string && column_type.is_character() => {
                Ok(Decoded::Value(SqlValue::Text(String::new())))
            }
            _ if !options.allow_null => Err(CodecError::NullNotAllowed {
                column: column.to_string(),
            }),
            _ => Ok(Decoded::Value(SqlValue::Null)),
        }
    }
}
