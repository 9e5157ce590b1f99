//! Encoder configuration.

use serde::{Deserialize, Serialize};

/// What [`Output::write_null`](crate::Output::write_null) does with a null field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullFields {
    /// Write the key followed by `nil`.
    #[default]
    Emit,
    /// Leave the field out; it is not counted in the enclosing map.
    ///
    /// A skipped null writes nothing, so it does not end a repeated run:
    /// repeats of one field around it still share a single array value.
    Skip,
}

/// Options fixed for the duration of one encode call.
///
/// Deserializable so a host can keep it in its own config file:
///
/// ```
/// use msgpackx::{EncoderConfig, NullFields};
///
/// let config: EncoderConfig = serde_json::from_str(r#"{"numeric": true}"#).unwrap();
/// assert!(config.numeric);
/// assert_eq!(config.null_fields, NullFields::Emit);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Use field numbers as map keys instead of field names.
    pub numeric: bool,
    pub null_fields: NullFields,
}

impl EncoderConfig {
    pub fn new(numeric: bool) -> Self {
        Self {
            numeric,
            ..Self::default()
        }
    }

    pub fn with_null_fields(mut self, null_fields: NullFields) -> Self {
        self.null_fields = null_fields;
        self
    }
}
