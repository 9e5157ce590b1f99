//! Schema-facing field writer.

use msgpackx_buffers::LinkedBuffer;

use crate::assembler;
use crate::config::{EncoderConfig, NullFields};
use crate::error::{EncodeError, ValueError};
use crate::framer::{ContainerFramer, ContainerKind};
use crate::primitive;
use crate::schema::{Field, Schema};

/// Sink for the fields a [`Schema`] visits.
///
/// Every write takes the field identity and, for values that may repeat, a
/// `repeated` flag. Consecutive repeated writes of the same field are grouped
/// into one array value.
pub trait Output {
    fn write_bool(
        &mut self,
        field: Field<'_>,
        value: bool,
        repeated: bool,
    ) -> Result<(), EncodeError>;

    fn write_i64(
        &mut self,
        field: Field<'_>,
        value: i64,
        repeated: bool,
    ) -> Result<(), EncodeError>;

    fn write_u64(
        &mut self,
        field: Field<'_>,
        value: u64,
        repeated: bool,
    ) -> Result<(), EncodeError>;

    fn write_f32(
        &mut self,
        field: Field<'_>,
        value: f32,
        repeated: bool,
    ) -> Result<(), EncodeError>;

    fn write_f64(
        &mut self,
        field: Field<'_>,
        value: f64,
        repeated: bool,
    ) -> Result<(), EncodeError>;

    fn write_str(
        &mut self,
        field: Field<'_>,
        value: &str,
        repeated: bool,
    ) -> Result<(), EncodeError>;

    fn write_bytes(
        &mut self,
        field: Field<'_>,
        value: &[u8],
        repeated: bool,
    ) -> Result<(), EncodeError>;

    fn write_null(&mut self, field: Field<'_>) -> Result<(), EncodeError>;

    /// Starts a nested message as the value of `field`.
    fn begin_message(&mut self, field: Field<'_>, repeated: bool) -> Result<(), EncodeError>;

    /// Ends the nested message opened by the latest unmatched `begin_message`.
    fn end_message(&mut self) -> Result<(), EncodeError>;

    fn write_i32(
        &mut self,
        field: Field<'_>,
        value: i32,
        repeated: bool,
    ) -> Result<(), EncodeError> {
        self.write_i64(field, value as i64, repeated)
    }

    fn write_u32(
        &mut self,
        field: Field<'_>,
        value: u32,
        repeated: bool,
    ) -> Result<(), EncodeError> {
        self.write_u64(field, value as u64, repeated)
    }

    /// Enums are written as their number.
    fn write_enum(
        &mut self,
        field: Field<'_>,
        number: i32,
        repeated: bool,
    ) -> Result<(), EncodeError> {
        self.write_i32(field, number, repeated)
    }
}

impl dyn Output + '_ {
    /// Writes `value` as a nested message using its own schema.
    pub fn write_object<T: ?Sized>(
        &mut self,
        field: Field<'_>,
        value: &T,
        schema: &dyn Schema<T>,
        repeated: bool,
    ) -> Result<(), EncodeError> {
        self.begin_message(field, repeated)?;
        schema.write_to(&mut *self, value)?;
        self.end_message()
    }
}

/// [`Output`] that encodes fields as MessagePack into a [`LinkedBuffer`].
///
/// Every message is a map whose keys are field numbers (numeric mode) or
/// field names. Map and array headers are reserved at full width and patched
/// once their contents are known.
///
/// The buffer must be fresh: construction fails with
/// [`EncodeError::BufferReused`] if it already holds bytes.
pub struct MsgpackXOutput<'b> {
    buffer: &'b mut LinkedBuffer,
    numeric: bool,
    null_fields: NullFields,
    framer: ContainerFramer,
}

impl<'b> MsgpackXOutput<'b> {
    pub fn new(buffer: &'b mut LinkedBuffer, numeric: bool) -> Result<Self, EncodeError> {
        Self::with_config(buffer, &EncoderConfig::new(numeric))
    }

    pub fn with_config(
        buffer: &'b mut LinkedBuffer,
        config: &EncoderConfig,
    ) -> Result<Self, EncodeError> {
        assembler::ensure_fresh(buffer)?;
        Ok(Self {
            buffer,
            numeric: config.numeric,
            null_fields: config.null_fields,
            framer: ContainerFramer::new(),
        })
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    pub fn buffer(&self) -> &LinkedBuffer {
        &*self.buffer
    }

    pub fn framer(&self) -> &ContainerFramer {
        &self.framer
    }

    /// Returns `true` once the outer container has been closed.
    pub fn is_finished(&self) -> bool {
        self.framer.is_closed()
    }

    /// Opens the outer map.
    pub fn write_start_object(&mut self) -> Result<(), EncodeError> {
        if self.framer.state().is_some() {
            return Err(EncodeError::AlreadyStarted);
        }
        self.framer.open(self.buffer, ContainerKind::Map, None)
    }

    /// Closes the outer map, ending any repeated run still open.
    pub fn write_end_object(&mut self) -> Result<(), EncodeError> {
        self.end_run()?;
        if self.framer.depth() != 1 {
            return Err(EncodeError::UnbalancedClose);
        }
        self.framer.close(self.buffer)?;
        Ok(())
    }

    /// Closes the innermost container if it is an open repeated run.
    fn end_run(&mut self) -> Result<(), EncodeError> {
        if let Some((ContainerKind::Array, _)) = self.framer.top() {
            self.framer.close(self.buffer)?;
        }
        Ok(())
    }

    /// Positions the output for the value of `field`.
    ///
    /// Writes the key and counts the entry unless the value continues the
    /// repeated run already open for the same field.
    fn begin_field(&mut self, field: Field<'_>, repeated: bool) -> Result<(), EncodeError> {
        if let Some((ContainerKind::Array, Some(run))) = self.framer.top() {
            if repeated && run == field.number {
                return self.framer.count_entry();
            }
            self.framer.close(self.buffer)?;
        }

        self.framer.count_entry()?;
        if self.numeric {
            primitive::write_uint(self.buffer, field.number as u64);
        } else {
            primitive::write_str(self.buffer, field.name).map_err(|e| unsupported(field, e))?;
        }

        if repeated {
            self.framer.open(self.buffer, ContainerKind::Array, Some(field.number))?;
            self.framer.count_entry()?;
        }
        Ok(())
    }
}

fn unsupported(field: Field<'_>, reason: ValueError) -> EncodeError {
    EncodeError::Unsupported {
        field: field.to_string(),
        reason,
    }
}

impl Output for MsgpackXOutput<'_> {
    fn write_bool(
        &mut self,
        field: Field<'_>,
        value: bool,
        repeated: bool,
    ) -> Result<(), EncodeError> {
        self.begin_field(field, repeated)?;
        primitive::write_bool(self.buffer, value);
        Ok(())
    }

    fn write_i64(
        &mut self,
        field: Field<'_>,
        value: i64,
        repeated: bool,
    ) -> Result<(), EncodeError> {
        self.begin_field(field, repeated)?;
        primitive::write_sint(self.buffer, value);
        Ok(())
    }

    fn write_u64(
        &mut self,
        field: Field<'_>,
        value: u64,
        repeated: bool,
    ) -> Result<(), EncodeError> {
        self.begin_field(field, repeated)?;
        primitive::write_uint(self.buffer, value);
        Ok(())
    }

    fn write_f32(
        &mut self,
        field: Field<'_>,
        value: f32,
        repeated: bool,
    ) -> Result<(), EncodeError> {
        self.begin_field(field, repeated)?;
        primitive::write_f32(self.buffer, value);
        Ok(())
    }

    fn write_f64(
        &mut self,
        field: Field<'_>,
        value: f64,
        repeated: bool,
    ) -> Result<(), EncodeError> {
        self.begin_field(field, repeated)?;
        primitive::write_f64(self.buffer, value);
        Ok(())
    }

    fn write_str(
        &mut self,
        field: Field<'_>,
        value: &str,
        repeated: bool,
    ) -> Result<(), EncodeError> {
        self.begin_field(field, repeated)?;
        primitive::write_str(self.buffer, value).map_err(|e| unsupported(field, e))
    }

    fn write_bytes(
        &mut self,
        field: Field<'_>,
        value: &[u8],
        repeated: bool,
    ) -> Result<(), EncodeError> {
        self.begin_field(field, repeated)?;
        primitive::write_bin(self.buffer, value).map_err(|e| unsupported(field, e))
    }

    fn write_null(&mut self, field: Field<'_>) -> Result<(), EncodeError> {
        // A skipped null leaves any open run untouched.
        if self.null_fields == NullFields::Skip {
            return Ok(());
        }
        self.begin_field(field, false)?;
        primitive::write_nil(self.buffer);
        Ok(())
    }

    fn begin_message(&mut self, field: Field<'_>, repeated: bool) -> Result<(), EncodeError> {
        self.begin_field(field, repeated)?;
        self.framer.open(self.buffer, ContainerKind::Map, Some(field.number))
    }

    fn end_message(&mut self) -> Result<(), EncodeError> {
        self.end_run()?;
        match self.framer.top() {
            Some((ContainerKind::Map, Some(_))) => {
                self.framer.close(self.buffer)?;
                Ok(())
            }
            _ => Err(EncodeError::UnbalancedClose),
        }
    }
}
