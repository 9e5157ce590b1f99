//! One-call entry points for encoding a message.
//!
//! Each entry point requires a fresh [`LinkedBuffer`] (see
//! [`LinkedBuffer::is_fresh`]); a buffer that still holds a previous encode
//! must be [`clear`](LinkedBuffer::clear)ed first.

use std::io;

use log::debug;
use msgpackx_buffers::LinkedBuffer;

use crate::assembler;
use crate::config::EncoderConfig;
use crate::error::{EncodeError, WriteError};
use crate::output::MsgpackXOutput;
use crate::schema::{Message, Schema};

/// Frames `message` as one map in a fresh `buffer`.
fn encode<'b, T: ?Sized>(
    buffer: &'b mut LinkedBuffer,
    message: &T,
    schema: &dyn Schema<T>,
    config: &EncoderConfig,
) -> Result<MsgpackXOutput<'b>, EncodeError> {
    let mut output = MsgpackXOutput::with_config(buffer, config)?;
    output.write_start_object()?;
    schema.write_to(&mut output, message)?;
    output.write_end_object()?;

    debug!(
        "encoded {} ({} mode): {} bytes in {} node(s)",
        schema.message_name(),
        if config.numeric { "numeric" } else { "named" },
        output.buffer().size(),
        output.buffer().node_count()
    );
    Ok(output)
}

/// Encodes `message` and returns the bytes.
pub fn to_byte_array<T: ?Sized>(
    message: &T,
    schema: &dyn Schema<T>,
    numeric: bool,
    buffer: &mut LinkedBuffer,
) -> Result<Vec<u8>, EncodeError> {
    to_byte_array_with(message, schema, &EncoderConfig::new(numeric), buffer)
}

pub fn to_byte_array_with<T: ?Sized>(
    message: &T,
    schema: &dyn Schema<T>,
    config: &EncoderConfig,
    buffer: &mut LinkedBuffer,
) -> Result<Vec<u8>, EncodeError> {
    let output = encode(buffer, message, schema, config)?;
    assembler::to_vec(&output)
}

/// Encodes `message` into `buffer` and leaves the bytes there.
pub fn write_to_buffer<T: ?Sized>(
    buffer: &mut LinkedBuffer,
    message: &T,
    schema: &dyn Schema<T>,
    numeric: bool,
) -> Result<(), EncodeError> {
    encode(buffer, message, schema, &EncoderConfig::new(numeric))?;
    Ok(())
}

/// Encodes `message` into `buffer`, then writes the bytes to `out`.
///
/// On [`WriteError::Io`] the buffer still holds the complete encoding and can
/// be drained to another sink with [`LinkedBuffer::write_to`].
pub fn write_to<W: io::Write + ?Sized, T: ?Sized>(
    out: &mut W,
    message: &T,
    schema: &dyn Schema<T>,
    numeric: bool,
    buffer: &mut LinkedBuffer,
) -> Result<(), WriteError> {
    write_to_with(out, message, schema, &EncoderConfig::new(numeric), buffer)
}

pub fn write_to_with<W: io::Write + ?Sized, T: ?Sized>(
    out: &mut W,
    message: &T,
    schema: &dyn Schema<T>,
    config: &EncoderConfig,
    buffer: &mut LinkedBuffer,
) -> Result<(), WriteError> {
    let output = encode(buffer, message, schema, config)?;
    assembler::drain(&output, out)
}

/// Like [`write_to`], using the message's own schema.
pub fn write_message_to<W: io::Write + ?Sized, T: Message>(
    out: &mut W,
    message: &T,
    numeric: bool,
    buffer: &mut LinkedBuffer,
) -> Result<(), WriteError> {
    write_to(out, message, T::cached_schema(), numeric, buffer)
}

/// Like [`to_byte_array`], using the message's own schema.
pub fn message_to_byte_array<T: Message>(
    message: &T,
    numeric: bool,
    buffer: &mut LinkedBuffer,
) -> Result<Vec<u8>, EncodeError> {
    to_byte_array(message, T::cached_schema(), numeric, buffer)
}
