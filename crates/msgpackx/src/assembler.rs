//! Guards both ends of an encode: the buffer going in and the bytes coming out.

use std::io;

use msgpackx_buffers::LinkedBuffer;

use crate::error::{EncodeError, WriteError};
use crate::output::MsgpackXOutput;

/// Refuses a buffer that still holds bytes from an earlier write.
pub(crate) fn ensure_fresh(buffer: &LinkedBuffer) -> Result<(), EncodeError> {
    if buffer.is_fresh() {
        Ok(())
    } else {
        Err(EncodeError::BufferReused)
    }
}

fn ensure_finished(output: &MsgpackXOutput<'_>) -> Result<(), EncodeError> {
    if output.is_finished() {
        Ok(())
    } else {
        Err(EncodeError::Unfinished {
            open: output.framer().depth(),
        })
    }
}

/// Copies the encoded bytes into one contiguous vector.
pub fn to_vec(output: &MsgpackXOutput<'_>) -> Result<Vec<u8>, EncodeError> {
    ensure_finished(output)?;
    Ok(output.buffer().to_vec())
}

/// Writes the encoded bytes to `out`, node by node.
pub fn drain<W: io::Write + ?Sized>(
    output: &MsgpackXOutput<'_>,
    out: &mut W,
) -> Result<(), WriteError> {
    ensure_finished(output)?;
    output.buffer().write_to(out)?;
    Ok(())
}
