//! msgpackx-buffers - chained byte buffers for the msgpackx encoder
//!
//! A [`LinkedBuffer`] grows by linking fixed-capacity nodes instead of
//! reallocating, and hands out [`Reservation`]s that can be patched in place
//! once a deferred value (such as a container length) is known.

mod error;
mod linked;

pub use error::BufferError;
pub use linked::{LinkedBuffer, Reservation, DEFAULT_BUFFER_SIZE, MIN_BUFFER_SIZE};
