//! Schema-driven MessagePack encoding over chained buffers.
//!
//! A [`Schema`] visits the fields of a message and drives an [`Output`]. The
//! [`MsgpackXOutput`] writes every message as a MessagePack map into a
//! [`LinkedBuffer`], reserving each map/array header up front and patching the
//! real entry count in place once the container closes, so nothing needs to be
//! measured ahead of time.
//!
//! ```
//! use msgpackx::{io_util, EncodeError, Field, LinkedBuffer, Output, Schema};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! struct PointSchema;
//!
//! impl Schema<Point> for PointSchema {
//!     fn message_name(&self) -> &str {
//!         "Point"
//!     }
//!
//!     fn write_to(&self, output: &mut dyn Output, p: &Point) -> Result<(), EncodeError> {
//!         output.write_i32(Field::new(1, "x"), p.x, false)?;
//!         output.write_i32(Field::new(2, "y"), p.y, false)
//!     }
//! }
//!
//! let mut buffer = LinkedBuffer::new();
//! let bytes = io_util::to_byte_array(&Point { x: 1, y: -1 }, &PointSchema, true, &mut buffer)?;
//! assert_eq!(bytes, [0xdf, 0, 0, 0, 2, 0x01, 0x01, 0x02, 0xff]);
//! # Ok::<(), EncodeError>(())
//! ```

mod config;
mod error;
mod output;
mod schema;

pub mod assembler;
pub mod constants;
pub mod framer;
pub mod io_util;
pub mod primitive;

pub use config::{EncoderConfig, NullFields};
pub use constants::MsgPackMarker;
pub use error::{EncodeError, ValueError, WriteError};
pub use framer::{ContainerFramer, ContainerKind, FramerState};
pub use msgpackx_buffers::{BufferError, LinkedBuffer, Reservation};
pub use output::{MsgpackXOutput, Output};
pub use schema::{Field, Message, Schema};
