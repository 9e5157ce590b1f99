//! Schema-side collaborators.
//!
//! A [`Schema`] knows how to visit the fields of one message type and drive an
//! [`Output`] with them. The encoder never inspects message types itself.

use std::fmt;

use crate::error::EncodeError;
use crate::output::Output;

/// Identity of a message field: its number and its name.
///
/// Numeric encoding writes `number` as the map key, named encoding writes `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field<'a> {
    pub number: u32,
    pub name: &'a str,
}

impl<'a> Field<'a> {
    pub const fn new(number: u32, name: &'a str) -> Self {
        Self { number, name }
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` (#{})", self.name, self.number)
    }
}

/// Writes the fields of a `T` into an [`Output`], in schema order.
pub trait Schema<T: ?Sized> {
    /// Name of the message type, used in diagnostics.
    fn message_name(&self) -> &str;

    /// Visits every field of `message`, calling one `Output` method per field.
    fn write_to(&self, output: &mut dyn Output, message: &T) -> Result<(), EncodeError>;
}

/// A message type that carries its own schema.
pub trait Message: Sized + 'static {
    fn cached_schema() -> &'static dyn Schema<Self>;
}
