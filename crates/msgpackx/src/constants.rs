//! MessagePack marker constants.

/// One-byte MessagePack markers with a fixed payload layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MsgPackMarker {
    Nil = 0xc0,
    False = 0xc2,
    True = 0xc3,
    Bin8 = 0xc4,
    Bin16 = 0xc5,
    Bin32 = 0xc6,
    Float32 = 0xca,
    Float64 = 0xcb,
    Uint8 = 0xcc,
    Uint16 = 0xcd,
    Uint32 = 0xce,
    Uint64 = 0xcf,
    Int8 = 0xd0,
    Int16 = 0xd1,
    Int32 = 0xd2,
    Int64 = 0xd3,
    Str8 = 0xd9,
    Str16 = 0xda,
    Str32 = 0xdb,
    Array16 = 0xdc,
    Array32 = 0xdd,
    Map16 = 0xde,
    Map32 = 0xdf,
}

impl MsgPackMarker {
    #[inline]
    pub const fn byte(self) -> u8 {
        self as u8
    }
}

/// Prefix of a fixstr marker; the low five bits carry the length.
pub const FIXSTR_PREFIX: u8 = 0xa0;

/// Largest length a fixstr can carry.
pub const FIXSTR_MAX: usize = 0x1f;

/// Largest value a positive fixint can carry.
pub const POSITIVE_FIXINT_MAX: u64 = 0x7f;

/// Smallest value a negative fixint can carry.
pub const NEGATIVE_FIXINT_MIN: i64 = -0x20;

/// Width of a reserved container header: one marker byte plus a 32-bit count.
pub const CONTAINER_HEADER_WIDTH: usize = 5;
