//! Scalar MessagePack encoding.
//!
//! Every function writes one tag-first value into a [`LinkedBuffer`] using the
//! smallest marker that holds the value's magnitude.

use msgpackx_buffers::LinkedBuffer;

use crate::constants::{
    MsgPackMarker as M, FIXSTR_MAX, FIXSTR_PREFIX, NEGATIVE_FIXINT_MIN, POSITIVE_FIXINT_MAX,
};
use crate::error::ValueError;

pub fn write_nil(buf: &mut LinkedBuffer) {
    buf.u8(M::Nil.byte());
}

pub fn write_bool(buf: &mut LinkedBuffer, value: bool) {
    buf.u8(if value { M::True.byte() } else { M::False.byte() });
}

/// Encodes an unsigned integer: positive fixint, then uint8/16/32/64.
pub fn write_uint(buf: &mut LinkedBuffer, value: u64) {
    if value <= POSITIVE_FIXINT_MAX {
        buf.u8(value as u8);
    } else if value <= 0xff {
        buf.u8u8(M::Uint8.byte(), value as u8);
    } else if value <= 0xffff {
        buf.u8u16(M::Uint16.byte(), value as u16);
    } else if value <= 0xffff_ffff {
        buf.u8u32(M::Uint32.byte(), value as u32);
    } else {
        buf.u8u64(M::Uint64.byte(), value);
    }
}

/// Encodes a signed integer.
///
/// Non-negative values take the unsigned forms; negative values take a
/// negative fixint or int8/16/32/64.
pub fn write_sint(buf: &mut LinkedBuffer, value: i64) {
    if value >= 0 {
        write_uint(buf, value as u64);
    } else if value >= NEGATIVE_FIXINT_MIN {
        // negative fixint: 0xe0..=0xff
        buf.u8(value as i8 as u8);
    } else if value >= i8::MIN as i64 {
        buf.u8u8(M::Int8.byte(), value as i8 as u8);
    } else if value >= i16::MIN as i64 {
        buf.u8u16(M::Int16.byte(), value as i16 as u16);
    } else if value >= i32::MIN as i64 {
        buf.u8u32(M::Int32.byte(), value as i32 as u32);
    } else {
        buf.u8u64(M::Int64.byte(), value as u64);
    }
}

pub fn write_f32(buf: &mut LinkedBuffer, value: f32) {
    buf.u8f32(M::Float32.byte(), value);
}

pub fn write_f64(buf: &mut LinkedBuffer, value: f64) {
    buf.u8f64(M::Float64.byte(), value);
}

pub fn write_str_hdr(buf: &mut LinkedBuffer, length: usize) -> Result<(), ValueError> {
    if length <= FIXSTR_MAX {
        buf.u8(FIXSTR_PREFIX | length as u8);
    } else if length <= 0xff {
        buf.u8u8(M::Str8.byte(), length as u8);
    } else if length <= 0xffff {
        buf.u8u16(M::Str16.byte(), length as u16);
    } else if let Ok(length) = u32::try_from(length) {
        buf.u8u32(M::Str32.byte(), length);
    } else {
        return Err(ValueError::StrTooLong(length));
    }
    Ok(())
}

/// Encodes a UTF-8 string; the header carries the byte length.
pub fn write_str(buf: &mut LinkedBuffer, value: &str) -> Result<(), ValueError> {
    write_str_hdr(buf, value.len())?;
    buf.utf8(value);
    Ok(())
}

pub fn write_bin_hdr(buf: &mut LinkedBuffer, length: usize) -> Result<(), ValueError> {
    if length <= 0xff {
        buf.u8u8(M::Bin8.byte(), length as u8);
    } else if length <= 0xffff {
        buf.u8u16(M::Bin16.byte(), length as u16);
    } else if let Ok(length) = u32::try_from(length) {
        buf.u8u32(M::Bin32.byte(), length);
    } else {
        return Err(ValueError::BinTooLong(length));
    }
    Ok(())
}

pub fn write_bin(buf: &mut LinkedBuffer, value: &[u8]) -> Result<(), ValueError> {
    write_bin_hdr(buf, value.len())?;
    buf.buf(value);
    Ok(())
}
