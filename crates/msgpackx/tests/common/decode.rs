#![allow(dead_code)]

//! Minimal MessagePack reader for checking encoder output.

use rmp::Marker;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i128),
    F32(f32),
    F64(f64),
    Str(String),
    Bin(Vec<u8>),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(s.to_owned())
    }

    pub fn int(v: impl Into<i128>) -> Self {
        Value::Int(v.into())
    }

    /// Looks up a map entry by key.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Value::Map(entries) => entries.len(),
            Value::Array(items) => items.len(),
            other => panic!("not a container: {other:?}"),
        }
    }
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> &'a [u8] {
        assert!(
            self.pos + n <= self.data.len(),
            "unexpected end of input at {}",
            self.pos
        );
        let data = self.data;
        let out = &data[self.pos..self.pos + n];
        self.pos += n;
        out
    }

    fn uint(&mut self, n: usize) -> u64 {
        self.take(n)
            .iter()
            .fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
    }

    fn string(&mut self, len: usize) -> Value {
        let bytes = self.take(len);
        Value::Str(String::from_utf8(bytes.to_vec()).expect("valid utf-8"))
    }

    fn bin(&mut self, width: usize) -> Value {
        let len = self.uint(width) as usize;
        Value::Bin(self.take(len).to_vec())
    }

    fn array(&mut self, len: usize) -> Value {
        Value::Array((0..len).map(|_| self.value()).collect())
    }

    fn map(&mut self, len: usize) -> Value {
        Value::Map(
            (0..len)
                .map(|_| {
                    let key = self.value();
                    let val = self.value();
                    (key, val)
                })
                .collect(),
        )
    }

    fn value(&mut self) -> Value {
        match Marker::from_u8(self.take(1)[0]) {
            Marker::Null => Value::Nil,
            Marker::True => Value::Bool(true),
            Marker::False => Value::Bool(false),
            Marker::FixPos(v) => Value::Int(v.into()),
            Marker::FixNeg(v) => Value::Int(v.into()),
            Marker::U8 => Value::Int(self.uint(1).into()),
            Marker::U16 => Value::Int(self.uint(2).into()),
            Marker::U32 => Value::Int(self.uint(4).into()),
            Marker::U64 => Value::Int(self.uint(8).into()),
            Marker::I8 => Value::Int((self.uint(1) as u8 as i8).into()),
            Marker::I16 => Value::Int((self.uint(2) as u16 as i16).into()),
            Marker::I32 => Value::Int((self.uint(4) as u32 as i32).into()),
            Marker::I64 => Value::Int((self.uint(8) as i64).into()),
            Marker::F32 => Value::F32(f32::from_bits(self.uint(4) as u32)),
            Marker::F64 => Value::F64(f64::from_bits(self.uint(8))),
            Marker::FixStr(n) => self.string(n as usize),
            Marker::Str8 => {
                let n = self.uint(1) as usize;
                self.string(n)
            }
            Marker::Str16 => {
                let n = self.uint(2) as usize;
                self.string(n)
            }
            Marker::Str32 => {
                let n = self.uint(4) as usize;
                self.string(n)
            }
            Marker::Bin8 => self.bin(1),
            Marker::Bin16 => self.bin(2),
            Marker::Bin32 => self.bin(4),
            Marker::FixArray(n) => self.array(n as usize),
            Marker::Array16 => {
                let n = self.uint(2) as usize;
                self.array(n)
            }
            Marker::Array32 => {
                let n = self.uint(4) as usize;
                self.array(n)
            }
            Marker::FixMap(n) => self.map(n as usize),
            Marker::Map16 => {
                let n = self.uint(2) as usize;
                self.map(n)
            }
            Marker::Map32 => {
                let n = self.uint(4) as usize;
                self.map(n)
            }
            other => panic!("unexpected marker {other:?} at {}", self.pos - 1),
        }
    }
}

/// Decodes exactly one value; panics on malformed or trailing input.
pub fn decode(bytes: &[u8]) -> Value {
    let mut cursor = Cursor {
        data: bytes,
        pos: 0,
    };
    let value = cursor.value();
    assert_eq!(cursor.pos, bytes.len(), "trailing bytes after value");
    value
}

/// Reads a 32-bit container header: `(marker, count)`.
pub fn container_header(bytes: &[u8]) -> (u8, u32) {
    let count = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
    (bytes[0], count)
}
