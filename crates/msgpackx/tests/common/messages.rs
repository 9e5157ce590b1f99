#![allow(dead_code)]

//! Sample messages and hand-written schemas.

use msgpackx::{EncodeError, Field, Message, Output, Schema};

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: u32,
}

pub struct AddressSchema;

pub const STREET: Field<'static> = Field::new(1, "street");
pub const CITY: Field<'static> = Field::new(2, "city");
pub const ZIP: Field<'static> = Field::new(3, "zip");

impl Schema<Address> for AddressSchema {
    fn message_name(&self) -> &str {
        "Address"
    }

    fn write_to(&self, output: &mut dyn Output, address: &Address) -> Result<(), EncodeError> {
        output.write_str(STREET, &address.street, false)?;
        output.write_str(CITY, &address.city, false)?;
        output.write_u32(ZIP, address.zip, false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active = 0,
    Suspended = 1,
    Closed = 2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: u32,
    pub name: String,
    pub email: Option<String>,
    pub score: f64,
    pub ratio: f32,
    pub verified: bool,
    pub balance: i64,
    pub tags: Vec<String>,
    pub address: Option<Address>,
    pub avatar: Vec<u8>,
    pub previous: Vec<Address>,
    pub status: Status,
}

pub struct PersonSchema;

pub static PERSON_SCHEMA: PersonSchema = PersonSchema;

pub const ID: Field<'static> = Field::new(1, "id");
pub const NAME: Field<'static> = Field::new(2, "name");
pub const EMAIL: Field<'static> = Field::new(3, "email");
pub const SCORE: Field<'static> = Field::new(4, "score");
pub const RATIO: Field<'static> = Field::new(5, "ratio");
pub const VERIFIED: Field<'static> = Field::new(6, "verified");
pub const BALANCE: Field<'static> = Field::new(7, "balance");
pub const TAGS: Field<'static> = Field::new(8, "tags");
pub const ADDRESS: Field<'static> = Field::new(9, "address");
pub const AVATAR: Field<'static> = Field::new(10, "avatar");
pub const PREVIOUS: Field<'static> = Field::new(11, "previous");
pub const STATUS: Field<'static> = Field::new(12, "status");

impl Schema<Person> for PersonSchema {
    fn message_name(&self) -> &str {
        "Person"
    }

    fn write_to(&self, output: &mut dyn Output, person: &Person) -> Result<(), EncodeError> {
        output.write_u32(ID, person.id, false)?;
        output.write_str(NAME, &person.name, false)?;
        match &person.email {
            Some(email) => output.write_str(EMAIL, email, false)?,
            None => output.write_null(EMAIL)?,
        }
        output.write_f64(SCORE, person.score, false)?;
        output.write_f32(RATIO, person.ratio, false)?;
        output.write_bool(VERIFIED, person.verified, false)?;
        output.write_i64(BALANCE, person.balance, false)?;
        for tag in &person.tags {
            output.write_str(TAGS, tag, true)?;
        }
        if let Some(address) = &person.address {
            output.write_object(ADDRESS, address, &AddressSchema, false)?;
        }
        if !person.avatar.is_empty() {
            output.write_bytes(AVATAR, &person.avatar, false)?;
        }
        for address in &person.previous {
            output.write_object(PREVIOUS, address, &AddressSchema, true)?;
        }
        output.write_enum(STATUS, person.status as i32, false)
    }
}

impl Message for Person {
    fn cached_schema() -> &'static dyn Schema<Self> {
        &PERSON_SCHEMA
    }
}

pub fn sample_address(n: u32) -> Address {
    Address {
        street: format!("{n} Main St"),
        city: "Springfield".to_owned(),
        zip: 10_000 + n,
    }
}

pub fn sample_person() -> Person {
    Person {
        id: 42,
        name: "Ada".to_owned(),
        email: None,
        score: 98.5,
        ratio: 0.25,
        verified: true,
        balance: -1_000_000,
        tags: vec!["admin".to_owned(), "ops".to_owned()],
        address: Some(sample_address(1)),
        avatar: vec![0xde, 0xad, 0xbe, 0xef],
        previous: vec![sample_address(2), sample_address(3)],
        status: Status::Suspended,
    }
}

/// Message with exactly the two fields `{id, name}`.
pub struct IdName {
    pub id: u32,
    pub name: String,
}

pub struct IdNameSchema;

impl Schema<IdName> for IdNameSchema {
    fn message_name(&self) -> &str {
        "IdName"
    }

    fn write_to(&self, output: &mut dyn Output, message: &IdName) -> Result<(), EncodeError> {
        output.write_u32(ID, message.id, false)?;
        output.write_str(NAME, &message.name, false)
    }
}

/// Message that emits no fields.
pub struct Empty;

pub struct EmptySchema;

impl Schema<Empty> for EmptySchema {
    fn message_name(&self) -> &str {
        "Empty"
    }

    fn write_to(&self, _output: &mut dyn Output, _message: &Empty) -> Result<(), EncodeError> {
        Ok(())
    }
}

/// Schema-less record: every entry is written as an `i64` field.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub fields: Vec<(u32, String, i64)>,
}

pub struct RecordSchema;

impl Schema<Record> for RecordSchema {
    fn message_name(&self) -> &str {
        "Record"
    }

    fn write_to(&self, output: &mut dyn Output, record: &Record) -> Result<(), EncodeError> {
        for (number, name, value) in &record.fields {
            output.write_i64(Field::new(*number, name), *value, false)?;
        }
        Ok(())
    }
}

/// Schema that closes a nested message it never opened.
pub struct BrokenSchema;

impl Schema<Empty> for BrokenSchema {
    fn message_name(&self) -> &str {
        "Broken"
    }

    fn write_to(&self, output: &mut dyn Output, _message: &Empty) -> Result<(), EncodeError> {
        output.write_u32(ID, 1, false)?;
        output.end_message()
    }
}
