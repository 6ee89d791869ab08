use crate::{
    codec::{EncodeError, LiteralKind},
    value::Value,
};

///
/// Writer
///
/// Big-endian output buffer for the predicate wire format. Host accessors
/// write their own fields through the same primitives.
///

#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_bits().to_be_bytes());
    }

    /// Write a length or count as a signed 32-bit prefix.
    pub fn write_len(&mut self, len: usize) -> Result<(), EncodeError> {
        let len = i32::try_from(len).map_err(|_| EncodeError::LengthOverflow { len })?;
        self.write_i32(len);

        Ok(())
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn write_str(&mut self, value: &str) -> Result<(), EncodeError> {
        self.write_len(value.len())?;
        self.buf.extend_from_slice(value.as_bytes());

        Ok(())
    }

    /// Write one literal as a kind byte followed by its payload.
    pub fn write_literal(&mut self, value: &Value) -> Result<(), EncodeError> {
        let kind = LiteralKind::of(value).ok_or(EncodeError::UnencodableLiteral {
            kind: value.tag(),
        })?;
        self.write_u8(kind.to_u8());

        match value {
            Value::Int(v) => self.write_i64(*v),
            Value::Text(v) => self.write_str(v)?,
            Value::Bool(v) => self.write_bool(*v),
            Value::Float(v) => self.write_f64(*v),
            Value::Null | Value::List(_) | Value::Record(_) => {}
        }

        Ok(())
    }
}
