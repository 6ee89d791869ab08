use crate::{
    codec::{CodecLimits, DecodeError, LiteralKind},
    value::Value,
};

///
/// Reader
///
/// Bounds-checked cursor over an encoded predicate stream. Every failure
/// reports the byte offset at which the offending item starts.
///

#[derive(Debug)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
    depth: usize,
    limits: CodecLimits,
}

impl<'a> Reader<'a> {
    #[must_use]
    pub(crate) const fn new(bytes: &'a [u8], limits: CodecLimits) -> Self {
        Self {
            bytes,
            offset: 0,
            depth: 0,
            limits,
        }
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::Truncated {
                offset: self.offset,
                needed: len,
                remaining: self.remaining(),
            });
        }

        let bytes = self.bytes;
        let start = self.offset;
        self.offset += len;

        Ok(&bytes[start..self.offset])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);

        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        let offset = self.offset;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            byte => Err(DecodeError::InvalidBool { byte, offset }),
        }
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(u64::from_be_bytes(self.take_array()?)))
    }

    /// Read a signed 32-bit length prefix, rejecting negatives and values
    /// above `max`.
    pub fn read_len(&mut self, what: &'static str, max: usize) -> Result<usize, DecodeError> {
        let offset = self.offset;
        let raw = self.read_i32()?;
        let len = usize::try_from(raw)
            .map_err(|_| DecodeError::NegativeLength { len: raw, offset })?;

        if len > max {
            return Err(DecodeError::LimitExceeded {
                limit: what,
                value: len,
                max,
                offset,
            });
        }

        Ok(len)
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_str(&mut self) -> Result<String, DecodeError> {
        let len = self.read_len("string length", self.limits.max_string_len)?;
        let offset = self.offset;
        let bytes = self.take(len)?;

        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    /// Read a child count bounded by the configured fan-out limit.
    pub fn read_count(&mut self, what: &'static str) -> Result<usize, DecodeError> {
        self.read_len(what, self.limits.max_children)
    }

    /// Read one literal: kind byte, then payload.
    pub fn read_literal(&mut self) -> Result<Value, DecodeError> {
        let offset = self.offset;
        let kind = self.read_u8()?;
        let kind =
            LiteralKind::from_u8(kind).ok_or(DecodeError::InvalidLiteralKind { kind, offset })?;

        Ok(match kind {
            LiteralKind::Int => Value::Int(self.read_i64()?),
            LiteralKind::Text => Value::Text(self.read_str()?),
            LiteralKind::Bool => Value::Bool(self.read_bool()?),
            LiteralKind::Float => Value::Float(self.read_f64()?),
            LiteralKind::Null => Value::Null,
        })
    }

    /// Run `f` one nesting level deeper, enforcing the depth limit.
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        if self.depth >= self.limits.max_depth {
            return Err(DecodeError::LimitExceeded {
                limit: "nesting depth",
                value: self.depth + 1,
                max: self.limits.max_depth,
                offset: self.offset,
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;

        result
    }
}
