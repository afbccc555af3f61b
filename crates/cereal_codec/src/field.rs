//! Named scalar fields.

use crate::cursor::{encoded_string_len, string_len, ByteCursor};
use crate::error::{CodecError, CodecResult};
use crate::scalar::{Scalar, ScalarType};

/// One named scalar value.
///
/// Wire layout:
///
/// ```text
/// | FIELD (1) | name (2 + n) | type (1) | payload |
/// ```
///
/// The payload is `size_of(type)` bytes for fixed types, or a `u16` length
/// followed by the bytes for strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    value: Scalar,
}

impl Field {
    /// Creates a field from any scalar value.
    pub fn new(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the field. Empty names are ignored.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() {
            self.name = name;
        }
    }

    /// Returns the stored value.
    #[must_use]
    pub fn value(&self) -> &Scalar {
        &self.value
    }

    /// Replaces the stored value, possibly changing its type.
    pub fn set_value(&mut self, value: impl Into<Scalar>) {
        self.value = value.into();
    }

    /// Returns the type tag of the stored value.
    #[must_use]
    pub fn scalar_type(&self) -> ScalarType {
        self.value.scalar_type()
    }

    /// Returns the exact number of bytes [`Field::write`] produces.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + encoded_string_len(&self.name) + 1 + self.value.encoded_len()
    }

    /// Checks every length against its wire slot.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::CountOverflow`] if the name or a string value is
    /// longer than 65 535 characters, or [`CodecError::UnsupportedChar`] if
    /// either holds a character above U+00FF.
    pub fn validate(&self) -> CodecResult<()> {
        string_len(&self.name)?;
        if let Scalar::Str(s) = &self.value {
            string_len(s)?;
        }
        Ok(())
    }

    /// Serializes the field.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the field does not fit or
    /// [`CodecError::CountOverflow`] if a string is too long. Nothing is
    /// written on failure.
    pub fn write(&self, cursor: &mut ByteCursor) -> CodecResult<()> {
        self.validate()?;
        cursor.ensure_space(self.size())?;
        self.emit(cursor)
    }

    /// Writes the field without validating; callers have already checked
    /// lengths and space.
    pub(crate) fn emit(&self, cursor: &mut ByteCursor) -> CodecResult<()> {
        cursor.write_u8(ScalarType::Field.as_byte())?;
        cursor.write_string(&self.name)?;
        cursor.write_u8(self.value.scalar_type().as_byte())?;
        self.value.encode(cursor)
    }

    /// Deserializes a field.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedMarker`] if the stream is not
    /// positioned at a field, [`CodecError::UnknownType`] for an unknown type
    /// tag, or [`CodecError::UnexpectedEof`] on truncated input.
    pub fn read(cursor: &mut ByteCursor) -> CodecResult<Self> {
        expect_marker(cursor, ScalarType::Field)?;
        let name = cursor.read_string()?;
        let ty = ScalarType::value_type_from_byte(cursor.read_u8()?)?;
        let value = Scalar::decode(ty, cursor)?;
        Ok(Self { name, value })
    }

    fn mismatch(&self, expected: ScalarType) -> CodecError {
        CodecError::TypeMismatch {
            expected,
            actual: self.scalar_type(),
        }
    }

    /// Returns the value as a bool.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] if the field holds another type.
    pub fn as_bool(&self) -> CodecResult<bool> {
        match self.value {
            Scalar::Bool(v) => Ok(v),
            _ => Err(self.mismatch(ScalarType::Bool)),
        }
    }

    /// Returns the value as a byte.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] if the field holds another type.
    pub fn as_byte(&self) -> CodecResult<u8> {
        match self.value {
            Scalar::Byte(v) => Ok(v),
            _ => Err(self.mismatch(ScalarType::Byte)),
        }
    }

    /// Returns the byte value as a single-byte character.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] if the field holds another type.
    pub fn as_char(&self) -> CodecResult<char> {
        self.as_byte().map(char::from)
    }

    /// Returns the value as an `i16`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] if the field holds another type.
    pub fn as_short(&self) -> CodecResult<i16> {
        match self.value {
            Scalar::Short(v) => Ok(v),
            _ => Err(self.mismatch(ScalarType::Short)),
        }
    }

    /// Returns the value as an `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] if the field holds another type.
    pub fn as_int(&self) -> CodecResult<i32> {
        match self.value {
            Scalar::Int(v) => Ok(v),
            _ => Err(self.mismatch(ScalarType::Int)),
        }
    }

    /// Returns the value as an `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] if the field holds another type.
    pub fn as_long(&self) -> CodecResult<i64> {
        match self.value {
            Scalar::Long(v) => Ok(v),
            _ => Err(self.mismatch(ScalarType::Long)),
        }
    }

    /// Returns the value as an `f32`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] if the field holds another type.
    pub fn as_float(&self) -> CodecResult<f32> {
        match self.value {
            Scalar::Float(v) => Ok(v),
            _ => Err(self.mismatch(ScalarType::Float)),
        }
    }

    /// Returns the value as an `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] if the field holds another type.
    pub fn as_double(&self) -> CodecResult<f64> {
        match self.value {
            Scalar::Double(v) => Ok(v),
            _ => Err(self.mismatch(ScalarType::Double)),
        }
    }

    /// Returns the value as a string slice.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] if the field holds another type.
    pub fn as_str(&self) -> CodecResult<&str> {
        match &self.value {
            Scalar::Str(s) => Ok(s),
            _ => Err(self.mismatch(ScalarType::Str)),
        }
    }
}

/// Reads one byte and checks it is the expected structural marker.
pub(crate) fn expect_marker(cursor: &mut ByteCursor, expected: ScalarType) -> CodecResult<()> {
    let found = cursor.read_u8()?;
    if found != expected.as_byte() {
        return Err(CodecError::UnexpectedMarker { expected, found });
    }
    Ok(())
}
