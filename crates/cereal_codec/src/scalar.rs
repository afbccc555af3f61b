//! Scalar type tags and the tagged scalar value.

use crate::cursor::{encoded_string_len, ByteCursor};
use crate::error::{CodecError, CodecResult};
use std::fmt;

/// One-byte discriminator written before every value and structure.
///
/// The byte type and the character type share the `Byte` tag on the wire
/// (`CHAR` in older writers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ScalarType {
    /// Uninitialised or invalid.
    Unknown = 0,
    /// `bool`, one byte.
    Bool = 1,
    /// `u8` or single-byte character.
    Byte = 2,
    /// `i16`.
    Short = 3,
    /// `i32`.
    Int = 4,
    /// `i64` (`LONG_LONG`).
    Long = 5,
    /// `f32`.
    Float = 6,
    /// `f64`.
    Double = 7,
    /// Length-prefixed string.
    Str = 8,
    /// Entity marker.
    Object = 9,
    /// Array marker.
    Array = 10,
    /// Field marker.
    Field = 11,
}

impl ScalarType {
    /// Converts a byte to a type tag.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Self::Unknown),
            1 => Some(Self::Bool),
            2 => Some(Self::Byte),
            3 => Some(Self::Short),
            4 => Some(Self::Int),
            5 => Some(Self::Long),
            6 => Some(Self::Float),
            7 => Some(Self::Double),
            8 => Some(Self::Str),
            9 => Some(Self::Object),
            10 => Some(Self::Array),
            11 => Some(Self::Field),
            _ => None,
        }
    }

    /// Converts a byte to a value type tag, rejecting markers and `Unknown`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownType`] for anything that is not a value type.
    pub fn value_type_from_byte(b: u8) -> CodecResult<Self> {
        Self::from_byte(b)
            .filter(|ty| ty.is_value())
            .ok_or(CodecError::UnknownType(b))
    }

    /// Converts the tag to its wire byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Returns the encoded width of fixed-size value types.
    ///
    /// Strings, markers and `Unknown` have no fixed width.
    #[must_use]
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::Bool | Self::Byte => Some(1),
            Self::Short => Some(2),
            Self::Int | Self::Float => Some(4),
            Self::Long | Self::Double => Some(8),
            Self::Str | Self::Object | Self::Array | Self::Field | Self::Unknown => None,
        }
    }

    /// Returns true for tags that can describe a field or array value.
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
                | Self::Str
        )
    }

    /// Returns a lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Str => "string",
            Self::Object => "object",
            Self::Array => "array",
            Self::Field => "field",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single typed value.
///
/// The wire form is untyped bytes preceded by a [`ScalarType`] tag; in memory
/// the value carries its own type so accessors can refuse a mismatch instead
/// of reinterpreting bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean value.
    Bool(bool),
    /// Byte (also used for single-byte characters).
    Byte(u8),
    /// 16-bit signed integer.
    Short(i16),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// Single-precision float.
    Float(f32),
    /// Double-precision float.
    Double(f64),
    /// String of at most 65 535 characters, each at most U+00FF.
    Str(String),
}

impl Scalar {
    /// Returns the type tag for this value.
    #[must_use]
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Self::Bool(_) => ScalarType::Bool,
            Self::Byte(_) => ScalarType::Byte,
            Self::Short(_) => ScalarType::Short,
            Self::Int(_) => ScalarType::Int,
            Self::Long(_) => ScalarType::Long,
            Self::Float(_) => ScalarType::Float,
            Self::Double(_) => ScalarType::Double,
            Self::Str(_) => ScalarType::Str,
        }
    }

    /// Returns the size of the encoded payload (without the tag).
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Str(s) => encoded_string_len(s),
            other => other.scalar_type().fixed_size().unwrap_or(0),
        }
    }

    /// Writes the payload (without the tag).
    ///
    /// # Errors
    ///
    /// Returns an error if the payload does not fit or a string is too long.
    pub fn encode(&self, cursor: &mut ByteCursor) -> CodecResult<()> {
        match self {
            Self::Bool(v) => cursor.write_bool(*v),
            Self::Byte(v) => cursor.write_u8(*v),
            Self::Short(v) => cursor.write_i16(*v),
            Self::Int(v) => cursor.write_i32(*v),
            Self::Long(v) => cursor.write_i64(*v),
            Self::Float(v) => cursor.write_f32(*v),
            Self::Double(v) => cursor.write_f64(*v),
            Self::Str(s) => cursor.write_string(s),
        }
    }

    /// Reads a payload of the given type.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownType`] if `ty` is not a value type, or
    /// [`CodecError::UnexpectedEof`] if the payload is cut short.
    pub fn decode(ty: ScalarType, cursor: &mut ByteCursor) -> CodecResult<Self> {
        let value = match ty {
            ScalarType::Bool => Self::Bool(cursor.read_bool()?),
            ScalarType::Byte => Self::Byte(cursor.read_u8()?),
            ScalarType::Short => Self::Short(cursor.read_i16()?),
            ScalarType::Int => Self::Int(cursor.read_i32()?),
            ScalarType::Long => Self::Long(cursor.read_i64()?),
            ScalarType::Float => Self::Float(cursor.read_f32()?),
            ScalarType::Double => Self::Double(cursor.read_f64()?),
            ScalarType::Str => Self::Str(cursor.read_string()?),
            other => return Err(CodecError::UnknownType(other.as_byte())),
        };
        Ok(value)
    }

    /// Compares two values bit for bit (NaN equals itself).
    #[must_use]
    pub fn bit_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    u8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => Str,
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn round_trip(value: &Scalar) -> Scalar {
        let mut cursor = ByteCursor::with_capacity(value.encoded_len());
        value.encode(&mut cursor).unwrap();
        assert_eq!(cursor.remaining(), 0);
        cursor.set_position(0).unwrap();
        Scalar::decode(value.scalar_type(), &mut cursor).unwrap()
    }

    #[test]
    fn tag_bytes_are_stable() {
        for b in 0..=11u8 {
            assert_eq!(ScalarType::from_byte(b).unwrap().as_byte(), b);
        }
        assert_eq!(ScalarType::from_byte(12), None);
        assert_eq!(ScalarType::from_byte(0xFF), None);
    }

    #[test]
    fn fixed_sizes() {
        assert_eq!(ScalarType::Bool.fixed_size(), Some(1));
        assert_eq!(ScalarType::Byte.fixed_size(), Some(1));
        assert_eq!(ScalarType::Short.fixed_size(), Some(2));
        assert_eq!(ScalarType::Int.fixed_size(), Some(4));
        assert_eq!(ScalarType::Float.fixed_size(), Some(4));
        assert_eq!(ScalarType::Long.fixed_size(), Some(8));
        assert_eq!(ScalarType::Double.fixed_size(), Some(8));
        assert_eq!(ScalarType::Str.fixed_size(), None);
        assert_eq!(ScalarType::Unknown.fixed_size(), None);
        assert_eq!(ScalarType::Object.fixed_size(), None);
    }

    #[test]
    fn markers_are_not_value_types() {
        for marker in [0u8, 9, 10, 11, 200] {
            assert!(matches!(
                ScalarType::value_type_from_byte(marker),
                Err(CodecError::UnknownType(b)) if b == marker
            ));
        }
        assert_eq!(
            ScalarType::value_type_from_byte(7).unwrap(),
            ScalarType::Double
        );
    }

    #[test]
    fn float_and_int_of_same_width_differ_on_wire() {
        let mut a = ByteCursor::with_capacity(4);
        Scalar::Float(1.0).encode(&mut a).unwrap();
        let mut b = ByteCursor::with_capacity(4);
        Scalar::Int(1).encode(&mut b).unwrap();
        assert_eq!(a.written(), &[0x3F, 0x80, 0x00, 0x00]);
        assert_eq!(b.written(), &[0x00, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn decode_rejects_marker_types() {
        let mut cursor = ByteCursor::from_bytes(vec![0; 8]);
        assert!(matches!(
            Scalar::decode(ScalarType::Object, &mut cursor),
            Err(CodecError::UnknownType(9))
        ));
    }

    #[test]
    fn special_floats_round_trip() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, f64::MIN_POSITIVE] {
            let value = Scalar::Double(v);
            assert!(round_trip(&value).bit_eq(&value));
        }
        for v in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let value = Scalar::Float(v);
            assert!(round_trip(&value).bit_eq(&value));
        }
    }

    #[test]
    fn display_formats() {
        assert_eq!(Scalar::from("hi").to_string(), "\"hi\"");
        assert_eq!(Scalar::from(-3i16).to_string(), "-3");
        assert_eq!(ScalarType::Long.to_string(), "long");
    }

    fn scalar_strategy() -> impl Strategy<Value = Scalar> {
        prop_oneof![
            any::<bool>().prop_map(Scalar::Bool),
            any::<u8>().prop_map(Scalar::Byte),
            any::<i16>().prop_map(Scalar::Short),
            any::<i32>().prop_map(Scalar::Int),
            any::<i64>().prop_map(Scalar::Long),
            any::<u32>().prop_map(|b| Scalar::Float(f32::from_bits(b))),
            any::<u64>().prop_map(|b| Scalar::Double(f64::from_bits(b))),
            "[\\x00-\\xFF]{0,32}".prop_map(Scalar::Str),
        ]
    }

    proptest! {
        #[test]
        fn prop_scalar_round_trip(value in scalar_strategy()) {
            let decoded = round_trip(&value);
            prop_assert!(decoded.bit_eq(&value), "{:?} != {:?}", decoded, value);
        }
    }
}
