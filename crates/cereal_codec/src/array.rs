//! Named homogeneous arrays.

use crate::cursor::{encoded_string_len, string_len, ByteCursor};
use crate::error::{CodecError, CodecResult};
use crate::field::expect_marker;
use crate::scalar::{Scalar, ScalarType};
use crate::MAX_ARRAY_ITEMS;

/// A value that can be stored in an [`ArrayField`].
pub trait ArrayItem: Sized {
    /// The wire type tag for this item type.
    const TYPE: ScalarType;

    /// Returns the encoded size of this item.
    fn encoded_len(&self) -> usize;

    /// Writes one item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not fit or is too long.
    fn encode(&self, cursor: &mut ByteCursor) -> CodecResult<()>;

    /// Reads one item.
    ///
    /// # Errors
    ///
    /// Returns an error on truncated input.
    fn decode(cursor: &mut ByteCursor) -> CodecResult<Self>;
}

macro_rules! impl_fixed_item {
    ($($ty:ty => $tag:ident, $write:ident, $read:ident);* $(;)?) => {
        $(
            impl ArrayItem for $ty {
                const TYPE: ScalarType = ScalarType::$tag;

                fn encoded_len(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }

                fn encode(&self, cursor: &mut ByteCursor) -> CodecResult<()> {
                    cursor.$write(*self)
                }

                fn decode(cursor: &mut ByteCursor) -> CodecResult<Self> {
                    cursor.$read()
                }
            }
        )*
    };
}

impl_fixed_item! {
    bool => Bool, write_bool, read_bool;
    u8 => Byte, write_u8, read_u8;
    i16 => Short, write_i16, read_i16;
    i32 => Int, write_i32, read_i32;
    i64 => Long, write_i64, read_i64;
    f32 => Float, write_f32, read_f32;
    f64 => Double, write_f64, read_f64;
}

impl ArrayItem for String {
    const TYPE: ScalarType = ScalarType::Str;

    fn encoded_len(&self) -> usize {
        encoded_string_len(self)
    }

    fn encode(&self, cursor: &mut ByteCursor) -> CodecResult<()> {
        cursor.write_string(self)
    }

    fn decode(cursor: &mut ByteCursor) -> CodecResult<Self> {
        cursor.read_string()
    }
}

/// One named sequence of values sharing a single type.
///
/// Wire layout:
///
/// ```text
/// | ARRAY (1) | name (2 + n) | type (1) | count (4) | payload |
/// ```
///
/// Items are pre-encoded when the array is built and kept as raw payload
/// bytes; typed views decode them on demand. String arrays carry no byte
/// length on the wire, so their payload length is tracked alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayField {
    name: String,
    item_type: ScalarType,
    count: u32,
    payload: Vec<u8>,
}

impl ArrayField {
    /// Builds an array from typed items.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::CountOverflow`] if there are more than
    /// `u32::MAX` items or a string item is longer than 65 535 characters.
    pub fn new<T: ArrayItem>(name: impl Into<String>, items: &[T]) -> CodecResult<Self> {
        let count = u32::try_from(items.len()).map_err(|_| {
            CodecError::count_overflow("array items", items.len(), MAX_ARRAY_ITEMS)
        })?;
        let payload_len = items.iter().map(T::encoded_len).sum();
        let mut cursor = ByteCursor::with_capacity(payload_len);
        for item in items {
            item.encode(&mut cursor)?;
        }
        Ok(Self {
            name: name.into(),
            item_type: T::TYPE,
            count,
            payload: cursor.into_inner(),
        })
    }

    /// Builds a string array from anything string-like.
    ///
    /// # Errors
    ///
    /// See [`ArrayField::new`].
    pub fn from_strs<S: AsRef<str>>(name: impl Into<String>, items: &[S]) -> CodecResult<Self> {
        let owned: Vec<String> = items.iter().map(|s| s.as_ref().to_owned()).collect();
        Self::new(name, &owned)
    }

    /// Returns the array name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the array. Empty names are ignored.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() {
            self.name = name;
        }
    }

    /// Returns the item type tag.
    #[must_use]
    pub fn item_type(&self) -> ScalarType {
        self.item_type
    }

    /// Returns the number of items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.count
    }

    /// Returns the byte length of the encoded items.
    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Returns the raw encoded items.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the exact number of bytes [`ArrayField::write`] produces.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + encoded_string_len(&self.name) + 1 + 4 + self.payload.len()
    }

    /// Checks the name length against its wire slot.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::CountOverflow`] if the name is too long.
    pub fn validate(&self) -> CodecResult<()> {
        string_len(&self.name).map(|_| ())
    }

    /// Serializes the array.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the array does not fit or
    /// [`CodecError::CountOverflow`] if the name is too long. Nothing is
    /// written on failure.
    pub fn write(&self, cursor: &mut ByteCursor) -> CodecResult<()> {
        self.validate()?;
        cursor.ensure_space(self.size())?;
        self.emit(cursor)
    }

    pub(crate) fn emit(&self, cursor: &mut ByteCursor) -> CodecResult<()> {
        cursor.write_u8(ScalarType::Array.as_byte())?;
        cursor.write_string(&self.name)?;
        cursor.write_u8(self.item_type.as_byte())?;
        cursor.write_u32(self.count)?;
        cursor.copy_from_slice(&self.payload)
    }

    /// Deserializes an array.
    ///
    /// Fixed-width payloads are taken verbatim. String payloads have no
    /// declared byte length, so each of the `count` records is walked to
    /// measure the span before it is copied.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedMarker`], [`CodecError::UnknownType`]
    /// or [`CodecError::UnexpectedEof`] on malformed input.
    pub fn read(cursor: &mut ByteCursor) -> CodecResult<Self> {
        expect_marker(cursor, ScalarType::Array)?;
        let name = cursor.read_string()?;
        let item_type = ScalarType::value_type_from_byte(cursor.read_u8()?)?;
        let count = cursor.read_u32()?;

        let payload_len = match item_type.fixed_size() {
            Some(width) => {
                let needed = u64::from(count) * width as u64;
                usize::try_from(needed).map_err(|_| CodecError::UnexpectedEof {
                    needed: usize::MAX,
                    available: cursor.remaining(),
                })?
            }
            None => {
                let start = cursor.position();
                let mut span = 0;
                for _ in 0..count {
                    span += cursor.skip_string()?;
                }
                cursor.set_position(start)?;
                span
            }
        };
        let payload = cursor.read_bytes(payload_len)?.to_vec();

        Ok(Self {
            name,
            item_type,
            count,
            payload,
        })
    }

    /// Decodes the items as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] if `T` is not the stored type.
    pub fn get_as<T: ArrayItem>(&self) -> CodecResult<Vec<T>> {
        if T::TYPE != self.item_type {
            return Err(CodecError::TypeMismatch {
                expected: T::TYPE,
                actual: self.item_type,
            });
        }
        let mut cursor = ByteCursor::from_bytes(self.payload.clone());
        (0..self.count).map(|_| T::decode(&mut cursor)).collect()
    }

    /// Decodes a bool array.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] for any other item type.
    pub fn as_bools(&self) -> CodecResult<Vec<bool>> {
        self.get_as()
    }

    /// Decodes a byte array.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] for any other item type.
    pub fn as_bytes(&self) -> CodecResult<Vec<u8>> {
        self.get_as()
    }

    /// Decodes a byte array as single-byte characters.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] for any other item type.
    pub fn as_chars(&self) -> CodecResult<Vec<char>> {
        Ok(self.as_bytes()?.into_iter().map(char::from).collect())
    }

    /// Decodes a short array.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] for any other item type.
    pub fn as_shorts(&self) -> CodecResult<Vec<i16>> {
        self.get_as()
    }

    /// Decodes an int array.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] for any other item type.
    pub fn as_ints(&self) -> CodecResult<Vec<i32>> {
        self.get_as()
    }

    /// Decodes a long array.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] for any other item type.
    pub fn as_longs(&self) -> CodecResult<Vec<i64>> {
        self.get_as()
    }

    /// Decodes a float array.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] for any other item type.
    pub fn as_floats(&self) -> CodecResult<Vec<f32>> {
        self.get_as()
    }

    /// Decodes a double array.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] for any other item type.
    pub fn as_doubles(&self) -> CodecResult<Vec<f64>> {
        self.get_as()
    }

    /// Decodes a string array.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] for any other item type.
    pub fn as_strings(&self) -> CodecResult<Vec<String>> {
        self.get_as()
    }

    /// Decodes every item as a tagged [`Scalar`], whatever the item type.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if the payload is shorter than
    /// the item count implies.
    pub fn values(&self) -> CodecResult<Vec<Scalar>> {
        let mut cursor = ByteCursor::from_bytes(self.payload.clone());
        (0..self.count)
            .map(|_| Scalar::decode(self.item_type, &mut cursor))
            .collect()
    }
}
