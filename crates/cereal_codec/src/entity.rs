//! Entities: named groups of fields and arrays.

use crate::array::ArrayField;
use crate::cursor::{encoded_string_len, string_len, ByteCursor};
use crate::error::{check_count, CodecResult};
use crate::field::{expect_marker, Field};
use crate::scalar::ScalarType;
use crate::{MAX_ARRAYS, MAX_FIELDS};

/// A named, ordered collection of fields and arrays.
///
/// Wire layout (fields always precede arrays):
///
/// ```text
/// | OBJECT (1) | name (2 + n) | field count (2) | fields... | array count (2) | arrays... |
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    name: String,
    fields: Vec<Field>,
    arrays: Vec<ArrayField>,
}

impl Entity {
    /// Creates an empty entity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            arrays: Vec::new(),
        }
    }

    /// Returns the entity name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the entity. Empty names are ignored.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() {
            self.name = name;
        }
    }

    /// Appends a field.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Appends an array.
    pub fn add_array(&mut self, array: ArrayField) {
        self.arrays.push(array);
    }

    /// Builder-style [`Entity::add_field`].
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.add_field(field);
        self
    }

    /// Builder-style [`Entity::add_array`].
    #[must_use]
    pub fn with_array(mut self, array: ArrayField) -> Self {
        self.add_array(array);
        self
    }

    /// Returns all fields in order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns all arrays in order.
    #[must_use]
    pub fn arrays(&self) -> &[ArrayField] {
        &self.arrays
    }

    /// Returns the first field with the given name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns the first field with the given name, mutably.
    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    /// Returns the first array with the given name.
    #[must_use]
    pub fn get_array(&self, name: &str) -> Option<&ArrayField> {
        self.arrays.iter().find(|a| a.name() == name)
    }

    /// Returns the first array with the given name, mutably.
    pub fn get_array_mut(&mut self, name: &str) -> Option<&mut ArrayField> {
        self.arrays.iter_mut().find(|a| a.name() == name)
    }

    /// Returns the exact number of bytes [`Entity::write`] produces.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + encoded_string_len(&self.name)
            + 2
            + self.fields.iter().map(Field::size).sum::<usize>()
            + 2
            + self.arrays.iter().map(ArrayField::size).sum::<usize>()
    }

    /// Checks counts and lengths of the entity and everything it holds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CodecError::CountOverflow`] if there are more than
    /// 65 535 fields or arrays, or any string is too long.
    pub fn validate(&self) -> CodecResult<()> {
        string_len(&self.name)?;
        check_count("fields", self.fields.len(), MAX_FIELDS)?;
        check_count("arrays", self.arrays.len(), MAX_ARRAYS)?;
        self.fields.iter().try_for_each(Field::validate)?;
        self.arrays.iter().try_for_each(ArrayField::validate)
    }

    /// Serializes the entity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CodecError::CountOverflow`] or
    /// [`crate::CodecError::InsufficientSpace`]. Nothing is written on
    /// failure.
    pub fn write(&self, cursor: &mut ByteCursor) -> CodecResult<()> {
        self.validate()?;
        cursor.ensure_space(self.size())?;
        self.emit(cursor)
    }

    pub(crate) fn emit(&self, cursor: &mut ByteCursor) -> CodecResult<()> {
        cursor.write_u8(ScalarType::Object.as_byte())?;
        cursor.write_string(&self.name)?;

        // Counts fit: validate() ran first.
        cursor.write_u16(self.fields.len() as u16)?;
        for field in &self.fields {
            field.emit(cursor)?;
        }
        cursor.write_u16(self.arrays.len() as u16)?;
        for array in &self.arrays {
            array.emit(cursor)?;
        }
        Ok(())
    }

    /// Deserializes an entity and everything it holds.
    ///
    /// # Errors
    ///
    /// Returns an error on a wrong marker, an unknown type tag or truncated
    /// input.
    pub fn read(cursor: &mut ByteCursor) -> CodecResult<Self> {
        expect_marker(cursor, ScalarType::Object)?;
        let name = cursor.read_string()?;

        let field_count = cursor.read_u16()?;
        let mut fields = Vec::with_capacity(usize::from(field_count));
        for _ in 0..field_count {
            fields.push(Field::read(cursor)?);
        }

        let array_count = cursor.read_u16()?;
        let mut arrays = Vec::with_capacity(usize::from(array_count));
        for _ in 0..array_count {
            arrays.push(ArrayField::read(cursor)?);
        }

        tracing::trace!(entity = %name, fields = field_count, arrays = array_count, "read entity");
        Ok(Self {
            name,
            fields,
            arrays,
        })
    }
}
