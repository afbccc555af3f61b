//! Bounded byte cursor with big-endian typed access.

use crate::error::{check_count, CodecError, CodecResult};
use crate::MAX_STRING_LEN;
use std::fs;
use std::path::Path;

/// A fixed-size byte buffer with a single read/write position.
///
/// Every write checks that the value fits before touching the buffer, and
/// every read checks that enough bytes remain. A failed call leaves both the
/// bytes and the position as they were.
///
/// All multi-byte values are big-endian. Floats travel as their IEEE-754 bit
/// pattern, so NaN payloads survive a round trip unchanged.
///
/// # Example
///
/// ```rust
/// use cereal_codec::ByteCursor;
///
/// let mut cursor = ByteCursor::with_capacity(16);
/// cursor.write_u16(0xBEEF).unwrap();
/// cursor.write_string("hi").unwrap();
/// assert_eq!(cursor.written(), &[0xBE, 0xEF, 0x00, 0x02, b'h', b'i']);
///
/// cursor.set_position(0).unwrap();
/// assert_eq!(cursor.read_u16().unwrap(), 0xBEEF);
/// assert_eq!(cursor.read_string().unwrap(), "hi");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteCursor {
    data: Vec<u8>,
    offset: usize,
}

impl ByteCursor {
    /// Creates a zero-filled cursor holding exactly `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            offset: 0,
        }
    }

    /// Wraps existing bytes, positioned at the start.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: bytes.into(),
            offset: 0,
        }
    }

    /// Reads a whole file into a new cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn open(path: impl AsRef<Path>) -> CodecResult<Self> {
        let mut cursor = Self::default();
        cursor.load_from_file(path)?;
        Ok(cursor)
    }

    /// Replaces the buffer with the contents of a file and rewinds.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read. The cursor is left
    /// untouched in that case.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> CodecResult<()> {
        self.data = fs::read(path)?;
        self.offset = 0;
        Ok(())
    }

    /// Writes the bytes before the current position to a file.
    ///
    /// Unused capacity past the position is not written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> CodecResult<()> {
        fs::write(path, self.written())?;
        Ok(())
    }

    /// Returns the current read/write position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Moves the position.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if `position` lies past the end.
    pub fn set_position(&mut self, position: usize) -> CodecResult<()> {
        if position > self.data.len() {
            return Err(CodecError::UnexpectedEof {
                needed: position,
                available: self.data.len(),
            });
        }
        self.offset = position;
        Ok(())
    }

    /// Advances the position without reading.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if fewer than `len` bytes remain.
    pub fn skip(&mut self, len: usize) -> CodecResult<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Returns the total size of the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer holds no bytes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of bytes between the position and the end.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Returns the capacity left for writing; the same count as
    /// [`ByteCursor::remaining`].
    #[must_use]
    pub fn free_space(&self) -> usize {
        self.remaining()
    }

    /// Returns true if `amount` more bytes fit before the end.
    #[must_use]
    pub fn has_space(&self, amount: usize) -> bool {
        amount <= self.remaining()
    }

    /// Fails with [`CodecError::InsufficientSpace`] unless `amount` bytes fit.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn ensure_space(&self, amount: usize) -> CodecResult<()> {
        if !self.has_space(amount) {
            return Err(CodecError::InsufficientSpace {
                needed: amount,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Returns the whole buffer, including bytes past the position.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the bytes before the position.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.data[..self.offset]
    }

    /// Consumes the cursor and returns the whole buffer.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Zero-fills the buffer and rewinds.
    pub fn clear(&mut self) {
        self.data.fill(0);
        self.offset = 0;
    }

    /// Drops every byte past the position.
    pub fn shrink(&mut self) {
        self.data.truncate(self.offset);
        self.data.shrink_to_fit();
    }

    /// Appends raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the bytes do not fit.
    pub fn copy_from_slice(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.ensure_space(bytes.len())?;
        let end = self.offset + bytes.len();
        self.data[self.offset..end].copy_from_slice(bytes);
        self.offset = end;
        Ok(())
    }

    /// Appends the written prefix of another cursor.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the bytes do not fit.
    pub fn copy_from_cursor(&mut self, other: &ByteCursor) -> CodecResult<()> {
        self.copy_from_slice(other.written())
    }

    /// Consumes `len` raw bytes and returns them.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if fewer than `len` bytes remain.
    pub fn read_bytes(&mut self, len: usize) -> CodecResult<&[u8]> {
        let available = self.remaining();
        if len > available {
            return Err(CodecError::UnexpectedEof {
                needed: len,
                available,
            });
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.data[start..self.offset])
    }

    /// Returns the next `len` bytes without consuming them.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if fewer than `len` bytes remain.
    pub fn peek_bytes(&self, len: usize) -> CodecResult<&[u8]> {
        let available = self.remaining();
        if len > available {
            return Err(CodecError::UnexpectedEof {
                needed: len,
                available,
            });
        }
        Ok(&self.data[self.offset..self.offset + len])
    }

    fn put<const N: usize>(&mut self, bytes: [u8; N]) -> CodecResult<()> {
        self.copy_from_slice(&bytes)
    }

    fn take<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Writes a `u8`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the value does not fit.
    pub fn write_u8(&mut self, value: u8) -> CodecResult<()> {
        self.put([value])
    }

    /// Writes a bool as a single `0`/`1` byte.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the value does not fit.
    pub fn write_bool(&mut self, value: bool) -> CodecResult<()> {
        self.put([u8::from(value)])
    }

    /// Writes a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the value does not fit.
    pub fn write_u16(&mut self, value: u16) -> CodecResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes a big-endian `i16`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the value does not fit.
    pub fn write_i16(&mut self, value: i16) -> CodecResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the value does not fit.
    pub fn write_u32(&mut self, value: u32) -> CodecResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes a big-endian `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the value does not fit.
    pub fn write_i32(&mut self, value: i32) -> CodecResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes a big-endian `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the value does not fit.
    pub fn write_u64(&mut self, value: u64) -> CodecResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes a big-endian `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the value does not fit.
    pub fn write_i64(&mut self, value: i64) -> CodecResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes an `f32` through its bit pattern.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the value does not fit.
    pub fn write_f32(&mut self, value: f32) -> CodecResult<()> {
        self.write_u32(value.to_bits())
    }

    /// Writes an `f64` through its bit pattern.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientSpace`] if the value does not fit.
    pub fn write_f64(&mut self, value: f64) -> CodecResult<()> {
        self.write_u64(value.to_bits())
    }

    /// Writes a `u16` length prefix followed by one byte per character.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::CountOverflow`] if the string is longer than
    /// [`MAX_STRING_LEN`] characters, [`CodecError::UnsupportedChar`] if a
    /// character is above U+00FF, or [`CodecError::InsufficientSpace`] if it
    /// does not fit. Nothing is written on failure.
    pub fn write_string(&mut self, value: &str) -> CodecResult<()> {
        let len = string_len(value)?;
        self.ensure_space(2 + usize::from(len))?;
        self.write_u16(len)?;
        let body: Vec<u8> = value.chars().map(latin1_byte).collect::<CodecResult<_>>()?;
        self.copy_from_slice(&body)
    }

    /// Reads a `u8`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] at end of input.
    pub fn read_u8(&mut self) -> CodecResult<u8> {
        self.take::<1>().map(|[b]| b)
    }

    /// Reads a bool; any non-zero byte is `true`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] at end of input.
    pub fn read_bool(&mut self) -> CodecResult<bool> {
        self.read_u8().map(|b| b != 0)
    }

    /// Reads a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if fewer than 2 bytes remain.
    pub fn read_u16(&mut self) -> CodecResult<u16> {
        self.take().map(u16::from_be_bytes)
    }

    /// Reads a big-endian `i16`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if fewer than 2 bytes remain.
    pub fn read_i16(&mut self) -> CodecResult<i16> {
        self.take().map(i16::from_be_bytes)
    }

    /// Reads a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_u32(&mut self) -> CodecResult<u32> {
        self.take().map(u32::from_be_bytes)
    }

    /// Reads a big-endian `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_i32(&mut self) -> CodecResult<i32> {
        self.take().map(i32::from_be_bytes)
    }

    /// Reads a big-endian `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if fewer than 8 bytes remain.
    pub fn read_u64(&mut self) -> CodecResult<u64> {
        self.take().map(u64::from_be_bytes)
    }

    /// Reads a big-endian `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if fewer than 8 bytes remain.
    pub fn read_i64(&mut self) -> CodecResult<i64> {
        self.take().map(i64::from_be_bytes)
    }

    /// Reads an `f32` from its bit pattern.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_f32(&mut self) -> CodecResult<f32> {
        self.read_u32().map(f32::from_bits)
    }

    /// Reads an `f64` from its bit pattern.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if fewer than 8 bytes remain.
    pub fn read_f64(&mut self) -> CodecResult<f64> {
        self.read_u64().map(f64::from_bits)
    }

    /// Reads a length-prefixed string.
    ///
    /// Each byte becomes one character in the range U+0000..=U+00FF.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if the prefix or the body is
    /// cut short. The position is restored on failure.
    pub fn read_string(&mut self) -> CodecResult<String> {
        let start = self.offset;
        let result = self
            .read_u16()
            .and_then(|len| self.read_bytes(usize::from(len)).map(decode_text));
        if result.is_err() {
            self.offset = start;
        }
        result
    }

    /// Skips a length-prefixed string and returns its encoded size.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEof`] if the record is cut short. The
    /// position is restored on failure.
    pub fn skip_string(&mut self) -> CodecResult<usize> {
        let start = self.offset;
        let result = self
            .read_u16()
            .and_then(|len| self.skip(usize::from(len)));
        match result {
            Ok(()) => Ok(self.offset - start),
            Err(e) => {
                self.offset = start;
                Err(e)
            }
        }
    }
}

/// Returns the encoded size of a length-prefixed string.
#[must_use]
pub fn encoded_string_len(value: &str) -> usize {
    2 + value.chars().count()
}

/// Returns the `u16` length prefix for `value`.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedChar`] for a character above U+00FF and
/// [`CodecError::CountOverflow`] if the string does not fit.
pub(crate) fn string_len(value: &str) -> CodecResult<u16> {
    if let Some(c) = value.chars().find(|&c| u32::from(c) > 0xFF) {
        return Err(CodecError::UnsupportedChar(c));
    }
    let count = value.chars().count();
    check_count("string chars", count, MAX_STRING_LEN)?;
    u16::try_from(count)
        .map_err(|_| CodecError::count_overflow("string chars", count, MAX_STRING_LEN))
}

fn latin1_byte(c: char) -> CodecResult<u8> {
    u8::try_from(c).map_err(|_| CodecError::UnsupportedChar(c))
}

fn decode_text(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    #[test]
    fn writes_are_big_endian() {
        let mut cursor = ByteCursor::with_capacity(15);
        cursor.write_u8(0xAB).unwrap();
        cursor.write_u16(0x0102).unwrap();
        cursor.write_u32(0x0304_0506).unwrap();
        cursor.write_u64(0x0708_090A_0B0C_0D0E).unwrap();
        assert_eq!(
            cursor.written(),
            &[0xAB, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]
        );
    }

    #[test]
    fn write_without_space_is_rejected_untouched() {
        let mut cursor = ByteCursor::with_capacity(3);
        cursor.write_u8(1).unwrap();
        let err = cursor.write_u32(7).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InsufficientSpace {
                needed: 4,
                available: 2
            }
        ));
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.as_bytes(), &[1, 0, 0]);
    }

    #[test]
    fn read_past_end_is_rejected() {
        let mut cursor = ByteCursor::from_bytes(vec![0x00, 0x01, 0x02]);
        assert_eq!(cursor.read_u16().unwrap(), 1);
        assert!(matches!(
            cursor.read_u32(),
            Err(CodecError::UnexpectedEof {
                needed: 4,
                available: 1
            })
        ));
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.read_u8().unwrap(), 2);
        assert!(cursor.read_u8().is_err());
    }

    #[test]
    fn negative_integers_round_trip() {
        let mut cursor = ByteCursor::with_capacity(14);
        cursor.write_i16(-2).unwrap();
        cursor.write_i32(i32::MIN).unwrap();
        cursor.write_i64(-1).unwrap();
        assert_eq!(&cursor.written()[..2], &[0xFF, 0xFE]);

        cursor.set_position(0).unwrap();
        assert_eq!(cursor.read_i16().unwrap(), -2);
        assert_eq!(cursor.read_i32().unwrap(), i32::MIN);
        assert_eq!(cursor.read_i64().unwrap(), -1);
    }

    #[test]
    fn float_bit_patterns_survive() {
        let values = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0, 3.141_592_65];
        let mut cursor = ByteCursor::with_capacity(values.len() * 8 + 4);
        for v in values {
            cursor.write_f64(v).unwrap();
        }
        let quiet_nan_payload = f32::from_bits(0x7FC0_1234);
        cursor.write_f32(quiet_nan_payload).unwrap();

        cursor.set_position(0).unwrap();
        for v in values {
            assert_eq!(cursor.read_f64().unwrap().to_bits(), v.to_bits());
        }
        assert_eq!(cursor.read_f32().unwrap().to_bits(), 0x7FC0_1234);
    }

    #[test]
    fn string_layout() {
        let mut cursor = ByteCursor::with_capacity(8);
        cursor.write_string("abc").unwrap();
        assert_eq!(cursor.written(), &[0, 3, b'a', b'b', b'c']);
        assert_eq!(cursor.free_space(), 3);
        assert_eq!(encoded_string_len("abc"), 5);
    }

    #[test]
    fn string_at_max_length_succeeds() {
        let s = "x".repeat(MAX_STRING_LEN);
        let mut cursor = ByteCursor::with_capacity(encoded_string_len(&s));
        cursor.write_string(&s).unwrap();
        assert!(!cursor.has_space(1));

        cursor.set_position(0).unwrap();
        assert_eq!(cursor.read_string().unwrap().len(), MAX_STRING_LEN);
    }

    #[test]
    fn string_over_max_length_fails() {
        let s = "x".repeat(MAX_STRING_LEN + 1);
        let mut cursor = ByteCursor::with_capacity(s.len() + 2);
        let err = cursor.write_string(&s).unwrap_err();
        assert!(matches!(err, CodecError::CountOverflow { count, .. } if count == MAX_STRING_LEN + 1));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn string_without_space_writes_nothing() {
        let mut cursor = ByteCursor::with_capacity(4);
        assert!(matches!(
            cursor.write_string("abc"),
            Err(CodecError::InsufficientSpace { .. })
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn truncated_string_restores_position() {
        let mut cursor = ByteCursor::from_bytes(vec![0, 5, b'a', b'b']);
        assert!(matches!(
            cursor.read_string(),
            Err(CodecError::UnexpectedEof { .. })
        ));
        assert_eq!(cursor.position(), 0);
        assert!(cursor.skip_string().is_err());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn string_bytes_read_as_latin1() {
        let mut cursor = ByteCursor::from_bytes(vec![0, 2, 0xE9, 0x41]);
        assert_eq!(cursor.read_string().unwrap(), "\u{e9}A");
    }

    #[test]
    fn high_latin1_string_writes_one_byte_per_char() {
        let mut cursor = ByteCursor::with_capacity(6);
        cursor.write_string("\u{e9}t\u{e9}").unwrap();
        assert_eq!(cursor.written(), &[0, 3, 0xE9, b't', 0xE9]);
        assert_eq!(encoded_string_len("\u{e9}t\u{e9}"), 5);

        cursor.set_position(0).unwrap();
        assert_eq!(cursor.read_string().unwrap(), "\u{e9}t\u{e9}");
    }

    #[test]
    fn char_above_latin1_is_rejected() {
        let mut cursor = ByteCursor::with_capacity(16);
        assert!(matches!(
            cursor.write_string("5\u{20ac}"),
            Err(CodecError::UnsupportedChar('\u{20ac}'))
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn max_length_high_bytes_round_trip() {
        let mut raw = vec![0xFF, 0xFF];
        raw.resize(2 + MAX_STRING_LEN, 0xE9);
        let mut cursor = ByteCursor::from_bytes(raw.clone());
        let text = cursor.read_string().unwrap();
        assert_eq!(text.chars().count(), MAX_STRING_LEN);
        assert_eq!(encoded_string_len(&text), raw.len());

        let mut out = ByteCursor::with_capacity(raw.len());
        out.write_string(&text).unwrap();
        assert_eq!(out.written(), raw.as_slice());
    }

    #[test]
    fn copy_appends_written_prefix() {
        let mut staging = ByteCursor::with_capacity(10);
        staging.write_u16(0x1234).unwrap();

        let mut out = ByteCursor::with_capacity(4);
        out.write_u8(9).unwrap();
        out.copy_from_cursor(&staging).unwrap();
        assert_eq!(out.written(), &[9, 0x12, 0x34]);

        assert!(matches!(
            out.copy_from_slice(&[1, 2]),
            Err(CodecError::InsufficientSpace { .. })
        ));
        assert_eq!(out.position(), 3);
    }

    #[test]
    fn shrink_truncates_to_position() {
        let mut cursor = ByteCursor::with_capacity(64);
        cursor.write_u32(1).unwrap();
        cursor.shrink();
        assert_eq!(cursor.len(), 4);
        assert!(!cursor.has_space(1));
    }

    #[test]
    fn set_position_is_bounded() {
        let mut cursor = ByteCursor::with_capacity(4);
        cursor.set_position(4).unwrap();
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.set_position(5).is_err());
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn clear_zeroes_and_rewinds() {
        let mut cursor = ByteCursor::with_capacity(2);
        cursor.write_u16(0xFFFF).unwrap();
        cursor.clear();
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.as_bytes(), &[0, 0]);
    }

    #[test]
    fn save_writes_only_written_prefix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefix.bin");

        let mut cursor = ByteCursor::with_capacity(32);
        cursor.write_string("saved").unwrap();
        cursor.save_to_file(&path).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 7);

        let mut loaded = ByteCursor::with_capacity(3);
        loaded.write_u8(1).unwrap();
        loaded.load_from_file(&path).unwrap();
        assert_eq!(loaded.position(), 0);
        assert_eq!(loaded.len(), 7);
        assert_eq!(loaded.read_string().unwrap(), "saved");
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            ByteCursor::open(dir.path().join("missing.bin")),
            Err(CodecError::Io(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_i64_round_trip(v in any::<i64>()) {
            let mut cursor = ByteCursor::with_capacity(8);
            cursor.write_i64(v).unwrap();
            cursor.set_position(0).unwrap();
            prop_assert_eq!(cursor.read_i64().unwrap(), v);
        }

        #[test]
        fn prop_f32_bits_round_trip(bits in any::<u32>()) {
            let mut cursor = ByteCursor::with_capacity(4);
            cursor.write_f32(f32::from_bits(bits)).unwrap();
            cursor.set_position(0).unwrap();
            prop_assert_eq!(cursor.read_f32().unwrap().to_bits(), bits);
        }

        #[test]
        fn prop_f64_bits_round_trip(bits in any::<u64>()) {
            let mut cursor = ByteCursor::with_capacity(8);
            cursor.write_f64(f64::from_bits(bits)).unwrap();
            cursor.set_position(0).unwrap();
            prop_assert_eq!(cursor.read_f64().unwrap().to_bits(), bits);
        }

        #[test]
        fn prop_string_round_trip(s in "[\\x00-\\xFF]{0,64}") {
            let mut cursor = ByteCursor::with_capacity(encoded_string_len(&s));
            cursor.write_string(&s).unwrap();
            cursor.set_position(0).unwrap();
            prop_assert_eq!(cursor.read_string().unwrap(), s);
        }
    }
}
