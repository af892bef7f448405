//! Bit packing, most-significant bit first.

use std::io::{self, Cursor};
use std::iter::FusedIterator;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite};

use crate::codes::Code;

/// Packs bits into bytes.
///
/// The final byte is padded with zero bits that are not counted in
/// [`BitWriter::len`].
pub struct BitWriter {
    inner: bitstream_io::BitWriter<Vec<u8>, BigEndian>,
    len: usize,
}

impl BitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty writer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            inner: bitstream_io::BitWriter::endian(Vec::with_capacity(bits.div_ceil(8)), BigEndian),
            len: 0,
        }
    }

    /// Append one bit (`0` or anything else for `1`).
    pub fn push_bit(&mut self, bit: u8) -> io::Result<()> {
        self.inner.write_bit(bit != 0)?;
        self.len += 1;
        Ok(())
    }

    /// Append every bit of `code`.
    pub fn push_code(&mut self, code: &Code) -> io::Result<()> {
        for &bit in code.bits() {
            self.push_bit(bit)?;
        }
        Ok(())
    }

    /// Number of meaningful bits written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no bits were written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pad the partial byte and return `(bytes, meaningful_bits)`.
    pub fn finish(mut self) -> io::Result<(Vec<u8>, usize)> {
        self.inner.byte_align()?;
        Ok((self.inner.into_writer(), self.len))
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy sequence of the first `len` bits of a byte slice.
pub struct Bits<'a> {
    reader: BitReader<Cursor<&'a [u8]>, BigEndian>,
    remaining: usize,
}

impl<'a> Bits<'a> {
    /// Iterate over at most `len` bits of `data`.
    pub fn new(data: &'a [u8], len: usize) -> Self {
        Self {
            reader: BitReader::endian(Cursor::new(data), BigEndian),
            remaining: len.min(data.len().saturating_mul(8)),
        }
    }
}

impl Iterator for Bits<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        match self.reader.read_bit() {
            Ok(bit) => {
                self.remaining -= 1;
                Some(u8::from(bit))
            }
            Err(_) => {
                self.remaining = 0;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Bits<'_> {}

impl FusedIterator for Bits<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(bits: &[u8]) -> (Vec<u8>, usize) {
        let mut writer = BitWriter::with_capacity(bits.len());
        for &bit in bits {
            writer.push_bit(bit).unwrap();
        }
        assert_eq!(writer.len(), bits.len());
        writer.finish().unwrap()
    }

    #[test]
    fn test_partial_byte_is_padded() {
        assert_eq!(pack(&[1, 0, 1]), (vec![0b1010_0000], 3));
    }

    #[test]
    fn test_full_byte_has_no_padding() {
        assert_eq!(pack(&[0, 1, 1, 0, 0, 0, 0, 1]), (vec![0x61], 8));
    }

    #[test]
    fn test_spill_into_second_byte() {
        assert_eq!(pack(&[1; 9]), (vec![0xFF, 0x80], 9));
        assert!(BitWriter::new().is_empty());
        assert_eq!(BitWriter::new().finish().unwrap(), (vec![], 0));
    }

    #[test]
    fn test_push_code() {
        let code = crate::tree::Tree::from_text("aaabbc").unwrap().codes()['c'].clone();
        let mut writer = BitWriter::default();
        writer.push_code(&code).unwrap();
        writer.push_code(&code).unwrap();
        assert_eq!(writer.finish().unwrap(), (vec![0b1010_0000], 4));
    }

    #[test]
    fn test_bits_msb_first() {
        let bits: Vec<u8> = Bits::new(&[0b1100_0101], 8).collect();
        assert_eq!(bits, vec![1, 1, 0, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_bits_stop_before_padding() {
        let mut bits = Bits::new(&[0xFF, 0xFF], 10);
        assert_eq!(bits.len(), 10);
        assert_eq!(bits.by_ref().count(), 10);
        assert_eq!(bits.next(), None);
    }

    #[test]
    fn test_bits_clamped_to_data() {
        assert_eq!(Bits::new(&[0xAA], 100).len(), 8);
        assert_eq!(Bits::new(&[], 3).count(), 0);
    }

    #[test]
    fn test_pack_then_read() {
        let pattern = [1, 0, 0, 1, 1, 1, 0, 1, 0, 1, 1];
        let (bytes, len) = pack(&pattern);
        assert_eq!(Bits::new(&bytes, len).collect::<Vec<_>>(), pattern);
    }
}
