//! Sequential bit-level cursors over byte buffers.
//!
//! The TLK data section is addressed in bits, least significant bit first within each
//! byte. These cursors are pure views: they know nothing about the Huffman coding that
//! happens on top of them.

use bitvec::{order::Lsb0, slice::BitSlice, vec::BitVec};

/// Read cursor over a byte buffer, starting at an arbitrary bit offset
pub struct BitReader<'a> {
    /// Bit view of the underlying buffer
    bits: &'a BitSlice<u8, Lsb0>,
    /// Position of the next bit to read
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new [`BitReader`] over `buffer` with the cursor placed at `bit_offset`
    pub fn new(buffer: &'a [u8], bit_offset: usize) -> Self {
        Self {
            bits: BitSlice::from_slice(buffer),
            position: bit_offset,
        }
    }

    /// Reads the next bit, advancing the cursor. Returns [`None`] once the
    /// cursor has passed the end of the buffer
    #[inline]
    pub fn next_bit(&mut self) -> Option<bool> {
        let bit = self.bits.get(self.position)?;
        self.position += 1;
        Some(*bit)
    }

    /// The current cursor position in bits from the start of the buffer
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Write cursor producing a byte buffer from individual bits
#[derive(Default)]
pub struct BitWriter {
    bits: BitVec<u8, Lsb0>,
}

impl BitWriter {
    /// Creates a new empty [`BitWriter`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Number of bits written so far. Recorded by the encoder as an entry's
    /// bit offset before the entry's first bit is written
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Consumes the writer, returning the accumulated bytes padded with zero
    /// bits up to the next byte boundary
    pub fn finish(mut self) -> Vec<u8> {
        self.bits.set_uninitialized(false);
        self.bits.into_vec()
    }
}

#[cfg(test)]
mod test {
    use super::{BitReader, BitWriter};

    #[test]
    fn read_lsb_first() {
        // 0b0000_0110: bit 0 clear, bits 1 and 2 set
        let buffer = [0x06u8];
        let mut reader = BitReader::new(&buffer, 0);

        assert_eq!(reader.next_bit(), Some(false));
        assert_eq!(reader.next_bit(), Some(true));
        assert_eq!(reader.next_bit(), Some(true));
        assert_eq!(reader.next_bit(), Some(false));
    }

    #[test]
    fn read_from_offset() {
        let buffer = [0x06u8];
        let mut reader = BitReader::new(&buffer, 2);

        assert_eq!(reader.next_bit(), Some(true));
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn read_past_end() {
        let buffer = [0xFFu8];
        let mut reader = BitReader::new(&buffer, 7);

        assert_eq!(reader.next_bit(), Some(true));
        assert_eq!(reader.next_bit(), None);
        assert_eq!(reader.next_bit(), None);
    }

    #[test]
    fn write_pads_to_byte_boundary() {
        let mut writer = BitWriter::new();
        writer.write_bit(false);
        writer.write_bit(true);
        writer.write_bit(true);

        assert_eq!(writer.bit_len(), 3);
        assert_eq!(writer.finish(), vec![0x06]);
    }

    #[test]
    fn writer_reader_round_trip() {
        let pattern = [true, false, true, true, false, false, true, false, true];

        let mut writer = BitWriter::new();
        for bit in pattern {
            writer.write_bit(bit);
        }
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 2);

        let mut reader = BitReader::new(&bytes, 0);
        for bit in pattern {
            assert_eq!(reader.next_bit(), Some(bit));
        }
    }
}
