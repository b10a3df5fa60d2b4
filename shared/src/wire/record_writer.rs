use log::warn;
use naia_serde::BitWrite;

/// A [`BitWrite`] sink for whole scene and object records.
///
/// Records are not bounded by one packet (a synchronize payload for hundreds
/// of objects spans many), so the buffer grows as needed. When the record's
/// size is known up front the buffer is allocated zeroed at that size and
/// [`RecordWriter::finish`] checks the writer filled it exactly.
///
/// Bit `n` of the record lands in bit `n % 8` of byte `n / 8`, the order a
/// plain `BitReader` expects.
pub struct RecordWriter {
    buffer: Vec<u8>,
    bits_written: u32,
    expected_bits: Option<u32>,
}

impl RecordWriter {
    /// A writer for a record of unknown size
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            bits_written: 0,
            expected_bits: None,
        }
    }

    /// A writer for a record whose `bit_length` is `bits`
    pub fn sized(bits: u32) -> Self {
        Self {
            buffer: vec![0; byte_length(bits)],
            bits_written: 0,
            expected_bits: Some(bits),
        }
    }

    pub fn bits_written(&self) -> u32 {
        self.bits_written
    }

    /// Returns the record, trimmed to the bits actually written
    pub fn finish(mut self) -> Box<[u8]> {
        if let Some(expected) = self.expected_bits {
            if expected != self.bits_written {
                warn!(
                    "Record size mismatch: expected {} bits, wrote {}",
                    expected, self.bits_written
                );
            }
        }
        self.buffer.truncate(byte_length(self.bits_written));
        self.buffer.into_boxed_slice()
    }

    /// The byte holding the next bit, allocated if the buffer ends before it
    fn cursor(&mut self) -> (usize, u32) {
        let index = (self.bits_written / 8) as usize;
        if index >= self.buffer.len() {
            self.buffer.push(0);
        }
        (index, self.bits_written % 8)
    }
}

impl Default for RecordWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn byte_length(bits: u32) -> usize {
    (bits as usize + 7) / 8
}

impl BitWrite for RecordWriter {
    fn write_bit(&mut self, bit: bool) {
        let (index, offset) = self.cursor();
        if bit {
            self.buffer[index] |= 1 << offset;
        }
        self.bits_written += 1;
    }

    fn write_byte(&mut self, byte: u8) {
        let (index, offset) = self.cursor();
        // low bits fill the current byte, the rest spill into the next
        self.buffer[index] |= byte << offset;
        if offset > 0 {
            let spill = byte >> (8 - offset);
            match self.buffer.get_mut(index + 1) {
                Some(next) => *next |= spill,
                None => self.buffer.push(spill),
            }
        }
        self.bits_written += 8;
    }

    fn is_counter(&self) -> bool {
        false
    }

    fn count_bits(&mut self, _bits: u32) {}
}
