//! Write primitives for [`DataStream`]
//!
//! Symmetric with the read side: absent values emit the missing sentinel,
//! out-of-range integers are refused, scaled floats are quantized by their
//! resolution and clamped into the valid range. Every generated encoder
//! passes the field's declared bit offset so a drifting cursor is caught at
//! the first misplaced field rather than at the end of the payload.

use super::{max_valid_value, missing_value, DataStream};
use crate::types::{N2kError, Result};

impl DataStream {
    /// Write up to 64 bits LSB-first starting at the cursor
    ///
    /// A non-zero `expected_bit_offset` asserts the cursor position;
    /// zero means "trust the cursor" (the offset of the first field).
    pub fn put_raw(&mut self, mut value: u64, bits: u16, expected_bit_offset: u32) -> Result<()> {
        debug_assert!(bits >= 1 && bits <= 64);
        if expected_bit_offset != 0 && self.bit_cursor() != expected_bit_offset {
            return Err(N2kError::WrongFieldOffset {
                expected: expected_bit_offset,
                found: self.bit_cursor(),
            });
        }
        let mut remaining = bits;
        while remaining > 0 {
            if self.byte_offset >= self.data.len() {
                return Err(N2kError::TruncatedPayload {
                    at: self.bit_cursor(),
                    wanted: bits,
                });
            }
            let available = 8 - self.bit_offset;
            let to_write = remaining.min(available as u16) as u8;
            let mask = 0xFFu8 >> (8 - to_write);
            self.data[self.byte_offset] |= ((value as u8) & mask) << self.bit_offset;
            value >>= to_write;
            remaining -= to_write as u16;
            self.advance(to_write);
        }
        Ok(())
    }

    /// Unsigned write: `None` emits the missing sentinel
    pub fn write_unsigned(
        &mut self,
        value: Option<u64>,
        bits: u16,
        expected_bit_offset: u32,
    ) -> Result<()> {
        let out = match value {
            None => missing_value(bits, false),
            Some(v) => {
                if v > max_valid_value(bits, false) {
                    return Err(N2kError::FieldOutOfRange {
                        value: v as i64,
                        bits,
                        max: max_valid_value(bits, false),
                    });
                }
                v
            }
        };
        self.put_raw(out, bits, expected_bit_offset)
    }

    /// Signed write: `None` emits the missing sentinel
    pub fn write_signed(
        &mut self,
        value: Option<i64>,
        bits: u16,
        expected_bit_offset: u32,
    ) -> Result<()> {
        let out = match value {
            None => missing_value(bits, true),
            Some(v) => {
                let max = max_valid_value(bits, true) as i64;
                let min = if bits >= 64 { i64::MIN } else { -(1i64 << (bits - 1)) };
                if v > max || v < min {
                    return Err(N2kError::FieldOutOfRange {
                        value: v,
                        bits,
                        max: max as u64,
                    });
                }
                // mask to the field width; put_raw only consumes the low bits
                (v as u64) & (u64::MAX >> (64 - bits))
            }
        };
        self.put_raw(out, bits, expected_bit_offset)
    }

    pub fn write_u8(&mut self, value: Option<u8>, bits: u16, offset: u32) -> Result<()> {
        self.write_unsigned(value.map(u64::from), bits, offset)
    }

    pub fn write_u16(&mut self, value: Option<u16>, bits: u16, offset: u32) -> Result<()> {
        self.write_unsigned(value.map(u64::from), bits, offset)
    }

    pub fn write_u32(&mut self, value: Option<u32>, bits: u16, offset: u32) -> Result<()> {
        self.write_unsigned(value.map(u64::from), bits, offset)
    }

    pub fn write_u64(&mut self, value: Option<u64>, bits: u16, offset: u32) -> Result<()> {
        self.write_unsigned(value, bits, offset)
    }

    pub fn write_i16(&mut self, value: Option<i16>, bits: u16, offset: u32) -> Result<()> {
        self.write_signed(value.map(i64::from), bits, offset)
    }

    pub fn write_i32(&mut self, value: Option<i32>, bits: u16, offset: u32) -> Result<()> {
        self.write_signed(value.map(i64::from), bits, offset)
    }

    /// Lookup write: the raw enumeration value, no sentinel handling
    pub fn write_lookup(&mut self, value: u64, bits: u16, offset: u32) -> Result<()> {
        self.put_raw(value & (u64::MAX >> (64 - bits)), bits, offset)
    }

    /// Scaled unsigned write: quantize by resolution and clamp to the
    /// representable valid range
    pub fn write_unsigned_resolution(
        &mut self,
        value: Option<f64>,
        bits: u16,
        resolution: f64,
        numeric_offset: i64,
        expected_bit_offset: u32,
    ) -> Result<()> {
        let out = match value {
            None => missing_value(bits, false),
            Some(v) => {
                let scaled = ((v - numeric_offset as f64) / resolution).round();
                let max = max_valid_value(bits, false);
                if scaled < 0.0 {
                    0
                } else if scaled > max as f64 {
                    max
                } else {
                    scaled as u64
                }
            }
        };
        self.put_raw(out, bits, expected_bit_offset)
    }

    /// Scaled signed write, see [`Self::write_unsigned_resolution`]
    pub fn write_signed_resolution(
        &mut self,
        value: Option<f64>,
        bits: u16,
        resolution: f64,
        numeric_offset: i64,
        expected_bit_offset: u32,
    ) -> Result<()> {
        let out = match value {
            None => missing_value(bits, true),
            Some(v) => {
                let scaled = ((v - numeric_offset as f64) / resolution).round();
                let max = max_valid_value(bits, true) as i64;
                let min = if bits >= 64 { i64::MIN } else { -(1i64 << (bits - 1)) };
                let clamped = if scaled > max as f64 {
                    max
                } else if scaled < min as f64 {
                    min
                } else {
                    scaled as i64
                };
                (clamped as u64) & (u64::MAX >> (64 - bits))
            }
        };
        self.put_raw(out, bits, expected_bit_offset)
    }

    /// Fixed-width string: truncated to the field, right-padded with `0xFF`
    pub fn write_fixed_string(&mut self, value: &str, bits: u16, offset: u32) -> Result<()> {
        let byte_count = bits as usize / 8;
        let mut out = value.as_bytes().to_vec();
        out.truncate(byte_count);
        out.resize(byte_count, 0xFF);
        self.write_binary(&out, bits as u32, offset)
    }

    /// Length-annotated string: `[len][encoding]` header then UTF-8 body;
    /// the empty string is the canonical `[0x02, 0x01]`
    pub fn write_string_lau(&mut self, value: &str, offset: u32) -> Result<()> {
        let out: Vec<u8> = if value.is_empty() {
            vec![0x02, 0x01]
        } else {
            let mut buf = Vec::with_capacity(value.len() + 3);
            buf.push((value.len() + 3) as u8);
            buf.push(0x01);
            buf.extend_from_slice(value.as_bytes());
            buf.push(0x00);
            buf
        };
        let bits = out.len() as u32 * 8;
        self.write_binary(&out, bits, offset)
    }

    /// Binary field: byte-aligned, `value` zero-padded to the field width,
    /// trailing bits of an odd-width field masked off.
    /// `bits == 0` writes the whole of `value` (variable-length fields).
    pub fn write_binary(&mut self, value: &[u8], bits: u32, expected_bit_offset: u32) -> Result<()> {
        if expected_bit_offset != 0 && self.bit_cursor() != expected_bit_offset {
            return Err(N2kError::WrongFieldOffset {
                expected: expected_bit_offset,
                found: self.bit_cursor(),
            });
        }
        if self.bit_offset != 0 {
            return Err(N2kError::MisalignedField {
                at: self.bit_cursor(),
            });
        }
        let num_bytes = if bits == 0 {
            value.len()
        } else {
            (bits as usize + 7) / 8
        };
        if self.byte_offset + num_bytes > self.data.len() {
            return Err(N2kError::TruncatedPayload {
                at: self.bit_cursor(),
                wanted: bits.min(u16::MAX as u32) as u16,
            });
        }
        for index in 0..num_bytes {
            self.data[self.byte_offset] = value.get(index).copied().unwrap_or(0);
            self.byte_offset += 1;
        }
        let odd_bits = (bits % 8) as u8;
        if odd_bits != 0 {
            self.byte_offset -= 1;
            self.bit_offset = odd_bits;
            self.data[self.byte_offset] &= 0xFF >> (8 - odd_bits);
        }
        Ok(())
    }

    /// Reserved slots are all 1s on the wire
    pub fn write_reserved(&mut self, bits: u32, expected_bit_offset: u32) -> Result<()> {
        self.fill(u64::MAX, bits, expected_bit_offset)
    }

    /// Spare slots are all 0s on the wire
    pub fn write_spare(&mut self, bits: u32, expected_bit_offset: u32) -> Result<()> {
        self.fill(0, bits, expected_bit_offset)
    }

    fn fill(&mut self, pattern: u64, bits: u32, expected_bit_offset: u32) -> Result<()> {
        let mut remaining = bits;
        let mut offset = expected_bit_offset;
        while remaining > 0 {
            let chunk = remaining.min(64) as u16;
            self.put_raw(pattern, chunk, offset)?;
            remaining -= chunk as u32;
            offset = 0;
        }
        Ok(())
    }
}
