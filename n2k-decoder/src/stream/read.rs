//! Read primitives for [`DataStream`]
//!
//! Numeric reads map the missing sentinel to `None`; every other wire value
//! (including the "invalid" sentinel) is reported as-is. Lookup fields skip
//! the sentinel mapping entirely so enum types can carry the raw value.

use super::{calc_precision, missing_value, round_to, sign_extend, DataStream};
use crate::types::{N2kError, Result};

impl DataStream {
    /// Read up to 64 bits LSB-first across byte boundaries
    pub fn get_raw(&mut self, bits: u16) -> Result<u64> {
        debug_assert!(bits >= 1 && bits <= 64);
        let mut remaining = bits;
        let mut value = 0u64;
        let mut shift = 0u32;
        while remaining > 0 {
            if self.byte_offset >= self.data.len() {
                return Err(N2kError::TruncatedPayload {
                    at: self.bit_cursor(),
                    wanted: bits,
                });
            }
            let available = 8 - self.bit_offset;
            let take = remaining.min(available as u16) as u8;
            let mask = 0xFFu8 >> (8 - take);
            let chunk = (self.data[self.byte_offset] >> self.bit_offset) & mask;
            value |= (chunk as u64) << shift;
            shift += take as u32;
            remaining -= take as u16;
            self.advance(take);
        }
        Ok(value)
    }

    /// Unsigned read with missing-sentinel mapping
    pub fn read_unsigned(&mut self, bits: u16) -> Result<Option<u64>> {
        let raw = self.get_raw(bits)?;
        if bits >= 2 && raw == missing_value(bits, false) {
            Ok(None)
        } else {
            Ok(Some(raw))
        }
    }

    /// Signed read: sign-extends and maps the missing sentinel
    pub fn read_signed(&mut self, bits: u16) -> Result<Option<i64>> {
        let raw = self.get_raw(bits)?;
        if bits >= 2 && raw == missing_value(bits, true) {
            Ok(None)
        } else {
            Ok(Some(sign_extend(raw, bits)))
        }
    }

    pub fn read_u8(&mut self, bits: u16) -> Result<Option<u8>> {
        Ok(self.read_unsigned(bits)?.map(|v| v as u8))
    }

    pub fn read_u16(&mut self, bits: u16) -> Result<Option<u16>> {
        Ok(self.read_unsigned(bits)?.map(|v| v as u16))
    }

    pub fn read_u32(&mut self, bits: u16) -> Result<Option<u32>> {
        Ok(self.read_unsigned(bits)?.map(|v| v as u32))
    }

    pub fn read_u64(&mut self, bits: u16) -> Result<Option<u64>> {
        self.read_unsigned(bits)
    }

    pub fn read_i8(&mut self, bits: u16) -> Result<Option<i8>> {
        Ok(self.read_signed(bits)?.map(|v| v as i8))
    }

    pub fn read_i16(&mut self, bits: u16) -> Result<Option<i16>> {
        Ok(self.read_signed(bits)?.map(|v| v as i16))
    }

    pub fn read_i32(&mut self, bits: u16) -> Result<Option<i32>> {
        Ok(self.read_signed(bits)?.map(|v| v as i32))
    }

    pub fn read_i64(&mut self, bits: u16) -> Result<Option<i64>> {
        self.read_signed(bits)
    }

    /// Lookup read: raw value, no sentinel mapping
    pub fn read_lookup(&mut self, bits: u16) -> Result<u64> {
        self.get_raw(bits)
    }

    /// Scaled unsigned read: `raw * resolution + offset`, rounded to the
    /// precision the resolution can resolve
    pub fn read_unsigned_resolution(
        &mut self,
        bits: u16,
        resolution: f64,
        offset: i64,
    ) -> Result<Option<f64>> {
        match self.read_unsigned(bits)? {
            None => Ok(None),
            Some(raw) => {
                let val = raw as f64 * resolution + offset as f64;
                Ok(Some(round_to(val, calc_precision(resolution))))
            }
        }
    }

    /// Scaled signed read, see [`Self::read_unsigned_resolution`]
    pub fn read_signed_resolution(
        &mut self,
        bits: u16,
        resolution: f64,
        offset: i64,
    ) -> Result<Option<f64>> {
        match self.read_signed(bits)? {
            None => Ok(None),
            Some(raw) => {
                let val = raw as f64 * resolution + offset as f64;
                Ok(Some(round_to(val, calc_precision(resolution))))
            }
        }
    }

    /// Fixed-width string: `bits / 8` bytes, terminated at the first
    /// `0x00`, `0xFF`, or `'@'` padding byte
    pub fn read_fixed_string(&mut self, bits: u16) -> Result<String> {
        let bytes = self.read_bytes(bits as usize / 8)?;
        let end = bytes
            .iter()
            .position(|&b| b == 0x00 || b == 0xFF || b == b'@')
            .unwrap_or(bytes.len());
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    /// Length-annotated string: one length byte (total, header included),
    /// one encoding byte (0x00 unicode, 0x01 ascii/utf8), then the body
    pub fn read_string_lau(&mut self) -> Result<String> {
        let total = self.get_raw(8)? as usize;
        let encoding = self.get_raw(8)?;
        let body = self.read_bytes(total.saturating_sub(2))?;
        let s = match encoding {
            0x00 => {
                let units: Vec<u16> = body
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
            _ => String::from_utf8_lossy(&body).into_owned(),
        };
        Ok(s.trim_end_matches('\0').to_string())
    }

    /// Binary field: `ceil(bits / 8)` bytes, trailing bits of the final
    /// byte masked off. `bits == 0` reads the rest of the payload
    /// (variable-length fields). Must start on a byte boundary.
    pub fn read_binary(&mut self, bits: u32) -> Result<Vec<u8>> {
        if self.bit_offset != 0 {
            return Err(N2kError::MisalignedField {
                at: self.bit_cursor(),
            });
        }
        if bits == 0 {
            let rest = self.data.len() - self.byte_offset;
            return self.read_bytes(rest);
        }
        let num_bytes = (bits as usize + 7) / 8;
        if self.byte_offset + num_bytes > self.data.len() {
            return Err(N2kError::TruncatedPayload {
                at: self.bit_cursor(),
                wanted: bits.min(u16::MAX as u32) as u16,
            });
        }
        let mut out = self.data[self.byte_offset..self.byte_offset + num_bytes].to_vec();
        self.byte_offset += num_bytes;
        let odd_bits = (bits % 8) as u8;
        if odd_bits != 0 {
            self.byte_offset -= 1;
            self.bit_offset = odd_bits;
            if let Some(last) = out.last_mut() {
                *last &= 0xFF >> (8 - odd_bits);
            }
        }
        Ok(out)
    }

    /// Byte-aligned raw byte read used by the string and binary decoders
    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        if self.bit_offset != 0 {
            return Err(N2kError::MisalignedField {
                at: self.bit_cursor(),
            });
        }
        if self.byte_offset + count > self.data.len() {
            return Err(N2kError::TruncatedPayload {
                at: self.bit_cursor(),
                wanted: (count * 8).min(u16::MAX as usize) as u16,
            });
        }
        let out = self.data[self.byte_offset..self.byte_offset + count].to_vec();
        self.byte_offset += count;
        Ok(out)
    }
}
