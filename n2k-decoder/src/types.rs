//! Core types for the NMEA 2000 decoder library
//!
//! This module defines the fundamental types that flow through the pipeline:
//! raw CAN frames, the header-derived message context, and the library-wide
//! error enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp type used throughout the decoder
pub type Timestamp = DateTime<Utc>;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, N2kError>;

/// Maximum payload length of a fast-packet PGN in bytes (31 frames * 7 + 6)
pub const MAX_PGN_LENGTH: usize = 223;

/// A single CAN frame as read from the bus or a capture file
///
/// NMEA 2000 frames always carry a 29-bit extended identifier and up to
/// 8 data bytes. Unused tail bytes are padded with `0xFF` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// 29-bit extended CAN identifier
    pub id: u32,
    /// Number of meaningful payload bytes (1-8)
    pub length: u8,
    /// Frame payload
    pub data: [u8; 8],
}

/// Context needed to process an NMEA 2000 message
///
/// Derived from a frame header at reception time; immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MessageInfo {
    /// When the frame was received (or recorded, for capture replay)
    pub timestamp: Timestamp,
    /// 3-bit priority, 0 is highest
    pub priority: u8,
    /// 18-bit Parameter Group Number, target byte masked off for PDU1
    pub pgn: u32,
    /// Sender bus address
    pub source: u8,
    /// Target bus address; 255 (broadcast) unless the PGN is addressed
    pub target: u8,
}

impl Default for MessageInfo {
    fn default() -> Self {
        Self {
            timestamp: DateTime::<Utc>::MIN_UTC,
            priority: 0,
            pgn: 0,
            source: 0,
            target: crate::converter::BROADCAST_ADDRESS,
        }
    }
}

/// Errors produced by the codec core
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum N2kError {
    #[error("bit stream exhausted reading {wanted} bits at bit offset {at}")]
    TruncatedPayload { at: u32, wanted: u16 },

    #[error("value {value} does not fit in a {bits}-bit field (max valid {max})")]
    FieldOutOfRange { value: i64, bits: u16, max: u64 },

    #[error("byte-aligned field started at bit offset {at}")]
    MisalignedField { at: u32 },

    #[error("field write expected bit offset {expected}, cursor is at {found}")]
    WrongFieldOffset { expected: u32, found: u32 },

    #[error("match field at bit {at} read {found}, schema requires {expected}")]
    MatchFailed { at: u32, expected: i64, found: u64 },

    #[error("cannot distinguish between variants for proprietary PGN {pgn}")]
    VariantAmbiguous { pgn: u32 },

    #[error("no catalog entry covers PGN {pgn}")]
    UnknownPgn { pgn: u32 },

    #[error("frame {frame_num} (seq {seq_id}) arrived out of order for PGN {pgn} from {source_addr}")]
    ReassemblyOutOfOrder {
        pgn: u32,
        source_addr: u8,
        seq_id: u8,
        frame_num: u8,
    },

    #[error("declared fast-packet length {declared} exceeds the {max}-byte maximum")]
    ReassemblyOverflow { declared: usize, max: usize },

    #[error("payload of {length} bytes exceeds the fast-packet maximum of {max}")]
    EncodeOverflow { length: usize, max: usize },

    #[error("malformed raw capture record: {0}")]
    MalformedRawRecord(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for N2kError {
    fn from(err: std::io::Error) -> Self {
        N2kError::Io(err.to_string())
    }
}
