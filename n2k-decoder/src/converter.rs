//! Conversions between CAN identifiers, RAW capture records, and frames
//!
//! The 29-bit extended identifier packs, from the LSB up: the source address
//! (8 bits), the raw PGN (18 bits), and the priority (3 bits). When the
//! PDU-format byte of the raw PGN is below 240 the message is addressed: the
//! low PGN byte is the target address and is masked out of the logical PGN.

use chrono::{DateTime, Utc};

use crate::types::{Frame, N2kError, Result, Timestamp};

/// Target address meaning "all nodes"
pub const BROADCAST_ADDRESS: u8 = 255;

/// Header fields extracted from a 29-bit CAN identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub priority: u8,
    pub pgn: u32,
    pub source: u8,
    pub target: u8,
}

/// Decode a 29-bit identifier into its header fields
pub fn decode_can_id(id: u32) -> FrameHeader {
    let source = (id & 0xFF) as u8;
    let mut pgn = (id >> 8) & 0x3FFFF;
    let priority = ((id >> 26) & 0x7) as u8;

    let pdu_format = (pgn >> 8) & 0xFF;
    let target = if pdu_format < 240 {
        // addressed message: the low PGN byte is the target address
        let target = (pgn & 0xFF) as u8;
        pgn &= 0x3FF00;
        target
    } else {
        BROADCAST_ADDRESS
    };

    FrameHeader {
        priority,
        pgn,
        source,
        target,
    }
}

/// Encode header fields into a 29-bit identifier; exact inverse of
/// [`decode_can_id`]
pub fn encode_can_id(pgn: u32, source: u8, priority: u8, target: u8) -> u32 {
    let mut id = source as u32 | (pgn << 8) | ((priority as u32 & 0x7) << 26);
    if (pgn >> 8) & 0xFF < 240 {
        id |= (target as u32) << 8;
    }
    id
}

/// One line of the RAW capture format:
/// `timestamp,priority,pgn,source,target,length,b0,..,b7`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRecord {
    pub timestamp: Timestamp,
    pub frame: Frame,
}

/// Parse a RAW capture line. Payload bytes absent at the tail read as `0xFF`.
pub fn frame_from_raw(line: &str) -> Result<RawRecord> {
    let fields: Vec<&str> = line.trim_end().split(',').collect();
    if fields.len() < 6 {
        return Err(N2kError::MalformedRawRecord(format!(
            "expected at least 6 fields, got {}",
            fields.len()
        )));
    }

    let timestamp = DateTime::parse_from_rfc3339(fields[0])
        .map_err(|e| N2kError::MalformedRawRecord(format!("bad timestamp {:?}: {e}", fields[0])))?
        .with_timezone(&Utc);
    let priority = parse_dec(fields[1], "priority")? as u8;
    let pgn = parse_dec(fields[2], "pgn")?;
    let source = parse_dec(fields[3], "source")? as u8;
    let target = parse_dec(fields[4], "target")? as u8;
    let length = parse_dec(fields[5], "length")? as usize;
    if length == 0 || length > 8 {
        return Err(N2kError::MalformedRawRecord(format!(
            "payload length {length} out of range"
        )));
    }

    let mut data = [0xFFu8; 8];
    for (i, slot) in data.iter_mut().enumerate().take(length) {
        if let Some(hex) = fields.get(6 + i) {
            *slot = u8::from_str_radix(hex.trim(), 16).map_err(|e| {
                N2kError::MalformedRawRecord(format!("bad payload byte {hex:?}: {e}"))
            })?;
        }
    }

    Ok(RawRecord {
        timestamp,
        frame: Frame {
            id: encode_can_id(pgn, source, priority, target),
            length: length as u8,
            data,
        },
    })
}

/// Format a frame as one RAW capture line, trailing newline included
pub fn raw_from_frame(timestamp: Timestamp, frame: &Frame) -> String {
    let h = decode_can_id(frame.id);
    let mut line = format!(
        "{},{},{},{},{},{}",
        timestamp.format("%Y-%m-%dT%H:%M:%SZ"),
        h.priority,
        h.pgn,
        h.source,
        h.target,
        frame.length
    );
    for byte in frame.data.iter() {
        line.push_str(&format!(",{byte:02x}"));
    }
    line.push('\n');
    line
}

fn parse_dec(field: &str, what: &str) -> Result<u32> {
    field
        .trim()
        .parse::<u32>()
        .map_err(|e| N2kError::MalformedRawRecord(format!("bad {what} {field:?}: {e}")))
}
