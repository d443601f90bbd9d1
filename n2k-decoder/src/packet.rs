//! Packet assembly buffer and decoder resolution
//!
//! A [`Packet`] starts life holding a single raw frame payload. Single-frame
//! PGNs complete immediately; fast-packet PGNs pass through the reassembler
//! until the declared length has accumulated. Once complete, the candidate
//! schema variants are filtered down to decoders by their match fields, and
//! [`Packet::into_message`] produces the typed value (or the [`UnknownPgn`]
//! fallback) for the subscriber fan-out.

use crate::catalog::{self, PgnInfo};
use crate::pgns::{PgnMessage, UnknownPgn};
use crate::stream::DataStream;
use crate::types::{Frame, MessageInfo, N2kError};

/// Mutable assembly state for one message from a (source, PGN) pair
#[derive(Debug, Clone)]
pub struct Packet {
    pub info: MessageInfo,
    /// Raw frame payload until reassembly completes, then the full message
    pub data: Vec<u8>,
    /// The PGN uses fast-packet transmission
    pub fast: bool,
    /// Sequence identity from the first payload byte (fast PGNs only)
    pub seq_id: u8,
    /// Frame number from the first payload byte (fast PGNs only)
    pub frame_num: u8,
    /// Declared total length from frame 0 of a fast sequence
    pub expected_length: usize,
    pub complete: bool,
    pub parse_errors: Vec<N2kError>,
    /// Catalog variants registered for this PGN
    pub candidates: Vec<&'static PgnInfo>,
    /// Candidates whose match fields agree with the payload
    pub decoders: Vec<&'static PgnInfo>,
}

impl Packet {
    /// Build a packet from one received frame
    pub fn new(info: MessageInfo, frame: &Frame) -> Self {
        let fast = catalog::is_fast(info.pgn);
        let (seq_id, frame_num) = if fast {
            (frame.data[0] >> 5, frame.data[0] & 0x1F)
        } else {
            (0, 0)
        };
        // fast frames always carry all 8 bytes; single frames only the
        // meaningful prefix
        let data = if fast {
            frame.data.to_vec()
        } else {
            frame.data[..frame.length.min(8) as usize].to_vec()
        };

        let mut parse_errors = Vec::new();
        let candidates = match catalog::variants(info.pgn) {
            Some(variants) => variants.to_vec(),
            None => {
                parse_errors.push(N2kError::UnknownPgn { pgn: info.pgn });
                Vec::new()
            }
        };

        Self {
            info,
            data,
            fast,
            seq_id,
            frame_num,
            expected_length: 0,
            complete: false,
            parse_errors,
            candidates,
            decoders: Vec::new(),
        }
    }

    /// Build a packet around an already-complete payload (capture tooling)
    pub fn from_data(info: MessageInfo, data: Vec<u8>) -> Self {
        let mut packet = Self::new(
            info,
            &Frame {
                id: 0,
                length: data.len().min(8) as u8,
                data: [0xFF; 8],
            },
        );
        packet.data = data;
        packet.complete = true;
        packet
    }

    /// Filter candidates down to the decoder set by their match fields
    ///
    /// Call once the payload is complete. Retains every agreeing variant;
    /// the first is used for the typed decode, the rest are alternatives
    /// kept for diagnostics.
    pub fn add_decoders(&mut self) {
        self.decoders = self
            .candidates
            .iter()
            .filter(|candidate| self.matches(candidate))
            .copied()
            .collect();
        if self.decoders.is_empty() && !self.candidates.is_empty() {
            log::debug!(
                "no variant of PGN {} matches the payload ({} candidates)",
                self.info.pgn,
                self.candidates.len()
            );
        }
    }

    fn matches(&self, candidate: &PgnInfo) -> bool {
        for field in candidate.fields {
            if field.match_value < 0 {
                continue;
            }
            let mut stream = DataStream::new(self.data.clone());
            let observed = match stream
                .skip(field.bit_offset)
                .and_then(|()| stream.get_raw(field.bit_length))
            {
                Ok(value) => value,
                Err(_) => return false,
            };
            if observed != field.match_value as u64 {
                return false;
            }
        }
        true
    }

    /// Produce the typed value for this packet
    ///
    /// Runs the first decoder; anything that prevents a typed decode yields
    /// an [`UnknownPgn`] carrying the reason, so the value still reaches
    /// subscribers.
    pub fn into_message(self) -> PgnMessage {
        if let Some(reason) = self.parse_errors.first().cloned() {
            return self.unknown_pgn(Some(reason));
        }
        if !self.complete {
            let reason = N2kError::ReassemblyOutOfOrder {
                pgn: self.info.pgn,
                source_addr: self.info.source,
                seq_id: self.seq_id,
                frame_num: self.frame_num,
            };
            return self.unknown_pgn(Some(reason));
        }
        let Some(first) = self.decoders.first().copied() else {
            let reason = if self.candidates.len() > 1
                && catalog::is_proprietary_pgn(self.info.pgn)
            {
                N2kError::VariantAmbiguous { pgn: self.info.pgn }
            } else {
                N2kError::UnknownPgn { pgn: self.info.pgn }
            };
            return self.unknown_pgn(Some(reason));
        };
        let mut stream = DataStream::new(self.data.clone());
        match (first.decoder)(self.info, &mut stream) {
            Ok(message) => message,
            Err(err) => {
                log::warn!(
                    "decoding PGN {} as {} failed: {err}",
                    self.info.pgn,
                    first.id
                );
                self.unknown_pgn(Some(err))
            }
        }
    }

    /// The fallback value for a packet no variant covers
    pub fn unknown_pgn(self, reason: Option<N2kError>) -> PgnMessage {
        let (manufacturer_code, industry_code) =
            if catalog::is_proprietary_pgn(self.info.pgn) && self.data.len() >= 2 {
                match catalog::proprietary_info(&self.data) {
                    Ok((man, ind)) => (Some(man), Some(ind)),
                    Err(_) => (None, None),
                }
            } else {
                (None, None)
            };
        PgnMessage::Unknown(UnknownPgn {
            info: self.info,
            manufacturer_code,
            industry_code,
            reason,
            was_unseen: catalog::in_unseen_list(self.info.pgn),
            data: self.data,
        })
    }
}
