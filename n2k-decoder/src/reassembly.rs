//! Fast-packet reassembly
//!
//! Fast-packet PGNs spread 9-223 byte payloads over up to 32 frames. The
//! first payload byte of every frame carries a 3-bit sequence id and a
//! 5-bit frame number; frame 0 additionally declares the total length and
//! carries 6 data bytes, every later frame carries 7.
//!
//! State is keyed by (source, PGN): sequences from different senders or for
//! different PGNs reassemble independently. A frame 0 observed while a
//! sequence is in flight discards the old state and starts over; any other
//! unexpected frame is dropped and the state kept, so a resumed in-order
//! tail can still complete.

use std::collections::HashMap;

use crate::packet::Packet;
use crate::types::{N2kError, MAX_PGN_LENGTH};

/// Bytes of payload carried by frame 0
const FIRST_FRAME_DATA: usize = 6;
/// Bytes of payload carried by every later frame
const NEXT_FRAME_DATA: usize = 7;

#[derive(Debug)]
struct Sequence {
    seq_id: u8,
    next_frame: u8,
    expected_length: usize,
    data: Vec<u8>,
}

/// Combines fast-packet frames into complete payloads
#[derive(Debug, Default)]
pub struct MultiBuilder {
    sequences: HashMap<(u8, u32), Sequence>,
}

impl MultiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequences currently in flight
    pub fn in_flight(&self) -> usize {
        self.sequences.len()
    }

    /// Drop all partial state (endpoint cancellation)
    pub fn clear(&mut self) {
        self.sequences.clear();
    }

    /// Feed one fast-packet frame
    ///
    /// `packet.data` holds the raw 8-byte frame payload. On completion the
    /// packet is mutated in place: `data` becomes the assembled payload
    /// truncated to the declared length and `complete` is set. A declared
    /// length beyond 223 flags a parse error instead so the packet can
    /// still be emitted and classified.
    pub fn add(&mut self, packet: &mut Packet) {
        let key = (packet.info.source, packet.info.pgn);

        if packet.frame_num == 0 {
            if let Some(old) = self.sequences.remove(&key) {
                log::warn!(
                    "restarting fast-packet sequence for PGN {} from {} (had {} of {} bytes)",
                    packet.info.pgn,
                    packet.info.source,
                    old.data.len(),
                    old.expected_length
                );
            }
            let expected_length = packet.data[1] as usize;
            packet.expected_length = expected_length;
            if expected_length > MAX_PGN_LENGTH {
                packet.parse_errors.push(N2kError::ReassemblyOverflow {
                    declared: expected_length,
                    max: MAX_PGN_LENGTH,
                });
                return;
            }
            let mut sequence = Sequence {
                seq_id: packet.seq_id,
                next_frame: 1,
                expected_length,
                data: packet.data[2..2 + FIRST_FRAME_DATA].to_vec(),
            };
            if sequence.data.len() >= expected_length {
                sequence.data.truncate(expected_length);
                packet.data = sequence.data;
                packet.complete = true;
                return;
            }
            self.sequences.insert(key, sequence);
            return;
        }

        match self.sequences.get_mut(&key) {
            Some(sequence)
                if sequence.seq_id == packet.seq_id
                    && sequence.next_frame == packet.frame_num =>
            {
                sequence
                    .data
                    .extend_from_slice(&packet.data[1..1 + NEXT_FRAME_DATA]);
                sequence.next_frame += 1;
                if sequence.data.len() >= sequence.expected_length {
                    if let Some(mut finished) = self.sequences.remove(&key) {
                        finished.data.truncate(finished.expected_length);
                        packet.expected_length = finished.expected_length;
                        packet.data = finished.data;
                        packet.complete = true;
                    }
                }
            }
            _ => {
                // out of order or stale sequence id: drop the frame, keep state
                log::warn!(
                    "{}",
                    N2kError::ReassemblyOutOfOrder {
                        pgn: packet.info.pgn,
                        source_addr: packet.info.source,
                        seq_id: packet.seq_id,
                        frame_num: packet.frame_num,
                    }
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Frame, MessageInfo};

    fn fast_packet(source: u8, pgn: u32, payload: [u8; 8]) -> Packet {
        let info = MessageInfo {
            pgn,
            source,
            ..MessageInfo::default()
        };
        Packet::new(
            info,
            &Frame {
                id: 0,
                length: 8,
                data: payload,
            },
        )
    }

    // 129702 is a fast PGN in the catalog; 20-byte payloads need 3 frames
    const PGN: u32 = 129702;

    fn frames_for(seq: u8, total: u8) -> Vec<[u8; 8]> {
        vec![
            [seq << 5, total, 1, 2, 3, 4, 5, 6],
            [(seq << 5) | 1, 7, 8, 9, 10, 11, 12, 13],
            [(seq << 5) | 2, 14, 15, 16, 17, 18, 19, 20],
        ]
    }

    #[test]
    fn test_in_order_sequence_completes() {
        let mut builder = MultiBuilder::new();
        let mut completed = None;
        for payload in frames_for(2, 20) {
            let mut packet = fast_packet(42, PGN, payload);
            builder.add(&mut packet);
            if packet.complete {
                completed = Some(packet);
            }
        }
        let packet = completed.expect("sequence should complete on frame 2");
        assert_eq!(packet.data, (1..=20).collect::<Vec<u8>>());
        assert_eq!(builder.in_flight(), 0);
    }

    #[test]
    fn test_out_of_order_frame_is_dropped() {
        let mut builder = MultiBuilder::new();
        let frames = frames_for(3, 20);

        let mut first = fast_packet(42, PGN, frames[0]);
        builder.add(&mut first);
        assert!(!first.complete);

        // frame 2 before frame 1: dropped, no completion
        let mut skipped = fast_packet(42, PGN, frames[2]);
        builder.add(&mut skipped);
        assert!(!skipped.complete);
        assert_eq!(builder.in_flight(), 1);

        // the in-order remainder still cannot complete (frame 1 is gone)
        let mut late = fast_packet(42, PGN, frames[1]);
        builder.add(&mut late);
        assert!(!late.complete);
        let mut tail = fast_packet(42, PGN, frames[2]);
        builder.add(&mut tail);
        assert!(tail.complete);
    }

    #[test]
    fn test_seq_id_mismatch_drops_frame() {
        let mut builder = MultiBuilder::new();
        let mut first = fast_packet(42, PGN, frames_for(1, 20)[0]);
        builder.add(&mut first);

        let mut wrong_seq = fast_packet(42, PGN, frames_for(4, 20)[1]);
        builder.add(&mut wrong_seq);
        assert!(!wrong_seq.complete);

        let mut right_seq = fast_packet(42, PGN, frames_for(1, 20)[1]);
        builder.add(&mut right_seq);
        let mut tail = fast_packet(42, PGN, frames_for(1, 20)[2]);
        builder.add(&mut tail);
        assert!(tail.complete);
    }

    #[test]
    fn test_frame_zero_restarts_sequence() {
        let mut builder = MultiBuilder::new();
        let mut first = fast_packet(42, PGN, frames_for(5, 20)[0]);
        builder.add(&mut first);
        assert_eq!(builder.in_flight(), 1);

        // a fresh frame 0 discards the old state
        for payload in frames_for(6, 20) {
            let mut packet = fast_packet(42, PGN, payload);
            builder.add(&mut packet);
            if packet.complete {
                assert_eq!(packet.data.len(), 20);
                return;
            }
        }
        panic!("restarted sequence should have completed");
    }

    #[test]
    fn test_keys_are_independent() {
        let mut builder = MultiBuilder::new();
        // interleave the same PGN from two sources
        let a = frames_for(0, 20);
        let b = frames_for(1, 20);
        let mut done = 0;
        for (pa, pb) in a.into_iter().zip(b) {
            let mut packet_a = fast_packet(10, PGN, pa);
            builder.add(&mut packet_a);
            let mut packet_b = fast_packet(11, PGN, pb);
            builder.add(&mut packet_b);
            done += packet_a.complete as usize + packet_b.complete as usize;
        }
        assert_eq!(done, 2);
    }

    #[test]
    fn test_reassembly_is_deterministic() {
        let frames = frames_for(2, 18);
        let run = || {
            let mut builder = MultiBuilder::new();
            let mut result = None;
            for payload in frames.clone() {
                let mut packet = fast_packet(7, PGN, payload);
                builder.add(&mut packet);
                if packet.complete {
                    result = Some(packet.data);
                }
            }
            result
        };
        assert_eq!(run(), run());
        assert_eq!(run().unwrap().len(), 18);
    }

    #[test]
    fn test_declared_overflow_flags_parse_error() {
        let mut builder = MultiBuilder::new();
        let mut packet = fast_packet(9, PGN, [0 << 5, 255, 1, 2, 3, 4, 5, 6]);
        builder.add(&mut packet);
        assert!(!packet.complete);
        assert!(matches!(
            packet.parse_errors.first(),
            Some(N2kError::ReassemblyOverflow { declared: 255, .. })
        ));
        assert_eq!(builder.in_flight(), 0);
    }

    #[test]
    fn test_short_declared_length_completes_on_first_frame() {
        let mut builder = MultiBuilder::new();
        // a 5-byte payload fits entirely in frame 0
        let mut packet = fast_packet(9, PGN, [0, 5, 0xA, 0xB, 0xC, 0xD, 0xE, 0xFF]);
        builder.add(&mut packet);
        assert!(packet.complete);
        assert_eq!(packet.data, vec![0xA, 0xB, 0xC, 0xD, 0xE]);
    }
}
