//! CAN adapter: frames in, packets out, and the reverse
//!
//! Inbound, the adapter turns each frame into a [`Packet`], routes fast
//! PGNs through its private [`MultiBuilder`], and hands back completed
//! packets with their decoder sets resolved. Outbound, it segments encoded
//! payloads into frames, maintaining a rolling 3-bit sequence id per
//! (source, PGN), and pushes them to the configured [`FrameSink`].
//!
//! Each adapter owns its reassembly state and sequence counters outright;
//! give every pipeline its own adapter.

use std::collections::HashMap;

use crate::catalog;
use crate::converter::encode_can_id;
use crate::packet::Packet;
use crate::reassembly::MultiBuilder;
use crate::types::{Frame, MessageInfo, N2kError, Result, Timestamp, MAX_PGN_LENGTH};

/// Downstream consumer of outbound frames
pub trait FrameSink {
    fn write_frame(&mut self, timestamp: Timestamp, frame: Frame) -> Result<()>;
}

/// Converts between CAN frames and complete packets
pub struct CanAdapter {
    multi: MultiBuilder,
    /// Last used outbound sequence id per (source, PGN)
    seq_ids: HashMap<(u8, u32), u8>,
    sink: Option<Box<dyn FrameSink>>,
}

impl CanAdapter {
    pub fn new() -> Self {
        Self {
            multi: MultiBuilder::new(),
            seq_ids: HashMap::new(),
            sink: None,
        }
    }

    /// Assign the endpoint that receives outbound frames
    pub fn set_writer(&mut self, sink: Box<dyn FrameSink>) {
        self.sink = Some(sink);
    }

    /// Discard in-flight reassembly state (endpoint cancellation)
    pub fn reset(&mut self) {
        self.multi.clear();
    }

    /// Process one inbound frame; returns a packet once one is ready
    ///
    /// Packets with parse errors are returned immediately so they can be
    /// classified and published as unknown traffic.
    pub fn handle_frame(&mut self, timestamp: Timestamp, frame: Frame) -> Option<Packet> {
        let info = MessageInfo::from_frame(timestamp, &frame);
        let mut packet = Packet::new(info, &frame);

        if !packet.parse_errors.is_empty() {
            return Some(packet);
        }

        if packet.fast {
            self.multi.add(&mut packet);
            if !packet.parse_errors.is_empty() {
                return Some(packet);
            }
        } else {
            packet.complete = true;
        }

        if packet.complete {
            packet.add_decoders();
            Some(packet)
        } else {
            None
        }
    }

    /// Emit an encoded payload as one or more frames
    pub fn write_pgn(&mut self, info: MessageInfo, data: &[u8]) -> Result<()> {
        let can_id = encode_can_id(info.pgn, info.source, info.priority, info.target);
        if catalog::is_fast(info.pgn) {
            self.send_fast(info, can_id, data)
        } else {
            self.send_single(info, can_id, data)
        }
    }

    fn send_fast(&mut self, info: MessageInfo, can_id: u32, data: &[u8]) -> Result<()> {
        let total = data.len();
        if total > MAX_PGN_LENGTH {
            return Err(N2kError::EncodeOverflow {
                length: total,
                max: MAX_PGN_LENGTH,
            });
        }

        let key = (info.source, info.pgn);
        let seq_id = *self.seq_ids.entry(key).or_insert(0);
        self.seq_ids.insert(key, (seq_id + 1) % 7);

        let mut index = 0;
        for frame_num in 0..frames_required(total) {
            let mut buffer = [0xFF_u8; 8];
            buffer[0] = (seq_id << 5) | frame_num as u8;
            let mut offset = 1;
            if frame_num == 0 {
                buffer[1] = total as u8;
                offset = 2;
            }
            while offset < 8 && index < total {
                buffer[offset] = data[index];
                index += 1;
                offset += 1;
            }
            self.emit(
                info.timestamp,
                Frame {
                    id: can_id,
                    length: 8,
                    data: buffer,
                },
            )?;
        }
        Ok(())
    }

    fn send_single(&mut self, info: MessageInfo, can_id: u32, data: &[u8]) -> Result<()> {
        if data.len() > 8 {
            return Err(N2kError::EncodeOverflow {
                length: data.len(),
                max: 8,
            });
        }
        let mut buffer = [0xFF_u8; 8];
        buffer[..data.len()].copy_from_slice(data);
        self.emit(
            info.timestamp,
            Frame {
                id: can_id,
                length: data.len() as u8,
                data: buffer,
            },
        )
    }

    fn emit(&mut self, timestamp: Timestamp, frame: Frame) -> Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            sink.write_frame(timestamp, frame)?;
        }
        Ok(())
    }
}

impl Default for CanAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames needed to carry `length` payload bytes as a fast packet:
/// frame 0 carries 6 bytes, every later frame 7
pub fn frames_required(length: usize) -> usize {
    if length <= 6 {
        1
    } else {
        1 + (length - 6).div_ceil(7)
    }
}

impl MessageInfo {
    /// Derive the message context from a frame header
    pub fn from_frame(timestamp: Timestamp, frame: &Frame) -> Self {
        let header = crate::converter::decode_can_id(frame.id);
        Self {
            timestamp,
            priority: header.priority,
            pgn: header.pgn,
            source: header.source,
            target: header.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::frame_from_raw;
    use chrono::Utc;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct CollectSink(Rc<RefCell<Vec<Frame>>>);

    impl FrameSink for CollectSink {
        fn write_frame(&mut self, _timestamp: Timestamp, frame: Frame) -> Result<()> {
            self.0.borrow_mut().push(frame);
            Ok(())
        }
    }

    #[test]
    fn test_frames_required() {
        assert_eq!(frames_required(0), 1);
        assert_eq!(frames_required(6), 1);
        assert_eq!(frames_required(7), 2);
        assert_eq!(frames_required(13), 2);
        assert_eq!(frames_required(14), 3);
        assert_eq!(frames_required(20), 3);
        assert_eq!(frames_required(223), 32);
    }

    #[test]
    fn test_single_frame_packet_ready_immediately() {
        let mut adapter = CanAdapter::new();
        let rec =
            frame_from_raw("2023-01-21T00:04:17Z,3,127501,224,0,8,00,03,c0,ff,ff,ff,ff,ff")
                .unwrap();
        let packet = adapter.handle_frame(rec.timestamp, rec.frame).unwrap();
        assert!(packet.complete);
        assert_eq!(packet.decoders.len(), 1);
    }

    #[test]
    fn test_fast_pgn_waits_for_sequence() {
        let mut adapter = CanAdapter::new();
        let id = encode_can_id(129702, 12, 3, 255);
        let now = Utc::now();

        let first = Frame {
            id,
            length: 8,
            data: [0 << 5, 35, 1, 2, 3, 4, 5, 6],
        };
        assert!(adapter.handle_frame(now, first).is_none());
    }

    #[test]
    fn test_fast_segmentation_layout() {
        let mut adapter = CanAdapter::new();
        let sink = CollectSink::default();
        adapter.set_writer(Box::new(sink.clone()));

        let info = MessageInfo {
            pgn: 129702,
            source: 12,
            priority: 3,
            ..MessageInfo::default()
        };
        let payload: Vec<u8> = (1..=20).collect();
        adapter.write_pgn(info, &payload).unwrap();

        let frames = sink.0.borrow();
        assert_eq!(frames.len(), 3);
        // first frame: sequence prefix, declared total, six data bytes
        assert_eq!(frames[0].data, [0, 20, 1, 2, 3, 4, 5, 6]);
        // continuation frames: prefix then seven data bytes
        assert_eq!(frames[1].data, [1, 7, 8, 9, 10, 11, 12, 13]);
        // last frame padded to 0xFF
        assert_eq!(frames[2].data, [2, 14, 15, 16, 17, 18, 19, 20]);
    }

    #[test]
    fn test_fast_sequence_id_rolls() {
        let mut adapter = CanAdapter::new();
        let sink = CollectSink::default();
        adapter.set_writer(Box::new(sink.clone()));

        let info = MessageInfo {
            pgn: 129702,
            source: 12,
            ..MessageInfo::default()
        };
        let payload = [0u8; 10];
        for _ in 0..8 {
            adapter.write_pgn(info, &payload).unwrap();
        }
        let frames = sink.0.borrow();
        let seq_of = |frame: &Frame| frame.data[0] >> 5;
        // two frames per message, sequence id advancing 0..6 then wrapping
        assert_eq!(seq_of(&frames[0]), 0);
        assert_eq!(seq_of(&frames[2]), 1);
        assert_eq!(seq_of(&frames[12]), 6);
        assert_eq!(seq_of(&frames[14]), 0);
    }

    #[test]
    fn test_single_frame_padded_with_ff() {
        let mut adapter = CanAdapter::new();
        let sink = CollectSink::default();
        adapter.set_writer(Box::new(sink.clone()));

        let info = MessageInfo {
            pgn: 59904,
            source: 7,
            target: 32,
            ..MessageInfo::default()
        };
        adapter.write_pgn(info, &[0x00, 0xEE, 0x00]).unwrap();

        let frames = sink.0.borrow();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].length, 3);
        assert_eq!(frames[0].data, [0x00, 0xEE, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_fast_overflow_rejected() {
        let mut adapter = CanAdapter::new();
        let info = MessageInfo {
            pgn: 129702,
            ..MessageInfo::default()
        };
        let payload = vec![0u8; MAX_PGN_LENGTH + 1];
        assert!(matches!(
            adapter.write_pgn(info, &payload),
            Err(N2kError::EncodeOverflow { .. })
        ));
    }
}
