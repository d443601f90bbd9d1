//! End-to-end pipeline scenarios: captured traffic in, typed values out,
//! and byte-faithful re-encoding back through the outbound path.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;

use n2k_decoder::adapter::{frames_required, FrameSink};
use n2k_decoder::catalog::lookups::{
    DirectionReference, LowBattery, ManufacturerCode, MobPositionSource, MobStatus,
};
use n2k_decoder::converter::frame_from_raw;
use n2k_decoder::endpoint::{CancelToken, RawFileEndpoint};
use n2k_decoder::pgns::{ManOverboardNotification, UnknownPgn};
use n2k_decoder::{
    DataStream, Frame, FrameHandler, MessageInfo, PgnMessage, Pipeline, Result, Timestamp,
    MAX_PGN_LENGTH,
};

/// Outbound sink that collects frames for inspection or re-injection
#[derive(Clone, Default)]
struct CollectSink(Rc<RefCell<Vec<Frame>>>);

impl FrameSink for CollectSink {
    fn write_frame(&mut self, _timestamp: Timestamp, frame: Frame) -> Result<()> {
        self.0.borrow_mut().push(frame);
        Ok(())
    }
}

/// Run one captured record through a fresh pipeline and hand back every
/// published message
fn messages_for_raw(lines: &[&str]) -> Vec<PgnMessage> {
    let mut pipeline = Pipeline::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    pipeline
        .subscribers_mut()
        .subscribe_to_all(move |msg| sink.borrow_mut().push(msg.clone()));

    for line in lines {
        let record = frame_from_raw(line).unwrap();
        pipeline.handle_frame(record.timestamp, record.frame);
    }
    drop(pipeline);
    Rc::try_unwrap(seen).ok().unwrap().into_inner()
}

fn encode_message(message: &PgnMessage) -> Vec<u8> {
    let mut stream = DataStream::for_write(MAX_PGN_LENGTH);
    message.encode(&mut stream).unwrap();
    stream.get_data().to_vec()
}

#[test]
fn test_pgn_127501_decodes_and_re_encodes_byte_identical() {
    let raw = "2023-01-21T00:04:17Z,3,127501,224,0,8,00,03,c0,ff,ff,ff,ff,ff";
    let messages = messages_for_raw(&[raw]);
    assert_eq!(messages.len(), 1);

    let PgnMessage::BinarySwitchBankStatus(status) = &messages[0] else {
        panic!("expected BinarySwitchBankStatus, got {:?}", messages[0]);
    };
    assert_eq!(status.instance, Some(0));
    assert_eq!(status.info.source, 224);

    let payload = encode_message(&messages[0]);
    assert_eq!(
        payload,
        vec![0x00, 0x03, 0xC0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
    );
}

#[test]
fn test_pgn_129026_missing_fields_round_trip() {
    let raw = "2024-08-27T14:36:06Z,2,129026,43,0,8,62,ff,ff,ff,00,00,ff,ff";
    let messages = messages_for_raw(&[raw]);

    let PgnMessage::CogSogRapidUpdate(value) = &messages[0] else {
        panic!("expected CogSogRapidUpdate, got {:?}", messages[0]);
    };
    assert_eq!(value.sid, Some(0x62));
    assert_eq!(value.cog, None);
    assert_eq!(value.sog, Some(0.0));

    let payload = encode_message(&messages[0]);
    assert_eq!(
        payload,
        vec![0x62, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0xFF, 0xFF]
    );
}

#[test]
fn test_pgn_129025_round_trip() {
    let raw = "2024-08-27T14:36:06Z,2,129025,8,0,8,8d,a5,27,19,c5,25,d9,d5";
    let messages = messages_for_raw(&[raw]);

    let PgnMessage::PositionRapidUpdate(position) = &messages[0] else {
        panic!("expected PositionRapidUpdate, got {:?}", messages[0]);
    };
    assert_eq!(position.latitude, Some(42.1831053));

    let payload = encode_message(&messages[0]);
    assert_eq!(
        payload,
        vec![0x8D, 0xA5, 0x27, 0x19, 0xC5, 0x25, 0xD9, 0xD5]
    );
}

#[test]
fn test_captured_payloads_re_encode_to_identical_bytes() {
    let lines = [
        "2024-08-27T14:36:06Z,2,129026,43,0,8,62,ff,ff,ff,00,00,ff,ff",
        "2024-08-27T14:36:06Z,2,129025,8,0,8,8d,a5,27,19,c5,25,d9,d5",
        "2024-08-27T14:36:06Z,2,129026,15,0,8,95,fc,43,13,00,00,ff,ff",
        "2024-08-27T14:36:06Z,2,129025,43,0,8,e0,a2,27,19,f8,26,d9,d5",
        "2024-08-27T14:36:06Z,2,129025,15,0,8,8b,a5,27,19,ab,25,d9,d5",
    ];
    for line in lines {
        let record = frame_from_raw(line).unwrap();
        let messages = messages_for_raw(&[line]);
        assert_eq!(messages.len(), 1, "no message for {line}");
        let payload = encode_message(&messages[0]);
        assert_eq!(payload, record.frame.data.to_vec(), "mismatch for {line}");
    }
}

#[test]
fn test_man_overboard_segment_reassemble_decode() {
    let original = ManOverboardNotification {
        info: MessageInfo {
            pgn: 129702,
            source: 12,
            ..MessageInfo::default()
        },
        sid: None,
        mob_emitter_id: None,
        mob_status: MobStatus::ManualOnBoardMobButtonActivation,
        activation_time: None,
        position_source: MobPositionSource::Unknown(3),
        position_date: None,
        position_time: None,
        latitude: None,
        longitude: None,
        cog_reference: DirectionReference::Error,
        cog: None,
        sog: Some(8.0),
        mmsi_of_vessel_of_origin: None,
        mob_emitter_battery_low_status: LowBattery::Low,
    };

    // encode and segment through the outbound path
    let mut sender = Pipeline::new();
    let sink = CollectSink::default();
    sender.set_writer(Box::new(sink.clone()));
    sender
        .write(&PgnMessage::ManOverboardNotification(original.clone()))
        .unwrap();

    let frames = sink.0.borrow().clone();
    assert_eq!(frames.len(), frames_required(35));
    for (frame_num, frame) in frames.iter().enumerate() {
        // every frame carries (seq << 5) | frame_num in its first byte
        assert_eq!(frame.data[0] & 0x1F, frame_num as u8);
        assert_eq!(frame.data[0] >> 5, frames[0].data[0] >> 5);
    }
    assert_eq!(frames[0].data[1], 35);

    // reassemble and decode through a fresh inbound pipeline
    let mut receiver = Pipeline::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let collect = seen.clone();
    receiver
        .subscribers_mut()
        .subscribe_to::<ManOverboardNotification>(move |mob| {
            collect.borrow_mut().push(mob.clone());
        });
    let now = Utc::now();
    for frame in frames {
        receiver.handle_frame(now, frame);
    }

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    let decoded = &seen[0];
    let expected = ManOverboardNotification {
        info: decoded.info,
        ..original
    };
    assert_eq!(decoded, &expected);
}

#[test]
fn test_proprietary_unknown_manufacturer_yields_unknown_pgn() {
    // 130824 frame 0 declaring a 6-byte payload with a Garmin prefix;
    // neither the B&G nor the Maretron variant matches
    let payload = [0x00, 0x06, 0xE5, 0x98, 0x03, 0x04, 0x05, 0xFF];
    let frame = Frame {
        id: n2k_decoder::converter::encode_can_id(130824, 10, 2, 255),
        length: 8,
        data: payload,
    };

    let mut pipeline = Pipeline::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let collect = seen.clone();
    pipeline
        .subscribers_mut()
        .subscribe_to::<UnknownPgn>(move |unknown| collect.borrow_mut().push(unknown.clone()));
    pipeline.handle_frame(Utc::now(), frame);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].manufacturer_code, Some(ManufacturerCode::Garmin));
    assert_eq!(seen[0].info.pgn, 130824);
}

#[test]
fn test_fast_packet_out_of_order_then_in_order() {
    // segment a 35-byte fast-packet payload into six frames
    let mut sender = Pipeline::new();
    let sink = CollectSink::default();
    sender.set_writer(Box::new(sink.clone()));
    let mob = ManOverboardNotification {
        info: MessageInfo {
            pgn: 129702,
            source: 30,
            ..MessageInfo::default()
        },
        sid: Some(1),
        mob_emitter_id: Some(7),
        mob_status: MobStatus::TestMode,
        activation_time: None,
        position_source: MobPositionSource::PositionEstimatedByVessel,
        position_date: None,
        position_time: None,
        latitude: Some(42.0),
        longitude: Some(-70.5),
        cog_reference: DirectionReference::True,
        cog: None,
        sog: None,
        mmsi_of_vessel_of_origin: None,
        mob_emitter_battery_low_status: LowBattery::Good,
    };
    sender
        .write(&PgnMessage::ManOverboardNotification(mob))
        .unwrap();
    let frames = sink.0.borrow().clone();
    assert_eq!(frames.len(), 6);

    let count_messages = |order: &[usize]| {
        let mut pipeline = Pipeline::new();
        let seen = Rc::new(RefCell::new(0));
        let counter = seen.clone();
        pipeline
            .subscribers_mut()
            .subscribe_to_all(move |_| *counter.borrow_mut() += 1);
        let now = Utc::now();
        for &index in order {
            pipeline.handle_frame(now, frames[index]);
        }
        let count = *seen.borrow();
        count
    };

    // frame sequence 0, 2, 1 never completes; dropped frames do not
    // produce partial packets
    assert_eq!(count_messages(&[0, 2, 1]), 0);
    // the in-order sequence completes exactly once
    assert_eq!(count_messages(&[0, 1, 2, 3, 4, 5]), 1);
}

#[test]
fn test_unseen_pgn_is_flagged_through_pipeline() {
    // 130823 is documented but only in the unseen table, so the main
    // catalog cannot decode it; each frame surfaces as unknown traffic
    // with the unseen marker set
    let frame = Frame {
        id: n2k_decoder::converter::encode_can_id(130823, 9, 7, 255),
        length: 8,
        data: [0x89, 0x98, 1, 2, 3, 4, 5, 6],
    };

    let mut pipeline = Pipeline::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let collect = seen.clone();
    pipeline
        .subscribers_mut()
        .subscribe_to::<UnknownPgn>(move |unknown| collect.borrow_mut().push(unknown.clone()));
    pipeline.handle_frame(Utc::now(), frame);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].was_unseen);
    assert_eq!(seen[0].manufacturer_code, Some(ManufacturerCode::Maretron));
    assert_eq!(seen[0].data.len(), 8);
}

#[test]
fn test_raw_endpoint_drives_pipeline() {
    let dir = std::env::temp_dir().join("n2k-decoder-e2e");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("traffic.raw");
    std::fs::write(
        &path,
        "2023-01-21T00:04:17Z,3,127501,224,0,8,00,03,c0,ff,ff,ff,ff,ff\n\
         2024-08-27T14:36:06Z,2,129025,8,0,8,8d,a5,27,19,c5,25,d9,d5\n\
         2024-08-27T14:36:06Z,2,129026,43,0,8,62,ff,ff,ff,00,00,ff,ff\n",
    )
    .unwrap();

    let mut pipeline = Pipeline::new();
    let names = Rc::new(RefCell::new(Vec::new()));
    let collect = names.clone();
    pipeline
        .subscribers_mut()
        .subscribe_to_all(move |msg| collect.borrow_mut().push(msg.name()));

    RawFileEndpoint::new(&path)
        .run(&mut pipeline, &CancelToken::new())
        .unwrap();

    assert_eq!(
        names.borrow().as_slice(),
        &[
            "BinarySwitchBankStatus",
            "PositionRapidUpdate",
            "CogSogRapidUpdate"
        ]
    );
}
