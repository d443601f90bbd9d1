//! Manufacturer-proprietary PGN schemas
//!
//! Every proprietary payload opens with the 11-bit manufacturer code, two
//! reserved bits, and the 3-bit industry code. Those three fields carry
//! match constants: a decoder rejects the variant when the payload
//! disagrees, and an encoder always writes the constants (callers cannot
//! override them), so the structs do not carry the fields at all.

use crate::pgns::{PgnMessage, PgnStruct};
use crate::stream::DataStream;
use crate::types::{MessageInfo, N2kError, Result};

/// Marine industry code carried by every proprietary schema implemented here
const INDUSTRY_MARINE: u64 = 4;

/// Read and check the proprietary prefix against the variant's constants
fn match_proprietary_prefix(s: &mut DataStream, manufacturer: u64) -> Result<()> {
    let found = s.read_lookup(11)?;
    if found != manufacturer {
        return Err(N2kError::MatchFailed {
            at: 0,
            expected: manufacturer as i64,
            found,
        });
    }
    s.skip(2)?;
    let industry = s.read_lookup(3)?;
    if industry != INDUSTRY_MARINE {
        return Err(N2kError::MatchFailed {
            at: 13,
            expected: INDUSTRY_MARINE as i64,
            found: industry,
        });
    }
    Ok(())
}

/// Write the proprietary prefix constants
fn write_proprietary_prefix(s: &mut DataStream, manufacturer: u64) -> Result<()> {
    s.write_lookup(manufacturer, 11, 0)?;
    s.write_reserved(2, 11)?;
    s.write_lookup(INDUSTRY_MARINE, 3, 13)?;
    Ok(())
}

/// PGN 130824, B&G variant: opaque key/value instrument data
#[derive(Debug, Clone, PartialEq)]
pub struct BAndGKeyValueData {
    pub info: MessageInfo,
    /// Raw key/value records as transmitted; the inner encoding is not part
    /// of the public database
    pub data: Vec<u8>,
}

pub(crate) fn decode_bandg_key_value_data(
    info: MessageInfo,
    s: &mut DataStream,
) -> Result<PgnMessage> {
    match_proprietary_prefix(s, 381)?;
    let data = s.read_binary(0)?;
    Ok(PgnMessage::BAndGKeyValueData(BAndGKeyValueData {
        info,
        data,
    }))
}

impl PgnStruct for BAndGKeyValueData {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        write_proprietary_prefix(s, 381)?;
        s.write_binary(&self.data, 0, 16)?;
        let mut info = self.info;
        info.pgn = 130824;
        Ok(info)
    }
}

/// PGN 130824, Maretron variant: annunciator status
#[derive(Debug, Clone, PartialEq)]
pub struct MaretronAnnunciator {
    pub info: MessageInfo,
    pub field_4: Option<u8>,
    pub field_5: Option<u8>,
    pub field_6: Option<u16>,
    pub field_7: Option<u16>,
    pub field_8: Option<u16>,
}

pub(crate) fn decode_maretron_annunciator(
    info: MessageInfo,
    s: &mut DataStream,
) -> Result<PgnMessage> {
    match_proprietary_prefix(s, 137)?;
    let field_4 = s.read_u8(8)?;
    let field_5 = s.read_u8(8)?;
    let field_6 = s.read_u16(16)?;
    let field_7 = s.read_u16(16)?;
    let field_8 = s.read_u16(16)?;
    Ok(PgnMessage::MaretronAnnunciator(MaretronAnnunciator {
        info,
        field_4,
        field_5,
        field_6,
        field_7,
        field_8,
    }))
}

impl PgnStruct for MaretronAnnunciator {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        write_proprietary_prefix(s, 137)?;
        s.write_u8(self.field_4, 8, 16)?;
        s.write_u8(self.field_5, 8, 24)?;
        s.write_u16(self.field_6, 16, 32)?;
        s.write_u16(self.field_7, 16, 48)?;
        s.write_u16(self.field_8, 16, 64)?;
        let mut info = self.info;
        info.pgn = 130824;
        Ok(info)
    }
}

/// PGN 65280, Furuno variant: heave
#[derive(Debug, Clone, PartialEq)]
pub struct FurunoHeave {
    pub info: MessageInfo,
    /// meters
    pub heave: Option<f64>,
}

pub(crate) fn decode_furuno_heave(info: MessageInfo, s: &mut DataStream) -> Result<PgnMessage> {
    match_proprietary_prefix(s, 1855)?;
    let heave = s.read_signed_resolution(16, 0.001, 0)?;
    s.skip(16)?;
    Ok(PgnMessage::FurunoHeave(FurunoHeave { info, heave }))
}

impl PgnStruct for FurunoHeave {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        write_proprietary_prefix(s, 1855)?;
        s.write_signed_resolution(self.heave, 16, 0.001, 0, 16)?;
        s.write_reserved(16, 32)?;
        let mut info = self.info;
        info.pgn = 65280;
        Ok(info)
    }
}

/// PGN 130823, Maretron variant: temperature high range
///
/// Documented in the database but never observed in sample captures; lives
/// in the catalog's unseen table.
#[derive(Debug, Clone, PartialEq)]
pub struct MaretronTemperatureHighRange {
    pub info: MessageInfo,
    pub sid: Option<u8>,
    pub instance: Option<u8>,
    pub source: Option<u8>,
    /// kelvin
    pub actual_temperature: Option<f64>,
    /// kelvin
    pub set_temperature: Option<f64>,
}

pub(crate) fn decode_maretron_temperature_high_range(
    info: MessageInfo,
    s: &mut DataStream,
) -> Result<PgnMessage> {
    match_proprietary_prefix(s, 137)?;
    let sid = s.read_u8(8)?;
    let instance = s.read_u8(8)?;
    let source = s.read_u8(8)?;
    let actual_temperature = s.read_unsigned_resolution(16, 0.1, 0)?;
    let set_temperature = s.read_unsigned_resolution(16, 0.1, 0)?;
    Ok(PgnMessage::MaretronTemperatureHighRange(
        MaretronTemperatureHighRange {
            info,
            sid,
            instance,
            source,
            actual_temperature,
            set_temperature,
        },
    ))
}

impl PgnStruct for MaretronTemperatureHighRange {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        write_proprietary_prefix(s, 137)?;
        s.write_u8(self.sid, 8, 16)?;
        s.write_u8(self.instance, 8, 24)?;
        s.write_u8(self.source, 8, 32)?;
        s.write_unsigned_resolution(self.actual_temperature, 16, 0.1, 0, 40)?;
        s.write_unsigned_resolution(self.set_temperature, 16, 0.1, 0, 56)?;
        let mut info = self.info;
        info.pgn = 130823;
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proprietary_payload(manufacturer: u16, rest: &[u8]) -> Vec<u8> {
        let mut data = vec![
            (manufacturer & 0xFF) as u8,
            ((manufacturer >> 8) as u8) | 0b0001_1000 | (INDUSTRY_MARINE as u8) << 5,
        ];
        data.extend_from_slice(rest);
        data
    }

    #[test]
    fn test_bandg_decode_and_re_encode() {
        let payload = proprietary_payload(381, &[3, 4, 5, 0xAA, 0xBB, 0xCC]);
        let mut stream = DataStream::new(payload.clone());
        let decoded =
            decode_bandg_key_value_data(MessageInfo::default(), &mut stream).unwrap();
        let PgnMessage::BAndGKeyValueData(value) = &decoded else {
            panic!("wrong variant");
        };
        assert_eq!(value.data, vec![3, 4, 5, 0xAA, 0xBB, 0xCC]);

        let mut out = DataStream::for_write(payload.len());
        decoded.encode(&mut out).unwrap();
        assert_eq!(out.get_data(), payload.as_slice());
    }

    #[test]
    fn test_manufacturer_mismatch_rejects_variant() {
        let payload = proprietary_payload(229, &[0xFF; 8]);
        let mut stream = DataStream::new(payload);
        let err = decode_bandg_key_value_data(MessageInfo::default(), &mut stream).unwrap_err();
        assert!(matches!(
            err,
            N2kError::MatchFailed {
                expected: 381,
                found: 229,
                ..
            }
        ));
    }

    #[test]
    fn test_maretron_annunciator_round_trip() {
        let original = MaretronAnnunciator {
            info: MessageInfo::default(),
            field_4: Some(1),
            field_5: None,
            field_6: Some(512),
            field_7: None,
            field_8: Some(7),
        };
        let mut stream = DataStream::for_write(10);
        original.encode(&mut stream).unwrap();
        let mut back = DataStream::new(stream.get_data().to_vec());
        let decoded = decode_maretron_annunciator(original.info, &mut back).unwrap();
        assert_eq!(decoded, PgnMessage::MaretronAnnunciator(original));
    }

    #[test]
    fn test_furuno_heave_round_trip() {
        let original = FurunoHeave {
            info: MessageInfo::default(),
            heave: Some(-1.25),
        };
        let mut stream = DataStream::for_write(8);
        original.encode(&mut stream).unwrap();
        assert_eq!(stream.get_data().len(), 6);
        let mut back = DataStream::new(stream.get_data().to_vec());
        let decoded = decode_furuno_heave(original.info, &mut back).unwrap();
        assert_eq!(decoded, PgnMessage::FurunoHeave(original));
    }

    #[test]
    fn test_unseen_variant_codec_works_directly() {
        let original = MaretronTemperatureHighRange {
            info: MessageInfo::default(),
            sid: Some(9),
            instance: Some(0),
            source: Some(1),
            actual_temperature: Some(391.5),
            set_temperature: None,
        };
        let mut stream = DataStream::for_write(16);
        original.encode(&mut stream).unwrap();
        let mut back = DataStream::new(stream.get_data().to_vec());
        let decoded =
            decode_maretron_temperature_high_range(original.info, &mut back).unwrap();
        assert_eq!(
            decoded,
            PgnMessage::MaretronTemperatureHighRange(original)
        );
    }
}
