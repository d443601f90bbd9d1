//! Standard (non-proprietary) PGN schemas
//!
//! Decode functions and [`PgnStruct`] encode implementations walk the field
//! lists declared in [`super::registry`] in order. Optional numerics use
//! `Option` with `None` for the missing wire sentinel; lookup fields carry
//! the raw value through their enum's `Unknown` variant.

use crate::catalog::lookups::{
    AisTransceiver, DeviceClass, DirectionReference, IndustryCode, ManufacturerCode, OffOn,
    RangeResidualMode, RepeatIndicator, SatelliteStatus, WindReference, YesNo,
};
use crate::pgns::{PgnMessage, PgnStruct};
use crate::stream::DataStream;
use crate::types::{MessageInfo, Result};

/// PGN 59904: request for a specific PGN from another node
#[derive(Debug, Clone, PartialEq)]
pub struct IsoRequest {
    pub info: MessageInfo,
    pub pgn: Option<u32>,
}

pub(crate) fn decode_iso_request(info: MessageInfo, s: &mut DataStream) -> Result<PgnMessage> {
    let pgn = s.read_u32(24)?;
    Ok(PgnMessage::IsoRequest(IsoRequest { info, pgn }))
}

impl PgnStruct for IsoRequest {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        s.write_u32(self.pgn, 24, 0)?;
        let mut info = self.info;
        info.pgn = 59904;
        Ok(info)
    }
}

/// PGN 60928: ISO address claim
#[derive(Debug, Clone, PartialEq)]
pub struct IsoAddressClaim {
    pub info: MessageInfo,
    pub unique_number: Option<u32>,
    pub manufacturer_code: ManufacturerCode,
    pub device_instance_lower: Option<u8>,
    pub device_instance_upper: Option<u8>,
    pub device_function: Option<u8>,
    pub device_class: DeviceClass,
    pub system_instance: Option<u8>,
    pub industry_group: IndustryCode,
    pub arbitrary_address_capable: YesNo,
}

pub(crate) fn decode_iso_address_claim(
    info: MessageInfo,
    s: &mut DataStream,
) -> Result<PgnMessage> {
    let unique_number = s.read_u32(21)?;
    let manufacturer_code = ManufacturerCode::from_raw(s.read_lookup(11)?);
    let device_instance_lower = s.read_u8(3)?;
    let device_instance_upper = s.read_u8(5)?;
    let device_function = s.read_u8(8)?;
    s.skip(1)?; // spare
    let device_class = DeviceClass::from_raw(s.read_lookup(7)?);
    let system_instance = s.read_u8(4)?;
    let industry_group = IndustryCode::from_raw(s.read_lookup(3)?);
    let arbitrary_address_capable = YesNo::from_raw(s.read_lookup(1)?);
    Ok(PgnMessage::IsoAddressClaim(IsoAddressClaim {
        info,
        unique_number,
        manufacturer_code,
        device_instance_lower,
        device_instance_upper,
        device_function,
        device_class,
        system_instance,
        industry_group,
        arbitrary_address_capable,
    }))
}

impl PgnStruct for IsoAddressClaim {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        s.write_u32(self.unique_number, 21, 0)?;
        s.write_lookup(self.manufacturer_code.raw(), 11, 21)?;
        s.write_u8(self.device_instance_lower, 3, 32)?;
        s.write_u8(self.device_instance_upper, 5, 35)?;
        s.write_u8(self.device_function, 8, 40)?;
        s.write_spare(1, 48)?;
        s.write_lookup(self.device_class.raw(), 7, 49)?;
        s.write_u8(self.system_instance, 4, 56)?;
        s.write_lookup(self.industry_group.raw(), 3, 60)?;
        s.write_lookup(self.arbitrary_address_capable.raw(), 1, 63)?;
        let mut info = self.info;
        info.pgn = 60928;
        Ok(info)
    }
}

/// PGN 127250: vessel heading
#[derive(Debug, Clone, PartialEq)]
pub struct VesselHeading {
    pub info: MessageInfo,
    pub sid: Option<u8>,
    /// radians
    pub heading: Option<f64>,
    /// radians
    pub deviation: Option<f64>,
    /// radians
    pub variation: Option<f64>,
    pub reference: DirectionReference,
}

pub(crate) fn decode_vessel_heading(info: MessageInfo, s: &mut DataStream) -> Result<PgnMessage> {
    let sid = s.read_u8(8)?;
    let heading = s.read_unsigned_resolution(16, 0.0001, 0)?;
    let deviation = s.read_signed_resolution(16, 0.0001, 0)?;
    let variation = s.read_signed_resolution(16, 0.0001, 0)?;
    let reference = DirectionReference::from_raw(s.read_lookup(2)?);
    s.skip(6)?;
    Ok(PgnMessage::VesselHeading(VesselHeading {
        info,
        sid,
        heading,
        deviation,
        variation,
        reference,
    }))
}

impl PgnStruct for VesselHeading {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        s.write_u8(self.sid, 8, 0)?;
        s.write_unsigned_resolution(self.heading, 16, 0.0001, 0, 8)?;
        s.write_signed_resolution(self.deviation, 16, 0.0001, 0, 24)?;
        s.write_signed_resolution(self.variation, 16, 0.0001, 0, 40)?;
        s.write_lookup(self.reference.raw(), 2, 56)?;
        s.write_reserved(6, 58)?;
        let mut info = self.info;
        info.pgn = 127250;
        Ok(info)
    }
}

/// Number of indicator slots in a switch bank report
const SWITCH_BANK_INDICATORS: usize = 28;

/// PGN 127501: binary switch bank status
#[derive(Debug, Clone, PartialEq)]
pub struct BinarySwitchBankStatus {
    pub info: MessageInfo,
    pub instance: Option<u8>,
    /// 28 two-bit indicator slots; unpopulated slots carry the raw
    /// unavailable value
    pub indicators: Vec<OffOn>,
}

pub(crate) fn decode_binary_switch_bank_status(
    info: MessageInfo,
    s: &mut DataStream,
) -> Result<PgnMessage> {
    let instance = s.read_u8(8)?;
    let mut indicators = Vec::with_capacity(SWITCH_BANK_INDICATORS);
    for _ in 0..SWITCH_BANK_INDICATORS {
        indicators.push(OffOn::from_raw(s.read_lookup(2)?));
    }
    Ok(PgnMessage::BinarySwitchBankStatus(BinarySwitchBankStatus {
        info,
        instance,
        indicators,
    }))
}

impl PgnStruct for BinarySwitchBankStatus {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        s.write_u8(self.instance, 8, 0)?;
        for i in 0..SWITCH_BANK_INDICATORS {
            let raw = self.indicators.get(i).map(|ind| ind.raw()).unwrap_or(0x3);
            s.write_lookup(raw, 2, 8 + 2 * i as u32)?;
        }
        let mut info = self.info;
        info.pgn = 127501;
        Ok(info)
    }
}

/// PGN 129025: position, rapid update
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRapidUpdate {
    pub info: MessageInfo,
    /// degrees, 1e-7 steps
    pub latitude: Option<f64>,
    /// degrees, 1e-7 steps
    pub longitude: Option<f64>,
}

pub(crate) fn decode_position_rapid_update(
    info: MessageInfo,
    s: &mut DataStream,
) -> Result<PgnMessage> {
    let latitude = s.read_signed_resolution(32, 1e-7, 0)?;
    let longitude = s.read_signed_resolution(32, 1e-7, 0)?;
    Ok(PgnMessage::PositionRapidUpdate(PositionRapidUpdate {
        info,
        latitude,
        longitude,
    }))
}

impl PgnStruct for PositionRapidUpdate {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        s.write_signed_resolution(self.latitude, 32, 1e-7, 0, 0)?;
        s.write_signed_resolution(self.longitude, 32, 1e-7, 0, 32)?;
        let mut info = self.info;
        info.pgn = 129025;
        Ok(info)
    }
}

/// PGN 129026: COG & SOG, rapid update
#[derive(Debug, Clone, PartialEq)]
pub struct CogSogRapidUpdate {
    pub info: MessageInfo,
    pub sid: Option<u8>,
    pub cog_reference: DirectionReference,
    /// radians
    pub cog: Option<f64>,
    /// m/s
    pub sog: Option<f64>,
}

pub(crate) fn decode_cog_sog_rapid_update(
    info: MessageInfo,
    s: &mut DataStream,
) -> Result<PgnMessage> {
    let sid = s.read_u8(8)?;
    let cog_reference = DirectionReference::from_raw(s.read_lookup(2)?);
    s.skip(6)?;
    let cog = s.read_unsigned_resolution(16, 0.0001, 0)?;
    let sog = s.read_unsigned_resolution(16, 0.01, 0)?;
    s.skip(16)?;
    Ok(PgnMessage::CogSogRapidUpdate(CogSogRapidUpdate {
        info,
        sid,
        cog_reference,
        cog,
        sog,
    }))
}

impl PgnStruct for CogSogRapidUpdate {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        s.write_u8(self.sid, 8, 0)?;
        s.write_lookup(self.cog_reference.raw(), 2, 8)?;
        s.write_reserved(6, 10)?;
        s.write_unsigned_resolution(self.cog, 16, 0.0001, 0, 16)?;
        s.write_unsigned_resolution(self.sog, 16, 0.01, 0, 32)?;
        s.write_reserved(16, 48)?;
        let mut info = self.info;
        info.pgn = 129026;
        Ok(info)
    }
}

/// One satellite entry of a GNSS sats-in-view report
#[derive(Debug, Clone, PartialEq)]
pub struct Satellite {
    pub prn: Option<u8>,
    /// radians
    pub elevation: Option<f64>,
    /// radians
    pub azimuth: Option<f64>,
    /// dB
    pub snr: Option<f64>,
    /// meters
    pub range_residuals: Option<f64>,
    pub status: SatelliteStatus,
}

/// PGN 129540: GNSS satellites in view (fast packet, repeating group)
#[derive(Debug, Clone, PartialEq)]
pub struct GnssSatsInView {
    pub info: MessageInfo,
    pub sid: Option<u8>,
    pub range_residual_mode: RangeResidualMode,
    pub satellites: Vec<Satellite>,
}

pub(crate) fn decode_gnss_sats_in_view(
    info: MessageInfo,
    s: &mut DataStream,
) -> Result<PgnMessage> {
    let sid = s.read_u8(8)?;
    let range_residual_mode = RangeResidualMode::from_raw(s.read_lookup(2)?);
    s.skip(6)?;
    // count-bearing field; a missing count reads as zero repetitions
    let sats_in_view = s.read_u8(8)?.unwrap_or(0);
    let mut satellites = Vec::with_capacity(sats_in_view as usize);
    for _ in 0..sats_in_view {
        let prn = s.read_u8(8)?;
        let elevation = s.read_signed_resolution(16, 0.0001, 0)?;
        let azimuth = s.read_unsigned_resolution(16, 0.0001, 0)?;
        let snr = s.read_unsigned_resolution(16, 0.01, 0)?;
        let range_residuals = s.read_signed_resolution(32, 1e-5, 0)?;
        let status = SatelliteStatus::from_raw(s.read_lookup(4)?);
        s.skip(4)?;
        satellites.push(Satellite {
            prn,
            elevation,
            azimuth,
            snr,
            range_residuals,
            status,
        });
    }
    Ok(PgnMessage::GnssSatsInView(GnssSatsInView {
        info,
        sid,
        range_residual_mode,
        satellites,
    }))
}

impl PgnStruct for GnssSatsInView {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        s.write_u8(self.sid, 8, 0)?;
        s.write_lookup(self.range_residual_mode.raw(), 2, 8)?;
        s.write_reserved(6, 10)?;
        // count is derived from the repeating sequence, never caller-supplied
        s.write_u8(Some(self.satellites.len() as u8), 8, 16)?;
        for sat in &self.satellites {
            s.write_u8(sat.prn, 8, 0)?;
            s.write_signed_resolution(sat.elevation, 16, 0.0001, 0, 0)?;
            s.write_unsigned_resolution(sat.azimuth, 16, 0.0001, 0, 0)?;
            s.write_unsigned_resolution(sat.snr, 16, 0.01, 0, 0)?;
            s.write_signed_resolution(sat.range_residuals, 32, 1e-5, 0, 0)?;
            s.write_lookup(sat.status.raw(), 4, 0)?;
            s.write_reserved(4, 0)?;
        }
        let mut info = self.info;
        info.pgn = 129540;
        Ok(info)
    }
}

/// PGN 129702: man overboard notification (fast packet)
#[derive(Debug, Clone, PartialEq)]
pub struct ManOverboardNotification {
    pub info: MessageInfo,
    pub sid: Option<u8>,
    pub mob_emitter_id: Option<u32>,
    pub mob_status: crate::catalog::lookups::MobStatus,
    /// seconds since midnight
    pub activation_time: Option<f64>,
    pub position_source: crate::catalog::lookups::MobPositionSource,
    /// days since the Unix epoch
    pub position_date: Option<u16>,
    /// seconds since midnight
    pub position_time: Option<f64>,
    /// degrees
    pub latitude: Option<f64>,
    /// degrees
    pub longitude: Option<f64>,
    pub cog_reference: DirectionReference,
    /// radians
    pub cog: Option<f64>,
    /// m/s
    pub sog: Option<f64>,
    pub mmsi_of_vessel_of_origin: Option<u32>,
    pub mob_emitter_battery_low_status: crate::catalog::lookups::LowBattery,
}

pub(crate) fn decode_man_overboard_notification(
    info: MessageInfo,
    s: &mut DataStream,
) -> Result<PgnMessage> {
    use crate::catalog::lookups::{LowBattery, MobPositionSource, MobStatus};

    let sid = s.read_u8(8)?;
    let mob_emitter_id = s.read_u32(32)?;
    let mob_status = MobStatus::from_raw(s.read_lookup(3)?);
    s.skip(5)?;
    let activation_time = s.read_unsigned_resolution(32, 0.0001, 0)?;
    let position_source = MobPositionSource::from_raw(s.read_lookup(3)?);
    s.skip(5)?;
    let position_date = s.read_u16(16)?;
    let position_time = s.read_unsigned_resolution(32, 0.0001, 0)?;
    let latitude = s.read_signed_resolution(32, 1e-7, 0)?;
    let longitude = s.read_signed_resolution(32, 1e-7, 0)?;
    let cog_reference = DirectionReference::from_raw(s.read_lookup(2)?);
    s.skip(6)?;
    let cog = s.read_unsigned_resolution(16, 0.0001, 0)?;
    let sog = s.read_unsigned_resolution(16, 0.01, 0)?;
    let mmsi_of_vessel_of_origin = s.read_u32(32)?;
    let mob_emitter_battery_low_status = LowBattery::from_raw(s.read_lookup(2)?);
    s.skip(6)?;
    Ok(PgnMessage::ManOverboardNotification(
        ManOverboardNotification {
            info,
            sid,
            mob_emitter_id,
            mob_status,
            activation_time,
            position_source,
            position_date,
            position_time,
            latitude,
            longitude,
            cog_reference,
            cog,
            sog,
            mmsi_of_vessel_of_origin,
            mob_emitter_battery_low_status,
        },
    ))
}

impl PgnStruct for ManOverboardNotification {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        s.write_u8(self.sid, 8, 0)?;
        s.write_u32(self.mob_emitter_id, 32, 8)?;
        s.write_lookup(self.mob_status.raw(), 3, 40)?;
        s.write_reserved(5, 43)?;
        s.write_unsigned_resolution(self.activation_time, 32, 0.0001, 0, 48)?;
        s.write_lookup(self.position_source.raw(), 3, 80)?;
        s.write_reserved(5, 83)?;
        s.write_u16(self.position_date, 16, 88)?;
        s.write_unsigned_resolution(self.position_time, 32, 0.0001, 0, 104)?;
        s.write_signed_resolution(self.latitude, 32, 1e-7, 0, 136)?;
        s.write_signed_resolution(self.longitude, 32, 1e-7, 0, 168)?;
        s.write_lookup(self.cog_reference.raw(), 2, 200)?;
        s.write_reserved(6, 202)?;
        s.write_unsigned_resolution(self.cog, 16, 0.0001, 0, 208)?;
        s.write_unsigned_resolution(self.sog, 16, 0.01, 0, 224)?;
        s.write_u32(self.mmsi_of_vessel_of_origin, 32, 240)?;
        s.write_lookup(self.mob_emitter_battery_low_status.raw(), 2, 272)?;
        s.write_reserved(6, 274)?;
        let mut info = self.info;
        info.pgn = 129702;
        Ok(info)
    }
}

/// PGN 129809: AIS class B static data, part A (fast packet)
#[derive(Debug, Clone, PartialEq)]
pub struct AisClassBStaticDataPartA {
    pub info: MessageInfo,
    pub message_id: Option<u8>,
    pub repeat_indicator: RepeatIndicator,
    pub user_id: Option<u32>,
    pub name: String,
    pub ais_transceiver: AisTransceiver,
    pub sequence_id: Option<u8>,
}

pub(crate) fn decode_ais_class_b_static_data_part_a(
    info: MessageInfo,
    s: &mut DataStream,
) -> Result<PgnMessage> {
    let message_id = s.read_u8(6)?;
    let repeat_indicator = RepeatIndicator::from_raw(s.read_lookup(2)?);
    let user_id = s.read_u32(32)?;
    let name = s.read_fixed_string(160)?;
    let ais_transceiver = AisTransceiver::from_raw(s.read_lookup(5)?);
    s.skip(3)?;
    let sequence_id = s.read_u8(8)?;
    Ok(PgnMessage::AisClassBStaticDataPartA(
        AisClassBStaticDataPartA {
            info,
            message_id,
            repeat_indicator,
            user_id,
            name,
            ais_transceiver,
            sequence_id,
        },
    ))
}

impl PgnStruct for AisClassBStaticDataPartA {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        s.write_u8(self.message_id, 6, 0)?;
        s.write_lookup(self.repeat_indicator.raw(), 2, 6)?;
        s.write_u32(self.user_id, 32, 8)?;
        s.write_fixed_string(&self.name, 160, 40)?;
        s.write_lookup(self.ais_transceiver.raw(), 5, 200)?;
        s.write_reserved(3, 205)?;
        s.write_u8(self.sequence_id, 8, 208)?;
        let mut info = self.info;
        info.pgn = 129809;
        Ok(info)
    }
}

/// PGN 126998: configuration information (fast packet, variable length)
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationInformation {
    pub info: MessageInfo,
    pub installation_description_1: String,
    pub installation_description_2: String,
    pub manufacturer_information: String,
}

pub(crate) fn decode_configuration_information(
    info: MessageInfo,
    s: &mut DataStream,
) -> Result<PgnMessage> {
    let installation_description_1 = s.read_string_lau()?;
    let installation_description_2 = s.read_string_lau()?;
    let manufacturer_information = s.read_string_lau()?;
    Ok(PgnMessage::ConfigurationInformation(
        ConfigurationInformation {
            info,
            installation_description_1,
            installation_description_2,
            manufacturer_information,
        },
    ))
}

impl PgnStruct for ConfigurationInformation {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        s.write_string_lau(&self.installation_description_1, 0)?;
        s.write_string_lau(&self.installation_description_2, 0)?;
        s.write_string_lau(&self.manufacturer_information, 0)?;
        let mut info = self.info;
        info.pgn = 126998;
        Ok(info)
    }
}

/// PGN 130306: wind data
#[derive(Debug, Clone, PartialEq)]
pub struct WindData {
    pub info: MessageInfo,
    pub sid: Option<u8>,
    /// m/s
    pub wind_speed: Option<f64>,
    /// radians
    pub wind_angle: Option<f64>,
    pub reference: WindReference,
}

pub(crate) fn decode_wind_data(info: MessageInfo, s: &mut DataStream) -> Result<PgnMessage> {
    let sid = s.read_u8(8)?;
    let wind_speed = s.read_unsigned_resolution(16, 0.01, 0)?;
    let wind_angle = s.read_unsigned_resolution(16, 0.0001, 0)?;
    let reference = WindReference::from_raw(s.read_lookup(3)?);
    s.skip(21)?;
    Ok(PgnMessage::WindData(WindData {
        info,
        sid,
        wind_speed,
        wind_angle,
        reference,
    }))
}

impl PgnStruct for WindData {
    fn encode(&self, s: &mut DataStream) -> Result<MessageInfo> {
        s.write_u8(self.sid, 8, 0)?;
        s.write_unsigned_resolution(self.wind_speed, 16, 0.01, 0, 8)?;
        s.write_unsigned_resolution(self.wind_angle, 16, 0.0001, 0, 24)?;
        s.write_lookup(self.reference.raw(), 3, 40)?;
        s.write_reserved(21, 43)?;
        let mut info = self.info;
        info.pgn = 130306;
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_for(pgn: u32) -> MessageInfo {
        MessageInfo {
            pgn,
            ..MessageInfo::default()
        }
    }

    #[test]
    fn test_vessel_heading_round_trip() {
        let original = VesselHeading {
            info: info_for(127250),
            sid: Some(42),
            heading: Some(1.5708),
            deviation: Some(-0.0123),
            variation: None,
            reference: DirectionReference::Magnetic,
        };
        let mut stream = DataStream::for_write(8);
        original.encode(&mut stream).unwrap();
        let mut back = DataStream::new(stream.get_data().to_vec());
        let decoded = decode_vessel_heading(original.info, &mut back).unwrap();
        assert_eq!(decoded, PgnMessage::VesselHeading(original));
    }

    #[test]
    fn test_switch_bank_encodes_unavailable_for_short_vec() {
        let status = BinarySwitchBankStatus {
            info: info_for(127501),
            instance: Some(0),
            indicators: vec![OffOn::On, OffOn::Off],
        };
        let mut stream = DataStream::for_write(8);
        status.encode(&mut stream).unwrap();
        let data = stream.get_data();
        assert_eq!(data.len(), 8);
        assert_eq!(data[1], 0b1111_0001); // On, Off, then two unavailable slots
        assert_eq!(data[7], 0xFF);
    }

    #[test]
    fn test_position_round_trip_precision() {
        let original = PositionRapidUpdate {
            info: info_for(129025),
            latitude: Some(42.1831053),
            longitude: Some(-70.7844667),
        };
        let mut stream = DataStream::for_write(8);
        original.encode(&mut stream).unwrap();
        let mut back = DataStream::new(stream.get_data().to_vec());
        let decoded = decode_position_rapid_update(original.info, &mut back).unwrap();
        assert_eq!(decoded, PgnMessage::PositionRapidUpdate(original));
    }

    #[test]
    fn test_gnss_sats_round_trip_with_repeating_group() {
        let original = GnssSatsInView {
            info: info_for(129540),
            sid: Some(7),
            range_residual_mode: RangeResidualMode::Autonomous,
            satellites: vec![
                Satellite {
                    prn: Some(4),
                    elevation: Some(0.7854),
                    azimuth: Some(2.0944),
                    snr: Some(41.25),
                    range_residuals: None,
                    status: SatelliteStatus::Used,
                },
                Satellite {
                    prn: Some(17),
                    elevation: Some(-0.1745),
                    azimuth: Some(4.7124),
                    snr: None,
                    range_residuals: Some(1.2),
                    status: SatelliteStatus::Tracked,
                },
            ],
        };
        let mut stream = DataStream::for_write(64);
        original.encode(&mut stream).unwrap();
        // 3 bytes of prefix plus 12 bytes per satellite
        assert_eq!(stream.get_data().len(), 3 + 2 * 12);
        let mut back = DataStream::new(stream.get_data().to_vec());
        let decoded = decode_gnss_sats_in_view(original.info, &mut back).unwrap();
        assert_eq!(decoded, PgnMessage::GnssSatsInView(original));
    }

    #[test]
    fn test_gnss_sats_missing_count_decodes_empty() {
        let mut stream = DataStream::new(vec![0xFF, 0xFF, 0xFF, 0xFF]);
        let decoded = decode_gnss_sats_in_view(info_for(129540), &mut stream).unwrap();
        match decoded {
            PgnMessage::GnssSatsInView(v) => assert!(v.satellites.is_empty()),
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_configuration_information_round_trip() {
        let original = ConfigurationInformation {
            info: info_for(126998),
            installation_description_1: "Mast head unit".to_string(),
            installation_description_2: String::new(),
            manufacturer_information: "Fitted 2019".to_string(),
        };
        let mut stream = DataStream::for_write(64);
        original.encode(&mut stream).unwrap();
        let mut back = DataStream::new(stream.get_data().to_vec());
        let decoded = decode_configuration_information(original.info, &mut back).unwrap();
        assert_eq!(
            decoded,
            PgnMessage::ConfigurationInformation(original)
        );
    }

    #[test]
    fn test_ais_static_data_round_trip() {
        let original = AisClassBStaticDataPartA {
            info: info_for(129809),
            message_id: Some(24),
            repeat_indicator: RepeatIndicator::Initial,
            user_id: Some(244123456),
            name: "WINDSONG".to_string(),
            ais_transceiver: AisTransceiver::ChannelAVdlReception,
            sequence_id: None,
        };
        let mut stream = DataStream::for_write(32);
        original.encode(&mut stream).unwrap();
        assert_eq!(stream.get_data().len(), 27);
        let mut back = DataStream::new(stream.get_data().to_vec());
        let decoded = decode_ais_class_b_static_data_part_a(original.info, &mut back).unwrap();
        assert_eq!(decoded, PgnMessage::AisClassBStaticDataPartA(original));
    }

    #[test]
    fn test_iso_request_round_trip() {
        let original = IsoRequest {
            info: info_for(59904),
            pgn: Some(60928),
        };
        let mut stream = DataStream::for_write(3);
        original.encode(&mut stream).unwrap();
        assert_eq!(stream.get_data(), &[0x00, 0xEE, 0x00][..]);
        let mut back = DataStream::new(stream.get_data().to_vec());
        let decoded = decode_iso_request(original.info, &mut back).unwrap();
        assert_eq!(decoded, PgnMessage::IsoRequest(original));
    }

    #[test]
    fn test_wind_data_round_trip() {
        let original = WindData {
            info: info_for(130306),
            sid: Some(0x8A),
            wind_speed: Some(4.25),
            wind_angle: None,
            reference: WindReference::Apparent,
        };
        let mut stream = DataStream::for_write(8);
        original.encode(&mut stream).unwrap();
        let mut back = DataStream::new(stream.get_data().to_vec());
        let decoded = decode_wind_data(original.info, &mut back).unwrap();
        assert_eq!(decoded, PgnMessage::WindData(original));
    }

    #[test]
    fn test_iso_address_claim_round_trip() {
        let original = IsoAddressClaim {
            info: info_for(60928),
            unique_number: Some(123456),
            manufacturer_code: ManufacturerCode::Garmin,
            device_instance_lower: Some(0),
            device_instance_upper: Some(1),
            device_function: Some(130),
            device_class: DeviceClass::Navigation,
            system_instance: Some(0),
            industry_group: IndustryCode::Marine,
            arbitrary_address_capable: YesNo::Yes,
        };
        let mut stream = DataStream::for_write(8);
        original.encode(&mut stream).unwrap();
        let mut back = DataStream::new(stream.get_data().to_vec());
        let decoded = decode_iso_address_claim(original.info, &mut back).unwrap();
        assert_eq!(decoded, PgnMessage::IsoAddressClaim(original));
    }
}
