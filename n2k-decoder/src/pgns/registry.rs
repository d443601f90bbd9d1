//! Generated schema tables
//!
//! One [`PgnInfo`] record per schema variant, each carrying the ordered
//! field descriptor list the decoder runtime and the match filter consult.
//! Field offsets and widths here must agree with the codec bodies in
//! [`super::standard`] and [`super::proprietary`].

use crate::catalog::lookups::ManufacturerCode;
use crate::catalog::{FieldDescriptor, FieldType, PgnInfo, RepeatingGroup, BASE_FIELD};

use super::{proprietary, standard};

const fn lookup_field(
    order: u8,
    id: &'static str,
    bit_offset: u32,
    bit_length: u16,
) -> FieldDescriptor {
    FieldDescriptor {
        order,
        id,
        bit_offset,
        bit_length,
        field_type: FieldType::Lookup,
        ..BASE_FIELD
    }
}

const fn number_field(
    order: u8,
    id: &'static str,
    bit_offset: u32,
    bit_length: u16,
    signed: bool,
) -> FieldDescriptor {
    FieldDescriptor {
        order,
        id,
        bit_offset,
        bit_length,
        signed,
        ..BASE_FIELD
    }
}

const fn reserved_field(order: u8, bit_offset: u32, bit_length: u16) -> FieldDescriptor {
    FieldDescriptor {
        order,
        id: "reserved",
        bit_offset,
        bit_length,
        field_type: FieldType::Reserved,
        ..BASE_FIELD
    }
}

const fn match_field(
    order: u8,
    id: &'static str,
    bit_offset: u32,
    bit_length: u16,
    match_value: i64,
) -> FieldDescriptor {
    FieldDescriptor {
        order,
        id,
        bit_offset,
        bit_length,
        match_value,
        field_type: FieldType::Lookup,
        ..BASE_FIELD
    }
}

static ISO_REQUEST_FIELDS: [FieldDescriptor; 1] = [FieldDescriptor {
    order: 1,
    id: "pgn",
    bit_offset: 0,
    bit_length: 24,
    field_type: FieldType::Pgn,
    range_max: 16777213.0,
    ..BASE_FIELD
}];

static ISO_ADDRESS_CLAIM_FIELDS: [FieldDescriptor; 10] = [
    number_field(1, "unique_number", 0, 21, false),
    lookup_field(2, "manufacturer_code", 21, 11),
    number_field(3, "device_instance_lower", 32, 3, false),
    number_field(4, "device_instance_upper", 35, 5, false),
    number_field(5, "device_function", 40, 8, false),
    FieldDescriptor {
        order: 6,
        id: "spare",
        bit_offset: 48,
        bit_length: 1,
        field_type: FieldType::Spare,
        ..BASE_FIELD
    },
    lookup_field(7, "device_class", 49, 7),
    number_field(8, "system_instance", 56, 4, false),
    lookup_field(9, "industry_group", 60, 3),
    lookup_field(10, "arbitrary_address_capable", 63, 1),
];

static VESSEL_HEADING_FIELDS: [FieldDescriptor; 6] = [
    number_field(1, "sid", 0, 8, false),
    FieldDescriptor {
        order: 2,
        id: "heading",
        bit_offset: 8,
        bit_length: 16,
        resolution: 0.0001,
        range_max: 6.5533,
        unit: Some("rad"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 3,
        id: "deviation",
        bit_offset: 24,
        bit_length: 16,
        signed: true,
        resolution: 0.0001,
        range_min: -3.2768,
        range_max: 3.2765,
        unit: Some("rad"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 4,
        id: "variation",
        bit_offset: 40,
        bit_length: 16,
        signed: true,
        resolution: 0.0001,
        range_min: -3.2768,
        range_max: 3.2765,
        unit: Some("rad"),
        ..BASE_FIELD
    },
    lookup_field(5, "reference", 56, 2),
    reserved_field(6, 58, 6),
];

static BINARY_SWITCH_BANK_STATUS_FIELDS: [FieldDescriptor; 2] = [
    number_field(1, "instance", 0, 8, false),
    lookup_field(2, "indicator", 8, 2),
];

static POSITION_RAPID_UPDATE_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor {
        order: 1,
        id: "latitude",
        bit_offset: 0,
        bit_length: 32,
        signed: true,
        resolution: 1e-7,
        range_min: -90.0,
        range_max: 90.0,
        domain: Some((-90.0, 90.0)),
        unit: Some("deg"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 2,
        id: "longitude",
        bit_offset: 32,
        bit_length: 32,
        signed: true,
        resolution: 1e-7,
        range_min: -180.0,
        range_max: 180.0,
        domain: Some((-180.0, 180.0)),
        unit: Some("deg"),
        ..BASE_FIELD
    },
];

static COG_SOG_RAPID_UPDATE_FIELDS: [FieldDescriptor; 6] = [
    number_field(1, "sid", 0, 8, false),
    lookup_field(2, "cog_reference", 8, 2),
    reserved_field(3, 10, 6),
    FieldDescriptor {
        order: 4,
        id: "cog",
        bit_offset: 16,
        bit_length: 16,
        resolution: 0.0001,
        range_max: 6.5533,
        unit: Some("rad"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 5,
        id: "sog",
        bit_offset: 32,
        bit_length: 16,
        resolution: 0.01,
        range_max: 655.33,
        unit: Some("m/s"),
        ..BASE_FIELD
    },
    reserved_field(6, 48, 16),
];

static GNSS_SATS_IN_VIEW_FIELDS: [FieldDescriptor; 11] = [
    number_field(1, "sid", 0, 8, false),
    lookup_field(2, "range_residual_mode", 8, 2),
    reserved_field(3, 10, 6),
    number_field(4, "sats_in_view", 16, 8, false),
    number_field(5, "prn", 24, 8, false),
    FieldDescriptor {
        order: 6,
        id: "elevation",
        bit_offset: 32,
        bit_length: 16,
        signed: true,
        resolution: 0.0001,
        range_min: -3.2768,
        range_max: 3.2765,
        unit: Some("rad"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 7,
        id: "azimuth",
        bit_offset: 48,
        bit_length: 16,
        resolution: 0.0001,
        range_max: 6.5533,
        unit: Some("rad"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 8,
        id: "snr",
        bit_offset: 64,
        bit_length: 16,
        resolution: 0.01,
        range_max: 655.33,
        unit: Some("dB"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 9,
        id: "range_residuals",
        bit_offset: 80,
        bit_length: 32,
        signed: true,
        resolution: 1e-5,
        range_min: -21474.83648,
        range_max: 21474.83645,
        unit: Some("m"),
        ..BASE_FIELD
    },
    lookup_field(10, "status", 112, 4),
    reserved_field(11, 116, 4),
];

static MAN_OVERBOARD_NOTIFICATION_FIELDS: [FieldDescriptor; 18] = [
    number_field(1, "sid", 0, 8, false),
    number_field(2, "mob_emitter_id", 8, 32, false),
    lookup_field(3, "mob_status", 40, 3),
    reserved_field(4, 43, 5),
    FieldDescriptor {
        order: 5,
        id: "activation_time",
        bit_offset: 48,
        bit_length: 32,
        resolution: 0.0001,
        range_max: 86400.0,
        domain: Some((0.0, 86400.0)),
        field_type: FieldType::Time,
        unit: Some("s"),
        ..BASE_FIELD
    },
    lookup_field(6, "position_source", 80, 3),
    reserved_field(7, 83, 5),
    FieldDescriptor {
        order: 8,
        id: "position_date",
        bit_offset: 88,
        bit_length: 16,
        field_type: FieldType::Date,
        range_max: 65533.0,
        unit: Some("d"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 9,
        id: "position_time",
        bit_offset: 104,
        bit_length: 32,
        resolution: 0.0001,
        range_max: 86400.0,
        domain: Some((0.0, 86400.0)),
        field_type: FieldType::Time,
        unit: Some("s"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 10,
        id: "latitude",
        bit_offset: 136,
        bit_length: 32,
        signed: true,
        resolution: 1e-7,
        range_min: -90.0,
        range_max: 90.0,
        domain: Some((-90.0, 90.0)),
        unit: Some("deg"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 11,
        id: "longitude",
        bit_offset: 168,
        bit_length: 32,
        signed: true,
        resolution: 1e-7,
        range_min: -180.0,
        range_max: 180.0,
        domain: Some((-180.0, 180.0)),
        unit: Some("deg"),
        ..BASE_FIELD
    },
    lookup_field(12, "cog_reference", 200, 2),
    reserved_field(13, 202, 6),
    FieldDescriptor {
        order: 14,
        id: "cog",
        bit_offset: 208,
        bit_length: 16,
        resolution: 0.0001,
        range_max: 6.5533,
        unit: Some("rad"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 15,
        id: "sog",
        bit_offset: 224,
        bit_length: 16,
        resolution: 0.01,
        range_max: 655.33,
        unit: Some("m/s"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 16,
        id: "mmsi_of_vessel_of_origin",
        bit_offset: 240,
        bit_length: 32,
        field_type: FieldType::Mmsi,
        range_max: 999999999.0,
        ..BASE_FIELD
    },
    lookup_field(17, "mob_emitter_battery_low_status", 272, 2),
    reserved_field(18, 274, 6),
];

static AIS_CLASS_B_STATIC_DATA_PART_A_FIELDS: [FieldDescriptor; 7] = [
    number_field(1, "message_id", 0, 6, false),
    lookup_field(2, "repeat_indicator", 6, 2),
    FieldDescriptor {
        order: 3,
        id: "user_id",
        bit_offset: 8,
        bit_length: 32,
        field_type: FieldType::Mmsi,
        range_max: 999999999.0,
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 4,
        id: "name",
        bit_offset: 40,
        bit_length: 160,
        field_type: FieldType::StringFix,
        ..BASE_FIELD
    },
    lookup_field(5, "ais_transceiver", 200, 5),
    reserved_field(6, 205, 3),
    number_field(7, "sequence_id", 208, 8, false),
];

static CONFIGURATION_INFORMATION_FIELDS: [FieldDescriptor; 3] = [
    FieldDescriptor {
        order: 1,
        id: "installation_description_1",
        field_type: FieldType::StringLau,
        bit_length_variable: true,
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 2,
        id: "installation_description_2",
        field_type: FieldType::StringLau,
        bit_length_variable: true,
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 3,
        id: "manufacturer_information",
        field_type: FieldType::StringLau,
        bit_length_variable: true,
        ..BASE_FIELD
    },
];

static WIND_DATA_FIELDS: [FieldDescriptor; 5] = [
    number_field(1, "sid", 0, 8, false),
    FieldDescriptor {
        order: 2,
        id: "wind_speed",
        bit_offset: 8,
        bit_length: 16,
        resolution: 0.01,
        range_max: 655.33,
        unit: Some("m/s"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 3,
        id: "wind_angle",
        bit_offset: 24,
        bit_length: 16,
        resolution: 0.0001,
        range_max: 6.5533,
        unit: Some("rad"),
        ..BASE_FIELD
    },
    lookup_field(4, "reference", 40, 3),
    reserved_field(5, 43, 21),
];

static BANDG_KEY_VALUE_DATA_FIELDS: [FieldDescriptor; 4] = [
    match_field(1, "manufacturer_code", 0, 11, 381),
    reserved_field(2, 11, 2),
    match_field(3, "industry_code", 13, 3, 4),
    FieldDescriptor {
        order: 4,
        id: "data",
        bit_offset: 16,
        field_type: FieldType::Binary,
        bit_length_variable: true,
        ..BASE_FIELD
    },
];

static MARETRON_ANNUNCIATOR_FIELDS: [FieldDescriptor; 8] = [
    match_field(1, "manufacturer_code", 0, 11, 137),
    reserved_field(2, 11, 2),
    match_field(3, "industry_code", 13, 3, 4),
    number_field(4, "field_4", 16, 8, false),
    number_field(5, "field_5", 24, 8, false),
    number_field(6, "field_6", 32, 16, false),
    number_field(7, "field_7", 48, 16, false),
    number_field(8, "field_8", 64, 16, false),
];

static FURUNO_HEAVE_FIELDS: [FieldDescriptor; 5] = [
    match_field(1, "manufacturer_code", 0, 11, 1855),
    reserved_field(2, 11, 2),
    match_field(3, "industry_code", 13, 3, 4),
    FieldDescriptor {
        order: 4,
        id: "heave",
        bit_offset: 16,
        bit_length: 16,
        signed: true,
        resolution: 0.001,
        range_min: -32.768,
        range_max: 32.765,
        unit: Some("m"),
        ..BASE_FIELD
    },
    reserved_field(5, 32, 16),
];

static MARETRON_TEMPERATURE_HIGH_RANGE_FIELDS: [FieldDescriptor; 8] = [
    match_field(1, "manufacturer_code", 0, 11, 137),
    reserved_field(2, 11, 2),
    match_field(3, "industry_code", 13, 3, 4),
    number_field(4, "sid", 16, 8, false),
    number_field(5, "instance", 24, 8, false),
    number_field(6, "source", 32, 8, false),
    FieldDescriptor {
        order: 7,
        id: "actual_temperature",
        bit_offset: 40,
        bit_length: 16,
        resolution: 0.1,
        range_max: 6553.3,
        unit: Some("K"),
        ..BASE_FIELD
    },
    FieldDescriptor {
        order: 8,
        id: "set_temperature",
        bit_offset: 56,
        bit_length: 16,
        resolution: 0.1,
        range_max: 6553.3,
        unit: Some("K"),
        ..BASE_FIELD
    },
];

/// Schema variants observed in sample captures
pub static PGN_LIST: &[PgnInfo] = &[
    PgnInfo {
        pgn: 59904,
        id: "IsoRequest",
        fast: false,
        manufacturer: None,
        fields: &ISO_REQUEST_FIELDS,
        repeating1: None,
        repeating2: None,
        decoder: standard::decode_iso_request,
    },
    PgnInfo {
        pgn: 60928,
        id: "IsoAddressClaim",
        fast: false,
        manufacturer: None,
        fields: &ISO_ADDRESS_CLAIM_FIELDS,
        repeating1: None,
        repeating2: None,
        decoder: standard::decode_iso_address_claim,
    },
    PgnInfo {
        pgn: 127250,
        id: "VesselHeading",
        fast: false,
        manufacturer: None,
        fields: &VESSEL_HEADING_FIELDS,
        repeating1: None,
        repeating2: None,
        decoder: standard::decode_vessel_heading,
    },
    PgnInfo {
        pgn: 127501,
        id: "BinarySwitchBankStatus",
        fast: false,
        manufacturer: None,
        fields: &BINARY_SWITCH_BANK_STATUS_FIELDS,
        repeating1: Some(RepeatingGroup {
            start_field: 2,
            field_count: 1,
            count_field: 0,
        }),
        repeating2: None,
        decoder: standard::decode_binary_switch_bank_status,
    },
    PgnInfo {
        pgn: 129025,
        id: "PositionRapidUpdate",
        fast: false,
        manufacturer: None,
        fields: &POSITION_RAPID_UPDATE_FIELDS,
        repeating1: None,
        repeating2: None,
        decoder: standard::decode_position_rapid_update,
    },
    PgnInfo {
        pgn: 129026,
        id: "CogSogRapidUpdate",
        fast: false,
        manufacturer: None,
        fields: &COG_SOG_RAPID_UPDATE_FIELDS,
        repeating1: None,
        repeating2: None,
        decoder: standard::decode_cog_sog_rapid_update,
    },
    PgnInfo {
        pgn: 129540,
        id: "GnssSatsInView",
        fast: true,
        manufacturer: None,
        fields: &GNSS_SATS_IN_VIEW_FIELDS,
        repeating1: Some(RepeatingGroup {
            start_field: 5,
            field_count: 7,
            count_field: 4,
        }),
        repeating2: None,
        decoder: standard::decode_gnss_sats_in_view,
    },
    PgnInfo {
        pgn: 129702,
        id: "ManOverboardNotification",
        fast: true,
        manufacturer: None,
        fields: &MAN_OVERBOARD_NOTIFICATION_FIELDS,
        repeating1: None,
        repeating2: None,
        decoder: standard::decode_man_overboard_notification,
    },
    PgnInfo {
        pgn: 129809,
        id: "AisClassBStaticDataPartA",
        fast: true,
        manufacturer: None,
        fields: &AIS_CLASS_B_STATIC_DATA_PART_A_FIELDS,
        repeating1: None,
        repeating2: None,
        decoder: standard::decode_ais_class_b_static_data_part_a,
    },
    PgnInfo {
        pgn: 126998,
        id: "ConfigurationInformation",
        fast: true,
        manufacturer: None,
        fields: &CONFIGURATION_INFORMATION_FIELDS,
        repeating1: None,
        repeating2: None,
        decoder: standard::decode_configuration_information,
    },
    PgnInfo {
        pgn: 130306,
        id: "WindData",
        fast: false,
        manufacturer: None,
        fields: &WIND_DATA_FIELDS,
        repeating1: None,
        repeating2: None,
        decoder: standard::decode_wind_data,
    },
    PgnInfo {
        pgn: 130824,
        id: "BAndGKeyValueData",
        fast: true,
        manufacturer: Some(ManufacturerCode::BAndG),
        fields: &BANDG_KEY_VALUE_DATA_FIELDS,
        repeating1: None,
        repeating2: None,
        decoder: proprietary::decode_bandg_key_value_data,
    },
    PgnInfo {
        pgn: 130824,
        id: "MaretronAnnunciator",
        fast: true,
        manufacturer: Some(ManufacturerCode::Maretron),
        fields: &MARETRON_ANNUNCIATOR_FIELDS,
        repeating1: None,
        repeating2: None,
        decoder: proprietary::decode_maretron_annunciator,
    },
    PgnInfo {
        pgn: 65280,
        id: "FurunoHeave",
        fast: false,
        manufacturer: Some(ManufacturerCode::Furuno),
        fields: &FURUNO_HEAVE_FIELDS,
        repeating1: None,
        repeating2: None,
        decoder: proprietary::decode_furuno_heave,
    },
];

/// Schema variants documented in the database but absent from every sample
/// capture; consulted only to classify unknown traffic
pub static UNSEEN_LIST: &[PgnInfo] = &[PgnInfo {
    pgn: 130823,
    id: "MaretronTemperatureHighRange",
    fast: true,
    manufacturer: Some(ManufacturerCode::Maretron),
    fields: &MARETRON_TEMPERATURE_HIGH_RANGE_FIELDS,
    repeating1: None,
    repeating2: None,
    decoder: proprietary::decode_maretron_temperature_high_range,
}];
