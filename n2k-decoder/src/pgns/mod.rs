//! Typed PGN messages and their wire codecs
//!
//! Every schema variant in the catalog has a struct here plus a decode
//! function and a [`PgnStruct`] encode implementation, all walking the field
//! list in declared order. The [`PgnMessage`] sum type is what the pipeline
//! hands to subscribers; [`UnknownPgn`] is the first-class fallback for
//! traffic no variant covers.
//!
//! The structs and codec bodies follow the generated tables in [`registry`]
//! field for field; when adding a schema, keep the two in lockstep.

pub mod proprietary;
pub mod registry;
pub mod standard;

pub use proprietary::{
    BAndGKeyValueData, FurunoHeave, MaretronAnnunciator, MaretronTemperatureHighRange,
};
pub use standard::{
    AisClassBStaticDataPartA, BinarySwitchBankStatus, CogSogRapidUpdate,
    ConfigurationInformation, GnssSatsInView, IsoAddressClaim, IsoRequest,
    ManOverboardNotification, PositionRapidUpdate, Satellite, VesselHeading, WindData,
};

use crate::catalog::lookups::{IndustryCode, ManufacturerCode};
use crate::stream::DataStream;
use crate::types::{MessageInfo, N2kError, Result};

/// A value that can write itself in the NMEA 2000 wire format
pub trait PgnStruct {
    /// Serialize into `stream` and return the message context to send with
    fn encode(&self, stream: &mut DataStream) -> Result<MessageInfo>;
}

/// Recover a typed reference from the [`PgnMessage`] sum type
///
/// Implemented by every PGN struct; this is what typed subscriptions key on.
pub trait FromPgnMessage: Sized {
    fn from_message(msg: &PgnMessage) -> Option<&Self>;
}

/// Fallback for traffic the catalog cannot decode
///
/// Published through the normal subscriber path so diagnostic consumers see
/// unknown traffic alongside decoded values.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownPgn {
    pub info: MessageInfo,
    pub data: Vec<u8>,
    /// Extracted from the payload prefix when the PGN is proprietary
    pub manufacturer_code: Option<ManufacturerCode>,
    pub industry_code: Option<IndustryCode>,
    /// Why decoding was not possible
    pub reason: Option<N2kError>,
    /// The PGN is in the database but was never observed in sample captures
    pub was_unseen: bool,
}

/// Every decoded message the pipeline can publish
#[derive(Debug, Clone, PartialEq)]
pub enum PgnMessage {
    IsoRequest(IsoRequest),
    IsoAddressClaim(IsoAddressClaim),
    VesselHeading(VesselHeading),
    BinarySwitchBankStatus(BinarySwitchBankStatus),
    PositionRapidUpdate(PositionRapidUpdate),
    CogSogRapidUpdate(CogSogRapidUpdate),
    GnssSatsInView(GnssSatsInView),
    ManOverboardNotification(ManOverboardNotification),
    AisClassBStaticDataPartA(AisClassBStaticDataPartA),
    ConfigurationInformation(ConfigurationInformation),
    WindData(WindData),
    BAndGKeyValueData(BAndGKeyValueData),
    MaretronAnnunciator(MaretronAnnunciator),
    FurunoHeave(FurunoHeave),
    MaretronTemperatureHighRange(MaretronTemperatureHighRange),
    Unknown(UnknownPgn),
}

macro_rules! for_each_variant {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            PgnMessage::IsoRequest($inner) => $body,
            PgnMessage::IsoAddressClaim($inner) => $body,
            PgnMessage::VesselHeading($inner) => $body,
            PgnMessage::BinarySwitchBankStatus($inner) => $body,
            PgnMessage::PositionRapidUpdate($inner) => $body,
            PgnMessage::CogSogRapidUpdate($inner) => $body,
            PgnMessage::GnssSatsInView($inner) => $body,
            PgnMessage::ManOverboardNotification($inner) => $body,
            PgnMessage::AisClassBStaticDataPartA($inner) => $body,
            PgnMessage::ConfigurationInformation($inner) => $body,
            PgnMessage::WindData($inner) => $body,
            PgnMessage::BAndGKeyValueData($inner) => $body,
            PgnMessage::MaretronAnnunciator($inner) => $body,
            PgnMessage::FurunoHeave($inner) => $body,
            PgnMessage::MaretronTemperatureHighRange($inner) => $body,
            PgnMessage::Unknown($inner) => $body,
        }
    };
}

impl PgnMessage {
    /// The message context the value was decoded with (or will be sent with)
    pub fn info(&self) -> &MessageInfo {
        for_each_variant!(self, inner => &inner.info)
    }

    /// Schema identifier, matching [`crate::catalog::PgnInfo::id`]
    pub fn name(&self) -> &'static str {
        match self {
            PgnMessage::IsoRequest(_) => "IsoRequest",
            PgnMessage::IsoAddressClaim(_) => "IsoAddressClaim",
            PgnMessage::VesselHeading(_) => "VesselHeading",
            PgnMessage::BinarySwitchBankStatus(_) => "BinarySwitchBankStatus",
            PgnMessage::PositionRapidUpdate(_) => "PositionRapidUpdate",
            PgnMessage::CogSogRapidUpdate(_) => "CogSogRapidUpdate",
            PgnMessage::GnssSatsInView(_) => "GnssSatsInView",
            PgnMessage::ManOverboardNotification(_) => "ManOverboardNotification",
            PgnMessage::AisClassBStaticDataPartA(_) => "AisClassBStaticDataPartA",
            PgnMessage::ConfigurationInformation(_) => "ConfigurationInformation",
            PgnMessage::WindData(_) => "WindData",
            PgnMessage::BAndGKeyValueData(_) => "BAndGKeyValueData",
            PgnMessage::MaretronAnnunciator(_) => "MaretronAnnunciator",
            PgnMessage::FurunoHeave(_) => "FurunoHeave",
            PgnMessage::MaretronTemperatureHighRange(_) => "MaretronTemperatureHighRange",
            PgnMessage::Unknown(_) => "UnknownPgn",
        }
    }

    /// Serialize the message in wire format
    ///
    /// [`UnknownPgn`] values cannot be re-emitted; attempting to returns the
    /// error that produced them in the first place.
    pub fn encode(&self, stream: &mut DataStream) -> Result<MessageInfo> {
        match self {
            PgnMessage::IsoRequest(v) => v.encode(stream),
            PgnMessage::IsoAddressClaim(v) => v.encode(stream),
            PgnMessage::VesselHeading(v) => v.encode(stream),
            PgnMessage::BinarySwitchBankStatus(v) => v.encode(stream),
            PgnMessage::PositionRapidUpdate(v) => v.encode(stream),
            PgnMessage::CogSogRapidUpdate(v) => v.encode(stream),
            PgnMessage::GnssSatsInView(v) => v.encode(stream),
            PgnMessage::ManOverboardNotification(v) => v.encode(stream),
            PgnMessage::AisClassBStaticDataPartA(v) => v.encode(stream),
            PgnMessage::ConfigurationInformation(v) => v.encode(stream),
            PgnMessage::WindData(v) => v.encode(stream),
            PgnMessage::BAndGKeyValueData(v) => v.encode(stream),
            PgnMessage::MaretronAnnunciator(v) => v.encode(stream),
            PgnMessage::FurunoHeave(v) => v.encode(stream),
            PgnMessage::MaretronTemperatureHighRange(v) => v.encode(stream),
            PgnMessage::Unknown(unknown) => Err(unknown.reason.clone().unwrap_or(
                N2kError::UnknownPgn {
                    pgn: unknown.info.pgn,
                },
            )),
        }
    }
}

macro_rules! from_pgn_message {
    ($($struct_name:ident),+ $(,)?) => {
        $(
            impl FromPgnMessage for $struct_name {
                fn from_message(msg: &PgnMessage) -> Option<&Self> {
                    match msg {
                        PgnMessage::$struct_name(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )+
    };
}

from_pgn_message!(
    IsoRequest,
    IsoAddressClaim,
    VesselHeading,
    BinarySwitchBankStatus,
    PositionRapidUpdate,
    CogSogRapidUpdate,
    GnssSatsInView,
    ManOverboardNotification,
    AisClassBStaticDataPartA,
    ConfigurationInformation,
    WindData,
    BAndGKeyValueData,
    MaretronAnnunciator,
    FurunoHeave,
    MaretronTemperatureHighRange,
);

impl FromPgnMessage for UnknownPgn {
    fn from_message(msg: &PgnMessage) -> Option<&Self> {
        match msg {
            PgnMessage::Unknown(inner) => Some(inner),
            _ => None,
        }
    }
}
