//! Lookup enumerations from the canonical PGN database
//!
//! Wire values outside the table are preserved in an `Unknown` variant so a
//! decode/encode round trip reproduces the original bits. Only the subset of
//! lookups referenced by the implemented schemas is carried here.

macro_rules! lookup {
    ($(#[$meta:meta])* $name:ident: $raw:ty { $($variant:ident = $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
            /// Wire value with no entry in the lookup table
            Unknown($raw),
        }

        impl $name {
            pub fn from_raw(raw: u64) -> Self {
                match raw {
                    $($value => Self::$variant,)+
                    other => Self::Unknown(other as $raw),
                }
            }

            pub fn raw(self) -> u64 {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Unknown(raw) => raw as u64,
                }
            }
        }
    };
}

lookup! {
    /// NMEA-registered manufacturer codes (11 bits on the wire)
    ManufacturerCode: u16 {
        Airmar = 135,
        Maretron = 137,
        Lowrance = 140,
        Garmin = 229,
        Navico = 275,
        BAndG = 381,
        Raymarine = 1851,
        Furuno = 1855,
        Simrad = 1857,
    }
}

lookup! {
    /// ISO 11783 industry group (3 bits)
    IndustryCode: u8 {
        Global = 0,
        Highway = 1,
        Agriculture = 2,
        Construction = 3,
        Marine = 4,
        Industrial = 5,
    }
}

lookup! {
    DirectionReference: u8 {
        True = 0,
        Magnetic = 1,
        Error = 2,
    }
}

lookup! {
    WindReference: u8 {
        TrueNorth = 0,
        Magnetic = 1,
        Apparent = 2,
        TrueBoat = 3,
        TrueWater = 4,
    }
}

lookup! {
    OffOn: u8 {
        Off = 0,
        On = 1,
    }
}

lookup! {
    YesNo: u8 {
        No = 0,
        Yes = 1,
    }
}

lookup! {
    MobStatus: u8 {
        MobEmitterActivated = 0,
        ManualOnBoardMobButtonActivation = 1,
        TestMode = 2,
        MobNotActive = 3,
    }
}

lookup! {
    MobPositionSource: u8 {
        PositionEstimatedByVessel = 0,
        PositionReportedByMobEmitter = 1,
    }
}

lookup! {
    LowBattery: u8 {
        Good = 0,
        Low = 1,
    }
}

lookup! {
    RepeatIndicator: u8 {
        Initial = 0,
        FirstRetransmission = 1,
        SecondRetransmission = 2,
        FinalRetransmission = 3,
    }
}

lookup! {
    SatelliteStatus: u8 {
        NotTracked = 0,
        Tracked = 1,
        Used = 2,
        NotTrackedDiff = 3,
        TrackedDiff = 4,
        UsedDiff = 5,
    }
}

lookup! {
    RangeResidualMode: u8 {
        Autonomous = 0,
        DifferentialEnhanced = 1,
        Estimated = 2,
        Simulator = 3,
        Manual = 4,
    }
}

lookup! {
    AisTransceiver: u8 {
        ChannelAVdlReception = 0,
        ChannelBVdlReception = 1,
        ChannelAVdlTransmission = 2,
        ChannelBVdlTransmission = 3,
        OwnInformationNotBroadcast = 4,
    }
}

lookup! {
    DeviceClass: u8 {
        ReservedFor2000Use = 0,
        SystemTools = 10,
        SafetySystems = 20,
        Internetwork = 25,
        ElectricalDistribution = 30,
        ElectricalGeneration = 35,
        SteeringAndControl = 40,
        Propulsion = 50,
        Navigation = 60,
        Communication = 70,
        SensorCommunicationInterface = 75,
        InstrumentationGeneral = 80,
        ExternalEnvironment = 85,
        InternalEnvironment = 90,
        DeckCargoFishing = 100,
        Display = 120,
        Entertainment = 125,
    }
}
