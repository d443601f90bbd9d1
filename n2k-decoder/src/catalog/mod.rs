//! PGN catalog: schema descriptors and lookup tables
//!
//! The catalog is built once from the generated schema tables in
//! [`crate::pgns::registry`] and is read-only afterwards, so any pipeline may
//! consult it concurrently. Two tables are kept, mirroring the canonical
//! database: PGNs observed in sample captures, and PGNs documented but never
//! observed ("unseen"). The distinction survives into
//! [`crate::pgns::UnknownPgn::was_unseen`].

pub mod lookups;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::pgns::{registry, PgnMessage};
use crate::stream::DataStream;
use crate::types::{MessageInfo, N2kError, Result};
use lookups::{IndustryCode, ManufacturerCode};

/// Decode entry point of one schema variant
pub type DecodeFn = fn(MessageInfo, &mut DataStream) -> Result<PgnMessage>;

/// Canboat-derived semantic tag of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Number,
    Lookup,
    BitLookup,
    StringFix,
    StringLau,
    Binary,
    Variable,
    Reserved,
    Spare,
    Mmsi,
    Decimal,
    Date,
    Time,
    Pgn,
}

/// Descriptor for a single field of a PGN variant
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// 1-based position in the field list
    pub order: u8,
    pub id: &'static str,
    /// Bit offset from the start of the payload (first iteration, for
    /// repeating fields)
    pub bit_offset: u32,
    /// Field width in bits; 0 for variable-width fields
    pub bit_length: u16,
    pub signed: bool,
    pub resolution: f64,
    /// Additive offset applied after scaling
    pub offset: i64,
    /// Constant this field must equal for the variant to apply; -1 = none
    pub match_value: i64,
    /// Representable engineering-unit range
    pub range_min: f64,
    pub range_max: f64,
    /// Domain limits narrower than the representable range, when distinct
    pub domain: Option<(f64, f64)>,
    pub field_type: FieldType,
    pub unit: Option<&'static str>,
    pub bit_length_variable: bool,
}

/// Template descriptor the generated tables build on
pub const BASE_FIELD: FieldDescriptor = FieldDescriptor {
    order: 0,
    id: "",
    bit_offset: 0,
    bit_length: 0,
    signed: false,
    resolution: 1.0,
    offset: 0,
    match_value: -1,
    range_min: 0.0,
    range_max: 0.0,
    domain: None,
    field_type: FieldType::Number,
    unit: None,
    bit_length_variable: false,
};

/// One repeating field group within a schema
#[derive(Debug, Clone, Copy)]
pub struct RepeatingGroup {
    /// 1-based order of the first field in the group
    pub start_field: u8,
    /// Number of consecutive fields repeated per iteration
    pub field_count: u8,
    /// 1-based order of the count-bearing field; 0 when the repetition
    /// count is determined by the payload length
    pub count_field: u8,
}

/// One PGN schema variant
#[derive(Debug)]
pub struct PgnInfo {
    pub pgn: u32,
    /// Type name of the decoded struct
    pub id: &'static str,
    /// Fast-packet (multi-frame) vs single-frame transmission
    pub fast: bool,
    /// Manufacturer selector for proprietary variants
    pub manufacturer: Option<ManufacturerCode>,
    pub fields: &'static [FieldDescriptor],
    pub repeating1: Option<RepeatingGroup>,
    pub repeating2: Option<RepeatingGroup>,
    pub decoder: DecodeFn,
}

static PGN_LOOKUP: Lazy<HashMap<u32, Vec<&'static PgnInfo>>> = Lazy::new(|| {
    let mut map: HashMap<u32, Vec<&'static PgnInfo>> = HashMap::new();
    for info in registry::PGN_LIST {
        map.entry(info.pgn).or_default().push(info);
    }
    map
});

static UNSEEN_LOOKUP: Lazy<HashMap<u32, Vec<&'static PgnInfo>>> = Lazy::new(|| {
    let mut map: HashMap<u32, Vec<&'static PgnInfo>> = HashMap::new();
    for info in registry::UNSEEN_LIST {
        map.entry(info.pgn).or_default().push(info);
    }
    map
});

/// All schema variants registered for a PGN
pub fn variants(pgn: u32) -> Option<&'static [&'static PgnInfo]> {
    PGN_LOOKUP.get(&pgn).map(|v| v.as_slice())
}

/// Whether the PGN uses fast-packet transmission
pub fn is_fast(pgn: u32) -> bool {
    PGN_LOOKUP
        .get(&pgn)
        .and_then(|v| v.first())
        .map(|info| info.fast)
        .unwrap_or(false)
}

/// Whether the PGN is documented but was never observed in sample captures
pub fn in_unseen_list(pgn: u32) -> bool {
    UNSEEN_LOOKUP.contains_key(&pgn)
}

/// Unseen-table variants for a PGN
pub fn unseen_variants(pgn: u32) -> Option<&'static [&'static PgnInfo]> {
    UNSEEN_LOOKUP.get(&pgn).map(|v| v.as_slice())
}

/// Whether the PGN falls in one of the four manufacturer-proprietary ranges
pub fn is_proprietary_pgn(pgn: u32) -> bool {
    matches!(pgn,
        // PDU1 single-frame (addressed)
        0x0EF00..=0x0EFFF
        // PDU2 single-frame (broadcast)
        | 0x0FF00..=0x0FFFF
        // PDU1 fast-packet (addressed)
        | 0x1EF00..=0x1EFFF
        // PDU2 fast-packet (broadcast)
        | 0x1FF00..=0x1FFFF)
}

/// Extract the manufacturer and industry codes that prefix every
/// proprietary payload: 11-bit manufacturer, 2 reserved bits, 3-bit industry
pub fn proprietary_info(data: &[u8]) -> Result<(ManufacturerCode, IndustryCode)> {
    let mut stream = DataStream::new(data.to_vec());
    let manufacturer = ManufacturerCode::from_raw(stream.read_lookup(11)?);
    stream.skip(2)?;
    let industry = IndustryCode::from_raw(stream.read_lookup(3)?);
    Ok((manufacturer, industry))
}

/// Field descriptor lookup for diagnostics. `field_index` is 0-based into
/// the variant's field list.
pub fn field_descriptor(
    pgn: u32,
    manufacturer: Option<ManufacturerCode>,
    field_index: usize,
) -> Result<&'static FieldDescriptor> {
    let variants = variants(pgn).ok_or(N2kError::UnknownPgn { pgn })?;
    let info = if !is_proprietary_pgn(pgn) {
        variants[0]
    } else if let Some(code) = manufacturer {
        variants
            .iter()
            .find(|v| v.manufacturer == Some(code))
            .copied()
            .ok_or(N2kError::UnknownPgn { pgn })?
    } else if variants.len() == 1 {
        variants[0]
    } else {
        return Err(N2kError::VariantAmbiguous { pgn });
    };
    info.fields
        .get(field_index)
        .ok_or(N2kError::UnknownPgn { pgn })
}

/// Summary counts over the loaded tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub num_pgns: usize,
    pub num_variants: usize,
    pub num_fields: usize,
    pub num_unseen: usize,
}

/// Statistics over the catalog tables
pub fn stats() -> CatalogStats {
    CatalogStats {
        num_pgns: PGN_LOOKUP.len(),
        num_variants: PGN_LOOKUP.values().map(Vec::len).sum(),
        num_fields: PGN_LOOKUP
            .values()
            .flat_map(|v| v.iter())
            .map(|info| info.fields.len())
            .sum(),
        num_unseen: UNSEEN_LOOKUP.values().map(Vec::len).sum(),
    }
}
