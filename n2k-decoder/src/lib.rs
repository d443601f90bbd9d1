//! NMEA 2000 Decoder Library
//!
//! Converts between NMEA 2000 bus traffic and strongly-typed messages.
//! The bus carries 29-bit identified CAN frames of 8 payload bytes each;
//! logical messages (PGNs) may span multiple frames using the fast-packet
//! convention, and every PGN has a schema of bit-granular fields with
//! resolution scaling, missing/invalid sentinels, lookups, strings, and
//! repeating groups.
//!
//! # Architecture
//!
//! Inbound, a pipeline is a fixed chain of synchronous stages:
//! - An endpoint replays capture traffic ([`endpoint::RawFileEndpoint`],
//!   [`endpoint::N2kFileEndpoint`]) into a [`pipeline::FrameHandler`]
//! - The adapter decodes frame headers and reassembles fast packets into
//!   complete [`packet::Packet`]s
//! - The catalog resolves each packet to a schema variant and the generated
//!   decoder produces a typed [`pgns::PgnMessage`]
//! - Subscribers receive every value, [`pgns::UnknownPgn`] fallbacks
//!   included, in frame-arrival order
//!
//! Outbound, [`pipeline::Pipeline::write`] encodes a typed value, segments
//! it into frames with rolling sequence ids, and emits them through an
//! [`adapter::FrameSink`].
//!
//! # Example Usage
//!
//! ```no_run
//! use n2k_decoder::endpoint::{CancelToken, RawFileEndpoint};
//! use n2k_decoder::pgns::PositionRapidUpdate;
//! use n2k_decoder::pipeline::Pipeline;
//!
//! let mut pipeline = Pipeline::new();
//! pipeline
//!     .subscribers_mut()
//!     .subscribe_to::<PositionRapidUpdate>(|position| {
//!         println!("lat {:?} lon {:?}", position.latitude, position.longitude);
//!     });
//!
//! let endpoint = RawFileEndpoint::new("capture.raw");
//! endpoint.run(&mut pipeline, &CancelToken::new()).unwrap();
//! ```

// Public modules
pub mod adapter;
pub mod catalog;
pub mod converter;
pub mod endpoint;
pub mod packet;
pub mod pgns;
pub mod pipeline;
pub mod reassembly;
pub mod stream;
pub mod subscribe;
pub mod types;

// Re-export the types most callers need
pub use adapter::{CanAdapter, FrameSink};
pub use packet::Packet;
pub use pgns::{PgnMessage, PgnStruct, UnknownPgn};
pub use pipeline::{FrameHandler, Pipeline};
pub use stream::DataStream;
pub use subscribe::{SubscriberRegistry, Subscription};
pub use types::{Frame, MessageInfo, N2kError, Result, Timestamp, MAX_PGN_LENGTH};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: the catalog loads and a pipeline can be built
        let stats = catalog::stats();
        assert!(stats.num_pgns > 0);
        let pipeline = Pipeline::new();
        drop(pipeline);
    }
}
