//! Pipeline composition
//!
//! One pipeline owns one fixed inbound chain: adapter, decoder, subscriber
//! fan-out. An endpoint drives it by pushing frames through
//! [`FrameHandler::handle_frame`]; every stage runs to completion before the
//! next frame is taken, so subscribers observe messages in the order their
//! final frame arrived. The outbound entry point is [`Pipeline::write`].
//!
//! Pipelines share nothing: run several in parallel by giving each its own
//! instance.

use chrono::Utc;

use crate::adapter::{CanAdapter, FrameSink};
use crate::pgns::PgnMessage;
use crate::stream::DataStream;
use crate::subscribe::SubscriberRegistry;
use crate::types::{Frame, Result, Timestamp, MAX_PGN_LENGTH};

/// Inbound edge: anything a frame source can push frames into
pub trait FrameHandler {
    fn handle_frame(&mut self, timestamp: Timestamp, frame: Frame);
}

/// The fixed inbound chain plus the outbound encoder path
pub struct Pipeline {
    adapter: CanAdapter,
    subscribers: SubscriberRegistry,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            adapter: CanAdapter::new(),
            subscribers: SubscriberRegistry::new(),
        }
    }

    /// Access the subscriber registry to add or cancel consumers
    pub fn subscribers_mut(&mut self) -> &mut SubscriberRegistry {
        &mut self.subscribers
    }

    /// Assign the endpoint that receives outbound frames
    pub fn set_writer(&mut self, sink: Box<dyn FrameSink>) {
        self.adapter.set_writer(sink);
    }

    /// Discard in-flight reassembly state (cancellation)
    pub fn reset(&mut self) {
        self.adapter.reset();
    }

    /// Encode a typed value and emit it through the configured frame sink
    ///
    /// Encode-time failures are returned to the caller and nothing is
    /// emitted. Values without a meaningful timestamp are stamped with the
    /// current time.
    pub fn write(&mut self, message: &PgnMessage) -> Result<()> {
        let mut stream = DataStream::for_write(MAX_PGN_LENGTH);
        let mut info = message.encode(&mut stream)?;
        if info.timestamp == chrono::DateTime::<Utc>::MIN_UTC {
            info.timestamp = Utc::now();
        }
        self.adapter.write_pgn(info, stream.get_data())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHandler for Pipeline {
    fn handle_frame(&mut self, timestamp: Timestamp, frame: Frame) {
        if let Some(packet) = self.adapter.handle_frame(timestamp, frame) {
            let message = packet.into_message();
            log::trace!(
                "dispatching {} from {}",
                message.name(),
                message.info().source
            );
            self.subscribers.serve(&message);
        }
    }
}
