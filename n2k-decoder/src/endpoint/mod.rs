//! Capture-file endpoints
//!
//! Endpoints sit at the pipeline's I/O boundaries: readers replay capture
//! files into a [`crate::pipeline::FrameHandler`], writers implement
//! [`crate::adapter::FrameSink`] for outbound traffic. Every `run` threads a
//! [`CancelToken`]; cancellation stops the endpoint at the next frame
//! boundary.

pub mod n2kbin;
pub mod raw;

pub use n2kbin::{N2kFileEndpoint, N2kWriter};
pub use raw::{RawFileEndpoint, RawWriter};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Clonable cancellation flag threaded through endpoint `run` operations
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; running endpoints stop at the next frame
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
