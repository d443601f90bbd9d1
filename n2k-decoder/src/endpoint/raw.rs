//! RAW text capture endpoint and writer
//!
//! One record per line: `timestamp,priority,pgn,source,target,length,b0..b7`
//! with an ISO-8601 timestamp and two-digit lowercase hex payload bytes.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::adapter::FrameSink;
use crate::converter;
use crate::endpoint::CancelToken;
use crate::pipeline::FrameHandler;
use crate::types::{Frame, Result, Timestamp};

/// Replays a RAW capture file into a frame handler
pub struct RawFileEndpoint {
    path: PathBuf,
}

impl RawFileEndpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the capture line by line, pushing each frame downstream
    ///
    /// Malformed lines are logged and skipped; I/O errors terminate the run.
    /// Cancellation stops the replay at the next frame boundary.
    pub fn run(&self, handler: &mut dyn FrameHandler, cancel: &CancelToken) -> Result<()> {
        let file = File::open(&self.path)?;
        log::info!("starting raw file playback: {}", self.path.display());

        for line in BufReader::new(file).lines() {
            if cancel.is_cancelled() {
                log::info!("raw file playback cancelled");
                break;
            }
            let line = line?;
            if line.is_empty() {
                continue;
            }
            match converter::frame_from_raw(&line) {
                Ok(record) => handler.handle_frame(record.timestamp, record.frame),
                Err(err) => log::warn!("skipping raw record: {err}"),
            }
        }

        log::info!("raw file playback complete");
        Ok(())
    }
}

/// Writes outbound frames as RAW capture lines
pub struct RawWriter<W: Write> {
    out: W,
}

impl RawWriter<std::io::BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(std::io::BufWriter::new(file)))
    }
}

impl<W: Write> RawWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for RawWriter<W> {
    fn write_frame(&mut self, timestamp: Timestamp, frame: Frame) -> Result<()> {
        let line = converter::raw_from_frame(timestamp, &frame);
        self.out.write_all(line.as_bytes())?;
        Ok(())
    }
}
