//! Binary capture endpoint
//!
//! The `.n2k` capture format is a flat sequence of 16-byte records: an
//! 8-byte header (little-endian 32-bit CAN identifier, payload length, three
//! reserved bytes) followed by the 8 payload bytes. Fast-packet traffic
//! appears in transmission order, one record per frame.

use std::fs::File;
use std::io::{BufReader, Cursor, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use binrw::{BinRead, BinWrite};
use chrono::Utc;

use crate::adapter::FrameSink;
use crate::endpoint::CancelToken;
use crate::pipeline::FrameHandler;
use crate::types::{Frame, N2kError, Result, Timestamp};

/// Size of one record on disk
const RECORD_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
struct N2kRecord {
    can_id: u32,
    length: u8,
    reserved: [u8; 3],
    payload: [u8; 8],
}

impl N2kRecord {
    fn from_frame(frame: &Frame) -> Self {
        Self {
            can_id: frame.id,
            length: frame.length,
            reserved: [0xFF; 3],
            payload: frame.data,
        }
    }

    fn into_frame(self) -> Frame {
        Frame {
            id: self.can_id & 0x1FFF_FFFF,
            length: self.length.clamp(1, 8),
            data: self.payload,
        }
    }
}

/// Replays a binary capture file into a frame handler
pub struct N2kFileEndpoint {
    path: PathBuf,
}

impl N2kFileEndpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read records until end of file, pushing each frame downstream
    ///
    /// Records carry no timestamps, so frames are stamped at replay time.
    pub fn run(&self, handler: &mut dyn FrameHandler, cancel: &CancelToken) -> Result<()> {
        let file = File::open(&self.path)?;
        let mut reader = BufReader::new(file);
        log::info!("starting n2k capture playback: {}", self.path.display());

        let mut buffer = [0u8; RECORD_LEN];
        loop {
            if cancel.is_cancelled() {
                log::info!("n2k capture playback cancelled");
                break;
            }
            match reader.read_exact(&mut buffer) {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::UnexpectedEof => break,
                Err(err) => return Err(err.into()),
            }
            let record = N2kRecord::read(&mut Cursor::new(&buffer)).map_err(|err| {
                N2kError::MalformedRawRecord(format!("bad n2k record: {err}"))
            })?;
            handler.handle_frame(Utc::now(), record.into_frame());
        }

        log::info!("n2k capture playback complete");
        Ok(())
    }
}

/// Writes outbound frames as binary capture records
pub struct N2kWriter<W: Write + std::io::Seek> {
    out: W,
}

impl N2kWriter<std::io::BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(std::io::BufWriter::new(file)))
    }
}

impl<W: Write + std::io::Seek> N2kWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + std::io::Seek> FrameSink for N2kWriter<W> {
    fn write_frame(&mut self, _timestamp: Timestamp, frame: Frame) -> Result<()> {
        N2kRecord::from_frame(&frame)
            .write(&mut self.out)
            .map_err(|err| N2kError::Io(err.to_string()))
    }
}
