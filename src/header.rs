/// Container header and stream registry
///
/// The file opens with a fixed header (signature, version, producer
/// application, comment, creation timestamp, stream count), followed by one
/// stream header per declared stream. Both are parsed exactly once, before
/// any frame is read.

use std::io::Read;

use byteorder::LittleEndian;

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::protocol::{StreamType, SIGNATURE, SUPPORTED_VERSION, TICKS_PER_MILLISECOND};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub version: u8,
    pub application: String,
    pub comment: String,
    /// Creation time in 100 ns ticks since 0001-01-01T00:00:00.
    pub created_at_ticks: i64,
    pub streams_count: u8,
}

impl ContainerHeader {
    pub fn read<R: Read>(cursor: &mut Cursor<R>) -> DecodeResult<Self> {
        let mut signature = [0u8; SIGNATURE.len()];
        cursor.read_exact(&mut signature)?;
        if signature != SIGNATURE {
            return Err(DecodeError::InvalidSignature);
        }

        let version = cursor.read_u8()?;
        if version != SUPPORTED_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }

        Ok(ContainerHeader {
            version,
            application: cursor.read_string()?,
            comment: cursor.read_string()?,
            created_at_ticks: cursor.read_i64::<LittleEndian>()?,
            streams_count: cursor.read_u8()?,
        })
    }

    /// Creation time on the millisecond clock frame timestamps use.
    pub fn created_at_millis(&self) -> i64 {
        self.created_at_ticks / TICKS_PER_MILLISECOND
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDescriptor {
    pub stream_type: StreamType,
    /// None for Messages streams, which are not instrument-bound.
    pub instrument: Option<String>,
    /// Position in the file's declared order; frames reference it.
    pub stream_index: usize,
}

impl StreamDescriptor {
    /// Read the next stream header. Must be called exactly `streams_count`
    /// times in file order; `stream_index` is the 0-based call number.
    pub fn read<R: Read>(cursor: &mut Cursor<R>, stream_index: usize) -> DecodeResult<Self> {
        let tag = cursor.read_u8()?;
        let stream_type =
            StreamType::from_u8(tag).ok_or(DecodeError::UnknownStreamType(tag))?;

        let instrument = if stream_type.has_instrument() {
            Some(cursor.read_string()?)
        } else {
            None
        };

        Ok(StreamDescriptor {
            stream_type,
            instrument,
            stream_index,
        })
    }
}
