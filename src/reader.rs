/// Decoding session: frame multiplexer and consumer-facing reads
///
/// A `QshReader` owns the byte cursor, the parsed container header, the
/// stream registry, and one `StreamState` per declared stream. The caller
/// drives it pull-style: `read_frame_header` yields which stream's payload
/// comes next, then the matching type-specific read decodes it. `next_event`
/// bundles both steps for callers that just want the event sequence.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::book::OrderBook;
use crate::codec::{apply_delta, read_delta, read_varint};
use crate::cursor::Cursor;
use crate::decoder::{
    decode_aux_info, decode_deals, decode_message, decode_ord_log, decode_own_order,
    decode_own_trade, decode_quotes, StreamState,
};
use crate::error::{DecodeError, DecodeResult};
use crate::header::{ContainerHeader, StreamDescriptor};
use crate::protocol::{
    AuxInfoEntry, DealEntry, MessageEntry, OrdLogRecord, OwnOrderEntry, OwnTradeEntry,
    QuoteUpdate, StreamType,
};
use crate::stats::ReadStats;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Field-level lookup kept free-standing so payload reads can borrow the
/// state and the cursor disjointly.
fn state_mut(states: &mut [StreamState], index: usize) -> DecodeResult<&mut StreamState> {
    let streams = states.len();
    states
        .get_mut(index)
        .ok_or(DecodeError::InvalidStreamIndex { index, streams })
}

/// One frame's envelope: the reconstructed exchange-clock timestamp
/// (milliseconds since 0001-01-01) and the stream the payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub timestamp: i64,
    pub stream_index: usize,
}

/// A decoded payload, tagged by stream type.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Quotes(Vec<QuoteUpdate>),
    Deal(DealEntry),
    OwnOrder(OwnOrderEntry),
    OwnTrade(OwnTradeEntry),
    Message(MessageEntry),
    AuxInfo(AuxInfoEntry),
    OrdLog(OrdLogRecord),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub timestamp: i64,
    pub stream_index: usize,
    pub record: Record,
}

pub struct QshReader<R: Read> {
    cursor: Cursor<R>,
    header: ContainerHeader,
    streams: Vec<StreamDescriptor>,
    states: Vec<StreamState>,
    stats: ReadStats,
}

impl<R: Read> QshReader<R> {
    /// Open a session over a byte source: parses the container header and
    /// the full stream registry, leaving the cursor at the first frame.
    pub fn new(source: R) -> DecodeResult<Self> {
        let mut cursor = Cursor::new(source);
        let header = ContainerHeader::read(&mut cursor)?;

        let count = header.streams_count as usize;
        let mut streams = Vec::with_capacity(count);
        for index in 0..count {
            streams.push(StreamDescriptor::read(&mut cursor, index)?);
        }

        let states = vec![StreamState::new(header.created_at_millis()); count];

        Ok(QshReader {
            cursor,
            header,
            streams,
            states,
            stats: ReadStats::new(),
        })
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    pub fn streams(&self) -> &[StreamDescriptor] {
        &self.streams
    }

    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }

    /// The live order book a stream's quote updates have built so far.
    pub fn book(&self, stream_index: usize) -> Option<&OrderBook> {
        self.states.get(stream_index).map(|s| &s.book)
    }

    /// Read the next frame header. `Ok(None)` when the source ends cleanly
    /// at a frame boundary; `Truncated` when it ends mid-frame.
    ///
    /// Sequencing is a hard contract of the wire format: the stream index is
    /// decoded and bounds-checked first, because the timestamp delta that
    /// follows can only be resolved against that stream's previous value.
    pub fn read_frame_header(&mut self) -> DecodeResult<Option<FrameHeader>> {
        if self.cursor.at_end()? {
            return Ok(None);
        }

        let stream_index = read_varint(&mut self.cursor)? as usize;
        if stream_index >= self.streams.len() {
            return Err(DecodeError::InvalidStreamIndex {
                index: stream_index,
                streams: self.streams.len(),
            });
        }

        let delta = read_delta(&mut self.cursor)?;
        let state = &mut self.states[stream_index];
        let timestamp = apply_delta(state.prev.frame_timestamp, delta);
        state.prev.frame_timestamp = timestamp;

        self.stats.record_frame(self.streams[stream_index].stream_type);
        Ok(Some(FrameHeader {
            timestamp,
            stream_index,
        }))
    }

    pub fn read_quotes(&mut self, stream_index: usize) -> DecodeResult<Vec<QuoteUpdate>> {
        let state = state_mut(&mut self.states, stream_index)?;
        decode_quotes(&mut self.cursor, state)
    }

    pub fn read_deal(&mut self, stream_index: usize) -> DecodeResult<DealEntry> {
        let state = state_mut(&mut self.states, stream_index)?;
        decode_deals(&mut self.cursor, state)
    }

    pub fn read_aux_info(&mut self, stream_index: usize) -> DecodeResult<AuxInfoEntry> {
        let state = state_mut(&mut self.states, stream_index)?;
        decode_aux_info(&mut self.cursor, state)
    }

    pub fn read_ord_log(&mut self, stream_index: usize) -> DecodeResult<OrdLogRecord> {
        let state = state_mut(&mut self.states, stream_index)?;
        decode_ord_log(&mut self.cursor, state)
    }

    pub fn read_message(&mut self, stream_index: usize) -> DecodeResult<MessageEntry> {
        let state = state_mut(&mut self.states, stream_index)?;
        decode_message(&mut self.cursor, state)
    }

    pub fn read_own_order(&mut self, stream_index: usize) -> DecodeResult<OwnOrderEntry> {
        let state = state_mut(&mut self.states, stream_index)?;
        decode_own_order(&mut self.cursor, state)
    }

    pub fn read_own_trade(&mut self, stream_index: usize) -> DecodeResult<OwnTradeEntry> {
        let state = state_mut(&mut self.states, stream_index)?;
        decode_own_trade(&mut self.cursor, state)
    }

    /// Read the payload of the stream a frame header selected, dispatching
    /// on the stream type learned from the registry.
    pub fn read_record(&mut self, stream_index: usize) -> DecodeResult<Record> {
        let stream_type = self
            .streams
            .get(stream_index)
            .ok_or(DecodeError::InvalidStreamIndex {
                index: stream_index,
                streams: self.streams.len(),
            })?
            .stream_type;

        Ok(match stream_type {
            StreamType::Quotes => Record::Quotes(self.read_quotes(stream_index)?),
            StreamType::Deals => Record::Deal(self.read_deal(stream_index)?),
            StreamType::OwnOrders => Record::OwnOrder(self.read_own_order(stream_index)?),
            StreamType::OwnTrades => Record::OwnTrade(self.read_own_trade(stream_index)?),
            StreamType::Messages => Record::Message(self.read_message(stream_index)?),
            StreamType::AuxInfo => Record::AuxInfo(self.read_aux_info(stream_index)?),
            StreamType::OrdLog => Record::OrdLog(self.read_ord_log(stream_index)?),
        })
    }

    /// One full iteration step: frame header plus its payload. `Ok(None)` is
    /// clean end-of-file; any error means the file cannot be decoded further.
    pub fn next_event(&mut self) -> DecodeResult<Option<Event>> {
        let frame = match self.read_frame_header()? {
            Some(frame) => frame,
            None => return Ok(None),
        };
        let record = self.read_record(frame.stream_index)?;
        Ok(Some(Event {
            timestamp: frame.timestamp,
            stream_index: frame.stream_index,
            record,
        }))
    }
}

/// Open a QSH file from disk, transparently decompressing when the gzip
/// magic is present. Captures in the wild are almost always gzipped.
pub fn open<P: AsRef<Path>>(path: P) -> DecodeResult<QshReader<Box<dyn Read>>> {
    let mut file = File::open(path)?;

    let mut magic = [0u8; 2];
    let gzipped = match file.read_exact(&mut magic) {
        Ok(()) => magic == GZIP_MAGIC,
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => false,
        Err(e) => return Err(DecodeError::Io(e)),
    };
    file.seek(SeekFrom::Start(0))?;

    let source: Box<dyn Read> = if gzipped {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    QshReader::new(source)
}
