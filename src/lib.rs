/// QSH Decoder - QScalp History Market Data Reader
///
/// Streaming decoder for the QSH binary market-data container: one file
/// multiplexes several time-series streams (quotes, deals, own orders and
/// trades, messages, auxiliary info, and the composite order-log stream),
/// optionally gzip-compressed. Features include:
/// - Container header and stream registry parsing
/// - Frame multiplexing with per-stream delta-coded timestamps
/// - Varint / zig-zag delta numeric codec
/// - Stateful per-stream payload decoders, OrdLog composite included
/// - Incremental order book reconstruction from quote updates
/// - Transparent gzip input

pub mod book;
pub mod codec;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod header;
pub mod protocol;
pub mod reader;
pub mod stats;

pub use book::{Level, OrderBook};
pub use cursor::Cursor;
pub use decoder::{StreamState, StreamValues};
pub use error::{DecodeError, DecodeResult};
pub use header::{ContainerHeader, StreamDescriptor};
pub use protocol::{
    AuxInfoEntry, DealEntry, DealSide, MessageEntry, OrdLogEntry, OrdLogRecord, OwnOrderEntry,
    OwnOrderType, OwnTradeEntry, QuoteAction, QuoteUpdate, Side, StreamType,
};
pub use reader::{open, Event, FrameHeader, QshReader, Record};
pub use stats::ReadStats;
