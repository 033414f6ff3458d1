/// QSH container format: constants, stream types, flag masks, record types
///
/// Timestamps are naive exchange-clock values: milliseconds since
/// 0001-01-01T00:00:00 (the header's created_at is stored in 100 ns ticks of
/// the same epoch). Conversion to a display timezone is the caller's job.

/// Magic bytes opening every QSH file.
pub const SIGNATURE: &[u8] = b"QScalp History Data";

/// The one container version this decoder understands.
pub const SUPPORTED_VERSION: u8 = 4;

/// 100 ns ticks per millisecond, for the header's created_at field.
pub const TICKS_PER_MILLISECOND: i64 = 10_000;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamType {
    Quotes = 16,
    Deals = 32,
    OwnOrders = 48,
    OwnTrades = 64,
    Messages = 80,
    AuxInfo = 96,
    OrdLog = 112,
}

impl StreamType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            16 => Some(StreamType::Quotes),
            32 => Some(StreamType::Deals),
            48 => Some(StreamType::OwnOrders),
            64 => Some(StreamType::OwnTrades),
            80 => Some(StreamType::Messages),
            96 => Some(StreamType::AuxInfo),
            112 => Some(StreamType::OrdLog),
            _ => None,
        }
    }

    /// Messages streams are not bound to an instrument and carry no
    /// instrument code in their stream header.
    pub fn has_instrument(self) -> bool {
        self != StreamType::Messages
    }
}

/// Presence bits of the OrdLog composite payload, read first; each bit
/// independently gates one sub-record, in this decode order.
pub mod ord_log_flags {
    pub const ORDER_LOG: u8 = 1;
    pub const AUX_INFO: u8 = 2;
    pub const QUOTES: u8 = 4;
    pub const DEAL: u8 = 8;
}

/// Availability mask of the order-log sub-record: which delta fields are
/// present in the byte stream. An unset bit means the field's bytes are
/// absent entirely, and the previous value carries over.
pub mod ord_log_data {
    pub const DATETIME: u8 = 1;
    pub const ORDER_ID: u8 = 2;
    pub const ORDER_PRICE: u8 = 4;
    pub const AMOUNT: u8 = 8;
    pub const ORDER_AMOUNT_REST: u8 = 16;
    pub const DEAL_ID: u8 = 32;
    pub const DEAL_PRICE: u8 = 64;
    pub const OI_AFTER_DEAL: u8 = 128;
}

/// Exchange action bits of an order-log event.
pub mod ord_log_actions {
    pub const NON_ZERO_REPL_ACT: u16 = 1;
    pub const FLOW_START: u16 = 2;
    pub const ADD: u16 = 4;
    pub const FILL: u16 = 8;
    pub const BUY: u16 = 16;
    pub const SELL: u16 = 32;
    pub const SNAPSHOT: u16 = 64;
    pub const QUOTE: u16 = 128;
    pub const COUNTER: u16 = 256;
    pub const NON_SYSTEM: u16 = 512;
    pub const END_OF_TRANSACTION: u16 = 1024;
    pub const FILL_OR_KILL: u16 = 2048;
    pub const MOVED: u16 = 4096;
    pub const CANCELED: u16 = 8192;
    pub const CANCELED_GROUP: u16 = 16384;
    pub const CROSS_TRADE: u16 = 32768;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Bid,
    Ask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteAction {
    Add,
    Change,
    Remove,
}

/// One decoded book update. Control byte layout on the wire:
/// bits 0-1 action (0 add, 1 change, 2 remove), bit 2 side (0 bid, 1 ask),
/// bit 3 quantity-is-delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteUpdate {
    pub price: i64,
    pub quantity: i64,
    pub side: Side,
    pub action: QuoteAction,
}

pub mod quote_control {
    pub const ACTION_MASK: u8 = 0b0011;
    pub const ACTION_ADD: u8 = 0;
    pub const ACTION_CHANGE: u8 = 1;
    pub const ACTION_REMOVE: u8 = 2;
    pub const SIDE_ASK: u8 = 0b0100;
    pub const QUANTITY_IS_DELTA: u8 = 0b1000;
}

/// One order-log event as it appeared in the exchange's replication feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdLogEntry {
    pub actions: u16,
    /// Exchange clock, milliseconds since 0001-01-01.
    pub timestamp: i64,
    pub order_id: i64,
    pub price: i64,
    pub amount: i64,
    pub amount_rest: i64,
    pub deal_id: i64,
    pub deal_price: i64,
    pub oi_after_deal: i64,
}

/// Aggressor side of a trade print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealEntry {
    pub side: DealSide,
    pub id: i64,
    pub timestamp: i64,
    pub price: i64,
    pub volume: i64,
    pub oi: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuxInfoEntry {
    pub timestamp: i64,
    pub price: i64,
    pub ask_total: i64,
    pub bid_total: i64,
    pub oi: i64,
    pub hi_limit: i64,
    pub low_limit: i64,
    pub deposit: f64,
    pub rate: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageEntry {
    pub timestamp: i64,
    pub severity: u8,
    pub text: String,
}

/// Own-order update type: what the terminal did with the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnOrderType {
    Cancel,
    Bid,
    Ask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnOrderEntry {
    pub order_type: OwnOrderType,
    pub order_id: i64,
    pub price: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnTradeEntry {
    pub timestamp: i64,
    pub trade_id: i64,
    pub order_id: i64,
    pub price: i64,
    pub volume: i64,
}

/// The OrdLog composite result: four independently optional sub-records
/// selected by the presence flags. `quotes` holds the updates that were
/// applied to the stream's order book while decoding, in wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdLogRecord {
    pub order_log: Option<OrdLogEntry>,
    pub aux_info: Option<AuxInfoEntry>,
    pub quotes: Vec<QuoteUpdate>,
    pub deal: Option<DealEntry>,
}
