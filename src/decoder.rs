/// Per-stream stateful payload decoders
///
/// Every delta-coded field resolves against the owning stream's previous
/// value, so each stream carries a `StreamState`: the previous-value set plus
/// the stream's order book when its type touches quotes. Decoders work on a
/// scratch copy of the previous values and commit only after the whole record
/// decoded — a failing record never corrupts state, and book updates are
/// applied only on success.

use std::io::Read;

use byteorder::LittleEndian;

use crate::book::OrderBook;
use crate::codec::{apply_delta, read_delta, read_growing, read_varint};
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::protocol::*;

/// Previous values used as delta bases. One set per stream; which fields a
/// stream actually exercises depends on its type, and no stream ever reads
/// another stream's values.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamValues {
    /// Frame-clock previous timestamp, milliseconds since 0001-01-01.
    pub frame_timestamp: i64,
    /// Exchange-clock previous timestamp (OrdLog, Deals, AuxInfo, ...).
    pub exchange_timestamp: i64,
    pub order_id: i64,
    pub order_price: i64,
    pub amount: i64,
    pub amount_rest: i64,
    pub deal_id: i64,
    pub deal_price: i64,
    pub oi: i64,
    pub quote_price: i64,
    pub quote_quantity: i64,
    pub ask_total: i64,
    pub bid_total: i64,
    pub hi_limit: i64,
    pub low_limit: i64,
    pub trade_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct StreamState {
    pub prev: StreamValues,
    pub book: OrderBook,
}

impl StreamState {
    /// Fresh state for one stream. Frame timestamps are seeded from the
    /// container's creation time, matching the frame clock's delta base.
    pub fn new(created_at_millis: i64) -> Self {
        StreamState {
            prev: StreamValues {
                frame_timestamp: created_at_millis,
                ..StreamValues::default()
            },
            book: OrderBook::new(),
        }
    }
}

fn read_side(control: u8) -> Side {
    if control & quote_control::SIDE_ASK != 0 {
        Side::Ask
    } else {
        Side::Bid
    }
}

/// Decode a count-prefixed run of quote updates into `out`, advancing the
/// scratch previous values. Does not touch any book.
fn read_quote_updates<R: Read>(
    cursor: &mut Cursor<R>,
    prev: &mut StreamValues,
    out: &mut Vec<QuoteUpdate>,
) -> DecodeResult<()> {
    let count = read_varint(cursor)? as usize;
    // Corrupt counts surface as Truncated below; don't pre-size to them.
    out.reserve(count.min(4096));

    for _ in 0..count {
        let control = cursor.read_u8()?;
        let action = match control & quote_control::ACTION_MASK {
            quote_control::ACTION_ADD => QuoteAction::Add,
            quote_control::ACTION_CHANGE => QuoteAction::Change,
            quote_control::ACTION_REMOVE => QuoteAction::Remove,
            other => {
                return Err(DecodeError::InvalidEnumValue {
                    what: "quote action",
                    value: other,
                })
            }
        };

        prev.quote_price = apply_delta(prev.quote_price, read_delta(cursor)?);

        let raw = read_delta(cursor)?;
        let quantity = if control & quote_control::QUANTITY_IS_DELTA != 0 {
            apply_delta(prev.quote_quantity, raw)
        } else {
            raw
        };
        prev.quote_quantity = quantity;

        out.push(QuoteUpdate {
            price: prev.quote_price,
            quantity,
            side: read_side(control),
            action,
        });
    }

    Ok(())
}

/// Quotes stream payload: one run of quote updates, applied to the stream's
/// book and returned for inspection.
pub fn decode_quotes<R: Read>(
    cursor: &mut Cursor<R>,
    state: &mut StreamState,
) -> DecodeResult<Vec<QuoteUpdate>> {
    let mut prev = state.prev;
    let mut updates = Vec::new();
    read_quote_updates(cursor, &mut prev, &mut updates)?;

    state.prev = prev;
    for update in &updates {
        state.book.apply(update);
    }
    Ok(updates)
}

fn read_deal_entry<R: Read>(
    cursor: &mut Cursor<R>,
    prev: &mut StreamValues,
) -> DecodeResult<DealEntry> {
    let side = match cursor.read_u8()? {
        0 => DealSide::Buy,
        1 => DealSide::Sell,
        other => {
            return Err(DecodeError::InvalidEnumValue {
                what: "deal side",
                value: other,
            })
        }
    };

    prev.deal_id = read_growing(cursor, prev.deal_id)?;
    prev.exchange_timestamp = read_growing(cursor, prev.exchange_timestamp)?;
    prev.deal_price = apply_delta(prev.deal_price, read_delta(cursor)?);
    let volume = read_varint(cursor)? as i64;
    prev.oi = apply_delta(prev.oi, read_delta(cursor)?);

    Ok(DealEntry {
        side,
        id: prev.deal_id,
        timestamp: prev.exchange_timestamp,
        price: prev.deal_price,
        volume,
        oi: prev.oi,
    })
}

/// Deals stream payload: a single trade print.
pub fn decode_deals<R: Read>(
    cursor: &mut Cursor<R>,
    state: &mut StreamState,
) -> DecodeResult<DealEntry> {
    let mut prev = state.prev;
    let deal = read_deal_entry(cursor, &mut prev)?;
    state.prev = prev;
    Ok(deal)
}

fn read_aux_info_entry<R: Read>(
    cursor: &mut Cursor<R>,
    prev: &mut StreamValues,
) -> DecodeResult<AuxInfoEntry> {
    prev.exchange_timestamp = read_growing(cursor, prev.exchange_timestamp)?;
    prev.order_price = apply_delta(prev.order_price, read_delta(cursor)?);
    prev.ask_total = apply_delta(prev.ask_total, read_delta(cursor)?);
    prev.bid_total = apply_delta(prev.bid_total, read_delta(cursor)?);
    prev.oi = apply_delta(prev.oi, read_delta(cursor)?);
    prev.hi_limit = apply_delta(prev.hi_limit, read_delta(cursor)?);
    prev.low_limit = apply_delta(prev.low_limit, read_delta(cursor)?);
    let deposit = cursor.read_f64::<LittleEndian>()?;
    let rate = cursor.read_f64::<LittleEndian>()?;
    let message = cursor.read_string()?;

    Ok(AuxInfoEntry {
        timestamp: prev.exchange_timestamp,
        price: prev.order_price,
        ask_total: prev.ask_total,
        bid_total: prev.bid_total,
        oi: prev.oi,
        hi_limit: prev.hi_limit,
        low_limit: prev.low_limit,
        deposit,
        rate,
        message,
    })
}

/// AuxInfo stream payload: session-level instrument info.
pub fn decode_aux_info<R: Read>(
    cursor: &mut Cursor<R>,
    state: &mut StreamState,
) -> DecodeResult<AuxInfoEntry> {
    let mut prev = state.prev;
    let entry = read_aux_info_entry(cursor, &mut prev)?;
    state.prev = prev;
    Ok(entry)
}

fn read_ord_log_entry<R: Read>(
    cursor: &mut Cursor<R>,
    prev: &mut StreamValues,
) -> DecodeResult<OrdLogEntry> {
    let available = cursor.read_u8()?;
    let actions = cursor.read_u16::<LittleEndian>()?;

    let is_add = actions & ord_log_actions::ADD != 0;
    let is_fill = actions & ord_log_actions::FILL != 0;

    if available & ord_log_data::DATETIME != 0 {
        prev.exchange_timestamp = read_growing(cursor, prev.exchange_timestamp)?;
    }

    if available & ord_log_data::ORDER_ID != 0 {
        // New orders get monotone ids; amendments reference nearby ones.
        prev.order_id = if is_add {
            read_growing(cursor, prev.order_id)?
        } else {
            apply_delta(prev.order_id, read_delta(cursor)?)
        };
    }

    if available & ord_log_data::ORDER_PRICE != 0 {
        prev.order_price = apply_delta(prev.order_price, read_delta(cursor)?);
    }

    if available & ord_log_data::AMOUNT != 0 {
        prev.amount = read_delta(cursor)?;
    }

    let (amount_rest, deal_id, deal_price, oi_after_deal) = if is_fill {
        if available & ord_log_data::ORDER_AMOUNT_REST != 0 {
            prev.amount_rest = read_delta(cursor)?;
        }
        if available & ord_log_data::DEAL_ID != 0 {
            prev.deal_id = read_growing(cursor, prev.deal_id)?;
        }
        if available & ord_log_data::DEAL_PRICE != 0 {
            prev.deal_price = apply_delta(prev.deal_price, read_delta(cursor)?);
        }
        if available & ord_log_data::OI_AFTER_DEAL != 0 {
            prev.oi = apply_delta(prev.oi, read_delta(cursor)?);
        }
        (prev.amount_rest, prev.deal_id, prev.deal_price, prev.oi)
    } else {
        let rest = if is_add { prev.amount } else { 0 };
        (rest, 0, 0, 0)
    };

    Ok(OrdLogEntry {
        actions,
        timestamp: prev.exchange_timestamp,
        order_id: prev.order_id,
        price: prev.order_price,
        amount: prev.amount,
        amount_rest,
        deal_id,
        deal_price,
        oi_after_deal,
    })
}

/// OrdLog composite payload: a presence-flags byte, then the present
/// sub-records in fixed order — order-log entry, aux-info entry, quote
/// updates, deal entry. An unset flag means its bytes are entirely absent.
pub fn decode_ord_log<R: Read>(
    cursor: &mut Cursor<R>,
    state: &mut StreamState,
) -> DecodeResult<OrdLogRecord> {
    let flags = cursor.read_u8()?;
    let mut prev = state.prev;

    let order_log = if flags & ord_log_flags::ORDER_LOG != 0 {
        Some(read_ord_log_entry(cursor, &mut prev)?)
    } else {
        None
    };

    let aux_info = if flags & ord_log_flags::AUX_INFO != 0 {
        Some(read_aux_info_entry(cursor, &mut prev)?)
    } else {
        None
    };

    let mut quotes = Vec::new();
    if flags & ord_log_flags::QUOTES != 0 {
        read_quote_updates(cursor, &mut prev, &mut quotes)?;
    }

    let deal = if flags & ord_log_flags::DEAL != 0 {
        Some(read_deal_entry(cursor, &mut prev)?)
    } else {
        None
    };

    // Whole record decoded; commit previous values, then the book.
    state.prev = prev;
    if let Some(entry) = &order_log {
        if entry.actions & ord_log_actions::FLOW_START != 0 {
            state.book.clear();
        }
    }
    for update in &quotes {
        state.book.apply(update);
    }

    Ok(OrdLogRecord {
        order_log,
        aux_info,
        quotes,
        deal,
    })
}

/// Messages stream payload: terminal/system text messages.
pub fn decode_message<R: Read>(
    cursor: &mut Cursor<R>,
    state: &mut StreamState,
) -> DecodeResult<MessageEntry> {
    let mut prev = state.prev;
    prev.exchange_timestamp = read_growing(cursor, prev.exchange_timestamp)?;
    let severity = cursor.read_u8()?;
    let text = cursor.read_string()?;

    state.prev = prev;
    Ok(MessageEntry {
        timestamp: state.prev.exchange_timestamp,
        severity,
        text,
    })
}

mod own_order_fields {
    pub const ORDER_ID: u8 = 1;
    pub const PRICE: u8 = 2;
    pub const AMOUNT: u8 = 4;
}

/// OwnOrders stream payload: the terminal's view of its working orders.
pub fn decode_own_order<R: Read>(
    cursor: &mut Cursor<R>,
    state: &mut StreamState,
) -> DecodeResult<OwnOrderEntry> {
    let mut prev = state.prev;

    let available = cursor.read_u8()?;
    let order_type = match cursor.read_u8()? {
        0 => OwnOrderType::Cancel,
        1 => OwnOrderType::Bid,
        2 => OwnOrderType::Ask,
        other => {
            return Err(DecodeError::InvalidEnumValue {
                what: "own-order type",
                value: other,
            })
        }
    };

    if available & own_order_fields::ORDER_ID != 0 {
        prev.order_id = apply_delta(prev.order_id, read_delta(cursor)?);
    }
    if available & own_order_fields::PRICE != 0 {
        prev.order_price = apply_delta(prev.order_price, read_delta(cursor)?);
    }
    if available & own_order_fields::AMOUNT != 0 {
        prev.amount = read_delta(cursor)?;
    }

    state.prev = prev;
    Ok(OwnOrderEntry {
        order_type,
        order_id: state.prev.order_id,
        price: state.prev.order_price,
        amount: state.prev.amount,
    })
}

/// OwnTrades stream payload: the terminal's own executions.
pub fn decode_own_trade<R: Read>(
    cursor: &mut Cursor<R>,
    state: &mut StreamState,
) -> DecodeResult<OwnTradeEntry> {
    let mut prev = state.prev;

    prev.exchange_timestamp = read_growing(cursor, prev.exchange_timestamp)?;
    prev.trade_id = read_growing(cursor, prev.trade_id)?;
    prev.order_id = apply_delta(prev.order_id, read_delta(cursor)?);
    prev.deal_price = apply_delta(prev.deal_price, read_delta(cursor)?);
    let volume = read_varint(cursor)? as i64;

    state.prev = prev;
    Ok(OwnTradeEntry {
        timestamp: state.prev.exchange_timestamp,
        trade_id: state.prev.trade_id,
        order_id: state.prev.order_id,
        price: state.prev.deal_price,
        volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{write_delta, write_growing, write_string, write_varint};

    fn push_quote_update(
        buf: &mut Vec<u8>,
        prev: &mut (i64, i64),
        price: i64,
        quantity: i64,
        control: u8,
    ) {
        buf.push(control);
        write_delta(buf, price.wrapping_sub(prev.0));
        write_delta(buf, quantity);
        *prev = (price, quantity);
    }

    #[test]
    fn test_decode_quotes_applies_to_book() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 2);
        let mut prev = (0i64, 0i64);
        push_quote_update(&mut buf, &mut prev, 100, 5, quote_control::ACTION_ADD);
        push_quote_update(
            &mut buf,
            &mut prev,
            101,
            7,
            quote_control::ACTION_ADD | quote_control::SIDE_ASK,
        );

        let mut state = StreamState::new(0);
        let mut cur = Cursor::new(&buf[..]);
        let updates = decode_quotes(&mut cur, &mut state).unwrap();

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].price, 100);
        assert_eq!(updates[0].side, Side::Bid);
        assert_eq!(updates[1].price, 101);
        assert_eq!(updates[1].side, Side::Ask);
        assert_eq!(state.book.best_bid(), Some((100, 5)));
        assert_eq!(state.book.best_ask(), Some((101, 7)));
    }

    #[test]
    fn test_quote_quantity_delta_subflag() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 2);
        // Absolute quantity 10, then a -4 delta on it.
        buf.push(quote_control::ACTION_ADD);
        write_delta(&mut buf, 100);
        write_delta(&mut buf, 10);
        buf.push(quote_control::ACTION_CHANGE | quote_control::QUANTITY_IS_DELTA);
        write_delta(&mut buf, 0);
        write_delta(&mut buf, -4);

        let mut state = StreamState::new(0);
        let mut cur = Cursor::new(&buf[..]);
        let updates = decode_quotes(&mut cur, &mut state).unwrap();
        assert_eq!(updates[1].quantity, 6);
        assert_eq!(state.book.snapshot()[0].1.quantity, 6);
    }

    #[test]
    fn test_invalid_quote_action() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 1);
        buf.push(0b0011); // action value 3 is outside the enumeration
        write_delta(&mut buf, 0);
        write_delta(&mut buf, 1);

        let mut state = StreamState::new(0);
        let mut cur = Cursor::new(&buf[..]);
        assert!(matches!(
            decode_quotes(&mut cur, &mut state),
            Err(DecodeError::InvalidEnumValue { what: "quote action", .. })
        ));
    }

    fn deal_bytes(prev: &StreamValues, deal: &DealEntry) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(match deal.side {
            DealSide::Buy => 0,
            DealSide::Sell => 1,
        });
        write_growing(&mut buf, prev.deal_id, deal.id);
        write_growing(&mut buf, prev.exchange_timestamp, deal.timestamp);
        write_delta(&mut buf, deal.price.wrapping_sub(prev.deal_price));
        write_varint(&mut buf, deal.volume as u64);
        write_delta(&mut buf, deal.oi.wrapping_sub(prev.oi));
        buf
    }

    #[test]
    fn test_decode_deal_round_trip() {
        let deal = DealEntry {
            side: DealSide::Sell,
            id: 9001,
            timestamp: 63_500_000_000_123,
            price: 142_550,
            volume: 3,
            oi: 1_000_000,
        };
        let mut state = StreamState::new(0);
        let buf = deal_bytes(&state.prev, &deal);
        let mut cur = Cursor::new(&buf[..]);
        let decoded = decode_deals(&mut cur, &mut state).unwrap();
        assert_eq!(decoded, deal);
        assert_eq!(state.prev.deal_id, 9001);
        assert_eq!(state.prev.deal_price, 142_550);
    }

    #[test]
    fn test_deal_deltas_chain_across_records() {
        let first = DealEntry {
            side: DealSide::Buy,
            id: 100,
            timestamp: 1_000,
            price: 500,
            volume: 1,
            oi: 10,
        };
        let second = DealEntry {
            side: DealSide::Buy,
            id: 101,
            timestamp: 1_005,
            price: 498,
            volume: 2,
            oi: 12,
        };

        let mut state = StreamState::new(0);
        let buf1 = deal_bytes(&state.prev, &first);
        let mut cur = Cursor::new(&buf1[..]);
        assert_eq!(decode_deals(&mut cur, &mut state).unwrap(), first);

        let buf2 = deal_bytes(&state.prev, &second);
        let mut cur = Cursor::new(&buf2[..]);
        assert_eq!(decode_deals(&mut cur, &mut state).unwrap(), second);
    }

    fn ord_log_entry_bytes(
        prev: &StreamValues,
        available: u8,
        actions: u16,
        timestamp: i64,
        order_id: i64,
        price: i64,
        amount: i64,
    ) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(available);
        buf.extend_from_slice(&actions.to_le_bytes());
        if available & ord_log_data::DATETIME != 0 {
            write_growing(&mut buf, prev.exchange_timestamp, timestamp);
        }
        if available & ord_log_data::ORDER_ID != 0 {
            if actions & ord_log_actions::ADD != 0 {
                write_growing(&mut buf, prev.order_id, order_id);
            } else {
                write_delta(&mut buf, order_id.wrapping_sub(prev.order_id));
            }
        }
        if available & ord_log_data::ORDER_PRICE != 0 {
            write_delta(&mut buf, price.wrapping_sub(prev.order_price));
        }
        if available & ord_log_data::AMOUNT != 0 {
            write_delta(&mut buf, amount);
        }
        buf
    }

    #[test]
    fn test_ord_log_entry_only() {
        let mut state = StreamState::new(0);
        let mut buf = vec![ord_log_flags::ORDER_LOG];
        let available = ord_log_data::DATETIME
            | ord_log_data::ORDER_ID
            | ord_log_data::ORDER_PRICE
            | ord_log_data::AMOUNT;
        let actions = ord_log_actions::ADD | ord_log_actions::BUY;
        buf.extend(ord_log_entry_bytes(
            &state.prev,
            available,
            actions,
            63_400_000_000_000,
            777,
            142_000,
            5,
        ));

        let mut cur = Cursor::new(&buf[..]);
        let record = decode_ord_log(&mut cur, &mut state).unwrap();

        let entry = record.order_log.unwrap();
        assert_eq!(entry.timestamp, 63_400_000_000_000);
        assert_eq!(entry.order_id, 777);
        assert_eq!(entry.price, 142_000);
        assert_eq!(entry.amount, 5);
        assert_eq!(entry.amount_rest, 5); // ADD without FILL rests the full amount
        assert_eq!(entry.deal_id, 0);
        assert!(record.aux_info.is_none());
        assert!(record.quotes.is_empty());
        assert!(record.deal.is_none());
    }

    #[test]
    fn test_ord_log_deal_only_leaves_book_and_aux_state_untouched() {
        let mut state = StreamState::new(0);
        state.prev.ask_total = 42;

        let deal = DealEntry {
            side: DealSide::Buy,
            id: 1,
            timestamp: 500,
            price: 100,
            volume: 2,
            oi: 7,
        };
        let mut buf = vec![ord_log_flags::DEAL];
        buf.extend(deal_bytes(&state.prev, &deal));

        let mut cur = Cursor::new(&buf[..]);
        let record = decode_ord_log(&mut cur, &mut state).unwrap();

        assert!(record.order_log.is_none());
        assert!(record.aux_info.is_none());
        assert!(record.quotes.is_empty());
        assert_eq!(record.deal, Some(deal));
        assert!(state.book.is_empty());
        assert_eq!(state.prev.ask_total, 42);
    }

    #[test]
    fn test_ord_log_quotes_subrecord_updates_book() {
        let mut state = StreamState::new(0);
        let mut buf = vec![ord_log_flags::QUOTES];
        write_varint(&mut buf, 1);
        buf.push(quote_control::ACTION_ADD | quote_control::SIDE_ASK);
        write_delta(&mut buf, 250);
        write_delta(&mut buf, 9);

        let mut cur = Cursor::new(&buf[..]);
        let record = decode_ord_log(&mut cur, &mut state).unwrap();
        assert_eq!(record.quotes.len(), 1);
        assert_eq!(state.book.best_ask(), Some((250, 9)));
    }

    #[test]
    fn test_ord_log_flow_start_clears_book() {
        let mut state = StreamState::new(0);
        state.book.apply(&QuoteUpdate {
            price: 10,
            quantity: 1,
            side: Side::Bid,
            action: QuoteAction::Add,
        });

        let mut buf = vec![ord_log_flags::ORDER_LOG];
        buf.extend(ord_log_entry_bytes(
            &state.prev,
            0,
            ord_log_actions::FLOW_START,
            0,
            0,
            0,
            0,
        ));
        let mut cur = Cursor::new(&buf[..]);
        decode_ord_log(&mut cur, &mut state).unwrap();
        assert!(state.book.is_empty());
    }

    #[test]
    fn test_ord_log_fill_fields() {
        let mut state = StreamState::new(0);
        let available = ord_log_data::AMOUNT
            | ord_log_data::ORDER_AMOUNT_REST
            | ord_log_data::DEAL_ID
            | ord_log_data::DEAL_PRICE
            | ord_log_data::OI_AFTER_DEAL;
        let actions = ord_log_actions::FILL | ord_log_actions::SELL;

        let mut buf = vec![ord_log_flags::ORDER_LOG];
        buf.push(available);
        buf.extend_from_slice(&actions.to_le_bytes());
        write_delta(&mut buf, 4); // amount
        write_delta(&mut buf, 6); // amount_rest
        write_growing(&mut buf, 0, 555); // deal id
        write_delta(&mut buf, 142_500); // deal price
        write_delta(&mut buf, -20); // oi after deal

        let mut cur = Cursor::new(&buf[..]);
        let record = decode_ord_log(&mut cur, &mut state).unwrap();
        let entry = record.order_log.unwrap();
        assert_eq!(entry.amount, 4);
        assert_eq!(entry.amount_rest, 6);
        assert_eq!(entry.deal_id, 555);
        assert_eq!(entry.deal_price, 142_500);
        assert_eq!(entry.oi_after_deal, -20);
    }

    #[test]
    fn test_truncated_record_leaves_state_unchanged() {
        let mut state = StreamState::new(0);
        let before = state.prev;

        // Quotes sub-record that promises 2 updates but carries 1.
        let mut buf = vec![ord_log_flags::QUOTES];
        write_varint(&mut buf, 2);
        buf.push(quote_control::ACTION_ADD);
        write_delta(&mut buf, 100);
        write_delta(&mut buf, 5);

        let mut cur = Cursor::new(&buf[..]);
        let result = decode_ord_log(&mut cur, &mut state);
        assert!(matches!(result, Err(DecodeError::Truncated { .. })));
        assert_eq!(state.prev.quote_price, before.quote_price);
        assert_eq!(state.prev.quote_quantity, before.quote_quantity);
        assert!(state.book.is_empty());
    }

    #[test]
    fn test_decode_message() {
        let mut buf = Vec::new();
        write_growing(&mut buf, 0, 63_200_000_000_042);
        buf.push(2);
        write_string(&mut buf, "connection lost");

        let mut state = StreamState::new(0);
        let mut cur = Cursor::new(&buf[..]);
        let msg = decode_message(&mut cur, &mut state).unwrap();
        assert_eq!(msg.timestamp, 63_200_000_000_042);
        assert_eq!(msg.severity, 2);
        assert_eq!(msg.text, "connection lost");
    }

    #[test]
    fn test_decode_own_order_gated_fields() {
        let mut state = StreamState::new(0);
        state.prev.order_price = 1_000;

        // Only the order id field present; price and amount carry over.
        let mut buf = vec![own_order_fields::ORDER_ID, 1];
        write_delta(&mut buf, 33);

        let mut cur = Cursor::new(&buf[..]);
        let entry = decode_own_order(&mut cur, &mut state).unwrap();
        assert_eq!(entry.order_type, OwnOrderType::Bid);
        assert_eq!(entry.order_id, 33);
        assert_eq!(entry.price, 1_000);
    }

    #[test]
    fn test_decode_own_trade() {
        let mut buf = Vec::new();
        write_growing(&mut buf, 0, 900);
        write_growing(&mut buf, 0, 71);
        write_delta(&mut buf, 12);
        write_delta(&mut buf, 142_000);
        write_varint(&mut buf, 5);

        let mut state = StreamState::new(0);
        let mut cur = Cursor::new(&buf[..]);
        let trade = decode_own_trade(&mut cur, &mut state).unwrap();
        assert_eq!(trade.timestamp, 900);
        assert_eq!(trade.trade_id, 71);
        assert_eq!(trade.order_id, 12);
        assert_eq!(trade.price, 142_000);
        assert_eq!(trade.volume, 5);
    }
}
