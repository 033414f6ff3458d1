/// Shared helpers: build synthetic QSH byte streams for integration tests.

use qsh_decoder::codec::{write_delta, write_growing, write_string, write_varint};
use qsh_decoder::protocol::{quote_control, DealEntry, DealSide, QuoteAction, Side, SIGNATURE};

pub const CREATED_AT_TICKS: i64 = 630_000_000_000_000_000;
pub const CREATED_AT_MS: i64 = CREATED_AT_TICKS / 10_000;

pub fn encode_container(
    application: &str,
    comment: &str,
    created_at_ticks: i64,
    streams: &[(u8, Option<&str>)],
) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(SIGNATURE);
    buf.push(4);
    write_string(&mut buf, application);
    write_string(&mut buf, comment);
    buf.extend_from_slice(&created_at_ticks.to_le_bytes());
    buf.push(streams.len() as u8);
    for (tag, instrument) in streams {
        buf.push(*tag);
        if let Some(code) = instrument {
            write_string(&mut buf, code);
        }
    }
    buf
}

pub fn push_frame_header(buf: &mut Vec<u8>, stream_index: usize, timestamp_delta: i64) {
    write_varint(buf, stream_index as u64);
    write_delta(buf, timestamp_delta);
}

/// Encode one quote update; `prev` is (price, quantity) carried between
/// updates of the same stream.
pub fn push_quote_update(
    buf: &mut Vec<u8>,
    prev: &mut (i64, i64),
    price: i64,
    quantity: i64,
    side: Side,
    action: QuoteAction,
) {
    let mut control = match action {
        QuoteAction::Add => quote_control::ACTION_ADD,
        QuoteAction::Change => quote_control::ACTION_CHANGE,
        QuoteAction::Remove => quote_control::ACTION_REMOVE,
    };
    if side == Side::Ask {
        control |= quote_control::SIDE_ASK;
    }
    buf.push(control);
    write_delta(buf, price.wrapping_sub(prev.0));
    write_delta(buf, quantity);
    *prev = (price, quantity);
}

/// Encode a deal payload; `prev` is (deal_id, timestamp, price, oi).
pub fn push_deal(buf: &mut Vec<u8>, prev: &mut (i64, i64, i64, i64), deal: &DealEntry) {
    buf.push(match deal.side {
        DealSide::Buy => 0,
        DealSide::Sell => 1,
    });
    write_growing(buf, prev.0, deal.id);
    write_growing(buf, prev.1, deal.timestamp);
    write_delta(buf, deal.price.wrapping_sub(prev.2));
    write_varint(buf, deal.volume as u64);
    write_delta(buf, deal.oi.wrapping_sub(prev.3));
    *prev = (deal.id, deal.timestamp, deal.price, deal.oi);
}
