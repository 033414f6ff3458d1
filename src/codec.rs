/// Varint / delta codec
///
/// The QSH format stores almost every numeric field as a variable-length
/// integer: unsigned values as plain varints (7 data bits per byte, 0x80
/// continuation), signed deltas as zig-zag-coded varints resolved against a
/// per-stream previous value, and monotone fields (timestamps, order ids)
/// as "growing" values — an unsigned increment with an escape sentinel for
/// the rare backward step.
///
/// The `write_*` inverses exist for the round-trip test harness and the
/// synthetic feed generator; this crate does not produce QSH files.

use std::io::Read;

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

/// Longest legal continuation chain for a u64.
const MAX_VARINT_BYTES: usize = 10;

/// Growing increment that signals "full signed delta follows".
pub const GROWING_ESCAPE: u64 = 268_435_455;

/// Decode an unsigned varint. Fails `Truncated` if the chain runs past the
/// available bytes and `Overflow` if it exceeds 10 bytes.
pub fn read_varint<R: Read>(cursor: &mut Cursor<R>) -> DecodeResult<u64> {
    let mut result: u64 = 0;
    let mut shift = 0u32;

    for _ in 0..MAX_VARINT_BYTES {
        let byte = cursor.read_u8()?;
        result |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(result);
        }
        shift += 7;
    }

    Err(DecodeError::Overflow)
}

pub fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Decode a signed delta (zig-zag varint).
pub fn read_delta<R: Read>(cursor: &mut Cursor<R>) -> DecodeResult<i64> {
    Ok(zigzag_decode(read_varint(cursor)?))
}

pub fn write_delta(out: &mut Vec<u8>, value: i64) {
    write_varint(out, zigzag_encode(value));
}

/// Resolve a delta against the previous value. Wraparound is two's-complement
/// by design: the source format uses fixed-width deltas and relies on it.
pub fn apply_delta(previous: i64, delta: i64) -> i64 {
    previous.wrapping_add(delta)
}

/// Decode a growing value: an unsigned increment on `previous`, with the
/// escape sentinel falling back to a full signed delta.
pub fn read_growing<R: Read>(cursor: &mut Cursor<R>, previous: i64) -> DecodeResult<i64> {
    let increment = read_varint(cursor)?;
    if increment == GROWING_ESCAPE {
        let delta = read_delta(cursor)?;
        Ok(apply_delta(previous, delta))
    } else {
        Ok(previous.wrapping_add(increment as i64))
    }
}

pub fn write_growing(out: &mut Vec<u8>, previous: i64, value: i64) {
    let delta = value.wrapping_sub(previous);
    if delta >= 0 && (delta as u64) < GROWING_ESCAPE {
        write_varint(out, delta as u64);
    } else {
        write_varint(out, GROWING_ESCAPE);
        write_delta(out, delta);
    }
}

pub fn write_string(out: &mut Vec<u8>, value: &str) {
    write_varint(out, value.len() as u64);
    out.extend_from_slice(value.as_bytes());
}
