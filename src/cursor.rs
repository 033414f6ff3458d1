/// Forward-only byte cursor
///
/// Wraps any `std::io::Read` (plain file, gzip decoder, in-memory slice) and
/// exposes the primitive reads the QSH format is built from: fixed-width
/// integers in a declared endianness, length-prefixed strings, raw spans.
/// Short reads surface as `Truncated`, never as a silently short result.

use std::io::Read;

use byteorder::ByteOrder;

use crate::codec;
use crate::error::{DecodeError, DecodeResult};

pub struct Cursor<R: Read> {
    inner: R,
    /// One byte of lookahead so `at_end` can probe without consuming.
    peeked: Option<u8>,
    position: u64,
}

impl<R: Read> Cursor<R> {
    pub fn new(inner: R) -> Self {
        Cursor {
            inner,
            peeked: None,
            position: 0,
        }
    }

    /// Bytes consumed so far. Lookahead pulled by `at_end` does not count
    /// until a read actually consumes it.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// True when the underlying source has no more bytes. Logically
    /// side-effect-free: it may pull one byte into the lookahead slot, but
    /// the read position is unchanged and the byte is not lost.
    pub fn at_end(&mut self) -> DecodeResult<bool> {
        if self.peeked.is_some() {
            return Ok(false);
        }
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(true),
                Ok(_) => {
                    self.peeked = Some(byte[0]);
                    return Ok(false);
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(DecodeError::Io(e)),
            }
        }
    }

    /// Fill `buf` completely or fail with `Truncated`.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> DecodeResult<()> {
        let need = buf.len();
        let mut have = 0;

        if let Some(b) = self.peeked.take() {
            if need == 0 {
                self.peeked = Some(b);
                return Ok(());
            }
            buf[0] = b;
            have = 1;
        }

        while have < need {
            match self.inner.read(&mut buf[have..]) {
                Ok(0) => return Err(DecodeError::Truncated { need, have }),
                Ok(n) => have += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(DecodeError::Io(e)),
            }
        }

        self.position += need as u64;
        Ok(())
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u16<E: ByteOrder>(&mut self) -> DecodeResult<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(E::read_u16(&buf))
    }

    pub fn read_u32<E: ByteOrder>(&mut self) -> DecodeResult<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(E::read_u32(&buf))
    }

    pub fn read_u64<E: ByteOrder>(&mut self) -> DecodeResult<u64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(E::read_u64(&buf))
    }

    pub fn read_i64<E: ByteOrder>(&mut self) -> DecodeResult<i64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(E::read_i64(&buf))
    }

    pub fn read_f64<E: ByteOrder>(&mut self) -> DecodeResult<f64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(E::read_f64(&buf))
    }

    /// Varint length prefix, then that many UTF-8 bytes. Read in chunks so a
    /// corrupt length prefix cannot force a giant upfront allocation.
    pub fn read_string(&mut self) -> DecodeResult<String> {
        let len = codec::read_varint(self)? as usize;
        let mut buf = Vec::with_capacity(len.min(4096));
        let mut chunk = [0u8; 4096];
        let mut remaining = len;
        while remaining > 0 {
            let n = remaining.min(chunk.len());
            self.read_exact(&mut chunk[..n]).map_err(|e| match e {
                DecodeError::Truncated { have, .. } => DecodeError::Truncated {
                    need: len,
                    have: len - remaining + have,
                },
                other => other,
            })?;
            buf.extend_from_slice(&chunk[..n]);
            remaining -= n;
        }
        String::from_utf8(buf).map_err(|_| DecodeError::MalformedString)
    }
}
