//! Variable-length integers.
//!
//! Both forms store 7-bit groups least significant first, with the high bit
//! of every byte but the last set as a continuation flag.
//!
//! - unsigned: plain magnitude, `0` encodes as `[0x00]`.
//! - signed: two's complement; encoding stops once the remaining bits are all
//!   copies of bit 6 of the last emitted group, so `-1` is `[0x7f]` and `64`
//!   needs two bytes, `[0xc0, 0x00]`.
//!
//! Values up to 128 bits are supported. A [`LengthSlot`] reserves room for a
//! length that is only known after the bytes it measures have been written.

use tagpack_buffers::{Reader, Writer};
use tracing::trace;

use crate::DecodeError;

/// Longest accepted encoding: 19 groups of 7 bits cover 128 bits.
pub const MAX_VARINT_LEN: usize = 19;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7f;
const SIGN: u8 = 0x40;

/// Encodes `value` into `out`, returning the number of bytes used.
pub fn encode_uvarint(mut value: u128, out: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut len = 0;
    loop {
        let low7 = (value & PAYLOAD as u128) as u8;
        value >>= 7;
        if value == 0 {
            out[len] = low7;
            return len + 1;
        }
        out[len] = low7 | CONTINUATION;
        len += 1;
    }
}

/// Encodes `value` into `out`, returning the number of bytes used.
pub fn encode_varint(mut value: i128, out: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut len = 0;
    loop {
        let mut byte = (value & PAYLOAD as i128) as u8;
        value >>= 7;
        let sign = byte & SIGN != 0;
        let last = (value == 0 && !sign) || (value == -1 && sign);
        if !last {
            byte |= CONTINUATION;
        }
        out[len] = byte;
        len += 1;
        if last {
            return len;
        }
    }
}

/// Minimal encoded length of an unsigned value.
pub fn uvarint_len(value: u128) -> usize {
    let bits = 128 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Minimal encoded length of a signed value.
pub fn varint_len(value: i128) -> usize {
    let mut out = [0u8; MAX_VARINT_LEN];
    encode_varint(value, &mut out)
}

/// Writes an unsigned varint.
pub fn write_uvarint(writer: &mut Writer, value: u128) {
    match u64::try_from(value) {
        Ok(small) => write_uvarint_u64(writer, small),
        Err(_) => {
            let mut out = [0u8; MAX_VARINT_LEN];
            let len = encode_uvarint(value, &mut out);
            writer.buf(&out[..len]);
        }
    }
}

/// Writes an unsigned varint from a native-width value.
///
/// Produces the same bytes as [`write_uvarint`].
pub fn write_uvarint_u64(writer: &mut Writer, mut value: u64) {
    loop {
        let low7 = (value & PAYLOAD as u64) as u8;
        value >>= 7;
        if value == 0 {
            writer.u8(low7);
            return;
        }
        writer.u8(low7 | CONTINUATION);
    }
}

/// Writes a signed varint.
pub fn write_varint(writer: &mut Writer, value: i128) {
    let mut out = [0u8; MAX_VARINT_LEN];
    let len = encode_varint(value, &mut out);
    writer.buf(&out[..len]);
}

#[inline]
fn next_byte(reader: &mut Reader<'_>) -> Result<u8, DecodeError> {
    reader
        .u8()
        .map_err(|err| DecodeError::from_buffer(err, reader.pos()))
}

/// Reads an unsigned varint.
pub fn read_uvarint(reader: &mut Reader<'_>) -> Result<u128, DecodeError> {
    let start = reader.pos();
    let mut result = 0u128;
    for i in 0..MAX_VARINT_LEN {
        let byte = next_byte(reader)?;
        let group = (byte & PAYLOAD) as u128;
        let shift = 7 * i as u32;
        // the last group only has room for the top two bits
        if i == MAX_VARINT_LEN - 1 && group >> (128 - shift) != 0 {
            return Err(DecodeError::VarintOverflow { offset: start });
        }
        result |= group << shift;
        if byte & CONTINUATION == 0 {
            return Ok(result);
        }
    }
    Err(DecodeError::VarintOverflow { offset: start })
}

/// Reads a signed varint, sign-extending from bit 6 of the last group.
pub fn read_varint(reader: &mut Reader<'_>) -> Result<i128, DecodeError> {
    let start = reader.pos();
    let mut result = 0i128;
    let mut shift = 0u32;
    for i in 0..MAX_VARINT_LEN {
        let byte = next_byte(reader)?;
        // bits past 127 must repeat the sign bit, group bit 1
        if i == MAX_VARINT_LEN - 1 && !matches!((byte & PAYLOAD) >> 1, 0x00 | 0x3f) {
            return Err(DecodeError::VarintOverflow { offset: start });
        }
        result |= ((byte & PAYLOAD) as i128) << shift;
        shift += 7;
        if byte & CONTINUATION == 0 {
            if shift < 128 && byte & SIGN != 0 {
                result |= !0i128 << shift;
            }
            return Ok(result);
        }
    }
    Err(DecodeError::VarintOverflow { offset: start })
}

/// Reads an unsigned varint used as a byte length or element count.
pub fn read_len(reader: &mut Reader<'_>) -> Result<usize, DecodeError> {
    let start = reader.pos();
    let value = read_uvarint(reader)?;
    usize::try_from(value).map_err(|_| DecodeError::LengthOverflow { offset: start })
}

/// Space reserved in a [`Writer`] for an unsigned varint written later.
///
/// ```
/// use tagpack::varint::{read_uvarint, LengthSlot};
/// use tagpack_buffers::{Reader, Writer};
///
/// let mut writer = Writer::new();
/// let slot = LengthSlot::reserve(&mut writer, 2);
/// writer.buf(b"abc");
/// slot.fill_len(&mut writer);
/// assert_eq!(writer.as_slice(), [0x83, 0x00, b'a', b'b', b'c']);
///
/// let mut reader = Reader::new(writer.as_slice());
/// assert_eq!(read_uvarint(&mut reader), Ok(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthSlot {
    offset: usize,
    width: usize,
}

impl LengthSlot {
    /// Reserves `width` bytes at the writer's cursor. The width is clamped to
    /// `1..=MAX_VARINT_LEN`.
    pub fn reserve(writer: &mut Writer, width: usize) -> Self {
        let width = width.clamp(1, MAX_VARINT_LEN);
        let offset = writer.pos();
        writer.skip(width);
        Self { offset, width }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Position right after the reserved bytes.
    pub fn end(&self) -> usize {
        self.offset + self.width
    }

    /// Number of bytes written after the slot so far.
    pub fn payload_len(&self, writer: &Writer) -> usize {
        writer.pos() - self.end()
    }

    /// Writes `value` into the slot.
    ///
    /// A shorter encoding is padded with zero-magnitude continuation groups up
    /// to the slot width. A longer one shifts everything written after the
    /// slot right by the difference.
    pub fn fill(self, writer: &mut Writer, value: u128) {
        let mut out = [0u8; MAX_VARINT_LEN];
        let mut len = encode_uvarint(value, &mut out);
        if len > self.width {
            let overflow = len - self.width;
            trace!(
                offset = self.offset,
                width = self.width,
                overflow,
                "length slot too narrow, shifting payload"
            );
            writer.shift_right(self.end(), overflow);
        } else if len < self.width {
            for byte in &mut out[..self.width - 1] {
                *byte |= CONTINUATION;
            }
            len = self.width;
        }
        writer.patch(self.offset, &out[..len]);
    }

    /// Fills the slot with the number of bytes written after it.
    pub fn fill_len(self, writer: &mut Writer) {
        let len = self.payload_len(writer);
        self.fill(writer, len as u128);
    }
}
