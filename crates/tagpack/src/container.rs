//! Strings, homogeneous arrays and maps, and field skipping.
//!
//! Arrays and maps carry one tag for every element (one for every key and one
//! for every value). Mixed contents are written with [`TypeId::Any`], in which
//! case each element carries its own tag.
//!
//! The element run is framed one of two ways, see [`Framing`].

use crate::varint::{self, LengthSlot};
use crate::{DecodeError, Decoder, Encoder, Map, TypeId, Value};

/// How the elements of an array or map are delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// Element count, then the elements.
    #[default]
    TopLevel,
    /// Byte length of the element run, then the elements. Used when the
    /// container is embedded in a record and must be skippable.
    InField,
}

/// Tag shared by every item, or [`TypeId::Any`] when they differ or there are
/// none.
fn shared_tag<'v>(mut items: impl Iterator<Item = &'v Value>) -> TypeId {
    let Some(first) = items.next() else {
        return TypeId::Any;
    };
    let tag = first.tag();
    if items.all(|item| item.tag() == tag) {
        tag
    } else {
        TypeId::Any
    }
}

impl Encoder {
    pub fn write_str(&mut self, s: &str) {
        varint::write_uvarint_u64(&mut self.writer, s.len() as u64);
        self.writer.utf8(s);
    }

    /// Writes the element tag, then the framed elements.
    pub fn write_array(&mut self, items: &[Value], framing: Framing) {
        let tag = shared_tag(items.iter());
        self.writer.u8(tag.as_u8());
        self.write_framed(items.len(), framing, |encoder| {
            for item in items {
                encoder.write_element(tag, item);
            }
        });
    }

    /// Writes the key and value tags, then the framed entries in insertion
    /// order.
    pub fn write_map(&mut self, map: &Map, framing: Framing) {
        let key_tag = shared_tag(map.keys());
        let value_tag = shared_tag(map.values());
        self.writer.u8(key_tag.as_u8());
        self.writer.u8(value_tag.as_u8());
        self.write_framed(map.len(), framing, |encoder| {
            for (key, value) in map {
                encoder.write_element(key_tag, key);
                encoder.write_element(value_tag, value);
            }
        });
    }

    /// Writes the frame header for `count` elements and lets `body` write
    /// them.
    ///
    /// For [`Framing::InField`] the byte length is backpatched once `body`
    /// returns, through a slot of [`EncoderOptions::length_slot`] bytes.
    ///
    /// [`EncoderOptions::length_slot`]: crate::EncoderOptions::length_slot
    pub fn write_framed(
        &mut self,
        count: usize,
        framing: Framing,
        body: impl FnOnce(&mut Self),
    ) {
        match framing {
            Framing::TopLevel => {
                varint::write_uvarint_u64(&mut self.writer, count as u64);
                body(self);
            }
            Framing::InField => {
                let slot = LengthSlot::reserve(&mut self.writer, self.options.length_slot);
                body(self);
                slot.fill_len(&mut self.writer);
            }
        }
    }
}

impl<'a> Decoder<'a> {
    pub fn read_str(&mut self) -> Result<String, DecodeError> {
        let len = varint::read_len(&mut self.reader)?;
        let offset = self.reader.pos();
        let s = self
            .reader
            .utf8(len)
            .map_err(|err| DecodeError::from_buffer(err, offset))?;
        Ok(s.to_owned())
    }

    /// Reads an element tag and the framed elements of an array.
    pub fn read_array(&mut self, framing: Framing) -> Result<Vec<Value>, DecodeError> {
        let tag = self.read_tag()?;
        let mut items = Vec::new();
        self.read_framed(framing, 1, |decoder| {
            items.push(decoder.read_element(tag)?);
            Ok(())
        })?;
        Ok(items)
    }

    /// Reads key and value tags and the framed entries of a map. A repeated
    /// key keeps its first position and takes the last value.
    pub fn read_map(&mut self, framing: Framing) -> Result<Map, DecodeError> {
        let key_tag = self.read_tag()?;
        let value_tag = self.read_tag()?;
        let mut map = Map::new();
        self.read_framed(framing, 2, |decoder| {
            let key = decoder.read_element(key_tag)?;
            let value = decoder.read_element(value_tag)?;
            map.insert(key, value);
            Ok(())
        })?;
        Ok(map)
    }

    /// Reads a frame header and calls `element` once per element.
    ///
    /// `min_size` is the smallest encoded size of one element; counts that
    /// cannot fit in the remaining input are rejected before any element is
    /// read.
    pub fn read_framed<F>(
        &mut self,
        framing: Framing,
        min_size: usize,
        mut element: F,
    ) -> Result<(), DecodeError>
    where
        F: FnMut(&mut Self) -> Result<(), DecodeError>,
    {
        match framing {
            Framing::TopLevel => {
                let count = varint::read_len(&mut self.reader)?;
                if count.saturating_mul(min_size.max(1)) > self.reader.remaining() {
                    return Err(DecodeError::TruncatedInput {
                        offset: self.reader.len(),
                    });
                }
                for _ in 0..count {
                    element(self)?;
                }
            }
            Framing::InField => {
                let len = varint::read_len(&mut self.reader)?;
                if len > self.reader.remaining() {
                    return Err(DecodeError::TruncatedInput {
                        offset: self.reader.len(),
                    });
                }
                let end = self.reader.pos() + len;
                while self.reader.pos() < end {
                    let offset = self.reader.pos();
                    element(self)?;
                    if self.reader.pos() > end {
                        return Err(DecodeError::FrameOverrun { offset });
                    }
                }
            }
        }
        Ok(())
    }

    /// Skips one record field without decoding it.
    ///
    /// The low three bits of `header` give the payload width: `0..=3` are
    /// 1, 2, 4 and 8 bytes, `4` a varint, `5` a varint byte count followed by
    /// that many bytes.
    pub fn skip_field(&mut self, header: u64) -> Result<(), DecodeError> {
        let size = match (header & 0x07) as u8 {
            0 => 1,
            1 => 2,
            2 => 4,
            3 => 8,
            4 => {
                varint::read_uvarint(&mut self.reader)?;
                return Ok(());
            }
            5 => varint::read_len(&mut self.reader)?,
            code => return Err(DecodeError::InvalidFieldWidth(code)),
        };
        let offset = self.reader.pos();
        self.reader
            .skip(size)
            .map_err(|err| DecodeError::from_buffer(err, offset))
    }
}
