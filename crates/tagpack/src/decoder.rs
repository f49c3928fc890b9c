//! Reads tagged values from a byte slice.

use tagpack_buffers::{BufferError, Reader};

use crate::constants::FORMAT_VERSION;
use crate::container::Framing;
use crate::options::DecoderOptions;
use crate::{rich, varint, DecodeError, TypeId, Value};

pub struct Decoder<'a> {
    pub reader: Reader<'a>,
    pub options: DecoderOptions,
    depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, DecoderOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: DecoderOptions) -> Self {
        Self {
            reader: Reader::new(data),
            options,
            depth: 0,
        }
    }

    /// Creates a decoder positioned at `pos`.
    pub fn at(data: &'a [u8], pos: usize) -> Self {
        Self {
            reader: Reader::at(data, pos),
            options: DecoderOptions::default(),
            depth: 0,
        }
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.reader.pos()
    }

    /// Decodes an envelope that must span the whole input.
    pub fn decode(&mut self) -> Result<Value, DecodeError> {
        let value = self.read_envelope()?;
        if self.reader.remaining() != 0 {
            return Err(DecodeError::TrailingBytes {
                consumed: self.reader.pos(),
                len: self.reader.len(),
            });
        }
        Ok(value)
    }

    /// Reads the version byte and one tagged value, leaving any following
    /// bytes unread.
    pub fn read_envelope(&mut self) -> Result<Value, DecodeError> {
        let version = self.fixed(Reader::u8)?;
        if version != FORMAT_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        self.read_any()
    }

    pub fn read_tag(&mut self) -> Result<TypeId, DecodeError> {
        let offset = self.reader.pos();
        let tag = self.fixed(Reader::u8)?;
        TypeId::from_u8(tag).ok_or(DecodeError::UnknownTypeTag { tag, offset })
    }

    /// Reads a tag and the payload it names.
    pub fn read_any(&mut self) -> Result<Value, DecodeError> {
        let tag = self.read_tag()?;
        self.read_value(tag)
    }

    /// Reads the payload of a value whose tag is already known.
    pub fn read_value(&mut self, tag: TypeId) -> Result<Value, DecodeError> {
        let value = match tag {
            TypeId::Any => return self.nested(Self::read_any),
            TypeId::Bool => Value::Bool(self.fixed(Reader::u8)? != 0),
            TypeId::U8 => Value::U8(self.fixed(Reader::u8)?),
            TypeId::U16 => Value::U16(self.fixed(Reader::u16)?),
            TypeId::U32 => Value::U32(self.fixed(Reader::u32)?),
            TypeId::U64 => Value::U64(self.fixed(Reader::u64)?),
            TypeId::I8 => Value::I8(self.fixed(Reader::i8)?),
            TypeId::I16 => Value::I16(self.fixed(Reader::i16)?),
            TypeId::I32 => Value::I32(self.fixed(Reader::i32)?),
            TypeId::I64 => Value::I64(self.fixed(Reader::i64)?),
            TypeId::F32 => Value::F32(self.fixed(Reader::f32)?),
            TypeId::F64 => Value::F64(self.fixed(Reader::f64)?),
            TypeId::VarUint => Value::VarUint(varint::read_uvarint(&mut self.reader)?),
            TypeId::VarInt => Value::VarInt(varint::read_varint(&mut self.reader)?),
            TypeId::Str => Value::Str(self.read_str()?),
            TypeId::Array => {
                Value::Array(self.nested(|decoder| decoder.read_array(Framing::TopLevel))?)
            }
            TypeId::Map => {
                Value::Map(self.nested(|decoder| decoder.read_map(Framing::TopLevel))?)
            }
            TypeId::Instant => Value::Instant(rich::read_instant(&mut self.reader)?),
            TypeId::InstantNanos => Value::Instant(rich::read_instant_nanos(&mut self.reader)?),
            TypeId::Duration => Value::Duration(rich::read_duration(&mut self.reader)?),
            TypeId::Uuid => Value::Uuid(rich::read_uuid(&mut self.reader)?),
        };
        Ok(value)
    }

    /// Reads a container element declared with `tag`.
    pub(crate) fn read_element(&mut self, tag: TypeId) -> Result<Value, DecodeError> {
        if tag == TypeId::Any {
            self.read_any()
        } else {
            self.read_value(tag)
        }
    }

    fn nested<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::DepthLimitExceeded(self.options.max_depth));
        }
        self.depth += 1;
        let result = read(self);
        self.depth -= 1;
        result
    }

    #[inline]
    fn fixed<T>(
        &mut self,
        read: impl FnOnce(&mut Reader<'a>) -> Result<T, BufferError>,
    ) -> Result<T, DecodeError> {
        let offset = self.reader.pos();
        read(&mut self.reader).map_err(|err| DecodeError::from_buffer(err, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_accepts_any_nonzero_byte() {
        let data = [0x00, 0x08, 0x02];
        assert_eq!(Decoder::new(&data).decode(), Ok(Value::Bool(true)));
    }

    #[test]
    fn instant_nanos_decodes_as_instant() {
        let mut data = vec![0x00, 0x31];
        data.extend_from_slice(&5i64.to_le_bytes());
        data.extend_from_slice(&[9, 9, 9, 9]);
        assert_eq!(Decoder::new(&data).decode(), Ok(Value::Instant(5)));
    }

    #[test]
    fn any_wrapper_is_transparent() {
        let data = [0x00, 0x01, 0x01, 0x10, 0x07];
        assert_eq!(Decoder::new(&data).decode(), Ok(Value::U8(7)));
    }

    #[test]
    fn unknown_tag_reports_offset() {
        let data = [0x00, 0x22, 0x7e, 0x00];
        assert_eq!(
            Decoder::new(&data).decode(),
            Err(DecodeError::UnknownTypeTag {
                tag: 0x7e,
                offset: 2
            })
        );
    }

    #[test]
    fn version_is_checked() {
        assert_eq!(
            Decoder::new(&[0x01, 0x08, 0x01]).decode(),
            Err(DecodeError::UnsupportedVersion(1))
        );
    }

    #[test]
    fn trailing_bytes() {
        assert_eq!(
            Decoder::new(&[0x00, 0x10, 0x01, 0xff]).decode(),
            Err(DecodeError::TrailingBytes {
                consumed: 3,
                len: 4
            })
        );
    }

    #[test]
    fn depth_limit() {
        let options = DecoderOptions { max_depth: 2 };
        // [[]]
        let ok = [0x00, 0x22, 0x22, 0x01, 0x01, 0x00];
        assert!(Decoder::with_options(&ok, options).decode().is_ok());
        // [[[]]]
        let deep = [0x00, 0x22, 0x22, 0x01, 0x22, 0x01, 0x01, 0x00];
        assert_eq!(
            Decoder::with_options(&deep, options).decode(),
            Err(DecodeError::DepthLimitExceeded(2))
        );
    }

    #[test]
    fn depth_counter_unwinds() {
        let options = DecoderOptions { max_depth: 1 };
        let data = [0x00, 0x22, 0x10, 0x01, 0x05];
        let mut decoder = Decoder::with_options(&data, options);
        assert!(decoder.decode().is_ok());
        assert_eq!(decoder.depth, 0);
    }

    #[test]
    fn at_starts_mid_input() {
        let data = [0xff, 0xff, 0x10, 0x2a];
        let mut decoder = Decoder::at(&data, 2);
        assert_eq!(decoder.read_any(), Ok(Value::U8(42)));
        assert_eq!(decoder.pos(), 4);
    }
}
