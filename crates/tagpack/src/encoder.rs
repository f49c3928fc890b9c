//! Writes tagged values to a [`Writer`].

use tagpack_buffers::Writer;

use crate::constants::FORMAT_VERSION;
use crate::container::Framing;
use crate::options::EncoderOptions;
use crate::{rich, varint, TypeId, Value};

pub struct Encoder {
    pub writer: Writer,
    pub options: EncoderOptions,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self::with_options(EncoderOptions::default())
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self {
            writer: Writer::with_capacity(options.initial_capacity),
            options,
        }
    }

    /// Encodes `value` as a versioned envelope and returns the bytes.
    pub fn encode(&mut self, value: &Value) -> Vec<u8> {
        self.writer.reset();
        self.write_envelope(value);
        self.writer.flush()
    }

    /// Appends a versioned envelope to the writer without resetting it.
    pub fn write_envelope(&mut self, value: &Value) {
        self.writer.u8(FORMAT_VERSION);
        self.write_any(value);
    }

    /// Writes the value's tag followed by its payload.
    pub fn write_any(&mut self, value: &Value) {
        self.writer.u8(value.tag().as_u8());
        self.write_value(value);
    }

    /// Writes the payload of `value` without its tag.
    pub fn write_value(&mut self, value: &Value) {
        match value {
            Value::Bool(b) => self.writer.u8(*b as u8),
            Value::U8(n) => self.writer.u8(*n),
            Value::U16(n) => self.writer.u16(*n),
            Value::U32(n) => self.writer.u32(*n),
            Value::U64(n) => self.writer.u64(*n),
            Value::I8(n) => self.writer.i8(*n),
            Value::I16(n) => self.writer.i16(*n),
            Value::I32(n) => self.writer.i32(*n),
            Value::I64(n) => self.writer.i64(*n),
            Value::F32(f) => self.writer.f32(*f),
            Value::F64(f) => self.writer.f64(*f),
            Value::VarUint(n) => varint::write_uvarint(&mut self.writer, *n),
            Value::VarInt(n) => varint::write_varint(&mut self.writer, *n),
            Value::Str(s) => self.write_str(s),
            Value::Array(items) => self.write_array(items, Framing::TopLevel),
            Value::Map(map) => self.write_map(map, Framing::TopLevel),
            Value::Instant(ms) => rich::write_instant(&mut self.writer, *ms),
            Value::Duration(d) => rich::write_duration(&mut self.writer, *d),
            Value::Uuid(uuid) => rich::write_uuid(&mut self.writer, uuid),
        }
    }

    /// Writes a container element declared with `tag`: elements of an `any`
    /// container carry their own tag, others only their payload.
    pub(crate) fn write_element(&mut self, tag: TypeId, value: &Value) {
        if tag == TypeId::Any {
            self.write_any(value);
        } else {
            self.write_value(value);
        }
    }
}
