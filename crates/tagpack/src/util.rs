//! One-shot helpers over [`Encoder`] and [`Decoder`].

use tracing::debug;

use crate::{DecodeError, Decoder, Encoder, Value};

/// Encodes `value` as a versioned envelope.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut encoder = Encoder::new();
    encoder.write_envelope(value);
    encoder.writer.into_vec()
}

/// Decodes an envelope that must span all of `data`.
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    Decoder::new(data)
        .decode()
        .inspect_err(|err| debug!(error = %err, len = data.len(), "decode failed"))
}

/// Decodes an envelope at the start of `data`, returning the value and the
/// number of bytes it occupied. Bytes after it are left alone.
pub fn decode_with_consumed(data: &[u8]) -> Result<(Value, usize), DecodeError> {
    let mut decoder = Decoder::new(data);
    let value = decoder.read_envelope()?;
    Ok((value, decoder.pos()))
}

/// Decodes one tagged value (no version byte) starting at `*pos` and moves
/// `*pos` past it. On error `*pos` is unchanged.
pub fn decode_inline(data: &[u8], pos: &mut usize) -> Result<Value, DecodeError> {
    let mut decoder = Decoder::at(data, *pos);
    let value = decoder.read_any()?;
    *pos = decoder.pos();
    Ok(value)
}
