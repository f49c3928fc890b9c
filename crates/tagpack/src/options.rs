//! Encoder and decoder tunables.

/// Options controlling encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Bytes preallocated for each fresh output buffer.
    pub initial_capacity: usize,
    /// Width in bytes reserved for the byte-length prefix of in-field
    /// containers before their payload size is known. Payloads whose length
    /// needs more bytes are shifted once the size is known.
    pub length_slot: usize,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            length_slot: 1,
        }
    }
}

/// Options controlling decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Maximum nesting of arrays, maps and `any` wrappers. The default keeps
    /// the deepest accepted input within a 2 MiB thread stack in debug builds.
    pub max_depth: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}
