//! Append-only byte buffer with a write cursor and exact growth.

use tracing::trace;

/// Capacity below which the buffer doubles on growth; above it, growth is
/// linear in [`LINEAR_GROWTH_STEP`] increments.
pub const DOUBLING_LIMIT: usize = 1 << 20;

/// Growth increment once the buffer is past [`DOUBLING_LIMIT`].
pub const LINEAR_GROWTH_STEP: usize = 1 << 10;

/// A byte buffer writer that grows automatically as needed.
///
/// All multi-byte primitives are written little-endian.
///
/// # Example
///
/// ```
/// use tagpack_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u16(0x0302);
/// let data = writer.flush();
/// assert_eq!(data, [0x01, 0x02, 0x03]);
/// ```
#[derive(Debug, Clone)]
pub struct Writer {
    /// Backing storage. `bytes.len()` is the capacity; only `[0, pos)` is
    /// logically written.
    bytes: Vec<u8>,
    pos: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates an empty writer. The first write allocates.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a writer with `capacity` bytes preallocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; capacity],
            pos: 0,
        }
    }

    /// Current write position, equal to the number of bytes written.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Allocated size of the backing storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Ensures at least `n` more bytes fit past the cursor.
    pub fn reserve(&mut self, n: usize) {
        let required = self.pos + n;
        let capacity = self.bytes.len();
        if required <= capacity {
            return;
        }
        let candidate = if capacity < DOUBLING_LIMIT {
            capacity * 2
        } else {
            capacity + LINEAR_GROWTH_STEP
        };
        let new_size = candidate.max(required);
        trace!(from = capacity, to = new_size, "growing write buffer");
        self.bytes.resize(new_size, 0);
    }

    /// Advances the cursor by `n` bytes, leaving a zero-filled gap.
    pub fn skip(&mut self, n: usize) {
        self.reserve(n);
        self.bytes[self.pos..self.pos + n].fill(0);
        self.pos += n;
    }

    /// Overwrites already-written bytes starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the patch would extend past the write cursor.
    pub fn patch(&mut self, offset: usize, data: &[u8]) {
        let end = offset + data.len();
        assert!(end <= self.pos, "patch past write cursor");
        self.bytes[offset..end].copy_from_slice(data);
    }

    /// Moves `[offset, pos)` right by `by` bytes and advances the cursor.
    ///
    /// The `by` bytes opened at `offset` keep their previous content and are
    /// expected to be patched by the caller.
    pub fn shift_right(&mut self, offset: usize, by: usize) {
        assert!(offset <= self.pos, "shift start past write cursor");
        self.reserve(by);
        self.bytes.copy_within(offset..self.pos, offset + by);
        self.pos += by;
    }

    /// Rewinds the cursor to the start without releasing capacity.
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    /// Written bytes as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.pos]
    }

    /// Copies out the written bytes and rewinds the cursor.
    pub fn flush(&mut self) -> Vec<u8> {
        let result = self.bytes[..self.pos].to_vec();
        self.pos = 0;
        result
    }

    /// Consumes the writer, returning the written bytes without copying.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.bytes.truncate(self.pos);
        self.bytes
    }

    #[inline]
    fn put<const N: usize>(&mut self, bytes: [u8; N]) {
        self.reserve(N);
        self.bytes[self.pos..self.pos + N].copy_from_slice(&bytes);
        self.pos += N;
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.put([val]);
    }

    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.put(val.to_le_bytes());
    }

    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.put(val.to_le_bytes());
    }

    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.put(val.to_le_bytes());
    }

    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.put(val.to_le_bytes());
    }

    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.put(val.to_le_bytes());
    }

    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.put(val.to_le_bytes());
    }

    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.put(val.to_le_bytes());
    }

    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.put(val.to_le_bytes());
    }

    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.put(val.to_le_bytes());
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        let length = buf.len();
        self.reserve(length);
        self.bytes[self.pos..self.pos + length].copy_from_slice(buf);
        self.pos += length;
    }

    /// Writes the UTF-8 bytes of `s`. Returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.buf(s.as_bytes());
        s.len()
    }
}
