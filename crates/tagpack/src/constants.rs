//! Wire constants: envelope version and type tags.

/// Envelope format version written before every top-level value.
pub const FORMAT_VERSION: u8 = 0x00;

/// One-byte tag naming the encode/decode routine of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TypeId {
    /// Self-describing value: another tag follows.
    Any = 0x01,
    Bool = 0x08,
    U8 = 0x10,
    U16 = 0x11,
    U32 = 0x12,
    U64 = 0x13,
    I8 = 0x14,
    I16 = 0x15,
    I32 = 0x16,
    I64 = 0x17,
    F32 = 0x18,
    F64 = 0x19,
    VarUint = 0x1c,
    VarInt = 0x1d,
    Str = 0x20,
    Array = 0x22,
    Map = 0x23,
    Instant = 0x30,
    /// Instant followed by a 4-byte sub-millisecond slot.
    InstantNanos = 0x31,
    Duration = 0x32,
    Uuid = 0x33,
}

impl TypeId {
    pub fn from_u8(byte: u8) -> Option<Self> {
        let id = match byte {
            0x01 => Self::Any,
            0x08 => Self::Bool,
            0x10 => Self::U8,
            0x11 => Self::U16,
            0x12 => Self::U32,
            0x13 => Self::U64,
            0x14 => Self::I8,
            0x15 => Self::I16,
            0x16 => Self::I32,
            0x17 => Self::I64,
            0x18 => Self::F32,
            0x19 => Self::F64,
            0x1c => Self::VarUint,
            0x1d => Self::VarInt,
            0x20 => Self::Str,
            0x22 => Self::Array,
            0x23 => Self::Map,
            0x30 => Self::Instant,
            0x31 => Self::InstantNanos,
            0x32 => Self::Duration,
            0x33 => Self::Uuid,
            _ => return None,
        };
        Some(id)
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Payload width in bytes for fixed-width tags.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Bool | Self::U8 | Self::I8 => Some(1),
            Self::U16 | Self::I16 => Some(2),
            Self::U32 | Self::I32 | Self::F32 => Some(4),
            Self::U64 | Self::I64 | Self::F64 | Self::Instant | Self::Duration => Some(8),
            Self::InstantNanos => Some(12),
            Self::Uuid => Some(16),
            _ => None,
        }
    }
}

impl From<TypeId> for u8 {
    fn from(id: TypeId) -> u8 {
        id as u8
    }
}

impl TryFrom<u8> for TypeId {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, u8> {
        TypeId::from_u8(byte).ok_or(byte)
    }
}
