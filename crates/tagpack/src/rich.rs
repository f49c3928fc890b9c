//! Instants, durations and UUIDs.
//!
//! - instant: `i64` milliseconds since the Unix epoch.
//! - instant with nanos: the same followed by a `u32` sub-millisecond slot.
//!   The slot is written as zero and ignored on read.
//! - duration: opaque `i64`; its unit belongs to the caller.
//! - uuid: 16 opaque bytes.

use tagpack_buffers::{Reader, Writer};

use crate::DecodeError;

pub fn write_instant(writer: &mut Writer, millis: i64) {
    writer.i64(millis);
}

pub fn write_instant_nanos(writer: &mut Writer, millis: i64) {
    writer.i64(millis);
    writer.u32(0);
}

pub fn write_duration(writer: &mut Writer, value: i64) {
    writer.i64(value);
}

pub fn write_uuid(writer: &mut Writer, uuid: &[u8; 16]) {
    writer.buf(uuid);
}

pub fn read_instant(reader: &mut Reader<'_>) -> Result<i64, DecodeError> {
    let offset = reader.pos();
    reader
        .i64()
        .map_err(|err| DecodeError::from_buffer(err, offset))
}

pub fn read_instant_nanos(reader: &mut Reader<'_>) -> Result<i64, DecodeError> {
    let offset = reader.pos();
    let bytes = reader
        .array::<12>()
        .map_err(|err| DecodeError::from_buffer(err, offset))?;
    let mut millis = [0u8; 8];
    millis.copy_from_slice(&bytes[..8]);
    Ok(i64::from_le_bytes(millis))
}

pub fn read_duration(reader: &mut Reader<'_>) -> Result<i64, DecodeError> {
    let offset = reader.pos();
    reader
        .i64()
        .map_err(|err| DecodeError::from_buffer(err, offset))
}

pub fn read_uuid(reader: &mut Reader<'_>) -> Result<[u8; 16], DecodeError> {
    let offset = reader.pos();
    reader
        .array::<16>()
        .map_err(|err| DecodeError::from_buffer(err, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_epoch_is_eight_zero_bytes() {
        let mut writer = Writer::new();
        write_instant(&mut writer, 0);
        assert_eq!(writer.flush(), [0u8; 8]);
    }

    #[test]
    fn instant_nanos_slot_is_zero_and_ignored() {
        let mut writer = Writer::new();
        write_instant_nanos(&mut writer, 1_700_000_000_123);
        let mut data = writer.flush();
        assert_eq!(data.len(), 12);
        assert_eq!(&data[8..], [0, 0, 0, 0]);

        data[8..].copy_from_slice(&[1, 2, 3, 4]);
        let mut reader = Reader::new(&data);
        assert_eq!(read_instant_nanos(&mut reader), Ok(1_700_000_000_123));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn negative_instant_before_epoch() {
        let mut writer = Writer::new();
        write_instant(&mut writer, -86_400_000);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(read_instant(&mut reader), Ok(-86_400_000));
    }

    #[test]
    fn uuid_bytes_are_opaque() {
        let uuid: [u8; 16] = core::array::from_fn(|i| i as u8 * 17);
        let mut writer = Writer::new();
        write_uuid(&mut writer, &uuid);
        let data = writer.flush();
        assert_eq!(data, uuid);
        let mut reader = Reader::new(&data);
        assert_eq!(read_uuid(&mut reader), Ok(uuid));
    }

    #[test]
    fn short_reads_report_offset() {
        let data = [0u8; 11];
        let mut reader = Reader::at(&data, 2);
        assert_eq!(
            read_instant_nanos(&mut reader),
            Err(DecodeError::TruncatedInput { offset: 2 })
        );
        assert_eq!(
            read_uuid(&mut reader),
            Err(DecodeError::TruncatedInput { offset: 2 })
        );
        assert_eq!(reader.pos(), 2);
        assert!(read_duration(&mut reader).is_ok());
    }
}
