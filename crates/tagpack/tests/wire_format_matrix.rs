use tagpack::varint::{write_uvarint, write_varint};
use tagpack::{decode, encode, Encoder, Framing, Map, TypeId, Value, Writer};

fn uvarint(value: u128) -> Vec<u8> {
    let mut writer = Writer::new();
    write_uvarint(&mut writer, value);
    writer.flush()
}

fn varint(value: i128) -> Vec<u8> {
    let mut writer = Writer::new();
    write_varint(&mut writer, value);
    writer.flush()
}

#[test]
fn documented_scenarios() {
    assert_eq!(encode(&Value::Bool(true)), [0x00, 0x08, 0x01]);

    assert_eq!(uvarint(300), [0xac, 0x02]);

    let mut instant = vec![0x00, 0x30];
    instant.extend_from_slice(&[0u8; 8]);
    assert_eq!(encode(&Value::Instant(0)), instant);

    assert_eq!(
        encode(&Value::from(vec!["a", "b"])),
        [0x00, 0x22, 0x20, 0x02, 0x01, b'a', 0x01, b'b']
    );

    assert_eq!(
        encode(&Value::from_iter([(1u8, "x")])),
        [0x00, 0x23, 0x10, 0x20, 0x01, 0x01, 0x01, b'x']
    );
}

#[test]
fn varint_minimal_forms() {
    assert_eq!(uvarint(0), [0x00]);
    assert_eq!(uvarint(127), [0x7f]);
    assert_eq!(uvarint(128), [0x80, 0x01]);
    assert_eq!(varint(-1), [0x7f]);
    assert_eq!(varint(64), [0xc0, 0x00]);
    assert_eq!(varint(-64), [0x40]);
}

#[test]
fn scalar_tag_matrix() {
    let cases: Vec<(Value, TypeId, Vec<u8>)> = vec![
        (Value::Bool(false), TypeId::Bool, vec![0x00]),
        (Value::U8(0xab), TypeId::U8, vec![0xab]),
        (Value::U16(0x0102), TypeId::U16, vec![0x02, 0x01]),
        (Value::U32(1), TypeId::U32, vec![0x01, 0, 0, 0]),
        (Value::U64(u64::MAX), TypeId::U64, vec![0xff; 8]),
        (Value::I8(-1), TypeId::I8, vec![0xff]),
        (Value::I16(-2), TypeId::I16, vec![0xfe, 0xff]),
        (Value::I32(i32::MIN), TypeId::I32, vec![0, 0, 0, 0x80]),
        (Value::I64(1), TypeId::I64, vec![1, 0, 0, 0, 0, 0, 0, 0]),
        (Value::F32(1.5), TypeId::F32, 1.5f32.to_le_bytes().to_vec()),
        (Value::F64(-2.25), TypeId::F64, (-2.25f64).to_le_bytes().to_vec()),
        (Value::VarUint(300), TypeId::VarUint, vec![0xac, 0x02]),
        (Value::VarInt(-65), TypeId::VarInt, vec![0xbf, 0x7f]),
        (Value::from(""), TypeId::Str, vec![0x00]),
        (Value::Duration(-1), TypeId::Duration, vec![0xff; 8]),
        (Value::Uuid([0x5a; 16]), TypeId::Uuid, vec![0x5a; 16]),
    ];
    for (value, tag, payload) in cases {
        let mut expected = vec![0x00, tag.as_u8()];
        expected.extend_from_slice(&payload);
        let bytes = encode(&value);
        assert_eq!(bytes, expected, "{value:?}");
        assert_eq!(decode(&bytes), Ok(value));
    }
}

#[test]
fn utf8_string_length_counts_bytes() {
    let bytes = encode(&Value::from("héllo"));
    assert_eq!(&bytes[..3], [0x00, 0x20, 0x06]);
    assert_eq!(decode(&bytes), Ok(Value::from("héllo")));
}

#[test]
fn container_element_tag_matrix() {
    // mixed values fall back to any, each element tagged
    assert_eq!(
        encode(&Value::Array(vec![Value::U8(1), Value::from("a")])),
        [0x00, 0x22, 0x01, 0x02, 0x10, 0x01, 0x20, 0x01, b'a']
    );
    // empty containers use any for every declared tag
    assert_eq!(encode(&Value::Array(vec![])), [0x00, 0x22, 0x01, 0x00]);
    assert_eq!(encode(&Value::Map(Map::new())), [0x00, 0x23, 0x01, 0x01, 0x00]);
    // keys agree, values differ
    assert_eq!(
        encode(&Value::from_iter([
            ("a", Value::Bool(true)),
            ("b", Value::U8(2)),
        ])),
        [
            0x00, 0x23, 0x20, 0x01, 0x02, //
            0x01, b'a', 0x08, 0x01, //
            0x01, b'b', 0x10, 0x02,
        ]
    );
    // nested arrays share the array tag
    assert_eq!(
        encode(&Value::from(vec![vec![1u8], vec![]])),
        [0x00, 0x22, 0x22, 0x02, 0x10, 0x01, 0x01, 0x01, 0x00]
    );
}

#[test]
fn map_preserves_insertion_order() {
    let value = Value::from_iter([("z", 1u8), ("a", 2u8), ("m", 3u8)]);
    let bytes = encode(&value);
    assert_eq!(
        &bytes[5..],
        [0x01, b'z', 0x01, 0x01, b'a', 0x02, 0x01, b'm', 0x03]
    );
    let decoded = decode(&bytes).unwrap();
    let keys: Vec<_> = decoded
        .as_map()
        .unwrap()
        .keys()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn instant_with_nanos_is_read_as_instant() {
    let mut bytes = vec![0x00, 0x31];
    bytes.extend_from_slice(&(-1i64).to_le_bytes());
    bytes.extend_from_slice(&[0u8; 4]);
    assert_eq!(decode(&bytes), Ok(Value::Instant(-1)));
}

#[test]
fn in_field_map_roundtrip() {
    let map = Map::from_iter([
        (Value::from("k1"), Value::VarUint(1)),
        (Value::from("k2"), Value::VarUint(u64::MAX as u128 + 1)),
    ]);
    let mut encoder = Encoder::new();
    encoder.write_map(&map, Framing::InField);
    let bytes = encoder.writer.flush();
    // key tag, value tag, byte length of the entry run
    assert_eq!(&bytes[..2], [0x20, 0x1c]);
    assert_eq!(bytes[2] as usize, bytes.len() - 3);

    let mut decoder = tagpack::Decoder::new(&bytes);
    assert_eq!(decoder.read_map(Framing::InField), Ok(map));
}

#[test]
fn encoder_write_envelope_appends_messages() {
    let mut encoder = Encoder::new();
    encoder.write_envelope(&Value::U8(1));
    encoder.write_envelope(&Value::from("x"));
    let bytes = encoder.writer.flush();
    assert_eq!(bytes, [0x00, 0x10, 0x01, 0x00, 0x20, 0x01, b'x']);

    let (first, used) = tagpack::decode_with_consumed(&bytes).unwrap();
    assert_eq!(first, Value::U8(1));
    assert_eq!(decode(&bytes[used..]), Ok(Value::from("x")));
}
