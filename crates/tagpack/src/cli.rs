//! Logic behind the `tagpack-pack` and `tagpack-unpack` binaries.

use thiserror::Error;

use crate::{decode, encode, DecodeError, JsonConversionError, Value};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Conversion(#[from] JsonConversionError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Encodes a JSON document as a tagpack envelope.
pub fn pack(json: &str) -> Result<Vec<u8>, CliError> {
    let json: serde_json::Value = serde_json::from_str(json)?;
    let value = Value::try_from(json)?;
    Ok(encode(&value))
}

/// Decodes a tagpack envelope into a JSON string.
pub fn unpack(bytes: &[u8], pretty: bool) -> Result<String, CliError> {
    let json = serde_json::Value::from(decode(bytes)?);
    let out = if pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_then_unpack() {
        let bytes = pack(r#"{"b": [1, -2, "x"], "a": true}"#).unwrap();
        assert_eq!(&bytes[..2], [0x00, 0x23]);
        assert_eq!(
            unpack(&bytes, false).unwrap(),
            r#"{"b":[1,-2,"x"],"a":true}"#
        );
    }

    #[test]
    fn errors_are_reported() {
        assert!(matches!(pack("{"), Err(CliError::Json(_))));
        assert!(matches!(
            pack("[null]"),
            Err(CliError::Conversion(JsonConversionError::Null))
        ));
        assert!(matches!(
            unpack(&[0x00, 0x10], false),
            Err(CliError::Decode(DecodeError::TruncatedInput { offset: 2 }))
        ));
    }
}
