//! Validator public-key helpers for `_publicKeys` payloads.
//!
//! Exit and CL-fee withdrawal calls pass their validators as one `bytes`
//! value: the BLS public keys concatenated back to back.

use kilncodec_core::{
    error::DecodeError,
    hexutil::{parse_hex, to_hex},
};

/// Length of a BLS12-381 validator public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 48;

/// Returns `true` if `len` is a non-empty whole number of public keys.
pub fn is_whole_keys(len: usize) -> bool {
    len != 0 && len % PUBLIC_KEY_LENGTH == 0
}

/// Split a concatenated payload into individual public keys.
pub fn split_public_keys(payload: &[u8]) -> Result<Vec<Vec<u8>>, DecodeError> {
    if !is_whole_keys(payload.len()) {
        return Err(DecodeError::InvalidPublicKeys {
            len: payload.len(),
            key_len: PUBLIC_KEY_LENGTH,
        });
    }
    Ok(payload.chunks(PUBLIC_KEY_LENGTH).map(<[u8]>::to_vec).collect())
}

/// Same as [`split_public_keys`] for a `0x`-prefixed hex value, such as the
/// `value` of a decoded `_publicKeys` parameter.
pub fn split_public_keys_hex(value: &str) -> Result<Vec<String>, DecodeError> {
    let payload = parse_hex(value)?;
    Ok(split_public_keys(&payload)?
        .iter()
        .map(|k| to_hex(k))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_two_keys() {
        let mut payload = vec![0x01u8; 48];
        payload.extend_from_slice(&[0x02u8; 48]);
        let keys = split_public_keys(&payload).unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys[0].iter().all(|b| *b == 0x01));
        assert!(keys[1].iter().all(|b| *b == 0x02));
    }

    #[test]
    fn rejects_partial_key() {
        assert_eq!(
            split_public_keys(&[0u8; 50]),
            Err(DecodeError::InvalidPublicKeys { len: 50, key_len: 48 })
        );
    }

    #[test]
    fn rejects_empty() {
        assert!(split_public_keys(&[]).is_err());
        assert!(!is_whole_keys(0));
    }

    #[test]
    fn splits_hex_value() {
        let value = format!("0x{}", "ab".repeat(96));
        let keys = split_public_keys_hex(&value).unwrap();
        assert_eq!(keys, vec![format!("0x{}", "ab".repeat(48)); 2]);
        assert!(split_public_keys_hex("0xzz").is_err());
    }
}
