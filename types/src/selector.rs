//! Function selector extraction.
//!
//! A selector is the first 4 bytes of call-data. Inputs shorter than 4 bytes
//! are not rejected: the string form returns whatever prefix exists, the byte
//! form zero-pads on the right.

use alloy_primitives::Selector;

use crate::TypesError;

/// Hex digits in a full selector.
const SELECTOR_HEX_LEN: usize = 8;

/// Return the `0x`-prefixed, lowercase selector of hex call-data.
///
/// The `0x` prefix on the input is optional. Only the digits that end up in
/// the selector are validated.
pub fn extract_selector(data: &str) -> Result<String, TypesError> {
    let digits = data
        .strip_prefix("0x")
        .or_else(|| data.strip_prefix("0X"))
        .unwrap_or(data);
    let prefix: String = digits.chars().take(SELECTOR_HEX_LEN).collect();
    if let Some(bad) = prefix.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(TypesError::InvalidHex(format!(
            "unexpected character {bad:?} in call-data {data:?}"
        )));
    }
    Ok(format!("0x{}", prefix.to_ascii_lowercase()))
}

/// Selector of raw call-data, zero-padded when fewer than 4 bytes are present.
pub fn selector_from_calldata(data: &[u8]) -> Selector {
    let mut out = [0u8; 4];
    let len = data.len().min(4);
    out[..len].copy_from_slice(&data[..len]);
    Selector::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_four_bytes() {
        assert_eq!(extract_selector("0x112233445566778899").unwrap(), "0x11223344");
        assert_eq!(extract_selector("1234567890").unwrap(), "0x12345678");
    }

    #[test]
    fn normalizes_case() {
        assert_eq!(extract_selector("0XABCDEF0123").unwrap(), "0xabcdef01");
    }

    #[test]
    fn short_input_yields_truncated_selector() {
        assert_eq!(extract_selector("0x1234").unwrap(), "0x1234");
        assert_eq!(extract_selector("0x").unwrap(), "0x");
    }

    #[test]
    fn rejects_non_hex_prefix() {
        assert!(extract_selector("0xzz223344").is_err());
        // Garbage past the selector is not inspected.
        assert_eq!(extract_selector("0x11223344zz").unwrap(), "0x11223344");
    }

    #[test]
    fn byte_form_pads_short_calldata() {
        assert_eq!(
            selector_from_calldata(&[0xde, 0xad, 0xbe, 0xef, 0x01]),
            Selector::from([0xde, 0xad, 0xbe, 0xef])
        );
        assert_eq!(selector_from_calldata(&[0xab]), Selector::from([0xab, 0, 0, 0]));
        assert_eq!(selector_from_calldata(&[]), Selector::ZERO);
    }
}
