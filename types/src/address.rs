//! EVM address parsing and validation.

use alloy_primitives::Address;

use crate::TypesError;

/// Whether `s` is a well-formed 20-byte hex address.
///
/// All-lowercase and all-uppercase forms are accepted as-is; mixed case must
/// carry a valid EIP-55 checksum.
pub fn is_valid_address(s: &str) -> bool {
    parse_address(s).is_ok()
}

/// Parse a `0x`-prefixed address, enforcing the checksum on mixed-case input.
pub fn parse_address(s: &str) -> Result<Address, TypesError> {
    let invalid = || TypesError::InvalidAddress(s.to_string());
    let digits = s.strip_prefix("0x").ok_or_else(invalid)?;
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Address::parse_checksummed(s, None).map_err(|_| invalid());
    }
    let bytes = hex::decode(digits).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
    Ok(Address::from_slice(&bytes))
}
