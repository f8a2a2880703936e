//! Address utilities
//!
//! Addresses arrive from configuration and the transaction service in mixed
//! case (EIP-55 checksummed or not). All comparisons go through these helpers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EVM_ADDRESS: Regex = Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap();
}

/// Addresses shorter than this are shown verbatim
pub const MIN_SHORTEN_LEN: usize = 10;

/// Separator between the kept head and tail of a shortened address
pub const ELLIPSIS: &str = "...";

/// Trimmed, lowercased form used as a map key and in signer sets
pub fn normalise(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

/// Case-insensitive address equality
pub fn same_address(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// First 6 and last 4 characters joined by `...`
///
/// # Examples
/// ```
/// use safe_queue_monitor::utils::address::shorten;
///
/// assert_eq!(shorten("0x1234567890abcdef1234"), "0x1234...1234");
/// assert_eq!(shorten("0xabc"), "0xabc");
/// ```
pub fn shorten(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() < MIN_SHORTEN_LEN {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, ELLIPSIS, tail)
}

pub fn is_valid_evm_address(address: &str) -> bool {
    EVM_ADDRESS.is_match(address)
}
