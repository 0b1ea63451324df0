//! String formatting utilities for UI rendering.

use token_core::Address;

/// Render a raw amount with `decimals` fractional digits.
///
/// `format_amount(505, 2)` is `"5.05"`. Trailing zeros of the fraction are
/// kept so columns line up.
pub fn format_amount(amount: u128, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let digits = amount.to_string();
    let decimals = decimals as usize;
    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
    } else {
        digits
    };
    let split = padded.len() - decimals;
    format!("{}.{}", &padded[..split], &padded[split..])
}

/// Signed variant of [`format_amount`], always carrying a sign.
pub fn format_delta(delta: i128, decimals: u8) -> String {
    let sign = if delta < 0 { "-" } else { "+" };
    format!("{}{}", sign, format_amount(delta.unsigned_abs(), decimals))
}

/// First and last 4 hex digits of an address, e.g. `7a2e..5678`.
pub fn short_address(address: &Address) -> String {
    let hex = address.as_uuid().simple().to_string();
    format!("{}..{}", &hex[..4], &hex[hex.len() - 4..])
}

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_without_decimals() {
        assert_eq!(format_amount(100_000, 0), "100000");
        assert_eq!(format_amount(0, 0), "0");
    }

    #[test]
    fn test_format_amount_with_decimals() {
        assert_eq!(format_amount(505, 2), "5.05");
        assert_eq!(format_amount(5, 2), "0.05");
        assert_eq!(format_amount(0, 3), "0.000");
        assert_eq!(format_amount(1_000_000_000_000_000_000, 18), "1.000000000000000000");
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(-50, 0), "-50");
        assert_eq!(format_delta(50, 0), "+50");
        assert_eq!(format_delta(-5, 1), "-0.5");
        assert_eq!(format_delta(0, 0), "+0");
    }

    #[test]
    fn test_short_address() {
        let addr: Address = "7a2e3c0b-1234-5678-9abc-def012345678".parse().unwrap();
        assert_eq!(short_address(&addr), "7a2e..5678");
        assert_eq!(short_address(&Address::from_u128(2)), "0000..0002");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
    }
}
