//! Phone normalization for Brazilian mobile numbers.

/// Country calling code prepended to bare local numbers.
const COUNTRY_PREFIX: &str = "55";

/// Number of digits in a local mobile number (2-digit area code + 9 digits).
const LOCAL_NUMBER_LEN: usize = 11;

/// Turn a raw phone string into a canonical dialable digit string.
///
/// Strips every non-digit character and any leading zeros, then prepends the
/// `55` country code when the remainder looks like a bare 11-digit local
/// number. Numbers already carrying the country code pass through unchanged;
/// anything else is returned as-is.
///
/// The function is total: malformed input yields an empty or unusable string
/// rather than an error, and the caller must check before dialing.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_start_matches('0');

    if digits.starts_with(COUNTRY_PREFIX) {
        return digits.to_string();
    }

    if digits.len() == LOCAL_NUMBER_LEN {
        return format!("{COUNTRY_PREFIX}{digits}");
    }

    digits.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_formatted_local_number() {
        assert_eq!(normalize_phone("(16)99624-6673"), "5516996246673");
    }

    #[test]
    fn test_normalize_already_prefixed() {
        assert_eq!(normalize_phone("5516996246673"), "5516996246673");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_phone("(11) 98765-4321");
        assert_eq!(normalize_phone(&once), once);
    }

    #[test]
    fn test_normalize_strips_leading_zeros() {
        assert_eq!(normalize_phone("0016996246673"), "5516996246673");
    }

    #[test]
    fn test_normalize_short_number_passes_through() {
        // No country code assumed for lengths other than 11
        assert_eq!(normalize_phone("996246673"), "996246673");
    }

    #[test]
    fn test_normalize_empty_and_garbage() {
        assert_eq!(normalize_phone(""), "");
        assert_eq!(normalize_phone("abc-()"), "");
    }

    #[test]
    fn test_normalize_all_zeros() {
        assert_eq!(normalize_phone("000"), "");
    }
}
