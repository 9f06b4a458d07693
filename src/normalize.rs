//! Merchant description normalization.
//!
//! Bank narratives for the same merchant drift constantly ("POS PURCHASE
//! WOOLWORTHS 1234 CAPE TOWN ZA" vs "WOOLWORTHS 5678 CLAREMONT"). Collapsing
//! them into a short canonical key is what makes recurring-cost detection and
//! upcoming-obligation matching possible at all.

/// Sentinel returned for descriptions that normalize away to nothing.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Tokens that carry no merchant identity: banking jargon, channel markers,
/// common locale noise, legal-entity suffixes and country codes.
const NOISE_TOKENS: &[&str] = &[
    // banking jargon / channel markers
    "POS", "PURCHASE", "CARD", "DEBIT", "CREDIT", "ORDER", "PAYMENT", "PMT", "EFT", "TFR",
    "TRANSFER", "WITHDRAWAL", "DEPOSIT", "FEE", "FEES", "ACB", "NAEDO", "DEBICHECK", "STOP",
    "INTERNET", "ONLINE", "BANKING", "APP", "MOBILE", "RECURRING", "MAGTAPE", "CHEQUE",
    // legal-entity suffixes
    "PTY", "LTD", "LLC", "INC", "CC", "CO", "SA", "PLC",
    // country / region codes that trail card narratives
    "ZA", "US", "USA", "GB", "UK", "NL", "AU", "COZA",
];

const MONTH_TOKENS: &[&str] = &[
    "JAN", "JANUARY", "FEB", "FEBRUARY", "MAR", "MARCH", "APR", "APRIL", "MAY", "JUN", "JUNE",
    "JUL", "JULY", "AUG", "AUGUST", "SEP", "SEPT", "SEPTEMBER", "OCT", "OCTOBER", "NOV",
    "NOVEMBER", "DEC", "DECEMBER",
];

/// Collapse a raw merchant string into a canonical grouping key.
///
/// Upper-cases, strips digits/punctuation, drops noise and month tokens, and
/// keeps the first two surviving words. Deterministic and idempotent:
/// `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(description: &str) -> String {
    // The sentinel must survive a second pass unchanged.
    if description.trim().eq_ignore_ascii_case(UNCATEGORIZED) {
        return UNCATEGORIZED.to_string();
    }

    let upper = description.to_uppercase();
    let cleaned: String = upper
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
        .collect();

    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|t| !NOISE_TOKENS.contains(t) && !MONTH_TOKENS.contains(t))
        .take(2)
        .collect();

    if tokens.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        tokens.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_banking_noise() {
        assert_eq!(
            normalize("POS PURCHASE WOOLWORTHS 1234 CAPE TOWN ZA"),
            "WOOLWORTHS CAPE"
        );
        assert_eq!(normalize("DEBIT ORDER DISCOVERY 0345"), "DISCOVERY");
    }

    #[test]
    fn test_strips_months_and_legal_suffixes() {
        assert_eq!(normalize("ACME PTY LTD MAR 2024"), "ACME");
        assert_eq!(normalize("RENT PAYMENT FEBRUARY"), "RENT");
    }

    #[test]
    fn test_groups_formatting_drift() {
        let a = normalize("WOOLWORTHS 1234 CLAREMONT");
        let b = normalize("POS WOOLWORTHS 9981 CLAREMONT ZA");
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_yields_sentinel() {
        assert_eq!(normalize(""), UNCATEGORIZED);
        assert_eq!(normalize("   "), UNCATEGORIZED);
        assert_eq!(normalize("123 456 *** 2024"), UNCATEGORIZED);
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "POS PURCHASE WOOLWORTHS 1234 CAPE TOWN ZA",
            "DEBIT ORDER DISCOVERY",
            "",
            "Netflix.com 0231",
            "ACME PTY LTD MAR 2024",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_idempotent_fuzzed() {
        use rand::{distributions::Alphanumeric, Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let len = rng.gen_range(0..40);
            let s: String = (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(len)
                .map(char::from)
                .collect();
            let once = normalize(&s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }
}
