use unicode_normalization::UnicodeNormalization;

/// Normalize text scraped from markup: NFC form, whitespace runs collapsed
/// to a single space, ends trimmed.
///
/// Issue names are built from this, and must come out identical on every
/// run for the library lookup to match.
pub fn normalize_text(input: &str) -> String {
    let nfc: String = input.nfc().collect();
    nfc.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_nfc() {
        let decomposed = "Pok\u{0065}\u{0301}mon";
        assert_eq!(normalize_text(decomposed), "Pok\u{00e9}mon");
    }

    #[test]
    fn test_collapses_whitespace() {
        let input = "\n      Saga   #1\n\t (2012)  ";
        assert_eq!(normalize_text(input), "Saga #1 (2012)");
    }
}
