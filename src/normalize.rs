//! Text canonicalization for guess/secret equality.

/// Canonicalizes free text for equality comparison.
///
/// Drops every character that is not an ASCII letter or digit, then
/// lowercases the remainder. Never used for display.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_case() {
        assert_eq!(normalize("Red Apple!"), "redapple");
        assert_eq!(normalize("red-apple"), "redapple");
        assert_eq!(normalize("Red Apple!"), normalize("red  apple"));
    }

    #[test]
    fn idempotent() {
        for s in ["", "Telephone", "a b c", "  42! ", "Crème brûlée"] {
            assert_eq!(normalize(&normalize(s)), normalize(s));
        }
    }

    #[test]
    fn empty_and_symbol_only_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!--  ~"), "");
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        assert_eq!(normalize("café"), "caf");
        assert_eq!(normalize("naïve"), "nave");
    }

    #[test]
    fn digits_survive() {
        assert_eq!(normalize("Route 66"), "route66");
    }
}
