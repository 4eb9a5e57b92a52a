//! Identifier case helpers.

/// Convert `kebab-case` / `snake_case` to `camelCase`.
///
/// Every `-` or `_` immediately followed by an ASCII letter is dropped and
/// the letter upper-cased. Separators not followed by a letter are kept.
#[must_use]
pub fn to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if matches!(c, '-' | '_') {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_alphabetic() {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::to_camel;

    #[test]
    fn converts_separators() {
        assert_eq!(to_camel("ropsten-staging"), "ropstenStaging");
        assert_eq!(to_camel("binance_test_staging"), "binanceTestStaging");
        assert_eq!(to_camel("ropstenStaging"), "ropstenStaging");
    }

    #[test]
    fn keeps_separators_without_letter() {
        assert_eq!(to_camel("v1-2"), "v1-2");
        assert_eq!(to_camel("trailing_"), "trailing_");
        assert_eq!(to_camel(""), "");
    }
}
