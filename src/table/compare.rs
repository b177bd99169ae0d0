//! Cell comparison for sortable tables.
//!
//! Two cells compare numerically when both are non-empty and both read as
//! numbers; every other pair falls back to a locale-style string ordering.

use std::cmp::Ordering;

/// Compare two cell display values.
///
/// Values are trimmed before comparison. Numeric comparison applies only
/// when both trimmed values are non-empty and both parse with
/// [`parse_number`]; equal numbers (including `Infinity` against itself)
/// compare equal.
pub fn compare_cells(v1: &str, v2: &str) -> Ordering {
    let v1 = v1.trim();
    let v2 = v2.trim();

    if !v1.is_empty() && !v2.is_empty() {
        if let (Some(a), Some(b)) = (parse_number(v1), parse_number(v2)) {
            return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        }
    }

    locale_compare(v1, v2)
}

/// Parse a cell value the way a loosely typed host coerces text to a number.
///
/// Accepts an optional sign, decimal digits with optional fraction and
/// exponent (`"1."`, `".5"`, `"2e-3"`), `Infinity`, and unsigned
/// `0x`/`0o`/`0b` integer literals. Surrounding whitespace is ignored.
/// Returns `None` for empty input and for words such as `inf` or `NaN`.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(value) = parse_radix_literal(s) {
        return Some(value);
    }

    let (sign, body) = match s.as_bytes()[0] {
        b'+' => (1.0, &s[1..]),
        b'-' => (-1.0, &s[1..]),
        _ => (1.0, s),
    };

    if body == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    if !is_decimal_literal(body) {
        return None;
    }

    body.parse::<f64>().ok().map(|v| sign * v)
}

/// Parse `0x1F`, `0o17`, `0b101` style literals. Signs are not allowed.
fn parse_radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }

    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    s[2..].chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Check `digits [. digits] [e [+-] digits]` with at least one mantissa digit.
fn is_decimal_literal(body: &str) -> bool {
    let bytes = body.as_bytes();
    let mut i = 0;
    let mut mantissa_digits = 0;

    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exponent_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exponent_start {
            return false;
        }
    }

    i == bytes.len()
}

/// Locale-style string ordering.
///
/// Approximates root-locale collation by comparing, in order:
/// character class and case/accent-folded letters, then accents, then case
/// (lowercase first), and finally raw code points so the result is total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| {
        s.chars()
            .map(|c| {
                let base = fold_accent(c).0;
                let lower = base.to_lowercase().next().unwrap_or(base);
                (char_class(base), lower)
            })
            .collect::<Vec<_>>()
    };

    primary(a)
        .cmp(&primary(b))
        .then_with(|| {
            a.chars()
                .map(|c| fold_accent(c).1)
                .cmp(b.chars().map(|c| fold_accent(c).1))
        })
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Collation class: whitespace, then punctuation and symbols, then digits,
/// then letters.
fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_alphabetic() {
        3
    } else if c.is_numeric() {
        2
    } else {
        1
    }
}

/// Map a Latin letter with a diacritic to its base letter.
///
/// Returns the base character and whether a diacritic was removed.
fn fold_accent(c: char) -> (char, bool) {
    let base = match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => 'A',
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => 'C',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'Ď' => 'D',
        'ď' => 'd',
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => 'G',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => 'I',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => 'N',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => 'O',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'Ŕ' | 'Ŗ' | 'Ř' => 'R',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => 'S',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'Ţ' | 'Ť' => 'T',
        'ţ' | 'ť' => 't',
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => 'U',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'Ý' | 'Ÿ' => 'Y',
        'ý' | 'ÿ' => 'y',
        'Ź' | 'Ż' | 'Ž' => 'Z',
        'ź' | 'ż' | 'ž' => 'z',
        _ => return (c, false),
    };
    (base, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_integers_and_decimals() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-3.5"), Some(-3.5));
        assert_eq!(parse_number("+7"), Some(7.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("  12  "), Some(12.0));
    }

    #[test]
    fn test_parse_number_radix_literals() {
        assert_eq!(parse_number("0x1F"), Some(31.0));
        assert_eq!(parse_number("0o17"), Some(15.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number("-0x10"), None);
        assert_eq!(parse_number("0x"), None);
    }

    #[test]
    fn test_parse_number_infinity() {
        assert_eq!(parse_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_parse_number_rejects_words() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("1e"), None);
        assert_eq!(parse_number("2024-01-05"), None);
    }

    #[test]
    fn test_compare_cells_numeric() {
        assert_eq!(compare_cells("10", "2"), Ordering::Greater);
        assert_eq!(compare_cells("2", "10"), Ordering::Less);
        assert_eq!(compare_cells("3.0", "3"), Ordering::Equal);
        assert_eq!(compare_cells("Infinity", "Infinity"), Ordering::Equal);
    }

    #[test]
    fn test_compare_cells_mixed_falls_back_to_strings() {
        assert_eq!(compare_cells("10", "abc"), Ordering::Less);
        assert_eq!(compare_cells("abc", "2"), Ordering::Greater);
    }

    #[test]
    fn test_compare_cells_empty_is_not_numeric() {
        // An empty cell never takes the numeric path
        assert_eq!(compare_cells("", "5"), Ordering::Less);
        assert_eq!(compare_cells("5", ""), Ordering::Greater);
        assert_eq!(compare_cells("", ""), Ordering::Equal);
    }

    #[test]
    fn test_locale_compare_case_insensitive_primary() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_locale_compare_lowercase_first_on_tie() {
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Oak St", "oak st"), Ordering::Greater);
    }

    #[test]
    fn test_locale_compare_accents() {
        assert_eq!(locale_compare("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_compare("résumé", "rf"), Ordering::Less);
    }

    #[test]
    fn test_locale_compare_character_classes() {
        assert_eq!(locale_compare(" a", "a"), Ordering::Less);
        assert_eq!(locale_compare("_x", "1x"), Ordering::Less);
        assert_eq!(locale_compare("9", "a"), Ordering::Less);
    }

    #[test]
    fn test_locale_compare_is_total() {
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
        assert_ne!(locale_compare("a", "b"), Ordering::Equal);
    }
}
