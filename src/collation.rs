//! Locale-aware string comparison for the name-based sort keys.
//!
//! Approximates the root collation order browsers use for
//! `localeCompare`, as a three-level comparison:
//!
//! 1. **Primary**: base letters, ignoring case and common Latin diacritics.
//!    Whitespace sorts before punctuation, punctuation before digits,
//!    digits before letters. `ß`, `æ` and `œ` expand to two letters.
//! 2. **Secondary**: unaccented before accented.
//! 3. **Tertiary**: lower case before upper case.
//!
//! Both sides are NFC-normalized first, so decomposed input (a base letter
//! followed by combining marks) compares like its precomposed form.
//!
//! Remaining ties fall back to code point order, so [`locale_compare`] is a
//! total order and stable sorts over it are reproducible.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;

/// Character classes in primary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Digit,
    Letter,
}

fn classify(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Whitespace
    } else if ch.is_numeric() {
        CharClass::Digit
    } else if ch.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Punctuation
    }
}

/// Compare two strings in natural alphabetical order.
pub fn locale_compare(left: &str, right: &str) -> Ordering {
    let (l, r): (String, String) = (left.nfc().collect(), right.nfc().collect());
    primary_key(&l)
        .cmp(&primary_key(&r))
        .then_with(|| accent_key(&l).cmp(&accent_key(&r)))
        .then_with(|| case_key(&l).cmp(&case_key(&r)))
        .then_with(|| l.cmp(&r))
        .then_with(|| left.cmp(right))
}

fn primary_key(s: &str) -> Vec<(CharClass, char)> {
    s.chars()
        .flat_map(|ch| {
            let lower = ch.to_lowercase().next().unwrap_or(ch);
            fold_letter(lower)
                .into_iter()
                .flatten()
                .map(move |base| (classify(ch), base))
        })
        .collect()
}

fn accent_key(s: &str) -> Vec<bool> {
    s.chars()
        .map(|ch| {
            let lower = ch.to_lowercase().next().unwrap_or(ch);
            fold_letter(lower) != [Some(lower), None]
        })
        .collect()
}

fn case_key(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}

/// Map a lower-case character to its base letter(s).
///
/// Covers Latin-1 Supplement and Latin Extended-A; anything else maps to
/// itself.
fn fold_letter(ch: char) -> [Option<char>; 2] {
    let base = match ch {
        'ß' => return [Some('s'), Some('s')],
        'æ' => return [Some('a'), Some('e')],
        'œ' => return [Some('o'), Some('e')],
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    };
    [Some(base), None]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(words: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = words.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| locale_compare(a, b));
        v
    }

    #[test]
    fn case_does_not_split_the_alphabet() {
        // Byte order would put every upper-case letter first.
        assert_eq!(sorted(&["banana", "Apple", "cherry"]), ["Apple", "banana", "cherry"]);
    }

    #[test]
    fn lower_case_first_on_case_only_ties() {
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Bart", "bart"), Ordering::Greater);
    }

    #[test]
    fn decomposed_input_compares_like_precomposed() {
        let nfd = "Re\u{0301}sume\u{0301}";
        assert_eq!(locale_compare(nfd, "Rest"), locale_compare("Résumé", "Rest"));
        assert_eq!(locale_compare(nfd, "Rest"), Ordering::Greater);
        assert_eq!(locale_compare("E\u{0301}milie", "Zoe"), Ordering::Less);
        assert_eq!(
            sorted(&["Zoe", "E\u{0301}mile", "Anna"]),
            ["Anna", "E\u{0301}mile", "Zoe"]
        );
    }

    #[test]
    fn accents_sort_with_their_base_letter() {
        assert_eq!(sorted(&["Zoe", "Émilie", "Anna"]), ["Anna", "Émilie", "Zoe"]);
        assert_eq!(locale_compare("résumé", "resume"), Ordering::Greater);
        assert_eq!(locale_compare("résumé", "rested"), Ordering::Greater);
        assert_eq!(locale_compare("resumes", "résumé"), Ordering::Greater);
    }

    #[test]
    fn sharp_s_expands() {
        assert_eq!(locale_compare("straße", "strasse"), Ordering::Greater);
        assert_eq!(locale_compare("straße", "strasset"), Ordering::Less);
    }

    #[test]
    fn punctuation_and_digits_before_letters() {
        assert_eq!(sorted(&["b", "_a", "1a", " z"]), [" z", "_a", "1a", "b"]);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(locale_compare("Sum", "Summer"), Ordering::Less);
        assert_eq!(locale_compare("", "a"), Ordering::Less);
    }

    #[test]
    fn equal_only_for_identical_strings() {
        assert_eq!(locale_compare("Amy", "Amy"), Ordering::Equal);
        assert_ne!(locale_compare("Amy", "amy"), Ordering::Equal);
    }

    #[test]
    fn antisymmetric() {
        let words = ["a", "A", "á", "ab", "Ab", "b", "ß", "ss", "1", "-"];
        for l in words {
            for r in words {
                assert_eq!(locale_compare(l, r), locale_compare(r, l).reverse(), "{l} vs {r}");
            }
        }
    }
}
