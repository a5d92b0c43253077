//! Russian-locale string collation for station names.
//!
//! Compares in three passes, like a UCA collator at tertiary strength:
//!
//! 1. Primary: case-insensitive, `ё` equal to `е` and accented Latin
//!    letters equal to their base letter. Scripts are ordered spaces and
//!    punctuation, then digits, then Cyrillic, then Latin, then everything
//!    else.
//! 2. Secondary: unaccented before accented (`е` before `ё`, `e` before `é`).
//! 3. Tertiary: lowercase before uppercase.
//!
//! Strings that tie on all three passes fall back to code point order so
//! the result is a total order.

use std::cmp::Ordering;

/// Compare two strings using Russian collation rules.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use metro_reporter::geo::collate::compare;
///
/// assert_eq!(compare("Арбатская", "Боровицкая"), Ordering::Less);
/// assert_eq!(compare("ёж", "еж"), Ordering::Greater);
/// assert_eq!(compare("Юго-Западная", "Aeroport"), Ordering::Less);
/// ```
pub fn compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| secondary_key(a).cmp(secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

fn primary_key(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.chars().map(|c| {
        let base = base_letter(fold_case(c));
        (script_rank(base), base)
    })
}

fn secondary_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().map(|c| {
        let folded = fold_case(c);
        base_letter(folded) != folded
    })
}

fn tertiary_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().map(char::is_uppercase)
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Strip the diacritic from a lowercase letter. Letters without one are
/// returned unchanged.
fn base_letter(c: char) -> char {
    match c {
        'ё' => 'е',
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

fn script_rank(c: char) -> u8 {
    if c.is_alphabetic() {
        if is_cyrillic(c) {
            2
        } else if is_latin(c) {
            3
        } else {
            4
        }
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{052F}')
}

fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '\u{00C0}'..='\u{024F}')
}
