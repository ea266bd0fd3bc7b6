//! Arabic text normalization for duplicate detection.
//!
//! Arabic names carry practically interchangeable spellings: Hamza seats
//! on Alef, dotted vs dotless final Ya, Ta-Marbuta vs Ha, and optional
//! diacritics. Without canonicalization, exact-string comparison misses
//! most real duplicates entered by different operators.

/// Arabic combining diacritics (tashkeel), U+064B..=U+065F, plus the
/// superscript Alef U+0670.
#[inline]
fn is_diacritic(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}')
}

/// Canonicalize a display string for comparison.
///
/// Pipeline, in order: lowercase (affects Latin script only), strip
/// diacritics, unify Alef variants to plain Alef, Hamza-on-Waw/Ya to the
/// standalone Hamza, Alef-Maksura to Ya, Ta-Marbuta to Ha, then trim and
/// collapse internal whitespace runs to a single space.
///
/// Total and idempotent; empty input yields the empty string.
pub fn normalize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_was_space = true; // swallow leading whitespace
    for ch in input.chars() {
        for lc in ch.to_lowercase() {
            if is_diacritic(lc) {
                continue;
            }
            let mapped = match lc {
                // Alef with Hamza above/below, with Madda, and Alef Wasla
                '\u{0623}' | '\u{0625}' | '\u{0622}' | '\u{0671}' => '\u{0627}',
                // Hamza carried on Waw or Ya
                '\u{0624}' | '\u{0626}' => '\u{0621}',
                // Alef Maksura (dotless final Ya)
                '\u{0649}' => '\u{064A}',
                // Ta-Marbuta
                '\u{0629}' => '\u{0647}',
                other => other,
            };
            if mapped.is_whitespace() {
                if !last_was_space {
                    out.push(' ');
                    last_was_space = true;
                }
            } else {
                out.push(mapped);
                last_was_space = false;
            }
        }
    }
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out
}

/// Whether two strings are equal after normalization.
pub fn texts_equal(a: &str, b: &str) -> bool {
    normalize_text(a) == normalize_text(b)
}

/// Whether the text contains any character from the Arabic block.
pub fn has_arabic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamza_alef_forms_unify() {
        assert_eq!(normalize_text("أحمد"), normalize_text("احمد"));
        assert_eq!(normalize_text("إسلام"), "اسلام");
        assert_eq!(normalize_text("آمال"), "امال");
    }

    #[test]
    fn test_ta_marbuta_and_ha_unify() {
        assert_eq!(normalize_text("فاطمة"), normalize_text("فاطمه"));
        assert_eq!(normalize_text("فاطمة"), "فاطمه");
    }

    #[test]
    fn test_ya_and_alef_maksura_unify() {
        assert_eq!(normalize_text("علي"), normalize_text("على"));
    }

    #[test]
    fn test_hamza_carriers() {
        assert_eq!(normalize_text("مؤمن"), "مءمن");
        assert_eq!(normalize_text("رئيس"), "رءيس");
    }

    #[test]
    fn test_diacritics_stripped() {
        assert_eq!(normalize_text("مُحَمَّد"), "محمد");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(normalize_text("  محمد   حسن  "), normalize_text("محمد حسن"));
        assert_eq!(normalize_text("  محمد \t حسن  "), "محمد حسن");
    }

    #[test]
    fn test_empty_and_non_arabic() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("  Ahmed   ALI "), "ahmed ali");
    }

    #[test]
    fn test_idempotent() {
        for s in [
            "أحمد علي",
            "فاطِمَة  الزهراء",
            "د. محمد السيد",
            "  mixed نص Latin  ",
            "",
        ] {
            let once = normalize_text(s);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn test_texts_equal() {
        assert!(texts_equal("أحمد محمد", "احمد محمد"));
        assert!(!texts_equal("احمد", "محمود"));
    }

    #[test]
    fn test_has_arabic() {
        assert!(has_arabic("احمد"));
        assert!(has_arabic("dr. أحمد"));
        assert!(!has_arabic("Ahmed Ali"));
    }
}
