//! Kerning tables
//!
//! The default table is a literal list of pairs with several override
//! passes layered on top, in a fixed order. User pairs from the
//! adjustments document replace defaults, and the dynamic pass for `I`
//! replaces both for the pairs it measures.

use crate::font_source::GlyphBuild;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Left glyph, right glyph
pub type KernKey = (char, char);

pub type KerningTable = BTreeMap<KernKey, i32>;

/// Straight-sided glyphs prone to colliding with each other
pub const STRAIGHT_GLYPHS: &[char] = &['F', 'I', 'T', 'L', 'E', 'H', 'K', 'Z'];

/// Minimum distance kept between `I` and a following capital
pub const I_KERNING_THRESHOLD: f64 = 30.0;

const STRAIGHT_PAIR_KERNING: i32 = 10;

const BASE_PAIRS: &[(&str, i32)] = &[
    // Uppercase combinations
    ("AV", -50), ("AW", -50), ("AY", -50), ("Ta", -30), ("Te", -30), ("To", -30), ("Tr", -30),
    ("Tu", -30), ("Ty", -30), ("Va", -40), ("Ve", -40), ("Vo", -40), ("Wa", -40), ("We", -40),
    ("Wo", -40), ("Ya", -40), ("Ye", -40), ("Yo", -40), ("FA", -30), ("FE", -30), ("FO", -30),
    ("Fr", -30), ("FT", -30),
    // Lowercase combinations
    ("av", -20), ("aw", -20), ("ay", -20), ("fa", -20), ("fe", -20), ("fo", -20), ("fr", -20),
    ("ft", -20), ("ta", -20), ("te", -20), ("to", -20), ("tr", -20), ("tt", -20), ("tu", -20),
    ("ty", -20), ("va", -20), ("ve", -20), ("vo", -20), ("wa", -20), ("we", -20), ("wo", -20),
    ("ya", -20), ("ye", -20), ("yo", -20),
];

/// Digits followed by these lowercase letters are tightened
const DIGIT_FOLLOWERS: &[char] = &['a', 'e', 'o', 'u', 'y'];

/// Straight capital pairs, softened and then zeroed
const STRAIGHT_CAP_PAIRS: &[&str] = &["FO", "FA", "FE", "FI", "FL", "IO", "IA", "IE", "IL", "IN"];

/// Pairs opened up to stop straight stems touching
const SEPARATING_PAIRS: &[(&str, i32)] = &[
    ("FT", 20), ("TF", 20), ("FI", 10), ("IF", 10), ("TI", 10), ("IT", 10), ("TT", 15),
    ("FF", 15), ("II", 10),
];

/// Split a two character pair string into a key
pub fn parse_pair(pair: &str) -> Option<KernKey> {
    let mut chars = pair.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(left), Some(right), None) => Some((left, right)),
        _ => None,
    }
}

fn insert_literal(table: &mut KerningTable, pair: &str, value: i32) {
    if let Some(key) = parse_pair(pair) {
        table.insert(key, value);
    }
}

/// Build the default kerning table with every override pass applied
pub fn default_kerning_pairs() -> KerningTable {
    let mut table = KerningTable::new();

    for &(pair, value) in BASE_PAIRS {
        insert_literal(&mut table, pair, value);
    }
    for digit in '0'..='9' {
        let value = if digit == '1' { -20 } else { -15 };
        for &follower in DIGIT_FOLLOWERS {
            table.insert((digit, follower), value);
        }
    }

    for value in [-10, 0] {
        for pair in STRAIGHT_CAP_PAIRS {
            insert_literal(&mut table, pair, value);
        }
    }

    for &(pair, value) in SEPARATING_PAIRS {
        insert_literal(&mut table, pair, value);
    }

    for &left in STRAIGHT_GLYPHS {
        for &right in STRAIGHT_GLYPHS {
            table.entry((left, right)).or_insert(STRAIGHT_PAIR_KERNING);
        }
    }

    table
}

/// Layer user supplied pairs on top of `table`, scaled by `kerning_factor`.
///
/// Keys that are not exactly two characters are skipped.
pub fn apply_user_pairs(
    table: &mut KerningTable,
    pairs: &BTreeMap<String, f64>,
    kerning_factor: f64,
) {
    for (pair, value) in pairs {
        match parse_pair(pair) {
            Some(key) => {
                let scaled = (value * kerning_factor) as i32;
                debug!("user kerning {pair}: {value} -> {scaled}");
                table.insert(key, scaled);
            }
            None => warn!("Ignoring kerning pair '{pair}': expected exactly two characters"),
        }
    }
}

/// Measure `I` against every capital and return positive kerning for the
/// neighbors that sit closer than the threshold.
pub fn dynamic_i_kerning(glyphs: &[GlyphBuild]) -> Vec<(KernKey, i32)> {
    let Some(glyph_i) = glyphs.iter().find(|glyph| glyph.ch == 'I') else {
        return Vec::new();
    };
    let Some((_, i_max_x)) = glyph_i.x_extent() else {
        return Vec::new();
    };

    let mut pairs = Vec::new();
    for neighbor in 'A'..='Z' {
        let Some(glyph_n) = glyphs.iter().find(|glyph| glyph.ch == neighbor) else {
            continue;
        };
        let Some((n_min_x, _)) = glyph_n.x_extent() else {
            continue;
        };

        // both glyphs measured from their own origin
        let distance = n_min_x + glyph_i.width - i_max_x;
        if distance < I_KERNING_THRESHOLD {
            let value = (I_KERNING_THRESHOLD - distance) as i32;
            debug!("Added dynamic kerning for 'I{neighbor}' with value {value} (distance={distance})");
            pairs.push((('I', neighbor), value));
        }
    }
    pairs
}

/// Restrict a table to pairs whose glyphs are both present
pub fn retain_present(table: &KerningTable, glyphs: &[GlyphBuild]) -> KerningTable {
    let present = |ch: char| glyphs.iter().any(|glyph| glyph.ch == ch);
    table
        .iter()
        .filter(|((left, right), _)| present(*left) && present(*right))
        .map(|(key, value)| (*key, *value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn stem(ch: char, x0: f64, x1: f64, width: f64) -> GlyphBuild {
        let mut glyph = GlyphBuild::new(ch, width);
        glyph.contours.push(vec![
            Point::new(x0, 0.0),
            Point::new(x1, 0.0),
            Point::new(x1, 700.0),
            Point::new(x0, 700.0),
        ]);
        glyph
    }

    #[test]
    fn test_override_order_is_preserved() {
        let table = default_kerning_pairs();
        assert_eq!(table[&('A', 'V')], -50);
        // zeroed after being softened
        assert_eq!(table[&('F', 'O')], 0);
        assert_eq!(table[&('I', 'N')], 0);
        // separating overrides replace the zeroed value
        assert_eq!(table[&('F', 'I')], 10);
        assert_eq!(table[&('F', 'T')], 20);
        assert_eq!(table[&('T', 'T')], 15);
        // digit pairs
        assert_eq!(table[&('1', 'a')], -20);
        assert_eq!(table[&('0', 'y')], -15);
    }

    #[test]
    fn test_straight_pairs_fill_only_missing_entries() {
        let table = default_kerning_pairs();
        assert_eq!(table[&('H', 'Z')], 10);
        assert_eq!(table[&('E', 'L')], 10);
        // already present from an earlier pass
        assert_eq!(table[&('F', 'E')], 0);
        assert_eq!(table[&('F', 'F')], 15);
    }

    #[test]
    fn test_user_pairs_are_scaled_and_validated() {
        let mut table = default_kerning_pairs();
        let mut user = BTreeMap::new();
        user.insert("AV".to_string(), -1.5);
        user.insert("xyz".to_string(), 3.0);
        user.insert("ka".to_string(), 2.0);
        apply_user_pairs(&mut table, &user, 20.0);

        assert_eq!(table[&('A', 'V')], -30);
        assert_eq!(table[&('k', 'a')], 40);
        assert!(!table.keys().any(|(left, _)| *left == 'x'));
    }

    #[test]
    fn test_parse_pair_rejects_wrong_lengths() {
        assert_eq!(parse_pair("Ta"), Some(('T', 'a')));
        assert_eq!(parse_pair("T"), None);
        assert_eq!(parse_pair("Tab"), None);
        assert_eq!(parse_pair(""), None);
    }

    #[test]
    fn test_dynamic_i_kerning_only_below_threshold() {
        let glyphs = vec![
            // I's right edge is 5 units before its advance
            stem('I', 10.0, 95.0, 100.0),
            // H starts 10 units in: distance 15
            stem('H', 10.0, 500.0, 520.0),
            // L starts 40 units in: distance 45
            stem('L', 40.0, 400.0, 430.0),
            GlyphBuild::new('N', 400.0),
        ];
        let pairs = dynamic_i_kerning(&glyphs);

        assert!(pairs.contains(&(('I', 'H'), 15)));
        assert!(!pairs.iter().any(|((_, right), _)| *right == 'L'));
        assert!(!pairs.iter().any(|((_, right), _)| *right == 'N'));
        // I against itself: 10 + 100 - 95 = 15
        assert!(pairs.contains(&(('I', 'I'), 15)));
    }

    #[test]
    fn test_dynamic_i_kerning_without_i() {
        let glyphs = vec![stem('H', 10.0, 500.0, 520.0)];
        assert!(dynamic_i_kerning(&glyphs).is_empty());
    }

    #[test]
    fn test_retain_present() {
        let table = default_kerning_pairs();
        let glyphs = vec![GlyphBuild::new('A', 300.0), GlyphBuild::new('V', 300.0)];
        let kept = retain_present(&table, &glyphs);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[&('A', 'V')], -50);
    }
}
