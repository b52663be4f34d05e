//! Derivation rules module.
//!
//! Pure functions implementing the D&D 5e derived-stat rules used by the
//! adapters and renderers: ability bonuses, proficiency bonus, experience
//! by challenge rating, signed bonus formatting, challenge rating parsing
//! and attribute extraction from free-text lists.
//!
//! Nothing here panics on bad data. Functions that can fail return `None`
//! and the caller picks the default.

/// Published experience point awards for challenge ratings 0 through 30.
const XP_BY_CHALLENGE: [i32; 31] = [
    10, 200, 450, 700, 1_100, 1_800, 2_300, 2_900, 3_900, 5_000, 5_900, 7_200, 8_400, 10_000,
    11_500, 13_000, 15_000, 18_000, 20_000, 22_000, 25_000, 33_000, 41_000, 50_000, 62_000,
    75_000, 90_000, 105_000, 120_000, 135_000, 155_000,
];

/// Compute the ability bonus for a raw ability score.
///
/// The bonus is `floor((score - 10) / 2)`. An absent score counts as 0,
/// so it yields -5.
///
/// # Examples
///
/// ```rust
/// use bestiary::rules::ability_bonus;
///
/// assert_eq!(ability_bonus(10), 0);
/// assert_eq!(ability_bonus(17), 3);
/// assert_eq!(ability_bonus(9), -1);
/// assert_eq!(ability_bonus(None), -5);
/// ```
pub fn ability_bonus(score: impl Into<Option<i32>>) -> i32 {
    score.into().unwrap_or(0).saturating_sub(10).div_euclid(2)
}

/// Proficiency bonus for a challenge rating.
///
/// # Examples
///
/// ```rust
/// use bestiary::rules::proficiency_bonus;
///
/// assert_eq!(proficiency_bonus(0.25), 2);
/// assert_eq!(proficiency_bonus(5.0), 3);
/// assert_eq!(proficiency_bonus(21.0), 8);
/// ```
pub fn proficiency_bonus(challenge_rating: f64) -> i32 {
    match challenge_rating {
        cr if cr <= 1.0 => 2,
        cr if cr <= 4.0 => 3,
        cr if cr <= 8.0 => 4,
        cr if cr <= 12.0 => 5,
        cr if cr <= 16.0 => 6,
        cr if cr <= 20.0 => 7,
        _ => 8,
    }
}

/// Experience points awarded for defeating a creature of the given
/// challenge rating.
///
/// Integral ratings 0 through 30 come from the published table.
/// Fractional ratings between 0 and 2 award `round(200 * cr)`. Anything
/// else awards 0.
///
/// # Examples
///
/// ```rust
/// use bestiary::rules::experience_points;
///
/// assert_eq!(experience_points(0.0), 10);
/// assert_eq!(experience_points(0.25), 50);
/// assert_eq!(experience_points(5.0), 1_800);
/// assert_eq!(experience_points(31.0), 0);
/// ```
pub fn experience_points(challenge_rating: f64) -> i32 {
    let cr = challenge_rating;
    if cr.fract() == 0.0 && (0.0..=30.0).contains(&cr) {
        XP_BY_CHALLENGE[cr as usize]
    } else if cr > 0.0 && cr < 2.0 {
        (200.0 * cr).round() as i32
    } else {
        0
    }
}

/// Format a bonus with an explicit sign, e.g. `+3`, `+0`, `-1`.
///
/// # Examples
///
/// ```rust
/// use bestiary::rules::signed_bonus;
///
/// assert_eq!(signed_bonus(3), "+3");
/// assert_eq!(signed_bonus(0), "+0");
/// assert_eq!(signed_bonus(-1), "-1");
/// ```
pub fn signed_bonus(bonus: i32) -> String {
    if bonus >= 0 {
        format!("+{}", bonus)
    } else {
        format!("-{}", bonus.unsigned_abs())
    }
}

/// Parse a challenge rating given as a plain number or an `N/D` fraction.
///
/// Returns `None` when either side fails to parse or the result is not a
/// finite number.
///
/// # Examples
///
/// ```rust
/// use bestiary::rules::cr_to_double;
///
/// assert_eq!(cr_to_double("1/4"), Some(0.25));
/// assert_eq!(cr_to_double("12"), Some(12.0));
/// assert_eq!(cr_to_double("invalid"), None);
/// ```
pub fn cr_to_double(text: &str) -> Option<f64> {
    let text = text.trim();
    let value = match text.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.trim().parse().ok()?;
            let denominator: f64 = denominator.trim().parse().ok()?;
            numerator / denominator
        }
        None => text.parse().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Render a challenge rating for display.
///
/// The fractional constants 0.125, 0.25, 0.33 and 0.5 map to `1/8`,
/// `1/4`, `1/3` and `1/2`. Every other value uses the default float
/// formatting, which prints integral values without a decimal point.
///
/// Only the stored constant 0.33 is recognized as one third; an exact
/// `1.0 / 3.0` falls through to the default formatting.
///
/// # Examples
///
/// ```rust
/// use bestiary::rules::cr_to_display_string;
///
/// assert_eq!(cr_to_display_string(0.25), "1/4");
/// assert_eq!(cr_to_display_string(0.33), "1/3");
/// assert_eq!(cr_to_display_string(7.0), "7");
/// ```
pub fn cr_to_display_string(challenge_rating: f64) -> String {
    let cr = challenge_rating;
    if cr == 0.125 {
        String::from("1/8")
    } else if cr == 0.25 {
        String::from("1/4")
    } else if cr == 0.33 {
        String::from("1/3")
    } else if cr == 0.5 {
        String::from("1/2")
    } else {
        cr.to_string()
    }
}

/// Pull an integer attribute out of a comma-separated `name value unit`
/// list such as a senses or speed line.
///
/// Matching is case-insensitive against the start of each trimmed token.
/// The first matching token decides the result: the word right after the
/// attribute name must be an integer, otherwise `None` is returned.
///
/// # Examples
///
/// ```rust
/// use bestiary::rules::extract_attribute;
///
/// let senses = "darkvision 120 ft., Passive Perception 20";
/// assert_eq!(extract_attribute(Some(senses), "passive perception"), Some(20));
/// assert_eq!(extract_attribute(Some(senses), "darkvision"), Some(120));
/// assert_eq!(extract_attribute(Some(senses), "speed"), None);
/// assert_eq!(extract_attribute(None, "darkvision"), None);
/// ```
pub fn extract_attribute(csv: Option<&str>, attribute: &str) -> Option<i32> {
    let csv = csv?;
    if csv.is_empty() || attribute.len() > csv.len() {
        return None;
    }

    let needle = attribute.to_lowercase();
    let token = csv
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .find(|token| token.starts_with(&needle))?;

    token[needle.len()..]
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_bonus_floors_negative_scores() {
        assert_eq!(ability_bonus(1), -5);
        assert_eq!(ability_bonus(7), -2);
        assert_eq!(ability_bonus(8), -1);
        assert_eq!(ability_bonus(11), 0);
        assert_eq!(ability_bonus(30), 10);
    }

    #[test]
    fn test_ability_bonus_matches_floor_formula() {
        for score in -5..=40 {
            let expected = ((score as f64 - 10.0) / 2.0).floor() as i32;
            assert_eq!(ability_bonus(score), expected, "score {}", score);
        }
    }

    #[test]
    fn test_ability_bonus_saturates_extreme_scores() {
        assert_eq!(ability_bonus(i32::MIN), i32::MIN / 2);
        assert_eq!(ability_bonus(i32::MIN + 20), i32::MIN / 2 + 5);
        assert_eq!(ability_bonus(i32::MAX), 1_073_741_818);
    }

    #[test]
    fn test_proficiency_bonus_band_edges() {
        assert_eq!(proficiency_bonus(0.0), 2);
        assert_eq!(proficiency_bonus(1.0), 2);
        assert_eq!(proficiency_bonus(2.0), 3);
        assert_eq!(proficiency_bonus(4.0), 3);
        assert_eq!(proficiency_bonus(8.0), 4);
        assert_eq!(proficiency_bonus(9.0), 5);
        assert_eq!(proficiency_bonus(12.0), 5);
        assert_eq!(proficiency_bonus(16.0), 6);
        assert_eq!(proficiency_bonus(20.0), 7);
        assert_eq!(proficiency_bonus(25.0), 8);
        assert_eq!(proficiency_bonus(30.0), 8);
    }

    #[test]
    fn test_proficiency_bonus_is_monotonic() {
        let mut previous = proficiency_bonus(0.0);
        for step in 1..=60 {
            let current = proficiency_bonus(step as f64 * 0.5);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_experience_points_full_table() {
        let expected = [
            (0, 10),
            (1, 200),
            (2, 450),
            (3, 700),
            (4, 1100),
            (5, 1800),
            (6, 2300),
            (7, 2900),
            (8, 3900),
            (9, 5000),
            (10, 5900),
            (11, 7200),
            (12, 8400),
            (13, 10000),
            (14, 11500),
            (15, 13000),
            (16, 15000),
            (17, 18000),
            (18, 20000),
            (19, 22000),
            (20, 25000),
            (21, 33000),
            (22, 41000),
            (23, 50000),
            (24, 62000),
            (25, 75000),
            (26, 90000),
            (27, 105000),
            (28, 120000),
            (29, 135000),
            (30, 155000),
        ];
        for (cr, xp) in expected {
            assert_eq!(experience_points(cr as f64), xp, "cr {}", cr);
        }
    }

    #[test]
    fn test_experience_points_fractions() {
        assert_eq!(experience_points(0.125), 25);
        assert_eq!(experience_points(0.5), 100);
        assert_eq!(experience_points(0.33), 66);
        assert_eq!(experience_points(1.5), 300);
    }

    #[test]
    fn test_experience_points_out_of_table() {
        assert_eq!(experience_points(2.5), 0);
        assert_eq!(experience_points(-1.0), 0);
        assert_eq!(experience_points(31.0), 0);
        assert_eq!(experience_points(f64::NAN), 0);
    }

    #[test]
    fn test_signed_bonus_extremes() {
        assert_eq!(signed_bonus(1), "+1");
        assert_eq!(signed_bonus(-12), "-12");
        assert_eq!(signed_bonus(i32::MIN), "-2147483648");
    }

    #[test]
    fn test_cr_to_double_accepts_spacing_and_decimals() {
        assert_eq!(cr_to_double(" 1 / 2 "), Some(0.5));
        assert_eq!(cr_to_double("1/8"), Some(0.125));
        assert_eq!(cr_to_double("0.25"), Some(0.25));
    }

    #[test]
    fn test_cr_to_double_rejects_garbage() {
        assert_eq!(cr_to_double(""), None);
        assert_eq!(cr_to_double("1/"), None);
        assert_eq!(cr_to_double("a/4"), None);
        assert_eq!(cr_to_double("1/0"), None);
        assert_eq!(cr_to_double("inf"), None);
    }

    #[test]
    fn test_cr_display_round_trip() {
        for text in ["1/8", "1/4", "1/2", "0", "3", "30"] {
            let cr = cr_to_double(text).unwrap();
            assert_eq!(cr_to_display_string(cr), text);
        }
    }

    #[test]
    fn test_exact_third_is_not_the_stored_alias() {
        let third = cr_to_double("1/3").unwrap();
        assert_ne!(cr_to_display_string(third), "1/3");
    }

    #[test]
    fn test_extract_attribute_is_case_insensitive() {
        let senses = "Blindsight 30 ft. (blind beyond this radius), DARKVISION 60 ft., passive Perception 14";
        assert_eq!(extract_attribute(Some(senses), "blindsight"), Some(30));
        assert_eq!(extract_attribute(Some(senses), "Darkvision"), Some(60));
        assert_eq!(extract_attribute(Some(senses), "PASSIVE PERCEPTION"), Some(14));
    }

    #[test]
    fn test_extract_attribute_misses() {
        assert_eq!(extract_attribute(Some(""), "darkvision"), None);
        assert_eq!(extract_attribute(Some("dark"), "darkvision"), None);
        assert_eq!(extract_attribute(Some("darkvision sixty ft."), "darkvision"), None);
        assert_eq!(extract_attribute(Some("passive Perception 10"), "tremorsense"), None);
    }
}
