use std::num::IntErrorKind;

/// Parse an experience range such as `"3-5"` into its upper bound
///
/// The value after the last `-` is used, so `"0-2"` gives 2 and a bare
/// `"7"` gives 7. Absent, empty or unparsable input gives 0. Bounds too
/// large for an `i64` saturate.
pub fn parse_experience(range: Option<&str>) -> i64 {
    let Some(range) = range.filter(|r| !r.is_empty()) else {
        return 0;
    };

    let Some(upper) = range.rsplit('-').next() else {
        return 0;
    };

    match upper.trim().parse::<i64>() {
        Ok(years) => years,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

/// Score how close the mentor's experience is to what the mentee asked for
///
/// Loses one point per year of difference from `max_score`, floored at 0.
/// When either side is missing the `neutral` score is used.
pub fn calculate_experience_score(
    preferred: Option<&str>,
    mentor_years: Option<&str>,
    max_score: f64,
    neutral: f64,
) -> f64 {
    match (
        preferred.filter(|p| !p.is_empty()),
        mentor_years.filter(|m| !m.is_empty()),
    ) {
        (Some(preferred), Some(mentor_years)) => {
            let mentee_exp = parse_experience(Some(preferred));
            let mentor_exp = parse_experience(Some(mentor_years));
            let diff = mentor_exp.abs_diff(mentee_exp) as f64;
            (max_score - diff).max(0.0)
        }
        _ => neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_experience() {
        assert_eq!(parse_experience(Some("3-5")), 5);
        assert_eq!(parse_experience(Some("0-2")), 2);
        assert_eq!(parse_experience(Some("8-10")), 10);
        assert_eq!(parse_experience(Some("")), 0);
        assert_eq!(parse_experience(Some("abc")), 0);
        assert_eq!(parse_experience(None), 0);
    }

    #[test]
    fn test_parse_experience_edge_shapes() {
        assert_eq!(parse_experience(Some("7")), 7);
        assert_eq!(parse_experience(Some("3 - 5 ")), 5);
        assert_eq!(parse_experience(Some("5-")), 0);
        assert_eq!(parse_experience(Some("10+")), 0);
    }

    #[test]
    fn test_parse_experience_saturates_huge_bounds() {
        assert_eq!(parse_experience(Some("1-99999999999999999999")), i64::MAX);
        assert_eq!(
            parse_experience(Some("1-999999999999999999999999999999999999999999")),
            i64::MAX
        );
    }

    #[test]
    fn test_huge_mentor_range_floors_score() {
        assert_eq!(
            calculate_experience_score(Some("0-2"), Some("1-99999999999999999999"), 20.0, 10.0),
            0.0
        );
    }

    #[test]
    fn test_experience_score_exact_match() {
        assert_eq!(calculate_experience_score(Some("3-5"), Some("3-5"), 20.0, 10.0), 20.0);
    }

    #[test]
    fn test_experience_score_difference() {
        assert_eq!(calculate_experience_score(Some("0-2"), Some("8-10"), 20.0, 10.0), 12.0);
        assert_eq!(calculate_experience_score(Some("8-10"), Some("0-2"), 20.0, 10.0), 12.0);
    }

    #[test]
    fn test_experience_score_floors_at_zero() {
        assert_eq!(calculate_experience_score(Some("0-1"), Some("30-40"), 20.0, 10.0), 0.0);
    }

    #[test]
    fn test_experience_score_neutral_when_missing() {
        assert_eq!(calculate_experience_score(None, Some("3-5"), 20.0, 10.0), 10.0);
        assert_eq!(calculate_experience_score(Some("3-5"), None, 20.0, 10.0), 10.0);
        assert_eq!(calculate_experience_score(Some(""), Some("3-5"), 20.0, 10.0), 10.0);
        assert_eq!(calculate_experience_score(Some("3-5"), Some(""), 20.0, 10.0), 10.0);
    }

    #[test]
    fn test_unparsable_ranges_compare_as_zero() {
        // Both sides present but garbled still compare, as 0 vs 0
        assert_eq!(calculate_experience_score(Some("lots"), Some("many"), 20.0, 10.0), 20.0);
        assert_eq!(calculate_experience_score(Some("lots"), Some("3-5"), 20.0, 10.0), 15.0);
    }
}
