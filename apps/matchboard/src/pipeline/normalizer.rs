//! Score normalization.
//!
//! The matching service reports scores on two scales: a fraction in [0,1]
//! or a percentage. Anything `<= 1` is read as a fraction. This makes a raw
//! `1` mean 100%, never 1%: a true 1% score from the service is shown as a
//! perfect match. That ambiguity is inherent to the wire format and is kept
//! as-is.

/// Raw scores at or below this value are fractions.
pub const FRACTION_CEILING: f64 = 1.0;

/// Converts a raw score into an integer percentage in [0, 100].
pub fn normalize(raw: f64) -> u32 {
    let scaled = if raw <= FRACTION_CEILING {
        raw * 100.0
    } else {
        raw
    };
    clamp_percentage(round_half_up(scaled))
}

/// Converts a score the service guarantees to be a fraction. Batch results
/// use this scale only, so a row, its detail and the board summary always
/// agree even when an out-of-contract value slips through.
pub fn fraction_percentage(fraction: f64) -> u32 {
    clamp_percentage(round_half_up(fraction * 100.0))
}

/// Rounds .5 up, matching how the percentages have always been displayed.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

// NaN saturates to 0 through the cast.
pub(crate) fn clamp_percentage(value: f64) -> u32 {
    value.clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_is_scaled() {
        assert_eq!(normalize(0.86), 86);
        assert_eq!(normalize(0.0), 0);
    }

    #[test]
    fn test_percentage_passes_through() {
        assert_eq!(normalize(86.0), 86);
        assert_eq!(normalize(100.0), 100);
    }

    #[test]
    fn test_one_is_read_as_fraction() {
        assert_eq!(normalize(1.0), 100);
    }

    #[test]
    fn test_just_above_one_is_a_percentage() {
        assert_eq!(normalize(1.2), 1);
    }

    #[test]
    fn test_half_rounds_up() {
        assert_eq!(normalize(0.125), 13);
        assert_eq!(normalize(42.5), 43);
        assert_eq!(normalize(0.4449), 44);
    }

    #[test]
    fn test_fraction_percentage_never_reads_a_percentage() {
        assert_eq!(fraction_percentage(0.86), 86);
        assert_eq!(fraction_percentage(0.125), 13);
        assert_eq!(fraction_percentage(45.0), 100);
        assert_eq!(fraction_percentage(-1.0), 0);
    }

    #[test]
    fn test_out_of_contract_values_are_clamped() {
        assert_eq!(normalize(-0.3), 0);
        assert_eq!(normalize(250.0), 100);
        assert_eq!(normalize(f64::NAN), 0);
    }
}
