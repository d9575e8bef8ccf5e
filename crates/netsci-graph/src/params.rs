use netsci_core::errors::NetError;
use tracing::warn;

/// Rejects node counts below one.
pub(crate) fn ensure_node_count(parameter: &str, count: usize) -> Result<(), NetError> {
    if count == 0 {
        warn!(parameter, "rejected empty node count");
        return Err(NetError::invalid_parameter(
            "node-count",
            parameter,
            count,
            "at least one node is required",
        ));
    }
    Ok(())
}

/// Rejects probabilities outside `[0, 1]` (including NaN).
pub(crate) fn ensure_probability(parameter: &str, value: f64) -> Result<(), NetError> {
    if !(0.0..=1.0).contains(&value) {
        warn!(parameter, value, "rejected probability outside [0, 1]");
        return Err(NetError::invalid_parameter(
            "probability-range",
            parameter,
            value,
            "probability must lie in [0, 1]",
        ));
    }
    Ok(())
}

/// Rejects negative or NaN exponents.
pub(crate) fn ensure_exponent(parameter: &str, value: f64) -> Result<(), NetError> {
    if value.is_nan() || value < 0.0 || value.is_infinite() {
        warn!(parameter, value, "rejected exponent");
        return Err(NetError::invalid_parameter(
            "exponent-range",
            parameter,
            value,
            "exponent must be a finite value >= 0",
        ));
    }
    Ok(())
}

/// Rounds to `places` decimal digits, half away from zero.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_bounds_are_inclusive() {
        assert!(ensure_probability("p", 0.0).is_ok());
        assert!(ensure_probability("p", 1.0).is_ok());
        assert!(ensure_probability("p", -0.01).is_err());
        assert!(ensure_probability("p", f64::NAN).is_err());
    }

    #[test]
    fn exponent_rejects_negative_and_nan() {
        assert!(ensure_exponent("r", 0.0).is_ok());
        assert_eq!(
            ensure_exponent("r", -1.0).unwrap_err().info().code,
            "exponent-range"
        );
        assert!(ensure_exponent("r", f64::NAN).is_err());
    }

    #[test]
    fn rounding_keeps_four_places() {
        assert_eq!(round_to(2.095_903_274, 4), 2.0959);
        assert_eq!(round_to(0.0, 4), 0.0);
    }
}
