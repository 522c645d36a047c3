//! Error types for the gravity engine

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A generator, spawn or configuration argument was out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::invalid(name, format!("must be finite, got {value}")))
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid(name, format!("must be positive, got {value}")))
    }
}

pub(crate) fn ensure_finite_vec(name: &'static str, value: glam::DVec2) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::invalid(name, format!("must be finite, got {value}")))
    }
}

/// Widest span a uniform sampler accepts; sampling scales the span up slightly.
const MAX_SPAN: f64 = f64::MAX / 2.0;

/// Checks an inclusive `(lo, hi)` sampling range; `lo == hi` is allowed.
pub(crate) fn ensure_range(name: &'static str, (lo, hi): (f64, f64)) -> Result<()> {
    if !lo.is_finite() || !hi.is_finite() {
        return Err(EngineError::invalid(
            name,
            format!("bounds must be finite, got ({lo}, {hi})"),
        ));
    }
    if lo > hi {
        return Err(EngineError::invalid(
            name,
            format!("range is empty, lower bound {lo} exceeds upper bound {hi}"),
        ));
    }
    let span = hi - lo;
    if !span.is_finite() || span > MAX_SPAN {
        return Err(EngineError::invalid(
            name,
            format!("span of ({lo}, {hi}) is too wide to sample"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_parameter() {
        let err = EngineError::invalid("mass", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "invalid parameter `mass`: must be positive, got 0"
        );
    }

    #[test]
    fn positive_check_rejects_zero_negative_and_nan() {
        assert!(ensure_positive("m", 1.0).is_ok());
        assert!(ensure_positive("m", 0.0).is_err());
        assert!(ensure_positive("m", -2.0).is_err());
        assert!(ensure_positive("m", f64::NAN).is_err());
    }

    #[test]
    fn range_allows_degenerate_but_not_inverted() {
        assert!(ensure_range("v", (0.0, 0.0)).is_ok());
        assert!(ensure_range("v", (-1.0, 1.0)).is_ok());
        assert!(ensure_range("v", (1.0, -1.0)).is_err());
        assert!(ensure_range("v", (0.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn range_rejects_spans_that_overflow() {
        assert!(ensure_range("v", (-f64::MAX, f64::MAX)).is_err());
        assert!(ensure_range("v", (0.0, f64::MAX)).is_err());
        assert!(ensure_range("v", (-1e300, 1e300)).is_ok());
    }
}
