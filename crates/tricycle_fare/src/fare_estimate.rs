use std::fmt::Display;

use serde::Serialize;

use crate::error::FareError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FareEstimate {
    amount_php: f64,
}

impl FareEstimate {
    /// A zero fare is accepted, negative or non finite amounts are not.
    pub fn new(amount_php: f64) -> Result<Self, FareError> {
        if !amount_php.is_finite() || amount_php < 0.0 {
            return Err(FareError::MalformedResponse(format!(
                "predicted_fare must be a non-negative number, got {amount_php}"
            )));
        }

        // -0.0 passes the check above, store it as 0.0
        let amount_php = if amount_php == 0.0 { 0.0 } else { amount_php };

        Ok(FareEstimate { amount_php })
    }

    /// Amount as returned by the model, unrounded.
    pub fn amount_php(&self) -> f64 {
        self.amount_php
    }
}

/// Whole pesos, e.g. `₱46`.
impl Display for FareEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₱{:.0}", self.amount_php.round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounds_to_whole_pesos() {
        assert_eq!(FareEstimate::new(45.5).unwrap().to_string(), "₱46");
        assert_eq!(FareEstimate::new(45.49).unwrap().to_string(), "₱45");
        assert_eq!(FareEstimate::new(0.0).unwrap().to_string(), "₱0");
    }

    #[test]
    fn test_display_keeps_amount() {
        let estimate = FareEstimate::new(45.5).unwrap();
        let _ = estimate.to_string();
        assert_eq!(estimate.amount_php(), 45.5);
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let estimate = FareEstimate::new(-0.0).unwrap();

        assert!(estimate.amount_php().is_sign_positive());
        assert_eq!(estimate.to_string(), "₱0");
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        assert!(matches!(
            FareEstimate::new(-1.0),
            Err(FareError::MalformedResponse(_))
        ));
        assert!(FareEstimate::new(f64::NAN).is_err());
        assert!(FareEstimate::new(f64::INFINITY).is_err());
    }
}
