// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

/// extension functions for floating-point numbers
pub trait FloatExtensions {
    /// NaN and the infinities become 0
    fn finite_or_zero(self) -> Self;
}

impl FloatExtensions for f64 {
    fn finite_or_zero(self) -> f64 {
        if self.is_finite() {
            self
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass_through() {
        assert_eq!(12.5.finite_or_zero(), 12.5);
        assert_eq!((-3.0).finite_or_zero(), -3.0);
    }

    #[test]
    fn non_finite_values_become_zero() {
        assert_eq!(f64::NAN.finite_or_zero(), 0.0);
        assert_eq!(f64::INFINITY.finite_or_zero(), 0.0);
        assert_eq!(f64::NEG_INFINITY.finite_or_zero(), 0.0);
    }
}
