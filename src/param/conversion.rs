//! Conversions between a parameter's raw value space and its display space.

use crate::param::ParamFlags;

/// The amount the normalized position gets scaled by before the log is taken. Makes the curve
/// steep enough that frequency-like ranges get most of the knob travel below the midpoint.
const LOG_SCALE: f32 = 100.0;

/// A bidirectional mapping between a parameter's raw values and the perceptually-scaled values a
/// control displays and edits. Resolved once from the descriptor's flags when a binding is
/// created and fixed for the binding's lifetime.
///
/// `to_display` and `from_display` are mutual inverses over `[min, max]` up to floating point
/// rounding. The mapping does not clamp: a degenerate range (`min == max`) produces `inf`/`NaN`
/// rather than an error here, which is why bindings validate the range at construction instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayConversion {
    /// Display space and raw space coincide.
    Identity { min: f32, max: f32 },
    /// `log10` of the position within the range scaled by 100. Spreads out the low end of wide
    /// ranges such as filter cutoff frequencies.
    Logarithmic { min: f32, max: f32 },
    /// `log2` of the position within the range. A gentler version of
    /// [`Logarithmic`][Self::Logarithmic].
    Exponential { min: f32, max: f32 },
    /// Raw values are squared for display. The inverse takes a square root, so display values
    /// must stay non-negative; that is a precondition on the caller, not a runtime check.
    Squared { min: f32, max: f32 },
    /// Raw values are square-rooted for display. Raw values must stay non-negative.
    SquareRoot { min: f32, max: f32 },
    Cubed { min: f32, max: f32 },
    CubeRoot { min: f32, max: f32 },
}

impl DisplayConversion {
    /// Resolve the conversion for a descriptor's flags and raw range.
    ///
    /// The check order is part of the contract: descriptors can in principle declare more than one
    /// curve flag, and the first match here wins. Logarithmic is checked first, then exponential,
    /// squared, square root, cubed, and cube root, with identity as the fallback.
    pub fn from_flags(flags: ParamFlags, min: f32, max: f32) -> Self {
        if flags.contains(ParamFlags::DISPLAY_LOGARITHMIC) {
            DisplayConversion::Logarithmic { min, max }
        } else if flags.contains(ParamFlags::DISPLAY_EXPONENTIAL) {
            DisplayConversion::Exponential { min, max }
        } else if flags.contains(ParamFlags::DISPLAY_SQUARED) {
            DisplayConversion::Squared { min, max }
        } else if flags.contains(ParamFlags::DISPLAY_SQUARE_ROOT) {
            DisplayConversion::SquareRoot { min, max }
        } else if flags.contains(ParamFlags::DISPLAY_CUBED) {
            DisplayConversion::Cubed { min, max }
        } else if flags.contains(ParamFlags::DISPLAY_CUBE_ROOT) {
            DisplayConversion::CubeRoot { min, max }
        } else {
            DisplayConversion::Identity { min, max }
        }
    }

    /// Convert a raw, engine-native value to its display value.
    pub fn to_display(&self, raw: f32) -> f32 {
        match self {
            DisplayConversion::Identity { .. } => raw,
            DisplayConversion::Logarithmic { min, max } => {
                ((raw - min) / (max - min) * LOG_SCALE + 1.0).log10()
            }
            DisplayConversion::Exponential { min, max } => ((raw - min) / (max - min) + 1.0).log2(),
            DisplayConversion::Squared { .. } => raw * raw,
            DisplayConversion::SquareRoot { .. } => raw.sqrt(),
            DisplayConversion::Cubed { .. } => raw * raw * raw,
            DisplayConversion::CubeRoot { .. } => raw.cbrt(),
        }
    }

    /// Convert a display value back to the raw value the engine expects.
    pub fn from_display(&self, display: f32) -> f32 {
        match self {
            DisplayConversion::Identity { .. } => display,
            DisplayConversion::Logarithmic { min, max } => {
                (10.0f32.powf(display) - 1.0) / LOG_SCALE * (max - min) + min
            }
            DisplayConversion::Exponential { min, max } => {
                (2.0f32.powf(display) - 1.0) * (max - min) + min
            }
            DisplayConversion::Squared { .. } => display.sqrt(),
            DisplayConversion::SquareRoot { .. } => display * display,
            DisplayConversion::Cubed { .. } => display.cbrt(),
            DisplayConversion::CubeRoot { .. } => display * display * display,
        }
    }

    /// The raw range's lower bound.
    pub fn raw_min(&self) -> f32 {
        match self {
            DisplayConversion::Identity { min, .. }
            | DisplayConversion::Logarithmic { min, .. }
            | DisplayConversion::Exponential { min, .. }
            | DisplayConversion::Squared { min, .. }
            | DisplayConversion::SquareRoot { min, .. }
            | DisplayConversion::Cubed { min, .. }
            | DisplayConversion::CubeRoot { min, .. } => *min,
        }
    }

    /// The raw range's upper bound.
    pub fn raw_max(&self) -> f32 {
        match self {
            DisplayConversion::Identity { max, .. }
            | DisplayConversion::Logarithmic { max, .. }
            | DisplayConversion::Exponential { max, .. }
            | DisplayConversion::Squared { max, .. }
            | DisplayConversion::SquareRoot { max, .. }
            | DisplayConversion::Cubed { max, .. }
            | DisplayConversion::CubeRoot { max, .. } => *max,
        }
    }

    /// Lower bound of the display range. For [`Identity`][Self::Identity] this equals the raw
    /// lower bound; for every other curve it is derived through the curve's formula.
    pub fn display_min_value(&self) -> f32 {
        self.to_display(self.raw_min())
    }

    /// Upper bound of the display range.
    pub fn display_max_value(&self) -> f32 {
        self.to_display(self.raw_max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const fn make_logarithmic(min: f32, max: f32) -> DisplayConversion {
        DisplayConversion::Logarithmic { min, max }
    }

    /// Round-trip a handful of in-range raw values through the conversion in both directions.
    fn assert_round_trips(conversion: DisplayConversion, raw_values: &[f32]) {
        for &raw in raw_values {
            let display = conversion.to_display(raw);
            assert_relative_eq!(
                conversion.from_display(display),
                raw,
                epsilon = 1e-3,
                max_relative = 1e-4
            );

            let raw_again = conversion.from_display(display);
            assert_relative_eq!(
                conversion.to_display(raw_again),
                display,
                epsilon = 1e-3,
                max_relative = 1e-4
            );
        }
    }

    mod identity {
        use super::*;

        #[test]
        fn display_bounds_equal_raw_bounds() {
            let conversion = DisplayConversion::Identity {
                min: -64.0,
                max: 64.0,
            };
            assert_eq!(conversion.display_min_value(), -64.0);
            assert_eq!(conversion.display_max_value(), 64.0);
        }

        #[test]
        fn passthrough() {
            let conversion = DisplayConversion::Identity { min: 0.0, max: 1.0 };
            assert_eq!(conversion.to_display(0.25), 0.25);
            assert_eq!(conversion.from_display(0.25), 0.25);
        }
    }

    mod logarithmic {
        use super::*;

        #[test]
        fn display_min_is_zero() {
            // log10(1) = 0 regardless of the raw range
            let conversion = make_logarithmic(10.0, 12000.0);
            assert_eq!(conversion.display_min_value(), 0.0);
        }

        #[test]
        fn display_max_follows_formula() {
            // log10(101), not an assumed round 2.0
            let conversion = make_logarithmic(10.0, 12000.0);
            assert_relative_eq!(
                conversion.display_max_value(),
                101.0f32.log10(),
                max_relative = 1e-6
            );
            assert_relative_eq!(conversion.display_max_value(), 2.0043, max_relative = 1e-4);
        }

        #[test]
        fn cutoff_scenario() {
            // A filter cutoff bound to [10 Hz, 12 kHz] sitting at 330 Hz
            let conversion = make_logarithmic(10.0, 12000.0);
            let display = conversion.to_display(330.0);
            assert_relative_eq!(display, 0.5646, max_relative = 1e-3);
            assert!((conversion.from_display(display) - 330.0).abs() < 0.5);
        }

        #[test]
        fn round_trips() {
            assert_round_trips(make_logarithmic(5.0, 2000.0), &[5.0, 20.0, 500.0, 1999.0]);
        }
    }

    mod exponential {
        use super::*;

        #[test]
        fn display_bounds() {
            let conversion = DisplayConversion::Exponential {
                min: 0.0,
                max: 100.0,
            };
            // log2(1) = 0 and log2(2) = 1
            assert_eq!(conversion.display_min_value(), 0.0);
            assert_eq!(conversion.display_max_value(), 1.0);
        }

        #[test]
        fn round_trips() {
            let conversion = DisplayConversion::Exponential {
                min: -50.0,
                max: 50.0,
            };
            assert_round_trips(conversion, &[-50.0, -10.0, 0.0, 25.0, 50.0]);
        }
    }

    mod power_curves {
        use super::*;

        #[test]
        fn squared_round_trips() {
            let conversion = DisplayConversion::Squared { min: 0.0, max: 4.0 };
            assert_round_trips(conversion, &[0.0, 0.5, 2.0, 4.0]);
            assert_eq!(conversion.to_display(3.0), 9.0);
        }

        #[test]
        fn square_root_round_trips() {
            let conversion = DisplayConversion::SquareRoot { min: 0.0, max: 9.0 };
            assert_round_trips(conversion, &[0.0, 1.0, 4.0, 9.0]);
            assert_eq!(conversion.to_display(9.0), 3.0);
        }

        #[test]
        fn cubed_round_trips() {
            let conversion = DisplayConversion::Cubed { min: 0.0, max: 2.0 };
            assert_round_trips(conversion, &[0.0, 0.5, 1.5, 2.0]);
            assert_eq!(conversion.to_display(2.0), 8.0);
        }

        #[test]
        fn cube_root_round_trips() {
            let conversion = DisplayConversion::CubeRoot { min: 0.0, max: 8.0 };
            assert_round_trips(conversion, &[0.0, 1.0, 8.0]);
            assert_eq!(conversion.to_display(8.0), 2.0);
        }
    }

    mod flag_resolution {
        use super::*;

        #[test]
        fn no_curve_flags_resolve_to_identity() {
            let flags = ParamFlags::READABLE | ParamFlags::WRITABLE;
            assert_eq!(
                DisplayConversion::from_flags(flags, 0.0, 1.0),
                DisplayConversion::Identity { min: 0.0, max: 1.0 }
            );
        }

        #[test]
        fn logarithmic_wins_over_every_other_curve() {
            let flags = ParamFlags::DISPLAY_LOGARITHMIC
                | ParamFlags::DISPLAY_EXPONENTIAL
                | ParamFlags::DISPLAY_SQUARED
                | ParamFlags::DISPLAY_CUBE_ROOT;
            assert_eq!(
                DisplayConversion::from_flags(flags, 0.0, 1.0),
                DisplayConversion::Logarithmic { min: 0.0, max: 1.0 }
            );
        }

        #[test]
        fn precedence_follows_check_order() {
            let exp_and_below = ParamFlags::DISPLAY_EXPONENTIAL
                | ParamFlags::DISPLAY_SQUARE_ROOT
                | ParamFlags::DISPLAY_CUBED;
            assert_eq!(
                DisplayConversion::from_flags(exp_and_below, 0.0, 1.0),
                DisplayConversion::Exponential { min: 0.0, max: 1.0 }
            );

            let sqrt_and_below = ParamFlags::DISPLAY_SQUARE_ROOT | ParamFlags::DISPLAY_CUBE_ROOT;
            assert_eq!(
                DisplayConversion::from_flags(sqrt_and_below, 0.0, 1.0),
                DisplayConversion::SquareRoot { min: 0.0, max: 1.0 }
            );
        }
    }
}
