//! This module defines the unit types used in seeding rate calculations.
use float_cmp::{ApproxEq, F64Margin};
use serde::{Deserialize, Serialize};

macro_rules! unit_struct {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            derive_more::Add,
            derive_more::Sub,
            Serialize,
            Deserialize,
        )]
        pub struct $name(pub f64);

        impl $name {
            /// Create a new instance of the unit type from an f64 value.
            pub fn new(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as an f64.
            pub fn value(self) -> f64 {
                self.0
            }

            /// Whether the underlying value is finite
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl ApproxEq for $name {
            type Margin = F64Margin;

            fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
                self.0.approx_eq(other.0, margin)
            }
        }
    };
}

unit_struct! {
    /// A dimensionless quantity, e.g. an adjustment factor
    Dimensionless
}
unit_struct! {
    /// A number of seeds per unit of area or row length
    SeedRate
}

impl std::ops::Mul for Dimensionless {
    type Output = Dimensionless;

    fn mul(self, rhs: Dimensionless) -> Dimensionless {
        Dimensionless(self.0 * rhs.0)
    }
}

impl std::ops::Mul<Dimensionless> for SeedRate {
    type Output = SeedRate;

    fn mul(self, rhs: Dimensionless) -> SeedRate {
        SeedRate(self.0 * rhs.0)
    }
}

impl std::ops::Div<Dimensionless> for SeedRate {
    type Output = SeedRate;

    fn div(self, rhs: Dimensionless) -> SeedRate {
        SeedRate(self.0 / rhs.0)
    }
}

impl std::iter::Product for Dimensionless {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Dimensionless(1.0), |acc, x| acc * x)
    }
}

impl SeedRate {
    /// Round to the nearest whole number of seeds.
    ///
    /// Negative or non-finite rates saturate (to zero and `u64::MAX` respectively), but callers
    /// are expected to have ruled these out already.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn round_to_count(self) -> u64 {
        self.0.round() as u64
    }
}
