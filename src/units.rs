//! Length units used throughout the crate.
//!
//! Layout happens in [`Mm`] with the origin at the top-left corner of the page and
//! y growing downwards, the way a printed page is usually described. Font sizes
//! are given in [`Pt`], which is also the native unit of PDF content streams.

use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

const MM_PER_INCH: f32 = 25.4;
const PT_PER_INCH: f32 = 72.0;

/// Points, 1/72 of an inch
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    DerefMut,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Pt(pub f32);

/// Millimetres
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    DerefMut,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Mm(pub f32);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Self {
        Pt(mm.0 * PT_PER_INCH / MM_PER_INCH)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Self {
        Mm(pt.0 * MM_PER_INCH / PT_PER_INCH)
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl Mul<f32> for Mm {
    type Output = Mm;

    fn mul(self, rhs: f32) -> Mm {
        Mm(self.0 * rhs)
    }
}

impl Div<f32> for Mm {
    type Output = Mm;

    fn div(self, rhs: f32) -> Mm {
        Mm(self.0 / rhs)
    }
}

impl Mm {
    /// Whether the length is a finite, strictly positive number
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl Pt {
    /// Whether the length is a finite, strictly positive number
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_width_converts_to_points() {
        let width: Pt = Mm(210.0).into();
        assert!((width.0 - 595.2756).abs() < 1e-2);
        let back: Mm = width.into();
        assert!((back.0 - 210.0).abs() < 1e-3);
    }

    #[test]
    fn arithmetic_stays_in_unit() {
        let mut y = Mm(35.0);
        y += Mm(5.5) * 2.0;
        assert_eq!(y, Mm(46.0));
        assert_eq!(y - Mm(6.0), Mm(40.0));
        assert_eq!(Pt(12.0) / 2.0, Pt(6.0));
        let total: Mm = [Mm(1.0), Mm(2.0), Mm(3.0)].into_iter().sum();
        assert_eq!(total, Mm(6.0));
    }

    #[test]
    fn positivity_rejects_zero_and_nan() {
        assert!(Mm(0.1).is_positive());
        assert!(!Mm(0.0).is_positive());
        assert!(!Mm(f32::NAN).is_positive());
        assert!(!Pt(-1.0).is_positive());
    }
}
