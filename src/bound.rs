//! Rate bounds that may be unconstrained.

use serde::{Serialize, Serializer};
use std::fmt::{self, Write as _};

/// Token used wherever an unbounded value is rendered.
pub const UNBOUNDED_TOKEN: &str = "inf";

/// Ceiling on a rate imposed by one resource.
///
/// A resource with no demand placed on it (or no meaningful capacity) does
/// not constrain the rate at all; that case is `Unbounded` rather than an
/// IEEE infinity so that it survives JSON output and comparisons stay total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Limited(f64),
    Unbounded,
}

impl Bound {
    /// `capacity / demand`, or `Unbounded` when either side is not positive.
    pub fn ratio(capacity: f64, demand: f64) -> Bound {
        if capacity > 0.0 && demand > 0.0 {
            Bound::Limited(capacity / demand)
        } else {
            Bound::Unbounded
        }
    }

    /// The tighter of two bounds.
    pub fn min(self, other: Bound) -> Bound {
        match (self, other) {
            (Bound::Limited(a), Bound::Limited(b)) => Bound::Limited(a.min(b)),
            (Bound::Limited(a), Bound::Unbounded) | (Bound::Unbounded, Bound::Limited(a)) => {
                Bound::Limited(a)
            }
            (Bound::Unbounded, Bound::Unbounded) => Bound::Unbounded,
        }
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Bound {
        match self {
            Bound::Limited(v) => Bound::Limited(f(v)),
            Bound::Unbounded => Bound::Unbounded,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }

    pub fn limit(&self) -> Option<f64> {
        match *self {
            Bound::Limited(v) => Some(v),
            Bound::Unbounded => None,
        }
    }

    /// Numeric value, with `Unbounded` mapped to positive infinity.
    pub fn as_f64(&self) -> f64 {
        self.limit().unwrap_or(f64::INFINITY)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match (*self, f.precision()) {
            (Bound::Limited(v), Some(p)) => format!("{:.*}", p, v),
            (Bound::Limited(v), None) => v.to_string(),
            (Bound::Unbounded, _) => UNBOUNDED_TOKEN.to_string(),
        };
        // f.pad would treat precision as truncation, so pad by hand
        let fill = f.width().unwrap_or(0).saturating_sub(text.chars().count());
        let (before, after) = match f.align() {
            Some(fmt::Alignment::Left) => (0, fill),
            Some(fmt::Alignment::Center) => (fill / 2, fill - fill / 2),
            Some(fmt::Alignment::Right) | None => (fill, 0),
        };
        let c = f.fill();
        for _ in 0..before {
            f.write_char(c)?;
        }
        f.write_str(&text)?;
        for _ in 0..after {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl Serialize for Bound {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match *self {
            Bound::Limited(v) => serializer.serialize_f64(v),
            Bound::Unbounded => serializer.serialize_str(UNBOUNDED_TOKEN),
        }
    }
}
