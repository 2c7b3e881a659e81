use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ZwError, ZwResult};

/// A closed interval over an ordered value. `low <= high` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range<T> {
    low: T,
    high: T,
}

impl<T: PartialOrd + Copy + fmt::Display> Range<T> {
    /// Create a range, rejecting inverted bounds.
    pub fn new(low: T, high: T) -> ZwResult<Self> {
        if low > high {
            return Err(ZwError::RangeInverted {
                low: low.to_string(),
                high: high.to_string(),
            });
        }
        Ok(Self { low, high })
    }

    /// The inclusive lower bound.
    pub fn low(&self) -> T {
        self.low
    }

    /// The inclusive upper bound.
    pub fn high(&self) -> T {
        self.high
    }

    /// True if `value` lies within the interval, endpoints included.
    pub fn includes(&self, value: T) -> bool {
        self.low <= value && value <= self.high
    }

    /// True if the two intervals share at least one point. Symmetric.
    pub fn intersects(&self, other: &Range<T>) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

impl Range<f64> {
    /// The degenerate range containing exactly one value.
    pub fn at(value: f64) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    /// The range covering the whole axis.
    pub fn unbounded() -> Self {
        Self {
            low: f64::NEG_INFINITY,
            high: f64::INFINITY,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

// Deserialization goes through the constructor so stored data cannot
// smuggle in an inverted range.
impl<'de, T> Deserialize<'de> for Range<T>
where
    T: Deserialize<'de> + PartialOrd + Copy + fmt::Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw<T> {
            low: T,
            high: T,
        }
        let raw = Raw::<T>::deserialize(deserializer)?;
        Range::new(raw.low, raw.high).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn inverted_bounds_rejected() {
        assert!(Range::new(3.0, 1.0).is_err());
        assert!(Range::new(1.0, 1.0).is_ok());
        assert!(Range::new(-5, 12).is_ok());
    }

    #[test]
    fn includes_endpoints_and_interior() {
        let r = Range::new(-2.0, 4.5).unwrap();
        assert!(r.includes(-2.0));
        assert!(r.includes(4.5));
        assert!(r.includes(0.0));
        assert!(!r.includes(-2.1));
        assert!(!r.includes(4.6));
    }

    #[test]
    fn intersects_overlapping_and_touching() {
        let a = Range::new(0.0, 10.0).unwrap();
        let b = Range::new(10.0, 20.0).unwrap();
        let c = Range::new(10.5, 20.0).unwrap();
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn unbounded_covers_everything() {
        let r = Range::unbounded();
        assert!(r.includes(f64::NEG_INFINITY));
        assert!(r.includes(1e300));
        assert!(r.intersects(&Range::at(-42.0)));
    }

    #[test]
    fn deserialize_rejects_inverted_bounds() {
        let err = serde_json::from_str::<Range<f64>>(r#"{"low": 9.0, "high": 1.0}"#);
        assert!(err.is_err());
        let ok: Range<f64> = serde_json::from_str(r#"{"low": 1.0, "high": 9.0}"#).unwrap();
        assert_eq!(ok.low(), 1.0);
        assert_eq!(ok.high(), 9.0);
    }

    fn arb_range() -> impl Strategy<Value = Range<f64>> {
        (-1e6f64..1e6, -1e6f64..1e6).prop_map(|(a, b)| {
            if a <= b {
                Range::new(a, b).unwrap()
            } else {
                Range::new(b, a).unwrap()
            }
        })
    }

    proptest! {
        #[test]
        fn intersects_is_symmetric(a in arb_range(), b in arb_range()) {
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn endpoints_always_included(r in arb_range()) {
            prop_assert!(r.includes(r.low()));
            prop_assert!(r.includes(r.high()));
        }

        #[test]
        fn intersecting_ranges_share_a_point(a in arb_range(), b in arb_range()) {
            let witness = a.low().max(b.low());
            prop_assert_eq!(a.intersects(&b), a.includes(witness) && b.includes(witness));
        }
    }
}
