use std::fmt;
use std::ops::Add;

/// Non-negative path length in graph-weight units, with an explicit infinity
/// for unreachable pairs. Kept as an enum (rather than `f64::INFINITY`) so
/// "unreachable" is a first-class, matchable state instead of a float
/// footgun.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub enum Distance {
    Finite(f64),
    Infinity,
}

impl Distance {
    pub const ZERO: Distance = Distance::Finite(0.0);

    pub fn from_weight(w: u64) -> Distance {
        Distance::Finite(w as f64)
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Distance::Finite(d) => Some(*d),
            Distance::Infinity => None,
        }
    }

    /// `self * (1 + percent/100)`, the maximum-permissible-path computation.
    /// Infinity scales to infinity regardless of percent.
    pub fn scale_by_percent(self, percent: u32) -> Distance {
        match self {
            Distance::Infinity => Distance::Infinity,
            Distance::Finite(d) => Distance::Finite(d * (1.0 + percent as f64 / 100.0)),
        }
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, other: Distance) -> Distance {
        match (self, other) {
            (Distance::Infinity, _) | (_, Distance::Infinity) => Distance::Infinity,
            (Distance::Finite(a), Distance::Finite(b)) => Distance::Finite(a + b),
        }
    }
}

impl std::iter::Sum<Self> for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Distance::ZERO, |a, b| a + b)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{:.2}", d),
            Distance::Infinity => write!(f, "INF"),
        }
    }
}

/// Total order over `Distance`, treating `Infinity` as the greatest element.
/// NaN cannot occur since all constructors take finite, non-negative inputs.
impl Eq for Distance {}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.partial_cmp(other).unwrap_or_else(|| {
            match (self, other) {
                (Distance::Infinity, Distance::Infinity) => std::cmp::Ordering::Equal,
                (Distance::Infinity, _) => std::cmp::Ordering::Greater,
                (_, Distance::Infinity) => std::cmp::Ordering::Less,
                _ => std::cmp::Ordering::Equal,
            }
        })
    }
}
