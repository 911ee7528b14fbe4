use std::{fmt, ops::Mul};

use super::base_value::BaseValue;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Coefficient {
    Integer(i64),
    Float(f64),
}

impl Coefficient {
    pub fn is_one(&self) -> bool {
        match self {
            Coefficient::Integer(i) => *i == 1,
            Coefficient::Float(f) => *f == 1.0,
        }
    }
}

impl Mul<BaseValue> for Coefficient {
    type Output = BaseValue;

    fn mul(self, other: BaseValue) -> BaseValue {
        match (self, other) {
            (_, BaseValue::Maximum) => BaseValue::Maximum,
            (_, BaseValue::Zero) => BaseValue::Zero,
            (Coefficient::Integer(c), BaseValue::Integer(b)) => BaseValue::Integer(c * b),
            (Coefficient::Integer(c), BaseValue::Float(b)) => BaseValue::Float(c as f64 * b),
            (Coefficient::Float(c), BaseValue::Integer(b)) => BaseValue::Float(c * b as f64),
            (Coefficient::Float(c), BaseValue::Float(b)) => BaseValue::Float(c * b),
        }
    }
}

impl Mul<BaseValue> for &Coefficient {
    type Output = BaseValue;
    fn mul(self, other: BaseValue) -> BaseValue {
        (*self).mul(other)
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Coefficient::Integer(i) => write!(f, "{}", i),
            Coefficient::Float(fl) => write!(f, "{}", fl),
        }
    }
}
