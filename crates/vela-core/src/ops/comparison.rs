//! Comparison operations. Results are `B8` arrays of 0.0 / 1.0.

use crate::array::Array;
use crate::dtype::DType;
use crate::ops::arithmetic::{binary_op, unary_op};
use crate::Result;

fn flag(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

impl Array {
    /// self <= other.
    pub fn le(&self, other: &Array) -> Result<Array> {
        binary_op(self, other, DType::B8, |a, b| flag(a <= b))
    }

    /// self < other.
    pub fn lt(&self, other: &Array) -> Result<Array> {
        binary_op(self, other, DType::B8, |a, b| flag(a < b))
    }

    /// self >= other.
    pub fn ge(&self, other: &Array) -> Result<Array> {
        binary_op(self, other, DType::B8, |a, b| flag(a >= b))
    }

    /// self > other.
    pub fn gt(&self, other: &Array) -> Result<Array> {
        binary_op(self, other, DType::B8, |a, b| flag(a > b))
    }

    /// self == other (exact).
    pub fn eq(&self, other: &Array) -> Result<Array> {
        binary_op(self, other, DType::B8, |a, b| flag(a == b))
    }

    /// self != other (exact).
    pub fn ne(&self, other: &Array) -> Result<Array> {
        binary_op(self, other, DType::B8, |a, b| flag(a != b))
    }

    pub fn le_scalar(&self, s: f32) -> Array {
        unary_op(self, DType::B8, |a| flag(a <= s))
    }

    pub fn lt_scalar(&self, s: f32) -> Array {
        unary_op(self, DType::B8, |a| flag(a < s))
    }

    pub fn ge_scalar(&self, s: f32) -> Array {
        unary_op(self, DType::B8, |a| flag(a >= s))
    }

    pub fn gt_scalar(&self, s: f32) -> Array {
        unary_op(self, DType::B8, |a| flag(a > s))
    }

    pub fn eq_scalar(&self, s: f32) -> Array {
        unary_op(self, DType::B8, |a| flag(a == s))
    }

    pub fn ne_scalar(&self, s: f32) -> Array {
        unary_op(self, DType::B8, |a| flag(a != s))
    }

    /// scalar <= self.
    pub fn scalar_le(&self, s: f32) -> Array {
        unary_op(self, DType::B8, |a| flag(s <= a))
    }

    /// scalar < self.
    pub fn scalar_lt(&self, s: f32) -> Array {
        unary_op(self, DType::B8, |a| flag(s < a))
    }

    /// scalar >= self.
    pub fn scalar_ge(&self, s: f32) -> Array {
        unary_op(self, DType::B8, |a| flag(s >= a))
    }

    /// scalar > self.
    pub fn scalar_gt(&self, s: f32) -> Array {
        unary_op(self, DType::B8, |a| flag(s > a))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Array, DType};

    fn arr(data: &[f32]) -> Array {
        Array::from_host(data, [data.len()].into()).unwrap()
    }

    #[test]
    fn test_eq_ne() {
        let a = arr(&[1.0, 2.0, 3.0]);
        let b = arr(&[1.0, 0.0, 3.0]);
        let c = a.eq(&b).unwrap();
        assert_eq!(c.dtype(), DType::B8);
        assert_eq!(c.as_slice(), &[1.0, 0.0, 1.0]);
        assert_eq!(a.ne(&b).unwrap().as_slice(), &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_ordering() {
        let a = arr(&[1.0, 2.0, 3.0]);
        let b = arr(&[2.0, 2.0, 1.0]);
        assert_eq!(a.gt(&b).unwrap().as_slice(), &[0.0, 0.0, 1.0]);
        assert_eq!(a.lt(&b).unwrap().as_slice(), &[1.0, 0.0, 0.0]);
        assert_eq!(a.ge(&b).unwrap().as_slice(), &[0.0, 1.0, 1.0]);
        assert_eq!(a.le(&b).unwrap().as_slice(), &[1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_scalar_and_reversed() {
        let a = arr(&[1.0, 2.0, 3.0]);
        assert_eq!(a.lt_scalar(2.0).as_slice(), &[1.0, 0.0, 0.0]);
        assert_eq!(a.scalar_lt(2.0).as_slice(), &[0.0, 0.0, 1.0]);
        assert_eq!(a.ge_scalar(2.0).as_slice(), &[0.0, 1.0, 1.0]);
        assert_eq!(a.scalar_ge(2.0).as_slice(), &[1.0, 1.0, 0.0]);
        assert_eq!(a.eq_scalar(2.0).dtype(), DType::B8);
    }
}
