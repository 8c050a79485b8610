//! Unary element-wise math functions. Results are always `F32`.

use crate::array::Array;
use crate::dtype::DType;
use crate::ops::arithmetic::unary_op;

macro_rules! unary_fns {
    ($($(#[$doc:meta])* $name:ident => $f:expr;)*) => {
        impl Array {
            $(
                $(#[$doc])*
                pub fn $name(&self) -> Array {
                    unary_op(self, DType::F32, $f)
                }
            )*
        }
    };
}

unary_fns! {
    sin => f32::sin;
    cos => f32::cos;
    tan => f32::tan;
    asin => f32::asin;
    acos => f32::acos;
    atan => f32::atan;
    sinh => f32::sinh;
    cosh => f32::cosh;
    tanh => f32::tanh;
    asinh => f32::asinh;
    acosh => f32::acosh;
    atanh => f32::atanh;
    exp => f32::exp;
    /// Natural logarithm.
    log => f32::ln;
    abs => f32::abs;
    sqrt => f32::sqrt;
}

#[cfg(test)]
mod tests {
    use crate::Array;

    fn arr(data: &[f32]) -> Array {
        Array::from_host(data, [data.len()].into()).unwrap()
    }

    fn assert_close(a: &[f32], b: &[f32]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-5, "{x} vs {y}");
        }
    }

    #[test]
    fn test_trig() {
        let a = arr(&[0.0, std::f32::consts::FRAC_PI_2]);
        assert_close(a.sin().as_slice(), &[0.0, 1.0]);
        assert_close(a.cos().as_slice(), &[1.0, 0.0]);
        assert_close(arr(&[1.0]).atan().as_slice(), &[std::f32::consts::FRAC_PI_4]);
    }

    #[test]
    fn test_inverse_hyperbolic_roundtrip() {
        let a = arr(&[0.5, 1.5, 2.0]);
        assert_close(a.sinh().asinh().as_slice(), a.as_slice());
        assert_close(a.cosh().acosh().as_slice(), a.as_slice());
        assert_close(arr(&[0.25]).tanh().atanh().as_slice(), &[0.25]);
    }

    #[test]
    fn test_exp_log_sqrt_abs() {
        let a = arr(&[1.0, 4.0]);
        assert_close(a.log().exp().as_slice(), &[1.0, 4.0]);
        assert_close(a.sqrt().as_slice(), &[1.0, 2.0]);
        assert_eq!(arr(&[-3.0, 2.0]).abs().as_slice(), &[3.0, 2.0]);
    }

    #[test]
    fn test_domain_errors_are_nan() {
        assert!(arr(&[2.0]).asin().as_slice()[0].is_nan());
        assert!(arr(&[-1.0]).sqrt().as_slice()[0].is_nan());
    }
}
