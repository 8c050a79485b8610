//! Whole-array reductions: sum, max, min.

use rayon::prelude::*;

use crate::array::Array;
use crate::error::VelaError;
use crate::Result;

const PAR_THRESHOLD: usize = 8192;

impl Array {
    /// Sum of all elements. An empty array sums to 0.
    pub fn sum(&self) -> f32 {
        let slice = self.as_slice();
        if slice.len() >= PAR_THRESHOLD {
            slice.par_iter().sum()
        } else {
            slice.iter().sum()
        }
    }

    /// Largest element. NaNs are skipped unless every element is NaN.
    pub fn max(&self) -> Result<f32> {
        if self.is_empty() {
            return Err(VelaError::EmptyArray("max"));
        }
        let slice = self.as_slice();
        let val = if slice.len() >= PAR_THRESHOLD {
            slice.par_iter().cloned().reduce(|| f32::NEG_INFINITY, f32::max)
        } else {
            slice.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
        };
        Ok(val)
    }

    /// Smallest element. NaNs are skipped unless every element is NaN.
    pub fn min(&self) -> Result<f32> {
        if self.is_empty() {
            return Err(VelaError::EmptyArray("min"));
        }
        let slice = self.as_slice();
        let val = if slice.len() >= PAR_THRESHOLD {
            slice.par_iter().cloned().reduce(|| f32::INFINITY, f32::min)
        } else {
            slice.iter().cloned().fold(f32::INFINITY, f32::min)
        };
        Ok(val)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use crate::{Array, Dims};

    #[test]
    fn test_sum() {
        let a = Array::from_host(&[1.0, 2.0, 3.0, 4.0], [2, 2].into()).unwrap();
        assert_eq!(a.sum(), 10.0);
        assert_eq!(Array::zeros([0].into()).unwrap().sum(), 0.0);
    }

    #[test]
    fn test_max_min() {
        let a = Array::from_host(&[3.0, 1.0, 4.0, 1.0, 5.0], [5].into()).unwrap();
        assert_eq!(a.max().unwrap(), 5.0);
        assert_eq!(a.min().unwrap(), 1.0);
    }

    #[test]
    fn test_empty_max_is_error() {
        let a = Array::zeros([0, 3].into()).unwrap();
        assert!(a.max().is_err());
        assert!(a.min().is_err());
    }

    #[test]
    fn test_parallel_path_matches_sequential() {
        let mut rng = rand::thread_rng();
        let n = 20_000;
        let data: Vec<f32> = (0..n).map(|_| rng.gen_range(-1.0f32..1.0)).collect();
        let a = Array::from_host(&data, Dims::from_slice(&[100, 200])).unwrap();

        let seq: f32 = data.iter().sum();
        assert!((a.sum() - seq).abs() < 1e-2);

        let seq_max = data.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(a.max().unwrap(), seq_max);
    }
}
