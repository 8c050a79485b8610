use std::fmt;

/// Element types an array can carry.
///
/// Storage is always `f32`; the tag records how the values should be read.
/// `B8` arrays only ever hold `0.0` or `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DType {
    /// 32-bit IEEE 754 single-precision float
    #[default]
    F32,
    /// Boolean, produced by comparisons
    B8,
}

impl DType {
    /// Whether this dtype is the boolean type.
    pub fn is_bool(&self) -> bool {
        matches!(self, DType::B8)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::F32 => write!(f, "f32"),
            DType::B8 => write!(f, "b8"),
        }
    }
}
