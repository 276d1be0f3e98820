use std::fmt::{Display, Formatter};

/// Rejected construction size for a sequence or grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeError {
    Zero,
    TooLarge { requested: usize, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    OutOfBounds { index: usize, len: usize },
}

/// Dimension mismatch between the operands of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    Mismatch { left: usize, right: usize },
}

impl Display for SizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::Zero => {
                write!(f, "size must be greater than zero")
            }
            Self::TooLarge { requested, max } => {
                write!(f, "size {} exceeds the maximum of {}", requested, max)
            }
        }
    }
}
impl std::error::Error for SizeError {}

impl Display for IndexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::OutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for length {}", index, len)
            }
        }
    }
}
impl std::error::Error for IndexError {}

impl Display for ShapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::Mismatch { left, right } => {
                write!(f, "operand dimensions {} and {} do not match", left, right)
            }
        }
    }
}
impl std::error::Error for ShapeError {}
