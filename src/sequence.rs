use crate::{
    encoding::{self, ReadError},
    errors::{IndexError, ShapeError, SizeError},
    numeric::Numeric,
};
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};
use std::str::FromStr;

pub const MAX_SEQUENCE_SIZE: usize = 100_000_000;

/// Contiguous run of `T` whose length is fixed at construction.
///
/// `Clone` deep-copies the buffer; moving transfers ownership without
/// copying. Lengths are always in `1..=MAX_SEQUENCE_SIZE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence<T> {
    data: Box<[T]>,
}

fn check_len(len: usize) -> Result<(), SizeError> {
    if len == 0 {
        return Err(SizeError::Zero);
    }
    if len > MAX_SEQUENCE_SIZE {
        return Err(SizeError::TooLarge {
            requested: len,
            max: MAX_SEQUENCE_SIZE,
        });
    }
    Ok(())
}

impl<T: Default> Sequence<T> {
    /// Creates a sequence of `len` default-valued elements.
    pub fn new(len: usize) -> Result<Self, SizeError> {
        check_len(len)?;
        Ok(Self {
            data: std::iter::repeat_with(T::default).take(len).collect(),
        })
    }
}

impl<T> Sequence<T> {
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Result<Self, SizeError> {
        check_len(len)?;
        Ok(Self {
            data: (0..len).map(f).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Bounds-checked element access.
    pub fn at(&self, index: usize) -> Result<&T, IndexError> {
        self.data.get(index).ok_or(IndexError::OutOfBounds {
            index,
            len: self.data.len(),
        })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, IndexError> {
        let len = self.data.len();
        self.data
            .get_mut(index)
            .ok_or(IndexError::OutOfBounds { index, len })
    }

    /// Element access with no bounds validation.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        self.data.get_unchecked(index)
    }

    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        self.data.get_unchecked_mut(index)
    }

    fn check_same_len(&self, other: &Self) -> Result<(), ShapeError> {
        if self.len() != other.len() {
            return Err(ShapeError::Mismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }
}

impl<T: Clone> Sequence<T> {
    /// Copies the first `len` elements of `vals`.
    ///
    /// The caller guarantees `vals` holds at least `len` elements and that
    /// `len` lies in `1..=MAX_SEQUENCE_SIZE`; neither is validated here.
    pub fn from_parts(vals: &[T], len: usize) -> Self {
        debug_assert!(len >= 1 && len <= MAX_SEQUENCE_SIZE);
        Self {
            data: vals[..len].to_vec().into_boxed_slice(),
        }
    }
}

impl<T: Default> Default for Sequence<T> {
    fn default() -> Self {
        Self {
            data: Box::new([T::default()]),
        }
    }
}

impl<T: Clone> From<&[T]> for Sequence<T> {
    fn from(vals: &[T]) -> Self {
        Self::from_parts(vals, vals.len())
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(vals: Vec<T>) -> Self {
        debug_assert!(!vals.is_empty() && vals.len() <= MAX_SEQUENCE_SIZE);
        Self {
            data: vals.into_boxed_slice(),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(vals: [T; N]) -> Self {
        Self::from(Vec::from(vals))
    }
}

impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Sequence<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T: Numeric> Sequence<T> {
    /// Element-wise sum; errors when the lengths differ.
    pub fn try_add(&self, rhs: &Self) -> Result<Self, ShapeError> {
        self.check_same_len(rhs)?;
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| a + b)
                .collect(),
        })
    }

    /// Element-wise difference; errors when the lengths differ.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self, ShapeError> {
        self.check_same_len(rhs)?;
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| a - b)
                .collect(),
        })
    }

    /// Dot product; errors when the lengths differ.
    ///
    /// The accumulator is seeded with the product of the first pair and the
    /// remaining products are added left to right, so the exact evaluation
    /// order is stable for non-associative element types.
    pub fn dot(&self, rhs: &Self) -> Result<T, ShapeError> {
        self.check_same_len(rhs)?;
        let mut acc = self.data[0] * rhs.data[0];
        for i in 1..self.data.len() {
            acc = acc + self.data[i] * rhs.data[i];
        }
        Ok(acc)
    }
}

macro_rules! scalar_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Numeric> $trait<T> for &Sequence<T> {
            type Output = Sequence<T>;

            fn $method(self, rhs: T) -> Sequence<T> {
                Sequence {
                    data: self.data.iter().map(|&v| v $op rhs).collect(),
                }
            }
        }

        impl<T: Numeric> $trait<T> for Sequence<T> {
            type Output = Sequence<T>;

            fn $method(self, rhs: T) -> Sequence<T> {
                &self $op rhs
            }
        }
    };
}

scalar_op!(Add, add, +);
scalar_op!(Sub, sub, -);
scalar_op!(Mul, mul, *);

macro_rules! elementwise_op {
    ($trait:ident, $method:ident, $checked:ident, $what:literal) => {
        impl<T: Numeric> $trait<&Sequence<T>> for &Sequence<T> {
            type Output = Sequence<T>;

            /// Panics when the lengths differ; use the `try_` form for a
            /// recoverable error.
            fn $method(self, rhs: &Sequence<T>) -> Sequence<T> {
                match self.$checked(rhs) {
                    Ok(out) => out,
                    Err(e) => panic!("{}: {}", $what, e),
                }
            }
        }

        impl<T: Numeric> $trait<Sequence<T>> for Sequence<T> {
            type Output = Sequence<T>;

            fn $method(self, rhs: Sequence<T>) -> Sequence<T> {
                (&self).$method(&rhs)
            }
        }
    };
}

elementwise_op!(Add, add, try_add, "sequence addition");
elementwise_op!(Sub, sub, try_sub, "sequence subtraction");

impl<T: Numeric> Mul<&Sequence<T>> for &Sequence<T> {
    type Output = T;

    /// Dot product. Panics when the lengths differ; [`Sequence::dot`] is the
    /// recoverable form.
    fn mul(self, rhs: &Sequence<T>) -> T {
        match self.dot(rhs) {
            Ok(out) => out,
            Err(e) => panic!("sequence dot product: {}", e),
        }
    }
}

impl<T: Numeric> Mul<Sequence<T>> for Sequence<T> {
    type Output = T;

    fn mul(self, rhs: Sequence<T>) -> T {
        &self * &rhs
    }
}

/// Writes every element followed by a single space, with no newline.
impl<T: fmt::Display> fmt::Display for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in self.data.iter() {
            write!(f, "{} ", v)?;
        }
        Ok(())
    }
}

impl<T: Default + FromStr> Sequence<T> {
    /// Reads `self.len()` whitespace-separated values into the sequence in
    /// order. Surplus tokens are left unread.
    pub fn assign_text(&mut self, src: &str) -> Result<(), ReadError> {
        let expected = self.len();
        encoding::fill_from_tokens(self.data.iter_mut(), src, expected)
    }

    pub fn from_text(len: usize, src: &str) -> Result<Self, ReadError> {
        let mut seq = Self::new(len)?;
        seq.assign_text(src)?;
        Ok(seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_positive_length() {
        let v = Sequence::<i32>::new(5).unwrap();
        assert_eq!(v.len(), 5);
        assert_eq!(v.as_slice(), &[0; 5]);
    }

    #[test]
    fn test_new_rejects_zero_length() {
        assert_eq!(Sequence::<i32>::new(0), Err(SizeError::Zero));
    }

    #[test]
    fn test_new_rejects_too_large_length() {
        assert_eq!(
            Sequence::<i32>::new(MAX_SEQUENCE_SIZE + 1),
            Err(SizeError::TooLarge {
                requested: MAX_SEQUENCE_SIZE + 1,
                max: MAX_SEQUENCE_SIZE,
            }),
        );
    }

    #[test]
    fn test_default_is_length_one() {
        let v = Sequence::<i32>::default();
        assert_eq!(v.len(), 1);
        assert_eq!(v[0], 0);
    }

    #[test]
    fn test_clone_is_equal_to_source() {
        let v = Sequence::from([1.0, -2.0, 3.0, 4.0]);
        let copy = v.clone();
        assert_eq!(v, copy);
    }

    #[test]
    fn test_clone_has_its_own_storage() {
        let v = Sequence::from([1.0, -2.0, 3.0, 4.0]);
        let copy = v.clone();
        assert_ne!(v.as_slice().as_ptr(), copy.as_slice().as_ptr());
    }

    #[test]
    fn test_assign_changes_length() {
        let mut v1 = Sequence::<i32>::new(4).unwrap();
        let v2 = Sequence::<i32>::new(5).unwrap();
        assert_eq!(v1.len(), 4);
        v1 = v2.clone();
        assert_eq!(v1.len(), 5);
        assert_eq!(v1, v2);
    }

    #[test]
    fn test_from_parts_copies_prefix() {
        let v = Sequence::from_parts(&[1, -1, 2, 0, 9], 4);
        assert_eq!(v.as_slice(), &[1, -1, 2, 0]);
    }

    #[test]
    fn test_set_and_get_element() {
        let mut v = Sequence::<i32>::new(4).unwrap();
        v[0] = 4;
        assert_eq!(v[0], 4);
    }

    #[test]
    fn test_at_rejects_out_of_range_index() {
        let v = Sequence::<i32>::new(4).unwrap();
        assert_eq!(v.at(4), Err(IndexError::OutOfBounds { index: 4, len: 4 }));
        assert_eq!(v.at(3), Ok(&0));
    }

    #[test]
    fn test_at_mut_writes_in_range() {
        let mut v = Sequence::<i32>::new(4).unwrap();
        *v.at_mut(2).unwrap() = 7;
        assert_eq!(v[2], 7);
        assert!(v.at_mut(4).is_err());
    }

    #[test]
    fn test_equal_sequences_compare_equal() {
        let v1 = Sequence::from([1, -1, 2, 0]);
        let v2 = Sequence::from([1, -1, 2, 0]);
        assert_eq!(v1, v2);
    }

    #[test]
    fn test_different_lengths_compare_unequal() {
        let v1 = Sequence::<i32>::new(4).unwrap();
        let v2 = Sequence::<i32>::new(5).unwrap();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_scalar_add() {
        let v = Sequence::from([2, -1, 0]);
        assert_eq!(&v + 2, Sequence::from([4, 1, 2]));
    }

    #[test]
    fn test_scalar_sub() {
        let v = Sequence::from([2, -1, 0]);
        assert_eq!(&v - 2, Sequence::from([0, -3, -2]));
    }

    #[test]
    fn test_scalar_mul() {
        let v = Sequence::from([2, -1, 0]);
        assert_eq!(v * 2, Sequence::from([4, -2, 0]));
    }

    #[test]
    fn test_scalar_op_leaves_operand_unmodified() {
        let v = Sequence::from([2, -1, 0]);
        let _ = &v + 2;
        assert_eq!(v, Sequence::from([2, -1, 0]));
    }

    #[test]
    fn test_add_equal_length_sequences() {
        let v1 = Sequence::from([1, 2]);
        let v2 = Sequence::from([3, 4]);
        assert_eq!(v1 + v2, Sequence::from([4, 6]));
    }

    #[test]
    fn test_add_rejects_unequal_lengths() {
        let v1 = Sequence::<i32>::new(3).unwrap();
        let v2 = Sequence::<i32>::new(4).unwrap();
        assert_eq!(
            v1.try_add(&v2),
            Err(ShapeError::Mismatch { left: 3, right: 4 }),
        );
    }

    #[test]
    fn test_sub_equal_length_sequences() {
        let v1 = Sequence::from([1, 2]);
        let v2 = Sequence::from([3, 4]);
        assert_eq!(v1 - v2, Sequence::from([-2, -2]));
    }

    #[test]
    fn test_sub_rejects_unequal_lengths() {
        let v1 = Sequence::<i32>::new(3).unwrap();
        let v2 = Sequence::<i32>::new(4).unwrap();
        assert!(v1.try_sub(&v2).is_err());
    }

    #[test]
    fn test_dot_product() {
        let v1 = Sequence::from([1, 2]);
        let v2 = Sequence::from([3, 4]);
        assert_eq!(v1.dot(&v2), Ok(11));
        assert_eq!(v1 * v2, 11);
    }

    #[test]
    fn test_dot_rejects_unequal_lengths() {
        let v1 = Sequence::<i32>::new(3).unwrap();
        let v2 = Sequence::<i32>::new(4).unwrap();
        assert_eq!(
            v1.dot(&v2),
            Err(ShapeError::Mismatch { left: 3, right: 4 }),
        );
    }

    #[test]
    #[should_panic(expected = "sequence addition")]
    fn test_add_operator_panics_on_mismatch() {
        let v1 = Sequence::<i32>::new(3).unwrap();
        let v2 = Sequence::<i32>::new(4).unwrap();
        let _ = v1 + v2;
    }

    #[test]
    fn test_from_fn() {
        let v = Sequence::from_fn(4, |i| i * 2).unwrap();
        assert_eq!(v, Sequence::from([0, 2, 4, 6]));
    }

    #[test]
    fn test_unchecked_access() {
        let v = Sequence::from([5, 6, 7]);
        // Safety: 1 < 3
        assert_eq!(unsafe { *v.get_unchecked(1) }, 6);
    }

    #[test]
    fn test_display_appends_one_space_per_element() {
        let v = Sequence::from([1, -2, 3]);
        assert_eq!(v.to_string(), "1 -2 3 ");
    }

    #[test]
    fn test_assign_text_fills_in_order() {
        let mut v = Sequence::<i32>::new(3).unwrap();
        v.assign_text("4 -5 6").unwrap();
        assert_eq!(v, Sequence::from([4, -5, 6]));
    }

    #[test]
    fn test_from_text_rejects_missing_values() {
        assert_eq!(
            Sequence::<i32>::from_text(3, "1 2"),
            Err(ReadError::NotEnoughValues {
                expected: 3,
                found: 2,
            }),
        );
    }

    #[test]
    fn test_from_text_rejects_bad_token() {
        assert_eq!(
            Sequence::<i32>::from_text(2, "1 x"),
            Err(ReadError::Invalid {
                token: "x".to_string(),
            }),
        );
    }
}
