use crate::{
    encoding::{self, ReadError},
    errors::{IndexError, ShapeError, SizeError},
    numeric::Numeric,
    sequence::Sequence,
};
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};
use std::str::FromStr;

pub const MAX_GRID_SIZE: usize = 10_000;

/// Square two-dimensional container built from a sequence of row sequences.
///
/// Every row is an independently owned [`Sequence`] of length `order`, so
/// ownership forms a tree with no aliasing between rows. The order is always
/// in `1..MAX_GRID_SIZE` (strictly below the cap).
///
/// Mutable row access can replace a row wholesale; callers must keep
/// replacement rows at length `order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: Sequence<Sequence<T>>,
}

impl<T: Default> Grid<T> {
    /// Creates an `order` x `order` grid of default-valued elements.
    ///
    /// An order of zero is rejected by the underlying row-sequence
    /// construction.
    pub fn new(order: usize) -> Result<Self, SizeError> {
        if order >= MAX_GRID_SIZE {
            return Err(SizeError::TooLarge {
                requested: order,
                max: MAX_GRID_SIZE - 1,
            });
        }
        let mut rows = Sequence::<Sequence<T>>::new(order)?;
        for i in 0..order {
            rows[i] = Sequence::new(order)?;
        }
        Ok(Self { rows })
    }
}

impl<T: Default> Default for Grid<T> {
    fn default() -> Self {
        Self {
            rows: Sequence::from(vec![Sequence::default()]),
        }
    }
}

impl<T> Grid<T> {
    /// The row (and column) count.
    pub fn order(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Sequence<T>] {
        self.rows.as_slice()
    }

    /// Bounds-checked element access, row first.
    pub fn at(&self, row: usize, col: usize) -> Result<&T, IndexError> {
        self.rows.at(row)?.at(col)
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut T, IndexError> {
        self.rows.at_mut(row)?.at_mut(col)
    }
}

impl<T> Index<usize> for Grid<T> {
    type Output = Sequence<T>;

    fn index(&self, row: usize) -> &Sequence<T> {
        &self.rows[row]
    }
}

impl<T> IndexMut<usize> for Grid<T> {
    fn index_mut(&mut self, row: usize) -> &mut Sequence<T> {
        &mut self.rows[row]
    }
}

impl<T: Numeric> Grid<T> {
    /// Element-wise sum.
    ///
    /// There is no order pre-check: rows are always `order` long, so a
    /// mismatch surfaces from the first row-level operation.
    pub fn try_add(&self, rhs: &Self) -> Result<Self, ShapeError> {
        self.rows_zip(rhs, Sequence::try_add)
    }

    /// Element-wise difference; same mismatch behavior as [`Grid::try_add`].
    pub fn try_sub(&self, rhs: &Self) -> Result<Self, ShapeError> {
        self.rows_zip(rhs, Sequence::try_sub)
    }

    fn rows_zip(
        &self,
        rhs: &Self,
        f: impl Fn(&Sequence<T>, &Sequence<T>) -> Result<Sequence<T>, ShapeError>,
    ) -> Result<Self, ShapeError> {
        let rows = self
            .rows
            .as_slice()
            .iter()
            .zip(rhs.rows.as_slice())
            .map(|(a, b)| f(a, b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            rows: Sequence::from(rows),
        })
    }

    /// Matrix-vector product: element `i` of the result is the dot product
    /// of row `i` with `v`. Errors when `v.len()` differs from the order.
    pub fn try_mul_vector(&self, v: &Sequence<T>) -> Result<Sequence<T>, ShapeError> {
        if v.len() != self.order() {
            return Err(ShapeError::Mismatch {
                left: self.order(),
                right: v.len(),
            });
        }
        let out = self
            .rows
            .as_slice()
            .iter()
            .map(|row| row.dot(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Sequence::from(out))
    }

    /// Collapses each pair of matching rows to a single dot product, so the
    /// result holds one value per row. This is not matrix multiplication;
    /// see [`Grid::matmul`] for the conventional product.
    pub fn row_dot_products(&self, rhs: &Self) -> Result<Sequence<T>, ShapeError> {
        let out = self
            .rows
            .as_slice()
            .iter()
            .zip(rhs.rows.as_slice())
            .map(|(a, b)| a.dot(b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Sequence::from(out))
    }

    /// Conventional matrix multiplication of two grids of equal order.
    ///
    /// Each output cell accumulates like [`Sequence::dot`]: seeded with the
    /// first product, then summed left to right.
    pub fn matmul(&self, rhs: &Self) -> Result<Self, ShapeError> {
        if self.order() != rhs.order() {
            return Err(ShapeError::Mismatch {
                left: self.order(),
                right: rhs.order(),
            });
        }
        let n = self.order();
        let rows: Vec<Sequence<T>> = (0..n)
            .map(|i| {
                let row: Vec<T> = (0..n)
                    .map(|j| {
                        let mut acc = self[i][0] * rhs[0][j];
                        for k in 1..n {
                            acc = acc + self[i][k] * rhs[k][j];
                        }
                        acc
                    })
                    .collect();
                Sequence::from(row)
            })
            .collect();
        Ok(Self {
            rows: Sequence::from(rows),
        })
    }
}

impl<T: Numeric> Mul<T> for &Grid<T> {
    type Output = Grid<T>;

    fn mul(self, rhs: T) -> Grid<T> {
        let rows: Vec<Sequence<T>> = self.rows.as_slice().iter().map(|row| row * rhs).collect();
        Grid {
            rows: Sequence::from(rows),
        }
    }
}

impl<T: Numeric> Mul<T> for Grid<T> {
    type Output = Grid<T>;

    fn mul(self, rhs: T) -> Grid<T> {
        &self * rhs
    }
}

impl<T: Numeric> Mul<&Sequence<T>> for &Grid<T> {
    type Output = Sequence<T>;

    /// Matrix-vector product. Panics when the vector length differs from the
    /// order; [`Grid::try_mul_vector`] is the recoverable form.
    fn mul(self, rhs: &Sequence<T>) -> Sequence<T> {
        match self.try_mul_vector(rhs) {
            Ok(out) => out,
            Err(e) => panic!("matrix-vector product: {}", e),
        }
    }
}

macro_rules! grid_elementwise_op {
    ($trait:ident, $method:ident, $checked:ident, $what:literal) => {
        impl<T: Numeric> $trait<&Grid<T>> for &Grid<T> {
            type Output = Grid<T>;

            /// Panics when the orders differ; use the `try_` form for a
            /// recoverable error.
            fn $method(self, rhs: &Grid<T>) -> Grid<T> {
                match self.$checked(rhs) {
                    Ok(out) => out,
                    Err(e) => panic!("{}: {}", $what, e),
                }
            }
        }

        impl<T: Numeric> $trait<Grid<T>> for Grid<T> {
            type Output = Grid<T>;

            fn $method(self, rhs: Grid<T>) -> Grid<T> {
                (&self).$method(&rhs)
            }
        }
    };
}

grid_elementwise_op!(Add, add, try_add, "grid addition");
grid_elementwise_op!(Sub, sub, try_sub, "grid subtraction");

/// Writes the grid row-major: one space after each element, a newline after
/// each row.
impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows.as_slice() {
            write!(f, "{}", row)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Default + FromStr> Grid<T> {
    /// Reads `order * order` whitespace-separated values row-major into the
    /// grid. Surplus tokens are left unread.
    pub fn assign_text(&mut self, src: &str) -> Result<(), ReadError> {
        let expected = self.order() * self.order();
        let slots = self
            .rows
            .as_mut_slice()
            .iter_mut()
            .flat_map(|row| row.as_mut_slice().iter_mut());
        encoding::fill_from_tokens(slots, src, expected)
    }

    pub fn from_text(order: usize, src: &str) -> Result<Self, ReadError> {
        let mut grid = Self::new(order)?;
        grid.assign_text(src)?;
        Ok(grid)
    }
}
