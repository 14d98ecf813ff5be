//! Symmetric distance storage.
//!
//! A [`SymmetricMatrix`] stores the upper triangle of an `n x n` symmetric
//! matrix, self-distances included, in `n(n+1)/2` cells. Lookups are `O(1)`
//! and `index(i, j) == index(j, i)` for every valid pair.

use thiserror::Error;

/// Errors raised by [`SymmetricMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Backing storage length is not `n(n+1)/2` for any `n`.
    #[error("storage length {len} is not a triangular number")]
    NotTriangular {
        /// Length of the rejected storage.
        len: usize,
    },
    /// A row or column index was outside `0..order`.
    #[error("index {index} is out of range for a matrix of order {order}")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Matrix order.
        order: usize,
    },
}

/// Return `n` such that `n(n+1)/2 == len`, if one exists.
///
/// # Examples
/// ```
/// use starhaul_core::matrix::triangular_order;
///
/// assert_eq!(triangular_order(6), Some(3));
/// assert_eq!(triangular_order(7), None);
/// ```
#[must_use]
pub fn triangular_order(len: usize) -> Option<usize> {
    let discriminant = len.checked_mul(8)?.checked_add(1)?;
    let order = (discriminant.isqrt() - 1) >> 1;
    (triangle_len(order)? == len).then_some(order)
}

fn triangle_len(order: usize) -> Option<usize> {
    order.checked_mul(order.checked_add(1)?).map(|cells| cells >> 1)
}

/// Fixed-size symmetric matrix stored as a packed upper triangle.
///
/// # Examples
/// ```
/// use starhaul_core::SymmetricMatrix;
///
/// # fn main() -> Result<(), starhaul_core::MatrixError> {
/// let mut distances = SymmetricMatrix::<u32>::with_order(3);
/// distances.set(0, 2, 7)?;
/// assert_eq!(distances.at(2, 0)?, 7);
/// assert_eq!(distances.order(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetricMatrix<T> {
    order: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> SymmetricMatrix<T> {
    /// Create a matrix of the given order filled with `T::default()`.
    #[must_use]
    pub fn with_order(order: usize) -> Self {
        let len = triangle_len(order).unwrap_or(0);
        Self {
            order,
            data: vec![T::default(); len],
        }
    }
}

impl<T> SymmetricMatrix<T> {
    /// Wrap packed upper-triangle storage, recovering the order from its length.
    ///
    /// # Errors
    /// Returns [`MatrixError::NotTriangular`] when `data.len()` is not a
    /// triangular number.
    pub fn from_data(data: Vec<T>) -> Result<Self, MatrixError> {
        let order = triangular_order(data.len())
            .ok_or(MatrixError::NotTriangular { len: data.len() })?;
        Ok(Self { order, data })
    }

    /// Number of rows (and columns).
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }

    /// Packed storage, row by row over the upper triangle.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Position of `(i, j)` in the packed storage.
    ///
    /// # Errors
    /// Returns [`MatrixError::IndexOutOfRange`] if either index is not below
    /// [`order`](Self::order).
    pub fn index(&self, i: usize, j: usize) -> Result<usize, MatrixError> {
        for index in [i, j] {
            if index >= self.order {
                return Err(MatrixError::IndexOutOfRange {
                    index,
                    order: self.order,
                });
            }
        }
        let (row, col) = if i <= j { (i, j) } else { (j, i) };
        // Cells preceding `row` number row * (2n - row + 1) / 2.
        let row_start = (row * (2 * self.order - row + 1)) >> 1;
        Ok(row_start + (col - row))
    }

    /// Borrow the value at `(i, j)`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        self.index(i, j).ok().and_then(|idx| self.data.get(idx))
    }

    /// Store `value` at `(i, j)` (and therefore at `(j, i)`).
    ///
    /// # Errors
    /// Returns [`MatrixError::IndexOutOfRange`] for an invalid index.
    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<(), MatrixError> {
        let idx = self.index(i, j)?;
        let order = self.order;
        let cell = self
            .data
            .get_mut(idx)
            .ok_or(MatrixError::IndexOutOfRange { index: i, order })?;
        *cell = value;
        Ok(())
    }
}

impl<T: Copy> SymmetricMatrix<T> {
    /// Copy out the value at `(i, j)`.
    ///
    /// # Errors
    /// Returns [`MatrixError::IndexOutOfRange`] for an invalid index.
    pub fn at(&self, i: usize, j: usize) -> Result<T, MatrixError> {
        let idx = self.index(i, j)?;
        self.data
            .get(idx)
            .copied()
            .ok_or(MatrixError::IndexOutOfRange {
                index: i,
                order: self.order,
            })
    }
}
