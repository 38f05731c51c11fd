//! Small dense matrices.
//!
//! This is construction-time and test-time arithmetic: everything here
//! allocates. The reverberator copies its mixing matrix into a fixed-size
//! array before it processes any audio.

use std::ops::{Add, Mul};

use crate::error::ConfigError;

/// Row-major dense matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> Matrix<T> {
    /// Build from nested rows. Every row must have the same length; an empty
    /// list gives a 0 x 0 matrix.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ConfigError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(ConfigError::RaggedRows {
                    row,
                    expected: cols,
                    got: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// `rows x cols` matrix with element `(i, j)` set to `f(i, j)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self.get(j, i))
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }
}

impl<T: Copy + Default + From<u8>> Matrix<T> {
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { T::from(1) } else { T::default() })
    }
}

impl<T> Matrix<T>
where
    T: Copy + Default + Add<Output = T> + Mul<Output = T>,
{
    /// Standard matrix product `self · other`.
    pub fn multiply(&self, other: &Matrix<T>) -> Result<Matrix<T>, ConfigError> {
        multiply(self, other)
    }
}

/// Standard matrix product. Fails on empty operands or when the column count
/// of `a` differs from the row count of `b`.
pub fn multiply<T>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, ConfigError>
where
    T: Copy + Default + Add<Output = T> + Mul<Output = T>,
{
    if a.is_empty() || b.is_empty() {
        return Err(ConfigError::EmptyMatrix);
    }
    if a.cols != b.rows {
        return Err(ConfigError::DimensionMismatch {
            left: (a.rows, a.cols),
            right: (b.rows, b.cols),
        });
    }

    Ok(Matrix::from_fn(a.rows, b.cols, |i, j| {
        (0..a.cols).fold(T::default(), |acc, k| acc + a.get(i, k) * b.get(k, j))
    }))
}

impl Matrix<f32> {
    /// Gram-Schmidt on the rows, accumulated in f64. The result has
    /// orthonormal rows spanning the same space, so a square input becomes
    /// an orthogonal (energy-preserving) operator.
    pub fn orthonormalize(&self) -> Result<Self, ConfigError> {
        if self.is_empty() {
            return Err(ConfigError::EmptyMatrix);
        }
        let mut basis: Vec<Vec<f64>> = Vec::with_capacity(self.rows);
        for i in 0..self.rows {
            let mut v: Vec<f64> = self.row(i).iter().map(|&x| x as f64).collect();
            for u in &basis {
                let projection: f64 = v.iter().zip(u).map(|(a, b)| a * b).sum();
                for (x, y) in v.iter_mut().zip(u) {
                    *x -= projection * y;
                }
            }
            let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm < 1e-9 {
                return Err(ConfigError::SingularMatrix);
            }
            v.iter_mut().for_each(|x| *x /= norm);
            basis.push(v);
        }
        Ok(Self::from_fn(self.rows, self.cols, |i, j| basis[i][j] as f32))
    }

    /// Largest singular value, estimated by power iteration on `AᵀA`.
    pub fn operator_norm(&self) -> Result<f32, ConfigError> {
        let gram = multiply(&self.transpose(), self)?;
        let mut v = Matrix::from_fn(self.cols, 1, |_, _| 1.0f32);
        let mut estimate = 0.0f32;
        for _ in 0..64 {
            let w = multiply(&gram, &v)?;
            let norm = w.data.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm == 0.0 {
                return Ok(0.0);
            }
            estimate = norm;
            v = Matrix::from_fn(w.rows, 1, |i, _| w.get(i, 0) / norm);
        }
        Ok(estimate.sqrt())
    }
}
