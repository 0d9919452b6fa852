use std::fmt;

use rand::prelude::*;

use crate::error::{NetError, Result};

/// Dense row-major matrix of `f64`.
///
/// Shape is fixed for the lifetime of the value and always at least 1x1;
/// every row holds exactly `cols` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    /// # Panics
    /// Panics if `rows` or `cols` is zero.
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        assert!(rows > 0 && cols > 0, "matrix dimensions must be non-zero, got {rows}x{cols}");
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Matrix with every cell drawn uniformly from [-1, 1).
    ///
    /// # Panics
    /// Panics if `rows` or `cols` is zero.
    pub fn random(rows: usize, cols: usize) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        res.randomize();
        res
    }

    /// Builds a matrix from rectangular row data.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(NetError::EmptyMatrix);
        }
        if let Some((row, r)) = data.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(NetError::RaggedRows {
                row,
                expected: cols,
                actual: r.len(),
            });
        }

        Ok(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    /// Builds an (n x 1) column from an n-length slice.
    pub fn from_array(values: &[f64]) -> Result<Matrix> {
        if values.is_empty() {
            return Err(NetError::EmptyMatrix);
        }
        Ok(Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&v| vec![v]).collect(),
        })
    }

    /// Inverse of [`Matrix::to_array`] for a known shape.
    pub fn from_row_major(rows: usize, cols: usize, values: &[f64]) -> Result<Matrix> {
        if rows == 0 || cols == 0 {
            return Err(NetError::EmptyMatrix);
        }
        if values.len() != rows * cols {
            return Err(NetError::mismatch("from_row_major", (rows * cols, 1), (values.len(), 1)));
        }
        Ok(Matrix {
            rows,
            cols,
            data: values.chunks(cols).map(<[f64]>::to_vec).collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    /// Flattens row-major into a vector of length `rows * cols`.
    pub fn to_array(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    /// Refills every cell with a uniform sample in [-1, 1) from `rng`.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in &mut self.data {
            for x in row.iter_mut() {
                *x = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }
    }

    /// In-place elementwise addition.
    pub fn add(&mut self, rhs: &Matrix) -> Result<()> {
        self.check_same_shape("add", rhs)?;
        self.zip_apply(rhs, |a, b| a + b);
        Ok(())
    }

    pub fn add_scalar(&mut self, n: f64) {
        for x in self.data.iter_mut().flatten() {
            *x += n;
        }
    }

    /// Elementwise `a - b` as a new matrix.
    pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        a.check_same_shape("subtract", b)?;
        let mut res = a.clone();
        res.zip_apply(b, |x, y| x - y);
        Ok(res)
    }

    /// Matrix product `a × b`.
    pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if a.cols != b.rows {
            return Err(NetError::mismatch("multiply", a.shape(), b.shape()));
        }

        let mut res = Matrix::zeros(a.rows, b.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..a.cols {
                    sum += a.data[i][k] * b.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    /// In-place elementwise (Hadamard) product.
    pub fn hadamard(&mut self, rhs: &Matrix) -> Result<()> {
        self.check_same_shape("hadamard", rhs)?;
        self.zip_apply(rhs, |a, b| a * b);
        Ok(())
    }

    pub fn scale(&mut self, n: f64) {
        for x in self.data.iter_mut().flatten() {
            *x *= n;
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    /// Applies `f` to every cell in place.
    pub fn map(&mut self, f: fn(f64) -> f64) {
        for x in self.data.iter_mut().flatten() {
            *x = f(*x);
        }
    }

    /// Non-mutating counterpart of [`Matrix::map`].
    pub fn mapped(&self, f: fn(f64) -> f64) -> Matrix {
        let mut res = self.clone();
        res.map(f);
        res
    }

    fn check_same_shape(&self, op: &'static str, rhs: &Matrix) -> Result<()> {
        if self.shape() != rhs.shape() {
            return Err(NetError::mismatch(op, self.shape(), rhs.shape()));
        }
        Ok(())
    }

    // Callers have already checked that shapes agree.
    fn zip_apply(&mut self, rhs: &Matrix, f: impl Fn(f64, f64) -> f64) {
        for (row, rhs_row) in self.data.iter_mut().zip(&rhs.data) {
            for (x, y) in row.iter_mut().zip(rhs_row) {
                *x = f(*x, *y);
            }
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            let cells: Vec<String> = row.iter().map(|x| format!("{x:>9.4}")).collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}
