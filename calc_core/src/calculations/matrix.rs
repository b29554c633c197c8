//! # Matrix Operations
//!
//! Small dense matrices (up to 5×5) for the matrix calculator.
//! Shape mismatches are reported as domain errors; nothing is truncated
//! or padded to make an operation fit.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::validation::ensure_finite;

/// Largest supported row or column count
pub const MAX_DIMENSION: usize = 5;

/// Rectangular matrix stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build from rows; all rows must have the same non-zero length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> CalcResult<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);
        if row_count == 0 || col_count == 0 {
            return Err(CalcError::invalid_input("matrix", "empty", "Matrix must have at least one cell"));
        }
        if row_count > MAX_DIMENSION || col_count > MAX_DIMENSION {
            return Err(CalcError::invalid_input(
                "matrix",
                format!("{}x{}", row_count, col_count),
                format!("Dimensions are limited to {}x{}", MAX_DIMENSION, MAX_DIMENSION),
            ));
        }
        let mut data = Vec::with_capacity(row_count * col_count);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != col_count {
                return Err(CalcError::invalid_input(
                    format!("matrix[{}]", idx),
                    format!("{} columns", row.len()),
                    format!("Every row must have {} columns", col_count),
                ));
            }
            if let Some(bad) = row.iter().find(|v| !v.is_finite()) {
                return Err(CalcError::invalid_input(
                    format!("matrix[{}]", idx),
                    bad.to_string(),
                    "Cells must be finite numbers",
                ));
            }
            data.extend(row);
        }
        Ok(Self {
            rows: row_count,
            cols: col_count,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    fn shape(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }

    fn require_same_shape(&self, other: &Self, operation: &str) -> CalcResult<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(CalcError::domain(
                operation,
                format!("shapes {} and {} differ", self.shape(), other.shape()),
            ));
        }
        Ok(())
    }

    fn elementwise(&self, other: &Self, operation: &str, f: impl Fn(f64, f64) -> f64) -> CalcResult<Self> {
        self.require_same_shape(other, operation)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| ensure_finite(operation, "cell", f(*a, *b)))
            .collect::<CalcResult<Vec<f64>>>()?;
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    pub fn add(&self, other: &Self) -> CalcResult<Self> {
        self.elementwise(other, "matrix add", |a, b| a + b)
    }

    pub fn subtract(&self, other: &Self) -> CalcResult<Self> {
        self.elementwise(other, "matrix subtract", |a, b| a - b)
    }

    /// Standard inner-product multiplication; requires `self.cols == other.rows`.
    pub fn multiply(&self, other: &Self) -> CalcResult<Self> {
        if self.cols != other.rows {
            return Err(CalcError::domain(
                "matrix multiply",
                format!(
                    "cannot multiply {} by {}: inner dimensions {} and {} differ",
                    self.shape(),
                    other.shape(),
                    self.cols,
                    other.rows
                ),
            ));
        }
        let mut data = vec![0.0; self.rows * other.cols];
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.get(i, k) * other.get(k, j);
                }
                data[i * other.cols + j] = ensure_finite("matrix multiply", "cell", sum)?;
            }
        }
        Ok(Self {
            rows: self.rows,
            cols: other.cols,
            data,
        })
    }

    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.get(i, j));
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = CalcError;

    fn try_from(rows: Vec<Vec<f64>>) -> CalcResult<Self> {
        Matrix::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        m.to_rows()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixOp {
    Add,
    Subtract,
    Multiply,
    /// Unary; `right` is ignored
    Transpose,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixInput {
    pub op: MatrixOp,
    pub left: Matrix,
    #[serde(default)]
    pub right: Option<Matrix>,
}

/// Run the matrix calculator.
pub fn matrix_operation(input: &MatrixInput) -> CalcResult<Matrix> {
    let right = || input.right.as_ref().ok_or_else(|| CalcError::missing_field("right"));
    match input.op {
        MatrixOp::Add => input.left.add(right()?),
        MatrixOp::Subtract => input.left.subtract(right()?),
        MatrixOp::Multiply => input.left.multiply(right()?),
        MatrixOp::Transpose => Ok(input.left.transpose()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_add_subtract() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
        assert_eq!(a.add(&b).unwrap().to_rows(), vec![vec![6.0, 8.0], vec![10.0, 12.0]]);
        assert_eq!(b.subtract(&a).unwrap().to_rows(), vec![vec![4.0, 4.0], vec![4.0, 4.0]]);
    }

    #[test]
    fn test_add_shape_mismatch() {
        let a = m(vec![vec![1.0, 2.0]]);
        let b = m(vec![vec![1.0], vec![2.0]]);
        assert_eq!(a.add(&b).unwrap_err().error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_multiply_2x3_by_3x2() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let b = m(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]);
        let c = a.multiply(&b).unwrap();
        assert_eq!((c.rows(), c.cols()), (2, 2));
        assert_eq!(c.to_rows(), vec![vec![58.0, 64.0], vec![139.0, 154.0]]);
    }

    #[test]
    fn test_multiply_inner_mismatch() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let err = a.multiply(&a).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_transpose() {
        let a = m(vec![vec![1.0, 2.0, 3.0]]);
        assert_eq!(a.transpose().to_rows(), vec![vec![1.0], vec![2.0], vec![3.0]]);
    }

    #[test]
    fn test_rejects_ragged_and_oversized() {
        assert!(Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
        assert!(Matrix::from_rows(vec![vec![0.0; 6]]).is_err());
        assert!(Matrix::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_json_shape() {
        let input: MatrixInput =
            serde_json::from_str(r#"{"op":"multiply","left":[[1,2]],"right":[[3],[4]]}"#).unwrap();
        let result = matrix_operation(&input).unwrap();
        assert_eq!(serde_json::to_string(&result).unwrap(), "[[11.0]]");
    }

    #[test]
    fn test_binary_op_requires_right() {
        let input = MatrixInput {
            op: MatrixOp::Add,
            left: m(vec![vec![1.0]]),
            right: None,
        };
        assert_eq!(matrix_operation(&input).unwrap_err().error_code(), "MISSING_FIELD");
    }
}
