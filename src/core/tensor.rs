// src/core/tensor.rs

use super::error::{Result, SimError};
use super::linalg::{self, Matrix2};
use num_complex::Complex64;
use num_traits::One;
use std::fmt;

/// Dense amplitude tensor of a qubit register: one axis of size 2 per live
/// qubit, stored flat with axis 0 as the most significant index bit.
///
/// Growing the tensor (preparation) and deleting an axis (post-measurement
/// collapse) reallocate the buffer; stride bookkeeping is derived from the
/// rank on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeTensor {
    amplitudes: Vec<Complex64>,
    rank: usize,
}

impl AmplitudeTensor {
    /// The rank-0 tensor holding the scalar 1.
    pub fn scalar() -> Self {
        Self { amplitudes: vec![Complex64::one()], rank: 0 }
    }

    /// |+>^⊗rank. Fails if `2^rank` amplitudes cannot be addressed.
    pub fn plus_state(rank: usize) -> Result<Self> {
        let dim = linalg::dimension(rank)?;
        let amp = Complex64::new((dim as f64).sqrt().recip(), 0.0);
        Ok(Self { amplitudes: vec![amp; dim], rank })
    }

    /// Wraps an existing amplitude buffer whose length must be a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Result<Self> {
        let rank = rank_of(amplitudes.len())?;
        Ok(Self { amplitudes, rank })
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub fn norm(&self) -> f64 {
        linalg::norm(&self.amplitudes)
    }

    pub fn normalize(&mut self, tolerance: f64) -> Result<()> {
        linalg::normalize(&mut self.amplitudes, tolerance)
    }

    /// `self ⊗ other`: appends the axes of `other` after the existing ones.
    /// Returns the number of axes appended.
    pub fn tensor(&mut self, other: &[Complex64]) -> Result<usize> {
        let added = rank_of(other.len())?;
        if added == 0 {
            return Err(SimError::InvalidOperation {
                message: "tensor product with a scalar adds no qubit".to_string(),
            });
        }
        let grown = self
            .amplitudes
            .iter()
            .flat_map(|a| other.iter().map(move |b| a * b))
            .collect();
        self.amplitudes = grown;
        self.rank += added;
        Ok(added)
    }

    /// Applies a `2^k x 2^k` operator to the given axes in place.
    pub fn apply(&mut self, op: &[Complex64], axes: &[usize]) -> Result<()> {
        self.amplitudes = linalg::contract_k_axes(&self.amplitudes, self.rank, op, axes)?;
        Ok(())
    }

    /// Applies a 2x2 operator to one axis in place.
    pub fn apply_single(&mut self, op: &Matrix2, axis: usize) -> Result<()> {
        self.amplitudes = linalg::contract_one_axis(&self.amplitudes, self.rank, op, axis)?;
        Ok(())
    }

    /// `<psi|op|psi>` on the implicitly normalized state.
    pub fn expectation(&self, op: &Matrix2, axis: usize, tolerance: f64) -> Result<Complex64> {
        linalg::expectation(&self.amplitudes, self.rank, op, axis, tolerance)
    }

    /// The rank-`n-1` slice of the tensor at `index` along `axis`.
    pub fn select(&self, axis: usize, index: usize) -> Result<Vec<Complex64>> {
        if axis >= self.rank {
            return Err(SimError::AxisOutOfRange { axis, rank: self.rank });
        }
        let stride = linalg::stride(self.rank, axis);
        // Flat index = high * 2 * stride + bit * stride + low
        let slice = (0..self.amplitudes.len() / 2)
            .map(|i| {
                let high = i / stride;
                let low = i % stride;
                self.amplitudes[high * 2 * stride + index * stride + low]
            })
            .collect();
        Ok(slice)
    }

    /// Deletes `axis` from a tensor already projected onto a basis state along it.
    ///
    /// Keeps the index-0 slice unless its norm is below `tolerance`, in which
    /// case the index-1 slice is kept. The result is renormalized. Returns the
    /// branch that was kept.
    pub fn remove_axis(&mut self, axis: usize, tolerance: f64) -> Result<usize> {
        let total = self.norm();
        if total < tolerance {
            return Err(SimError::DegenerateNorm { norm: total });
        }
        let mut branch = 0;
        let mut slice = self.select(axis, 0)?;
        if linalg::norm(&slice) < tolerance {
            branch = 1;
            slice = self.select(axis, 1)?;
        }
        linalg::normalize(&mut slice, tolerance)?;
        self.amplitudes = slice;
        self.rank -= 1;
        Ok(branch)
    }
}

impl Default for AmplitudeTensor {
    fn default() -> Self {
        Self::scalar()
    }
}

impl fmt::Display for AmplitudeTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

fn rank_of(len: usize) -> Result<usize> {
    if len == 0 || !len.is_power_of_two() {
        return Err(SimError::DimensionMismatch {
            expected: len.checked_next_power_of_two().unwrap_or(usize::MAX).max(1),
            actual: len,
        });
    }
    Ok(len.trailing_zeros() as usize)
}

/// |+> as a single-qubit amplitude pair.
pub fn plus() -> [Complex64; 2] {
    let amp = Complex64::new(super::constants::sim_constants::FRAC_1_SQRT_2, 0.0);
    [amp, amp]
}
