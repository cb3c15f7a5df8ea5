// src/core/linalg.rs

//! Dense tensor primitives over a flat amplitude buffer.
//!
//! A rank-`n` tensor with every axis of size 2 is stored as `2^n` amplitudes
//! in row-major order: axis 0 is the most significant bit of the flat index,
//! axis `n - 1` the least significant. Nothing here knows about qubit labels.

use crate::core::error::{Result, SimError};
use num_complex::Complex64;
use num_traits::Zero;

/// A single-qubit operator, `op[row][col]`.
pub type Matrix2 = [[Complex64; 2]; 2];

/// Flat-index stride of `axis` in a rank-`rank` tensor.
#[inline]
pub(crate) fn stride(rank: usize, axis: usize) -> usize {
    1usize << (rank - 1 - axis)
}

/// `2^rank`, or an error when that does not fit in `usize`.
pub(crate) fn dimension(rank: usize) -> Result<usize> {
    u32::try_from(rank)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
        .ok_or_else(|| SimError::InvalidOperation {
            message: format!("rank {} overflows the addressable state size", rank),
        })
}

fn check_len(tensor: &[Complex64], rank: usize) -> Result<()> {
    let expected = dimension(rank)?;
    if tensor.len() != expected {
        return Err(SimError::DimensionMismatch { expected, actual: tensor.len() });
    }
    Ok(())
}

/// Index-remap table for a contraction: entry `s` is the flat-index offset of
/// the sub-basis state `s` over `axes`, with `axes[0]` as the most significant
/// bit of `s`.
fn axis_offsets(rank: usize, axes: &[usize]) -> Vec<usize> {
    let k = axes.len();
    (0..1usize << k)
        .map(|sub| {
            axes.iter().enumerate().fold(0usize, |acc, (j, &axis)| {
                let bit = (sub >> (k - 1 - j)) & 1;
                acc | (bit * stride(rank, axis))
            })
        })
        .collect()
}

/// Contracts a `2^k x 2^k` operator (row-major, `op[out * 2^k + in]`) against
/// the named axes of the tensor, in the given order, and returns the result
/// with the original axis ordering.
///
/// The axis permutation lives in an offset table, so the output is written
/// in place order and never has to be transposed back.
pub fn contract_k_axes(
    tensor: &[Complex64],
    rank: usize,
    op: &[Complex64],
    axes: &[usize],
) -> Result<Vec<Complex64>> {
    check_len(tensor, rank)?;
    if axes.is_empty() {
        return Err(SimError::InvalidOperation {
            message: "contraction needs at least one axis".to_string(),
        });
    }
    for (i, &axis) in axes.iter().enumerate() {
        if axis >= rank {
            return Err(SimError::AxisOutOfRange { axis, rank });
        }
        if axes[..i].contains(&axis) {
            return Err(SimError::InvalidOperation {
                message: format!("axis {} appears twice in contraction", axis),
            });
        }
    }
    let sub_dim = 1usize << axes.len();
    if op.len() != sub_dim * sub_dim {
        return Err(SimError::DimensionMismatch { expected: sub_dim * sub_dim, actual: op.len() });
    }

    let offsets = axis_offsets(rank, axes);
    let mask = offsets[sub_dim - 1];
    let mut out = vec![Complex64::zero(); tensor.len()];
    let mut gathered = vec![Complex64::zero(); sub_dim];

    for base in (0..tensor.len()).filter(|i| i & mask == 0) {
        for (slot, offset) in gathered.iter_mut().zip(&offsets) {
            *slot = tensor[base + offset];
        }
        for (row, offset) in offsets.iter().enumerate() {
            let coeffs = &op[row * sub_dim..(row + 1) * sub_dim];
            out[base + offset] = coeffs
                .iter()
                .zip(&gathered)
                .fold(Complex64::zero(), |acc, (c, a)| acc + c * a);
        }
    }
    Ok(out)
}

/// Left-multiplies a 2x2 operator into one axis of the tensor.
/// The output has the same shape as the input.
pub fn contract_one_axis(
    tensor: &[Complex64],
    rank: usize,
    op: &Matrix2,
    axis: usize,
) -> Result<Vec<Complex64>> {
    let flat = [op[0][0], op[0][1], op[1][0], op[1][1]];
    contract_k_axes(tensor, rank, &flat, &[axis])
}

/// Euclidean norm: square root of the summed squared magnitudes.
pub fn norm(tensor: &[Complex64]) -> f64 {
    tensor.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt()
}

/// Divides every amplitude by the tensor's norm.
///
/// Fails with [`SimError::DegenerateNorm`] (leaving the tensor unchanged) if
/// the norm is below `tolerance`.
pub fn normalize(tensor: &mut [Complex64], tolerance: f64) -> Result<()> {
    let n = norm(tensor);
    if n < tolerance {
        return Err(SimError::DegenerateNorm { norm: n });
    }
    tensor.iter_mut().for_each(|c| *c /= n);
    Ok(())
}

/// `<psi| op |psi> / <psi|psi>` with `op` acting on a single axis.
/// The argument is not mutated; normalization is folded into the division.
pub fn expectation(
    tensor: &[Complex64],
    rank: usize,
    op: &Matrix2,
    axis: usize,
    tolerance: f64,
) -> Result<Complex64> {
    let n = norm(tensor);
    if n < tolerance {
        return Err(SimError::DegenerateNorm { norm: n });
    }
    let evolved = contract_one_axis(tensor, rank, op, axis)?;
    let overlap = tensor
        .iter()
        .zip(&evolved)
        .fold(Complex64::zero(), |acc, (a, b)| acc + a.conj() * b);
    Ok(overlap / (n * n))
}
