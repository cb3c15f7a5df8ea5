// src/clifford/mod.rs

//! The 24-element single-qubit Clifford group and the Pauli algebra it acts on.
//!
//! Frame elements (`vop` indices) handed in by the pattern executor index into
//! [`CLIFFORD`]. The only operation the measurement update needs from an
//! element is conjugation `C† P C`, which maps every Pauli to a signed Pauli.

use crate::core::constants::sim_constants::FRAC_1_SQRT_2 as R;
use crate::core::{Matrix2, Result, SimError};
use num_complex::Complex64;
use num_traits::Zero;
use std::fmt;

const fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

const Z0: Complex64 = c(0.0, 0.0);
const H: f64 = 0.5;

/// Matrices of the 24 single-qubit Cliffords, each fixed up to global phase.
///
/// Order: I, X, Y, Z, S, S†, H, √iX, √iY, then the remaining rotations.
pub const CLIFFORD: [Matrix2; 24] = [
    [[c(1.0, 0.0), Z0], [Z0, c(1.0, 0.0)]],
    [[Z0, c(1.0, 0.0)], [c(1.0, 0.0), Z0]],
    [[Z0, c(0.0, -1.0)], [c(0.0, 1.0), Z0]],
    [[c(1.0, 0.0), Z0], [Z0, c(-1.0, 0.0)]],
    [[c(1.0, 0.0), Z0], [Z0, c(0.0, 1.0)]],
    [[c(1.0, 0.0), Z0], [Z0, c(0.0, -1.0)]],
    [[c(R, 0.0), c(R, 0.0)], [c(R, 0.0), c(-R, 0.0)]],
    [[c(R, 0.0), c(0.0, -R)], [c(0.0, -R), c(R, 0.0)]],
    [[c(R, 0.0), c(-R, 0.0)], [c(R, 0.0), c(R, 0.0)]],
    [[Z0, c(R, -R)], [c(-R, -R), Z0]],
    [[Z0, c(-R, -R)], [c(R, -R), Z0]],
    [[c(R, 0.0), c(-R, 0.0)], [c(-R, 0.0), c(-R, 0.0)]],
    [[c(-R, 0.0), c(-R, 0.0)], [c(R, 0.0), c(-R, 0.0)]],
    [[c(0.0, R), c(-R, 0.0)], [c(R, 0.0), c(0.0, -R)]],
    [[c(0.0, R), c(R, 0.0)], [c(-R, 0.0), c(0.0, -R)]],
    [[c(-R, 0.0), c(0.0, -R)], [c(0.0, -R), c(-R, 0.0)]],
    [[c(-H, H), c(H, H)], [c(-H, H), c(-H, -H)]],
    [[c(-H, H), c(-H, -H)], [c(H, -H), c(-H, -H)]],
    [[c(H, H), c(H, -H)], [c(-H, -H), c(H, -H)]],
    [[c(-H, -H), c(H, -H)], [c(-H, -H), c(-H, H)]],
    [[c(-H, -H), c(-H, -H)], [c(H, -H), c(-H, H)]],
    [[c(-H, H), c(-H, H)], [c(H, H), c(-H, -H)]],
    [[c(H, H), c(-H, -H)], [c(H, -H), c(H, -H)]],
    [[c(-H, H), c(H, -H)], [c(-H, -H), c(-H, -H)]],
];

/// Bloch-sphere axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of the axis in a Bloch vector `[x, y, z]`.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn from_parity(odd: bool) -> Self {
        if odd { Sign::Minus } else { Sign::Plus }
    }

    pub fn is_minus(self) -> bool {
        self == Sign::Minus
    }

    pub fn value(self) -> f64 {
        match self {
            Sign::Plus => 1.0,
            Sign::Minus => -1.0,
        }
    }

    pub fn times(self, other: Sign) -> Sign {
        Sign::from_parity(self.is_minus() != other.is_minus())
    }
}

/// A signed Pauli operator `±σ_axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pauli {
    pub axis: Axis,
    pub sign: Sign,
}

impl Pauli {
    pub fn from_axis(axis: Axis) -> Self {
        Self { axis, sign: Sign::Plus }
    }

    /// The unsigned Pauli matrix for `axis`.
    pub fn axis_matrix(axis: Axis) -> Matrix2 {
        match axis {
            Axis::X => CLIFFORD[1],
            Axis::Y => CLIFFORD[2],
            Axis::Z => CLIFFORD[3],
        }
    }

    pub fn matrix(&self) -> Matrix2 {
        let s = self.sign.value();
        Self::axis_matrix(self.axis).map(|row| row.map(|e| e * s))
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.sign.is_minus() { "-" } else { "+" };
        write!(f, "{}{:?}", sign, self.axis)
    }
}

/// An element of the single-qubit Clifford group, as an index into [`CLIFFORD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clifford(usize);

impl Clifford {
    pub const IDENTITY: Clifford = Clifford(0);
    pub const X: Clifford = Clifford(1);
    pub const Y: Clifford = Clifford(2);
    pub const Z: Clifford = Clifford(3);
    pub const S: Clifford = Clifford(4);
    pub const SDG: Clifford = Clifford(5);
    pub const H: Clifford = Clifford(6);

    pub fn new(index: usize) -> Result<Self> {
        if index < CLIFFORD.len() {
            Ok(Clifford(index))
        } else {
            Err(SimError::InvalidClifford { index })
        }
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn matrix(self) -> &'static Matrix2 {
        &CLIFFORD[self.0]
    }

    /// `C† P C`.
    pub fn conjugate(self, pauli: Pauli) -> Pauli {
        let image = conjugate_axis(self.matrix(), pauli.axis);
        Pauli { axis: image.axis, sign: image.sign.times(pauli.sign) }
    }

    /// The element equal (up to phase) to the matrix product `self · other`.
    pub fn compose(self, other: Clifford) -> Clifford {
        // (A·B)† P (A·B) = B† (A† P A) B
        let images = Axis::ALL.map(|axis| other.conjugate(self.conjugate(Pauli::from_axis(axis))));
        (0..CLIFFORD.len())
            .map(Clifford)
            .find(|candidate| Axis::ALL.map(|axis| candidate.conjugate(Pauli::from_axis(axis))) == images)
            .unwrap_or_else(|| unreachable!("single-qubit Cliffords are closed under composition"))
    }
}

impl fmt::Display for Clifford {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Clifford({})", self.0)
    }
}

fn matmul(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    let mut out = [[Complex64::zero(); 2]; 2];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            *entry = a[i][0] * b[0][j] + a[i][1] * b[1][j];
        }
    }
    out
}

fn adjoint(m: &Matrix2) -> Matrix2 {
    [[m[0][0].conj(), m[1][0].conj()], [m[0][1].conj(), m[1][1].conj()]]
}

/// Identifies `C† σ_axis C` as a signed Pauli by its Hilbert-Schmidt overlap
/// `tr(M σ_k) / 2`, which is ±1 for the matching axis and 0 otherwise.
fn conjugate_axis(clifford: &Matrix2, axis: Axis) -> Pauli {
    let image = matmul(&matmul(&adjoint(clifford), &Pauli::axis_matrix(axis)), clifford);
    let overlap = |k: Axis| {
        let p = Pauli::axis_matrix(k);
        ((image[0][0] * p[0][0] + image[0][1] * p[1][0] + image[1][0] * p[0][1] + image[1][1] * p[1][1]) / 2.0).re
    };
    let (best, value) = Axis::ALL
        .iter()
        .map(|&k| (k, overlap(k)))
        .fold((Axis::X, 0.0_f64), |acc, (k, v)| if v.abs() > acc.1.abs() { (k, v) } else { acc });
    Pauli { axis: best, sign: Sign::from_parity(value < 0.0) }
}
