// src/operations/plane.rs

//! Measurement planes and the adaptive basis update of the measurement calculus.

use crate::clifford::{Axis, Clifford, Pauli};
use crate::core::constants::sim_constants::PI;
use crate::core::{Matrix2, Result, SimError};
use num_complex::Complex64;
use num_traits::Zero;
use std::fmt;

/// A great circle of the Bloch sphere in which a measurement vector lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    XY,
    YZ,
    XZ,
}

impl Plane {
    pub fn axes(self) -> [Axis; 2] {
        match self {
            Plane::XY => [Axis::X, Axis::Y],
            Plane::YZ => [Axis::Y, Axis::Z],
            Plane::XZ => [Axis::X, Axis::Z],
        }
    }

    /// Axis carrying `cos(angle)` in [`Plane::polar`].
    pub fn cos_axis(self) -> Axis {
        match self {
            Plane::XY => Axis::X,
            Plane::YZ | Plane::XZ => Axis::Z,
        }
    }

    /// Axis carrying `sin(angle)` in [`Plane::polar`].
    pub fn sin_axis(self) -> Axis {
        match self {
            Plane::XY | Plane::YZ => Axis::Y,
            Plane::XZ => Axis::X,
        }
    }

    /// Unit Bloch vector at `angle` (radians) within the plane.
    pub fn polar(self, angle: f64) -> [f64; 3] {
        let mut vec = [0.0; 3];
        vec[self.cos_axis().index()] = angle.cos();
        vec[self.sin_axis().index()] = angle.sin();
        vec
    }

    /// The plane spanned by two distinct axes, in either order.
    pub fn from_axes(a: Axis, b: Axis) -> Result<Plane> {
        let (lo, hi) = if b < a { (b, a) } else { (a, b) };
        match (lo, hi) {
            (Axis::X, Axis::Y) => Ok(Plane::XY),
            (Axis::Y, Axis::Z) => Ok(Plane::YZ),
            (Axis::X, Axis::Z) => Ok(Plane::XZ),
            _ => Err(SimError::InvalidOperation {
                message: format!("cannot span a plane with axis {:?} twice", a),
            }),
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// How byproduct signals and a Clifford frame transform a measurement.
///
/// The effective angle is `coeff * angle + add_term` in `new_plane`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureUpdate {
    pub new_plane: Plane,
    pub coeff: f64,
    pub add_term: f64,
}

impl MeasureUpdate {
    /// Derives the update for a measurement in `plane` when the X-signal `s`
    /// and Z-signal `t` have the given parities and the qubit carries the
    /// frame `clifford`.
    pub fn compute(plane: Plane, s: bool, t: bool, clifford: Clifford) -> Result<Self> {
        let mut frame = clifford;
        if s {
            frame = Clifford::X.compose(frame);
        }
        if t {
            frame = Clifford::Z.compose(frame);
        }
        let [a, b] = plane.axes().map(|axis| frame.conjugate(Pauli::from_axis(axis)).axis);
        let new_plane = Plane::from_axes(a, b)?;

        let cos_image = frame.conjugate(Pauli::from_axis(plane.cos_axis()));
        let sin_image = frame.conjugate(Pauli::from_axis(plane.sin_axis()));
        let exchange = cos_image.axis != new_plane.cos_axis();
        let coeff = if exchange == (cos_image.sign == sin_image.sign) { -1.0 } else { 1.0 };

        let mut add_term = 0.0;
        if cos_image.sign.is_minus() {
            add_term += PI;
        }
        if exchange {
            add_term = PI / 2.0 - add_term;
        }
        Ok(Self { new_plane, coeff, add_term })
    }

    /// Unit Bloch vector for a caller angle given in units of π.
    pub fn vector(&self, angle: f64) -> [f64; 3] {
        self.new_plane.polar(angle * PI * self.coeff + self.add_term)
    }
}

/// Projector onto outcome `outcome` of a measurement along `vec`:
/// `I/2 + (-1)^outcome (vec · σ) / 2`.
pub fn measurement_operator(vec: [f64; 3], outcome: u8) -> Matrix2 {
    let sign = if outcome % 2 == 1 { -1.0 } else { 1.0 };
    let half = Complex64::new(0.5, 0.0);
    let mut op = [[half, Complex64::zero()], [Complex64::zero(), half]];
    for axis in Axis::ALL {
        let pauli = Pauli::axis_matrix(axis);
        let weight = sign * vec[axis.index()] / 2.0;
        for (row, p_row) in op.iter_mut().zip(pauli) {
            for (entry, p) in row.iter_mut().zip(p_row) {
                *entry += p * weight;
            }
        }
    }
    op
}
