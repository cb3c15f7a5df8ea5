// src/simulation/measure.rs

use super::statevec::StateVec;
use crate::clifford::Clifford;
use crate::core::{NodeId, Result, SimError};
use crate::operations::{measurement_operator, MeasureUpdate, Plane};
use rand::Rng;
use tracing::{debug, trace};

/// Parity of the outcomes at `domain` indices of the record.
///
/// Indices are summed, not deduplicated, so a repeated index cancels itself.
pub fn signal_parity(outcomes: &[u8], domain: &[usize]) -> Result<bool> {
    domain.iter().try_fold(false, |parity, &index| {
        outcomes
            .get(index)
            .map(|bit| parity ^ (bit % 2 == 1))
            .ok_or(SimError::OutcomeNotRecorded { index, recorded: outcomes.len() })
    })
}

impl StateVec {
    /// Adaptively measures `node` and removes it from the register.
    ///
    /// The basis is `plane` at `angle` (units of π), transformed by the
    /// parities of `s_domain` and `t_domain` in `outcomes` and by the frame
    /// `vop`. One uniform draw from `rng` picks the outcome: 1 if the draw
    /// exceeds the probability of outcome 0, else 0. The caller appends the
    /// returned outcome to its record.
    #[allow(clippy::too_many_arguments)]
    pub fn measure<R: Rng + ?Sized>(
        &mut self,
        node: NodeId,
        plane: Plane,
        angle: f64,
        s_domain: &[usize],
        t_domain: &[usize],
        outcomes: &[u8],
        vop: Clifford,
        rng: &mut R,
    ) -> Result<u8> {
        let axis = self.node_index.axis_of(node)?;
        let s_signal = signal_parity(outcomes, s_domain)?;
        let t_signal = signal_parity(outcomes, t_domain)?;

        let update = MeasureUpdate::compute(plane, s_signal, t_signal, vop)?;
        let vec = update.vector(angle);

        let mut outcome = 0u8;
        let mut op = measurement_operator(vec, outcome);
        let p0 = self.psi.expectation(&op, axis, self.tolerance)?.norm();

        let draw: f64 = rng.random();
        if draw > p0 {
            outcome = 1;
            op = measurement_operator(vec, outcome);
        }

        // Project and collapse on a copy so a degenerate branch leaves `self` intact.
        let mut collapsed = self.psi.clone();
        collapsed.apply_single(&op, axis)?;
        collapsed.remove_axis(axis, self.tolerance)?;
        self.psi = collapsed;
        self.node_index.remove(node)?;

        debug!(
            %node, %plane, angle, s_signal, t_signal, vop = vop.index(),
            new_plane = %update.new_plane, p0, outcome,
            "measured"
        );
        trace!(state = %self.psi, "state after measurement");
        Ok(outcome)
    }
}
