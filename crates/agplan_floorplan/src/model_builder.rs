//! Placement model construction.
//!
//! Each partition contributes a center and an extent, each either a constant
//! or a model variable. A partition with several candidate shapes gets one
//! binary selector per shape, exactly one of which is set; its extent is the
//! selector-weighted sum of the candidates.
//!
//! Each eligible pair `(A, B)` contributes:
//!
//! - `dist_x`, `dist_y >= 0`: forced to `|xA - xB|` and `|yA - yB|` by a pair
//!   of lower bounds plus a pair of big-M upper bounds switched by the binary
//!   `a_bigger_x` (resp. `_y`), with `M = 2 * chip extent`;
//! - binaries `sat_x`, `sat_y` with `sat_x + sat_y <= 1`;
//! - `dist_x >= 0.5 (wA + wB) - W * sat_y` and
//!   `dist_y >= 0.5 (hA + hB) - H * sat_x`.
//!
//! Setting `sat_x` relaxes the y-gap requirement, so at least one axis always
//! keeps its full half-extent separation. The objective is the weighted sum
//! of `dist_x + dist_y` over all pairs.

use agplan_common::Dimensions;
use agplan_mip::{Comparison, LinearExpr, MipModel, VarId};
use log::debug;

use crate::ids::PartitionId;
use crate::partition::{Partition, PartitionSet};
use crate::weights::{eligible_pairs, WeightTable};

/// Model handles for one partition.
#[derive(Clone, Debug)]
pub struct PartitionVars {
    /// The partition.
    pub id: PartitionId,
    /// Center x.
    pub x: LinearExpr,
    /// Center y.
    pub y: LinearExpr,
    /// Width.
    pub width: LinearExpr,
    /// Height.
    pub height: LinearExpr,
    /// Shape selectors, parallel to the candidate shapes; empty for a single shape.
    pub selectors: Vec<VarId>,
}

/// Model handles for one pair.
#[derive(Clone, Debug)]
pub struct PairVars {
    /// First partition in name order.
    pub a: PartitionId,
    /// Second partition in name order.
    pub b: PartitionId,
    /// Objective weight.
    pub weight: f64,
    /// Horizontal center distance.
    pub dist_x: VarId,
    /// Vertical center distance.
    pub dist_y: VarId,
    /// Relaxes the vertical gap requirement.
    pub sat_x: VarId,
    /// Relaxes the horizontal gap requirement.
    pub sat_y: VarId,
    /// Selects the sign of `xA - xB`.
    pub a_bigger_x: VarId,
    /// Selects the sign of `yA - yB`.
    pub a_bigger_y: VarId,
}

/// The placement model plus the handles needed to read a solution back.
#[derive(Clone, Debug)]
pub struct PlacementModel {
    /// The solver-neutral model.
    pub model: MipModel,
    /// One entry per partition, in name order.
    pub partitions: Vec<PartitionVars>,
    /// One entry per eligible pair.
    pub pairs: Vec<PairVars>,
    /// Fabric extent.
    pub chip: Dimensions,
}

impl PlacementModel {
    /// Returns the handles of one partition.
    pub fn partition(&self, id: PartitionId) -> Option<&PartitionVars> {
        self.partitions.iter().find(|p| p.id == id)
    }

    /// Returns the handles of one pair, in either order.
    pub fn pair(&self, a: PartitionId, b: PartitionId) -> Option<&PairVars> {
        self.pairs
            .iter()
            .find(|p| (p.a == a && p.b == b) || (p.a == b && p.b == a))
    }
}

/// Builds the placement model for `set` on a chip of extent `chip`.
///
/// Candidate shapes must already be estimated.
pub fn build_model(set: &PartitionSet, chip: Dimensions, weights: &WeightTable) -> PlacementModel {
    let mut model = MipModel::new();
    let partitions: Vec<PartitionVars> = set
        .iter()
        .map(|(id, p)| declare_partition(&mut model, id, p, chip))
        .collect();

    let mut pairs = Vec::new();
    let mut objective = LinearExpr::zero();
    for (a, b) in eligible_pairs(set) {
        let (va, vb) = match (
            partitions.iter().find(|v| v.id == a),
            partitions.iter().find(|v| v.id == b),
        ) {
            (Some(va), Some(vb)) => (va, vb),
            _ => continue,
        };
        let tag = format!("{}_{}", set.get(a).name, set.get(b).name);
        let pair = separate_pair(&mut model, &tag, va, vb, chip, weights.weight(a, b));
        if pair.weight != 0.0 {
            objective.add_term(pair.dist_x, pair.weight);
            objective.add_term(pair.dist_y, pair.weight);
        }
        pairs.push(pair);
    }
    model.minimize(objective);

    debug!(
        "placement model: {} partitions, {} pairs, {} variables ({} binary), {} constraints",
        partitions.len(),
        pairs.len(),
        model.var_count(),
        model.binary_count(),
        model.constraint_count()
    );
    PlacementModel {
        model,
        partitions,
        pairs,
        chip,
    }
}

fn declare_partition(
    model: &mut MipModel,
    id: PartitionId,
    p: &Partition,
    chip: Dimensions,
) -> PartitionVars {
    let name = &p.name;
    let (x, y) = match p.location.filter(|_| p.location_pinned) {
        Some(center) => (LinearExpr::constant(center.x), LinearExpr::constant(center.y)),
        None => (
            model
                .add_continuous(format!("xloc_{name}"), Some(0.0), Some(chip.width))
                .into(),
            model
                .add_continuous(format!("yloc_{name}"), Some(0.0), Some(chip.height))
                .into(),
        ),
    };

    let mut selectors = Vec::new();
    let (width, height) = match p.candidate_shapes.as_slice() {
        [only] => (LinearExpr::constant(only.width), LinearExpr::constant(only.height)),
        shapes => {
            let mut sum = LinearExpr::zero();
            let mut w_sum = LinearExpr::zero();
            let mut h_sum = LinearExpr::zero();
            for (i, shape) in shapes.iter().enumerate() {
                let sel = model.add_binary(format!("{name}_shape_{i}"));
                sum.add_term(sel, 1.0);
                w_sum.add_term(sel, shape.width);
                h_sum.add_term(sel, shape.height);
                selectors.push(sel);
            }
            model.add_constraint(
                format!("shape_select_{name}"),
                sum,
                Comparison::Eq,
                LinearExpr::constant(1.0),
            );
            let xdim = model.add_continuous(format!("xdim_{name}"), Some(0.0), None);
            let ydim = model.add_continuous(format!("ydim_{name}"), Some(0.0), None);
            model.add_constraint(
                format!("xdim_assign_{name}"),
                w_sum,
                Comparison::Eq,
                LinearExpr::var(xdim),
            );
            model.add_constraint(
                format!("ydim_assign_{name}"),
                h_sum,
                Comparison::Eq,
                LinearExpr::var(ydim),
            );
            (LinearExpr::var(xdim), LinearExpr::var(ydim))
        }
    };

    if !x.is_constant() {
        bound_axis(model, &format!("x_{name}"), &x, &width, chip.width);
    }
    if !y.is_constant() {
        bound_axis(model, &format!("y_{name}"), &y, &height, chip.height);
    }

    PartitionVars {
        id,
        x,
        y,
        width,
        height,
        selectors,
    }
}

/// `0.5 * extent <= center <= limit - 0.5 * extent`.
fn bound_axis(model: &mut MipModel, tag: &str, center: &LinearExpr, extent: &LinearExpr, limit: f64) {
    model.add_constraint(
        format!("{tag}_low_bound"),
        center.clone(),
        Comparison::Ge,
        extent.clone() * 0.5,
    );
    model.add_constraint(
        format!("{tag}_high_bound"),
        center.clone(),
        Comparison::Le,
        LinearExpr::constant(limit) - extent.clone() * 0.5,
    );
}

fn separate_pair(
    model: &mut MipModel,
    tag: &str,
    a: &PartitionVars,
    b: &PartitionVars,
    chip: Dimensions,
    weight: f64,
) -> PairVars {
    let dist_x = model.add_continuous(format!("xdist_{tag}"), Some(0.0), None);
    let dist_y = model.add_continuous(format!("ydist_{tag}"), Some(0.0), None);
    let sat_x = model.add_binary(format!("sat_xdist_{tag}"));
    let sat_y = model.add_binary(format!("sat_ydist_{tag}"));
    let a_bigger_x = model.add_binary(format!("sat_x_abigger_{tag}"));
    let a_bigger_y = model.add_binary(format!("sat_y_abigger_{tag}"));

    model.add_constraint(
        format!("sat_{tag}"),
        LinearExpr::var(sat_x) + LinearExpr::var(sat_y),
        Comparison::Le,
        LinearExpr::constant(1.0),
    );

    track_distance(model, &format!("x_{tag}"), &a.x, &b.x, dist_x, a_bigger_x, chip.width);
    track_distance(model, &format!("y_{tag}"), &a.y, &b.y, dist_y, a_bigger_y, chip.height);

    // dist_y >= 0.5 (hA + hB) - H * sat_x
    model.add_constraint(
        format!("min_ydist_{tag}"),
        (a.height.clone() + b.height.clone()) * 0.5 - LinearExpr::term(sat_x, chip.height),
        Comparison::Le,
        LinearExpr::var(dist_y),
    );
    // dist_x >= 0.5 (wA + wB) - W * sat_y
    model.add_constraint(
        format!("min_xdist_{tag}"),
        (a.width.clone() + b.width.clone()) * 0.5 - LinearExpr::term(sat_y, chip.width),
        Comparison::Le,
        LinearExpr::var(dist_x),
    );

    PairVars {
        a: a.id,
        b: b.id,
        weight,
        dist_x,
        dist_y,
        sat_x,
        sat_y,
        a_bigger_x,
        a_bigger_y,
    }
}

/// Pins `dist` to `|ca - cb|` along one axis of extent `limit`.
fn track_distance(
    model: &mut MipModel,
    tag: &str,
    ca: &LinearExpr,
    cb: &LinearExpr,
    dist: VarId,
    a_bigger: VarId,
    limit: f64,
) {
    let big_m = 2.0 * limit;
    let a_minus_b = ca.clone() - cb.clone();
    let b_minus_a = cb.clone() - ca.clone();
    model.add_constraint(
        format!("abs_{tag}_1"),
        a_minus_b.clone() + big_m - LinearExpr::term(a_bigger, big_m),
        Comparison::Ge,
        LinearExpr::var(dist),
    );
    model.add_constraint(
        format!("abs_{tag}_2"),
        b_minus_a.clone() + LinearExpr::term(a_bigger, big_m),
        Comparison::Ge,
        LinearExpr::var(dist),
    );
    model.add_constraint(
        format!("abs_{tag}_3"),
        a_minus_b,
        Comparison::Le,
        LinearExpr::var(dist),
    );
    model.add_constraint(
        format!("abs_{tag}_4"),
        b_minus_a,
        Comparison::Le,
        LinearExpr::var(dist),
    );
}
