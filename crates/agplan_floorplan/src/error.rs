//! Fatal floorplanning errors.
//!
//! Nothing here is recoverable in place: the calling build stage halts.

use agplan_diagnostics::RecordRef;
use agplan_mip::{MipError, SolveStatus};
use agplan_store::StoreError;
use thiserror::Error;

/// Names the record or partition a configuration problem came from.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A second chip size declaration.
    #[error("{record}: chip size declared more than once (first at {first})")]
    DuplicateChipSize {
        /// The repeated declaration.
        record: RecordRef,
        /// The accepted declaration.
        first: RecordRef,
    },
    /// No chip size declaration at all.
    #[error("no chip size declared")]
    MissingChipSize,
    /// A chip or partition size with a non-positive extent.
    #[error("{record}: `{name}` has non-positive size {width}x{height}")]
    NonPositiveSize {
        /// Offending record.
        record: RecordRef,
        /// Partition name, or `chip`.
        name: String,
        /// Declared width.
        width: f64,
        /// Declared height.
        height: f64,
    },
    /// The child of a relationship already belongs to another parent.
    #[error("{record}: `{child}` already has parent `{parent}`")]
    AlreadyHasParent {
        /// Offending record.
        record: RecordRef,
        /// Child partition.
        child: String,
        /// Its existing parent.
        parent: String,
    },
    /// The child of a relationship is itself a parent.
    #[error("{record}: `{child}` already has children, so it cannot have a parent")]
    ChildHasChildren {
        /// Offending record.
        record: RecordRef,
        /// Child partition.
        child: String,
    },
    /// The parent of a relationship is itself a child.
    #[error("{record}: `{parent}` is a child of `{grandparent}`, so it cannot have children")]
    ParentHasParent {
        /// Offending record.
        record: RecordRef,
        /// Parent partition.
        parent: String,
        /// Its own parent.
        grandparent: String,
    },
    /// A partition declared as its own parent.
    #[error("{record}: `{name}` cannot be its own parent")]
    SelfRelationship {
        /// Offending record.
        record: RecordRef,
        /// Partition name.
        name: String,
    },
    /// An upper-right corner not strictly above and right of its lower-left corner.
    #[error("{record}: corners of `{name}` span an empty region")]
    DegenerateCorners {
        /// The upper-right record.
        record: RecordRef,
        /// Partition name.
        name: String,
    },
    /// A partition left with no area, either from its own source or because
    /// its children cover all of it.
    #[error("`{name}` has non-positive net area {area}{}", subtracted(.children))]
    NonPositiveArea {
        /// Partition name.
        name: String,
        /// Net area.
        area: f64,
        /// Number of children whose area was subtracted.
        children: usize,
    },
}

fn subtracted(children: &usize) -> String {
    match children {
        0 => String::new(),
        1 => " after subtracting its child".to_string(),
        n => format!(" after subtracting its {n} children"),
    }
}

/// The solver could not produce a usable floorplan.
#[derive(Debug, Error)]
pub enum InfeasibleModelError {
    /// Every partition is a hole, or there are no partitions.
    #[error("no placeable partitions: every partition is a hole")]
    NoPlaceablePartitions,
    /// The backend reported a non-success status.
    #[error("solver reported {status}")]
    Status {
        /// Backend status.
        status: SolveStatus,
    },
    /// A resolved center fell below the degenerate threshold.
    #[error("`{partition}` resolved to degenerate center ({x}, {y})")]
    Degenerate {
        /// First offending partition.
        partition: String,
        /// Resolved x.
        x: f64,
        /// Resolved y.
        y: f64,
        /// Every variable value, in declaration order.
        assignment: Vec<(String, f64)>,
    },
}

/// Any fatal floorplanning failure.
#[derive(Debug, Error)]
pub enum FloorplanError {
    /// Inconsistent constraint records.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// No area source for a partition.
    #[error("partition `{partition}` has neither resource usage nor an explicit size")]
    MissingResource {
        /// Partition name.
        partition: String,
    },
    /// The model could not be solved.
    #[error(transparent)]
    Infeasible(#[from] InfeasibleModelError),
    /// The solver backend failed before reporting a status.
    #[error(transparent)]
    Solver(#[from] MipError),
    /// The result could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}
