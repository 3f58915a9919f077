//! Shared foundational types used across the area-group floorplanner.
//!
//! This crate provides the content hash used to validate persisted results and
//! the small geometry types exchanged between the engine and the result store.

#![warn(missing_docs)]

pub mod geometry;
pub mod hash;

pub use geometry::{Dimensions, Point};
pub use hash::ContentHash;
