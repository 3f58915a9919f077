//! Diagnostic creation, severity management, and terminal rendering.
//!
//! The floorplanner reports recoverable input oddities as structured
//! [`Diagnostic`] messages collected in a [`DiagnosticSink`]. Fatal problems are
//! `Err` values of the engine; diagnostics are for everything the build can
//! still proceed past.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::{Diagnostic, RecordRef};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
