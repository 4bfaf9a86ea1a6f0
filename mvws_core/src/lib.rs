//! # mvws_core - MVWS Conveyor Deluge Sizing Engine
//!
//! `mvws_core` is the computational heart of the MVWS conveyor calculator,
//! sizing Medium Velocity Water Spray protection for belt conveyors: nozzle
//! counts, estimated water demand, deluge valve selection, LHS cable runs,
//! and a fixed bill of materials, plus a printable PDF report of the same
//! figures.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Total**: Invalid input is coerced and clamped, never rejected, so
//!   `compute` cannot fail
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Snapshot-honest**: Each computation carries the sanitized input it
//!   ran on, and the report renderer reuses those exact figures
//!
//! ## Quick Start
//!
//! ```rust
//! use mvws_core::{compute, ConveyorInput};
//!
//! // The default input is the documented reset set: a 50 m single-belt
//! // conveyor with nozzle pairs every 2.5 m
//! let computation = compute(&ConveyorInput::default());
//!
//! assert_eq!(computation.results.total_nozzles, 40);
//! assert_eq!(computation.bom.len(), 18);
//!
//! // Serialize for storage or transmission
//! let json = serde_json::to_string_pretty(&computation).unwrap();
//! assert!(json.contains("total_flow_lps"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The conveyor MVWS calculation (inputs, results,
//!   valve selection)
//! - [`bom`] - Fixed 18-row bill-of-materials catalog
//! - [`display`] - Two-decimal display formatting with placeholder dash
//! - [`errors`] - Structured error types
//! - [`pdf`] - Printable report generation via Typst

pub mod bom;
pub mod calculations;
pub mod display;
pub mod errors;
pub mod pdf;

// Re-export commonly used types at crate root for convenience
pub use bom::{build_bom, BomLineItem, Unit};
pub use calculations::conveyor::{
    compute, Computation, ConveyorInput, ConveyorResult, DelugeValveSize, RawConveyorInput,
};
pub use errors::{CalcError, CalcResult};
pub use pdf::render_report_pdf;
