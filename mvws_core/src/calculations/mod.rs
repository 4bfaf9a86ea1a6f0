//! # MVWS Calculations
//!
//! Calculation modules follow one pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Derived quantities (JSON-serializable)
//! - `compute(input) -> Computation` - Pure, total calculation function
//!
//! ## Available Calculations
//!
//! - [`conveyor`] - Conveyor MVWS zone sizing (nozzles, flow, valve, cable,
//!   pipe run, BOM)

pub mod conveyor;

// Re-export commonly used types
pub use conveyor::{
    compute, Computation, ConveyorInput, ConveyorResult, DelugeValveSize, RawConveyorInput,
};
