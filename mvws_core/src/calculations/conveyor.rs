//! # MVWS Conveyor Protection Calculation
//!
//! Sizes a Medium Velocity Water Spray system protecting a belt conveyor:
//! nozzle layout along the belt, estimated water demand, deluge valve
//! selection, linear-heat-sensing (LHS) cable run, and the approximate
//! spray pipe run.
//!
//! ## Assumptions
//!
//! - Nozzle locations are spaced at no more than the given maximum along
//!   each belt, so the location count is the ceiling of length over spacing
//! - Every nozzle discharges 0.50 L/s at design pressure
//! - LHS cable runs along two sides of the conveyor, or three when the
//!   return side is covered as well, plus a home run to the panel
//!
//! ## Example
//!
//! ```rust
//! use mvws_core::calculations::conveyor::{compute, ConveyorInput, DelugeValveSize};
//!
//! let input = ConveyorInput {
//!     conveyor_length_m: 50.0,
//!     num_belts: 1,
//!     max_nozzle_spacing_m: 2.5,
//!     nozzles_per_location: 2,
//!     ..ConveyorInput::default()
//! };
//!
//! let computation = compute(&input);
//! assert_eq!(computation.results.total_nozzles, 40);
//! assert_eq!(computation.results.deluge_valve, DelugeValveSize::Dn80);
//! assert_eq!(
//!     computation.results.deluge_valve_display(),
//!     "DN80 (based on ~20.00 L/s)"
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bom::{build_bom, BomLineItem};
use crate::display::two_dp;

/// Design discharge per spray nozzle \[L/s\]
pub const FLOW_PER_NOZZLE_LPS: f64 = 0.50;

/// Floor for the nozzle spacing input \[m\], guarding the division
pub const MIN_NOZZLE_SPACING_M: f64 = 0.01;

/// Raw field values as a form layer hands them over: free-form text for the
/// numeric fields, a checkbox state for the routing flag.
///
/// [`RawConveyorInput::coerce`] turns this into a typed [`ConveyorInput`];
/// anything that does not parse as a finite number becomes zero first, so a
/// blank or garbled field can never poison the results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConveyorInput {
    pub conveyor_length_m: String,
    pub conveyor_width_m: String,
    pub num_belts: String,
    pub max_nozzle_spacing_m: String,
    pub nozzles_per_location: String,
    pub lhs_runs_three_side: bool,
    pub lhs_cable_qty_to_panel: String,
    pub distance_deluge_to_hydrant_m: String,
    pub system_pressure_bar: String,
}

/// Parse a raw numeric field: trim, parse as f64, and collapse parse
/// failures and non-finite values to 0.
fn parse_field(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Round a raw count field and floor it at 1.
fn parse_count(raw: &str) -> u32 {
    parse_field(raw).round().max(1.0) as u32
}

impl RawConveyorInput {
    /// Coerce all nine fields into a typed, clamped [`ConveyorInput`].
    pub fn coerce(&self) -> ConveyorInput {
        ConveyorInput {
            conveyor_length_m: parse_field(&self.conveyor_length_m),
            conveyor_width_m: parse_field(&self.conveyor_width_m),
            num_belts: parse_count(&self.num_belts),
            max_nozzle_spacing_m: parse_field(&self.max_nozzle_spacing_m),
            nozzles_per_location: parse_count(&self.nozzles_per_location),
            lhs_runs_three_side: self.lhs_runs_three_side,
            lhs_cable_qty_to_panel: parse_field(&self.lhs_cable_qty_to_panel),
            distance_deluge_to_hydrant_m: parse_field(&self.distance_deluge_to_hydrant_m),
            system_pressure_bar: parse_field(&self.system_pressure_bar),
        }
        .sanitized()
    }
}

/// Input parameters for one conveyor MVWS zone.
///
/// All lengths are meters. [`Default`] is the documented reset set: a 50 m
/// single-belt conveyor with nozzle pairs every 2.5 m.
///
/// ## JSON Example
///
/// ```json
/// {
///   "conveyor_length_m": 50.0,
///   "conveyor_width_m": 1.2,
///   "num_belts": 1,
///   "max_nozzle_spacing_m": 2.5,
///   "nozzles_per_location": 2,
///   "lhs_runs_three_side": false,
///   "lhs_cable_qty_to_panel": 25.0,
///   "distance_deluge_to_hydrant_m": 15.0,
///   "system_pressure_bar": 7.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConveyorInput {
    /// Protected conveyor length \[m\]
    pub conveyor_length_m: f64,

    /// Belt width \[m\] (reported only; no formula uses it)
    pub conveyor_width_m: f64,

    /// Number of parallel belts sharing the zone
    pub num_belts: u32,

    /// Maximum spacing between nozzle locations along a belt \[m\]
    pub max_nozzle_spacing_m: f64,

    /// Nozzles installed at each location
    pub nozzles_per_location: u32,

    /// LHS cable routed on three sides instead of two
    pub lhs_runs_three_side: bool,

    /// LHS cable allowance from the zone to the panel \[m\]
    pub lhs_cable_qty_to_panel: f64,

    /// Distance from the deluge valve to the hydrant tapping \[m\]
    /// (reported only; no formula uses it)
    pub distance_deluge_to_hydrant_m: f64,

    /// System design pressure \[bar\] (reported only; no formula uses it)
    pub system_pressure_bar: f64,
}

impl Default for ConveyorInput {
    fn default() -> Self {
        ConveyorInput {
            conveyor_length_m: 50.00,
            conveyor_width_m: 1.20,
            num_belts: 1,
            max_nozzle_spacing_m: 2.50,
            nozzles_per_location: 2,
            lhs_runs_three_side: false,
            lhs_cable_qty_to_panel: 25.00,
            distance_deluge_to_hydrant_m: 15.00,
            system_pressure_bar: 7.00,
        }
    }
}

/// Collapse non-finite and negative values to 0.
fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

impl ConveyorInput {
    /// Return a cleaned copy with every field inside its declared domain:
    /// non-finite and negative floats become 0, the spacing gets its 0.01 m
    /// floor, and both counts are at least 1.
    ///
    /// [`compute`] always works on the sanitized copy, so a caller-built
    /// input with any bit pattern still yields defined results.
    pub fn sanitized(&self) -> ConveyorInput {
        ConveyorInput {
            conveyor_length_m: non_negative(self.conveyor_length_m),
            conveyor_width_m: non_negative(self.conveyor_width_m),
            num_belts: self.num_belts.max(1),
            max_nozzle_spacing_m: non_negative(self.max_nozzle_spacing_m)
                .max(MIN_NOZZLE_SPACING_M),
            nozzles_per_location: self.nozzles_per_location.max(1),
            lhs_runs_three_side: self.lhs_runs_three_side,
            lhs_cable_qty_to_panel: non_negative(self.lhs_cable_qty_to_panel),
            distance_deluge_to_hydrant_m: non_negative(self.distance_deluge_to_hydrant_m),
            system_pressure_bar: non_negative(self.system_pressure_bar),
        }
    }
}

/// Deluge valve nominal size, selected from the estimated total flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DelugeValveSize {
    /// Up to 50 L/s
    #[serde(rename = "DN80")]
    Dn80,
    /// Over 50 and up to 100 L/s
    #[serde(rename = "DN100")]
    Dn100,
    /// Over 100 L/s
    #[serde(rename = "DN150")]
    Dn150,
}

impl DelugeValveSize {
    /// Select the valve size for an estimated total flow \[L/s\].
    ///
    /// Upper bounds are inclusive: exactly 50 L/s still fits a DN80 and
    /// exactly 100 L/s still fits a DN100.
    pub fn for_flow(total_flow_lps: f64) -> Self {
        if total_flow_lps <= 50.0 {
            DelugeValveSize::Dn80
        } else if total_flow_lps <= 100.0 {
            DelugeValveSize::Dn100
        } else {
            DelugeValveSize::Dn150
        }
    }

    /// Nominal size label, e.g. "DN80"
    pub fn label(&self) -> &'static str {
        match self {
            DelugeValveSize::Dn80 => "DN80",
            DelugeValveSize::Dn100 => "DN100",
            DelugeValveSize::Dn150 => "DN150",
        }
    }
}

impl fmt::Display for DelugeValveSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived quantities for one conveyor MVWS zone.
///
/// ## JSON Example
///
/// ```json
/// {
///   "locations_per_belt": 20,
///   "nozzles_per_belt": 40,
///   "total_nozzles": 40,
///   "total_flow_lps": 20.0,
///   "deluge_valve": "DN80",
///   "lhs_cable_total_m": 125.0,
///   "pipe_run_m": 50.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConveyorResult {
    /// Nozzle locations along one belt: ceil(length / spacing)
    pub locations_per_belt: u64,

    /// Nozzles on one belt
    pub nozzles_per_belt: u64,

    /// Nozzles across all belts; also drives BOM serial 8
    pub total_nozzles: u64,

    /// Estimated water demand \[L/s\] at 0.50 L/s per nozzle
    pub total_flow_lps: f64,

    /// Recommended deluge valve size
    pub deluge_valve: DelugeValveSize,

    /// LHS detection cable including the run to the panel \[m\]
    pub lhs_cable_total_m: f64,

    /// Approximate spray pipe run \[m\]
    pub pipe_run_m: f64,
}

impl ConveyorResult {
    /// Total nozzle count for display
    pub fn total_nozzles_display(&self) -> String {
        self.total_nozzles.to_string()
    }

    /// Estimated total flow, two decimals
    pub fn total_flow_display(&self) -> String {
        two_dp(self.total_flow_lps)
    }

    /// Valve recommendation with the flow it was based on, e.g.
    /// `"DN80 (based on ~20.00 L/s)"`
    pub fn deluge_valve_display(&self) -> String {
        format!(
            "{} (based on ~{} L/s)",
            self.deluge_valve,
            two_dp(self.total_flow_lps)
        )
    }

    /// LHS cable total, two decimals
    pub fn lhs_cable_total_display(&self) -> String {
        two_dp(self.lhs_cable_total_m)
    }

    /// Pipe run, two decimals
    pub fn pipe_run_display(&self) -> String {
        two_dp(self.pipe_run_m)
    }
}

/// One complete computation: the sanitized input snapshot it ran on, the
/// derived results, and the materialized BOM.
///
/// The snapshot keeps report generation honest: a report rendered from a
/// `Computation` can never disagree with the results shown for it, even if
/// the caller has edited its own input since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Computation {
    /// The sanitized input the results were derived from
    pub input: ConveyorInput,

    /// Derived quantities
    pub results: ConveyorResult,

    /// Materialized 18-row BOM, serial 8 driven by `results.total_nozzles`
    pub bom: Vec<BomLineItem>,
}

/// Run the full calculation for one conveyor MVWS zone.
///
/// Pure, total, and deterministic: every input is coerced into its declared
/// domain first (see [`ConveyorInput::sanitized`]), so this never fails and
/// never produces non-finite results. A zero-length conveyor legitimately
/// yields zero locations, zero nozzles, and zero flow.
///
/// # Example
///
/// ```rust
/// use mvws_core::calculations::conveyor::{compute, ConveyorInput};
///
/// let three_belts = ConveyorInput {
///     num_belts: 3,
///     ..ConveyorInput::default()
/// };
///
/// let computation = compute(&three_belts);
/// assert_eq!(computation.results.total_nozzles, 120);
/// assert_eq!(computation.results.pipe_run_m, 150.0);
/// ```
pub fn compute(input: &ConveyorInput) -> Computation {
    let input = input.sanitized();

    // Nozzle layout: locations at no more than the max spacing, so the
    // count is the ceiling of length over spacing
    let locations_per_belt =
        (input.conveyor_length_m / input.max_nozzle_spacing_m).ceil() as u64;
    let nozzles_per_belt = locations_per_belt.saturating_mul(input.nozzles_per_location as u64);
    let total_nozzles = nozzles_per_belt.saturating_mul(input.num_belts as u64);

    let total_flow_lps = total_nozzles as f64 * FLOW_PER_NOZZLE_LPS;
    let deluge_valve = DelugeValveSize::for_flow(total_flow_lps);

    let sides = if input.lhs_runs_three_side { 3.0 } else { 2.0 };
    let lhs_cable_total_m = input.conveyor_length_m * sides + input.lhs_cable_qty_to_panel;

    let pipe_run_m = input.conveyor_length_m * f64::from(input.num_belts);

    let bom = build_bom(total_nozzles);

    Computation {
        results: ConveyorResult {
            locations_per_belt,
            nozzles_per_belt,
            total_nozzles,
            total_flow_lps,
            deluge_valve,
            lhs_cable_total_m,
            pipe_run_m,
        },
        bom,
        input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_conveyor() {
        // 50 m, 1 belt, 2.5 m spacing, 2 nozzles per location
        let computation = compute(&ConveyorInput::default());
        let results = &computation.results;

        assert_eq!(results.locations_per_belt, 20);
        assert_eq!(results.nozzles_per_belt, 40);
        assert_eq!(results.total_nozzles, 40);
        assert_eq!(results.total_flow_lps, 20.0);
        assert_eq!(results.deluge_valve, DelugeValveSize::Dn80);
        assert_eq!(results.lhs_cable_total_m, 125.0);
        assert_eq!(results.pipe_run_m, 50.0);
    }

    #[test]
    fn test_reference_display_strings() {
        let computation = compute(&ConveyorInput::default());
        let results = &computation.results;

        assert_eq!(results.total_nozzles_display(), "40");
        assert_eq!(results.total_flow_display(), "20.00");
        assert_eq!(
            results.deluge_valve_display(),
            "DN80 (based on ~20.00 L/s)"
        );
        assert_eq!(results.lhs_cable_total_display(), "125.00");
        assert_eq!(results.pipe_run_display(), "50.00");
    }

    #[test]
    fn test_three_belts_steps_up_valve() {
        let input = ConveyorInput {
            num_belts: 3,
            ..ConveyorInput::default()
        };
        let results = compute(&input).results;

        assert_eq!(results.total_nozzles, 120);
        assert_eq!(results.total_flow_lps, 60.0);
        assert_eq!(results.deluge_valve, DelugeValveSize::Dn100);
        assert_eq!(results.pipe_run_m, 150.0);
        // Cable runs along the conveyor, not per belt
        assert_eq!(results.lhs_cable_total_m, 125.0);
    }

    #[test]
    fn test_zero_length_conveyor() {
        let input = ConveyorInput {
            conveyor_length_m: 0.0,
            ..ConveyorInput::default()
        };
        let results = compute(&input).results;

        assert_eq!(results.locations_per_belt, 0);
        assert_eq!(results.total_nozzles, 0);
        assert_eq!(results.total_flow_lps, 0.0);
        assert_eq!(results.deluge_valve, DelugeValveSize::Dn80);
        assert_eq!(
            results.deluge_valve_display(),
            "DN80 (based on ~0.00 L/s)"
        );
        // Only the allowance to the panel remains
        assert_eq!(results.lhs_cable_total_m, 25.0);
        assert_eq!(results.pipe_run_m, 0.0);
    }

    #[test]
    fn test_three_side_cable_routing() {
        let input = ConveyorInput {
            lhs_runs_three_side: true,
            ..ConveyorInput::default()
        };
        let results = compute(&input).results;
        assert_eq!(results.lhs_cable_total_m, 50.0 * 3.0 + 25.0);
    }

    #[test]
    fn test_location_count_is_ceiling() {
        let mut input = ConveyorInput {
            conveyor_length_m: 49.9,
            ..ConveyorInput::default()
        };
        assert_eq!(compute(&input).results.locations_per_belt, 20);

        input.conveyor_length_m = 50.1;
        assert_eq!(compute(&input).results.locations_per_belt, 21);
    }

    #[test]
    fn test_valve_thresholds_partition_the_flow_domain() {
        assert_eq!(DelugeValveSize::for_flow(0.0), DelugeValveSize::Dn80);
        assert_eq!(DelugeValveSize::for_flow(50.0), DelugeValveSize::Dn80);
        assert_eq!(DelugeValveSize::for_flow(50.01), DelugeValveSize::Dn100);
        assert_eq!(DelugeValveSize::for_flow(100.0), DelugeValveSize::Dn100);
        assert_eq!(DelugeValveSize::for_flow(100.01), DelugeValveSize::Dn150);
    }

    #[test]
    fn test_sanitize_clamps_out_of_domain_values() {
        let input = ConveyorInput {
            conveyor_length_m: f64::NAN,
            conveyor_width_m: -4.0,
            num_belts: 0,
            max_nozzle_spacing_m: 0.0,
            nozzles_per_location: 0,
            lhs_runs_three_side: false,
            lhs_cable_qty_to_panel: f64::INFINITY,
            distance_deluge_to_hydrant_m: -1.0,
            system_pressure_bar: f64::NEG_INFINITY,
        };
        let clean = input.sanitized();

        assert_eq!(clean.conveyor_length_m, 0.0);
        assert_eq!(clean.conveyor_width_m, 0.0);
        assert_eq!(clean.num_belts, 1);
        assert_eq!(clean.max_nozzle_spacing_m, MIN_NOZZLE_SPACING_M);
        assert_eq!(clean.nozzles_per_location, 1);
        assert_eq!(clean.lhs_cable_qty_to_panel, 0.0);
        assert_eq!(clean.distance_deluge_to_hydrant_m, 0.0);
        assert_eq!(clean.system_pressure_bar, 0.0);
    }

    #[test]
    fn test_compute_is_defined_for_hostile_input() {
        let input = ConveyorInput {
            conveyor_length_m: f64::INFINITY,
            max_nozzle_spacing_m: f64::NAN,
            ..ConveyorInput::default()
        };
        let results = compute(&input).results;

        // Infinite length coerces to zero before division
        assert_eq!(results.locations_per_belt, 0);
        assert_eq!(results.total_nozzles, 0);
        assert!(results.total_flow_lps.is_finite());
        assert!(results.lhs_cable_total_m.is_finite());
    }

    #[test]
    fn test_raw_coercion() {
        let raw = RawConveyorInput {
            conveyor_length_m: "  50.0 ".to_string(),
            conveyor_width_m: "".to_string(),
            num_belts: "2.6".to_string(),
            max_nozzle_spacing_m: "abc".to_string(),
            nozzles_per_location: "-3".to_string(),
            lhs_runs_three_side: true,
            lhs_cable_qty_to_panel: "1e1".to_string(),
            distance_deluge_to_hydrant_m: "inf".to_string(),
            system_pressure_bar: "7".to_string(),
        };
        let input = raw.coerce();

        assert_eq!(input.conveyor_length_m, 50.0);
        assert_eq!(input.conveyor_width_m, 0.0);
        assert_eq!(input.num_belts, 3);
        assert_eq!(input.max_nozzle_spacing_m, MIN_NOZZLE_SPACING_M);
        assert_eq!(input.nozzles_per_location, 1);
        assert_eq!(input.lhs_cable_qty_to_panel, 10.0);
        assert_eq!(input.distance_deluge_to_hydrant_m, 0.0);
        assert_eq!(input.system_pressure_bar, 7.0);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let input = ConveyorInput {
            conveyor_length_m: 123.4,
            num_belts: 2,
            lhs_runs_three_side: true,
            ..ConveyorInput::default()
        };
        assert_eq!(compute(&input), compute(&input));
    }

    #[test]
    fn test_snapshot_keeps_pass_through_fields() {
        let input = ConveyorInput {
            conveyor_width_m: 1.8,
            distance_deluge_to_hydrant_m: 30.0,
            system_pressure_bar: 9.5,
            ..ConveyorInput::default()
        };
        let computation = compute(&input);

        assert_eq!(computation.input.conveyor_width_m, 1.8);
        assert_eq!(computation.input.distance_deluge_to_hydrant_m, 30.0);
        assert_eq!(computation.input.system_pressure_bar, 9.5);
    }

    #[test]
    fn test_bom_follows_nozzle_count() {
        let computation = compute(&ConveyorInput::default());
        assert_eq!(computation.bom.len(), 18);
        assert_eq!(computation.bom[7].serial, 8);
        assert_eq!(
            computation.bom[7].quantity,
            computation.results.total_nozzles as f64
        );
    }

    #[test]
    fn test_serialization_roundtrip() {
        let computation = compute(&ConveyorInput::default());
        let json = serde_json::to_string_pretty(&computation).unwrap();
        let roundtrip: Computation = serde_json::from_str(&json).unwrap();
        assert_eq!(computation, roundtrip);
    }

    #[test]
    fn test_valve_size_serializes_as_nominal_label() {
        let json = serde_json::to_string(&DelugeValveSize::Dn100).unwrap();
        assert_eq!(json, "\"DN100\"");
    }
}
