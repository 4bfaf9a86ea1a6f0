//! # Bill of Materials
//!
//! The BOM is a fixed 18-row catalog for a single-deluge-zone MVWS
//! installation. Seventeen rows carry constant quantities; row serial 8
//! (the spray nozzles) is the one computed row, filled in from the
//! calculated total nozzle count.
//!
//! The catalog lives in a static template table; [`build_bom`] materializes
//! a fresh list on every computation, so callers never share or mutate
//! template state.
//!
//! ## Example
//!
//! ```rust
//! use mvws_core::bom::{build_bom, Unit};
//!
//! let bom = build_bom(40);
//! assert_eq!(bom.len(), 18);
//! assert_eq!(bom[7].serial, 8);
//! assert_eq!(bom[7].quantity, 40.0);
//! assert_eq!(bom[7].unit, Unit::Nos);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::display::two_dp;

/// Unit of measure for a BOM row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Discrete pieces
    Nos,
    /// Length in meters
    Meter,
    /// Mass in kilograms
    Kg,
    /// Lump-sum supply
    Lot,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Unit::Nos => "Nos",
            Unit::Meter => "Meter",
            Unit::Kg => "Kg",
            Unit::Lot => "Lot",
        };
        write!(f, "{label}")
    }
}

/// One materialized BOM row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLineItem {
    /// Serial number, 1-based, unique and ordered
    pub serial: u32,

    /// Quantity in `unit` terms
    pub quantity: f64,

    /// Catalog description
    pub description: String,

    /// Unit of measure
    pub unit: Unit,
}

impl BomLineItem {
    /// Quantity formatted for display: integer-valued quantities stay bare
    /// integers, everything else gets two decimal places.
    pub fn quantity_display(&self) -> String {
        if self.quantity.is_finite() && self.quantity.fract() == 0.0 {
            format!("{:.0}", self.quantity)
        } else {
            two_dp(self.quantity)
        }
    }
}

/// Quantity specification for a template row: either a baked-in constant or
/// the single computed field referencing the total nozzle count.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TemplateQuantity {
    Fixed(f64),
    TotalNozzles,
}

/// One row of the static BOM template.
#[derive(Debug, Clone, Copy)]
struct BomTemplateRow {
    serial: u32,
    quantity: TemplateQuantity,
    description: &'static str,
    unit: Unit,
}

/// The fixed 18-row catalog. Descriptions are reproduced from the supplier
/// catalog as-is, typos included.
static BOM_TEMPLATE: [BomTemplateRow; 18] = [
    BomTemplateRow {
        serial: 1,
        quantity: TemplateQuantity::Fixed(1.0),
        description: "100 mm Cast Iron Deluge Valve with Wet Pilot Basic Trim Assembly",
        unit: Unit::Nos,
    },
    BomTemplateRow {
        serial: 2,
        quantity: TemplateQuantity::Fixed(18.0),
        description: "100 mm M.S Pipes Heavy C Class As Per IS: 1239",
        unit: Unit::Meter,
    },
    BomTemplateRow {
        serial: 3,
        quantity: TemplateQuantity::Fixed(156.0),
        description: "100 mm G.I. Pipes Heavy C Class As Per IS: 1239",
        unit: Unit::Meter,
    },
    BomTemplateRow {
        serial: 4,
        quantity: TemplateQuantity::Fixed(60.0),
        description: "80 mm G.I. Pipes Heavy C Class As Per IS: 1239",
        unit: Unit::Meter,
    },
    BomTemplateRow {
        serial: 5,
        quantity: TemplateQuantity::Fixed(228.0),
        description: "25 mm G.I. Pipes Heavy C Class As Per IS: 1239",
        unit: Unit::Meter,
    },
    BomTemplateRow {
        serial: 6,
        quantity: TemplateQuantity::Fixed(4.0),
        description: "100 mm Cast Iron Wafer Type Butterfly Valve",
        unit: Unit::Nos,
    },
    BomTemplateRow {
        serial: 7,
        quantity: TemplateQuantity::Fixed(1.0),
        description: "100 mm MS Y Type Strainers - Body : MS as per get('IS1239') (I)",
        unit: Unit::Nos,
    },
    BomTemplateRow {
        serial: 8,
        quantity: TemplateQuantity::TotalNozzles,
        description: "Medium Velocity Water Spray Nozzle Nickel Chrome Plated Brass 1/2\" BSPT",
        unit: Unit::Nos,
    },
    BomTemplateRow {
        serial: 9,
        quantity: TemplateQuantity::Fixed(587.0),
        description: "Digital Linear Heat Detection Cable Alarm Temperature 70\u{b0}C",
        unit: Unit::Nos,
    },
    BomTemplateRow {
        serial: 10,
        quantity: TemplateQuantity::Fixed(1.0),
        description: "Deluge Valve Control Panel Outdoor with Canopy and IP65 Protection",
        unit: Unit::Nos,
    },
    BomTemplateRow {
        serial: 11,
        quantity: TemplateQuantity::Fixed(2.0),
        description: "Pressure Switch with All Accessories. Range : 2-14 kg.",
        unit: Unit::Nos,
    },
    BomTemplateRow {
        serial: 12,
        quantity: TemplateQuantity::Fixed(1.0),
        description: "24 VDC Solenoid Valve, Operating Pressure: 1 - 20 Bar, 1/2\" BSPT",
        unit: Unit::Nos,
    },
    BomTemplateRow {
        serial: 13,
        quantity: TemplateQuantity::Fixed(2.0),
        description: "Monitor Module, if applicable",
        unit: Unit::Nos,
    },
    BomTemplateRow {
        serial: 14,
        quantity: TemplateQuantity::Fixed(1.0),
        description: "Control Nodule, if applicable",
        unit: Unit::Nos,
    },
    BomTemplateRow {
        serial: 15,
        quantity: TemplateQuantity::Fixed(2.0),
        description: "12V - 10 AMPS Battery",
        unit: Unit::Nos,
    },
    BomTemplateRow {
        serial: 16,
        quantity: TemplateQuantity::Fixed(1.0),
        description: "Cables and Accessories",
        unit: Unit::Lot,
    },
    BomTemplateRow {
        serial: 17,
        quantity: TemplateQuantity::Fixed(1.0),
        description: "Other Hardware Like Nut Bolts, U Clamps Anchor Fastener, Flanges & Green Gasket Etc.",
        unit: Unit::Lot,
    },
    BomTemplateRow {
        serial: 18,
        quantity: TemplateQuantity::Fixed(539.0),
        description: "MS Support Made of L Angle, C Channel, & MS Plate Etc.",
        unit: Unit::Kg,
    },
];

/// Materialize the BOM for a given total nozzle count.
///
/// Returns a fresh, independent list every call; only serial 8's quantity
/// varies with the input.
pub fn build_bom(total_nozzles: u64) -> Vec<BomLineItem> {
    BOM_TEMPLATE
        .iter()
        .map(|row| BomLineItem {
            serial: row.serial,
            quantity: match row.quantity {
                TemplateQuantity::Fixed(qty) => qty,
                TemplateQuantity::TotalNozzles => total_nozzles as f64,
            },
            description: row.description.to_string(),
            unit: row.unit,
        })
        .collect()
}
