//! # Report Generation Module
//!
//! Renders a printable MVWS calculation report from a completed
//! computation using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via string formatting before compilation
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! The renderer never recomputes anything: it takes the input snapshot,
//! results, and BOM rows of an existing [`Computation`](crate::Computation)
//! and typesets exactly those figures, so the printed report cannot diverge
//! from what was shown on screen. Writing or printing the bytes is the
//! caller's concern.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mvws_core::calculations::conveyor::{compute, ConveyorInput};
//! use mvws_core::pdf::render_report_pdf;
//!
//! let computation = compute(&ConveyorInput::default());
//! let pdf_bytes = render_report_pdf(
//!     &computation.input,
//!     &computation.results,
//!     &computation.bom,
//! )
//! .unwrap();
//! std::fs::write("mvws_report.pdf", pdf_bytes).unwrap();
//! ```

use chrono::{Local, Utc};
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::bom::BomLineItem;
use crate::calculations::conveyor::{ConveyorInput, ConveyorResult};
use crate::display::{two_dp, yes_no};
use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// Bundled fonts, loaded once per process.
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    let mut fonts = Vec::new();
    for font_bytes in typst_assets::fonts() {
        let buffer = Bytes::new(font_bytes.to_vec());
        for font in Font::iter(buffer) {
            fonts.push(font);
        }
    }
    fonts
});

static FONT_BOOK: Lazy<LazyHash<FontBook>> =
    Lazy::new(|| LazyHash::new(FontBook::from_fonts(FONTS.iter())));

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        PdfWorld {
            main: Source::detached(source),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &FONT_BOOK
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// Report Template
// ============================================================================

/// Typst template for the MVWS calculation report
const REPORT_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[MVWS Conveyor Deluge Sizing]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[MVWS Conveyor Calculation]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(size: 11pt)

// Title Block
#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[MVWS Conveyor Calculation Report]
    #v(4pt)
    #text(size: 10pt, fill: gray)[Generated on {{DATE}}]
  ]
]

#v(16pt)

== Inputs

#grid(
  columns: (1fr, 1fr),
  gutter: 12pt,
  [
    #table(
      columns: (1fr, auto),
      inset: 6pt,
      stroke: 0.5pt,
      align: (left, right),
      [Conveyor length (m)], [{{LENGTH}}],
      [Conveyor width (m)], [{{WIDTH}}],
      [No. of belts], [{{BELTS}}],
      [Max nozzle spacing (m)], [{{SPACING}}],
      [Nozzles per location], [{{NOZZLES_PER_LOCATION}}],
    )
  ],
  [
    #table(
      columns: (1fr, auto),
      inset: 6pt,
      stroke: 0.5pt,
      align: (left, right),
      [LHS cable runs three sides?], [{{THREE_SIDE}}],
      [LHS cable qty to panel (m)], [{{CABLE_TO_PANEL}}],
      [Distance deluge valve to hydrant (m)], [{{HYDRANT_DISTANCE}}],
      [System pressure (bar)], [{{PRESSURE}}],
    )
  ]
)

#v(12pt)

== Results

#table(
  columns: (1fr, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right),
  [Total nozzles], [{{TOTAL_NOZZLES}}],
  [Estimated total flow (L/s)], [{{TOTAL_FLOW}}],
  [Deluge valve], [{{DELUGE_VALVE}}],
  [LHS cable total (m)], [{{CABLE_TOTAL}}],
  [Pipe run (approx, m)], [{{PIPE_RUN}}],
)

#v(12pt)

== Bill of Materials

#table(
  columns: (auto, auto, 1fr, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, left, left),
  table.header([*Sr.*], [*Qty*], [*Description*], [*Unit*]),
{{BOM_ROWS}}
)

#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

#text(size: 9pt, fill: gray)[
  Generated by the MVWS conveyor sizing toolkit \
  Quantities are preliminary estimates; verify against detailed hydraulic design.
]
"##;

// ============================================================================
// Report Rendering Functions
// ============================================================================

/// Escape characters that Typst markup would otherwise interpret, so catalog
/// descriptions and formatted figures render literally.
fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '#' | '[' | ']' | '*' | '_' | '~' | '$' | '`' | '<' | '>' | '@' | '"'
            | '\'' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Build the Typst source for a report, with the generation timestamp
/// injected by the caller.
fn build_report_source(
    input: &ConveyorInput,
    results: &ConveyorResult,
    bom: &[BomLineItem],
    generated_on: &str,
) -> String {
    let bom_rows = bom
        .iter()
        .map(|row| {
            format!(
                "  [{}], [{}], [{}], [{}],",
                row.serial,
                row.quantity_display(),
                escape_markup(&row.description),
                row.unit
            )
        })
        .collect::<Vec<String>>()
        .join("\n");

    REPORT_TEMPLATE
        .replace("{{DATE}}", generated_on)
        .replace("{{LENGTH}}", &two_dp(input.conveyor_length_m))
        .replace("{{WIDTH}}", &two_dp(input.conveyor_width_m))
        .replace("{{BELTS}}", &input.num_belts.to_string())
        .replace("{{SPACING}}", &two_dp(input.max_nozzle_spacing_m))
        .replace(
            "{{NOZZLES_PER_LOCATION}}",
            &input.nozzles_per_location.to_string(),
        )
        .replace("{{THREE_SIDE}}", yes_no(input.lhs_runs_three_side))
        .replace("{{CABLE_TO_PANEL}}", &two_dp(input.lhs_cable_qty_to_panel))
        .replace(
            "{{HYDRANT_DISTANCE}}",
            &two_dp(input.distance_deluge_to_hydrant_m),
        )
        .replace("{{PRESSURE}}", &two_dp(input.system_pressure_bar))
        .replace("{{TOTAL_NOZZLES}}", &results.total_nozzles_display())
        .replace("{{TOTAL_FLOW}}", &results.total_flow_display())
        .replace(
            "{{DELUGE_VALVE}}",
            &escape_markup(&results.deluge_valve_display()),
        )
        .replace("{{CABLE_TOTAL}}", &results.lhs_cable_total_display())
        .replace("{{PIPE_RUN}}", &results.pipe_run_display())
        .replace("{{BOM_ROWS}}", &bom_rows)
}

/// Render a conveyor MVWS computation to a printable PDF.
///
/// # Arguments
///
/// * `input` - The sanitized input snapshot the results were derived from
/// * `results` - The derived quantities
/// * `bom` - The materialized BOM rows, reused verbatim
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError)` - If rendering fails
pub fn render_report_pdf(
    input: &ConveyorInput,
    results: &ConveyorResult,
    bom: &[BomLineItem],
) -> CalcResult<Vec<u8>> {
    if bom.is_empty() {
        return Err(CalcError::invalid_input(
            "bom",
            "empty",
            "A computed BOM is required",
        ));
    }

    let generated_on = Local::now().format("%Y-%m-%d %H:%M").to_string();
    let source = build_report_source(input, results, bom, &generated_on);

    // Compile the Typst document
    let world = PdfWorld::new(source);

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::report_failed("compile", error_msgs.join("; "))
    })?;

    // Render to PDF
    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::report_failed("pdf export", error_msgs.join("; "))
    })?;

    Ok(pdf_bytes)
}
