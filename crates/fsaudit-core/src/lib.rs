/// fsaudit Core — scanning, classification, and analysis.
///
/// This crate contains all business logic with zero CLI dependencies.
/// It is designed to be reusable across different frontends (CLI, TUI, GUI).
///
/// # Modules
///
/// - [`model`] — Per-file records and supporting types.
/// - [`classify`] — Extension table and two-phase content classification.
/// - [`probe`] — Record builder: one metadata probe per path.
/// - [`analysis`] — Post-scan analysis (category totals, large files,
///   permission risks).
/// - [`scanner`] — Background filesystem scanning with progress reporting.
pub mod analysis;
pub mod classify;
pub mod model;
pub mod probe;
pub mod scanner;
