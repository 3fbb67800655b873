//! fsaudit — filesystem inventory and permission audit tool.
//!
//! Thin binary entry point. All logic lives in the `fsaudit-core`
//! and `fsaudit-report` crates.

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout stays clean for the
    // table/JSON/CSV report.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    fsaudit_report::run()
}
