//! Interactive fallbacks for options not given on the command line.

use anyhow::Context;
use inquire::Select;
use weather_core::{ReportKind, StationRegistry};

pub fn location(registry: &StationRegistry) -> anyhow::Result<String> {
    let choices: Vec<String> = registry.list().into_iter().map(str::to_string).collect();

    Select::new("Get weather for which city?", choices)
        .with_starting_cursor(registry.default_index())
        .prompt()
        .context("Failed to read location")
}

pub fn report_kind() -> anyhow::Result<ReportKind> {
    let choices: Vec<KindChoice> = ReportKind::all().iter().copied().map(KindChoice).collect();
    let start = ReportKind::all()
        .iter()
        .position(|k| *k == ReportKind::default())
        .unwrap_or(0);

    let choice = Select::new("Get forecast or current conditions?", choices)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read report type")?;

    Ok(choice.0)
}

#[derive(Debug, Clone, Copy)]
struct KindChoice(ReportKind);

impl std::fmt::Display for KindChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.label())
    }
}
