//! Plain-text table rendering.

use crate::model::{ConditionsRow, ForecastPeriod};

const GAP: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

#[derive(Debug)]
struct Table {
    headers: Vec<&'static str>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        widths
    }

    fn line(&self, cells: &[&str], widths: &[usize]) -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(&self.aligns)
            .map(|((cell, &w), &align)| pad(cell, w, align))
            .collect();
        padded.join(GAP).trim_end().to_string()
    }
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.chars().count()));
    match align {
        Align::Left => format!("{cell}{fill}"),
        Align::Right => format!("{fill}{cell}"),
    }
}

fn total_width(widths: &[usize]) -> usize {
    widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1)
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = width.saturating_sub(len) / 2;
    format!("{}{text}", " ".repeat(left))
}

/// Forecast table: title centered above a header row and a rule, one line per period.
pub fn render_forecast(
    locale: &str,
    periods: &[ForecastPeriod],
    include_precipitation: bool,
) -> String {
    let mut headers = vec!["Day", "Temp", "Wind", "Forecast"];
    let mut aligns = vec![Align::Right, Align::Left, Align::Left, Align::Left];
    if include_precipitation {
        headers.push("Chance of Precip.");
        aligns.push(Align::Left);
    }

    let rows = periods
        .iter()
        .map(|p| {
            let mut row = vec![
                p.name.clone(),
                p.temperature.clone(),
                p.wind.clone(),
                p.short_forecast.clone(),
            ];
            if include_precipitation {
                row.push(p.precipitation.clone());
            }
            row
        })
        .collect();

    let table = Table { headers, aligns, rows };
    let widths = table.widths();
    let width = total_width(&widths);

    let mut out = Vec::with_capacity(table.rows.len() + 3);
    out.push(center(&format!("Weather Forecast for {locale}"), width));
    out.push(table.line(&table.headers, &widths));
    out.push("─".repeat(width));
    for row in &table.rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(table.line(&cells, &widths));
    }
    out.join("\n")
}

/// Two-column label/value table framed by dashed rules.
pub fn render_conditions(locale: &str, rows: &[ConditionsRow]) -> String {
    let table = Table {
        headers: vec!["", ""],
        aligns: vec![Align::Left, Align::Left],
        rows: rows.iter().map(|r| vec![r.label.to_string(), r.value.clone()]).collect(),
    };
    let widths = table.widths();
    let rule = widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>().join(GAP);

    let mut out = vec![format!("Current Weather Conditions\nin {locale}"), rule.clone()];
    for row in &table.rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(table.line(&cells, &widths));
    }
    out.push(rule);
    out.join("\n")
}
