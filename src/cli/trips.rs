use super::ui;
use crate::core::{AppState, Currency};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

pub fn display_trips(state: &AppState) -> Option<String> {
    let trips = state.trips();
    if trips.is_empty() {
        return None;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Trip"),
        ui::header_cell("Expenses"),
        ui::header_cell(&format!("Total ({})", Currency::HOME)),
    ]);
    for trip in &trips {
        let summary = state.trip_summary(trip);
        table.add_row(vec![
            Cell::new(trip),
            Cell::new(summary.records.len()).set_alignment(CellAlignment::Right),
            Cell::new(ui::format_home_total(summary.total)).set_alignment(CellAlignment::Right),
        ]);
    }
    Some(table.to_string())
}

pub fn run(state: &AppState) -> Result<()> {
    match display_trips(state) {
        Some(table) => println!("{table}"),
        None => println!("No trips yet. Add an expense to start one."),
    }
    Ok(())
}
