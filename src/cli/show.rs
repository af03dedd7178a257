use super::ui;
use crate::core::{AppState, Currency, TripSummary};
use anyhow::Result;
use comfy_table::Cell;

impl TripSummary {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Date"),
            ui::header_cell("Category"),
            ui::header_cell("Item"),
            ui::header_cell("Currency"),
            ui::header_cell("Amount"),
            ui::header_cell(&format!("Total ({})", Currency::HOME)),
        ]);

        for record in &self.records {
            table.add_row(vec![
                Cell::new(record.date.format("%Y-%m-%d")),
                Cell::new(&record.category),
                Cell::new(&record.item),
                Cell::new(record.currency),
                ui::amount_cell(record.original_amount),
                ui::amount_cell(record.home_total),
            ]);
        }

        let mut output = format!(
            "Trip: {}\n\n",
            ui::style_text(&self.trip_name, ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\nTotal ({}): {}",
            ui::style_text(Currency::HOME.code(), ui::StyleType::TotalLabel),
            ui::style_text(
                &ui::format_home_total(self.total),
                ui::StyleType::TotalValue
            )
        ));
        output
    }
}

/// Prints the records and total of `trip`, or of every trip when none is given.
pub fn run(state: &mut AppState, trip: Option<&str>) -> Result<()> {
    let trips = match trip {
        Some(name) => {
            state.select_trip(name)?;
            vec![state.selected_trip().unwrap_or(name).to_string()]
        }
        None => state.trips(),
    };

    if trips.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }

    let count = trips.len();
    for (i, name) in trips.iter().enumerate() {
        let summary = state.trip_summary(name);
        if summary.records.is_empty() {
            println!(
                "{}",
                ui::style_text(
                    &format!("No expenses recorded for trip '{name}'."),
                    ui::StyleType::Subtle
                )
            );
        } else {
            println!("{}", summary.display_as_table());
        }
        if i < count - 1 {
            ui::print_separator();
        }
    }
    Ok(())
}
