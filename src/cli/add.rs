use super::ui;
use crate::core::config::AppConfig;
use crate::core::{AppState, AppendOutcome, Currency, NewExpense};
use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

/// Expense fields as given on the command line.
#[derive(Debug, Clone)]
pub struct AddExpense {
    pub trip: String,
    pub item: String,
    pub category: String,
    pub currency: Currency,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
}

pub async fn run(state: &mut AppState, config: &AppConfig, args: AddExpense) -> Result<()> {
    if !config.is_known_category(&args.category) {
        bail!(
            "Unknown category '{}'. Choose one of: {}",
            args.category,
            config.categories.join(", ")
        );
    }

    // An empty trip name is reported as a validation warning below
    let trip_name = match state.select_trip(&args.trip) {
        Ok(()) => state.selected_trip().unwrap_or_default().to_string(),
        Err(_) => String::new(),
    };

    let expense = NewExpense {
        trip_name,
        date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        category: args.category,
        item: args.item.trim().to_string(),
        currency: args.currency,
        amount: args.amount,
    };

    let pb = ui::new_spinner("Saving expense...");
    let outcome = state.add_expense(expense).await;
    pb.finish_and_clear();

    match outcome? {
        AppendOutcome::Appended { record, rate } => {
            println!(
                "{}",
                ui::style_text(
                    &format!("Added '{}' to {}", record.item, record.trip_name),
                    ui::StyleType::Success
                )
            );
            let mut detail = format!(
                "{} {} = {} {}",
                ui::format_amount(record.original_amount),
                record.currency,
                ui::format_amount(record.home_total),
                Currency::HOME
            );
            if record.currency == Currency::SOURCE {
                detail.push_str(&format!(" (rate {})", rate.normalize()));
            }
            println!("{}", ui::style_text(&detail, ui::StyleType::Subtle));

            let summary = state.trip_summary(&record.trip_name);
            println!(
                "{}: {}",
                ui::style_text("Trip total", ui::StyleType::TotalLabel),
                ui::style_text(
                    &ui::format_home_total(summary.total),
                    ui::StyleType::TotalValue
                )
            );
        }
        AppendOutcome::Rejected(e) => {
            println!(
                "{}",
                ui::style_text(
                    &format!("Expense not saved: {e}"),
                    ui::StyleType::Warning
                )
            );
        }
    }
    Ok(())
}
