use super::ui;
use crate::core::{AppState, Currency};
use anyhow::Result;

pub async fn run(state: &AppState) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rate...");
    let rate = state.current_rate().await;
    pb.finish_and_clear();

    println!(
        "1 {} = {} {}",
        Currency::SOURCE,
        ui::style_text(&rate.normalize().to_string(), ui::StyleType::TotalValue),
        Currency::HOME
    );
    Ok(())
}
