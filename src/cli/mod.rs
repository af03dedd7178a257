pub mod add;
pub mod rate;
pub mod setup;
pub mod show;
pub mod trips;
pub mod ui;
