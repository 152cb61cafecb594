//! Sports Donations - data core for the U.S. sports owners political donations dashboard
//!
//! Loads the FiveThirtyEight CSV, cleans and explodes it, and builds the
//! per-selection view (summary cards, pie charts, searchable table).

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod stats;

pub use config::DashboardConfig;
pub use dashboard::{DashboardError, DashboardView, Dataset, TableRow};
pub use data::{DataLoader, DataSource, DonationRecord, DonationTable, Selection};
