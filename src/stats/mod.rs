//! Stats module - Summary statistics

mod calculator;

pub use calculator::{AmountStats, FrequencyEntry, StatsCalculator};
