//! Dashboard view model
//! Loads the dataset once and builds the per-selection view a presentation layer renders.

use crate::charts::PieChart;
use crate::data::{
    election_years, filter_by_search, filter_by_year_and_league, leagues, make_header_str,
    DataLoader, DataProcessor, DonationBin, DonationRecord, DonationTable, LoaderError, Party,
    ProcessorError, RawDonation, Selection,
};
use crate::stats::{AmountStats, FrequencyEntry, StatsCalculator};
use log::{debug, info};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

const OVERVIEW: &str = "Donations Overview";
const BY_PARTY: &str = "Donations By Party";
const BY_AMOUNT: &str = "Donations By Amount";
const FULL_DATA: &str = "Full Donation Data";

/// Rows printed by the text summary.
const PREVIEW_ROWS: usize = 10;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Process(#[from] ProcessorError),
}

/// The cleaned donations, both one row per donation and exploded per league.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub donations: DonationTable,
    pub by_league: DonationTable,
}

impl Dataset {
    /// Clean and explode already-loaded rows.
    pub fn from_raw(rows: &[RawDonation]) -> Result<Self, ProcessorError> {
        let donations = DataProcessor::preprocess(rows)?;
        let by_league = DataProcessor::expand(&donations)?;
        Ok(Self {
            donations,
            by_league,
        })
    }

    /// Load the source and prepare both tables, failing on the first bad row.
    pub fn load(loader: &DataLoader) -> Result<Self, DashboardError> {
        let rows = loader.load()?;
        let dataset = Self::from_raw(&rows)?;
        info!(
            "Dataset ready: {} donations, {} team/league rows",
            dataset.donations.len(),
            dataset.by_league.len()
        );
        Ok(dataset)
    }

    /// Options for the election-year selector.
    pub fn election_years(&self) -> Vec<i32> {
        election_years(&self.donations)
    }

    /// Options for the league selector.
    pub fn leagues(&self) -> Vec<String> {
        leagues(&self.by_league)
    }

    /// Rows matching the year/league selection. A concrete league needs the
    /// exploded table; otherwise every donation is counted once.
    pub fn select(&self, year: Selection<i32>, league: Selection<&str>) -> DonationTable {
        let source = if league.is_all() {
            &self.donations
        } else {
            &self.by_league
        };
        filter_by_year_and_league(source, year, league)
    }

    /// Build the full view for one selection. `search` only narrows the table rows.
    pub fn view(&self, year: Selection<i32>, league: Selection<&str>, search: &str) -> DashboardView {
        let selected = self.select(year, league);
        let searched = filter_by_search(&selected, search);
        debug!(
            "Selection has {} rows, {} after search {:?}",
            selected.len(),
            searched.len(),
            search
        );

        let party_counts = StatsCalculator::party_counts(&selected);
        let bin_counts = StatsCalculator::bin_counts(&selected);
        let party_header = make_header_str(BY_PARTY, &year, &league);
        let amount_header = make_header_str(BY_AMOUNT, &year, &league);

        DashboardView {
            overview_header: make_header_str(OVERVIEW, &year, &league),
            stats: StatsCalculator::compute_amount_stats(&selected),
            party_pie: PieChart::from_counts(party_header.clone(), &party_counts),
            bin_pie: PieChart::from_counts(amount_header.clone(), &bin_counts),
            party_header,
            party_counts,
            amount_header,
            bin_counts,
            table_header: make_header_str(FULL_DATA, &year, &league),
            rows: searched.iter().map(TableRow::from).collect(),
        }
    }
}

/// One row of the donation table, in display column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    #[serde(rename = "Owner")]
    pub owner: Option<String>,
    #[serde(rename = "Team")]
    pub team: Option<String>,
    #[serde(rename = "League")]
    pub league: Option<String>,
    #[serde(rename = "Recipient")]
    pub recipient: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: u64,
    #[serde(rename = "Election Year")]
    pub election_year: i32,
    #[serde(rename = "Party")]
    pub party: Party,
}

impl From<&DonationRecord> for TableRow {
    fn from(record: &DonationRecord) -> Self {
        Self {
            owner: record.owner.clone(),
            team: record.team.clone(),
            league: record.league.clone(),
            recipient: record.recipient.clone(),
            amount: record.amount,
            election_year: record.election_year,
            party: record.party,
        }
    }
}

/// Everything the dashboard page shows for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub overview_header: String,
    pub stats: AmountStats,
    pub party_header: String,
    pub party_counts: Vec<FrequencyEntry<Party>>,
    pub party_pie: PieChart,
    pub amount_header: String,
    pub bin_counts: Vec<FrequencyEntry<DonationBin>>,
    pub bin_pie: PieChart,
    pub table_header: String,
    pub rows: Vec<TableRow>,
}

impl DashboardView {
    /// Serialize the view for a presentation layer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Group an integer's digits in threes: 1234567 -> "1,234,567".
fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// "$1,234.50" style currency text.
pub fn format_currency(value: f64) -> String {
    let cents = (value * 100.0).round() as u128;
    format!("${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Whole-dollar amount as "$1,234.00", exact for any sum of `u64` amounts.
pub fn format_amount(value: u128) -> String {
    format!("${}.00", group_thousands(value))
}

fn or_blank(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.overview_header)?;
        writeln!(f, "Total Donations:               {}", group_thousands(self.stats.count as u128))?;
        writeln!(f, "Total Donation Amount:         {}", format_amount(self.stats.total))?;
        match (self.stats.median, self.stats.mode) {
            (Some(median), Some(mode)) => {
                writeln!(f, "Median Donation Amount:        {}", format_currency(median))?;
                writeln!(f, "Most Frequent Donation Amount: {}", format_amount(u128::from(mode)))?;
            }
            _ => writeln!(f, "No donations match this selection")?,
        }

        for pie in [&self.party_pie, &self.bin_pie] {
            writeln!(f, "\n== {} ==", pie.title)?;
            for slice in &pie.slices {
                writeln!(
                    f,
                    "{:<16} {:>7} {:>6.1}%",
                    slice.label,
                    slice.count,
                    slice.share * 100.0
                )?;
            }
        }

        writeln!(f, "\n== {} ==", self.table_header)?;
        for row in self.rows.iter().take(PREVIEW_ROWS) {
            writeln!(
                f,
                "{} | {} | {} | {} | {} | {} | {}",
                or_blank(&row.owner),
                or_blank(&row.team),
                or_blank(&row.league),
                or_blank(&row.recipient),
                row.amount,
                row.election_year,
                row.party
            )?;
        }
        if self.rows.len() > PREVIEW_ROWS {
            writeln!(f, "... {} more rows", self.rows.len() - PREVIEW_ROWS)?;
        }
        Ok(())
    }
}
