//! CSV Data Loader Module
//! Fetches the donations CSV and validates it into typed rows using Polars.

use super::record::RawDonation;
use log::info;
use polars::prelude::*;
use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;

/// Columns the donations CSV must provide.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Owner",
    "Team",
    "League",
    "Recipient",
    "Amount",
    "Election Year",
    "Party",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to fetch data: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Failed to fetch {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("CSV is missing required column {0:?}")]
    MissingColumn(String),
}

/// Where the donations CSV lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl DataSource {
    /// Anything with an http(s) scheme is a URL, everything else a local path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::Path(PathBuf::from(location))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Handles CSV loading with Polars. Every column is read as text and
/// validated into `RawDonation` rows.
pub struct DataLoader {
    source: DataSource,
}

impl DataLoader {
    /// Create a loader for `source`. Nothing is read until `load`.
    pub fn new(source: DataSource) -> Self {
        Self { source }
    }

    /// Get the configured source.
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Load the configured source into raw donation rows.
    pub fn load(&self) -> Result<Vec<RawDonation>, LoaderError> {
        let df = match &self.source {
            DataSource::Url(url) => Self::parse_csv_bytes(Self::fetch(url)?)?,
            DataSource::Path(path) => Self::read_csv_file(path)?,
        };

        let rows = Self::extract_rows(&df)?;
        info!("Loaded {} rows from {}", rows.len(), self.source);
        Ok(rows)
    }

    /// Download the raw CSV bytes. No retry: a failed fetch is fatal.
    fn fetch(url: &str) -> Result<Vec<u8>, LoaderError> {
        info!("Fetching {}", url);
        let response = reqwest::blocking::get(url)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }

    fn read_csv_file(path: &std::path::Path) -> Result<DataFrame, LoaderError> {
        // Schema inference off: all columns arrive as strings
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;
        Ok(df)
    }

    /// Parse in-memory CSV text into a string-typed DataFrame.
    pub fn parse_csv_bytes(bytes: Vec<u8>) -> Result<DataFrame, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;
        Ok(df)
    }

    fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        let values = column.cast(&DataType::String)?;

        Ok(values
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }

    /// Validate the required columns and turn the frame into typed rows.
    pub fn extract_rows(df: &DataFrame) -> Result<Vec<RawDonation>, LoaderError> {
        let columns = REQUIRED_COLUMNS
            .iter()
            .map(|name| Self::string_column(df, name))
            .collect::<Result<Vec<_>, _>>()?;
        let cell = |col: usize, row: usize| columns[col][row].clone();

        let rows = (0..df.height())
            .map(|i| RawDonation {
                owner: cell(0, i),
                team: cell(1, i),
                league: cell(2, i),
                recipient: cell(3, i),
                amount: cell(4, i),
                election_year: cell(5, i),
                party: cell(6, i),
            })
            .collect();

        Ok(rows)
    }
}
