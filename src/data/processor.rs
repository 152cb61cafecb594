//! Data Processor Module
//! Handles data cleaning and transformation (explode operation).

use super::record::{bin_donation, DonationRecord, DonationTable, Party, RawDonation};
use log::{debug, info};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProcessorError {
    #[error("Row {row}: amount {raw:?} contains no usable digits")]
    MalformedAmount { row: usize, raw: String },
    #[error("Row {row}: amount {raw:?} is negative")]
    NegativeAmount { row: usize, raw: String },
    #[error("Row {row}: unrecognized party classification {value:?}")]
    UnrecognizedParty { row: usize, value: String },
    #[error("Row {row}: election year {raw:?} is not an integer")]
    MalformedElectionYear { row: usize, raw: String },
    #[error("Row {row}: {teams} team(s) but {leagues} league(s)")]
    MismatchedMultiValueFields {
        row: usize,
        teams: usize,
        leagues: usize,
    },
    #[error("Row {row}: empty entry in {field} list")]
    EmptyMultiValuePiece { row: usize, field: &'static str },
}

/// Title-case a string: the first letter of every word upper-cased, the rest
/// lower-cased. Any non-alphabetic character starts a new word.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_alpha = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }

    out
}

/// True when a `-` sign appears before the first digit, e.g. "-$250" or "$-250".
pub fn is_negative_amount(raw: &str) -> bool {
    raw.chars()
        .take_while(|c| !c.is_ascii_digit())
        .any(|c| c == '-')
}

/// Parse a currency string by keeping only its decimal digits.
/// Returns `None` for negative amounts, when no digits remain, or on overflow.
pub fn parse_amount(raw: &str) -> Option<u64> {
    if is_negative_amount(raw) {
        return None;
    }
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

fn parse_election_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }

    // Integer-valued floats ("2016.0") come out of some CSV exports
    let value: f64 = trimmed.parse().ok()?;
    if value.fract() == 0.0 && value >= i32::MIN as f64 && value <= i32::MAX as f64 {
        Some(value as i32)
    } else {
        None
    }
}

fn split_multi_value(raw: &str, row: usize, field: &'static str) -> Result<Vec<String>, ProcessorError> {
    raw.split(',')
        .map(|piece| {
            let piece = piece.trim();
            if piece.is_empty() {
                Err(ProcessorError::EmptyMultiValuePiece { row, field })
            } else {
                Ok(piece.to_string())
            }
        })
        .collect()
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Clean one raw row. `row` is the 1-based data row used in error reports.
    pub fn preprocess_row(raw: &RawDonation, row: usize) -> Result<DonationRecord, ProcessorError> {
        let raw_amount = raw.amount.as_deref().unwrap_or_default();
        if is_negative_amount(raw_amount) {
            return Err(ProcessorError::NegativeAmount {
                row,
                raw: raw_amount.to_string(),
            });
        }
        let amount = parse_amount(raw_amount).ok_or_else(|| ProcessorError::MalformedAmount {
            row,
            raw: raw_amount.to_string(),
        })?;

        let party = Party::canonicalize(raw.party.as_deref())
            .map_err(|value| ProcessorError::UnrecognizedParty { row, value })?;

        let raw_year = raw.election_year.as_deref().unwrap_or_default();
        let election_year =
            parse_election_year(raw_year).ok_or_else(|| ProcessorError::MalformedElectionYear {
                row,
                raw: raw_year.to_string(),
            })?;

        Ok(DonationRecord {
            owner: raw.owner.as_deref().map(title_case),
            team: raw.team.as_deref().map(title_case),
            league: raw.league.clone(),
            recipient: raw.recipient.as_deref().map(title_case),
            amount,
            election_year,
            party,
            donation_bin: bin_donation(amount),
        })
    }

    /// Clean every raw row, failing on the first data-integrity error.
    pub fn preprocess(rows: &[RawDonation]) -> Result<DonationTable, ProcessorError> {
        let table = rows
            .iter()
            .enumerate()
            .map(|(i, raw)| Self::preprocess_row(raw, i + 1))
            .collect::<Result<DonationTable, _>>()?;

        info!("Preprocessed {} donation rows", table.len());
        Ok(table)
    }

    /// Explode one record into one record per (team, league) pair.
    pub fn expand_record(
        record: &DonationRecord,
        row: usize,
    ) -> Result<Vec<DonationRecord>, ProcessorError> {
        let (teams, leagues) = match (&record.team, &record.league) {
            (None, None) => return Ok(vec![record.clone()]),
            (Some(team), Some(league)) => (
                split_multi_value(team, row, "Team")?,
                split_multi_value(league, row, "League")?,
            ),
            (Some(team), None) => {
                return Err(ProcessorError::MismatchedMultiValueFields {
                    row,
                    teams: team.split(',').count(),
                    leagues: 0,
                })
            }
            (None, Some(league)) => {
                return Err(ProcessorError::MismatchedMultiValueFields {
                    row,
                    teams: 0,
                    leagues: league.split(',').count(),
                })
            }
        };

        if teams.len() != leagues.len() {
            return Err(ProcessorError::MismatchedMultiValueFields {
                row,
                teams: teams.len(),
                leagues: leagues.len(),
            });
        }

        Ok(teams
            .into_iter()
            .zip(leagues)
            .map(|(team, league)| DonationRecord {
                team: Some(team),
                league: Some(league),
                ..record.clone()
            })
            .collect())
    }

    /// Denormalize a cleaned table so every row carries a single team and league.
    pub fn expand(table: &DonationTable) -> Result<DonationTable, ProcessorError> {
        let mut rows = Vec::with_capacity(table.len());
        for (i, record) in table.iter().enumerate() {
            rows.extend(Self::expand_record(record, i + 1)?);
        }

        debug!("Expanded {} rows into {} team/league rows", table.len(), rows.len());
        Ok(DonationTable::new(rows))
    }
}
