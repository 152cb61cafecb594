//! Donation Record Module
//! Typed row schema for the donations table, plus the party and amount-bin enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One CSV row as it arrives from the source, before any cleaning.
/// Missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDonation {
    pub owner: Option<String>,
    pub team: Option<String>,
    pub league: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<String>,
    pub election_year: Option<String>,
    pub party: Option<String>,
}

impl From<&DonationRecord> for RawDonation {
    fn from(record: &DonationRecord) -> Self {
        Self {
            owner: record.owner.clone(),
            team: record.team.clone(),
            league: record.league.clone(),
            recipient: record.recipient.clone(),
            amount: Some(record.amount.to_string()),
            election_year: Some(record.election_year.to_string()),
            party: Some(record.party.label().to_string()),
        }
    }
}

/// Canonical party classification of a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Party {
    Democrat,
    Republican,
    Bipartisan,
    Independent,
    Unclassified,
}

impl Party {
    pub const ALL: [Party; 5] = [
        Party::Democrat,
        Party::Republican,
        Party::Bipartisan,
        Party::Independent,
        Party::Unclassified,
    ];

    /// Map a raw free-text classification onto a canonical party.
    ///
    /// Matching is exact. A missing value is `Unclassified`; an unknown
    /// string is returned back as `Err` so the caller can report it with
    /// row context.
    pub fn canonicalize(raw: Option<&str>) -> Result<Party, String> {
        let Some(raw) = raw else {
            return Ok(Party::Unclassified);
        };

        match raw {
            "Bipartisan" => Ok(Party::Bipartisan),
            "Bipartisan, but mostly Republican" => Ok(Party::Republican),
            "Bipartisan, but mostly Democratic" => Ok(Party::Democrat),
            "Democrat" => Ok(Party::Democrat),
            "Independent" => Ok(Party::Independent),
            "Republican" => Ok(Party::Republican),
            "Unclassified" => Ok(Party::Unclassified),
            _ => Err(raw.to_string()),
        }
    }

    /// Display label, also the canonical raw value.
    pub fn label(&self) -> &'static str {
        match self {
            Party::Democrat => "Democrat",
            Party::Republican => "Republican",
            Party::Bipartisan => "Bipartisan",
            Party::Independent => "Independent",
            Party::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Donation amount range. Variants are declared in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DonationBin {
    #[serde(rename = "< $500")]
    Under500,
    #[serde(rename = "$500 to $1k")]
    From500To1k,
    #[serde(rename = "$1k to $5k")]
    From1kTo5k,
    #[serde(rename = "$5k to $10k")]
    From5kTo10k,
    #[serde(rename = "$10k to $50k")]
    From10kTo50k,
    #[serde(rename = "$50k to $100k")]
    From50kTo100k,
    #[serde(rename = "$100k to $500k")]
    From100kTo500k,
    #[serde(rename = ">= $500k")]
    AtLeast500k,
}

/// Exclusive upper bounds of every bin but the last, paired with the bin.
const BIN_UPPER_BOUNDS: [(u64, DonationBin); 7] = [
    (500, DonationBin::Under500),
    (1_000, DonationBin::From500To1k),
    (5_000, DonationBin::From1kTo5k),
    (10_000, DonationBin::From5kTo10k),
    (50_000, DonationBin::From10kTo50k),
    (100_000, DonationBin::From50kTo100k),
    (500_000, DonationBin::From100kTo500k),
];

impl DonationBin {
    pub const ALL: [DonationBin; 8] = [
        DonationBin::Under500,
        DonationBin::From500To1k,
        DonationBin::From1kTo5k,
        DonationBin::From5kTo10k,
        DonationBin::From10kTo50k,
        DonationBin::From50kTo100k,
        DonationBin::From100kTo500k,
        DonationBin::AtLeast500k,
    ];

    /// Range label shown in the amount pie chart.
    pub fn label(&self) -> &'static str {
        match self {
            DonationBin::Under500 => "< $500",
            DonationBin::From500To1k => "$500 to $1k",
            DonationBin::From1kTo5k => "$1k to $5k",
            DonationBin::From5kTo10k => "$5k to $10k",
            DonationBin::From10kTo50k => "$10k to $50k",
            DonationBin::From50kTo100k => "$50k to $100k",
            DonationBin::From100kTo500k => "$100k to $500k",
            DonationBin::AtLeast500k => ">= $500k",
        }
    }
}

impl fmt::Display for DonationBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bin a cleaned donation amount. First matching range wins.
pub fn bin_donation(amount: u64) -> DonationBin {
    BIN_UPPER_BOUNDS
        .iter()
        .find(|(upper, _)| amount < *upper)
        .map(|(_, bin)| *bin)
        .unwrap_or(DonationBin::AtLeast500k)
}

/// A cleaned donation. After expansion `team` and `league` hold one value each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRecord {
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
    #[serde(rename = "DonationBin")]
    pub donation_bin: DonationBin,
}

/// An owned, ordered set of donation records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DonationTable {
    rows: Vec<DonationRecord>,
}

impl DonationTable {
    /// Wrap rows in their current order.
    pub fn new(rows: Vec<DonationRecord>) -> Self {
        Self { rows }
    }

    /// Get the rows as a slice.
    pub fn rows(&self) -> &[DonationRecord] {
        &self.rows
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, DonationRecord> {
        self.rows.iter()
    }

    /// Get every row's donation amount, in row order.
    pub fn amounts(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.amount).collect()
    }

    /// New table holding clones of the rows matching `predicate`.
    pub fn select<F>(&self, predicate: F) -> DonationTable
    where
        F: Fn(&DonationRecord) -> bool,
    {
        DonationTable {
            rows: self.rows.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }
}

impl FromIterator<DonationRecord> for DonationTable {
    fn from_iter<I: IntoIterator<Item = DonationRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DonationTable {
    type Item = &'a DonationRecord;
    type IntoIter = std::slice::Iter<'a, DonationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Either every value, or one concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Selection<T> {
    /// The concrete value, or `None` for `All`.
    pub fn as_only(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }

    /// True for the `All` sentinel.
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("All"),
            Selection::Only(value) => value.fmt(f),
        }
    }
}
