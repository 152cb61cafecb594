//! Statistics Calculator Module
//! Summary cards and frequency tables for a donation table.

use crate::data::{DonationBin, DonationTable, Party};
use serde::Serialize;
use statrs::statistics::{Data, Median};
use std::collections::BTreeMap;

/// Figures shown on the summary cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmountStats {
    pub count: usize,
    /// Widened so any number of accepted `u64` amounts sums without overflow.
    pub total: u128,
    /// `None` for an empty selection.
    pub median: Option<f64>,
    /// Smallest of the most frequent amounts; `None` for an empty selection.
    pub mode: Option<u64>,
}

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry<K> {
    pub label: K,
    pub count: usize,
}

/// Handles statistical calculations over donation amounts and categories.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute count, sum, median and mode of the donation amounts.
    pub fn compute_amount_stats(table: &DonationTable) -> AmountStats {
        let amounts = table.amounts();
        AmountStats {
            count: amounts.len(),
            total: amounts.iter().map(|&a| u128::from(a)).sum(),
            median: Self::median(&amounts),
            mode: Self::mode(&amounts),
        }
    }

    fn median(amounts: &[u64]) -> Option<f64> {
        if amounts.is_empty() {
            return None;
        }
        let values: Vec<f64> = amounts.iter().map(|&a| a as f64).collect();
        Some(Data::new(values).median())
    }

    fn mode(amounts: &[u64]) -> Option<u64> {
        let counts = Self::count_by(amounts.iter().copied());
        // BTreeMap iterates ascending, so ties keep the smallest amount
        counts
            .into_iter()
            .fold(None, |best: Option<(u64, usize)>, (amount, n)| match best {
                Some((_, best_n)) if best_n >= n => best,
                _ => Some((amount, n)),
            })
            .map(|(amount, _)| amount)
    }

    fn count_by<K: Ord>(keys: impl Iterator<Item = K>) -> BTreeMap<K, usize> {
        let mut counts = BTreeMap::new();
        for key in keys {
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }

    /// Frequency table ordered by count descending, ties in key order.
    /// Keys that never occur are left out.
    pub fn value_counts<K: Ord + Copy>(keys: impl Iterator<Item = K>) -> Vec<FrequencyEntry<K>> {
        let mut entries: Vec<FrequencyEntry<K>> = Self::count_by(keys)
            .into_iter()
            .map(|(label, count)| FrequencyEntry { label, count })
            .collect();
        // Stable sort keeps the ascending key order among equal counts
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }

    /// Frequency table of canonical parties.
    pub fn party_counts(table: &DonationTable) -> Vec<FrequencyEntry<Party>> {
        Self::value_counts(table.iter().map(|r| r.party))
    }

    /// Frequency table of donation amount bins.
    pub fn bin_counts(table: &DonationTable) -> Vec<FrequencyEntry<DonationBin>> {
        Self::value_counts(table.iter().map(|r| r.donation_bin))
    }
}
