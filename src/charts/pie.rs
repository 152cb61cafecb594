//! Pie Chart Data Module
//! Turns frequency tables into donut-chart slices with the dashboard's fixed colours.

use crate::data::{DonationBin, Party};
use crate::stats::FrequencyEntry;
use serde::Serialize;

/// Inner hole radius as a fraction of the outer radius.
pub const DONUT_HOLE: f64 = 0.4;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Lower-case `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

const ROYAL_BLUE: Rgb = Rgb(65, 105, 225);
const TOMATO: Rgb = Rgb(255, 99, 71);
const VIOLET: Rgb = Rgb(238, 130, 238);
const MEDIUM_SEA_GREEN: Rgb = Rgb(60, 179, 113);
const ORANGE: Rgb = Rgb(255, 165, 0);
const YELLOW_GREEN: Rgb = Rgb(154, 205, 50);
const LIGHT_GREEN: Rgb = Rgb(144, 238, 144);
const PINK: Rgb = Rgb(255, 192, 203);

/// Something that owns a fixed slice colour.
pub trait SliceColor {
    fn slice_color(&self) -> Rgb;
}

impl SliceColor for Party {
    fn slice_color(&self) -> Rgb {
        match self {
            Party::Democrat => ROYAL_BLUE,
            Party::Republican => TOMATO,
            Party::Bipartisan => VIOLET,
            Party::Independent => MEDIUM_SEA_GREEN,
            Party::Unclassified => ORANGE,
        }
    }
}

impl SliceColor for DonationBin {
    fn slice_color(&self) -> Rgb {
        match self {
            DonationBin::Under500 => YELLOW_GREEN,
            DonationBin::From500To1k => ORANGE,
            DonationBin::From1kTo5k => ROYAL_BLUE,
            DonationBin::From5kTo10k => TOMATO,
            DonationBin::From10kTo50k => MEDIUM_SEA_GREEN,
            DonationBin::From50kTo100k => VIOLET,
            DonationBin::From100kTo500k => LIGHT_GREEN,
            DonationBin::AtLeast500k => PINK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Fraction of the whole pie, in [0, 1].
    pub share: f64,
    pub color: Rgb,
}

/// Chart-ready data for one donut chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub hole: f64,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// One slice per frequency entry, in the entries' order.
    pub fn from_counts<K>(title: impl Into<String>, counts: &[FrequencyEntry<K>]) -> Self
    where
        K: SliceColor + std::fmt::Display,
    {
        let total: usize = counts.iter().map(|e| e.count).sum();
        let slices = counts
            .iter()
            .map(|entry| PieSlice {
                label: entry.label.to_string(),
                count: entry.count,
                share: if total == 0 {
                    0.0
                } else {
                    entry.count as f64 / total as f64
                },
                color: entry.label.slice_color(),
            })
            .collect();

        Self {
            title: title.into(),
            hole: DONUT_HOLE,
            slices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_party_pie() {
        let counts = vec![
            FrequencyEntry { label: Party::Republican, count: 3 },
            FrequencyEntry { label: Party::Democrat, count: 1 },
        ];
        let pie = PieChart::from_counts("Donations By Party", &counts);

        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.slices[0].label, "Republican");
        assert_eq!(pie.slices[0].color.to_hex(), "#ff6347");
        assert_relative_eq!(pie.slices[0].share, 0.75);
        assert_relative_eq!(pie.slices[1].share, 0.25);
        assert_relative_eq!(pie.hole, 0.4);
    }

    #[test]
    fn test_bin_pie_labels_and_colors() {
        let counts = vec![FrequencyEntry { label: DonationBin::AtLeast500k, count: 2 }];
        let pie = PieChart::from_counts("Donations By Amount", &counts);
        assert_eq!(pie.slices[0].label, ">= $500k");
        assert_eq!(pie.slices[0].color, PINK);
        assert_relative_eq!(pie.slices[0].share, 1.0);
    }

    #[test]
    fn test_empty_pie() {
        let pie = PieChart::from_counts::<Party>("Donations By Party", &[]);
        assert!(pie.slices.is_empty());
    }
}
