//! Table Filters
//! Pure selections over a donation table. Every filter returns a new table.

use super::processor::title_case;
use super::record::{DonationRecord, DonationTable, Selection};
use log::debug;
use std::collections::BTreeSet;
use std::fmt::Display;

/// Keep rows matching the concrete parts of the year/league selection.
pub fn filter_by_year_and_league(
    table: &DonationTable,
    year: Selection<i32>,
    league: Selection<&str>,
) -> DonationTable {
    if year.is_all() && league.is_all() {
        return table.clone();
    }

    let filtered = table.select(|r| {
        let year_ok = year.as_only().map_or(true, |y| r.election_year == *y);
        let league_ok = league
            .as_only()
            .map_or(true, |l| r.league.as_deref() == Some(*l));
        year_ok && league_ok
    });

    debug!(
        "Year {} / league {} filter kept {} of {} rows",
        year,
        league,
        filtered.len(),
        table.len()
    );
    filtered
}

fn field_contains(field: &Option<String>, needle: &str) -> bool {
    field.as_deref().is_some_and(|value| value.contains(needle))
}

/// Keep rows whose owner, team or recipient contains `query`.
///
/// The query is title-cased first so it lines up with the title-cased
/// stored columns. Missing values never match.
pub fn filter_by_search(table: &DonationTable, query: &str) -> DonationTable {
    let needle = title_case(query);
    table.select(|r: &DonationRecord| {
        field_contains(&r.owner, &needle)
            || field_contains(&r.team, &needle)
            || field_contains(&r.recipient, &needle)
    })
}

/// Describe the active selection, e.g. "Donations Overview for NBA in 2016".
pub fn make_header_str<Y: Display, L: Display>(
    base: &str,
    year: &Selection<Y>,
    league: &Selection<L>,
) -> String {
    let mut header = base.to_string();
    if let Selection::Only(league) = league {
        header.push_str(&format!(" for {}", league));
    }
    if let Selection::Only(year) = year {
        header.push_str(&format!(" in {}", year));
    }
    header
}

/// Distinct election years, ascending.
pub fn election_years(table: &DonationTable) -> Vec<i32> {
    table
        .iter()
        .map(|r| r.election_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct leagues in order of first appearance.
pub fn leagues(table: &DonationTable) -> Vec<String> {
    let mut seen = Vec::new();
    for league in table.iter().filter_map(|r| r.league.as_deref()) {
        if !seen.iter().any(|s: &String| s == league) {
            seen.push(league.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::{DonationBin, Party};

    fn record(owner: &str, team: &str, league: &str, year: i32) -> DonationRecord {
        DonationRecord {
            owner: Some(owner.to_string()),
            team: Some(team.to_string()),
            league: Some(league.to_string()),
            recipient: Some("Jane Smith".to_string()),
            amount: 1000,
            election_year: year,
            party: Party::Democrat,
            donation_bin: DonationBin::From1kTo5k,
        }
    }

    fn sample() -> DonationTable {
        DonationTable::new(vec![
            record("John Doe", "Lakers", "NBA", 2016),
            record("John Doe", "Dodgers", "MLB", 2016),
            record("Mary Major", "Jets", "NFL", 2018),
            record("Mary Major", "Nets", "NBA", 2018),
        ])
    }

    #[test]
    fn test_all_all_is_identity() {
        let table = sample();
        assert_eq!(
            filter_by_year_and_league(&table, Selection::All, Selection::All),
            table
        );
    }

    #[test]
    fn test_filter_by_year_only() {
        let filtered = filter_by_year_and_league(&sample(), Selection::Only(2016), Selection::All);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.election_year == 2016));
    }

    #[test]
    fn test_filter_by_league_only() {
        let filtered = filter_by_year_and_league(&sample(), Selection::All, Selection::Only("NBA"));
        let teams: Vec<_> = filtered.iter().filter_map(|r| r.team.as_deref()).collect();
        assert_eq!(teams, vec!["Lakers", "Nets"]);
    }

    #[test]
    fn test_filter_by_year_and_league_both() {
        let filtered =
            filter_by_year_and_league(&sample(), Selection::Only(2018), Selection::Only("NBA"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows()[0].team.as_deref(), Some("Nets"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let table = sample();
        let lower = filter_by_search(&table, "smith");
        let upper = filter_by_search(&table, "SMITH");
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), 4);
    }

    #[test]
    fn test_search_matches_any_field() {
        let table = sample();
        assert_eq!(filter_by_search(&table, "mary").len(), 2);
        assert_eq!(filter_by_search(&table, "jets").len(), 1);
        assert_eq!(filter_by_search(&table, "nobody").len(), 0);
    }

    #[test]
    fn test_search_skips_missing_values() {
        let mut blank = record("x", "x", "NBA", 2016);
        blank.owner = None;
        blank.team = None;
        blank.recipient = None;
        let table = DonationTable::new(vec![blank]);

        assert!(filter_by_search(&table, "").is_empty());
    }

    #[test]
    fn test_make_header_str() {
        assert_eq!(
            make_header_str("Donations Overview", &Selection::Only(2016), &Selection::Only("NBA")),
            "Donations Overview for NBA in 2016"
        );
        assert_eq!(
            make_header_str("Donations Overview", &Selection::<i32>::All, &Selection::Only("NFL")),
            "Donations Overview for NFL"
        );
        assert_eq!(
            make_header_str("Donations Overview", &Selection::Only(2018), &Selection::<&str>::All),
            "Donations Overview in 2018"
        );
        assert_eq!(
            make_header_str("Donations Overview", &Selection::<i32>::All, &Selection::<&str>::All),
            "Donations Overview"
        );
    }

    #[test]
    fn test_option_lists() {
        let table = sample();
        assert_eq!(election_years(&table), vec![2016, 2018]);
        assert_eq!(leagues(&table), vec!["NBA", "MLB", "NFL"]);
    }
}
