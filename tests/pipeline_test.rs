//! Integration tests for the load -> clean -> explode -> filter pipeline

use sports_donations::data::{
    filter_by_search, filter_by_year_and_league, make_header_str, DataLoader, DataProcessor,
    DonationBin, Party, ProcessorError,
};
use sports_donations::{Dataset, Selection};

const CSV: &str = "\
Owner,Team,League,Recipient,Amount,Election Year,Party
john doe,\"Lakers, Dodgers\",\"NBA, MLB\",jane smith,\"$1,500\",2016,
mary major,Jets,NFL,WINRED,\"$2,800\",2018,Republican
Mary Major,Jets,NFL,ActBlue,$500,2018,\"Bipartisan, but mostly Democratic\"
";

fn dataset_from(csv: &str) -> Result<Dataset, ProcessorError> {
    let df = DataLoader::parse_csv_bytes(csv.as_bytes().to_vec()).unwrap();
    let rows = DataLoader::extract_rows(&df).unwrap();
    Dataset::from_raw(&rows)
}

#[test]
fn test_end_to_end_explodes_multi_team_owner() {
    let data = dataset_from(CSV).unwrap();
    let john: Vec<_> = data
        .by_league
        .iter()
        .filter(|r| r.owner.as_deref() == Some("John Doe"))
        .collect();

    assert_eq!(john.len(), 2);
    for (record, (team, league)) in john.iter().zip([("Lakers", "NBA"), ("Dodgers", "MLB")]) {
        assert_eq!(record.team.as_deref(), Some(team));
        assert_eq!(record.league.as_deref(), Some(league));
        assert_eq!(record.recipient.as_deref(), Some("Jane Smith"));
        assert_eq!(record.amount, 1500);
        assert_eq!(record.donation_bin, DonationBin::From1kTo5k);
        assert_eq!(record.party, Party::Unclassified);
        assert_eq!(record.election_year, 2016);
    }
}

#[test]
fn test_year_filter_keeps_only_that_year() {
    let data = dataset_from(CSV).unwrap();
    let filtered = filter_by_year_and_league(&data.by_league, Selection::Only(2016), Selection::All);
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|r| r.election_year == 2016));
}

#[test]
fn test_search_matches_title_cased_recipient() {
    let data = dataset_from(CSV).unwrap();
    assert_eq!(filter_by_search(&data.donations, "winred").len(), 1);
    assert_eq!(filter_by_search(&data.donations, "MARY").len(), 2);
}

#[test]
fn test_header() {
    assert_eq!(
        make_header_str("Donations Overview", &Selection::Only(2016), &Selection::Only("NBA")),
        "Donations Overview for NBA in 2016"
    );
}

#[test]
fn test_view_json_uses_column_labels() {
    let data = dataset_from(CSV).unwrap();
    let view = data.view(Selection::Only(2018), Selection::Only("NFL"), "");
    let json: serde_json::Value = serde_json::from_str(&view.to_json().unwrap()).unwrap();

    assert_eq!(json["stats"]["count"], 2);
    assert_eq!(json["stats"]["total"], 3300);
    assert_eq!(json["rows"][0]["Election Year"], 2018);
    assert_eq!(json["rows"][0]["Recipient"], "Winred");
    assert_eq!(json["bin_counts"][0]["label"], "$500 to $1k");
    assert_eq!(json["party_pie"]["title"], "Donations By Party for NFL in 2018");
}

#[test]
fn test_integrity_errors_fail_fast() {
    let bad_party = "Owner,Team,League,Recipient,Amount,Election Year,Party\na,b,NBA,c,$1,2016,Whig\n";
    assert!(matches!(
        dataset_from(bad_party),
        Err(ProcessorError::UnrecognizedParty { row: 1, .. })
    ));

    let mismatched = "Owner,Team,League,Recipient,Amount,Election Year,Party\na,\"b, c\",NBA,d,$1,2016,\n";
    assert!(matches!(
        dataset_from(mismatched),
        Err(ProcessorError::MismatchedMultiValueFields { row: 1, teams: 2, leagues: 1 })
    ));

    let no_digits = "Owner,Team,League,Recipient,Amount,Election Year,Party\na,b,NBA,c,unknown,2016,\n";
    assert!(matches!(
        dataset_from(no_digits),
        Err(ProcessorError::MalformedAmount { row: 1, .. })
    ));
}

#[test]
fn test_expansion_preserves_amount_per_pair() {
    let data = dataset_from(CSV).unwrap();
    let original = DataProcessor::expand(&data.donations).unwrap();
    assert_eq!(original, data.by_league);

    let john_total: u64 = data
        .by_league
        .iter()
        .filter(|r| r.owner.as_deref() == Some("John Doe"))
        .map(|r| r.amount)
        .sum();
    assert_eq!(john_total, 1500 * 2);
}
