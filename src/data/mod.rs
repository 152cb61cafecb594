//! Data module - CSV loading, cleaning and filtering

mod filter;
mod loader;
mod processor;
mod record;

pub use filter::{
    election_years, filter_by_search, filter_by_year_and_league, leagues, make_header_str,
};
pub use loader::{DataLoader, DataSource, LoaderError, REQUIRED_COLUMNS};
pub use processor::{
    is_negative_amount, parse_amount, title_case, DataProcessor, ProcessorError,
};
pub use record::{
    bin_donation, DonationBin, DonationRecord, DonationTable, Party, RawDonation, Selection,
};
