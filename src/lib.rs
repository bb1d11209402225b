// Tally - Core Library
// Record store, aggregates and CSV persistence, plus the interactive shell programs

pub mod entities;
pub mod error;
pub mod store;
pub mod aggregate;
pub mod persistence;
pub mod config;
pub mod input;
pub mod calculator;
pub mod shell;

// Re-export commonly used types
pub use entities::{Measurement, Owner, Tags, OWNER_HEADER};
pub use error::{AggregateError, RecordError, StoreError};
pub use store::{Checkpoint, RecordStore, Selector};
pub use aggregate::{
    all_group_stats, extremum, group_stats, mean, mean_or_zero, owner_mean,
    GroupStats, Pick, Standing,
};
pub use persistence::{
    load_measurements, load_owners, save_measurements, save_owners,
    Layout, Ledger,
};
pub use config::{AppConfig, FileSet};
pub use input::{parse_integer, parse_number, InputError, ValueRule};
pub use calculator::{quote_loan, CalcError, LoanQuote, LoanTerms, Operation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
