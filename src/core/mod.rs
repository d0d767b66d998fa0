pub mod aggregator;
pub mod clock;
pub mod config;
pub mod directory;
pub mod import;
pub mod ledger;
pub mod log;
pub mod report;
pub mod store;
