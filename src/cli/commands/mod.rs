pub mod config;
pub mod directory;
pub mod employee;
pub mod init;
pub mod log;
pub mod punch;
pub mod report;

use crate::config::Config;
use crate::core::ledger::Ledger;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database behind a ledger.
pub(crate) fn open_ledger(cfg: &Config) -> AppResult<Ledger<DbPool>> {
    Ok(Ledger::new(DbPool::new(&cfg.database)?))
}
