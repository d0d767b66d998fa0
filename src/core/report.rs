use crate::core::clock::Clock;
use crate::core::directory::Directory;
use crate::core::ledger::Ledger;
use crate::core::store::{PunchStore, RangeQuery};
use crate::errors::AppResult;
use crate::export::render::Report;

/// Fetch one snapshot from the ledger and wrap it for rendering.
///
/// The ledger lock is only held while the snapshot is read.
pub fn build_report<S, C>(ledger: &Ledger<S, C>, query: &RangeQuery, title: &str) -> AppResult<Report>
where
    S: Directory + PunchStore,
    C: Clock,
{
    let records = ledger.snapshot(query)?;
    Ok(Report::new(title, records))
}
