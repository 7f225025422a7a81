//! The history aggregation pipeline.
//!
//! 1. [`location::resolve_location`]: geocode + allow-list gate
//! 2. [`normalize::normalize`] and [`normalize::hours_for`]: request repair, window size
//! 3. [`fetch::HistoryPages`]: sequential cursor walk over the lookup provider
//! 4. [`aggregate::RunningAggregate::fold`]: per-page accumulation
//! 5. [`summary::summarize`]: averages and percentage change
//!
//! [`aggregate_history`] runs steps 3 and 4 as an explicit fold.

pub mod aggregate;
pub mod fetch;
pub mod location;
pub mod normalize;
pub mod summary;

use crate::{
    errors::Error,
    models::location::LocationRequest,
    pipeline::{aggregate::RunningAggregate, fetch::HistoryPages},
    providers::LookupProvider,
};

/// Walks every history page for `hours` and folds the buckets.
///
/// A zero-hour window makes no upstream call and yields an empty aggregate. Any page
/// failure drops whatever was accumulated so far.
pub async fn aggregate_history(
    provider: &dyn LookupProvider,
    request: &LocationRequest,
    hours: u32,
    page_size: u32,
) -> Result<RunningAggregate, Error> {
    let mut pages = HistoryPages::new(provider, request, hours, page_size);
    let mut aggregate = RunningAggregate::default();

    while let Some(page) = pages.next_page().await? {
        aggregate = aggregate.fold(&page.buckets);
    }

    tracing::debug!(
        pages = pages.pages_fetched(),
        buckets = aggregate.buckets_seen(),
        "history aggregated"
    );
    Ok(aggregate)
}
