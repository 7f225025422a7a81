//! Cursor walk over the paginated history lookup.

use crate::{
    errors::Error,
    models::location::LocationRequest,
    providers::{ExtraComputation, HistoryPage, HistoryQuery, LookupProvider},
};

/// Extra values requested with every history page.
pub const HISTORY_EXTRA_COMPUTATIONS: [ExtraComputation; 2] = [
    ExtraComputation::DominantPollutantConcentration,
    ExtraComputation::PollutantConcentration,
];

/// A finite, single-use walk over history pages.
///
/// Pages are requested strictly one after another since each call needs the previous
/// page's cursor. The walk ends once the requested hours are covered, or earlier when
/// the upstream stops handing out cursors.
pub struct HistoryPages<'a> {
    provider: &'a dyn LookupProvider,
    latitude: f64,
    longitude: f64,
    page_size: u32,
    window_hours: u32,
    remaining: i64,
    cursor: String,
    pages_fetched: usize,
    exhausted: bool,
}

impl<'a> HistoryPages<'a> {
    pub fn new(
        provider: &'a dyn LookupProvider,
        request: &LocationRequest,
        hours: u32,
        page_size: u32,
    ) -> Self {
        Self {
            provider,
            latitude: request.latitude,
            longitude: request.longitude,
            page_size,
            window_hours: hours,
            remaining: i64::from(hours),
            cursor: String::new(),
            pages_fetched: 0,
            exhausted: false,
        }
    }

    /// Hours still owed. Zero or negative once the window is covered.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetches the next page, or `None` when the walk is over.
    ///
    /// Errors:
    /// - [`Error::Upstream`] when the provider call fails
    /// - [`Error::EmptyPage`] when the provider returns no buckets while hours remain
    pub async fn next_page(&mut self) -> Result<Option<HistoryPage>, Error> {
        if self.exhausted || self.remaining <= 0 {
            return Ok(None);
        }

        let query = HistoryQuery {
            latitude: self.latitude,
            longitude: self.longitude,
            extra_computations: HISTORY_EXTRA_COMPUTATIONS.to_vec(),
            // remaining is in 1..=u32::MAX here since it started from a u32 and only shrinks
            hours: u32::try_from(self.remaining).unwrap_or(u32::MAX),
            window_hours: self.window_hours,
            page_token: self.cursor.clone(),
            page_size: self.page_size,
        };

        let page = match self.provider.lookup_history(&query).await {
            Ok(page) => page,
            Err(e) => {
                self.exhausted = true;
                return Err(Error::Upstream(e));
            }
        };

        if page.buckets.is_empty() {
            self.exhausted = true;
            return Err(Error::EmptyPage {
                remaining: self.remaining,
            });
        }

        self.pages_fetched += 1;
        self.remaining -= page.buckets.len() as i64;
        tracing::debug!(
            page = self.pages_fetched,
            buckets = page.buckets.len(),
            remaining = self.remaining,
            "history page"
        );

        if self.remaining > 0 && page.next_page_token.is_empty() {
            tracing::debug!(
                remaining = self.remaining,
                "upstream has no further history, window is shorter than requested"
            );
            self.exhausted = true;
        }
        self.cursor = page.next_page_token.clone();

        Ok(Some(page))
    }
}
