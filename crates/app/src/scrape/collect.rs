use tracing::{debug, info};

use crate::scrape::ScrapeError;
use crate::state::AppState;
use driftnet_core::domain::PostRecord;
use driftnet_core::types::{Community, EpochBounds, ResolvedRange};

pub struct Collected {
    pub records: Vec<PostRecord>,
    pub pages: usize,
    pub fetched: usize,
}

#[derive(Debug, PartialEq, Eq)]
enum PageOutcome {
    Continue,
    Stop,
}

/// Walk the archive listing newest-to-oldest, retaining records whose
/// creation time falls inside the window, until the cap is hit, a record
/// falls below the lower bound, or the listing runs dry.
pub async fn collect(
    state: &AppState,
    community: &Community,
    range: &ResolvedRange,
    cap: Option<usize>,
) -> Result<Collected, ScrapeError> {
    let bounds = range.epoch_bounds();
    // The server treats `after` as exclusive; step one below the bound so
    // posts made exactly at the window start are returned.
    let after = bounds.start - 1;
    let mut before = bounds.end_exclusive;

    let mut records = Vec::new();
    let mut pages = 0;
    let mut fetched = 0;

    loop {
        let page = state.archive.fetch_page(community, before, after).await?;
        if page.is_empty() {
            debug!(community = %community, "listing exhausted");
            break;
        }
        pages += 1;
        fetched += page.len();
        let oldest = page.last().map(|post| post.created_utc);

        let outcome = retain_page(&mut records, page, bounds, cap);
        info!(
            community = %community,
            page = pages,
            retained = records.len(),
            "page collected"
        );
        if outcome == PageOutcome::Stop {
            break;
        }
        // Descending cursor; a page that fails to move it would loop forever.
        match oldest.and_then(|oldest| advance_cursor(before, oldest)) {
            Some(next) => before = next,
            None => break,
        }
    }

    Ok(Collected {
        records,
        pages,
        fetched,
    })
}

/// Append a page's in-window records in listed order. Stops the run at the
/// first record older than the window (the listing is descending) or once
/// the cap is exactly reached; records at or past the upper bound are
/// skipped, not fatal.
fn retain_page(
    records: &mut Vec<PostRecord>,
    page: Vec<PostRecord>,
    bounds: EpochBounds,
    cap: Option<usize>,
) -> PageOutcome {
    for post in page {
        if cap_reached(cap, records.len()) {
            return PageOutcome::Stop;
        }
        if post.created_utc < bounds.start {
            return PageOutcome::Stop;
        }
        if !bounds.contains(post.created_utc) {
            continue;
        }
        records.push(post);
    }
    if cap_reached(cap, records.len()) {
        PageOutcome::Stop
    } else {
        PageOutcome::Continue
    }
}

fn cap_reached(cap: Option<usize>, collected: usize) -> bool {
    cap.is_some_and(|cap| collected >= cap)
}

fn advance_cursor(before: i64, oldest: i64) -> Option<i64> {
    (oldest < before).then_some(oldest)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{PageOutcome, advance_cursor, retain_page};
    use driftnet_core::domain::PostRecord;
    use driftnet_core::types::EpochBounds;

    fn post(id: &str, created_utc: i64) -> PostRecord {
        serde_json::from_value(json!({"id": id, "created_utc": created_utc})).unwrap()
    }

    fn bounds(start: i64, end_exclusive: i64) -> EpochBounds {
        EpochBounds {
            start,
            end_exclusive,
        }
    }

    #[test]
    fn retains_exactly_the_window_members() {
        let mut records = Vec::new();
        let page = vec![
            post("too_new", 500),
            post("newest", 399),
            post("oldest", 100),
            post("too_old", 99),
        ];
        let outcome = retain_page(&mut records, page, bounds(100, 400), None);
        assert_eq!(outcome, PageOutcome::Stop);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["newest", "oldest"]);
    }

    #[test]
    fn preserves_listing_order() {
        let mut records = Vec::new();
        let page = vec![post("a", 300), post("b", 250), post("c", 200)];
        let outcome = retain_page(&mut records, page, bounds(0, 1_000), None);
        assert_eq!(outcome, PageOutcome::Continue);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn stops_at_first_record_below_window() {
        let mut records = Vec::new();
        let page = vec![post("in", 200), post("below", 50), post("never_seen", 300)];
        let outcome = retain_page(&mut records, page, bounds(100, 400), None);
        assert_eq!(outcome, PageOutcome::Stop);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn cap_truncates_exactly() {
        let mut records = Vec::new();
        let page = vec![post("a", 300), post("b", 250), post("c", 200)];
        let outcome = retain_page(&mut records, page, bounds(0, 1_000), Some(2));
        assert_eq!(outcome, PageOutcome::Stop);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn cap_spans_pages() {
        let mut records = Vec::new();
        let first = vec![post("a", 300), post("b", 250)];
        let second = vec![post("c", 200), post("d", 150)];
        assert_eq!(
            retain_page(&mut records, first, bounds(0, 1_000), Some(3)),
            PageOutcome::Continue
        );
        assert_eq!(
            retain_page(&mut records, second, bounds(0, 1_000), Some(3)),
            PageOutcome::Stop
        );
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn cursor_must_strictly_decrease() {
        assert_eq!(advance_cursor(400, 300), Some(300));
        assert_eq!(advance_cursor(300, 300), None);
        assert_eq!(advance_cursor(300, 400), None);
    }
}
