use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::scrape::ScrapeError;
use driftnet_core::domain::PostRecord;
use driftnet_infra::reddit::{INFO_CHUNK_SIZE, LivePost, RedditClient};

/// Overwrite volatile fields on the collected records from the live API,
/// chunked to the info endpoint's fullname limit. Records the live API no
/// longer returns (deleted posts) keep their archived values. Returns how
/// many records were refreshed.
pub async fn refresh(
    client: &RedditClient,
    records: &mut [PostRecord],
) -> Result<usize, ScrapeError> {
    let mut refreshed = 0;
    for chunk in records.chunks_mut(INFO_CHUNK_SIZE) {
        let fullnames: Vec<String> = chunk.iter().map(PostRecord::fullname).collect();
        let live = client.fetch_info(&fullnames).await?;
        refreshed += apply_live(chunk, live);
    }
    debug!(refreshed, total = records.len(), "live refresh applied");
    Ok(refreshed)
}

fn apply_live(records: &mut [PostRecord], live: Vec<LivePost>) -> usize {
    let mut by_id: HashMap<String, Map<String, Value>> = live
        .into_iter()
        .map(|post| (post.id, post.fields))
        .collect();
    let mut refreshed = 0;
    for record in records.iter_mut() {
        if let Some(fields) = by_id.remove(&record.id) {
            record.apply_live_fields(&fields);
            refreshed += 1;
        }
    }
    refreshed
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::apply_live;
    use driftnet_core::domain::PostRecord;
    use driftnet_infra::reddit::LivePost;

    fn record(id: &str, score: i64) -> PostRecord {
        serde_json::from_value(json!({
            "id": id,
            "created_utc": 0,
            "score": score
        }))
        .unwrap()
    }

    fn live(id: &str, score: i64) -> LivePost {
        let Value::Object(fields) = json!({"id": id, "score": score}) else {
            unreachable!()
        };
        LivePost {
            id: id.to_string(),
            fields,
        }
    }

    #[test]
    fn matches_records_by_id() {
        let mut records = vec![record("aaa", 1), record("bbb", 2)];
        let refreshed = apply_live(&mut records, vec![live("bbb", 99), live("aaa", 50)]);
        assert_eq!(refreshed, 2);
        assert_eq!(records[0].fields["score"], json!(50));
        assert_eq!(records[1].fields["score"], json!(99));
    }

    #[test]
    fn deleted_posts_keep_archived_values() {
        let mut records = vec![record("aaa", 1), record("gone", 7)];
        let refreshed = apply_live(&mut records, vec![live("aaa", 50)]);
        assert_eq!(refreshed, 1);
        assert_eq!(records[1].fields["score"], json!(7));
    }
}
