use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::types::FieldFilter;

/// Fields that go stale in the archive and can be overwritten from the live
/// platform API after collection.
pub const VOLATILE_FIELDS: [&str; 10] = [
    "locked",
    "num_comments",
    "num_crossposts",
    "over_18",
    "pinned",
    "score",
    "selftext",
    "spoiler",
    "stickied",
    "subreddit_subscribers",
];

/// A single post as returned by the archive listing. The attributes the
/// pipeline needs are typed; everything else rides along verbatim in
/// `fields` so the record serializes back to the source object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    #[serde(deserialize_with = "epoch_seconds")]
    pub created_utc: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PostRecord {
    /// Platform fullname of a submission, the form the live info endpoint
    /// expects.
    pub fn fullname(&self) -> String {
        format!("t3_{}", self.id)
    }

    /// Flatten the record to an output object, keeping only whitelisted keys
    /// when a filter is given. `id` and `created_utc` count as ordinary keys
    /// for filtering purposes.
    pub fn to_output_value(&self, filter: Option<&FieldFilter>) -> Value {
        let allows = |key: &str| filter.is_none_or(|f| f.allows(key));
        let mut object = Map::new();
        if allows("id") {
            object.insert("id".to_string(), Value::String(self.id.clone()));
        }
        if allows("created_utc") {
            object.insert("created_utc".to_string(), Value::from(self.created_utc));
        }
        for (key, value) in &self.fields {
            if allows(key) {
                object.insert(key.clone(), value.clone());
            }
        }
        Value::Object(object)
    }

    /// Overwrite volatile fields from a live API object. Only keys already
    /// present on the record are touched.
    pub fn apply_live_fields(&mut self, live: &Map<String, Value>) {
        for key in VOLATILE_FIELDS {
            if !self.fields.contains_key(key) {
                continue;
            }
            if let Some(value) = live.get(key) {
                self.fields.insert(key.to_string(), value.clone());
            }
        }
    }
}

/// The archive emits creation times as integral or fractional epoch seconds;
/// accept both, truncating toward zero.
fn epoch_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Number(number) = &value else {
        return Err(serde::de::Error::custom(format!(
            "created_utc is not a number: {value}"
        )));
    };
    if let Some(seconds) = number.as_i64() {
        return Ok(seconds);
    }
    number
        .as_f64()
        .map(|seconds| seconds as i64)
        .ok_or_else(|| serde::de::Error::custom(format!("created_utc out of range: {number}")))
}
