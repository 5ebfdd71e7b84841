use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use serde::Serialize;

use super::node::Node;
use crate::parsing::text::slug;

/// A parsed tutorial: metadata plus its ordered steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub id: String,
    pub steps: Vec<Step>,
    /// Sum of declared step durations.
    #[serde(serialize_with = "as_minutes")]
    pub duration: Duration,
    pub authors: String,
    pub summary: String,
    pub categories: BTreeSet<String>,
    /// Environments and free-form tags, lowercase.
    pub tags: BTreeSet<String>,
    pub status: Vec<String>,
    pub feedback: String,
    pub analytics: String,
    pub badge_path: String,
    /// Allow-listed metadata keys passed through verbatim.
    pub extra: BTreeMap<String, String>,
}

impl Document {
    /// Total duration in whole minutes.
    pub fn minutes(&self) -> u64 {
        self.duration.as_secs() / 60
    }
}

/// One section of a document, opened by a level-2 heading.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Step {
    pub title: String,
    pub content: Vec<Node>,
    pub tags: BTreeSet<String>,
    #[serde(serialize_with = "as_minutes")]
    pub duration: Duration,
}

impl Step {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// URL-friendly identifier derived from the title.
    pub fn anchor(&self) -> String {
        slug(&self.title)
    }
}

fn as_minutes<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_secs() / 60)
}
