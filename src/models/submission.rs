use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::file_record::FileRecord;
use super::file_store::FileStore;

pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Snapshot of the whole file collection taken at deployment time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub lab_name: String,
    #[serde(default)]
    pub author_name: String,
    pub timestamp: DateTime<Utc>,
    pub files: Vec<(String, FileRecord)>,
}

impl Submission {
    pub fn capture(lab_name: &str, author_name: &str, store: &FileStore) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            lab_name: lab_name.to_string(),
            author_name: author_name.to_string(),
            timestamp: Utc::now(),
            files: store.to_entries(),
        }
    }
}

/// Most-recent-first, bounded list of submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionHistory {
    entries: VecDeque<Submission>,
    limit: usize,
}

impl Default for SubmissionHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl SubmissionHistory {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    pub fn from_entries(entries: Vec<Submission>, limit: usize) -> Self {
        let mut history = Self::with_limit(limit);
        history.entries = entries.into_iter().take(history.limit).collect();
        history
    }

    pub fn record(&mut self, submission: Submission) {
        self.entries.push_front(submission);
        self.entries.truncate(self.limit);
    }

    pub fn get(&self, id: &str) -> Option<&Submission> {
        self.entries.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Submission> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Submission> {
        self.entries.iter().cloned().collect()
    }
}
