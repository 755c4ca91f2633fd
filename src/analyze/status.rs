use crate::analyze::IssueBucket;
use crate::model::DEFAULT_COMPLETED_STATUSES;
use std::collections::HashSet;

/// Decides the bucket of an issue from its status name alone.
///
/// Matching is exact and case-sensitive: `"done"` is not `"Done"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusClassifier {
    completed: HashSet<String>,
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_COMPLETED_STATUSES)
    }
}

impl StatusClassifier {
    pub fn new<I, S>(completed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self {
            completed: completed.into_iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn classify(&self, status_name: Option<&str>) -> IssueBucket {
        match status_name {
            Some(status) if self.completed.contains(status) => IssueBucket::Completed,
            _ => IssueBucket::InProgress,
        }
    }
}
