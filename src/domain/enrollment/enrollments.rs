//! Enrollment entries and the ordered list held by each user.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EnrollmentId, Progress};

use super::EnrollmentError;

/// A user's progress in one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Freshly minted on enroll. Not a catalog id.
    pub course_id: EnrollmentId,
    pub title: String,
    pub progress: Progress,
    /// Unique values, in completion order.
    pub completed_topics: Vec<String>,
}

impl Enrollment {
    fn start(title: String) -> Self {
        Self {
            course_id: EnrollmentId::new(),
            title,
            progress: Progress::ZERO,
            completed_topics: Vec::new(),
        }
    }

    /// Returns true if the topic has been recorded as completed.
    pub fn has_completed(&self, topic: &str) -> bool {
        self.completed_topics.iter().any(|t| t == topic)
    }
}

/// Requested change to an enrollment. Both parts are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub progress: Option<Progress>,
    pub completed_topic: Option<String>,
}

/// Ordered enrollment list of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Enrollments(Vec<Enrollment>);

impl Enrollments {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a new entry for `title` with zero progress.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is blank
    /// - `AlreadyEnrolled` if an entry with the exact title exists
    pub fn enroll(&mut self, title: &str) -> Result<&Enrollment, EnrollmentError> {
        if title.trim().is_empty() {
            return Err(EnrollmentError::validation("courseTitle", "cannot be empty"));
        }
        if self.find(title).is_some() {
            return Err(EnrollmentError::already_enrolled(title));
        }
        self.0.push(Enrollment::start(title.to_string()));
        let index = self.0.len() - 1;
        Ok(&self.0[index])
    }

    /// Applies a progress update to the entry matching `title`.
    ///
    /// Progress, when given, overwrites the stored value. A completed topic is
    /// appended only if it is not already present.
    pub fn record_progress(
        &mut self,
        title: &str,
        update: ProgressUpdate,
    ) -> Result<&Enrollment, EnrollmentError> {
        let entry = self
            .0
            .iter_mut()
            .find(|e| e.title == title)
            .ok_or_else(|| EnrollmentError::not_enrolled(title))?;

        if let Some(progress) = update.progress {
            entry.progress = progress;
        }
        if let Some(topic) = update.completed_topic.filter(|t| !t.is_empty()) {
            if !entry.has_completed(&topic) {
                entry.completed_topics.push(topic);
            }
        }
        Ok(&*entry)
    }

    /// Looks up an entry by exact title.
    pub fn find(&self, title: &str) -> Option<&Enrollment> {
        self.0.iter().find(|e| e.title == title)
    }

    /// Rounded mean of stored progress across entries, 0 when empty.
    pub fn average_progress(&self) -> u8 {
        if self.0.is_empty() {
            return 0;
        }
        let total: u32 = self.0.iter().map(|e| u32::from(e.progress.value())).sum();
        let count = self.0.len() as u32;
        ((total + count / 2) / count) as u8
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enrollment> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Enrollment] {
        &self.0
    }
}

impl From<Vec<Enrollment>> for Enrollments {
    fn from(entries: Vec<Enrollment>) -> Self {
        Self(entries)
    }
}
