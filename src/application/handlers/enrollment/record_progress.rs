//! RecordProgressHandler - Command handler for progress and completed topics.

use std::sync::Arc;

use crate::domain::enrollment::{Enrollment, EnrollmentError, ProgressUpdate};
use crate::domain::foundation::{Progress, UserId};
use crate::ports::UserRepository;

use super::update_enrollments;

#[derive(Debug, Clone)]
pub struct RecordProgressCommand {
    pub user_id: UserId,
    pub course_title: Option<String>,
    /// Percentage; validated against 0..=100.
    pub progress: Option<i64>,
    pub completed_topic: Option<String>,
}

/// The entry after the update.
pub type RecordProgressResult = Enrollment;

pub struct RecordProgressHandler {
    users: Arc<dyn UserRepository>,
}

impl RecordProgressHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        cmd: RecordProgressCommand,
    ) -> Result<RecordProgressResult, EnrollmentError> {
        let title = cmd.course_title.unwrap_or_default();
        if title.is_empty() {
            return Err(EnrollmentError::validation("courseTitle", "cannot be empty"));
        }
        let update = ProgressUpdate {
            progress: cmd.progress.map(Progress::try_new).transpose()?,
            completed_topic: cmd.completed_topic,
        };

        let entry = update_enrollments(self.users.as_ref(), &cmd.user_id, |user| {
            Ok(user.enrollments.record_progress(&title, update.clone())?.clone())
        })
        .await?;

        tracing::debug!(
            user_id = %cmd.user_id,
            course_title = %title,
            progress = entry.progress.value(),
            completed_topics = entry.completed_topics.len(),
            "Progress recorded"
        );
        Ok(entry)
    }
}
