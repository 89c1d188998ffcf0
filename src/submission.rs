//! Delivery of completed forms

use crate::state::{FormSchema, FormValues};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A completed form together with where it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: Uuid,
    pub form_id: String,
    pub version: String,
    pub roll_number: String,
    pub submitted_at: DateTime<Utc>,
    pub values: FormValues,
}

impl Submission {
    pub fn new(schema: &FormSchema, roll_number: &str, values: &FormValues) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            form_id: schema.form_id.clone(),
            version: schema.version.clone(),
            roll_number: roll_number.to_string(),
            submitted_at: Utc::now(),
            values: values.clone(),
        }
    }
}

/// Proof of delivery shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub submission_id: Uuid,
    pub location: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to write submission to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Destination for completed forms
#[cfg_attr(test, mockall::automock)]
pub trait SubmissionSink: Send {
    fn deliver(&self, submission: &Submission) -> Result<SubmissionReceipt, SinkError>;
}

/// Writes each submission as a pretty-printed JSON file
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<formId>-<submissionId>.json`, with the form id reduced to
    /// characters that are safe in a file name
    pub fn path_for(&self, submission: &Submission) -> PathBuf {
        let form_id: String = submission
            .form_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir
            .join(format!("{}-{}.json", form_id, submission.submission_id))
    }
}

impl SubmissionSink for JsonFileSink {
    fn deliver(&self, submission: &Submission) -> Result<SubmissionReceipt, SinkError> {
        let path = self.path_for(submission);
        let json = serde_json::to_string_pretty(submission)?;

        std::fs::create_dir_all(&self.dir).map_err(|source| SinkError::Io {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, &json).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(
            submission_id = %submission.submission_id,
            form_id = %submission.form_id,
            roll_number = %submission.roll_number,
            path = %path.display(),
            "Form submitted"
        );
        tracing::debug!("Submitted values: {}", json);

        Ok(SubmissionReceipt {
            submission_id: submission.submission_id,
            location: path,
        })
    }
}
