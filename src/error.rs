use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A request never produced a usable HTTP 200.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },
    #[error("request could not be delivered - {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    GetUploadUrl,
    Transfer,
    Complete,
    Lookup,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UploadStage::GetUploadUrl => "get upload url",
            UploadStage::Transfer => "byte transfer",
            UploadStage::Complete => "complete upload",
            UploadStage::Lookup => "file lookup",
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Slack token is not given")]
    MissingCredential,

    #[error("invalid Slack endpoint {endpoint:?}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {endpoint} failed after {attempts} attempts")]
    RequestFailed {
        endpoint: String,
        attempts: u32,
        #[source]
        source: TransportError,
    },

    #[error("Slack rejected {endpoint}: {error}")]
    Api { endpoint: String, error: String },

    #[error("failed to decode response of {endpoint}: {body}")]
    Decoding {
        endpoint: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request body")]
    Encoding(#[from] serde_json::Error),

    #[error("upload of {filename:?} failed at {stage}")]
    Upload {
        stage: UploadStage,
        filename: String,
        #[source]
        source: Box<Error>,
    },

    #[error("byte transfer returned an error - {0}")]
    Transfer(#[source] TransportError),

    #[error("Slack returned no url for file {file_id}")]
    MissingFileUrl { file_id: String },

    #[error("updating a message requires its ts")]
    MissingTimestamp,
}

impl Error {
    pub(crate) fn upload(stage: UploadStage, filename: &str, source: Error) -> Self {
        Error::Upload {
            stage,
            filename: filename.to_string(),
            source: Box::new(source),
        }
    }

    /// The stage an upload failed at, if this is an upload failure.
    pub fn upload_stage(&self) -> Option<UploadStage> {
        match self {
            Error::Upload { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
