//! File uploads and attachment resolution.
//!
//! Uploads use Slack's external upload flow:
//! 1. `files.getUploadURLExternal` returns an upload url and a file id,
//! 2. the raw bytes are posted to that url,
//! 3. `files.completeUploadExternal` finishes the upload, optionally sharing it,
//! 4. `files.info` is asked for the file's url if step 3 did not return one.
//!
//! See https://api.slack.com/messaging/files#uploading_files

use std::borrow::Cow;

use bytes::Bytes;
use log::{debug, info};
use url::Url;

use super::{HttpRequest, HttpTransport, Method, SlackClient};
use crate::{
    error::{Error, Result, TransportError, UploadStage},
    message::{FileType, Message},
    slack::{
        FileInfoResponse, FileReference, FileUploadFinishedRequest, FileUploadFinishedResponse,
        FileUploadStartResponse, ENDPOINT_COMPLETE_UPLOAD, ENDPOINT_FILE_INFO,
        ENDPOINT_GET_UPLOAD_URL,
    },
};

#[derive(Debug, Clone)]
pub struct FileUpload<'a> {
    pub data: Bytes,
    pub filename: &'a str,
    pub file_type: FileType,
    /// Defaults to the filename.
    pub title: Option<&'a str>,
    pub channel_id: Option<&'a str>,
    pub thread_ts: Option<&'a str>,
    pub initial_comment: Option<&'a str>,
}

impl<'a> FileUpload<'a> {
    pub fn new(data: impl Into<Bytes>, filename: &'a str, file_type: FileType) -> Self {
        Self {
            data: data.into(),
            filename,
            file_type,
            title: None,
            channel_id: None,
            thread_ts: None,
            initial_comment: None,
        }
    }

    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Shares the file to `channel_id`, inside `thread_ts` when given.
    pub fn share_to(mut self, channel_id: &'a str, thread_ts: Option<&'a str>) -> Self {
        self.channel_id = Some(channel_id);
        self.thread_ts = thread_ts;
        self
    }

    pub fn with_initial_comment(mut self, comment: &'a str) -> Self {
        self.initial_comment = Some(comment);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUploadResult {
    pub file_id: String,
    pub title: Option<String>,
    /// Permalink of the file, or its private url when Slack gave no permalink.
    pub url: String,
}

impl<T: HttpTransport> SlackClient<T> {
    pub async fn upload_file(&self, upload: FileUpload<'_>) -> Result<FileUploadResult> {
        let filename = upload.filename;
        let length = upload.data.len().to_string();

        debug!("Uploading file: {} ({} bytes)", filename, length);

        let start = self
            .request::<FileUploadStartResponse>(
                ENDPOINT_GET_UPLOAD_URL,
                &[("filename", filename), ("length", length.as_str())],
                Bytes::new(),
                Method::Post,
            )
            .await
            .map_err(|e| Error::upload(UploadStage::GetUploadUrl, filename, e))?;

        self.transfer(&start.upload_url, &upload)
            .await
            .map_err(|e| Error::upload(UploadStage::Transfer, filename, e))?;

        let title = upload.title.unwrap_or(filename);
        let finished = FileUploadFinishedRequest {
            files: vec![FileReference {
                id: start.file_id.clone(),
                title: Some(title.to_string()),
            }],
            channel_id: upload.channel_id,
            thread_ts: upload.thread_ts,
            initial_comment: upload.initial_comment,
        };
        let body = serde_json::to_vec(&finished)
            .map_err(|e| Error::upload(UploadStage::Complete, filename, e.into()))?;

        let complete = self
            .request::<FileUploadFinishedResponse>(
                ENDPOINT_COMPLETE_UPLOAD,
                &[],
                Bytes::from(body),
                Method::Post,
            )
            .await
            .map_err(|e| Error::upload(UploadStage::Complete, filename, e))?;

        let completed = complete
            .files
            .into_iter()
            .find(|file| file.id == start.file_id);

        let url = match completed.as_ref().and_then(|file| file.url()) {
            Some(url) => url.to_string(),
            None => self
                .lookup_file_url(&start.file_id)
                .await
                .map_err(|e| Error::upload(UploadStage::Lookup, filename, e))?,
        };

        info!("Uploaded {} as {}", filename, start.file_id);

        Ok(FileUploadResult {
            file_id: start.file_id,
            title: completed
                .and_then(|file| file.title)
                .or_else(|| Some(title.to_string())),
            url,
        })
    }

    async fn transfer(&self, upload_url: &str, upload: &FileUpload<'_>) -> Result<()> {
        let url = Url::parse(upload_url).map_err(|source| Error::InvalidEndpoint {
            endpoint: upload_url.to_string(),
            source,
        })?;

        // The upload url is pre-signed, the bot token stays with the Web API.
        let headers = vec![
            (
                "Content-Type".to_string(),
                upload.file_type.mime_type().to_string(),
            ),
            ("filename".to_string(), upload.filename.to_string()),
        ];

        let request = HttpRequest {
            method: Method::Post,
            url,
            headers,
            body: upload.data.clone(),
        };

        // Single shot, the upload url is not retried.
        match self.transport().execute(request).await {
            Ok(resp) if resp.status == 200 => Ok(()),
            Ok(resp) => Err(Error::Transfer(TransportError::Status {
                status: resp.status,
            })),
            Err(e) => Err(Error::Transfer(e)),
        }
    }

    async fn lookup_file_url(&self, file_id: &str) -> Result<String> {
        debug!("Looking up url of file {}", file_id);

        let resp = self
            .request::<FileInfoResponse>(
                ENDPOINT_FILE_INFO,
                &[("file", file_id)],
                Bytes::new(),
                Method::Get,
            )
            .await?;

        resp.file
            .url()
            .map(str::to_string)
            .ok_or_else(|| Error::MissingFileUrl {
                file_id: file_id.to_string(),
            })
    }

    /// Uploads every byte payload attachment of `message`, in order, and returns the message
    /// with those attachments replaced by url attachments.
    ///
    /// Nothing is returned unless every upload succeeded. The given message is left untouched.
    pub async fn resolve_attachments<'m>(
        &self,
        message: &'m Message,
    ) -> Result<Cow<'m, Message>> {
        if !message.has_unresolved_attachments() {
            return Ok(Cow::Borrowed(message));
        }

        let mut attachments = Vec::with_capacity(message.attachments().len());

        for attachment in message.attachments() {
            let Some(payload) = attachment.payload() else {
                attachments.push(attachment.clone());
                continue;
            };

            let mut upload =
                FileUpload::new(payload.data.clone(), &payload.filename, payload.file_type);
            if let Some(title) = attachment.title() {
                upload = upload.with_title(title);
            }
            if self.config().share_uploads {
                upload = upload.share_to(message.channel(), message.ts());
            }

            let uploaded = self.upload_file(upload).await?;
            attachments.push(attachment.resolved(uploaded.url));
        }

        Ok(Cow::Owned(message.with_attachments(attachments)))
    }
}
