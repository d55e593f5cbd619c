use std::{
    fmt::{Debug, Formatter},
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StrTimeStamp(String);

impl StrTimeStamp {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `None` when the timestamp is not a `seconds.micros` number or is out of range.
    pub fn to_system_time(&self) -> Option<SystemTime> {
        let secs = self.0.parse::<f64>().ok()?;
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        let since_epoch = Duration::try_from_secs_f64(secs).ok()?;
        SystemTime::UNIX_EPOCH.checked_add(since_epoch)
    }
}

impl From<&str> for StrTimeStamp {
    fn from(val: &str) -> Self {
        Self(val.to_string())
    }
}

impl From<StrTimeStamp> for String {
    fn from(val: StrTimeStamp) -> Self {
        val.0
    }
}

impl Debug for StrTimeStamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})", self.0, self.to_system_time())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub enum TextObjectType {
    #[serde(rename = "plain_text")]
    PlainText,
    #[serde(rename = "mrkdwn")]
    Markdown,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub ty: TextObjectType,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbatim: Option<bool>,
}

impl TextObject {
    pub fn plain(text: &str) -> Self {
        Self::new(text, TextObjectType::PlainText)
    }

    pub fn markdown(text: &str) -> Self {
        Self::new(text, TextObjectType::Markdown)
    }

    fn new(text: &str, ty: TextObjectType) -> Self {
        Self {
            ty,
            text: text.to_string(),
            emoji: None,
            verbatim: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SectionBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<TextObject>>,
    // Only `image` elements are sent as accessories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessory: Option<Box<BlockElement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageBlock {
    pub image_url: String,
    pub alt_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TextObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum BlockElement {
    Divider,
    Header { text: TextObject },
    Section(SectionBlock),
    Context { elements: Vec<TextObject> },
    Image(ImageBlock),
}

/// Legacy `attachments` entry. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AttachmentElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filetype: Option<String>,
}

/**
 * Sent from client.
 */

/// Body of `chat.postMessage` and `chat.update`.
///
/// `thread_ts` and `ts` are either both present or both absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PostMessage<'a> {
    pub channel: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<&'a str>,

    pub blocks: Vec<BlockElement>,

    // omitted entirely rather than sent as an empty array
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentElement>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct FileReference {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Body of `files.completeUploadExternal`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileUploadFinishedRequest<'a> {
    pub files: Vec<FileReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_comment: Option<&'a str>,
}

/**
 * Sent from server.
 */

/// Fields shared by every Web API response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChatResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub channel: Option<String>,
    pub ts: Option<StrTimeStamp>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileUploadStartResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub upload_url: String,
    pub file_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileInfo {
    pub id: String,
    pub title: Option<String>,
    pub name: Option<String>,
    pub permalink: Option<String>,
    pub url_private: Option<String>,
    pub filetype: Option<String>,
    pub size: Option<u64>,
    pub timestamp: Option<i64>,
}

impl FileInfo {
    pub fn url(&self) -> Option<&str> {
        self.permalink.as_deref().or(self.url_private.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileUploadFinishedResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub files: Vec<FileInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileInfoResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub file: FileInfo,
}
