//! Legacy message attachments.
//!
//! An attachment either points at a URL or carries raw bytes. Byte payloads are uploaded by
//! [`SlackClient`](crate::SlackClient) and replaced with URL attachments before a message is
//! posted.

use std::{borrow::Cow, fmt, str::FromStr};

use bytes::Bytes;
use thiserror::Error;

use crate::{error::Result, slack::AttachmentElement};

/// Filename used when a CSV payload is given without one.
pub const DEFAULT_CSV_FILENAME: &str = "attachment.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Csv,
    Pdf,
    Txt,
    Json,
    Xml,
    Zip,
    Doc,
    Docx,
    Xls,
    Xlsx,
    Ppt,
    Pptx,
    Jpg,
    Jpeg,
    Png,
    Gif,
    Mp4,
    Mov,
    Mp3,
    Wav,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown file type {0:?}")]
pub struct UnknownFileType(pub String);

impl FileType {
    pub const ALL: [FileType; 20] = [
        FileType::Csv,
        FileType::Pdf,
        FileType::Txt,
        FileType::Json,
        FileType::Xml,
        FileType::Zip,
        FileType::Doc,
        FileType::Docx,
        FileType::Xls,
        FileType::Xlsx,
        FileType::Ppt,
        FileType::Pptx,
        FileType::Jpg,
        FileType::Jpeg,
        FileType::Png,
        FileType::Gif,
        FileType::Mp4,
        FileType::Mov,
        FileType::Mp3,
        FileType::Wav,
    ];

    /// Value of the `filetype` wire field.
    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Pdf => "pdf",
            FileType::Txt => "txt",
            FileType::Json => "json",
            FileType::Xml => "xml",
            FileType::Zip => "zip",
            FileType::Doc => "doc",
            FileType::Docx => "docx",
            FileType::Xls => "xls",
            FileType::Xlsx => "xlsx",
            FileType::Ppt => "ppt",
            FileType::Pptx => "pptx",
            FileType::Jpg => "jpg",
            FileType::Jpeg => "jpeg",
            FileType::Png => "png",
            FileType::Gif => "gif",
            FileType::Mp4 => "mp4",
            FileType::Mov => "mov",
            FileType::Mp3 => "mp3",
            FileType::Wav => "wav",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            FileType::Csv => "text/csv",
            FileType::Pdf => "application/pdf",
            FileType::Txt => "text/plain",
            FileType::Json => "application/json",
            FileType::Xml => "application/xml",
            FileType::Zip => "application/zip",
            FileType::Doc => "application/msword",
            FileType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            FileType::Xls => "application/vnd.ms-excel",
            FileType::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            FileType::Ppt => "application/vnd.ms-powerpoint",
            FileType::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            FileType::Jpg | FileType::Jpeg => "image/jpeg",
            FileType::Png => "image/png",
            FileType::Gif => "image/gif",
            FileType::Mp4 => "video/mp4",
            FileType::Mov => "video/quicktime",
            FileType::Mp3 => "audio/mpeg",
            FileType::Wav => "audio/wav",
        }
    }

    pub fn is_image(self) -> bool {
        matches!(
            self,
            FileType::Jpg | FileType::Jpeg | FileType::Png | FileType::Gif
        )
    }

    pub fn is_video(self) -> bool {
        matches!(self, FileType::Mp4 | FileType::Mov)
    }

    pub fn is_audio(self) -> bool {
        matches!(self, FileType::Mp3 | FileType::Wav)
    }

    /// Guesses the type from the extension of `filename`.
    pub fn from_filename(filename: &str) -> Option<FileType> {
        let (_, extension) = filename.rsplit_once('.')?;
        extension.parse().ok()
    }
}

impl FromStr for FileType {
    type Err = UnknownFileType;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FileType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFileType(s.to_string()))
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentKind {
    Image {
        url: String,
        alt_text: Option<String>,
    },
    File {
        url: String,
        filename: String,
        file_type: FileType,
    },
    FileData {
        data: Bytes,
        filename: String,
        file_type: FileType,
    },
    Csv {
        url: String,
        filename: Option<String>,
    },
    CsvData {
        data: Bytes,
        filename: Option<String>,
    },
}

/// Bytes of a payload attachment, as they will be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload<'a> {
    pub data: &'a Bytes,
    pub filename: Cow<'a, str>,
    pub file_type: FileType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    kind: AttachmentKind,
    title: Option<String>,
    fallback: Option<String>,
    color: Option<String>,
    text: Option<String>,
}

impl Attachment {
    pub fn new(kind: AttachmentKind) -> Self {
        Self {
            kind,
            title: None,
            fallback: None,
            color: None,
            text: None,
        }
    }

    pub fn image(url: impl Into<String>, alt_text: Option<String>) -> Self {
        Self::new(AttachmentKind::Image {
            url: url.into(),
            alt_text,
        })
    }

    pub fn file(url: impl Into<String>, filename: impl Into<String>, file_type: FileType) -> Self {
        Self::new(AttachmentKind::File {
            url: url.into(),
            filename: filename.into(),
            file_type,
        })
    }

    pub fn file_data(
        data: impl Into<Bytes>,
        filename: impl Into<String>,
        file_type: FileType,
    ) -> Self {
        Self::new(AttachmentKind::FileData {
            data: data.into(),
            filename: filename.into(),
            file_type,
        })
    }

    pub fn csv(url: impl Into<String>, filename: Option<String>) -> Self {
        Self::new(AttachmentKind::Csv {
            url: url.into(),
            filename,
        })
    }

    pub fn csv_data(data: impl Into<Bytes>, filename: Option<String>) -> Self {
        Self::new(AttachmentKind::CsvData {
            data: data.into(),
            filename,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Hex color of the attachment's side bar, e.g. `#36a64f`.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn kind(&self) -> &AttachmentKind {
        &self.kind
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether this attachment still carries bytes that must be uploaded.
    pub fn is_payload(&self) -> bool {
        self.payload().is_some()
    }

    pub fn payload(&self) -> Option<Payload<'_>> {
        match &self.kind {
            AttachmentKind::FileData {
                data,
                filename,
                file_type,
            } => Some(Payload {
                data,
                filename: Cow::Borrowed(filename),
                file_type: *file_type,
            }),
            AttachmentKind::CsvData { data, filename } => Some(Payload {
                data,
                filename: filename
                    .as_deref()
                    .map_or(Cow::Borrowed(DEFAULT_CSV_FILENAME), Cow::Borrowed),
                file_type: FileType::Csv,
            }),
            _ => None,
        }
    }

    /// Copy of this attachment pointing at `url` instead of carrying bytes.
    ///
    /// URL attachments are returned unchanged.
    pub fn resolved(&self, url: impl Into<String>) -> Attachment {
        let kind = match &self.kind {
            AttachmentKind::FileData {
                filename,
                file_type,
                ..
            } => AttachmentKind::File {
                url: url.into(),
                filename: filename.clone(),
                file_type: *file_type,
            },
            AttachmentKind::CsvData { filename, .. } => AttachmentKind::Csv {
                url: url.into(),
                filename: Some(
                    filename
                        .clone()
                        .unwrap_or_else(|| DEFAULT_CSV_FILENAME.to_string()),
                ),
            },
            other => other.clone(),
        };

        Attachment {
            kind,
            title: self.title.clone(),
            fallback: self.fallback.clone(),
            color: self.color.clone(),
            text: self.text.clone(),
        }
    }

    pub fn to_element(&self) -> AttachmentElement {
        let mut element = AttachmentElement {
            title: self.title.clone(),
            fallback: self.fallback.clone(),
            color: self.color.clone(),
            text: self.text.clone(),
            ..Default::default()
        };

        match &self.kind {
            AttachmentKind::Image { url, alt_text } => {
                element.image_url = Some(url.clone());
                element.alt_text = alt_text.clone();
            }
            AttachmentKind::File {
                url,
                filename,
                file_type,
            } => {
                element.file_url = Some(url.clone());
                element.filename = Some(filename.clone());
                element.filetype = Some(file_type.to_string());
            }
            AttachmentKind::FileData {
                filename,
                file_type,
                ..
            } => {
                element.filename = Some(filename.clone());
                element.filetype = Some(file_type.to_string());
            }
            AttachmentKind::Csv { url, filename } => {
                element.file_url = Some(url.clone());
                element.filename = filename.clone();
                element.filetype = Some(FileType::Csv.to_string());
            }
            AttachmentKind::CsvData { filename, .. } => {
                element.filename = filename.clone();
                element.filetype = Some(FileType::Csv.to_string());
            }
        }

        element
    }

    pub fn to_wire_fragment(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_element())?)
    }
}
