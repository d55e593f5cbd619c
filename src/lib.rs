//! Declarative Slack messages.
//!
//! Build a [`Message`] out of Block Kit blocks and legacy attachments, then deliver it with a
//! [`SlackClient`]. Attachments carrying raw bytes are uploaded first and replaced by links to
//! the uploaded files.
//!
//! ```no_run
//! use ditto_slack::{Context, Divider, Header, MarkdownSection, Message, SlackClient};
//!
//! # async fn run() -> ditto_slack::Result<()> {
//! let client = SlackClient::from_env()?;
//! let message = Message::builder("C061Z3P47RB")
//!     .block(Header::new("Deploy finished"))
//!     .block(Divider)
//!     .block(MarkdownSection::new("*main* is live"))
//!     .block(Context::new(["branch: main", "build: 42"]))
//!     .build();
//!
//! let meta = client.send(&message).await?;
//! println!("{:?}", meta.timestamp);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod message;
pub mod slack;

pub use client::{
    ClientConfig, FileUpload, FileUploadResult, HttpRequest, HttpResponse, HttpTransport, Method,
    ReqwestTransport, SlackClient,
};
pub use error::{Error, Result, TransportError, UploadStage};
pub use message::{
    prettify, Attachment, AttachmentKind, Block, Context, Divider, FieldsSection, FileType, Header,
    Image, ImageAccessory, MarkdownConvertible, MarkdownSection, Mention, Message, MessageBuilder,
    MessageMeta, PlainSection, PlainTextConvertible, WireFragment,
};
