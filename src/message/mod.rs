// service neutral message model, rendered to Slack's wire format

pub mod attachment;
pub mod blocks;
pub mod mention;

use std::time::SystemTime;

use crate::{
    error::Result,
    slack::{PostMessage, StrTimeStamp},
};

pub use attachment::{Attachment, AttachmentKind, FileType, Payload, UnknownFileType};
pub use blocks::{
    Block, Context, Divider, FieldsSection, Header, Image, ImageAccessory, MarkdownConvertible,
    MarkdownSection, PlainSection, PlainTextConvertible, WireFragment,
};
pub use mention::Mention;

/// A message addressed to a channel, optionally inside a thread.
///
/// Built once with [`Message::builder`] and never mutated afterwards. Sending derives a new
/// message when attachments need to be uploaded first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    channel: String,
    ts: Option<String>,
    blocks: Vec<Block>,
    attachments: Vec<Attachment>,
}

impl Message {
    /// `channel` should be an id such as `C061Z3P47RB` so both post and update work.
    pub fn builder(channel: impl Into<String>) -> MessageBuilder {
        MessageBuilder {
            channel: channel.into(),
            ts: None,
            blocks: vec![],
            attachments: vec![],
        }
    }

    pub fn new(channel: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self::builder(channel).blocks(blocks).build()
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Thread to reply to, or the message to update.
    pub fn ts(&self) -> Option<&str> {
        self.ts.as_deref()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn has_unresolved_attachments(&self) -> bool {
        self.attachments.iter().any(Attachment::is_payload)
    }

    /// Same channel, thread and blocks with a different attachment list.
    pub fn with_attachments(&self, attachments: Vec<Attachment>) -> Message {
        Message {
            channel: self.channel.clone(),
            ts: self.ts.clone(),
            blocks: self.blocks.clone(),
            attachments,
        }
    }

    pub fn as_postmessage(&self) -> PostMessage<'_> {
        PostMessage {
            channel: &self.channel,
            thread_ts: self.ts.as_deref(),
            ts: self.ts.as_deref(),
            blocks: self.blocks.iter().map(|block| block.to_element()).collect(),
            attachments: if self.attachments.is_empty() {
                None
            } else {
                Some(self.attachments.iter().map(Attachment::to_element).collect())
            },
        }
    }

    pub fn to_wire_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.as_postmessage())?)
    }
}

pub struct MessageBuilder {
    channel: String,
    ts: Option<String>,
    blocks: Vec<Block>,
    attachments: Vec<Attachment>,
}

impl MessageBuilder {
    pub fn ts(mut self, ts: impl Into<String>) -> Self {
        self.ts = Some(ts.into());
        self
    }

    /// Replies in the thread when given, posts to the channel otherwise.
    pub fn maybe_ts(mut self, ts: Option<String>) -> Self {
        self.ts = ts;
        self
    }

    pub fn block(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }

    /// Appends every block of `blocks` in order. An `Option` adds zero or one block.
    pub fn blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Block>,
    {
        self.blocks.extend(blocks.into_iter().map(Into::into));
        self
    }

    pub fn block_if<B, F>(self, condition: bool, block: F) -> Self
    where
        B: Into<Block>,
        F: FnOnce() -> B,
    {
        if condition {
            self.block(block())
        } else {
            self
        }
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn attachments<I>(mut self, attachments: I) -> Self
    where
        I: IntoIterator<Item = Attachment>,
    {
        self.attachments.extend(attachments);
        self
    }

    pub fn build(self) -> Message {
        Message {
            channel: self.channel,
            ts: self.ts,
            blocks: self.blocks,
            attachments: self.attachments,
        }
    }
}

/// Result of a send or update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageMeta {
    /// `ts` of the posted message. `None` when Slack did not return one, the call still
    /// succeeded.
    pub timestamp: Option<String>,
}

impl MessageMeta {
    pub fn sent_at(&self) -> Option<SystemTime> {
        self.timestamp
            .as_deref()
            .and_then(|ts| StrTimeStamp::from(ts).to_system_time())
    }
}

/// Pretty prints a JSON string, keeping its key order.
pub fn prettify(json: &str) -> serde_json::Result<String> {
    let value = serde_json::from_str::<serde_json::Value>(json)?;
    serde_json::to_string_pretty(&value)
}
