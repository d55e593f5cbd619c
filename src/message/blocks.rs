//! Block Kit building blocks.
//!
//! Each block is a small immutable value. [`Block`] is the closed set of blocks that can
//! appear at the top level of a message, in the order they are rendered.

use std::borrow::Cow;

use crate::{
    error::Result,
    slack::{BlockElement, ImageBlock, SectionBlock, TextObject},
};

/// Anything usable as markdown text: a [`MarkdownSection`], a string or a mention.
pub trait MarkdownConvertible {
    fn markdown(&self) -> Cow<'_, str>;
}

/// Anything usable as plain text: a [`PlainSection`] or a string.
pub trait PlainTextConvertible {
    fn plain_text(&self) -> Cow<'_, str>;
}

impl MarkdownConvertible for str {
    fn markdown(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl MarkdownConvertible for String {
    fn markdown(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl<T: MarkdownConvertible + ?Sized> MarkdownConvertible for &T {
    fn markdown(&self) -> Cow<'_, str> {
        (**self).markdown()
    }
}

impl PlainTextConvertible for str {
    fn plain_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl PlainTextConvertible for String {
    fn plain_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl<T: PlainTextConvertible + ?Sized> PlainTextConvertible for &T {
    fn plain_text(&self) -> Cow<'_, str> {
        (**self).plain_text()
    }
}

/// Conversion into the wire representation of a block.
pub trait WireFragment {
    fn to_element(&self) -> BlockElement;

    fn to_wire_fragment(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_element())?)
    }
}

/// Visually separates other blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Divider;

impl WireFragment for Divider {
    fn to_element(&self) -> BlockElement {
        BlockElement::Divider
    }
}

/// Plain text only. Emoji shortcodes are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    text: String,
}

impl Header {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl WireFragment for Header {
    fn to_element(&self) -> BlockElement {
        BlockElement::Header {
            text: TextObject::plain(&self.text),
        }
    }
}

/// Small image shown to the right of a section's text.
///
/// Only sections can carry it, so it is not a [`Block`] of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAccessory {
    url: String,
    alt_text: String,
}

impl ImageAccessory {
    pub fn new(url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt_text: alt_text.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }
}

impl WireFragment for ImageAccessory {
    fn to_element(&self) -> BlockElement {
        image_element(&self.url, &self.alt_text)
    }
}

fn image_element(url: &str, alt_text: &str) -> BlockElement {
    BlockElement::Image(ImageBlock {
        image_url: url.to_string(),
        alt_text: alt_text.to_string(),
        title: None,
        block_id: None,
    })
}

fn section_element(text: TextObject, accessory: Option<&ImageAccessory>) -> BlockElement {
    BlockElement::Section(SectionBlock {
        text: Some(text),
        fields: None,
        accessory: accessory.map(|accessory| Box::new(accessory.to_element())),
        block_id: None,
    })
}

/// Section with plain text, used to send a simple message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainSection {
    text: String,
    accessory: Option<ImageAccessory>,
}

impl PlainSection {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            accessory: None,
        }
    }

    pub fn with_accessory(mut self, accessory: ImageAccessory) -> Self {
        self.accessory = Some(accessory);
        self
    }

    pub fn accessory(&self) -> Option<&ImageAccessory> {
        self.accessory.as_ref()
    }
}

impl PlainTextConvertible for PlainSection {
    fn plain_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
}

impl WireFragment for PlainSection {
    fn to_element(&self) -> BlockElement {
        section_element(TextObject::plain(&self.text), self.accessory.as_ref())
    }
}

/// Section with markdown text. Also usable as an entry of [`FieldsSection`] and [`Context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownSection {
    text: String,
    accessory: Option<ImageAccessory>,
}

impl MarkdownSection {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            accessory: None,
        }
    }

    pub fn with_accessory(mut self, accessory: ImageAccessory) -> Self {
        self.accessory = Some(accessory);
        self
    }

    pub fn accessory(&self) -> Option<&ImageAccessory> {
        self.accessory.as_ref()
    }
}

impl MarkdownConvertible for MarkdownSection {
    fn markdown(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
}

impl WireFragment for MarkdownSection {
    fn to_element(&self) -> BlockElement {
        section_element(TextObject::markdown(&self.text), self.accessory.as_ref())
    }
}

fn collect_markdown<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: MarkdownConvertible,
{
    items
        .into_iter()
        .map(|item| item.markdown().into_owned())
        .collect()
}

/// Grid of markdown fields: two columns on desktop, one on mobile.
///
/// An empty grid is allowed and renders `"fields": []`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldsSection {
    fields: Vec<String>,
}

impl FieldsSection {
    pub fn new<I>(fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: MarkdownConvertible,
    {
        Self {
            fields: collect_markdown(fields),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl WireFragment for FieldsSection {
    fn to_element(&self) -> BlockElement {
        BlockElement::Section(SectionBlock {
            text: None,
            fields: Some(self.fields.iter().map(|f| TextObject::markdown(f)).collect()),
            accessory: None,
            block_id: None,
        })
    }
}

/// Small markdown line, usually at the bottom of a message (app version, branch...).
///
/// An empty context is allowed and renders `"elements": []`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    elements: Vec<String>,
}

impl Context {
    pub fn new<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: MarkdownConvertible,
    {
        Self {
            elements: collect_markdown(elements),
        }
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }
}

impl WireFragment for Context {
    fn to_element(&self) -> BlockElement {
        BlockElement::Context {
            elements: self
                .elements
                .iter()
                .map(|e| TextObject::markdown(e))
                .collect(),
        }
    }
}

/// Full width image block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    url: String,
    alt_text: String,
}

impl Image {
    pub fn new(url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt_text: alt_text.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }
}

impl WireFragment for Image {
    fn to_element(&self) -> BlockElement {
        image_element(&self.url, &self.alt_text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Divider(Divider),
    Header(Header),
    PlainSection(PlainSection),
    MarkdownSection(MarkdownSection),
    FieldsSection(FieldsSection),
    Context(Context),
    Image(Image),
}

macro_rules! impl_block_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Block {
                fn from(block: $variant) -> Self {
                    Block::$variant(block)
                }
            }
        )*
    };
}

impl_block_from!(
    Divider,
    Header,
    PlainSection,
    MarkdownSection,
    FieldsSection,
    Context,
    Image,
);

impl WireFragment for Block {
    fn to_element(&self) -> BlockElement {
        match self {
            Block::Divider(block) => block.to_element(),
            Block::Header(block) => block.to_element(),
            Block::PlainSection(block) => block.to_element(),
            Block::MarkdownSection(block) => block.to_element(),
            Block::FieldsSection(block) => block.to_element(),
            Block::Context(block) => block.to_element(),
            Block::Image(block) => block.to_element(),
        }
    }
}

/// Builds a `Vec<Block>` from blocks of mixed types, keeping their order.
///
/// ```
/// use ditto_slack::{blocks, Divider, Header, MarkdownSection};
///
/// let blocks = blocks![Header::new("Release"), Divider, MarkdownSection::new("*done*")];
/// assert_eq!(blocks.len(), 3);
/// ```
#[macro_export]
macro_rules! blocks {
    ($($block:expr),* $(,)?) => {
        vec![$($crate::Block::from($block)),*]
    };
}
