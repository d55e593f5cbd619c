use std::env;

use anyhow::Context as _;
use ditto_slack::{
    Attachment, Context, ImageAccessory, Image, MarkdownSection, Message, PlainSection,
    SlackClient,
};
use log::{error, info};

const IMAGE_URL: &str = "https://s3-media2.fl.yelpcdn.com/bphoto/DawwNigKJ2ckPeDeDM7jAg/o.jpg";

const CSV_DATA: &str = "name,age,city
John,30,New York
Jane,25,San Francisco
Bob,35,Chicago
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let channel = env::var("SLACK_CHANNEL").context("SLACK_CHANNEL is not given")?;
    let client = SlackClient::from_env().context("Failed to create Slack client")?;

    let initial = Message::builder(channel.as_str())
        .block(PlainSection::new("Initial message test"))
        .build();
    let initial_meta = client
        .send(&initial)
        .await
        .context("Failed to send initial message")?;
    info!("Initial message ts: {:?}", initial_meta.timestamp);

    let csv_message = Message::builder(channel.as_str())
        .maybe_ts(initial_meta.timestamp.clone())
        .block(MarkdownSection::new("Testing attachment upload"))
        .block(Context::new([
            "*Method*: files.getUploadURLExternal + files.completeUploadExternal".to_string(),
            format!("*Sent at*: {:?}", initial_meta.sent_at()),
        ]))
        .attachment(
            Attachment::csv_data(CSV_DATA.as_bytes(), Some("test.csv".to_string()))
                .with_title("People"),
        )
        .build();
    info!("Message JSON: {}", csv_message.to_wire_json()?);

    let image_message = Message::builder(channel.as_str())
        .maybe_ts(initial_meta.timestamp)
        .block(
            MarkdownSection::new("An accessory image, like avatars")
                .with_accessory(ImageAccessory::new(IMAGE_URL, "some text")),
        )
        .block(MarkdownSection::new("And an even bigger image"))
        .block(Image::new(IMAGE_URL, "full width image"))
        .build();

    match client.send(&csv_message).await {
        Ok(meta) => info!("Upload successful, message ts: {:?}", meta.timestamp),
        Err(e) => error!("Upload failed - {:?}", e),
    }

    let meta = client
        .send(&image_message)
        .await
        .context("Failed to send image message")?;
    info!("Image message ts: {:?}", meta.timestamp);

    Ok(())
}
