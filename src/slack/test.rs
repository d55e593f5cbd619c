use super::*;

#[test]
pub fn test_deserialize_chat_response() {
    let deserialized = serde_json::from_str::<ChatResponse>(
        r#"{
        "ok": true,
        "channel": "C2147483705",
        "ts": "1355517523.000005",
        "message": {
            "text": "Hello world"
        }
    }"#,
    )
    .unwrap();

    assert!(deserialized.envelope.ok);
    assert_eq!(deserialized.envelope.error, None);
    assert_eq!(deserialized.channel.as_deref(), Some("C2147483705"));
    assert_eq!(
        deserialized.ts.as_ref().map(StrTimeStamp::as_str),
        Some("1355517523.000005")
    );
}

#[test]
pub fn test_deserialize_error_envelope() {
    let deserialized = serde_json::from_str::<Envelope>(
        r#"{
        "ok": false,
        "error": "channel_not_found"
    }"#,
    )
    .unwrap();

    assert!(!deserialized.ok);
    assert_eq!(deserialized.error.as_deref(), Some("channel_not_found"));
}

#[test]
pub fn test_error_envelope_is_not_an_upload_start() {
    let result = serde_json::from_str::<FileUploadStartResponse>(
        r#"{ "ok": false, "error": "invalid_auth" }"#,
    );

    assert!(result.is_err());
}

#[test]
pub fn test_deserialize_upload_start() {
    let deserialized = serde_json::from_str::<FileUploadStartResponse>(
        r#"{
        "ok": true,
        "upload_url": "https://files.slack.com/upload/v1/ABC123",
        "file_id": "F123ABC456"
    }"#,
    )
    .unwrap();

    assert_eq!(
        deserialized.upload_url,
        "https://files.slack.com/upload/v1/ABC123"
    );
    assert_eq!(deserialized.file_id, "F123ABC456");
}

#[test]
pub fn test_deserialize_upload_finished() {
    let deserialized = serde_json::from_str::<FileUploadFinishedResponse>(
        r#"{
        "ok": true,
        "files": [
            { "id": "F044GKUHN9Z", "title": "report.csv" },
            { "id": "F044GKUHN10", "title": "photo.png", "permalink": "https://team.slack.com/files/U1/F044GKUHN10/photo.png" }
        ]
    }"#,
    )
    .unwrap();

    assert_eq!(deserialized.files.len(), 2);
    assert_eq!(deserialized.files[0].url(), None);
    assert_eq!(
        deserialized.files[1].url(),
        Some("https://team.slack.com/files/U1/F044GKUHN10/photo.png")
    );
}

#[test]
pub fn test_file_info_prefers_permalink() {
    let info = serde_json::from_str::<FileInfo>(
        r#"{
        "id": "F1",
        "permalink": "https://team.slack.com/files/U1/F1/a.pdf",
        "url_private": "https://files.slack.com/files-pri/T1-F1/a.pdf"
    }"#,
    )
    .unwrap();
    assert_eq!(info.url(), Some("https://team.slack.com/files/U1/F1/a.pdf"));

    let info = serde_json::from_str::<FileInfo>(
        r#"{
        "id": "F1",
        "url_private": "https://files.slack.com/files-pri/T1-F1/a.pdf"
    }"#,
    )
    .unwrap();
    assert_eq!(
        info.url(),
        Some("https://files.slack.com/files-pri/T1-F1/a.pdf")
    );
}

#[test]
pub fn test_deserialize_unicode_text_object() {
    let deserialized = serde_json::from_str::<TextObject>(
        r#"{ "type": "mrkdwn", "text": "그아아" }"#,
    )
    .unwrap();

    assert_eq!(deserialized.ty, TextObjectType::Markdown);
    assert_eq!(deserialized.text, "그아아");
}

#[test]
pub fn test_block_element_roundtrip_keeps_accessory_beside_text() {
    let section = BlockElement::Section(SectionBlock {
        text: Some(TextObject::markdown("hello")),
        fields: None,
        accessory: Some(Box::new(BlockElement::Image(ImageBlock {
            image_url: "https://example.com/a.png".to_string(),
            alt_text: "a".to_string(),
            title: None,
            block_id: None,
        }))),
        block_id: None,
    });

    let json = serde_json::to_string(&section).unwrap();
    assert_eq!(
        json,
        r#"{"type":"section","text":{"type":"mrkdwn","text":"hello"},"accessory":{"type":"image","image_url":"https://example.com/a.png","alt_text":"a"}}"#
    );
    assert_eq!(
        serde_json::from_str::<BlockElement>(&json).unwrap(),
        section
    );
}

#[test]
pub fn test_timestamp_to_system_time() {
    let ts = StrTimeStamp::from("1355517523.000005");
    assert!(ts.to_system_time().is_some());

    let ts = StrTimeStamp::from("not-a-ts");
    assert_eq!(ts.to_system_time(), None);
}

#[test]
pub fn test_out_of_range_timestamp() {
    for raw in ["1e19", "99999999999999999999", "1e400"] {
        let ts = StrTimeStamp::from(raw);
        assert_eq!(ts.to_system_time(), None, "{}", raw);
        assert_eq!(format!("{:?}", ts), format!("{}(None)", raw));
    }

    let resp = serde_json::from_str::<ChatResponse>(r#"{"ok":true,"ts":"1e19"}"#).unwrap();
    assert!(format!("{:?}", resp).contains("1e19(None)"));
}
