//! Drive the demo the way the binary does: payload file in, frame text out.

use std::io::Write;

use cviz_demo::cli::{RenderArgs, render};

fn payload(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn args(file: &tempfile::NamedTempFile, tool: &str, keys: &str) -> RenderArgs {
    RenderArgs {
        payload: file.path().to_path_buf(),
        tool: tool.to_string(),
        width: Some(70),
        height: None,
        keys: keys.to_string(),
        now: Some("2024-06-15T12:00:00Z".to_string()),
    }
}

#[test]
fn renders_timeline_with_fixed_now() {
    let file = payload(
        r#"{
            "title": "Release",
            "events": [
                { "title": "Freeze", "timestamp": "2024-06-12T12:00:00Z", "status": "complete" },
                { "title": "Ship", "timestamp": "not-a-date", "status": "in-progress" }
            ]
        }"#,
    );
    let lines = render(&args(&file, "createTimeline", "")).unwrap();
    let text = lines.join("\n");
    assert!(text.contains("Timeline - Release"));
    assert!(text.contains("3 days ago"));
    assert!(text.contains("not-a-date"));
    assert!(text.contains("In Progress"));
}

#[test]
fn carousel_script_scrolls_forward() {
    let items: Vec<String> = (0..6)
        .map(|i| format!(r#"{{ "content": "Card {i}" }}"#))
        .collect();
    let file = payload(&format!(
        r#"{{ "title": "Plans", "items": [{}], "itemsToScroll": 3 }}"#,
        items.join(",")
    ));
    // Right arrow of a 70-wide card covers columns 66 and 67.
    let before = render(&args(&file, "createCarousel", "")).unwrap().join("\n");
    let after = render(&args(&file, "createCarousel", "click:66:6, tick"))
        .unwrap()
        .join("\n");
    assert!(before.contains("Card 0"));
    assert!(!after.contains("Card 0"));
    assert!(after.contains("Card 3"));
}

#[test]
fn unknown_tool_and_missing_file_fail() {
    let file = payload("{}");
    let error = render(&args(&file, "createChart", "")).unwrap_err();
    assert_eq!(error.exit_code(), 2);

    let mut missing = args(&file, "createSteps", "");
    missing.payload = "/definitely/not/here.json".into();
    let error = render(&missing).unwrap_err();
    assert_eq!(error.exit_code(), 1);
    assert!(error.to_string().contains("not/here.json"));
}

#[test]
fn bad_script_is_rejected_before_rendering() {
    let file = payload(r#"{ "title": "t", "steps": [] }"#);
    let error = render(&args(&file, "createSteps", "fly")).unwrap_err();
    assert!(error.to_string().contains("fly"));
}
