use super::*;
use crate::test_support::work;

fn filled_draft() -> WorkDraft {
    let mut draft = WorkDraft::new();
    draft.title = "Neon Nights".into();
    draft.owner = "studio".into();
    draft
}

#[test]
fn tag_selection_is_idempotent() {
    let mut draft = WorkDraft::new();
    assert!(draft.add_tag("3D"));
    assert!(!draft.add_tag("3D"));
    assert!(!draft.add_tag("  "));
    assert!(draft.add_tag("Custom Tag"));
    assert_eq!(draft.tags, vec!["3D", "Custom Tag"]);

    assert!(draft.remove_tag("3D"));
    assert!(!draft.remove_tag("3D"));
    assert_eq!(draft.tags, vec!["Custom Tag"]);
}

#[test]
fn available_tags_exclude_selected_ones() {
    let mut draft = WorkDraft::new();
    draft.add_tag("2D");
    draft.add_tag("VR");
    let available = draft.available_tags();
    assert_eq!(available.len(), PREDEFINED_TAGS.len() - 2);
    assert!(!available.contains(&"2D"));
    assert!(!available.contains(&"VR"));
    assert_eq!(available[0], "3D");
}

#[test]
fn new_blocks_start_as_empty_text() {
    let mut draft = WorkDraft::new();
    let index = draft.add_block();
    assert_eq!(index, 0);
    assert_eq!(draft.blocks[0].text(), Some(""));
}

#[test]
fn switching_kind_never_leaves_stale_payload() {
    let mut draft = WorkDraft::new();
    let index = draft.add_block();
    assert!(draft.set_block_text(index, "intro copy"));

    assert!(draft.set_block_kind(index, BlockKind::Image));
    assert_eq!(draft.blocks[index].text(), None);
    assert!(draft.push_block_media(index, "https://cdn.example.com/a.png"));
    assert!(draft.set_block_layout(index, GridLayout::Grid2));

    assert!(draft.set_block_kind(index, BlockKind::Gif));
    assert_eq!(draft.blocks[index].items().len(), 1);
    assert_eq!(draft.blocks[index].layout(), Some(GridLayout::Grid2));

    assert!(draft.set_block_kind(index, BlockKind::Text));
    assert_eq!(draft.blocks[index].text(), Some(""));
    assert!(draft.blocks[index].items().is_empty());
}

#[test]
fn payload_edits_respect_block_kind() {
    let mut draft = WorkDraft::new();
    let text = draft.add_block();
    assert!(!draft.push_block_media(text, "a.png"));
    assert!(!draft.set_block_layout(text, GridLayout::Grid4));

    let media = draft.add_block();
    draft.set_block_kind(media, BlockKind::Image);
    assert!(!draft.set_block_text(media, "caption?"));
    let item_count_before = draft.blocks[media].items().len();
    assert!(draft.push_block_media(media, "b.png"));
    assert_eq!(draft.blocks[media].items().len(), item_count_before + 1);
    assert_eq!(draft.blocks[media].items()[0].caption, "");
}

#[test]
fn out_of_range_block_edits_are_ignored() {
    let mut draft = WorkDraft::new();
    assert!(!draft.set_block_kind(0, BlockKind::Gif));
    assert!(!draft.set_block_text(3, "x"));
    assert!(!draft.remove_block(0));
}

#[test]
fn removes_blocks_by_index() {
    let mut draft = WorkDraft::new();
    draft.add_block();
    let second = draft.add_block();
    draft.set_block_text(second, "keep");
    assert!(draft.remove_block(0));
    assert_eq!(draft.blocks.len(), 1);
    assert_eq!(draft.blocks[0].text(), Some("keep"));
}

#[test]
fn date_input_is_midnight_utc() {
    let mut draft = WorkDraft::new();
    draft.set_date_from_day("2023-11-05").expect("date");
    assert_eq!(draft.date.to_rfc3339(), "2023-11-05T00:00:00+00:00");
    assert_eq!(draft.date_day(), "2023-11-05");

    assert_eq!(
        draft.set_date_from_day("05/11/2023"),
        Err(DraftError::InvalidDate("05/11/2023".into()))
    );
    assert_eq!(draft.date_day(), "2023-11-05");
}

#[test]
fn requires_title_and_owner() {
    let mut draft = WorkDraft::new();
    assert_eq!(draft.validate(), Err(DraftError::MissingField("title")));
    draft.title = "Title".into();
    assert_eq!(draft.to_payload(), Err(DraftError::MissingField("owner")));
    draft.owner = "owner".into();
    assert!(draft.validate().is_ok());
}

#[test]
fn payload_omits_blank_main_video() {
    let mut draft = filled_draft();
    draft.main_video_url = "   ".into();
    assert_eq!(draft.to_payload().expect("payload").main_video_url, None);

    draft.main_video_url = "https://cdn.example.com/hero.webm".into();
    assert_eq!(
        draft.to_payload().expect("payload").main_video_url.as_deref(),
        Some("https://cdn.example.com/hero.webm")
    );
}

#[test]
fn edit_mode_starts_from_existing_work() {
    let mut existing = work("w9", &["Branding", "2D"]);
    existing.main_video_url = Some("hero.mp4".into());
    existing.data = vec![ContentBlock::Text {
        text: "story".into(),
    }];

    let draft = WorkDraft::from_work(&existing);
    assert!(draft.is_edit());
    assert_eq!(draft.editing, Some(existing.id.clone()));
    assert_eq!(draft.main_video_url, "hero.mp4");

    let payload = draft.to_payload().expect("payload");
    assert_eq!(payload.clone().into_work(existing.id.clone()), existing);
}

#[test]
fn accepts_only_image_and_video_uploads() {
    assert!(is_accepted_upload(Path::new("cover.PNG")));
    assert!(is_accepted_upload(Path::new("loop.gif")));
    assert!(is_accepted_upload(Path::new("reel.mp4")));
    assert!(is_accepted_upload(Path::new("clip.mov")));
    assert!(!is_accepted_upload(Path::new("notes.txt")));
    assert!(!is_accepted_upload(Path::new("no_extension")));
}
