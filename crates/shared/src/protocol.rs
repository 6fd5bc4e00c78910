use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    BlockKind, ContentBlock, GridLayout, MediaItem, Work, WorkId, WorkType,
};

/// Raw work record as returned by `GET /works` and stored in the local
/// snapshot. Document stores return the identifier as `_id`, sometimes next to
/// a virtual `id`; `id` wins when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WorkId>,
    #[serde(rename = "_id", default, skip_serializing)]
    pub document_id: Option<WorkId>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub work_type: WorkType,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_video_url: Option<String>,
    #[serde(default)]
    pub data: Vec<ContentBlockRecord>,
}

/// Flat wire shape of a content block: `type` picks which of the optional
/// fields is meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlockRecord {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<GridLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<MediaItem>>,
}

/// Body of `POST /works` and `PUT /works/{id}`; the server owns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPayload {
    pub title: String,
    pub subtitle: String,
    pub date: DateTime<Utc>,
    pub work_type: WorkType,
    pub owner: String,
    pub tags: Vec<String>,
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_video_url: Option<String>,
    pub data: Vec<ContentBlock>,
}

impl From<ContentBlockRecord> for ContentBlock {
    fn from(record: ContentBlockRecord) -> Self {
        let layout = record.layout.unwrap_or_default();
        let items = record.items.unwrap_or_default();
        match record.kind {
            BlockKind::Text => Self::Text {
                text: record.text.unwrap_or_default(),
            },
            BlockKind::Image => Self::Image { layout, items },
            BlockKind::Gif => Self::Gif { layout, items },
        }
    }
}

impl From<ContentBlock> for ContentBlockRecord {
    fn from(block: ContentBlock) -> Self {
        match block {
            ContentBlock::Text { text } => Self {
                kind: BlockKind::Text,
                layout: None,
                text: Some(text),
                items: None,
            },
            ContentBlock::Image { layout, items } => Self {
                kind: BlockKind::Image,
                layout: Some(layout),
                text: None,
                items: Some(items),
            },
            ContentBlock::Gif { layout, items } => Self {
                kind: BlockKind::Gif,
                layout: Some(layout),
                text: None,
                items: Some(items),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("work record has neither `id` nor `_id`")]
pub struct MissingWorkId;

impl WorkRecord {
    pub fn work_id(&self) -> Option<&WorkId> {
        self.id.as_ref().or(self.document_id.as_ref())
    }
}

impl TryFrom<WorkRecord> for Work {
    type Error = MissingWorkId;

    fn try_from(record: WorkRecord) -> Result<Self, Self::Error> {
        let id = record.id.or(record.document_id).ok_or(MissingWorkId)?;
        Ok(Self {
            id,
            title: record.title,
            subtitle: record.subtitle.unwrap_or_default(),
            owner: record.owner,
            date: record.date.unwrap_or_default(),
            work_type: record.work_type,
            tags: record.tags,
            thumbnail: record.thumbnail,
            main_video_url: record.main_video_url.filter(|url| !url.is_empty()),
            data: record.data.into_iter().map(ContentBlock::from).collect(),
        })
    }
}

impl From<Work> for WorkRecord {
    fn from(work: Work) -> Self {
        Self {
            id: Some(work.id),
            document_id: None,
            title: work.title,
            subtitle: Some(work.subtitle),
            owner: work.owner,
            date: Some(work.date),
            work_type: work.work_type,
            tags: work.tags,
            thumbnail: work.thumbnail,
            main_video_url: work.main_video_url,
            data: work.data.into_iter().map(ContentBlockRecord::from).collect(),
        }
    }
}

impl WorkPayload {
    /// Attaches a server-assigned id, producing the work the server now holds.
    pub fn into_work(self, id: WorkId) -> Work {
        Work {
            id,
            title: self.title,
            subtitle: self.subtitle,
            owner: self.owner,
            date: self.date,
            work_type: self.work_type,
            tags: self.tags,
            thumbnail: self.thumbnail,
            main_video_url: self.main_video_url,
            data: self.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_document_store_identifier_and_defaults() {
        let work: Work = serde_json::from_value(json!({
            "_id": "665f",
            "title": "Night Drive",
            "owner": "studio",
            "workType": "original",
            "tags": ["3D", "Cinematic"],
            "thumbnail": "https://cdn.example.com/night.mov"
        }))
        .expect("decode");

        assert_eq!(work.id, WorkId::new("665f"));
        assert_eq!(work.subtitle, "");
        assert_eq!(work.date, DateTime::<Utc>::default());
        assert_eq!(work.work_type, WorkType::Original);
        assert!(work.data.is_empty());
        assert_eq!(work.main_video_url, None);
    }

    #[test]
    fn prefers_virtual_id_when_both_identifiers_are_present() {
        let works: Vec<Work> = serde_json::from_str(
            r#"[{"_id":"665f","id":"a1","title":"x","tags":["VR"]},{"_id":"b2"},{"id":"c3"}]"#,
        )
        .expect("decode");
        let ids: Vec<&str> = works.iter().map(|work| work.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b2", "c3"]);
    }

    #[test]
    fn record_without_any_identifier_is_rejected() {
        let record: WorkRecord =
            serde_json::from_value(json!({ "title": "orphan" })).expect("record decodes");
        assert_eq!(record.work_id(), None);
        assert_eq!(Work::try_from(record), Err(MissingWorkId));
        assert!(serde_json::from_value::<Work>(json!({ "title": "orphan" })).is_err());
    }

    #[test]
    fn encoded_work_carries_a_single_identifier() {
        let work: Work = serde_json::from_value(json!({ "_id": "665f" })).expect("decode");
        let value = serde_json::to_value(&work).expect("json");
        assert_eq!(value["id"], "665f");
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn block_decoding_ignores_inapplicable_fields() {
        let block: ContentBlock = serde_json::from_value(json!({
            "type": "text",
            "layout": "grid-3",
            "text": "hello",
            "items": [{ "url": "stale.png", "caption": "" }]
        }))
        .expect("decode");
        assert_eq!(
            block,
            ContentBlock::Text {
                text: "hello".into()
            }
        );

        let block: ContentBlock = serde_json::from_value(json!({
            "type": "gif",
            "layout": "grid-2",
            "text": "",
            "items": [{ "url": "loop.gif" }]
        }))
        .expect("decode");
        assert_eq!(block.layout(), Some(GridLayout::Grid2));
        assert_eq!(block.items(), &[MediaItem::new("loop.gif")]);
    }

    #[test]
    fn block_encoding_writes_only_active_payload() {
        let text = serde_json::to_value(ContentBlock::Text { text: "hi".into() }).expect("json");
        assert_eq!(text, json!({ "type": "text", "text": "hi" }));

        let image = serde_json::to_value(ContentBlock::Image {
            layout: GridLayout::Grid4,
            items: Vec::new(),
        })
        .expect("json");
        assert_eq!(image, json!({ "type": "image", "layout": "grid-4", "items": [] }));
    }

    #[test]
    fn payload_uses_camel_case_field_names() {
        let payload = WorkPayload {
            title: "t".into(),
            subtitle: String::new(),
            date: DateTime::<Utc>::default(),
            work_type: WorkType::Work,
            owner: "o".into(),
            tags: vec!["VR".into()],
            thumbnail: String::new(),
            main_video_url: Some("hero.mp4".into()),
            data: Vec::new(),
        };
        let value = serde_json::to_value(&payload).expect("json");
        assert_eq!(value["workType"], "work");
        assert_eq!(value["mainVideoUrl"], "hero.mp4");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn work_survives_snapshot_encoding() {
        let work = WorkPayload {
            title: "Brand Book".into(),
            subtitle: "2024".into(),
            date: "2024-05-01T00:00:00Z".parse().expect("date"),
            work_type: WorkType::Work,
            owner: "acme".into(),
            tags: vec!["Branding".into()],
            thumbnail: "cover.png".into(),
            main_video_url: None,
            data: vec![ContentBlock::Text {
                text: "body".into(),
            }],
        }
        .into_work(WorkId::new("w1"));

        let raw = serde_json::to_string(&vec![work.clone()]).expect("encode");
        let decoded: Vec<Work> = serde_json::from_str(&raw).expect("decode");
        assert_eq!(decoded, vec![work]);
    }
}
