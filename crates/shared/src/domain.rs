use std::{collections::HashSet, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::protocol::{ContentBlockRecord, WorkRecord};

const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "webm", "mov"];

/// Tags offered by the admin editor. Works may carry tags outside this list.
pub const PREDEFINED_TAGS: [&str; 12] = [
    "2D",
    "3D",
    "Line Drawing Animation",
    "Branding",
    "Music Video",
    "Content Planning",
    "VR",
    "Cinematic",
    "Graphic Design",
    "Midea Art",
    "SNS Contents",
    "Character Modeling",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkId(pub String);

impl WorkId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Records with a missing or unrecognised type decode as [`WorkType::Work`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    #[default]
    Work,
    Original,
}

impl WorkType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Original => "original",
        }
    }
}

impl<'de> Deserialize<'de> for WorkType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .and_then(|value| value.parse().ok())
            .unwrap_or_default())
    }
}

impl FromStr for WorkType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "work" => Ok(Self::Work),
            "original" => Ok(Self::Original),
            other => Err(format!("unknown work type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridLayout {
    #[default]
    #[serde(rename = "grid-1")]
    Grid1,
    #[serde(rename = "grid-2")]
    Grid2,
    #[serde(rename = "grid-3")]
    Grid3,
    #[serde(rename = "grid-4")]
    Grid4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Text,
    Image,
    Gif,
}

impl BlockKind {
    pub fn is_media(self) -> bool {
        matches!(self, Self::Image | Self::Gif)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

impl MediaItem {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: String::new(),
        }
    }
}

/// One section of a work's detail body. Exactly one payload shape is active,
/// selected by the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ContentBlockRecord", into = "ContentBlockRecord")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Image {
        layout: GridLayout,
        items: Vec<MediaItem>,
    },
    Gif {
        layout: GridLayout,
        items: Vec<MediaItem>,
    },
}

impl Default for ContentBlock {
    fn default() -> Self {
        Self::Text {
            text: String::new(),
        }
    }
}

impl ContentBlock {
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Text { .. } => BlockKind::Text,
            Self::Image { .. } => BlockKind::Image,
            Self::Gif { .. } => BlockKind::Gif,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn layout(&self) -> Option<GridLayout> {
        match self {
            Self::Image { layout, .. } | Self::Gif { layout, .. } => Some(*layout),
            Self::Text { .. } => None,
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        match self {
            Self::Image { items, .. } | Self::Gif { items, .. } => items,
            Self::Text { .. } => &[],
        }
    }

    /// Converts the block to `kind`. Media payloads move between media kinds;
    /// anything else starts empty.
    pub fn into_kind(self, kind: BlockKind) -> Self {
        match (self, kind) {
            (block, kind) if block.kind() == kind => block,
            (Self::Image { layout, items } | Self::Gif { layout, items }, BlockKind::Image) => {
                Self::Image { layout, items }
            }
            (Self::Image { layout, items } | Self::Gif { layout, items }, BlockKind::Gif) => {
                Self::Gif { layout, items }
            }
            (_, BlockKind::Text) => Self::Text {
                text: String::new(),
            },
            (Self::Text { .. }, BlockKind::Image) => Self::Image {
                layout: GridLayout::default(),
                items: Vec::new(),
            },
            (Self::Text { .. }, BlockKind::Gif) => Self::Gif {
                layout: GridLayout::default(),
                items: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn of(url: &str) -> Self {
        if is_video_asset(url) {
            Self::Video
        } else {
            Self::Image
        }
    }
}

/// True when the reference ends in a video extension (mp4, webm, mov), any case.
pub fn is_video_asset(url: &str) -> bool {
    url.rsplit_once('.').is_some_and(|(_, ext)| {
        VIDEO_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(candidate))
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WorkRecord", into = "WorkRecord")]
pub struct Work {
    pub id: WorkId,
    pub title: String,
    pub subtitle: String,
    pub owner: String,
    pub date: DateTime<Utc>,
    pub work_type: WorkType,
    pub tags: Vec<String>,
    pub thumbnail: String,
    pub main_video_url: Option<String>,
    pub data: Vec<ContentBlock>,
}

impl Work {
    pub fn tag_set(&self) -> HashSet<&str> {
        self.tags.iter().map(String::as_str).collect()
    }

    pub fn shares_tag_with(&self, tags: &HashSet<&str>) -> bool {
        self.tags.iter().any(|tag| tags.contains(tag.as_str()))
    }

    pub fn thumbnail_kind(&self) -> MediaKind {
        MediaKind::of(&self.thumbnail)
    }
}
