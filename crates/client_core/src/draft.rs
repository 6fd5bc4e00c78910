//! Editable work draft backing the admin create/edit form.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use mime_guess::mime;
use shared::{
    domain::{BlockKind, ContentBlock, GridLayout, MediaItem, Work, WorkId, WorkType, PREDEFINED_TAGS},
    protocol::WorkPayload,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDraft {
    /// Set when editing an existing work.
    pub editing: Option<WorkId>,
    pub title: String,
    pub subtitle: String,
    pub date: DateTime<Utc>,
    pub work_type: WorkType,
    pub owner: String,
    pub tags: Vec<String>,
    pub thumbnail: String,
    pub main_video_url: String,
    pub blocks: Vec<ContentBlock>,
}

impl Default for WorkDraft {
    fn default() -> Self {
        Self {
            editing: None,
            title: String::new(),
            subtitle: String::new(),
            date: Utc::now(),
            work_type: WorkType::default(),
            owner: String::new(),
            tags: Vec::new(),
            thumbnail: String::new(),
            main_video_url: String::new(),
            blocks: Vec::new(),
        }
    }
}

impl WorkDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_work(work: &Work) -> Self {
        Self {
            editing: Some(work.id.clone()),
            title: work.title.clone(),
            subtitle: work.subtitle.clone(),
            date: work.date,
            work_type: work.work_type,
            owner: work.owner.clone(),
            tags: work.tags.clone(),
            thumbnail: work.thumbnail.clone(),
            main_video_url: work.main_video_url.clone().unwrap_or_default(),
            blocks: work.data.clone(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// Returns false for blank or already selected tags.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|existing| existing == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        self.tags.len() != before
    }

    /// Predefined tags not selected yet, in vocabulary order.
    pub fn available_tags(&self) -> Vec<&'static str> {
        PREDEFINED_TAGS
            .iter()
            .copied()
            .filter(|tag| !self.tags.iter().any(|selected| selected == tag))
            .collect()
    }

    pub fn set_date_from_day(&mut self, day: &str) -> Result<(), DraftError> {
        let parsed = NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d")
            .map_err(|_| DraftError::InvalidDate(day.to_string()))?;
        self.date = parsed.and_time(chrono::NaiveTime::MIN).and_utc();
        Ok(())
    }

    pub fn date_day(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Appends an empty text block and returns its index.
    pub fn add_block(&mut self) -> usize {
        self.blocks.push(ContentBlock::default());
        self.blocks.len() - 1
    }

    pub fn remove_block(&mut self, index: usize) -> bool {
        if index >= self.blocks.len() {
            return false;
        }
        self.blocks.remove(index);
        true
    }

    pub fn set_block_kind(&mut self, index: usize, kind: BlockKind) -> bool {
        let Some(block) = self.blocks.get_mut(index) else {
            return false;
        };
        *block = std::mem::take(block).into_kind(kind);
        true
    }

    /// Only media blocks carry a layout.
    pub fn set_block_layout(&mut self, index: usize, new_layout: GridLayout) -> bool {
        match self.blocks.get_mut(index) {
            Some(ContentBlock::Image { layout, .. } | ContentBlock::Gif { layout, .. }) => {
                *layout = new_layout;
                true
            }
            _ => false,
        }
    }

    pub fn set_block_text(&mut self, index: usize, value: &str) -> bool {
        match self.blocks.get_mut(index) {
            Some(ContentBlock::Text { text }) => {
                *text = value.to_string();
                true
            }
            _ => false,
        }
    }

    /// Adds an uploaded asset with an empty caption to a media block.
    pub fn push_block_media(&mut self, index: usize, url: &str) -> bool {
        match self.blocks.get_mut(index) {
            Some(ContentBlock::Image { items, .. } | ContentBlock::Gif { items, .. }) => {
                items.push(MediaItem::new(url));
                true
            }
            _ => false,
        }
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingField("title"));
        }
        if self.owner.trim().is_empty() {
            return Err(DraftError::MissingField("owner"));
        }
        Ok(())
    }

    pub fn to_payload(&self) -> Result<WorkPayload, DraftError> {
        self.validate()?;
        let main_video_url = self.main_video_url.trim();
        Ok(WorkPayload {
            title: self.title.trim().to_string(),
            subtitle: self.subtitle.clone(),
            date: self.date,
            work_type: self.work_type,
            owner: self.owner.trim().to_string(),
            tags: self.tags.clone(),
            thumbnail: self.thumbnail.clone(),
            main_video_url: (!main_video_url.is_empty()).then(|| main_video_url.to_string()),
            data: self.blocks.clone(),
        })
    }
}

/// Whether a local file is an image or video the uploader accepts.
pub fn is_accepted_upload(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .is_some_and(|guess| guess.type_() == mime::IMAGE || guess.type_() == mime::VIDEO)
}

#[cfg(test)]
#[path = "tests/draft_tests.rs"]
mod tests;
