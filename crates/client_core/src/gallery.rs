use shared::domain::{MediaKind, Work, WorkType};

/// Maps the landing page's category parameter to a filter. Anything other than
/// a known work type shows every work.
pub fn parse_work_type_filter(raw: Option<&str>) -> Option<WorkType> {
    raw.and_then(|value| value.parse().ok())
}

pub fn filter_by_work_type(works: &[Work], filter: Option<WorkType>) -> Vec<&Work> {
    works
        .iter()
        .filter(|work| filter.map_or(true, |work_type| work.work_type == work_type))
        .collect()
}

/// Newest first; works with equal dates keep their relative order.
pub fn sort_newest_first(works: &mut [Work]) {
    works.sort_by(|a, b| b.date.cmp(&a.date));
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryCard<'a> {
    pub href: String,
    pub title: &'a str,
    pub owner: &'a str,
    pub thumbnail: &'a str,
    pub media: MediaKind,
}

impl<'a> GalleryCard<'a> {
    pub fn from_work(work: &'a Work) -> Self {
        Self {
            href: format!("/work/{}", work.id),
            title: &work.title,
            owner: &work.owner,
            thumbnail: &work.thumbnail,
            media: work.thumbnail_kind(),
        }
    }
}
