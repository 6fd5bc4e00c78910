//! Client-side core of the portfolio front end: where works come from, which
//! ones relate to each other, and how they are windowed for display.

pub mod api;
pub mod carousel;
pub mod config;
pub mod draft;
pub mod error;
pub mod gallery;
pub mod related;
pub mod source;

pub use api::{AdminWorkList, WorksClient};
pub use carousel::{Carousel, CarouselError, Direction, DEFAULT_PAGE_SIZE};
pub use config::{load_settings, Settings, SourceKind};
pub use draft::{is_accepted_upload, DraftError, WorkDraft};
pub use error::{Operation, WorksError};
pub use gallery::{filter_by_work_type, parse_work_type_filter, sort_newest_first, GalleryCard};
pub use related::{select_related, LoadTicket, RelatedPanel, RelatedView};
pub use source::{
    build_work_source, decode_work_list, open_snapshot_store, publish_snapshot, CachedWorkSource,
    RemoteWorkSource, UnavailableWorkSource, WorkSource, WORKS_SNAPSHOT_KEY,
};
