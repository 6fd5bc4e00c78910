use client_core::{GalleryCard, RelatedView};
use shared::domain::{MediaKind, Work};

fn media_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
    }
}

pub fn gallery(cards: &[GalleryCard<'_>]) {
    if cards.is_empty() {
        println!("No works to display.");
        return;
    }
    for card in cards {
        println!(
            "{:<32} {:<20} [{}] {}",
            card.title,
            card.owner,
            media_label(card.media),
            card.href
        );
    }
}

pub fn admin_rows(works: &[Work]) {
    if works.is_empty() {
        println!("No works yet.");
        return;
    }
    for work in works {
        println!(
            "{}  {:<10} {:<8} {:<32} {:<20} {}",
            work.date.format("%Y-%m-%d"),
            work.id,
            work.work_type.as_str(),
            work.title,
            work.owner,
            work.tags.join(", ")
        );
    }
}

/// Prints nothing for a hidden panel.
pub fn related(view: &RelatedView<'_>) {
    match view {
        RelatedView::Hidden => {}
        RelatedView::Empty => {
            println!("Related Projects");
            println!("  No related works found.");
        }
        RelatedView::Window {
            items,
            total,
            start_index,
            offset_percent,
            can_prev,
            can_next,
        } => {
            let arrow = |enabled: bool, glyph: &'static str| if enabled { glyph } else { "-" };
            println!(
                "Related Projects  [{}] [{}]",
                arrow(*can_prev, "<"),
                arrow(*can_next, ">")
            );
            for (offset, work) in items.iter().enumerate() {
                println!(
                    "  {:>2}. {:<32} {:<20} [{}] /work/{}",
                    start_index + offset + 1,
                    work.title,
                    work.owner,
                    media_label(work.thumbnail_kind()),
                    work.id
                );
            }
            println!(
                "  showing {}-{} of {} (offset {:.1}%)",
                start_index + 1,
                start_index + items.len(),
                total,
                offset_percent
            );
        }
    }
}
