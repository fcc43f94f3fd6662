//! Presentation adapter.
//!
//! Turns a [`BucketedFeed`] into toolkit-agnostic view models: a sectioned
//! [`ListView`] and a per-item [`DetailView`]. Nothing here knows about
//! ratatui; [`crate::ui`] only draws what these types describe.

use chrono::{DateTime, TimeZone, Utc};

use crate::bucket::{BucketedFeed, RecencyBucket};
use crate::source::FeedItem;

pub const SEARCH_PLACEHOLDER: &str = "Filter Gamekult news...";

/// Shown instead of a date when the item has none.
const NO_DATE: &str = "--/--/----";

/// Actions offered on a list row or in the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    ShowDetails,
    OpenInBrowser,
    CopyLink,
}

impl ItemAction {
    pub const LIST: [ItemAction; 3] = [Self::ShowDetails, Self::OpenInBrowser, Self::CopyLink];
    pub const DETAIL: [ItemAction; 2] = [Self::OpenInBrowser, Self::CopyLink];

    pub fn title(self) -> &'static str {
        match self {
            Self::ShowDetails => "Show Details",
            Self::OpenInBrowser => "Open in Browser",
            Self::CopyLink => "Copy Link",
        }
    }

    /// Key hint shown in the help line.
    pub fn shortcut(self) -> &'static str {
        match self {
            Self::ShowDetails => "Enter",
            Self::OpenInBrowser => "o",
            Self::CopyLink => "c",
        }
    }
}

/// `DD/MM/YYYY`, zero-padded, in `tz`.
pub fn format_display_date<Tz>(published: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match published {
        Some(dt) => dt.with_timezone(tz).format("%d/%m/%Y").to_string(),
        None => NO_DATE.to_string(),
    }
}

/// Whether `item` survives the search query (case-insensitive title match).
pub fn matches_filter(item: &FeedItem, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || item.title.to_lowercase().contains(&query.to_lowercase())
}

/// Items that survive `query`, flattened in display order.
///
/// The position of an item in this list is the list selection index.
pub fn visible_items<'a>(feed: &'a BucketedFeed, query: &str) -> Vec<&'a FeedItem> {
    feed.sections()
        .flat_map(|(_, items)| items.iter())
        .filter(|item| matches_filter(item, query))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub title: &'a str,
    pub date: String,
    pub item: &'a FeedItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub bucket: RecencyBucket,
    pub rows: Vec<Row<'a>>,
}

impl Section<'_> {
    pub fn title(&self) -> &'static str {
        self.bucket.label()
    }
}

/// The list screen: non-empty sections only, in bucket order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<'a> {
    pub is_loading: bool,
    pub search_placeholder: &'static str,
    pub sections: Vec<Section<'a>>,
}

impl<'a> ListView<'a> {
    pub fn build<Tz>(feed: &'a BucketedFeed, query: &str, is_loading: bool, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let sections = feed
            .sections()
            .filter_map(|(bucket, items)| {
                let rows: Vec<Row<'a>> = items
                    .iter()
                    .filter(|item| matches_filter(item, query))
                    .map(|item| Row {
                        title: &item.title,
                        date: format_display_date(item.published, tz),
                        item,
                    })
                    .collect();
                (!rows.is_empty()).then_some(Section { bucket, rows })
            })
            .collect();

        Self {
            is_loading,
            search_placeholder: SEARCH_PLACEHOLDER,
            sections,
        }
    }

    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }
}

/// The detail screen for one item. Owns its data: it is built from the
/// selected item and outlives any later change to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub navigation_title: String,
    pub markdown: String,
    pub link: String,
}

impl DetailView {
    pub fn new(item: &FeedItem) -> Self {
        let mut markdown = format!("# {}\n{}\n", item.title, item.body_html);

        if let Some(author) = item.author.as_deref().filter(|a| !a.is_empty()) {
            markdown.push_str(&format!("\nAuteur : **{author}**\n"));
        }
        if let Some(url) = &item.media_url {
            markdown.push_str(&format!("\n<img src=\"{url}\" />\n"));
        }

        Self {
            navigation_title: item.title.clone(),
            markdown,
            link: item.link.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::DayReference;
    use crate::source::make_item;

    fn at(y: i32, m: u32, d: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap())
    }

    fn sample_feed() -> BucketedFeed {
        BucketedFeed::build(
            vec![
                make_item("1", "Zelda en test", at(2024, 1, 10)),
                make_item("2", "Mario Kart", at(2024, 1, 5)),
                make_item("3", "Nouveau Zelda annoncé", at(2024, 1, 4)),
            ],
            DayReference::new(10, 9),
            &Utc,
        )
    }

    // -- dates ---------------------------------------------------------------

    #[test]
    fn display_date_is_zero_padded() {
        assert_eq!(format_display_date(at(2024, 1, 3), &Utc), "03/01/2024");
        assert_eq!(format_display_date(at(2023, 12, 25), &Utc), "25/12/2023");
    }

    #[test]
    fn display_date_without_date() {
        assert_eq!(format_display_date(None, &Utc), NO_DATE);
    }

    // -- filtering -----------------------------------------------------------

    #[test]
    fn filter_is_case_insensitive_on_title() {
        let item = make_item("1", "Zelda en test", None);
        assert!(matches_filter(&item, "zelda"));
        assert!(matches_filter(&item, "  TEST "));
        assert!(matches_filter(&item, ""));
        assert!(!matches_filter(&item, "mario"));
    }

    #[test]
    fn visible_items_follow_section_order() {
        let feed = sample_feed();
        let ids: Vec<_> = visible_items(&feed, "").into_iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);

        let ids: Vec<_> = visible_items(&feed, "zelda").into_iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    // -- list ----------------------------------------------------------------

    #[test]
    fn list_view_hides_empty_sections() {
        let feed = sample_feed();
        let view = ListView::build(&feed, "", false, &Utc);

        let titles: Vec<_> = view.sections.iter().map(Section::title).collect();
        assert_eq!(titles, ["Aujourd'hui", "Précédent"]);
        assert_eq!(view.row_count(), 3);
        assert_eq!(view.search_placeholder, SEARCH_PLACEHOLDER);
    }

    #[test]
    fn list_view_filter_drops_sections_without_matches() {
        let feed = sample_feed();
        let view = ListView::build(&feed, "mario", false, &Utc);

        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].bucket, RecencyBucket::Earlier);
        let row = &view.sections[0].rows[0];
        assert_eq!(row.title, "Mario Kart");
        assert_eq!(row.date, "05/01/2024");
        assert_eq!(row.item.link, "https://www.gamekult.com/news/2");
    }

    #[test]
    fn list_view_rows_match_visible_items() {
        let feed = sample_feed();
        let view = ListView::build(&feed, "zelda", true, &Utc);
        let from_rows: Vec<_> = view
            .sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .map(|r| r.item.id.as_str())
            .collect();
        let from_items: Vec<_> = visible_items(&feed, "zelda").into_iter().map(|i| i.id.as_str()).collect();
        assert_eq!(from_rows, from_items);
        assert!(view.is_loading);
    }

    #[test]
    fn empty_feed_has_no_sections() {
        let feed = BucketedFeed::default();
        assert!(ListView::build(&feed, "", false, &Utc).sections.is_empty());
    }

    // -- detail --------------------------------------------------------------

    #[test]
    fn detail_with_author_and_media() {
        let mut item = make_item("1", "Zelda en test", at(2024, 1, 10));
        item.body_html = "<p>Un grand jeu.</p>".into();
        item.author = Some("Alice".into());
        item.media_url = Some("https://img.gamekult.com/z.jpg".into());

        let detail = DetailView::new(&item);

        assert_eq!(detail.navigation_title, "Zelda en test");
        assert_eq!(detail.link, "https://www.gamekult.com/news/1");
        assert_eq!(
            detail.markdown,
            "# Zelda en test\n<p>Un grand jeu.</p>\n\
             \nAuteur : **Alice**\n\
             \n<img src=\"https://img.gamekult.com/z.jpg\" />\n"
        );
    }

    #[test]
    fn detail_without_optional_parts() {
        let mut item = make_item("1", "Titre", None);
        item.body_html = "Corps".into();

        let detail = DetailView::new(&item);

        assert_eq!(detail.markdown, "# Titre\nCorps\n");
        assert!(!detail.markdown.contains("Auteur"));
        assert!(!detail.markdown.contains("<img"));
    }

    #[test]
    fn action_sets() {
        assert_eq!(ItemAction::LIST[0].title(), "Show Details");
        assert!(!ItemAction::DETAIL.contains(&ItemAction::ShowDetails));
    }
}
