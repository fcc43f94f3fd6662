use ratatui::widgets::ListState;
use tracing::debug;

use crate::bucket::BucketedFeed;
use crate::fetch::FetchMsg;
use crate::host::{Host, Toast};
use crate::source::FeedItem;
use crate::view::{self, DetailView, ItemAction};

/// What the fetch has produced so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsState {
    pub items: BucketedFeed,
    pub is_loading: bool,
}

impl Default for NewsState {
    fn default() -> Self {
        Self {
            items: BucketedFeed::default(),
            is_loading: true,
        }
    }
}

pub struct App {
    pub news: NewsState,
    /// Current search query.
    pub filter: String,
    /// Whether keystrokes go to the search bar.
    pub filtering: bool,
    /// Selection over [`view::visible_items`].
    pub list_state: ListState,
    /// Pushed detail screens; empty means the list is showing.
    pub nav_stack: Vec<DetailView>,
    /// Vertical scroll of the top detail screen.
    pub detail_scroll: u16,
    /// Whether the user has requested to quit.
    pub quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            news: NewsState::default(),
            filter: String::new(),
            filtering: false,
            list_state: ListState::default(),
            nav_stack: Vec::new(),
            detail_scroll: 0,
            quit: false,
        }
    }

    /// Replace the state with the fetch outcome.
    ///
    /// A failure leaves an empty, non-loading list and raises exactly one
    /// failure toast.
    pub fn apply_fetch(&mut self, msg: FetchMsg, host: &mut dyn Host) {
        match msg {
            FetchMsg::Loaded(items) => {
                debug!(items = items.len(), "applying fetched items");
                self.news = NewsState {
                    items,
                    is_loading: false,
                };
            }
            FetchMsg::Failed(error) => {
                self.news = NewsState {
                    items: BucketedFeed::default(),
                    is_loading: false,
                };
                host.show_toast(Toast::failure("Could not parse news", error));
            }
        }
        self.clamp_selection();
    }

    pub fn visible_items(&self) -> Vec<&FeedItem> {
        view::visible_items(&self.news.items, &self.filter)
    }

    pub fn selected_item(&self) -> Option<&FeedItem> {
        let i = self.list_state.selected()?;
        self.visible_items().get(i).copied()
    }

    /// The detail screen on top of the navigation stack, if any.
    pub fn detail(&self) -> Option<&DetailView> {
        self.nav_stack.last()
    }

    // -- navigation ----------------------------------------------------------

    fn visible_len(&self) -> usize {
        self.visible_items().len()
    }

    /// Keep the selection on a visible row, selecting the first one when
    /// there was none.
    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        let selected = match (len, self.list_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.list_state.select(selected);
    }

    pub fn select_next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.visible_len() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if self.visible_len() > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }

    /// Push the detail screen for the selected row.
    pub fn show_details(&mut self) {
        let Some(detail) = self.selected_item().map(DetailView::new) else {
            return;
        };
        self.nav_stack.push(detail);
        self.detail_scroll = 0;
    }

    /// Pop back to the previous screen. Returns `false` at the root.
    pub fn pop(&mut self) -> bool {
        self.detail_scroll = 0;
        self.nav_stack.pop().is_some()
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    // -- search --------------------------------------------------------------

    pub fn start_filter(&mut self) {
        self.filtering = true;
    }

    /// Leave the search bar, keeping the query.
    pub fn commit_filter(&mut self) {
        self.filtering = false;
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.filtering = false;
        self.clamp_selection();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.list_state.select(None);
        self.clamp_selection();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.clamp_selection();
    }

    // -- actions -------------------------------------------------------------

    /// Link of whatever the user is looking at: the detail screen, or the
    /// selected row.
    fn current_link(&self) -> Option<String> {
        match self.detail() {
            Some(detail) => Some(detail.link.clone()),
            None => self.selected_item().map(|item| item.link.clone()),
        }
    }

    /// Run an item action against the current screen.
    pub fn perform(&mut self, action: ItemAction, host: &mut dyn Host) {
        let link = self.current_link();

        let toast = match (action, link) {
            (ItemAction::ShowDetails, _) => {
                if self.detail().is_none() {
                    self.show_details();
                }
                return;
            }
            (_, None) => return,
            (ItemAction::OpenInBrowser, Some(link)) => match host.open_in_browser(&link) {
                Ok(()) => Toast::success("Opened in browser"),
                Err(e) => Toast::failure("Could not open browser", format!("{e:#}")),
            },
            (ItemAction::CopyLink, Some(link)) => match host.copy_to_clipboard(&link) {
                Ok(()) => Toast::success("Copied link to clipboard"),
                Err(e) => Toast::failure("Could not copy link", format!("{e:#}")),
            },
        };
        host.show_toast(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::{DayReference, RecencyBucket};
    use crate::host::tests::RecordingHost;
    use crate::host::ToastStyle;
    use crate::source::make_item;
    use chrono::{TimeZone, Utc};

    fn sample_feed() -> BucketedFeed {
        let day = |d| Some(Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0).unwrap());
        BucketedFeed::build(
            vec![
                make_item("old", "Ancien test", day(2)),
                make_item("today", "Zelda aujourd'hui", day(10)),
                make_item("yday", "Mario hier", day(9)),
            ],
            DayReference::new(10, 9),
            &Utc,
        )
    }

    fn loaded_app() -> (App, RecordingHost) {
        let mut app = App::new();
        let mut host = RecordingHost::default();
        app.apply_fetch(FetchMsg::Loaded(sample_feed()), &mut host);
        (app, host)
    }

    fn selected_id(app: &App) -> Option<&str> {
        app.selected_item().map(|i| i.id.as_str())
    }

    // -- construction --------------------------------------------------------

    #[test]
    fn new_app_starts_loading_and_empty() {
        let app = App::new();
        assert!(app.news.is_loading);
        assert!(app.news.items.is_empty());
        assert!(!app.quit);
        assert!(app.list_state.selected().is_none());
        assert!(app.detail().is_none());
    }

    // -- apply_fetch ---------------------------------------------------------

    #[test]
    fn loaded_feed_replaces_state_and_selects_first_row() {
        let (app, host) = loaded_app();
        assert!(!app.news.is_loading);
        assert_eq!(app.news.items.len(), 3);
        assert_eq!(selected_id(&app), Some("today"));
        assert!(host.toasts.is_empty());
    }

    #[test]
    fn failed_fetch_leaves_empty_state_and_one_toast() {
        let mut app = App::new();
        let mut host = RecordingHost::default();
        app.apply_fetch(FetchMsg::Failed("connection refused".into()), &mut host);

        assert!(!app.news.is_loading);
        for bucket in RecencyBucket::ALL {
            assert!(app.news.items.get(bucket).is_empty());
        }
        assert_eq!(host.toasts.len(), 1);
        assert_eq!(host.toasts[0].style, ToastStyle::Failure);
        assert_eq!(host.toasts[0].title, "Could not parse news");
        assert_eq!(host.toasts[0].message.as_deref(), Some("connection refused"));
        assert!(app.list_state.selected().is_none());
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn select_on_empty_is_noop() {
        let mut app = App::new();
        app.select_next();
        app.select_previous();
        app.select_first();
        app.select_last();
        assert!(app.list_state.selected().is_none());
    }

    #[test]
    fn selection_walks_sections_in_display_order() {
        let (mut app, _) = loaded_app();
        assert_eq!(selected_id(&app), Some("today"));
        app.select_next();
        assert_eq!(selected_id(&app), Some("yday"));
        app.select_next();
        assert_eq!(selected_id(&app), Some("old"));
        app.select_next();
        assert_eq!(selected_id(&app), Some("old"), "clamps at last row");
        app.select_first();
        app.select_previous();
        assert_eq!(selected_id(&app), Some("today"), "clamps at first row");
        app.select_last();
        assert_eq!(selected_id(&app), Some("old"));
    }

    #[test]
    fn show_details_pushes_selected_item_and_pop_returns() {
        let (mut app, _) = loaded_app();
        app.select_next();
        app.show_details();

        let detail = app.detail().unwrap();
        assert_eq!(detail.navigation_title, "Mario hier");
        assert_eq!(detail.link, "https://www.gamekult.com/news/yday");

        assert!(app.pop());
        assert!(app.detail().is_none());
        assert!(!app.pop(), "nothing left to pop at the root");
    }

    #[test]
    fn detail_scroll_resets_on_push() {
        let (mut app, _) = loaded_app();
        app.show_details();
        app.scroll_down();
        app.scroll_down();
        app.scroll_up();
        assert_eq!(app.detail_scroll, 1);
        app.pop();
        app.show_details();
        assert_eq!(app.detail_scroll, 0);
    }

    // -- search --------------------------------------------------------------

    #[test]
    fn filter_narrows_and_reselects() {
        let (mut app, _) = loaded_app();
        app.select_last();
        app.start_filter();
        for c in "MARIO".chars() {
            app.push_filter_char(c);
        }
        assert_eq!(app.visible_items().len(), 1);
        assert_eq!(selected_id(&app), Some("yday"));

        app.commit_filter();
        assert!(!app.filtering);
        assert_eq!(app.filter, "MARIO");

        app.clear_filter();
        assert_eq!(app.visible_items().len(), 3);
    }

    #[test]
    fn filter_with_no_match_clears_selection() {
        let (mut app, _) = loaded_app();
        app.push_filter_char('x');
        assert!(app.list_state.selected().is_none());
        app.pop_filter_char();
        assert_eq!(selected_id(&app), Some("today"));
    }

    // -- actions -------------------------------------------------------------

    #[test]
    fn open_and_copy_from_list_use_selected_link() {
        let (mut app, mut host) = loaded_app();
        app.perform(ItemAction::OpenInBrowser, &mut host);
        app.perform(ItemAction::CopyLink, &mut host);

        assert_eq!(host.opened, ["https://www.gamekult.com/news/today"]);
        assert_eq!(host.copied, ["https://www.gamekult.com/news/today"]);
        assert!(host.toasts.iter().all(|t| t.style == ToastStyle::Success));
    }

    #[test]
    fn actions_in_detail_use_detail_link() {
        let (mut app, mut host) = loaded_app();
        app.select_last();
        app.perform(ItemAction::ShowDetails, &mut host);
        // Moving the list selection underneath must not change the target.
        app.select_first();
        app.perform(ItemAction::CopyLink, &mut host);

        assert_eq!(host.copied, ["https://www.gamekult.com/news/old"]);
    }

    #[test]
    fn action_failure_becomes_failure_toast() {
        let (mut app, _) = loaded_app();
        let mut host = RecordingHost {
            fail_actions: true,
            ..Default::default()
        };
        app.perform(ItemAction::OpenInBrowser, &mut host);

        assert_eq!(host.toasts.len(), 1);
        assert_eq!(host.toasts[0].style, ToastStyle::Failure);
        assert_eq!(host.toasts[0].message.as_deref(), Some("no browser"));
    }

    #[test]
    fn actions_without_selection_do_nothing() {
        let mut app = App::new();
        let mut host = RecordingHost::default();
        app.perform(ItemAction::ShowDetails, &mut host);
        app.perform(ItemAction::CopyLink, &mut host);
        assert!(app.detail().is_none());
        assert!(host.copied.is_empty());
        assert!(host.toasts.is_empty());
    }
}
