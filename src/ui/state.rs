use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use throbber_widgets_tui::ThrobberState;

use super::style::Theme;
use crate::controller::SearchController;
use crate::endpoint::SearchEndpoint;

/// What the user left the search box with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub selection: Option<String>,
    pub query: String,
}

pub struct App<E: SearchEndpoint> {
    pub controller: SearchController<E>,
    pub theme: Theme,
    pub(crate) input_title: Option<String>,
    pub(crate) throbber_state: ThrobberState,
    pub(crate) list_state: ListState,
    /// Where the input box and the dropdown were last drawn, for mouse hits.
    pub(crate) input_area: Rect,
    pub(crate) results_area: Rect,
}

impl<E: SearchEndpoint> App<E> {
    pub fn new(controller: SearchController<E>) -> Self {
        Self {
            controller,
            theme: Theme::default(),
            input_title: None,
            throbber_state: ThrobberState::default(),
            list_state: ListState::default(),
            input_area: Rect::default(),
            results_area: Rect::default(),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_input_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.input_title = (!title.trim().is_empty()).then_some(title);
        self
    }

    /// Snapshot of the committed selection and the query text.
    #[must_use]
    pub fn outcome(&self) -> SearchOutcome {
        let state = self.controller.state();
        SearchOutcome {
            selection: state.selection().map(str::to_owned),
            query: state.query().to_owned(),
        }
    }

    /// The dropdown is drawn only while open with a non-blank query.
    pub(crate) fn dropdown_visible(&self) -> bool {
        let state = self.controller.state();
        state.is_open() && !state.query().trim().is_empty()
    }

    pub(crate) fn sync_list_state(&mut self) {
        self.list_state.select(self.controller.state().cursor());
    }
}
