use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use super::{App, SearchOutcome};
use crate::controller::NavKey;
use crate::endpoint::SearchEndpoint;

impl<E: SearchEndpoint> App<E> {
    /// Apply a key press. Returns the outcome once the user asks to leave.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Option<SearchOutcome> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return Some(self.outcome()),
                KeyCode::Char('r') => self.controller.retry(),
                KeyCode::Char('t') => self.controller.dismiss_toast(),
                KeyCode::Char('u') => self.controller.clear(),
                KeyCode::Char('d') => self.controller.remove_selection(),
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Esc => {
                let state = self.controller.state();
                if !state.is_focused() && !state.is_open() {
                    return Some(self.outcome());
                }
                self.controller.key(NavKey::Escape);
            }
            KeyCode::Tab => {
                self.controller.key(NavKey::Tab);
                self.controller.blur();
            }
            KeyCode::BackTab => self.controller.focus(),
            KeyCode::Up => self.navigate(NavKey::Up),
            KeyCode::Down => self.navigate(NavKey::Down),
            KeyCode::Enter => self.navigate(NavKey::Enter),
            KeyCode::Backspace => {
                let mut query = self.controller.state().query().to_string();
                if query.pop().is_some() {
                    self.controller.input(query);
                }
            }
            KeyCode::Char(ch) => {
                let mut query = self.controller.state().query().to_string();
                query.push(ch);
                self.controller.input(query);
            }
            _ => {}
        }
        self.sync_list_state();
        None
    }

    /// Clicks on a dropdown row commit it; clicks on the input focus it and
    /// anywhere else starts the blur grace period.
    pub(crate) fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);

        if self.dropdown_visible() && self.results_area.contains(position) {
            if let Some(index) = self.row_at(self.results_area, position) {
                self.controller.select_index(index);
            }
        } else if self.input_area.contains(position) {
            self.controller.focus();
        } else if self.controller.state().is_focused() {
            self.controller.blur();
        }
        self.sync_list_state();
    }

    fn navigate(&mut self, key: NavKey) {
        if !self.controller.state().is_focused() {
            self.controller.focus();
        }
        self.controller.key(key);
    }

    fn row_at(&self, area: Rect, position: Position) -> Option<usize> {
        let index = self.list_state.offset() + usize::from(position.y - area.y);
        (index < self.controller.state().results().len()).then_some(index)
    }
}
