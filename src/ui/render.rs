use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, Paragraph},
};
use throbber_widgets_tui::Throbber;
use unicode_width::UnicodeWidthStr;

use super::App;
use crate::endpoint::SearchEndpoint;
use crate::highlight::Highlighter;

const PROMPT: &str = "> ";
const DEFAULT_TITLE: &str = "Search";
const TOAST_HEIGHT: u16 = 3;

impl<E: SearchEndpoint> App<E> {
    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area().inner(Margin {
            vertical: 0,
            horizontal: 1,
        });

        let debug = self.controller.options().debug;
        let mut constraints = vec![
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ];
        if debug {
            constraints.push(Constraint::Length(1));
        }
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        self.render_input(frame, layout[0]);
        self.render_dropdown(frame, layout[1]);
        self.render_status(frame, layout[2]);
        if debug {
            self.render_debug(frame, layout[3]);
        }
        if self.controller.state().toast_visible() {
            self.render_toast(frame, area);
        }
    }

    fn render_input(&mut self, frame: &mut Frame, area: Rect) {
        self.input_area = area;
        let title = self.input_title.as_deref().unwrap_or(DEFAULT_TITLE);
        let block = Block::bordered().title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let state = self.controller.state();
        let query = state.query();
        let mut line = Line::from(Span::styled(PROMPT, self.theme.prompt_style()));
        if query.is_empty() {
            line.spans.push(Span::styled(
                self.controller.options().placeholder.as_str(),
                self.theme.placeholder_style(),
            ));
        } else {
            line.spans.push(Span::raw(query));
        }
        frame.render_widget(Paragraph::new(line), inner);

        if state.is_loading() && inner.width > 0 {
            let spinner = Throbber::default()
                .style(self.theme.placeholder_style())
                .throbber_style(self.theme.placeholder_style());
            let spinner_line = Line::from(spinner.to_symbol_span(&self.throbber_state));
            let width = (spinner_line.width() as u16).min(inner.width);
            let spinner_area = Rect {
                x: inner.right() - width,
                width,
                ..inner
            };
            frame.render_widget(Paragraph::new(spinner_line), spinner_area);
        }

        if state.is_focused() {
            let offset = (PROMPT.width() + query.width()) as u16;
            let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }

    fn render_dropdown(&mut self, frame: &mut Frame, area: Rect) {
        self.results_area = Rect::default();
        if !self.dropdown_visible() || area.height < 3 {
            return;
        }

        let state = self.controller.state();
        let results = state.results();
        if results.is_empty() {
            if state.has_searched() && !state.is_loading() && !state.has_error() {
                let empty = Paragraph::new("No results")
                    .alignment(Alignment::Center)
                    .style(self.theme.empty_style());
                frame.render_widget(empty, Rect { height: 1, ..area });
            }
            return;
        }

        let highlighter = Highlighter::new(state.query());
        let emphasis = self.theme.highlight_style();
        let items: Vec<ListItem> = results
            .iter()
            .map(|result| ListItem::new(highlighted_line(result, &highlighter, emphasis)))
            .collect();
        let height = u16::try_from(results.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let list_area = Rect { height, ..area };
        let block = Block::bordered();
        self.results_area = block.inner(list_area);

        let list = List::new(items)
            .block(block)
            .highlight_style(self.theme.row_highlight_style());
        frame.render_stateful_widget(list, list_area, &mut self.list_state);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let state = self.controller.state();
        let line = if let Some(message) = state.error().message() {
            Line::styled(message, self.theme.error_style())
        } else if let Some(selection) = state.selection() {
            Line::styled(format!("Selected: {selection}"), self.theme.selection_style())
        } else {
            return;
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_debug(&self, frame: &mut Frame, area: Rect) {
        let state = self.controller.state();
        let latency = state
            .last_latency()
            .map_or_else(|| "-".to_string(), |latency| format!("{}ms", latency.as_millis()));
        let text = format!(
            "requests: {}  latency: {latency}  errors: {}",
            state.request_count(),
            state.error().count()
        );
        frame.render_widget(
            Paragraph::new(text).style(self.theme.placeholder_style()),
            area,
        );
    }

    fn render_toast(&self, frame: &mut Frame, area: Rect) {
        let count = self.controller.state().error().count();
        let message = format!("{count} searches failed. Ctrl-R retries, Ctrl-T hides this.");
        let width = (message.width() as u16 + 4).min(area.width);
        if width == 0 || area.height < TOAST_HEIGHT {
            return;
        }
        let toast_area = Rect {
            x: area.right() - width,
            y: area.bottom() - TOAST_HEIGHT,
            width,
            height: TOAST_HEIGHT,
        };
        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Paragraph::new(message)
                .block(Block::bordered())
                .style(self.theme.toast_style()),
            toast_area,
        );
    }
}

/// Split `text` into plain and emphasized spans around query matches.
fn highlighted_line<'a>(text: &'a str, highlighter: &Highlighter, style: Style) -> Line<'a> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for range in highlighter.ranges(text) {
        if range.start > cursor {
            spans.push(Span::raw(&text[cursor..range.start]));
        }
        spans.push(Span::styled(&text[range.clone()], style));
        cursor = range.end;
    }
    if cursor < text.len() {
        spans.push(Span::raw(&text[cursor..]));
    }
    Line::from(spans)
}
