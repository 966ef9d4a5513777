//! Keyboard navigation over the dropdown.
//!
//! The dropdown is either closed or open; while open the cursor is `None`
//! (nothing highlighted) or an index into the current results. Stepping past
//! either end of the list returns to `None`.

/// Keys the search box reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Escape,
    Tab,
}

/// Side effect the controller must apply after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavEffect {
    None,
    Commit(usize),
    Blur,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    open: bool,
    cursor: Option<usize>,
}

impl Navigator {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Open the dropdown. Reopening always starts with nothing highlighted.
    pub(crate) fn open(&mut self) {
        if !self.open {
            self.cursor = None;
        }
        self.open = true;
    }

    /// Close the dropdown and forget the highlighted row.
    pub(crate) fn close(&mut self) {
        self.open = false;
        self.cursor = None;
    }

    pub(crate) fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub(crate) fn handle(&mut self, key: NavKey, len: usize) -> NavEffect {
        match key {
            NavKey::Down if !self.open => self.open(),
            NavKey::Down => self.cursor = step_down(self.cursor, len),
            NavKey::Up if self.open => self.cursor = step_up(self.cursor, len),
            NavKey::Up => {}
            NavKey::Enter if !self.open => self.open(),
            NavKey::Enter => {
                return match self.cursor {
                    Some(index) if index < len => NavEffect::Commit(index),
                    // Explicit cursor selection wins; auto-commit only with nothing highlighted.
                    None if len == 1 => NavEffect::Commit(0),
                    _ => NavEffect::None,
                };
            }
            NavKey::Escape => {
                self.close();
                return NavEffect::Blur;
            }
            NavKey::Tab => self.open = false,
        }
        NavEffect::None
    }
}

fn step_down(cursor: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match cursor {
        None => Some(0),
        Some(index) if index + 1 < len => Some(index + 1),
        Some(_) => None,
    }
}

fn step_up(cursor: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match cursor {
        None => Some(len - 1),
        Some(0) => None,
        Some(index) => Some(index.min(len) - 1),
    }
}
