//! Keyboard and visibility state of a suggestion list.

/// Keys the suggestion list reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Tab,
    Escape,
    Other,
}

impl NavKey {
    pub fn from_key(key: &str) -> Self {
        match key {
            "ArrowDown" => NavKey::ArrowDown,
            "ArrowUp" => NavKey::ArrowUp,
            "Enter" => NavKey::Enter,
            "Tab" => NavKey::Tab,
            "Escape" => NavKey::Escape,
            _ => NavKey::Other,
        }
    }
}

/// What the caller should do after a key press
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome<T> {
    /// Highlight moved; the default key action must be prevented
    Highlighted(usize),
    /// The highlighted item was chosen; the default key action must be prevented
    Selected(T),
    Hidden,
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionList<T> {
    items: Vec<T>,
    highlighted: Option<usize>,
    visible: bool,
}

impl<T> Default for SuggestionList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            highlighted: None,
            visible: false,
        }
    }
}

impl<T: Clone> SuggestionList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the suggestions; an empty list hides the dropdown
    pub fn show(&mut self, items: Vec<T>) {
        self.visible = !items.is_empty();
        self.items = items;
        self.highlighted = None;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.highlighted = None;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.hide();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Mouse hover moves the highlight too
    pub fn highlight(&mut self, index: usize) {
        if index < self.items.len() {
            self.highlighted = Some(index);
        }
    }

    pub fn handle_key(&mut self, key: NavKey) -> KeyOutcome<T> {
        let len = self.items.len();
        if len == 0 || !self.visible {
            return KeyOutcome::Ignored;
        }

        match key {
            NavKey::ArrowDown => {
                let next = self.highlighted.map_or(0, |i| (i + 1) % len);
                self.highlighted = Some(next);
                KeyOutcome::Highlighted(next)
            }
            NavKey::ArrowUp => {
                let prev = self.highlighted.map_or(len - 1, |i| (i + len - 1) % len);
                self.highlighted = Some(prev);
                KeyOutcome::Highlighted(prev)
            }
            NavKey::Enter | NavKey::Tab => match self.highlighted {
                Some(i) => {
                    let item = self.items[i].clone();
                    self.hide();
                    KeyOutcome::Selected(item)
                }
                None => KeyOutcome::Ignored,
            },
            NavKey::Escape => {
                self.hide();
                KeyOutcome::Hidden
            }
            NavKey::Other => KeyOutcome::Ignored,
        }
    }
}
