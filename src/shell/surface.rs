//! Rendering surface boundary
//!
//! The shell drives whatever displays the page through this narrow trait:
//! load a location, move through history, report where it currently is. The
//! shell itself only ever reacts to the resulting location changes.

use url::Url;

/// The rendering surface collaborator as the shell sees it
pub trait RenderSurface {
    /// Navigate to a new location
    fn load(&mut self, url: Url);

    /// Step back in history, if possible
    fn back(&mut self);

    /// Step forward in history, if possible
    fn forward(&mut self);

    /// The currently displayed location
    fn location(&self) -> &Url;
}

/// History-backed surface: an ordered location stack with a cursor.
///
/// Loading a location truncates any forward entries, like a browser would.
#[derive(Debug, Clone)]
pub struct HistorySurface {
    entries: Vec<Url>,
    cursor: usize,
}

impl HistorySurface {
    pub fn new(start: Url) -> Self {
        Self {
            entries: vec![start],
            cursor: 0,
        }
    }

    pub fn can_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

impl RenderSurface for HistorySurface {
    fn load(&mut self, url: Url) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(url);
        self.cursor = self.entries.len() - 1;
    }

    fn back(&mut self) {
        if self.can_back() {
            self.cursor -= 1;
        }
    }

    fn forward(&mut self) {
        if self.can_forward() {
            self.cursor += 1;
        }
    }

    fn location(&self) -> &Url {
        &self.entries[self.cursor]
    }
}
