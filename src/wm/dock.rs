//! Dock - a container holding one panel's content

use crate::layout::{DockArea, PanelState};

/// Unique identifier for a dock container
pub type DockId = u64;

/// Preferred size of a freshly created dock
pub const DEFAULT_SIZE: (f64, f64) = (400.0, 300.0);

/// Widget content shown inside a dock
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelContent {
    /// Stable panel id, persisted in layout files
    pub id: String,
    pub state: PanelState,
}

impl PanelContent {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            state: PanelState::new(),
        }
    }
}

/// A dockable container
#[derive(Clone, Debug)]
pub struct Dock {
    /// Unique identifier
    pub id: DockId,
    pub content: PanelContent,
    /// Display title
    pub title: String,
    pub area: DockArea,
    /// Size the dock asks for when its split is laid out
    pub preferred: (f64, f64),
    /// Whether the title bar is drawn
    pub title_bar: bool,
}

impl Dock {
    pub fn new(id: DockId, content: PanelContent, title: &str) -> Self {
        Self {
            id,
            content,
            title: title.to_string(),
            area: DockArea::default(),
            preferred: DEFAULT_SIZE,
            title_bar: true,
        }
    }

    /// Exchange content and title with another dock
    pub fn swap_contents(&mut self, other: &mut Dock) {
        std::mem::swap(&mut self.content, &mut other.content);
        std::mem::swap(&mut self.title, &mut other.title);
    }
}
