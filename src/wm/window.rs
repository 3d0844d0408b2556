//! Dock window - the in-memory docking host
//!
//! Docks live in a single split tree of tab stacks. A dock that has been
//! produced but not attached yet is floating: it has no geometry and is
//! never visible.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::layout::{DockArea, DockHost, Orientation, PanelGeometry, PanelState, ToolRegistry};

use super::dock::{Dock, DockId, PanelContent};
use super::layout::{Layout, Rect, TabStack};

/// Window arranging dock containers
pub struct DockWindow {
    /// All docks, in creation order
    docks: BTreeMap<DockId, Dock>,
    /// Split tree, `None` while nothing is docked
    root: Option<Layout>,
    /// Next dock ID
    next_dock_id: DockId,
    /// Logical window dimensions
    pub width: f64,
    pub height: f64,
    /// Producers for panels that are not open yet
    registry: ToolRegistry<PanelContent>,
    resize_support: bool,
}

impl DockWindow {
    /// Create an empty window
    pub fn new(width: f64, height: f64, registry: ToolRegistry<PanelContent>) -> Self {
        Self {
            docks: BTreeMap::new(),
            root: None,
            next_dock_id: 1,
            width,
            height,
            registry,
            resize_support: true,
        }
    }

    /// Whether size hints are honoured
    pub fn set_resize_support(&mut self, enabled: bool) {
        self.resize_support = enabled;
    }

    pub fn registry(&self) -> &ToolRegistry<PanelContent> {
        &self.registry
    }

    pub fn dock(&self, id: DockId) -> Option<&Dock> {
        self.docks.get(&id)
    }

    pub fn docks(&self) -> impl Iterator<Item = &Dock> {
        self.docks.values()
    }

    pub fn root(&self) -> Option<&Layout> {
        self.root.as_ref()
    }

    pub fn is_docked(&self, id: DockId) -> bool {
        self.root.as_ref().map_or(false, |root| root.contains(id))
    }

    /// Every stack with its rectangle
    pub fn stacks(&self) -> Vec<(&TabStack, Rect)> {
        let Some(root) = &self.root else {
            return Vec::new();
        };
        let rect = Rect {
            x: 0.0,
            y: 0.0,
            width: self.width,
            height: self.height,
        };
        let pref = |id: DockId| self.docks.get(&id).map_or((0.0, 0.0), |d| d.preferred);
        root.calculate_positions(rect, &pref)
    }

    /// Open a catalog tool as a new top-level dock
    pub fn open_tool(&mut self, id: &str) -> Option<DockId> {
        if let Some(existing) = self.find_panel(id) {
            debug!(panel = id, dock = existing, "tool already open");
            return Some(existing);
        }
        let dock = self.produce_panel(id, &PanelState::new())?;
        self.dock_top_level(dock);
        Some(dock)
    }

    /// Show or hide every title bar, keyed off the first dock
    ///
    /// Returns whether title bars are now shown.
    pub fn toggle_titles(&mut self) -> bool {
        let show = !self.docks.values().next().map_or(false, |d| d.title_bar);
        self.set_titles(show);
        show
    }

    pub fn set_titles(&mut self, show: bool) {
        for dock in self.docks.values_mut() {
            dock.title_bar = show;
        }
    }

    /// Take a dock out of the tree, leaving it floating
    fn detach(&mut self, id: DockId) {
        if let Some(root) = self.root.take() {
            self.root = root.remove(id);
        }
    }

    /// Dock `id` on its own, after everything already docked
    fn dock_top_level(&mut self, id: DockId) {
        self.detach(id);
        if let Some(dock) = self.docks.get_mut(&id) {
            dock.area = DockArea::Top;
        }
        self.root = Some(match self.root.take() {
            None => Layout::new(id),
            Some(root) => Layout::Split {
                direction: Orientation::Horizontal,
                first: Box::new(root),
                second: Box::new(Layout::new(id)),
            },
        });
    }

    /// Dock a floating reference so something can be attached to it
    fn ensure_docked(&mut self, id: DockId) {
        if !self.is_docked(id) {
            self.dock_top_level(id);
        }
    }
}

impl DockHost for DockWindow {
    type Handle = DockId;

    fn panels(&self) -> Vec<DockId> {
        self.docks.keys().copied().collect()
    }

    fn panel_id(&self, panel: DockId) -> Option<String> {
        self.docks.get(&panel).map(|d| d.content.id.clone())
    }

    fn dock_area(&self, panel: DockId) -> DockArea {
        self.docks.get(&panel).map(|d| d.area).unwrap_or_default()
    }

    fn find_panel(&self, id: &str) -> Option<DockId> {
        self.docks.values().find(|d| d.content.id == id).map(|d| d.id)
    }

    fn produce_panel(&mut self, id: &str, state: &PanelState) -> Option<DockId> {
        let content = self.registry.provide(id, state)?;
        let title = self.registry.display_name(id).unwrap_or_else(|| id.to_string());

        let dock_id = self.next_dock_id;
        self.next_dock_id += 1;
        let mut dock = Dock::new(dock_id, content, &title);
        dock.title_bar = self.docks.values().next().map_or(true, |d| d.title_bar);
        self.docks.insert(dock_id, dock);
        info!(panel = id, dock = dock_id, "dock created");
        Some(dock_id)
    }

    fn add_top_level(&mut self, panel: DockId) {
        if self.docks.contains_key(&panel) {
            self.dock_top_level(panel);
        }
    }

    fn split_panel(&mut self, reference: DockId, panel: DockId, orientation: Orientation) {
        if reference == panel || !self.docks.contains_key(&reference) || !self.docks.contains_key(&panel) {
            warn!(reference, panel, "invalid split");
            return;
        }
        self.ensure_docked(reference);
        self.detach(panel);
        if let Some(root) = self.root.as_mut() {
            root.split(reference, panel, orientation);
        }
        debug!(reference, panel, %orientation, "split");
    }

    fn tabify_panel(&mut self, onto: DockId, panel: DockId) {
        if onto == panel || !self.docks.contains_key(&onto) || !self.docks.contains_key(&panel) {
            warn!(onto, panel, "invalid tabify");
            return;
        }
        self.ensure_docked(onto);
        self.detach(panel);
        if let Some(root) = self.root.as_mut() {
            root.tabify(onto, panel);
        }
        debug!(onto, panel, "tabified");
    }

    fn swap_contents(&mut self, a: DockId, b: DockId) {
        if a == b {
            return;
        }
        let Some(mut other) = self.docks.remove(&b) else {
            return;
        };
        if let Some(dock) = self.docks.get_mut(&a) {
            dock.swap_contents(&mut other);
        }
        self.docks.insert(b, other);
    }

    fn raise_panel(&mut self, panel: DockId) {
        if let Some(stack) = self.root.as_mut().and_then(|root| root.stack_of_mut(panel)) {
            stack.raise(panel);
        }
    }

    fn close_panel(&mut self, panel: DockId) {
        if self.is_docked(panel) {
            self.detach(panel);
            debug!(panel, "dock closed");
        }
    }

    fn supports_resize(&self) -> bool {
        self.resize_support
    }

    fn resize_panels(&mut self, panels: &[DockId], sizes: &[f64], orientation: Orientation) {
        for (panel, size) in panels.iter().zip(sizes) {
            if let Some(dock) = self.docks.get_mut(panel) {
                match orientation {
                    Orientation::Horizontal => dock.preferred.0 = *size,
                    Orientation::Vertical => dock.preferred.1 = *size,
                }
            }
        }
    }

    fn query_geometry(&self, panel: DockId) -> PanelGeometry {
        self.stacks()
            .into_iter()
            .find(|(stack, _)| stack.contains(panel))
            .map(|(stack, rect)| PanelGeometry {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                visible: stack.front() == Some(panel) && !rect.is_empty(),
            })
            .unwrap_or_default()
    }

    fn query_tab_partners(&self, panel: DockId) -> Vec<DockId> {
        match self.root.as_ref().and_then(|root| root.stack_of(panel)) {
            Some(stack) if stack.docks.len() > 1 => stack.docks.clone(),
            _ => Vec::new(),
        }
    }
}
