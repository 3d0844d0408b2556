//! Host adapter - the narrow interface to the docking toolkit
//!
//! The core never touches widgets directly. Everything it needs from the
//! toolkit goes through [`DockHost`], and panels that are not instantiated
//! yet are produced through a [`ToolRegistry`] handed to the host when it is
//! constructed.

use std::fmt;
use std::hash::Hash;

use tracing::{info, warn};

use super::geometry::{DockArea, Orientation};

/// Free-form state handed to a tool provider when producing a panel
pub type PanelState = serde_json::Map<String, serde_json::Value>;

/// Live geometry of a panel container as the host reports it
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanelGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Some part of the container is actually on screen
    pub visible: bool,
}

/// Operations the layout core requires from a docking toolkit
pub trait DockHost {
    /// Opaque reference to a panel container
    type Handle: Copy + Eq + Hash + fmt::Debug;

    /// Every live panel container, in creation order
    fn panels(&self) -> Vec<Self::Handle>;

    /// Stable id of the content currently held by a container
    fn panel_id(&self, panel: Self::Handle) -> Option<String>;

    fn dock_area(&self, panel: Self::Handle) -> DockArea;

    /// Container currently holding the content with `id`
    fn find_panel(&self, id: &str) -> Option<Self::Handle>;

    /// Instantiate a panel that does not exist yet
    fn produce_panel(&mut self, id: &str, state: &PanelState) -> Option<Self::Handle>;

    /// Detach a container from any split or tab stack and dock it on its own
    fn add_top_level(&mut self, panel: Self::Handle);

    /// Attach `panel` directly after `reference` in the given orientation
    fn split_panel(&mut self, reference: Self::Handle, panel: Self::Handle, orientation: Orientation);

    /// Append `panel` to the tab stack of `onto`
    fn tabify_panel(&mut self, onto: Self::Handle, panel: Self::Handle);

    /// Exchange content and title between two containers, leaving their positions alone
    fn swap_contents(&mut self, a: Self::Handle, b: Self::Handle);

    /// Bring a container to the front of its tab stack
    fn raise_panel(&mut self, panel: Self::Handle);

    /// Take a container off screen without destroying it
    fn close_panel(&mut self, panel: Self::Handle);

    /// Whether bulk size hints are honoured
    fn supports_resize(&self) -> bool {
        true
    }

    /// Size hints along one axis, applied in order
    fn resize_panels(&mut self, panels: &[Self::Handle], sizes: &[f64], orientation: Orientation);

    fn query_geometry(&self, panel: Self::Handle) -> PanelGeometry;

    /// Whole tab stack containing `panel` (itself included) in tab order,
    /// empty when the panel is not tabbed
    fn query_tab_partners(&self, panel: Self::Handle) -> Vec<Self::Handle>;
}

/// Locate a panel by id, producing it from the registry when it is missing
pub fn resolve_panel<H: DockHost>(host: &mut H, id: &str) -> Option<H::Handle> {
    if let Some(handle) = host.find_panel(id) {
        return Some(handle);
    }
    let produced = host.produce_panel(id, &PanelState::new());
    if produced.is_none() {
        warn!(panel = id, "didn't find panel");
    }
    produced
}

/// Something that can create panels on demand
pub trait ToolProvider {
    type Widget;

    /// `(id, display name)` pairs this provider can produce
    fn tools(&self) -> Vec<(String, String)>;

    /// Produce the widget for `id`, initialised from `state`
    fn provide(&self, id: &str, state: &PanelState) -> Option<Self::Widget>;
}

/// Registry of tool providers passed to a host at construction
pub struct ToolRegistry<W> {
    providers: Vec<Box<dyn ToolProvider<Widget = W>>>,
}

impl<W> Default for ToolRegistry<W> {
    fn default() -> Self {
        Self { providers: Vec::new() }
    }
}

impl<W> ToolRegistry<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Box<dyn ToolProvider<Widget = W>>) {
        self.providers.push(provider);
    }

    /// Every advertised `(id, display name)` pair
    pub fn tools(&self) -> Vec<(String, String)> {
        self.providers.iter().flat_map(|p| p.tools()).collect()
    }

    /// Display name advertised for `id`
    pub fn display_name(&self, id: &str) -> Option<String> {
        self.tools().into_iter().find(|(tool, _)| tool == id).map(|(_, name)| name)
    }

    /// Ask the providers that advertise `id` to produce it
    pub fn provide(&self, id: &str, state: &PanelState) -> Option<W> {
        for provider in &self.providers {
            if !provider.tools().iter().any(|(tool, _)| tool == id) {
                continue;
            }
            if let Some(widget) = provider.provide(id, state) {
                info!(panel = id, "provided");
                return Some(widget);
            }
        }
        warn!(panel = id, "couldn't provide");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo(&'static str);

    impl ToolProvider for Echo {
        type Widget = String;

        fn tools(&self) -> Vec<(String, String)> {
            vec![(self.0.to_string(), self.0.to_uppercase())]
        }

        fn provide(&self, id: &str, _state: &PanelState) -> Option<String> {
            Some(format!("{}-widget", id))
        }
    }

    #[test]
    fn test_registry_only_asks_advertising_providers() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(Echo("outline")));
        registry.register(Box::new(Echo("log")));

        assert_eq!(registry.tools().len(), 2);
        assert_eq!(registry.display_name("log").as_deref(), Some("LOG"));
        assert_eq!(registry.provide("log", &PanelState::new()).as_deref(), Some("log-widget"));
        assert_eq!(registry.provide("missing", &PanelState::new()), None);
    }
}
