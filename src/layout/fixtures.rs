//! Shared helpers for layout tests

use super::geometry::{BBox, GroupId, PanelRect};
use super::host::{DockHost, ToolRegistry};
use super::reconstruct::{restore, RestoreReport};
use super::state::LayoutState;
use crate::wm::{CatalogTools, DockWindow};

/// Saved state from rectangles and `(group, members)` pairs
pub fn state_of(rects: Vec<PanelRect>, groups: Vec<(GroupId, Vec<&str>)>) -> LayoutState {
    let mut state = LayoutState::default();
    for rect in rects {
        state.insert(rect);
    }
    for (group, members) in groups {
        for id in &members {
            if let Some(rect) = state.widget.get_mut(*id) {
                rect.tab_group = Some(group);
            }
        }
        state
            .tab_group
            .insert(group, members.into_iter().map(String::from).collect());
    }
    state
}

/// Window whose catalog holds exactly the tools that are open
pub fn window_with(open: &[&str], width: f64, height: f64) -> DockWindow {
    window_with_catalog(open, open, width, height)
}

pub fn window_with_catalog(catalog: &[&str], open: &[&str], width: f64, height: f64) -> DockWindow {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(CatalogTools::new(
        catalog.iter().map(|id| (id.to_string(), id.to_string())),
    )));
    let mut window = DockWindow::new(width, height, registry);
    for id in open {
        window.open_tool(id);
    }
    window
}

/// Restore `rects` into a window sized to their bounding box
pub fn restored_window(rects: &[PanelRect], groups: Vec<(GroupId, Vec<&str>)>) -> (DockWindow, RestoreReport) {
    let bbox = BBox::around(rects.iter()).unwrap();
    let ids: Vec<&str> = rects.iter().map(|r| r.id.as_str()).collect();
    let mut window = window_with(&ids, bbox.max_x, bbox.max_y);
    let state = state_of(rects.to_vec(), groups);
    let report = restore(&mut window, &state);
    (window, report)
}

/// Every rectangle reappears exactly, on a visible panel
pub fn assert_geometry_matches(window: &DockWindow, rects: &[PanelRect]) {
    for rect in rects.iter().filter(|r| r.visible) {
        let handle = window
            .find_panel(&rect.id)
            .unwrap_or_else(|| panic!("{} not found", rect.id));
        let geometry = window.query_geometry(handle);
        assert!(geometry.visible, "{} not visible", rect.id);
        assert_eq!(
            (geometry.x, geometry.y, geometry.width, geometry.height),
            (rect.x, rect.y, rect.width, rect.height),
            "{}",
            rect.id
        );
    }
}
