//! Resize pass - saved sizes as hints, dominant panels first

use tracing::debug;

use super::geometry::{BBox, Orientation, PanelRect};
use super::host::DockHost;
use super::state::LayoutState;

/// Visible panels ordered by how much of the layout they span, largest first
///
/// Equal dominance keeps id order.
pub fn rank_by_dominance(state: &LayoutState) -> Vec<&PanelRect> {
    let mut visible = state.visible_panels();
    let Some(bbox) = BBox::around(visible.iter().copied()) else {
        return visible;
    };
    visible.sort_by(|a, b| b.dominance(&bbox).total_cmp(&a.dominance(&bbox)));
    visible
}

/// Send recorded heights then widths to the host
///
/// Returns whether any hints were applied. Panels the host does not know are
/// left out of both lists.
pub fn apply_size_hints<H: DockHost>(host: &mut H, state: &LayoutState) -> bool {
    if !host.supports_resize() {
        debug!("host ignores size hints");
        return false;
    }

    let mut handles = Vec::new();
    let mut heights = Vec::new();
    let mut widths = Vec::new();
    for panel in rank_by_dominance(state) {
        let Some(handle) = host.find_panel(&panel.id) else {
            debug!(panel = %panel.id, "no container for size hint");
            continue;
        };
        handles.push(handle);
        heights.push(panel.height);
        widths.push(panel.width);
    }
    if handles.is_empty() {
        return false;
    }

    host.resize_panels(&handles, &heights, Orientation::Vertical);
    host.resize_panels(&handles, &widths, Orientation::Horizontal);
    debug!(panels = handles.len(), "size hints applied");
    true
}
