//! Snapshot serializer - live panel set to flat saved state

use std::collections::HashMap;

use tracing::debug;

use super::geometry::{GroupId, PanelRect};
use super::host::DockHost;
use super::state::LayoutState;

/// Record every live panel's rectangle, area and tab membership
///
/// Read-only over the host. Group ids are allocated from 1 in the order the
/// host lists its panels; a stack is recorded the first time any of its
/// members is seen.
pub fn snapshot<H: DockHost>(host: &H) -> LayoutState {
    let mut state = LayoutState::default();
    let mut group_of: HashMap<H::Handle, GroupId> = HashMap::new();
    let mut next_group: GroupId = 0;

    for panel in host.panels() {
        let Some(id) = host.panel_id(panel) else {
            debug!(?panel, "panel without id not recorded");
            continue;
        };
        let area = host.dock_area(panel);
        state.area.entry(area).or_default().push(id.clone());

        if !group_of.contains_key(&panel) {
            let stack = host.query_tab_partners(panel);
            if stack.len() > 1 {
                next_group += 1;
                let members: Vec<String> = stack.iter().filter_map(|h| host.panel_id(*h)).collect();
                for handle in stack {
                    group_of.insert(handle, next_group);
                }
                state.tab_group.insert(next_group, members);
            }
        }

        // Geometry of a hidden tab is still recorded, only the flag differs
        let geometry = host.query_geometry(panel);
        state.insert(PanelRect {
            id,
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            visible: geometry.visible,
            area,
            tab_group: group_of.get(&panel).copied(),
        });
    }

    debug!(
        panels = state.widget.len(),
        groups = state.tab_group.len(),
        "layout snapshot taken"
    );
    state
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::layout::fixtures::{restored_window, window_with};
    use crate::layout::geometry::DockArea;
    use crate::layout::host::DockHost;
    use crate::layout::reconstruct::restore;

    /// `(id, area, group members)` for every panel
    fn identity(state: &LayoutState) -> BTreeSet<(String, DockArea, Vec<String>)> {
        state
            .widget
            .values()
            .map(|p| {
                let members = p
                    .tab_group
                    .and_then(|g| state.tab_group.get(&g))
                    .cloned()
                    .unwrap_or_default();
                (p.id.clone(), p.area, members)
            })
            .collect()
    }

    #[test]
    fn test_untabbed_panels() {
        let rects = vec![
            PanelRect::new("left", 0.0, 0.0, 300.0, 600.0),
            PanelRect::new("right", 300.0, 0.0, 700.0, 600.0),
        ];
        let (window, _) = restored_window(&rects, vec![]);
        let state = snapshot(&window);

        assert!(state.tab_group.is_empty());
        assert_eq!(state.widget.len(), 2);
        assert_eq!(state.panel("left").unwrap().width, 300.0);
        assert_eq!(state.panel("right").unwrap().x, 300.0);
        assert_eq!(state.area[&DockArea::Top].len(), 2);
        assert!(state.problems().is_empty());
    }

    #[test]
    fn test_tab_stack_recorded_once() {
        let mut window = window_with(&["outline", "log", "find"], 1000.0, 600.0);
        let log = window.find_panel("log").unwrap();
        let find = window.find_panel("find").unwrap();
        window.tabify_panel(log, find);
        window.raise_panel(find);

        let state = snapshot(&window);
        assert_eq!(state.tab_group.len(), 1);
        assert_eq!(state.tab_group[&1], vec!["log".to_string(), "find".to_string()]);
        assert_eq!(state.panel("log").unwrap().tab_group, Some(1));
        assert_eq!(state.panel("find").unwrap().tab_group, Some(1));
        assert_eq!(state.panel("outline").unwrap().tab_group, None);

        // Hidden tab keeps the slot's geometry
        let log = state.panel("log").unwrap();
        let find = state.panel("find").unwrap();
        assert!(!log.visible);
        assert!(find.visible);
        assert_eq!((log.x, log.width), (find.x, find.width));
        assert!(state.problems().is_empty());
    }

    #[test]
    fn test_round_trip_keeps_identity() {
        let mut window = window_with(&["outline", "body", "log", "find"], 1000.0, 600.0);
        let body = window.find_panel("body").unwrap();
        let log = window.find_panel("log").unwrap();
        let find = window.find_panel("find").unwrap();
        window.split_panel(body, log, crate::layout::geometry::Orientation::Vertical);
        window.tabify_panel(log, find);
        let first = snapshot(&window);

        let mut restored = window_with(&["outline", "body", "log", "find"], 1000.0, 600.0);
        let report = restore(&mut restored, &first);
        assert!(report.is_complete());
        let second = snapshot(&restored);

        assert_eq!(identity(&first), identity(&second));
        for (id, rect) in &first.widget {
            let again = second.panel(id).unwrap();
            assert_eq!(rect.visible, again.visible, "{}", id);
        }
    }
}
