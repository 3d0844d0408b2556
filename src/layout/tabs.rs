//! Tab-group reconstruction
//!
//! Runs once the split structure is in place. Each group's saved-visible
//! member already sits in the right slot; the others are stacked behind it
//! and the stack is then reordered by swapping contents, since tabify can
//! only append.

use tracing::{debug, warn};

use super::geometry::GroupId;
use super::host::{resolve_panel, DockHost};
use super::reconstruct::{ResolutionFailure, RestoreReport};
use super::state::LayoutState;

/// Rebuild every saved tab group, skipping the ones that cannot be restored
pub fn restore_tab_groups<H: DockHost>(host: &mut H, state: &LayoutState, report: &mut RestoreReport) {
    for (group, members) in &state.tab_group {
        match restore_group(host, state, *group, members, report) {
            Ok(true) => report.groups_restored += 1,
            Ok(false) => report.groups_skipped += 1,
            Err(failure) => {
                warn!(group, error = %failure, "tab group restore aborted");
                report.groups_skipped += 1;
            }
        }
    }
}

/// `Ok(false)` when the group has no saved-visible member
fn restore_group<H: DockHost>(
    host: &mut H,
    state: &LayoutState,
    group: GroupId,
    members: &[String],
    report: &mut RestoreReport,
) -> Result<bool, ResolutionFailure> {
    let Some(visible) = members
        .iter()
        .find(|id| state.panel(id).map_or(false, |p| p.visible))
    else {
        warn!(group, members = ?members, "can't find visible tab");
        return Ok(false);
    };

    let Some(front) = resolve_panel(host, visible) else {
        return Err(report.note_unresolved(visible));
    };

    // Container order of the stack as tabify builds it
    let mut ordered = vec![front];
    for id in members.iter().filter(|id| *id != visible) {
        let Some(tab) = resolve_panel(host, id) else {
            return Err(report.note_unresolved(id));
        };
        host.tabify_panel(front, tab);
        report.tabified += 1;
        ordered.push(tab);
    }

    for (slot, id) in ordered.iter().zip(members) {
        let Some(holder) = host.find_panel(id) else {
            return Err(report.note_unresolved(id));
        };
        if holder != *slot {
            host.swap_contents(holder, *slot);
            report.swaps += 1;
        }
    }

    if let Some(front) = host.find_panel(visible) {
        host.raise_panel(front);
    }
    debug!(group, members = members.len(), front = %visible, "tab group restored");
    Ok(true)
}
