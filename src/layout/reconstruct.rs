//! Layout reconstruction - rebuild panel nesting from flat rectangles
//!
//! The host can only attach a panel after an existing one, or stack it behind
//! one as a tab. Restoring an arbitrary arrangement therefore means deriving
//! an ordered sequence of splits from the saved rectangles:
//!
//! ```text
//! all visible panels ──► bbox ──► best band bounded by straight cuts
//!                                    │
//!            ┌───────────────────────┼───────────────────────┐
//!         before                   within                  after
//!      (new task)         first = panel filling it       (new task)
//!                      siblings ──► cross-axis tasks
//! ```
//!
//! Tasks are processed breadth-first from a queue. Each child task splits its
//! own `first` panel against the `first` of the task that spawned it, so a
//! reference is always placed before anything is attached to it.
//!
//! Every split against a panel carves a region off the space that panel
//! currently holds, so the regions around one `first` must be carved
//! outermost first: before and after, then the rest of the band.

use std::collections::VecDeque;
use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::geometry::{group_by_span, proportion, BBox, Orientation, PanelRect, Span, SplitKind};
use super::host::{resolve_panel, DockHost};
use super::state::LayoutState;
use super::{resize, tabs};

/// One structural step of a restore plan
#[derive(Clone, Debug, PartialEq)]
pub struct SplitOp {
    /// Panel already placed
    pub reference: String,
    /// Panel attached after the reference
    pub panel: String,
    pub orientation: Orientation,
    /// Exchange contents first, because the saved layout has the reference after the panel
    pub swap: bool,
}

impl fmt::Display for SplitOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.swap {
            write!(f, "swap {} <-> {}, ", self.reference, self.panel)?;
        }
        write!(f, "split {} after {} ({})", self.panel, self.reference, self.orientation)
    }
}

/// A panel id that could neither be found nor produced
#[derive(Error, Debug, Clone, PartialEq)]
#[error("panel {0} could not be resolved")]
pub struct ResolutionFailure(pub String);

/// What a restore pass managed to do
#[derive(Clone, Debug, Default)]
pub struct RestoreReport {
    pub splits: usize,
    pub swaps: usize,
    pub tabified: usize,
    pub groups_restored: usize,
    pub groups_skipped: usize,
    /// Saved-hidden panels taken off screen because no tab group holds them
    pub closed: usize,
    /// Set when the split pass stopped early
    pub split_aborted: Option<ResolutionFailure>,
    /// Every id that failed to resolve, in the order encountered
    pub unresolved: Vec<String>,
    pub resized: bool,
}

impl RestoreReport {
    pub fn is_complete(&self) -> bool {
        self.split_aborted.is_none() && self.unresolved.is_empty() && self.groups_skipped == 0
    }

    pub(crate) fn note_unresolved(&mut self, id: &str) -> ResolutionFailure {
        self.unresolved.push(id.to_string());
        ResolutionFailure(id.to_string())
    }
}

/// Pending region of the partition
struct SplitTask<'a> {
    panels: Vec<&'a PanelRect>,
    /// Panel the region's first panel is attached to
    reference: Option<&'a PanelRect>,
    orientation: Option<Orientation>,
    /// Panel already holding the whole region; only the rest remains to be carved
    placed: Option<&'a PanelRect>,
}

impl<'a> SplitTask<'a> {
    fn child(panels: Vec<&'a PanelRect>, reference: &'a PanelRect, orientation: Orientation) -> Self {
        Self {
            panels,
            reference: Some(reference),
            orientation: Some(orientation),
            placed: None,
        }
    }
}

/// Band dividing a region
#[derive(Clone, Copy, Debug, PartialEq)]
struct Band {
    kind: SplitKind,
    span: Span,
    /// Some panel covers the whole span
    filled: bool,
}

/// Whether no panel crosses the line at `at` along `axis`
fn is_cut(panels: &[&PanelRect], axis: Orientation, at: f64) -> bool {
    panels.iter().all(|p| {
        let span = p.span(axis);
        at <= span.start || at >= span.end()
    })
}

fn column_first(kind: SplitKind) -> u8 {
    match kind {
        SplitKind::Row => 0,
        SplitKind::Column => 1,
    }
}

/// Choose the band that divides a region
///
/// Row groups (widths summed over a shared `y, height`) and column groups
/// (heights summed over a shared `x, width`) are ranked by how much of the
/// region they span. A row beats a column only with a strictly larger share;
/// ties go to the column, which is what ends recursion on a single panel.
/// Within a family the later, then larger, span wins.
///
/// The best group whose edges are straight cuts through the region is taken.
/// When no group qualifies the region is cut into strips instead, and a
/// region with no straight cut at all falls back to the best group. With
/// `placed` set only that panel's own groups are considered.
fn choose_band(panels: &[&PanelRect], bbox: &BBox, placed: Option<&PanelRect>) -> Option<Band> {
    let mut candidates: Vec<(f64, SplitKind, Span)> = Vec::new();
    for kind in [SplitKind::Row, SplitKind::Column] {
        let axis = kind.orientation();
        let whole = bbox.extent(axis.cross());
        for group in group_by_span(panels.iter().copied(), axis) {
            if placed.map_or(true, |p| p.span(axis) == group.span) {
                candidates.push((proportion(group.total, whole), kind, group.span));
            }
        }
    }
    candidates.sort_by(|a, b| {
        b.0.total_cmp(&a.0)
            .then(column_first(b.1).cmp(&column_first(a.1)))
            .then(b.2.start.total_cmp(&a.2.start))
            .then(b.2.size.total_cmp(&a.2.size))
    });

    let cut = candidates.iter().find(|(_, kind, span)| {
        let axis = kind.orientation();
        is_cut(panels, axis, span.start) && is_cut(panels, axis, span.end())
    });
    if let Some(&(_, kind, span)) = cut {
        return Some(Band { kind, span, filled: true });
    }
    if let Some(band) = strip_between_cuts(panels, bbox, placed) {
        return Some(band);
    }

    let (_, kind, span) = *candidates.first()?;
    debug!(?kind, ?span, "no straight cut through region");
    Some(Band { kind, span, filled: true })
}

/// Strip between neighbouring straight cuts, columns tried first
///
/// Holds `placed` when given, otherwise it is the widest strip.
fn strip_between_cuts(panels: &[&PanelRect], bbox: &BBox, placed: Option<&PanelRect>) -> Option<Band> {
    for kind in [SplitKind::Column, SplitKind::Row] {
        let axis = kind.orientation();
        let whole = bbox.span(axis);
        let mut edges: Vec<f64> = panels
            .iter()
            .flat_map(|p| [p.span(axis).start, p.span(axis).end()])
            .filter(|&at| whole.start < at && at < whole.end() && is_cut(panels, axis, at))
            .collect();
        if edges.is_empty() {
            continue;
        }
        edges.push(whole.start);
        edges.push(whole.end());
        edges.sort_by(f64::total_cmp);
        edges.dedup();

        let holds = |strip: &Span, p: &PanelRect| {
            let center = p.center(axis);
            strip.start < center && center < strip.end()
        };
        let strips: Vec<Span> = edges
            .windows(2)
            .map(|pair| Span { start: pair[0], size: pair[1] - pair[0] })
            .filter(|strip| panels.iter().any(|p| holds(strip, *p)))
            .collect();
        let span = match placed {
            Some(p) => strips.into_iter().find(|strip| holds(strip, p)),
            None => strips
                .into_iter()
                .max_by(|a, b| a.size.total_cmp(&b.size).then(a.start.total_cmp(&b.start))),
        }?;
        return Some(Band { kind, span, filled: false });
    }
    None
}

/// Derive the ordered split sequence that rebuilds the saved arrangement
///
/// Pure function of the saved geometry; nothing here touches a host.
pub fn plan_splits(state: &LayoutState) -> Vec<SplitOp> {
    let mut ops = Vec::new();
    let visible = state.visible_panels();
    if visible.is_empty() {
        return ops;
    }

    let mut queue = VecDeque::new();
    queue.push_back(SplitTask {
        panels: visible,
        reference: None,
        orientation: None,
        placed: None,
    });

    while let Some(task) = queue.pop_front() {
        let Some(bbox) = BBox::around(task.panels.iter().copied()) else {
            continue;
        };
        let Some(band) = choose_band(&task.panels, &bbox, task.placed) else {
            continue;
        };

        let (before_box, within_box, after_box) = bbox.partition(band.kind, band.span);
        let inside = |region: &BBox| -> Vec<&PanelRect> {
            task.panels.iter().copied().filter(|p| region.contains_center(p)).collect()
        };
        let before = inside(&before_box);
        let within = inside(&within_box);
        let after = inside(&after_box);

        let axis = band.kind.orientation();
        let first = match task.placed {
            Some(placed) => Some(placed),
            None if band.filled => within.iter().copied().find(|p| p.span(axis) == band.span),
            None => within.first().copied(),
        };
        let Some(first) = first else {
            warn!(
                panels = task.panels.len(),
                "no panel centred in the spanning band, region skipped"
            );
            continue;
        };
        let assigned = before.len() + within.len() + after.len();
        if assigned != task.panels.len() {
            warn!(
                lost = task.panels.len() - assigned,
                "panels on region boundaries were not assigned"
            );
        }

        if let (Some(reference), Some(orientation)) = (task.reference, task.orientation) {
            let op = SplitOp {
                reference: reference.id.clone(),
                panel: first.id.clone(),
                orientation,
                swap: reference.start(orientation) > first.start(orientation),
            };
            debug!(%op, "planned");
            ops.push(op);
        }

        for region in [before, after] {
            if !region.is_empty() {
                queue.push_back(SplitTask::child(region, first, axis));
            }
        }

        if within.iter().all(|p| p.id == first.id) {
            continue;
        }
        if band.filled {
            // `first` fills the band, so the rest sits before or after it across the band
            let cross = axis.cross();
            let (lead, trail): (Vec<&PanelRect>, Vec<&PanelRect>) = within
                .iter()
                .copied()
                .filter(|p| p.id != first.id)
                .partition(|p| p.center(cross) < first.start(cross));
            for region in [lead, trail] {
                if !region.is_empty() {
                    queue.push_back(SplitTask::child(region, first, cross));
                }
            }
        } else {
            // Nothing fills the strip; divide it again around `first`
            queue.push_back(SplitTask {
                panels: within,
                reference: None,
                orientation: None,
                placed: Some(first),
            });
        }
    }

    ops
}

/// Replay a split plan against the host
///
/// Stops at the first id that cannot be resolved; whatever was placed stays.
pub fn apply_splits<H: DockHost>(
    host: &mut H,
    ops: &[SplitOp],
    report: &mut RestoreReport,
) -> Result<(), ResolutionFailure> {
    for op in ops {
        let Some(reference) = resolve_panel(host, &op.reference) else {
            return Err(report.note_unresolved(&op.reference));
        };
        let Some(panel) = resolve_panel(host, &op.panel) else {
            return Err(report.note_unresolved(&op.panel));
        };
        if op.swap {
            host.swap_contents(reference, panel);
            report.swaps += 1;
        }
        host.split_panel(reference, panel, op.orientation);
        report.splits += 1;
    }
    Ok(())
}

/// Undo any existing tabbing so every container starts out independent
pub fn flatten<H: DockHost>(host: &mut H) {
    for panel in host.panels() {
        host.add_top_level(panel);
    }
}

/// Close every saved-hidden panel that did not end up behind a tab
///
/// Flattening docks everything, so without this a panel that was closed when
/// the layout was saved would keep a slot of its own.
pub fn close_hidden<H: DockHost>(host: &mut H, state: &LayoutState, report: &mut RestoreReport) {
    for rect in state.widget.values().filter(|p| !p.visible) {
        let Some(panel) = host.find_panel(&rect.id) else {
            continue;
        };
        if host.query_tab_partners(panel).is_empty() {
            host.close_panel(panel);
            report.closed += 1;
        }
    }
}

/// Restore a saved arrangement onto a host
///
/// Structure first, then tab groups, then size hints. An unresolved panel
/// ends the split pass early but the later passes still run.
pub fn restore<H: DockHost>(host: &mut H, state: &LayoutState) -> RestoreReport {
    let mut report = RestoreReport::default();

    flatten(host);

    let plan = plan_splits(state);
    info!(panels = state.widget.len(), ops = plan.len(), "restoring layout");
    if let Err(failure) = apply_splits(host, &plan, &mut report) {
        warn!(error = %failure, placed = report.splits, "layout restore aborted");
        report.split_aborted = Some(failure);
    }

    tabs::restore_tab_groups(host, state, &mut report);
    close_hidden(host, state, &mut report);
    report.resized = resize::apply_size_hints(host, state);

    info!(
        splits = report.splits,
        swaps = report.swaps,
        tabified = report.tabified,
        groups = report.groups_restored,
        skipped = report.groups_skipped,
        closed = report.closed,
        "layout restore finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fixtures::{assert_geometry_matches, restored_window, state_of, window_with, window_with_catalog};
    use crate::layout::host::DockHost;
    use crate::layout::snapshot::snapshot;

    fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> PanelRect {
        PanelRect::new(id, x, y, w, h)
    }

    #[test]
    fn test_single_panel_plans_nothing() {
        let state = state_of(vec![rect("only", 0.0, 0.0, 800.0, 600.0)], vec![]);
        assert!(plan_splits(&state).is_empty());

        let mut window = window_with(&["only"], 800.0, 600.0);
        let report = restore(&mut window, &state);
        assert_eq!(report.splits, 0);
        assert_eq!(report.tabified, 0);
        assert!(report.is_complete());
    }

    #[test]
    fn test_side_by_side_is_one_horizontal_split() {
        let state = state_of(
            vec![rect("left", 0.0, 0.0, 300.0, 600.0), rect("right", 300.0, 0.0, 700.0, 600.0)],
            vec![],
        );
        let plan = plan_splits(&state);
        assert_eq!(
            plan,
            vec![SplitOp {
                reference: "right".into(),
                panel: "left".into(),
                orientation: Orientation::Horizontal,
                swap: true,
            }]
        );
    }

    #[test]
    fn test_equal_proportions_choose_column() {
        // Row and column families both reach 1.0 here
        let panels = [rect("a", 0.0, 0.0, 500.0, 500.0), rect("b", 500.0, 0.0, 500.0, 500.0)];
        let refs: Vec<&PanelRect> = panels.iter().collect();
        let bbox = BBox::around(refs.iter().copied()).unwrap();
        let band = choose_band(&refs, &bbox, None).unwrap();
        assert_eq!(band.kind, SplitKind::Column);
        assert_eq!(band.span, Span { start: 500.0, size: 500.0 });
        assert!(band.filled);
    }

    #[test]
    fn test_full_width_band_chooses_row() {
        let panels = [
            rect("top", 0.0, 0.0, 1000.0, 200.0),
            rect("left", 0.0, 200.0, 300.0, 400.0),
            rect("right", 300.0, 200.0, 700.0, 400.0),
        ];
        let refs: Vec<&PanelRect> = panels.iter().collect();
        let bbox = BBox::around(refs.iter().copied()).unwrap();
        let band = choose_band(&refs, &bbox, None).unwrap();
        assert_eq!(band.kind, SplitKind::Row);
        assert_eq!(band.span, Span { start: 200.0, size: 400.0 });
    }

    #[test]
    fn test_band_siblings_are_placed() {
        let state = state_of(
            vec![
                rect("top", 0.0, 0.0, 1000.0, 200.0),
                rect("left", 0.0, 200.0, 300.0, 400.0),
                rect("right", 300.0, 200.0, 700.0, 400.0),
            ],
            vec![],
        );
        let plan = plan_splits(&state);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].panel, "top");
        assert_eq!(plan[0].orientation, Orientation::Vertical);
        assert!(plan[0].swap);
        assert_eq!(plan[1].panel, "right");
        assert_eq!(plan[1].reference, "left");
        assert_eq!(plan[1].orientation, Orientation::Horizontal);
        assert!(!plan[1].swap);
    }

    #[test]
    fn test_restores_side_by_side() {
        let rects = vec![rect("left", 0.0, 0.0, 300.0, 600.0), rect("right", 300.0, 0.0, 700.0, 600.0)];
        let (window, report) = restored_window(&rects, vec![]);
        assert_eq!(report.splits, 1);
        assert_eq!(report.swaps, 1);
        assert_geometry_matches(&window, &rects);
    }

    #[test]
    fn test_restores_three_columns() {
        let rects = vec![
            rect("a", 0.0, 0.0, 200.0, 600.0),
            rect("b", 200.0, 0.0, 300.0, 600.0),
            rect("c", 500.0, 0.0, 500.0, 600.0),
        ];
        let (window, _) = restored_window(&rects, vec![]);
        assert_geometry_matches(&window, &rects);
    }

    #[test]
    fn test_restores_header_over_two_columns() {
        let rects = vec![
            rect("top", 0.0, 0.0, 1000.0, 200.0),
            rect("left", 0.0, 200.0, 300.0, 400.0),
            rect("right", 300.0, 200.0, 700.0, 400.0),
        ];
        let (window, report) = restored_window(&rects, vec![]);
        assert_eq!(report.splits, 2);
        assert_geometry_matches(&window, &rects);
    }

    #[test]
    fn test_restores_mismatched_rows() {
        // Two rows whose column dividers do not line up
        let rects = vec![
            rect("a1", 0.0, 0.0, 600.0, 250.0),
            rect("a2", 600.0, 0.0, 400.0, 250.0),
            rect("b1", 0.0, 250.0, 300.0, 350.0),
            rect("b2", 300.0, 250.0, 700.0, 350.0),
        ];
        let (window, report) = restored_window(&rects, vec![]);
        assert_eq!(report.splits, 3);
        assert_geometry_matches(&window, &rects);
    }

    #[test]
    fn test_restores_sidebar_beside_nested_rows() {
        let rects = vec![
            rect("side", 0.0, 0.0, 300.0, 600.0),
            rect("main", 300.0, 0.0, 700.0, 300.0),
            rect("log", 300.0, 300.0, 350.0, 300.0),
            rect("find", 650.0, 300.0, 350.0, 300.0),
        ];
        let (window, report) = restored_window(&rects, vec![]);
        assert!(report.is_complete());
        assert_geometry_matches(&window, &rects);
    }

    #[test]
    fn test_restores_middle_band_with_both_sides() {
        let rects = vec![
            rect("left", 0.0, 0.0, 250.0, 600.0),
            rect("top", 250.0, 0.0, 500.0, 150.0),
            rect("middle", 250.0, 150.0, 500.0, 300.0),
            rect("bottom", 250.0, 450.0, 500.0, 150.0),
            rect("right", 750.0, 0.0, 250.0, 600.0),
        ];
        let (window, _) = restored_window(&rects, vec![]);
        assert_geometry_matches(&window, &rects);
    }

    #[test]
    fn test_unresolved_panel_aborts_without_rollback() {
        let rects = vec![
            rect("a", 0.0, 0.0, 200.0, 600.0),
            rect("b", 200.0, 0.0, 300.0, 600.0),
            rect("ghost", 500.0, 0.0, 500.0, 600.0),
        ];
        let state = state_of(rects, vec![]);
        // "ghost" is the root band, so every split references it
        let mut window = window_with(&["a", "b"], 1000.0, 600.0);
        let report = restore(&mut window, &state);

        assert_eq!(report.splits, 0);
        assert_eq!(report.split_aborted, Some(ResolutionFailure("ghost".into())));
        assert_eq!(report.unresolved, vec!["ghost".to_string()]);
        assert!(window.find_panel("a").is_some());
        assert!(window.find_panel("b").is_some());
    }

    #[test]
    fn test_abort_keeps_already_placed_splits() {
        let rects = vec![
            rect("top", 0.0, 0.0, 1000.0, 200.0),
            rect("left", 0.0, 200.0, 300.0, 400.0),
            rect("right", 300.0, 200.0, 700.0, 400.0),
        ];
        let state = state_of(rects, vec![]);
        // "right" is placed second; without it the first split still lands
        let mut window = window_with(&["top", "left"], 1000.0, 600.0);
        let report = restore(&mut window, &state);

        assert_eq!(report.splits, 1);
        assert_eq!(report.split_aborted, Some(ResolutionFailure("right".into())));
        let top = window.query_geometry(window.find_panel("top").unwrap());
        let left = window.query_geometry(window.find_panel("left").unwrap());
        assert!(top.y < left.y);
        assert_eq!(top.x, left.x);
    }

    #[test]
    fn test_missing_panels_are_produced() {
        let rects = vec![rect("left", 0.0, 0.0, 300.0, 600.0), rect("right", 300.0, 0.0, 700.0, 600.0)];
        let state = state_of(rects.clone(), vec![]);
        // Nothing is open yet; the catalog can produce both
        let mut window = window_with_catalog(&["left", "right"], &[], 1000.0, 600.0);
        let report = restore(&mut window, &state);

        assert!(report.is_complete());
        assert_geometry_matches(&window, &rects);
    }

    #[test]
    fn test_first_panel_fills_its_band() {
        // "a" sorts first in the bottom band but only "m" spans all of it
        let rects = vec![
            rect("t1", 0.0, 0.0, 500.0, 200.0),
            rect("t2", 0.0, 200.0, 500.0, 150.0),
            rect("t3", 500.0, 0.0, 500.0, 100.0),
            rect("t4", 500.0, 100.0, 500.0, 250.0),
            rect("m", 0.0, 350.0, 600.0, 250.0),
            rect("a", 600.0, 350.0, 400.0, 100.0),
            rect("b", 600.0, 450.0, 400.0, 150.0),
        ];
        let plan = plan_splits(&state_of(rects.clone(), vec![]));
        assert_eq!(
            plan[0],
            SplitOp {
                reference: "m".into(),
                panel: "t3".into(),
                orientation: Orientation::Vertical,
                swap: true,
            }
        );
        assert_eq!(
            plan[1],
            SplitOp {
                reference: "m".into(),
                panel: "a".into(),
                orientation: Orientation::Horizontal,
                swap: false,
            }
        );

        let (window, report) = restored_window(&rects, vec![]);
        assert_eq!(report.splits, 6);
        assert_geometry_matches(&window, &rects);
    }

    #[test]
    fn test_group_that_is_not_a_cut_is_passed_over() {
        // The x=780 column group covers the most, but "u2" straddles its left edge
        let rects = vec![
            rect("t1", 0.0, 0.0, 780.0, 200.0),
            rect("t2", 0.0, 200.0, 780.0, 150.0),
            rect("p5", 780.0, 0.0, 220.0, 350.0),
            rect("u1", 0.0, 350.0, 500.0, 250.0),
            rect("u2", 500.0, 350.0, 500.0, 150.0),
            rect("u3", 500.0, 500.0, 280.0, 100.0),
            rect("w", 780.0, 500.0, 220.0, 100.0),
        ];
        let refs: Vec<&PanelRect> = rects.iter().collect();
        let bbox = BBox::around(refs.iter().copied()).unwrap();
        let band = choose_band(&refs, &bbox, None).unwrap();
        assert_eq!(band.kind, SplitKind::Row);
        assert_eq!(band.span, Span { start: 350.0, size: 250.0 });
        assert!(band.filled);

        let (window, report) = restored_window(&rects, vec![]);
        assert_eq!(report.splits, 6);
        assert_geometry_matches(&window, &rects);
    }

    #[test]
    fn test_strips_without_a_filling_panel() {
        let rects = vec![
            rect("a", 0.0, 0.0, 500.0, 100.0),
            rect("b", 0.0, 100.0, 500.0, 200.0),
            rect("c", 500.0, 0.0, 500.0, 200.0),
            rect("d", 500.0, 200.0, 500.0, 100.0),
            rect("e", 0.0, 300.0, 400.0, 150.0),
            rect("f", 0.0, 450.0, 400.0, 150.0),
            rect("g", 400.0, 300.0, 600.0, 100.0),
            rect("h", 400.0, 400.0, 600.0, 200.0),
        ];
        let refs: Vec<&PanelRect> = rects.iter().collect();
        let bbox = BBox::around(refs.iter().copied()).unwrap();
        let band = choose_band(&refs, &bbox, None).unwrap();
        assert_eq!(band.kind, SplitKind::Row);
        assert_eq!(band.span, Span { start: 300.0, size: 300.0 });
        assert!(!band.filled);

        let (window, report) = restored_window(&rects, vec![]);
        assert_eq!(report.splits, 7);
        assert_geometry_matches(&window, &rects);
    }

    /// xorshift, enough to vary layouts reproducibly
    struct Rng(u64);

    impl Rng {
        fn below(&mut self, n: u64) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0 % n
        }
    }

    /// Cut `(x, y, w, h)` recursively on a 10px grid
    fn guillotine(rng: &mut Rng, (x, y, w, h): (f64, f64, f64, f64), depth: u32, out: &mut Vec<PanelRect>) {
        let cols = (w / 10.0) as u64;
        let rows = (h / 10.0) as u64;
        if depth == 0 || (cols < 2 && rows < 2) || rng.below(5) == 0 {
            out.push(rect(&format!("p{}", out.len()), x, y, w, h));
            return;
        }
        let vertical_cut = rows < 2 || (cols >= 2 && rng.below(2) == 0);
        if vertical_cut {
            let at = (1 + rng.below(cols - 1)) as f64 * 10.0;
            guillotine(rng, (x, y, at, h), depth - 1, out);
            guillotine(rng, (x + at, y, w - at, h), depth - 1, out);
        } else {
            let at = (1 + rng.below(rows - 1)) as f64 * 10.0;
            guillotine(rng, (x, y, w, at), depth - 1, out);
            guillotine(rng, (x, y + at, w, h - at), depth - 1, out);
        }
    }

    #[test]
    fn test_generated_guillotine_tilings_restore_exactly() {
        for seed in 1..=300u64 {
            let mut rng = Rng(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
            let mut rects = Vec::new();
            guillotine(&mut rng, (0.0, 0.0, 1000.0, 600.0), 5, &mut rects);

            let (window, report) = restored_window(&rects, vec![]);
            assert!(report.is_complete(), "seed {}", seed);
            assert_eq!(report.splits, rects.len() - 1, "seed {}", seed);
            assert_geometry_matches(&window, &rects);
        }
    }

    #[test]
    fn test_hidden_untabbed_panel_is_closed() {
        let main = rect("main", 0.0, 0.0, 800.0, 600.0);
        let closed = PanelRect {
            visible: false,
            ..rect("closed", 0.0, 0.0, 0.0, 0.0)
        };
        let state = state_of(vec![main.clone(), closed], vec![]);
        let mut window = window_with(&["main", "closed"], 800.0, 600.0);
        let report = restore(&mut window, &state);

        assert_eq!(report.closed, 1);
        assert!(report.is_complete());
        assert!(!window.query_geometry(window.find_panel("closed").unwrap()).visible);
        assert_geometry_matches(&window, &[main]);

        let saved = snapshot(&window);
        assert!(!saved.panel("closed").unwrap().visible);
        assert!(saved.panel("main").unwrap().visible);
    }
}
