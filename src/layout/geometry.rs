//! Geometry - panel rectangles, bounding boxes and span grouping

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tab group identifier (allocated from 1 at snapshot time)
pub type GroupId = u32;

/// Conventional docking side a panel attaches to
///
/// Persisted as the toolkit's numeric area flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DockArea {
    Left,
    Right,
    Top,
    Bottom,
}

impl Default for DockArea {
    fn default() -> Self {
        DockArea::Top
    }
}

impl From<DockArea> for u8 {
    fn from(area: DockArea) -> u8 {
        match area {
            DockArea::Left => 1,
            DockArea::Right => 2,
            DockArea::Top => 4,
            DockArea::Bottom => 8,
        }
    }
}

impl TryFrom<u8> for DockArea {
    type Error = String;

    fn try_from(flag: u8) -> Result<Self, Self::Error> {
        match flag {
            // Floating docks are saved without an area
            0 => {
                warn!("dock area flag 0, using the default area");
                Ok(DockArea::default())
            }
            1 => Ok(DockArea::Left),
            2 => Ok(DockArea::Right),
            4 => Ok(DockArea::Top),
            8 => Ok(DockArea::Bottom),
            other => Err(format!("unknown dock area flag {}", other)),
        }
    }
}

/// Stacking direction of a split
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Side by side (vertical divider)
    Horizontal,
    /// Top to bottom (horizontal divider)
    Vertical,
}

impl Orientation {
    /// The other orientation
    pub fn cross(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

/// How a region gets divided
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitKind {
    /// A horizontal band spans the full width
    Row,
    /// A vertical band spans the full height
    Column,
}

impl SplitKind {
    /// Orientation used to attach regions around the band
    pub fn orientation(self) -> Orientation {
        match self {
            SplitKind::Row => Orientation::Vertical,
            SplitKind::Column => Orientation::Horizontal,
        }
    }
}

/// Saved rectangle and grouping of one panel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelRect {
    /// Stable panel identifier (the `widget` map key is authoritative)
    #[serde(rename = "_tm_id", default)]
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub visible: bool,
    #[serde(default)]
    pub area: DockArea,
    #[serde(default)]
    pub tab_group: Option<GroupId>,
}

impl PanelRect {
    pub fn new(id: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.to_string(),
            x,
            y,
            width,
            height,
            visible: true,
            area: DockArea::Top,
            tab_group: None,
        }
    }

    /// Leading coordinate along an axis (`x` for horizontal, `y` for vertical)
    pub fn start(&self, axis: Orientation) -> f64 {
        match axis {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    /// Extent along an axis
    pub fn extent(&self, axis: Orientation) -> f64 {
        match axis {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    pub fn center(&self, axis: Orientation) -> f64 {
        self.start(axis) + self.extent(axis) / 2.0
    }

    /// Span of this panel along an axis
    pub fn span(&self, axis: Orientation) -> Span {
        Span {
            start: self.start(axis),
            size: self.extent(axis),
        }
    }

    /// Larger of the width and height proportions of `bbox`
    pub fn dominance(&self, bbox: &BBox) -> f64 {
        let x = proportion(self.width, bbox.width());
        let y = proportion(self.height, bbox.height());
        x.max(y)
    }
}

/// `part / whole`, treating an empty whole as fully spanned
pub fn proportion(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole
    } else {
        1.0
    }
}

/// Start and size along one axis (`x, width` or `y, height`)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub start: f64,
    pub size: f64,
}

impl Span {
    pub fn end(&self) -> f64 {
        self.start + self.size
    }
}

/// Minimal axis-aligned box around a set of panels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    /// Box around the given panels, `None` when there are none
    pub fn around<'a, I>(panels: I) -> Option<BBox>
    where
        I: IntoIterator<Item = &'a PanelRect>,
    {
        let mut bbox: Option<BBox> = None;
        for p in panels {
            let next = BBox {
                min_x: p.x,
                min_y: p.y,
                max_x: p.x + p.width,
                max_y: p.y + p.height,
            };
            bbox = Some(match bbox {
                None => next,
                Some(b) => BBox {
                    min_x: b.min_x.min(next.min_x),
                    min_y: b.min_y.min(next.min_y),
                    max_x: b.max_x.max(next.max_x),
                    max_y: b.max_y.max(next.max_y),
                },
            });
        }
        bbox
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn extent(&self, axis: Orientation) -> f64 {
        match axis {
            Orientation::Horizontal => self.width(),
            Orientation::Vertical => self.height(),
        }
    }

    /// The box's own span along an axis
    pub fn span(&self, axis: Orientation) -> Span {
        match axis {
            Orientation::Horizontal => Span { start: self.min_x, size: self.width() },
            Orientation::Vertical => Span { start: self.min_y, size: self.height() },
        }
    }

    /// Strict center containment, so a panel on a shared edge lands in one region only
    pub fn contains_center(&self, panel: &PanelRect) -> bool {
        let cx = panel.center(Orientation::Horizontal);
        let cy = panel.center(Orientation::Vertical);
        self.min_x < cx && cx < self.max_x && self.min_y < cy && cy < self.max_y
    }

    /// Cut into (before, within, after) around `span`
    ///
    /// A row cut slices along `y`, a column cut along `x`.
    pub fn partition(&self, kind: SplitKind, span: Span) -> (BBox, BBox, BBox) {
        match kind {
            SplitKind::Row => (
                BBox { max_y: span.start, ..*self },
                BBox { min_y: span.start, max_y: span.end(), ..*self },
                BBox { min_y: span.end(), ..*self },
            ),
            SplitKind::Column => (
                BBox { max_x: span.start, ..*self },
                BBox { min_x: span.start, max_x: span.end(), ..*self },
                BBox { min_x: span.end(), ..*self },
            ),
        }
    }
}

/// Panels sharing one span, with their extents summed along the other axis
#[derive(Clone, Debug)]
pub struct SpanGroup {
    pub span: Span,
    pub total: f64,
}

/// Group panels by their span along `axis`, summing the cross extent
///
/// Row groups use `axis = Vertical` (same `y, height`, widths summed);
/// column groups use `axis = Horizontal` (same `x, width`, heights summed).
pub fn group_by_span<'a, I>(panels: I, axis: Orientation) -> Vec<SpanGroup>
where
    I: IntoIterator<Item = &'a PanelRect>,
{
    let mut groups: Vec<SpanGroup> = Vec::new();
    for p in panels {
        let span = p.span(axis);
        let extent = p.extent(axis.cross());
        match groups.iter_mut().find(|g| g.span == span) {
            Some(group) => group.total += extent,
            None => groups.push(SpanGroup { span, total: extent }),
        }
    }
    groups
}
