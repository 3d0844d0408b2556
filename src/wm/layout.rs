//! Layout - split tree of tab stacks

use std::mem;

use crate::layout::Orientation;

use super::dock::DockId;

/// Screen rectangle of a stack
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Docks sharing one slot, one of them in front
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabStack {
    pub docks: Vec<DockId>,
    /// Index of the frontmost dock
    pub current: usize,
}

impl TabStack {
    pub fn new(dock: DockId) -> Self {
        Self {
            docks: vec![dock],
            current: 0,
        }
    }

    pub fn front(&self) -> Option<DockId> {
        self.docks.get(self.current).copied()
    }

    pub fn contains(&self, dock: DockId) -> bool {
        self.docks.contains(&dock)
    }

    /// Bring `dock` to the front, false if it is not in this stack
    pub fn raise(&mut self, dock: DockId) -> bool {
        match self.docks.iter().position(|d| *d == dock) {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }

    /// Drop `dock`, keeping the same dock in front where possible
    fn remove(&mut self, dock: DockId) {
        if let Some(index) = self.docks.iter().position(|d| *d == dock) {
            self.docks.remove(index);
            if index < self.current || self.current >= self.docks.len() {
                self.current = self.current.saturating_sub(1);
            }
        }
    }
}

/// Layout node - binary tree structure
#[derive(Clone, Debug, PartialEq)]
pub enum Layout {
    /// A leaf holding a tab stack
    Tabs(TabStack),
    /// A split containing two child layouts
    Split {
        direction: Orientation,
        first: Box<Layout>,
        second: Box<Layout>,
    },
}

impl Layout {
    /// Create a new layout with a single dock
    pub fn new(dock: DockId) -> Self {
        Layout::Tabs(TabStack::new(dock))
    }

    /// Put `new` directly after the stack holding `target`
    pub fn split(&mut self, target: DockId, new: DockId, direction: Orientation) -> bool {
        match self {
            Layout::Tabs(stack) => {
                if !stack.contains(target) {
                    return false;
                }
                let leaf = mem::replace(self, Layout::new(new));
                *self = Layout::Split {
                    direction,
                    first: Box::new(leaf),
                    second: Box::new(Layout::new(new)),
                };
                true
            }
            Layout::Split { first, second, .. } => {
                first.split(target, new, direction) || second.split(target, new, direction)
            }
        }
    }

    /// Append `new` to the stack holding `target`
    pub fn tabify(&mut self, target: DockId, new: DockId) -> bool {
        match self.stack_of_mut(target) {
            Some(stack) => {
                stack.docks.push(new);
                true
            }
            None => false,
        }
    }

    /// Remove a dock from the layout, returns the remaining layout or None if empty
    ///
    /// A split left with one child collapses into that child.
    pub fn remove(self, dock: DockId) -> Option<Layout> {
        match self {
            Layout::Tabs(mut stack) => {
                stack.remove(dock);
                if stack.docks.is_empty() {
                    None
                } else {
                    Some(Layout::Tabs(stack))
                }
            }
            Layout::Split { direction, first, second } => {
                match (first.remove(dock), second.remove(dock)) {
                    (None, Some(remaining)) | (Some(remaining), None) => Some(remaining),
                    (Some(f), Some(s)) => Some(Layout::Split {
                        direction,
                        first: Box::new(f),
                        second: Box::new(s),
                    }),
                    (None, None) => None,
                }
            }
        }
    }

    pub fn contains(&self, dock: DockId) -> bool {
        self.stack_of(dock).is_some()
    }

    pub fn stack_of(&self, dock: DockId) -> Option<&TabStack> {
        match self {
            Layout::Tabs(stack) => stack.contains(dock).then_some(stack),
            Layout::Split { first, second, .. } => first.stack_of(dock).or_else(|| second.stack_of(dock)),
        }
    }

    pub fn stack_of_mut(&mut self, dock: DockId) -> Option<&mut TabStack> {
        match self {
            Layout::Tabs(stack) => {
                if stack.contains(dock) {
                    Some(stack)
                } else {
                    None
                }
            }
            Layout::Split { first, second, .. } => match first.stack_of_mut(dock) {
                Some(stack) => Some(stack),
                None => second.stack_of_mut(dock),
            },
        }
    }

    /// Get all dock IDs in this layout, stacks in tab order
    pub fn dock_ids(&self) -> Vec<DockId> {
        match self {
            Layout::Tabs(stack) => stack.docks.clone(),
            Layout::Split { first, second, .. } => {
                let mut ids = first.dock_ids();
                ids.extend(second.dock_ids());
                ids
            }
        }
    }

    /// Preferred `(width, height)` of this subtree
    ///
    /// Extents add up along a split and take the larger child across it.
    pub fn preferred<F>(&self, pref: &F) -> (f64, f64)
    where
        F: Fn(DockId) -> (f64, f64),
    {
        match self {
            Layout::Tabs(stack) => stack.front().map(pref).unwrap_or((0.0, 0.0)),
            Layout::Split { direction, first, second } => {
                let (w1, h1) = first.preferred(pref);
                let (w2, h2) = second.preferred(pref);
                match direction {
                    Orientation::Horizontal => (w1 + w2, h1.max(h2)),
                    Orientation::Vertical => (w1.max(w2), h1 + h2),
                }
            }
        }
    }

    /// Calculate the rectangle of every stack
    ///
    /// Each split divides its rectangle in proportion to its children's
    /// preferred extents along the split axis.
    pub fn calculate_positions<'a, F>(&'a self, rect: Rect, pref: &F) -> Vec<(&'a TabStack, Rect)>
    where
        F: Fn(DockId) -> (f64, f64),
    {
        match self {
            Layout::Tabs(stack) => vec![(stack, rect)],
            Layout::Split { direction, first, second } => {
                let (w1, h1) = first.preferred(pref);
                let (w2, h2) = second.preferred(pref);
                let (a, b, whole) = match direction {
                    Orientation::Horizontal => (w1, w2, rect.width),
                    Orientation::Vertical => (h1, h2, rect.height),
                };
                let lead = if a + b > 0.0 { whole * a / (a + b) } else { whole / 2.0 };

                let (first_rect, second_rect) = match direction {
                    // Split left/right
                    Orientation::Horizontal => (
                        Rect { width: lead, ..rect },
                        Rect {
                            x: rect.x + lead,
                            width: rect.width - lead,
                            ..rect
                        },
                    ),
                    // Split top/bottom
                    Orientation::Vertical => (
                        Rect { height: lead, ..rect },
                        Rect {
                            y: rect.y + lead,
                            height: rect.height - lead,
                            ..rect
                        },
                    ),
                };

                let mut positions = first.calculate_positions(first_rect, pref);
                positions.extend(second.calculate_positions(second_rect, pref));
                positions
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even(_: DockId) -> (f64, f64) {
        (100.0, 100.0)
    }

    fn full() -> Rect {
        Rect { x: 0.0, y: 0.0, width: 1000.0, height: 600.0 }
    }

    #[test]
    fn test_split_inserts_after_target() {
        let mut layout = Layout::new(1);
        assert!(layout.split(1, 2, Orientation::Horizontal));
        assert!(layout.split(1, 3, Orientation::Vertical));
        assert_eq!(layout.dock_ids(), vec![1, 3, 2]);
        assert!(!layout.split(9, 4, Orientation::Vertical));
    }

    #[test]
    fn test_remove_collapses_split() {
        let mut layout = Layout::new(1);
        layout.split(1, 2, Orientation::Horizontal);
        layout.split(2, 3, Orientation::Vertical);

        let layout = layout.remove(2).unwrap();
        assert_eq!(
            layout,
            Layout::Split {
                direction: Orientation::Horizontal,
                first: Box::new(Layout::new(1)),
                second: Box::new(Layout::new(3)),
            }
        );
        assert!(Layout::new(1).remove(1).is_none());
    }

    #[test]
    fn test_tabify_and_remove_keeps_front() {
        let mut layout = Layout::new(1);
        layout.tabify(1, 2);
        layout.tabify(1, 3);
        layout.stack_of_mut(3).unwrap().raise(3);

        let layout = layout.remove(1).unwrap();
        let stack = layout.stack_of(2).unwrap();
        assert_eq!(stack.docks, vec![2, 3]);
        assert_eq!(stack.front(), Some(3));
    }

    #[test]
    fn test_positions_follow_preferred_sizes() {
        let mut layout = Layout::new(1);
        layout.split(1, 2, Orientation::Horizontal);
        layout.split(2, 3, Orientation::Vertical);
        let pref = |dock: DockId| match dock {
            1 => (300.0, 600.0),
            _ => (700.0, 300.0),
        };

        let positions = layout.calculate_positions(full(), &pref);
        let rects: Vec<Rect> = positions.iter().map(|(_, r)| *r).collect();
        assert_eq!(rects[0], Rect { x: 0.0, y: 0.0, width: 300.0, height: 600.0 });
        assert_eq!(rects[1], Rect { x: 300.0, y: 0.0, width: 700.0, height: 300.0 });
        assert_eq!(rects[2], Rect { x: 300.0, y: 300.0, width: 700.0, height: 300.0 });
    }

    #[test]
    fn test_equal_preferences_divide_evenly() {
        let mut layout = Layout::new(1);
        layout.split(1, 2, Orientation::Horizontal);
        let positions = layout.calculate_positions(full(), &even);
        assert_eq!(positions[0].1.width, 500.0);
        assert_eq!(positions[1].1.x, 500.0);
        assert_eq!(layout.preferred(&even), (200.0, 100.0));
    }
}
