//! Layout persistence - save and rebuild dock arrangements.
//!
//! A layout is saved as a flat set of panel rectangles plus tab-group
//! membership. Restoring it means deriving the split and tabify steps a
//! docking host needs to reproduce the arrangement:
//!
//! - **geometry**: Panel rectangles, bounding boxes, span grouping
//! - **state**: Persisted layout document
//! - **host**: Adapter trait the docking toolkit implements, tool registry
//! - **snapshot**: Live host to saved state
//! - **reconstruct**: Split planning and the restore entry point
//! - **tabs**: Tab stacks and their order
//! - **resize**: Saved sizes applied as hints
//!
//! ```text
//! host ──snapshot──► LayoutState ──save/load──► file
//!                         │
//!                      restore
//!                         ▼
//!       flatten ─► splits ─► tab groups ─► size hints ─► host
//! ```

pub mod geometry;
pub mod host;
pub mod reconstruct;
pub mod resize;
pub mod snapshot;
pub mod state;
pub mod tabs;

#[cfg(test)]
pub(crate) mod fixtures;

pub use geometry::{BBox, DockArea, GroupId, Orientation, PanelRect, SplitKind};
pub use host::{DockHost, PanelGeometry, PanelState, ToolProvider, ToolRegistry};
pub use reconstruct::{plan_splits, restore, RestoreReport, SplitOp};
pub use snapshot::snapshot;
pub use state::{LayoutError, LayoutState};
