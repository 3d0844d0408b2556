//! Window Manager - in-memory docking host.
//!
//! This module provides a complete docking host that the layout core can
//! drive through [`DockHost`](crate::layout::DockHost):
//!
//! - **window**: `DockWindow`, the host itself
//! - **layout**: Split tree of tab stacks and its geometry
//! - **dock**: Dock containers and their content
//! - **tools**: Catalog of tools the window can produce
//!
//! # Module Hierarchy
//!
//! ```text
//! wm/
//! ├── mod.rs     - Module exports
//! ├── window.rs  - DockWindow (DockHost implementation)
//! ├── layout.rs  - Layout tree, TabStack, Rect
//! ├── dock.rs    - Dock, PanelContent
//! └── tools.rs   - CatalogTools provider
//! ```

pub mod dock;
pub mod layout;
pub mod tools;
pub mod window;

pub use dock::{Dock, DockId, PanelContent};
pub use layout::{Layout, Rect, TabStack};
pub use tools::CatalogTools;
pub use window::DockWindow;
