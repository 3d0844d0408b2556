//! Persisted layout document
//!
//! ```json
//! {
//!   "widget":    { "<panel id>": { "x": 0, "y": 0, "width": 300, "height": 600,
//!                                  "visible": true, "area": 4, "tab_group": null } },
//!   "tab_group": { "1": ["<panel id>", "<panel id>"] },
//!   "area":      { "4": ["<panel id>"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::geometry::{DockArea, GroupId, PanelRect};

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("failed to read layout {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write layout {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed layout: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to encode layout: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Flat saved state: panel rectangles, tab groups and area membership
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutState {
    /// Panel id -> rectangle
    pub widget: BTreeMap<String, PanelRect>,
    /// Group id -> members, in tab order
    #[serde(default)]
    pub tab_group: BTreeMap<GroupId, Vec<String>>,
    /// Dock area -> panel ids (informational)
    #[serde(default)]
    pub area: BTreeMap<DockArea, Vec<String>>,
}

impl LayoutState {
    /// Parse a layout document
    pub fn from_json(json: &str) -> Result<Self> {
        let mut state: LayoutState = serde_json::from_str(json).map_err(LayoutError::Malformed)?;
        state.normalize();
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(LayoutError::Encode)
    }

    /// Load a layout file
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| LayoutError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let state = Self::from_json(&json)?;
        debug!(path = %path.display(), panels = state.widget.len(), "layout loaded");
        Ok(state)
    }

    /// Write a layout file, replacing any previous one atomically
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let write_err = |source| LayoutError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, path).map_err(write_err)?;
        debug!(path = %path.display(), panels = self.widget.len(), "layout saved");
        Ok(())
    }

    /// Insert a panel record keyed by its id
    pub fn insert(&mut self, rect: PanelRect) {
        self.widget.insert(rect.id.clone(), rect);
    }

    pub fn panel(&self, id: &str) -> Option<&PanelRect> {
        self.widget.get(id)
    }

    /// Panels marked visible, in id order
    pub fn visible_panels(&self) -> Vec<&PanelRect> {
        self.widget.values().filter(|p| p.visible).collect()
    }

    /// Copy map keys into the records and report grouping inconsistencies
    fn normalize(&mut self) {
        for (id, rect) in self.widget.iter_mut() {
            if rect.id != *id {
                rect.id = id.clone();
            }
        }
        for problem in self.problems() {
            warn!("{}", problem);
        }
    }

    /// Describe every breach of the panel/tab-group membership invariant
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (group, members) in &self.tab_group {
            for id in members {
                match self.widget.get(id) {
                    None => problems.push(format!("tab group {} lists unknown panel {}", group, id)),
                    Some(rect) if rect.tab_group != Some(*group) => problems.push(format!(
                        "panel {} is listed in tab group {} but records {:?}",
                        id, group, rect.tab_group
                    )),
                    Some(_) => {}
                }
            }
            if members.iter().filter(|id| self.widget.get(*id).map_or(false, |p| p.visible)).count() != 1 {
                problems.push(format!("tab group {} does not have exactly one visible member", group));
            }
        }
        for rect in self.widget.values() {
            if let Some(group) = rect.tab_group {
                let listed = self
                    .tab_group
                    .get(&group)
                    .map_or(0, |members| members.iter().filter(|m| **m == rect.id).count());
                if listed != 1 {
                    problems.push(format!(
                        "panel {} names tab group {} but appears {} times in it",
                        rect.id, group, listed
                    ));
                }
            }
        }
        problems
    }
}
