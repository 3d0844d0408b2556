//! Tool catalog - panels the window can produce on demand

use crate::layout::{PanelState, ToolProvider};

use super::dock::PanelContent;

/// Provider over a fixed list of `(id, display name)` pairs
#[derive(Clone, Debug, Default)]
pub struct CatalogTools {
    tools: Vec<(String, String)>,
}

impl CatalogTools {
    pub fn new<I>(tools: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            tools: tools.into_iter().collect(),
        }
    }

    fn advertises(&self, id: &str) -> bool {
        self.tools.iter().any(|(tool, _)| tool == id)
    }
}

impl ToolProvider for CatalogTools {
    type Widget = PanelContent;

    fn tools(&self) -> Vec<(String, String)> {
        self.tools.clone()
    }

    fn provide(&self, id: &str, state: &PanelState) -> Option<PanelContent> {
        if !self.advertises(id) {
            return None;
        }
        Some(PanelContent {
            id: id.to_string(),
            state: state.clone(),
        })
    }
}
