use serde::{Deserialize, Serialize};

/// One catalog entry from the metadata feed. Wire field names are snake_case
/// and match the Rust idents one-to-one; the convention is fixed here on the
/// type, never set through process-wide serializer state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comic {
    pub id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image_title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub explained_url: String,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub explanation: String,
    /// Pixel width; 0 until enrichment resolves it.
    #[serde(default)]
    pub width: u32,
    /// Pixel height; 0 until enrichment resolves it.
    #[serde(default)]
    pub height: u32,
}

/// Last-known dimension outcome for one comic id. `width == 0` is the
/// unresolved sentinel; any positive width is resolved and final.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionRecord {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

impl DimensionRecord {
    pub fn sentinel(id: u32) -> Self {
        Self {
            id,
            width: 0,
            height: 0,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.width > 0
    }
}
