use serde::{Deserialize, Serialize};

/// Presentation settings for the chart builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Height in pixels of one small-multiples panel.
    /// The whole chart is `panel_height × panel count`.
    pub panel_height: u32,

    /// Title shown on charts while nothing is selected.
    pub placeholder_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            panel_height: 300,
            placeholder_title: "Select securities".to_string(),
        }
    }
}
