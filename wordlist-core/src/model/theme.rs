use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[serde(rename = "claro")]
    Light,
    #[serde(rename = "escuro")]
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

impl Theme {
    /// Only the literal `claro` selects the light theme; anything else is dark.
    pub fn from_stored(value: &str) -> Self {
        if value == "claro" {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn as_stored(&self) -> &'static str {
        match self {
            Theme::Light => "claro",
            Theme::Dark => "escuro",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
