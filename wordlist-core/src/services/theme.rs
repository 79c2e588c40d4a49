use crate::model::theme::Theme;
use crate::services::storage::{KeyValueStore, PersistenceError, THEME_KEY};

/// Saved theme, or the dark default when nothing readable is stored.
pub fn load_theme<S: KeyValueStore>(storage: &S) -> Theme {
    match storage.get(THEME_KEY) {
        Ok(Some(raw)) => Theme::from_stored(&decode(&raw)),
        Ok(None) => Theme::default(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read theme, using default");
            Theme::default()
        }
    }
}

/// Writes `theme` under the theme key. The caller keeps its in-memory value
/// whether or not this succeeds.
pub fn save_theme<S: KeyValueStore>(storage: &mut S, theme: Theme) -> Result<(), PersistenceError> {
    let encoded = serde_json::to_string(theme.as_stored()).map_err(|source| PersistenceError::Encode {
        key: THEME_KEY.to_string(),
        source,
    })?;

    match storage.set(THEME_KEY, &encoded) {
        Ok(()) => {
            tracing::info!(theme = theme.as_stored(), "theme saved");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to save theme");
            Err(e)
        }
    }
}

// Older data may hold the bare string rather than a JSON string.
fn decode(raw: &str) -> String {
    serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.trim().to_string())
}
