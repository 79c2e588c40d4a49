use serde_json::{json, Value};

use crate::model::theme::Theme;
use crate::services::notice::{Notice, Severity};
use crate::services::storage::KeyValueStore;
use crate::services::theme;
use crate::services::word_list::{EditError, ValidationError, WordListStore};

mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value, notice: Option<Notice>) -> String {
    let mut out = json!({
        "id": id,
        "status": "ok",
        "payload": payload
    });
    if let Some(n) = notice {
        out["notice"] = json!(n);
    }
    out.to_string()
}

fn err(id: Value, code: &str, message: impl Into<String>, severity: Severity) -> String {
    let message = message.into();
    json!({
        "id": id,
        "status": "error",
        "code": code,
        "notice": Notice::new(severity, message.clone()),
        "message": message
    })
    .to_string()
}

fn invalid_payload(id: Value, message: String) -> String {
    err(id, "INVALID_PAYLOAD", message, Severity::Error)
}

fn validation_err(id: Value, e: &ValidationError) -> String {
    err(id, e.code(), e.to_string(), Severity::Error)
}

fn edit_err(id: Value, e: &EditError) -> String {
    err(id, e.code(), e.to_string(), e.severity())
}

fn require_str<'a>(payload: &'a Value, key: &str) -> Result<&'a str, String> {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("payload.{key} must be a string"))
}

fn require_entry_id(payload: &Value, key: &str) -> Result<u32, String> {
    payload
        .get(key)
        .and_then(|v| v.as_u64())
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("payload.{key} must be a positive integer"))
}

fn text_pair(payload: &Value) -> Result<(&str, &str), String> {
    Ok((require_str(payload, "source")?, require_str(payload, "translation")?))
}

/// One connected view: the word list plus its storage, driven one request
/// line at a time. The theme is read once and then owned here.
pub struct Session<S: KeyValueStore> {
    store: WordListStore<S>,
    theme: Theme,
}

impl<S: KeyValueStore> Session<S> {
    /// Wraps `storage` and loads whatever it holds.
    pub fn open(storage: S) -> Self {
        let mut store = WordListStore::new(storage);
        store.load();
        let theme = theme::load_theme(store.storage());
        Session { store, theme }
    }

    pub fn store(&self) -> &WordListStore<S> {
        &self.store
    }

    pub fn handle(&mut self, input: &str) -> String {
        let req: Value = match serde_json::from_str(input) {
            Ok(v) => v,
            Err(_) => {
                return json!({
                    "status": "error",
                    "message": "invalid json"
                })
                .to_string();
            }
        };

        let id = get_id(&req);
        let cmd_str = get_cmd(&req);
        let payload = get_payload(&req);

        tracing::debug!(cmd = cmd_str, "request");

        match Command::from(cmd_str) {
            Command::Ping => ok(id, json!({ "message": "wordlist-core alive" }), None),

            Command::List => {
                let body = json!({
                    "entries": self.store.list_for_display(),
                    "revision": self.store.revision(),
                    "editing_id": self.store.editing_id()
                });
                ok(id, body, None)
            }

            Command::Search => {
                let term = match require_str(payload, "term") {
                    Ok(v) => v,
                    Err(e) => return invalid_payload(id, e),
                };
                let body = json!({
                    "entries": self.store.search_for_display(term),
                    "revision": self.store.revision()
                });
                ok(id, body, None)
            }

            Command::Add => {
                let (source, translation) = match text_pair(payload) {
                    Ok(v) => v,
                    Err(e) => return invalid_payload(id, e),
                };

                match self.store.add(source, translation) {
                    Ok(entry) => {
                        let body = json!({ "entry": entry, "revision": self.store.revision() });
                        self.finish(id, body, Some(Notice::success("Word added successfully!")))
                    }
                    Err(e) => validation_err(id, &e),
                }
            }

            Command::Edit => {
                let entry_id = match require_entry_id(payload, "id") {
                    Ok(v) => v,
                    Err(e) => return invalid_payload(id, e),
                };
                let (source, translation) = match text_pair(payload) {
                    Ok(v) => v,
                    Err(e) => return invalid_payload(id, e),
                };

                match self.store.edit(entry_id, source, translation) {
                    Ok(entry) => {
                        let body = json!({ "entry": entry, "revision": self.store.revision() });
                        self.finish(id, body, Some(Notice::success("Edit saved successfully!")))
                    }
                    Err(e) => edit_err(id, &e),
                }
            }

            Command::BeginEdit => {
                let entry_id = match require_entry_id(payload, "id") {
                    Ok(v) => v,
                    Err(e) => return invalid_payload(id, e),
                };

                match self.store.begin_edit(entry_id) {
                    Some(entry) => ok(id, json!({ "entry": entry, "editing_id": entry_id }), None),
                    None => edit_err(id, &EditError::NotFound(entry_id)),
                }
            }

            Command::CancelEdit => {
                self.store.cancel_edit();
                ok(id, json!({ "editing_id": Value::Null }), None)
            }

            Command::SaveEdit => {
                let (source, translation) = match text_pair(payload) {
                    Ok(v) => v,
                    Err(e) => return invalid_payload(id, e),
                };

                match self.store.save_edit(source, translation) {
                    Ok(entry) => {
                        let body = json!({ "entry": entry, "revision": self.store.revision() });
                        self.finish(id, body, Some(Notice::success("Edit saved successfully!")))
                    }
                    Err(e) => edit_err(id, &e),
                }
            }

            Command::Remove => {
                let entry_id = match require_entry_id(payload, "id") {
                    Ok(v) => v,
                    Err(e) => return invalid_payload(id, e),
                };

                let term = self.store.get(entry_id).map(|e| e.source_term.clone());
                let removed = self.store.remove(entry_id);
                let notice = if let (true, Some(term)) = (removed, term) {
                    Notice::success(format!("Word \"{term}\" removed."))
                } else {
                    Notice::warning(EditError::NotFound(entry_id).to_string())
                };
                let body = json!({ "removed": removed, "revision": self.store.revision() });
                self.finish(id, body, Some(notice))
            }

            Command::ThemeGet => ok(id, json!({ "theme": self.theme }), None),

            Command::ThemeToggle => {
                self.theme = self.theme.toggled();
                let notice = theme::save_theme(self.store.storage_mut(), self.theme)
                    .err()
                    .map(|e| Notice::warning(format!("Theme applied but not saved: {e}")));
                ok(id, json!({ "theme": self.theme }), notice)
            }

            Command::Unknown => err(id, "UNKNOWN_COMMAND", "unknown command", Severity::Error),
        }
    }

    /// Successful response to a mutation, swapping in a warning notice when a
    /// write-through failed since the last one.
    fn finish(&mut self, id: Value, payload: Value, notice: Option<Notice>) -> String {
        match self.store.take_persistence_warning() {
            Some(e) => {
                let mut out: Value = json!({
                    "id": id,
                    "status": "ok",
                    "code": "PERSISTENCE",
                    "payload": payload,
                    "notice": Notice::warning(format!("Changes are kept for now but could not be saved: {e}"))
                });
                out["payload"]["persisted"] = Value::Bool(false);
                out.to_string()
            }
            None => ok(id, payload, notice),
        }
    }
}

#[cfg(test)]
#[path = "protocol_test.rs"]
mod tests;
