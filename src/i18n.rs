use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use serde_json::Value;

const EN: &str = include_str!("../locales/en.json");

/// Flat `dotted.key -> template` table for one locale.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    locale: String,
    messages: HashMap<String, String>,
}

pub type SharedTranslations = Arc<RwLock<Translations>>;

impl Translations {
    /// The built-in English table.
    pub fn builtin() -> Self {
        let mut t = Self { locale: "en".to_string(), messages: HashMap::new() };
        if let Err(e) = t.merge_json(EN) {
            log::error!("Built-in translations are malformed: {e}");
        }
        t
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Merge a nested JSON object; later keys win.
    pub fn merge_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let mut flat = Vec::new();
        flatten("", &value, &mut flat);
        let count = flat.len();
        self.messages.extend(flat);
        Ok(count)
    }

    /// Load `<dir>/<locale>.json` over the current table.
    pub fn load_file(&mut self, dir: &Path, locale: &str) -> std::io::Result<usize> {
        let path = dir.join(format!("{locale}.json"));
        let raw = std::fs::read_to_string(&path)?;
        let count = self
            .merge_json(&raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        self.locale = locale.to_string();
        Ok(count)
    }

    /// Merge another table over this one and take its locale. Keys only
    /// present here are kept.
    pub fn absorb(&mut self, other: Translations) {
        if !other.locale.is_empty() {
            self.locale = other.locale;
        }
        self.messages.extend(other.messages);
    }

    /// Lookup; a miss yields the key itself.
    pub fn t(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Lookup with `{name}` placeholders filled from `params`.
    pub fn t_with(&self, key: &str, params: &[(&str, String)]) -> String {
        let mut out = self.t(key);
        for (name, value) in params {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() { k.clone() } else { format!("{prefix}.{k}") };
                flatten(&key, v, out);
            }
        }
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        Value::Null => {}
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

pub fn shared(translations: Translations) -> SharedTranslations {
    Arc::new(RwLock::new(translations))
}

/// Snapshot the shared table for one render.
pub fn snapshot(shared: &SharedTranslations) -> Translations {
    shared.read().unwrap_or_else(|e| e.into_inner()).clone()
}
