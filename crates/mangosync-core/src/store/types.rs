use serde::{Deserialize, Serialize};

/// One line of a MangoHud-style config file.
///
/// `value == None` is a bare directive line with no `=` (e.g. `no_display`),
/// which round-trips as a single token. There is no comment or quoting
/// syntax in this format; a line either splits on its first `=` or it
/// doesn't.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: Option<String>,
}

/// Ordered mirror of a config file's lines.
///
/// Order is the file's line order, including bare and blank lines. Mutation
/// goes through [`ConfigDocument::set`] only, which keeps keys unique among
/// touched entries (duplicates already present in the file are preserved
/// until one of them is set).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    entries: Vec<ConfigEntry>,
}

impl ConfigDocument {
    /// Parse file contents, one entry per line.
    ///
    /// A line splits on its first `=`: key is the trimmed text before,
    /// value the trimmed text after (which may itself contain `=`).
    /// A line without `=` becomes a bare entry holding the whole trimmed
    /// line, so blank lines survive a round-trip as empty bare entries.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(|line| match line.split_once('=') {
                Some((key, value)) => ConfigEntry {
                    key: key.trim().to_string(),
                    value: Some(value.trim().to_string()),
                },
                None => ConfigEntry {
                    key: line.trim().to_string(),
                    value: None,
                },
            })
            .collect();
        Self { entries }
    }

    /// Serialize back to file form: `key\n` for bare entries, `key=value\n`
    /// otherwise.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.key);
            if let Some(value) = &entry.value {
                out.push('=');
                out.push_str(value);
            }
            out.push('\n');
        }
        out
    }

    /// Set `key` to `value`.
    ///
    /// Replaces the first entry with a matching key, keeping its position;
    /// appends a new entry at the end when no entry matches.
    pub fn set(&mut self, key: &str, value: Option<&str>) {
        let value = value.map(str::to_string);
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.value = value;
        } else {
            self.entries.push(ConfigEntry {
                key: key.to_string(),
                value,
            });
        }
    }

    /// First entry with a matching key, if any.
    pub fn get(&self, key: &str) -> Option<&ConfigEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
