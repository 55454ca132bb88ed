use std::path::Path;

use crate::{
    core::Result,
    persistence::{
        load_json_or_default,
        load_json_or_default_from,
        save_json,
    },
};

pub const SETTINGS_FILE: &str = "field_state_settings.json";

/// Composite remap labels are only shown when the old note type had more fields than this.
pub const DEFAULT_REMAP_LABEL_MIN_OLD_FIELDS: usize = 2;

pub const DEFAULT_REMAP_LABEL_TEMPLATE: &str = "{new} (was: {old})";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FieldStateSettings {
    pub remap_label_min_old_fields: usize,
    pub remap_label_template: String,
}

impl Default for FieldStateSettings {
    fn default() -> Self {
        Self {
            remap_label_min_old_fields: DEFAULT_REMAP_LABEL_MIN_OLD_FIELDS,
            remap_label_template: DEFAULT_REMAP_LABEL_TEMPLATE.to_string(),
        }
    }
}

impl FieldStateSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Self {
        load_json_or_default(SETTINGS_FILE)
    }

    pub fn load_from(path: &Path) -> Self {
        load_json_or_default_from(path)
    }

    pub fn save(&self) -> Result<()> {
        save_json(self, SETTINGS_FILE)
    }

    pub fn allows_remap_labels(&self, old_field_count: usize) -> bool {
        old_field_count > self.remap_label_min_old_fields
    }

    /// Fills `{new}` and `{old}` in a single pass so names containing braces are left alone.
    pub fn remap_label(&self, new_name: &str, old_label: &str) -> String {
        let template = self.remap_label_template.as_str();
        let mut label = String::with_capacity(template.len() + new_name.len() + old_label.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            label.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix("{new}") {
                label.push_str(new_name);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{old}") {
                label.push_str(old_label);
                rest = after;
            } else {
                label.push('{');
                rest = &tail[1..];
            }
        }
        label.push_str(rest);
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        let settings = FieldStateSettings::default();
        assert!(!settings.allows_remap_labels(0));
        assert!(!settings.allows_remap_labels(2));
        assert!(settings.allows_remap_labels(3));
    }

    #[test]
    fn test_remap_label_template() {
        let settings = FieldStateSettings::default();
        assert_eq!(settings.remap_label("Front", "Expression"), "Front (was: Expression)");

        let settings = FieldStateSettings {
            remap_label_template: "{old} → {new} {x}".to_string(),
            ..FieldStateSettings::default()
        };
        assert_eq!(settings.remap_label("{old}", "Back"), "Back → {old} {x}");
    }

    #[test]
    fn test_partial_settings_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"remap_label_min_old_fields": 0}"#).unwrap();

        let settings = FieldStateSettings::load_from(&path);
        assert_eq!(settings.remap_label_min_old_fields, 0);
        assert_eq!(settings.remap_label_template, DEFAULT_REMAP_LABEL_TEMPLATE);
        assert!(settings.allows_remap_labels(1));
    }
}
