/// Footer actions of the slot's modal and their labels
use serde::{Deserialize, Serialize};

/// Test id of the clickable at-rest slot
pub const SLOT_TEST_ID: &str = "editable-image-slot";
/// Test id of the file picker trigger
pub const FILE_INPUT_TEST_ID: &str = "editable-image-file-input";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FooterAction {
    Delete,
    Edit,
    Cancel,
    Save,
    Continue,
    Close,
}

impl FooterAction {
    /// Stable hook for locating the action in tests
    pub fn test_id(self) -> &'static str {
        match self {
            FooterAction::Delete => "editable-image-delete",
            FooterAction::Edit => "editable-image-edit",
            FooterAction::Cancel => "editable-image-cancel",
            FooterAction::Save => "editable-image-save",
            FooterAction::Continue => "editable-image-continue",
            FooterAction::Close => "editable-image-close",
        }
    }
}

/// A footer button as it should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterButton {
    pub action: FooterAction,
    /// Disabled while a save or delete is in flight
    pub enabled: bool,
}

/// Translated footer labels
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Labels {
    pub delete: String,
    pub edit: String,
    pub cancel: String,
    pub save: String,
    #[serde(rename = "continue")]
    pub continue_: String,
    pub close: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            delete: "Delete".to_string(),
            edit: "Edit".to_string(),
            cancel: "Cancel".to_string(),
            save: "Save".to_string(),
            continue_: "Continue".to_string(),
            close: "Close".to_string(),
        }
    }
}

impl Labels {
    pub fn get(&self, action: FooterAction) -> &str {
        match action {
            FooterAction::Delete => &self.delete,
            FooterAction::Edit => &self.edit,
            FooterAction::Cancel => &self.cancel,
            FooterAction::Save => &self.save,
            FooterAction::Continue => &self.continue_,
            FooterAction::Close => &self.close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_from_json() {
        let labels: Labels =
            serde_json::from_str(r#"{ "save": "Enregistrer", "continue": "Continuer" }"#).unwrap();

        assert_eq!(labels.get(FooterAction::Save), "Enregistrer");
        assert_eq!(labels.get(FooterAction::Continue), "Continuer");
        assert_eq!(labels.get(FooterAction::Close), "Close");
    }

    #[test]
    fn test_ids_are_unique() {
        let actions = [
            FooterAction::Delete,
            FooterAction::Edit,
            FooterAction::Cancel,
            FooterAction::Save,
            FooterAction::Continue,
            FooterAction::Close,
        ];
        let mut ids: Vec<&str> = actions.iter().map(|a| a.test_id()).collect();
        ids.push(SLOT_TEST_ID);
        ids.push(FILE_INPUT_TEST_ID);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), actions.len() + 2);
    }
}
