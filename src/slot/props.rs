/// Caller-supplied presentation properties for an editable image slot
///
/// These never influence the state machine itself, only what gets drawn
/// and which wording the footer uses.
use serde::{Deserialize, Serialize};

/// Size category of the slot and its placeholder
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Xs,
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl SizeCategory {
    /// Edge length in logical pixels
    pub fn pixels(self) -> u16 {
        match self {
            SizeCategory::Xs => 44,
            SizeCategory::Sm => 64,
            SizeCategory::Md => 96,
            SizeCategory::Lg => 160,
            SizeCategory::Xl => 200,
        }
    }
}

/// Outline of the slot, placeholder and modal preview
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Circle,
    Square,
    Rounded,
}

impl Shape {
    /// Corner radius as a percentage of the edge length
    pub fn radius_percent(self) -> u8 {
        match self {
            Shape::Circle => 50,
            Shape::Rounded => 8,
            Shape::Square => 0,
        }
    }

    /// Corner radius in pixels for a box of the given edge length
    pub fn radius_for(self, edge: f32) -> f32 {
        edge * f32::from(self.radius_percent()) / 100.0
    }
}

/// Dimension overrides, in logical pixels
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct Dimensions {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SlotProps {
    /// Accessible description of the persisted image
    pub alt: String,
    /// Seed for the placeholder when no image is persisted
    pub name: Option<String>,
    pub size: SizeCategory,
    pub shape: Shape,
    pub tooltip_text: String,
    pub modal_title: String,
    /// Overrides for the at-rest thumbnail
    pub size_config: Option<Dimensions>,
    /// Overrides for the preview inside the modal
    pub preview_size_config: Option<Dimensions>,
    /// Label the confirm action "continue" instead of "save"
    pub show_continue: bool,
}

impl Default for SlotProps {
    fn default() -> Self {
        Self {
            alt: String::new(),
            name: None,
            size: SizeCategory::default(),
            shape: Shape::default(),
            tooltip_text: "Edit Image".to_string(),
            modal_title: "Edit Image".to_string(),
            size_config: None,
            preview_size_config: None,
            show_continue: false,
        }
    }
}

impl SlotProps {
    pub fn new(alt: impl Into<String>) -> Self {
        Self {
            alt: alt.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_size(mut self, size: SizeCategory) -> Self {
        self.size = size;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_continue(mut self, show_continue: bool) -> Self {
        self.show_continue = show_continue;
        self
    }
}
