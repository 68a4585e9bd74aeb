/// Editable image slot
///
/// This module handles:
/// - The edit / preview / save / cancel state machine (machine.rs)
/// - Reading and decoding picked files into local previews (preview.rs)
/// - Deterministic placeholders for slots without an image (placeholder.rs)
/// - The iced component and its modal (widget.rs, modal.rs)

pub mod footer;
pub mod machine;
pub mod modal;
pub mod placeholder;
pub mod preview;
pub mod props;
pub mod widget;

pub use machine::{Message, Outcome, Phase};
pub use widget::{DeleteFn, EditableImage, PreviewDisplay, SaveFn, SlotDisplay};
