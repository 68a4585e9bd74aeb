/// The editable image slot as an iced component
///
/// Owns the state machine, the caller's save/delete callbacks and the
/// placeholder generator, and turns machine commands into `Task`s.
use std::sync::Arc;

use iced::futures::future::BoxFuture;
use iced::widget::{button, container, image, mouse_area, row, stack, text, tooltip, Space};
use iced::{Alignment, Border, Color, Element, Length, Task};

use super::footer::{FooterAction, Labels, FILE_INPUT_TEST_ID, SLOT_TEST_ID};
use super::machine::{Command, Message, Outcome, SlotMachine};
use super::modal;
use super::placeholder::{InitialsGenerator, Placeholder, PlaceholderGenerator};
use super::preview::{self, PendingFile, Preview, PREVIEW_MAX_EDGE};
use super::props::{Dimensions, SizeCategory, SlotProps};
use crate::error::SlotError;

/// Persists a selected file; resolves once the round-trip completes
pub type SaveFn = Arc<dyn Fn(PendingFile) -> BoxFuture<'static, Result<(), SlotError>> + Send + Sync>;

/// Removes the persisted image
pub type DeleteFn = Arc<dyn Fn() -> BoxFuture<'static, Result<(), SlotError>> + Send + Sync>;

/// What the at-rest slot shows
#[derive(Debug, Clone, PartialEq)]
pub enum SlotDisplay {
    Image(String),
    Placeholder(Placeholder),
    Empty,
}

/// What the modal's preview area shows
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewDisplay {
    Source(String),
    Local(Preview),
    Placeholder(Placeholder),
    Empty,
}

pub struct EditableImage {
    props: SlotProps,
    machine: SlotMachine,
    on_save: SaveFn,
    on_delete: Option<DeleteFn>,
    placeholders: Arc<dyn PlaceholderGenerator>,
    labels: Labels,
}

impl EditableImage {
    pub fn new(props: SlotProps, source: Option<String>, on_save: SaveFn) -> Self {
        Self {
            props,
            machine: SlotMachine::new(source, false),
            on_save,
            on_delete: None,
            placeholders: Arc::new(InitialsGenerator),
            labels: Labels::default(),
        }
    }

    /// Enable the delete action
    pub fn with_delete(mut self, on_delete: DeleteFn) -> Self {
        self.on_delete = Some(on_delete);
        self.machine.set_can_delete(true);
        self
    }

    pub fn with_placeholders(mut self, generator: Arc<dyn PlaceholderGenerator>) -> Self {
        self.placeholders = generator;
        self
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn props(&self) -> &SlotProps {
        &self.props
    }

    pub fn machine(&self) -> &SlotMachine {
        &self.machine
    }

    /// Re-supply the persisted image after a save or delete
    pub fn set_source(&mut self, source: Option<String>) {
        self.machine.set_source(source);
    }

    /// Change the placeholder seed
    pub fn set_name(&mut self, name: Option<String>) {
        self.props.name = name;
    }

    /// Apply a message; returns the outcome of a finished round-trip, if
    /// any, for the parent to report
    pub fn update(&mut self, message: Message) -> (Option<Outcome>, Task<Message>) {
        let mut outcome = None;
        let mut tasks = Vec::new();

        for command in self.machine.apply(message) {
            match command {
                Command::PickFile => {
                    tasks.push(Task::perform(preview::pick_image(), Message::FilePicked));
                }
                Command::ReadFile(ticket, path) => {
                    tasks.push(Task::perform(
                        preview::load_preview(path, PREVIEW_MAX_EDGE),
                        move |result| Message::FileRead(ticket, result),
                    ));
                }
                Command::Save(ticket, file) => {
                    tasks.push(Task::perform((self.on_save)(file), move |result| {
                        Message::SaveFinished(ticket, result)
                    }));
                }
                Command::Delete(ticket) => match &self.on_delete {
                    Some(on_delete) => {
                        tasks.push(Task::perform(on_delete(), move |result| {
                            Message::DeleteFinished(ticket, result)
                        }));
                    }
                    None => {
                        log::error!("Delete requested without a delete callback");
                    }
                },
                Command::Notify(result) => outcome = Some(result),
            }
        }

        (outcome, Task::batch(tasks))
    }

    fn placeholder(&self, size: SizeCategory) -> Option<Placeholder> {
        self.props
            .name
            .as_deref()
            .map(|name| self.placeholders.generate(name, size, self.props.shape))
    }

    /// The at-rest slot content
    pub fn slot_display(&self) -> SlotDisplay {
        if let Some(source) = self.machine.source() {
            SlotDisplay::Image(source.to_string())
        } else if let Some(placeholder) = self.placeholder(self.props.size) {
            SlotDisplay::Placeholder(placeholder)
        } else {
            SlotDisplay::Empty
        }
    }

    /// The modal's preview content; `None` while the modal is closed
    pub fn preview_display(&self) -> Option<PreviewDisplay> {
        if !self.machine.is_modal_open() {
            return None;
        }

        let display = if let Some(preview) = self.machine.local_preview() {
            PreviewDisplay::Local(preview.clone())
        } else if let Some(source) = self.machine.source() {
            PreviewDisplay::Source(source.to_string())
        } else if let Some(placeholder) = self.placeholder(SizeCategory::Xl) {
            PreviewDisplay::Placeholder(placeholder)
        } else {
            PreviewDisplay::Empty
        };

        Some(display)
    }

    /// Show the edit overlay over the slot
    pub fn shows_overlay(&self) -> bool {
        self.machine.is_hovering()
    }

    /// The clickable slot with its tooltip
    pub fn view(&self) -> Element<'_, Message> {
        let edge = f32::from(self.props.size.pixels());
        let radius = self.props.shape.radius_for(edge);

        let content: Element<'_, Message> = match self.slot_display() {
            SlotDisplay::Image(source) => image(image::Handle::from_path(source))
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            SlotDisplay::Placeholder(placeholder) => placeholder_view(&placeholder),
            SlotDisplay::Empty => Space::new(Length::Fill, Length::Fill).into(),
        };

        let mut layers = stack![content].width(Length::Fill).height(Length::Fill);
        if self.shows_overlay() {
            layers = layers.push(
                container(text("✎").size(edge / 3.0))
                    .center(Length::Fill)
                    .style(move |_theme| container::Style {
                        background: Some(Color { a: 0.45, ..Color::BLACK }.into()),
                        text_color: Some(Color::WHITE),
                        border: Border::default().rounded(radius),
                        ..container::Style::default()
                    }),
            );
        }

        let slot = sized(
            container(layers).clip(true).style(move |_theme| container::Style {
                border: Border::default().rounded(radius),
                ..container::Style::default()
            }),
            self.props.size_config.as_ref(),
            edge,
        );

        let area = mouse_area(slot)
            .on_press(Message::SlotPressed)
            .on_enter(Message::HoverChanged(true))
            .on_exit(Message::HoverChanged(false));

        let tip = tooltip(
            area,
            container(text(self.props.tooltip_text.as_str()).size(12))
                .padding(6)
                .style(container::rounded_box),
            tooltip::Position::Top,
        );

        container(tip).id(container::Id::new(SLOT_TEST_ID)).into()
    }

    /// Test ids carried by the rendered slot and, while open, the dialog
    pub fn test_ids(&self) -> Vec<&'static str> {
        let mut ids = vec![SLOT_TEST_ID];
        if self.machine.is_modal_open() {
            for entry in self.machine.footer(self.props.show_continue) {
                ids.extend(action_ids(entry.action));
            }
        }
        ids
    }

    /// The dialog box, while the modal is open
    pub fn dialog(&self) -> Option<Element<'_, Message>> {
        let display = self.preview_display()?;
        let edge = f32::from(SizeCategory::Xl.pixels());
        let radius = self.props.shape.radius_for(edge);

        let preview: Element<'_, Message> = match display {
            PreviewDisplay::Local(preview) => image(preview.handle())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            PreviewDisplay::Source(source) => image(image::Handle::from_path(source))
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            PreviewDisplay::Placeholder(placeholder) => placeholder_view(&placeholder),
            PreviewDisplay::Empty => Space::new(Length::Fill, Length::Fill).into(),
        };

        let body = container(sized(
            container(preview).clip(true).style(move |_theme| container::Style {
                border: Border::default().rounded(radius),
                ..container::Style::default()
            }),
            self.props.preview_size_config.as_ref(),
            edge,
        ))
        .center_x(Length::Fill);

        let busy = self.machine.is_busy();
        let footer = self
            .machine
            .footer(self.props.show_continue)
            .into_iter()
            .fold(row![].spacing(8), |footer, entry| {
                let label = text(self.labels.get(entry.action));
                let message = entry.enabled.then(|| footer_message(entry.action));
                let style = match entry.action {
                    FooterAction::Delete => button::danger,
                    FooterAction::Save | FooterAction::Continue => button::primary,
                    _ => button::secondary,
                };
                let control: Element<'_, Message> =
                    button(label).style(style).on_press_maybe(message).into();
                footer.push(with_ids(control, &action_ids(entry.action)))
            })
            .align_y(Alignment::Center);

        let footer = container(footer).align_right(Length::Fill);

        Some(modal::dialog(
            self.props.modal_title.as_str(),
            body,
            Some(footer.into()),
            (!busy).then_some(Message::ClosePressed),
        ))
    }
}

fn footer_message(action: FooterAction) -> Message {
    match action {
        FooterAction::Delete => Message::DeletePressed,
        FooterAction::Edit => Message::EditPressed,
        FooterAction::Cancel => Message::CancelPressed,
        FooterAction::Save | FooterAction::Continue => Message::SavePressed,
        FooterAction::Close => Message::ClosePressed,
    }
}

/// Ids wrapped around a footer button, outermost first; edit is also the
/// file picker trigger
fn action_ids(action: FooterAction) -> Vec<&'static str> {
    match action {
        FooterAction::Edit => vec![FILE_INPUT_TEST_ID, action.test_id()],
        _ => vec![action.test_id()],
    }
}

fn with_ids<'a>(element: Element<'a, Message>, ids: &[&'static str]) -> Element<'a, Message> {
    ids.iter().rev().fold(element, |inner, id| {
        container(inner).id(container::Id::new(*id)).into()
    })
}

/// Apply dimension overrides, falling back to a square of `edge` pixels
fn sized<'a>(
    content: container::Container<'a, Message>,
    dims: Option<&Dimensions>,
    edge: f32,
) -> container::Container<'a, Message> {
    let dims = dims.copied().unwrap_or_default();

    let mut content = content
        .width(Length::Fixed(dims.width.unwrap_or(edge)))
        .height(Length::Fixed(dims.height.unwrap_or(edge)));
    if let Some(max_width) = dims.max_width {
        content = content.max_width(max_width);
    }
    if let Some(max_height) = dims.max_height {
        content = content.max_height(max_height);
    }
    content
}

fn placeholder_view<'a>(placeholder: &Placeholder) -> Element<'a, Message> {
    let [r, g, b] = placeholder.background;
    let [fr, fg, fb] = placeholder.foreground;
    let radius = placeholder.radius();
    let font_size = f32::from(placeholder.size) * 0.4;

    container(text(placeholder.initials.clone()).size(font_size))
        .center(Length::Fill)
        .style(move |_theme| container::Style {
            background: Some(Color::from_rgb8(r, g, b).into()),
            text_color: Some(Color::from_rgb8(fr, fg, fb)),
            border: Border::default().rounded(radius),
            ..container::Style::default()
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::machine::Phase;
    use crate::slot::preview::tests::sample_preview;
    use crate::slot::props::Shape;
    use iced::futures::FutureExt;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records every file handed to the save callback
    #[derive(Default)]
    struct Recorder {
        saves: Mutex<Vec<String>>,
        deletes: AtomicUsize,
    }

    fn recorder_callbacks(recorder: &Arc<Recorder>) -> (SaveFn, DeleteFn) {
        let saves = recorder.clone();
        let on_save: SaveFn = Arc::new(move |file: PendingFile| {
            saves.saves.lock().unwrap().push(file.name.clone());
            async { Ok::<(), SlotError>(()) }.boxed()
        });

        let deletes = recorder.clone();
        let on_delete: DeleteFn = Arc::new(move || {
            deletes.deletes.fetch_add(1, Ordering::SeqCst);
            async { Ok::<(), SlotError>(()) }.boxed()
        });

        (on_save, on_delete)
    }

    fn widget(source: Option<&str>, name: Option<&str>) -> (EditableImage, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let (on_save, on_delete) = recorder_callbacks(&recorder);

        let mut props = SlotProps::new("Jane Doe").with_shape(Shape::Circle);
        if let Some(name) = name {
            props = props.with_name(name);
        }

        let widget = EditableImage::new(props, source.map(str::to_string), on_save)
            .with_delete(on_delete);
        (widget, recorder)
    }

    /// Drive a pick and complete the read with an in-memory preview
    fn pick(widget: &mut EditableImage, name: &str) {
        let _ = widget.update(Message::FilePicked(Some(PathBuf::from(name))));
        let ticket = match widget.machine().phase() {
            Phase::Viewing {
                reading: Some(ticket),
            } => *ticket,
            other => panic!("expected a read in flight, got {:?}", other),
        };
        let _ = widget.update(Message::FileRead(ticket, Ok(sample_preview(name))));
    }

    fn footer_actions(widget: &EditableImage) -> Vec<FooterAction> {
        widget
            .machine()
            .footer(widget.props().show_continue)
            .into_iter()
            .map(|button| button.action)
            .collect()
    }

    #[test]
    fn test_photo_scenario() {
        let (mut widget, _) = widget(Some("photo.png"), Some("Jane Doe"));
        assert_eq!(widget.slot_display(), SlotDisplay::Image("photo.png".into()));
        assert_eq!(widget.preview_display(), None);

        let _ = widget.update(Message::SlotPressed);
        assert_eq!(
            widget.preview_display(),
            Some(PreviewDisplay::Source("photo.png".into()))
        );

        pick(&mut widget, "new.png");
        match widget.preview_display() {
            Some(PreviewDisplay::Local(preview)) => assert_eq!(preview.file.name, "new.png"),
            other => panic!("expected a local preview, got {:?}", other),
        }
        assert_eq!(
            footer_actions(&widget),
            vec![FooterAction::Cancel, FooterAction::Save]
        );

        let _ = widget.update(Message::CancelPressed);
        assert_eq!(
            widget.preview_display(),
            Some(PreviewDisplay::Source("photo.png".into()))
        );
        assert_eq!(
            footer_actions(&widget),
            vec![FooterAction::Delete, FooterAction::Edit, FooterAction::Close]
        );
    }

    #[test]
    fn test_placeholder_scenario() {
        let (mut widget, _) = widget(None, Some("Jane Doe"));
        let expected = InitialsGenerator.generate("Jane Doe", SizeCategory::Md, Shape::Circle);
        assert_eq!(widget.slot_display(), SlotDisplay::Placeholder(expected));

        let _ = widget.update(Message::SlotPressed);
        match widget.preview_display() {
            Some(PreviewDisplay::Placeholder(placeholder)) => {
                assert_eq!(placeholder.initials, "JD");
                assert_eq!(placeholder.size, SizeCategory::Xl.pixels());
            }
            other => panic!("expected a placeholder, got {:?}", other),
        }
        assert!(!footer_actions(&widget).contains(&FooterAction::Delete));
    }

    #[test]
    fn test_cancel_without_source_restores_placeholder() {
        let (mut widget, _) = widget(None, Some("Jane Doe"));
        let _ = widget.update(Message::SlotPressed);
        pick(&mut widget, "new.png");

        let _ = widget.update(Message::CancelPressed);
        assert!(matches!(
            widget.preview_display(),
            Some(PreviewDisplay::Placeholder(_))
        ));
    }

    #[test]
    fn test_renaming_regenerates_placeholder() {
        let (mut widget, _) = widget(None, Some("Jane Doe"));
        widget.set_name(Some("Ada Lovelace".into()));

        match widget.slot_display() {
            SlotDisplay::Placeholder(placeholder) => assert_eq!(placeholder.initials, "AL"),
            other => panic!("expected a placeholder, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_placeholder_generator() {
        struct Fixed;
        impl PlaceholderGenerator for Fixed {
            fn generate(&self, seed: &str, size: SizeCategory, shape: Shape) -> Placeholder {
                Placeholder {
                    initials: format!("<{}>", seed),
                    background: [0, 0, 0],
                    foreground: [255, 255, 255],
                    size: size.pixels(),
                    radius_percent: shape.radius_percent(),
                }
            }
        }

        let (widget, _) = widget(None, Some("Jane Doe"));
        let widget = widget.with_placeholders(Arc::new(Fixed));
        match widget.slot_display() {
            SlotDisplay::Placeholder(placeholder) => assert_eq!(placeholder.initials, "<Jane Doe>"),
            other => panic!("expected a placeholder, got {:?}", other),
        }
    }

    #[test]
    fn test_no_source_no_name_is_empty() {
        let (widget, _) = widget(None, None);
        assert_eq!(widget.slot_display(), SlotDisplay::Empty);
    }

    #[test]
    fn test_save_calls_callback_once() {
        let (mut widget, recorder) = widget(Some("photo.png"), None);
        let _ = widget.update(Message::SlotPressed);
        pick(&mut widget, "new.png");

        let _ = widget.update(Message::SavePressed);
        let _ = widget.update(Message::SavePressed);
        assert_eq!(*recorder.saves.lock().unwrap(), vec!["new.png".to_string()]);

        let ticket = match widget.machine().phase() {
            Phase::SavePending { ticket, .. } => *ticket,
            other => panic!("expected a pending save, got {:?}", other),
        };
        let (outcome, _) = widget.update(Message::SaveFinished(ticket, Ok(())));
        assert_eq!(outcome, Some(Outcome::Saved));
        assert!(!widget.machine().is_modal_open());
    }

    #[test]
    fn test_continue_wording() {
        let recorder = Arc::new(Recorder::default());
        let (on_save, _) = recorder_callbacks(&recorder);
        let props = SlotProps::new("logo")
            .with_size(SizeCategory::Lg)
            .with_continue(true);
        let mut widget = EditableImage::new(props, Some("photo.png".into()), on_save);
        assert_eq!(widget.props().size, SizeCategory::Lg);
        let _ = widget.update(Message::SlotPressed);
        pick(&mut widget, "new.png");

        let actions = footer_actions(&widget);
        assert!(actions.contains(&FooterAction::Continue));
        assert!(!actions.contains(&FooterAction::Save));
        assert_eq!(footer_message(FooterAction::Continue), Message::SavePressed);
    }

    #[test]
    fn test_delete_calls_callback_once() {
        let (mut widget, recorder) = widget(Some("photo.png"), Some("Jane Doe"));
        let _ = widget.update(Message::SlotPressed);

        let _ = widget.update(Message::DeletePressed);
        let _ = widget.update(Message::DeletePressed);
        assert_eq!(recorder.deletes.load(Ordering::SeqCst), 1);

        let ticket = match widget.machine().phase() {
            Phase::DeletePending { ticket } => *ticket,
            other => panic!("expected a pending delete, got {:?}", other),
        };
        let (outcome, _) = widget.update(Message::DeleteFinished(ticket, Ok(())));
        assert_eq!(outcome, Some(Outcome::Deleted));

        widget.set_source(None);
        assert!(matches!(widget.slot_display(), SlotDisplay::Placeholder(_)));
    }

    #[test]
    fn test_delete_hidden_without_callback() {
        let recorder = Arc::new(Recorder::default());
        let (on_save, _) = recorder_callbacks(&recorder);
        let mut widget = EditableImage::new(SlotProps::new("logo"), Some("logo.png".into()), on_save);

        let _ = widget.update(Message::SlotPressed);
        assert!(!footer_actions(&widget).contains(&FooterAction::Delete));
        let _ = widget.update(Message::DeletePressed);
        assert_eq!(recorder.deletes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_hover_toggles_overlay_only() {
        let (mut widget, _) = widget(Some("photo.png"), None);

        let _ = widget.update(Message::HoverChanged(true));
        assert!(widget.shows_overlay());
        assert!(!widget.machine().is_modal_open());

        let _ = widget.update(Message::HoverChanged(false));
        assert!(!widget.shows_overlay());
    }

    #[test]
    fn test_ids_follow_phase() {
        let (mut widget, _) = widget(Some("photo.png"), Some("Jane Doe"));
        assert_eq!(widget.test_ids(), vec![SLOT_TEST_ID]);

        let _ = widget.update(Message::SlotPressed);
        assert_eq!(
            widget.test_ids(),
            vec![
                SLOT_TEST_ID,
                "editable-image-delete",
                FILE_INPUT_TEST_ID,
                "editable-image-edit",
                "editable-image-close",
            ]
        );

        pick(&mut widget, "new.png");
        assert_eq!(
            widget.test_ids(),
            vec![SLOT_TEST_ID, "editable-image-cancel", "editable-image-save"]
        );

        let _ = widget.update(Message::ClosePressed);
        assert_eq!(widget.test_ids(), vec![SLOT_TEST_ID]);
    }

    #[test]
    fn test_footer_ids_wrap_edit_with_file_input() {
        assert_eq!(
            action_ids(FooterAction::Edit),
            vec![FILE_INPUT_TEST_ID, "editable-image-edit"]
        );
        assert_eq!(action_ids(FooterAction::Save), vec!["editable-image-save"]);
        assert_eq!(
            action_ids(FooterAction::Continue),
            vec!["editable-image-continue"]
        );
    }
}
