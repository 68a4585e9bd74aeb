use iced::widget::{button, column, container, row, text, text_input, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use std::path::PathBuf;

use media_slot::config::AppConfig;
use media_slot::slot::{self, modal, EditableImage, Outcome};
use media_slot::store::media::{self, AuthToken, MediaTarget};
use media_slot::store::profile::ProfileStore;
use media_slot::SlotError;

/// Profile settings screen with an editable profile picture
struct ProfileScreen {
    /// The profile catalog
    store: ProfileStore,
    profile_id: i64,
    first_name: String,
    last_name: String,
    /// The profile picture slot
    slot: EditableImage,
    /// Last status message (toast) shown to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    FirstNameChanged(String),
    LastNameChanged(String),
    /// User clicked "Save name"
    SaveName,
    /// Messages for the picture slot
    Slot(slot::Message),
    /// The catalog was re-read after a save or delete
    Refreshed(Result<Option<String>, SlotError>),
}

impl ProfileScreen {
    /// Open the catalog, make sure a profile exists and build the slot
    fn new(config: AppConfig) -> media_slot::Result<Self> {
        let store = ProfileStore::open_default()?;
        let profile_id = store.ensure_profile(&config.first_name, &config.last_name)?;
        let profile = store
            .profile(profile_id)?
            .ok_or_else(|| SlotError::Store(format!("profile {} vanished", profile_id)))?;

        log::info!(
            "🎨 Profile screen for {} (picture: {:?})",
            profile.full_name(),
            profile.avatar_path
        );

        // The token is handed to the upload functions explicitly
        let target = MediaTarget {
            db_path: store.path().clone(),
            media_dir: store.path().with_file_name("media"),
            profile_id,
        };
        let token = AuthToken::new(config.access_token.clone());

        let mut props = config.slot.clone();
        props.alt = profile.full_name();
        props.name = Some(profile.full_name());

        let slot = EditableImage::new(
            props,
            profile.avatar_path.clone(),
            media::save_fn(target.clone(), token.clone()),
        )
        .with_delete(media::delete_fn(target, token))
        .with_labels(config.labels.clone());

        Ok(ProfileScreen {
            store,
            profile_id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            slot,
            status: "Ready.".to_string(),
        })
    }

    fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FirstNameChanged(value) => {
                self.first_name = value;
                self.slot.set_name(Some(self.full_name()));
                Task::none()
            }
            Message::LastNameChanged(value) => {
                self.last_name = value;
                self.slot.set_name(Some(self.full_name()));
                Task::none()
            }
            Message::SaveName => {
                match self
                    .store
                    .update_name(self.profile_id, &self.first_name, &self.last_name)
                {
                    Ok(()) => self.status = "✅ Profile updated.".to_string(),
                    Err(err) => {
                        log::error!("Failed to update name: {}", err);
                        self.status = format!("❌ {}", err);
                    }
                }
                Task::none()
            }
            Message::Slot(message) => {
                let (outcome, task) = self.slot.update(message);
                let task = task.map(Message::Slot);

                let refresh = match outcome {
                    Some(Outcome::Saved) => {
                        self.status = "✅ Profile picture updated.".to_string();
                        true
                    }
                    Some(Outcome::Deleted) => {
                        self.status = "✅ Profile picture deleted.".to_string();
                        true
                    }
                    Some(Outcome::SaveFailed(err)) | Some(Outcome::DeleteFailed(err)) => {
                        self.status = format!("❌ {}", err);
                        false
                    }
                    None => false,
                };

                if refresh {
                    let reload = Task::perform(
                        load_avatar(self.store.path().clone(), self.profile_id),
                        Message::Refreshed,
                    );
                    return Task::batch([task, reload]);
                }
                task
            }
            Message::Refreshed(Ok(avatar)) => {
                self.slot.set_source(avatar);
                Task::none()
            }
            Message::Refreshed(Err(err)) => {
                log::error!("Failed to reload profile: {}", err);
                self.status = format!("❌ {}", err);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = row![
            self.slot.view().map(Message::Slot),
            text(self.full_name()).size(32),
        ]
        .spacing(20)
        .align_y(Alignment::Center);

        let form: Column<Message> = column![
            text_input("First name", &self.first_name).on_input(Message::FirstNameChanged),
            text_input("Last name", &self.last_name).on_input(Message::LastNameChanged),
            button("Save name").on_press(Message::SaveName).padding(10),
        ]
        .spacing(10)
        .max_width(360.0);

        let content = container(
            column![header, form, text(&self.status).size(16)]
                .spacing(20)
                .padding(40),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill);

        match self.slot.dialog() {
            Some(dialog) => modal::modal(content, dialog.map(Message::Slot)),
            None => content.into(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Re-read the persisted picture after a save or delete
async fn load_avatar(db_path: PathBuf, profile_id: i64) -> Result<Option<String>, SlotError> {
    tokio::task::spawn_blocking(move || {
        let profile = ProfileStore::open(db_path)?.profile(profile_id)?;
        Ok::<_, SlotError>(profile.and_then(|profile| profile.avatar_path))
    })
    .await?
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let config = AppConfig::load_default()?;
    let screen = ProfileScreen::new(config)?;

    iced::application("Profile", ProfileScreen::update, ProfileScreen::view)
        .theme(ProfileScreen::theme)
        .centered()
        .run_with(move || (screen, Task::none()))?;

    Ok(())
}
