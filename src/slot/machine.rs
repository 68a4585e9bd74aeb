/// The slot's edit / preview / save / cancel state machine
///
/// This module is free of any iced types: events go in, commands come out,
/// and the widget wrapper turns commands into tasks. Every asynchronous
/// request carries a `Ticket`, and a completion whose ticket no longer
/// matches the current phase is dropped.
use std::path::PathBuf;

use super::footer::{FooterAction, FooterButton};
use super::preview::{PendingFile, Preview};
use crate::error::SlotError;

/// Identifies one asynchronous request issued by the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Where the slot currently is
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Modal closed
    Idle,
    /// Modal open, showing the persisted image; `reading` is set while a
    /// picked file is being read
    Viewing { reading: Option<Ticket> },
    /// Modal open, showing a local preview of a pending file
    Editing { preview: Preview },
    /// The pending file has been handed to the save callback
    SavePending { preview: Preview, ticket: Ticket },
    /// The delete callback is running
    DeletePending { ticket: Ticket },
}

/// Inputs to the machine
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    SlotPressed,
    HoverChanged(bool),
    EditPressed,
    FilePicked(Option<PathBuf>),
    FileRead(Ticket, Result<Preview, SlotError>),
    CancelPressed,
    SavePressed,
    SaveFinished(Ticket, Result<(), SlotError>),
    DeletePressed,
    DeleteFinished(Ticket, Result<(), SlotError>),
    ClosePressed,
}

/// What the embedding screen is told after a round-trip
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Saved,
    SaveFailed(SlotError),
    Deleted,
    DeleteFailed(SlotError),
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    PickFile,
    ReadFile(Ticket, PathBuf),
    Save(Ticket, PendingFile),
    Delete(Ticket),
    Notify(Outcome),
}

#[derive(Debug, Clone)]
pub struct SlotMachine {
    phase: Phase,
    hovering: bool,
    source: Option<String>,
    can_delete: bool,
    next_ticket: u64,
}

impl SlotMachine {
    pub fn new(source: Option<String>, can_delete: bool) -> Self {
        Self {
            phase: Phase::Idle,
            hovering: false,
            source,
            can_delete,
            next_ticket: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Replace the persisted image reference; only the parent calls this,
    /// after a save or delete round-trip
    pub fn set_source(&mut self, source: Option<String>) {
        self.source = source;
    }

    pub fn set_can_delete(&mut self, can_delete: bool) {
        self.can_delete = can_delete;
    }

    pub fn is_modal_open(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// True from a successful read until save or cancel resolves
    pub fn is_editing(&self) -> bool {
        matches!(self.phase, Phase::Editing { .. } | Phase::SavePending { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            Phase::SavePending { .. } | Phase::DeletePending { .. }
        )
    }

    pub fn pending_file(&self) -> Option<&PendingFile> {
        self.local_preview().map(|preview| &preview.file)
    }

    /// The preview of the pending file, while editing
    pub fn local_preview(&self) -> Option<&Preview> {
        match &self.phase {
            Phase::Editing { preview } | Phase::SavePending { preview, .. } => Some(preview),
            _ => None,
        }
    }

    /// Delete is only reachable with a persisted image and a delete callback
    pub fn can_delete(&self) -> bool {
        self.can_delete && self.source.is_some()
    }

    /// Footer buttons for the current phase
    pub fn footer(&self, show_continue: bool) -> Vec<FooterButton> {
        let confirm = if show_continue {
            FooterAction::Continue
        } else {
            FooterAction::Save
        };

        let enabled = !self.is_busy();
        let actions: Vec<FooterAction> = if self.is_editing() {
            vec![FooterAction::Cancel, confirm]
        } else if self.can_delete() {
            vec![FooterAction::Delete, FooterAction::Edit, FooterAction::Close]
        } else {
            vec![FooterAction::Edit, FooterAction::Close]
        };

        actions
            .into_iter()
            .map(|action| FooterButton { action, enabled })
            .collect()
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket = self.next_ticket.wrapping_add(1);
        Ticket(self.next_ticket)
    }

    /// Apply one message and return the side effects it requests
    pub fn apply(&mut self, message: Message) -> Vec<Command> {
        match message {
            Message::SlotPressed => {
                if self.phase == Phase::Idle {
                    self.phase = Phase::Viewing { reading: None };
                }
                Vec::new()
            }
            Message::HoverChanged(hovering) => {
                self.hovering = hovering;
                Vec::new()
            }
            Message::EditPressed => match self.phase {
                Phase::Viewing { .. } => vec![Command::PickFile],
                _ => Vec::new(),
            },
            Message::FilePicked(None) => Vec::new(),
            Message::FilePicked(Some(path)) => match self.phase {
                Phase::Viewing { .. } => {
                    // A newer pick supersedes any read still in progress
                    let ticket = self.issue_ticket();
                    self.phase = Phase::Viewing {
                        reading: Some(ticket),
                    };
                    vec![Command::ReadFile(ticket, path)]
                }
                _ => Vec::new(),
            },
            Message::FileRead(ticket, result) => {
                if self.phase != (Phase::Viewing { reading: Some(ticket) }) {
                    log::debug!("Dropping stale file read {:?}", ticket);
                    return Vec::new();
                }

                match result {
                    Ok(preview) => {
                        log::info!("📝 Editing with {}", preview.file.name);
                        self.phase = Phase::Editing { preview };
                    }
                    Err(err) => {
                        log::warn!("⚠️  Could not preview selected file: {}", err);
                        self.phase = Phase::Viewing { reading: None };
                    }
                }
                Vec::new()
            }
            Message::CancelPressed => {
                if matches!(self.phase, Phase::Editing { .. }) {
                    self.phase = Phase::Viewing { reading: None };
                }
                Vec::new()
            }
            Message::SavePressed => match std::mem::replace(&mut self.phase, Phase::Idle) {
                Phase::Editing { preview } => {
                    let ticket = self.issue_ticket();
                    let file = preview.file.clone();
                    self.phase = Phase::SavePending { preview, ticket };
                    vec![Command::Save(ticket, file)]
                }
                other => {
                    self.phase = other;
                    Vec::new()
                }
            },
            Message::SaveFinished(ticket, result) => {
                match std::mem::replace(&mut self.phase, Phase::Idle) {
                    Phase::SavePending {
                        preview,
                        ticket: current,
                    } if current == ticket => match result {
                        Ok(()) => {
                            log::info!("✅ Saved {}", preview.file.name);
                            vec![Command::Notify(Outcome::Saved)]
                        }
                        Err(err) => {
                            log::warn!("⚠️  Save failed, keeping {}: {}", preview.file.name, err);
                            self.phase = Phase::Editing { preview };
                            vec![Command::Notify(Outcome::SaveFailed(err))]
                        }
                    },
                    other => {
                        log::debug!("Dropping stale save completion {:?}", ticket);
                        self.phase = other;
                        Vec::new()
                    }
                }
            }
            Message::DeletePressed => {
                if matches!(self.phase, Phase::Viewing { .. }) && self.can_delete() {
                    let ticket = self.issue_ticket();
                    self.phase = Phase::DeletePending { ticket };
                    vec![Command::Delete(ticket)]
                } else {
                    Vec::new()
                }
            }
            Message::DeleteFinished(ticket, result) => {
                if self.phase != (Phase::DeletePending { ticket }) {
                    log::debug!("Dropping stale delete completion {:?}", ticket);
                    return Vec::new();
                }

                match result {
                    Ok(()) => {
                        log::info!("🗑️  Image deleted");
                        self.phase = Phase::Idle;
                        vec![Command::Notify(Outcome::Deleted)]
                    }
                    Err(err) => {
                        log::warn!("⚠️  Delete failed: {}", err);
                        self.phase = Phase::Viewing { reading: None };
                        vec![Command::Notify(Outcome::DeleteFailed(err))]
                    }
                }
            }
            Message::ClosePressed => {
                if !self.is_busy() {
                    self.phase = Phase::Idle;
                }
                Vec::new()
            }
        }
    }
}
