/// Persistence behind the profile picture slot
///
/// This module handles:
/// - The SQLite profile catalog (profile.rs)
/// - Storing and removing uploaded pictures (media.rs)

pub mod media;
pub mod profile;
