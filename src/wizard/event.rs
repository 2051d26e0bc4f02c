//! Wizard events — what an inbound transport event means to the wizard.

use crate::channels::{EventKind, IncomingEvent};

use super::draft::{Category, PhotoRef, Reporter, Sex};

/// Button actions understood by the wizard.
pub mod actions {
    pub const CATEGORY_PREFIX: &str = "category:";
    pub const SEX_PREFIX: &str = "sex:";
    pub const PHOTOS_DONE: &str = "photos:done";
    pub const LOCATION_GEO: &str = "location:geo";
    pub const LOCATION_MANUAL: &str = "location:manual";
    pub const BACK: &str = "back";
    pub const CANCEL: &str = "cancel";
    pub const CONFIRM: &str = "confirm:yes";
    pub const REJECT: &str = "confirm:no";
    pub const RESTART: &str = "confirm:restart";
}

/// Commands understood by the wizard.
pub mod commands {
    pub const START: &str = "start";
    pub const CANCEL: &str = "cancel";
}

/// How the reporter wants to give the location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationMode {
    Geo,
    Manual,
}

/// An event as the wizard sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    Start,
    Cancel,
    Back,
    PickCategory(Category),
    PickSex(Sex),
    Photo(PhotoRef),
    PhotosDone,
    ChooseLocationMode(LocationMode),
    Geo { latitude: f64, longitude: f64 },
    Text(String),
    Confirm,
    Reject,
    Restart,
}

impl WizardEvent {
    /// Interpret a transport event. Unknown commands and actions yield `None`.
    pub fn from_incoming(event: &IncomingEvent) -> Option<Self> {
        match &event.kind {
            EventKind::Command { name, .. } => match name.as_str() {
                commands::START => Some(Self::Start),
                commands::CANCEL => Some(Self::Cancel),
                _ => None,
            },
            EventKind::Button { data, .. } => Self::from_action(data),
            EventKind::Text(text) => Some(Self::Text(text.clone())),
            EventKind::Location {
                latitude,
                longitude,
            } => Some(Self::Geo {
                latitude: *latitude,
                longitude: *longitude,
            }),
            EventKind::Photo {
                file_id,
                file_unique_id,
            } => Some(Self::Photo(PhotoRef::new(file_id, file_unique_id))),
        }
    }

    /// Interpret a button action.
    pub fn from_action(action: &str) -> Option<Self> {
        if let Some(key) = action.strip_prefix(actions::CATEGORY_PREFIX) {
            return Some(Self::PickCategory(Category::from_key(key)));
        }
        if let Some(key) = action.strip_prefix(actions::SEX_PREFIX) {
            return Some(Self::PickSex(Sex::from_key(key)));
        }
        match action {
            actions::PHOTOS_DONE => Some(Self::PhotosDone),
            actions::LOCATION_GEO => Some(Self::ChooseLocationMode(LocationMode::Geo)),
            actions::LOCATION_MANUAL => Some(Self::ChooseLocationMode(LocationMode::Manual)),
            actions::BACK => Some(Self::Back),
            actions::CANCEL => Some(Self::Cancel),
            actions::CONFIRM => Some(Self::Confirm),
            actions::REJECT => Some(Self::Reject),
            actions::RESTART => Some(Self::Restart),
            _ => None,
        }
    }
}

impl From<&IncomingEvent> for Reporter {
    fn from(event: &IncomingEvent) -> Self {
        Self {
            subject_id: event.user_id.clone(),
            chat_id: event.chat_id.clone(),
            display_name: event.username.clone(),
        }
    }
}
