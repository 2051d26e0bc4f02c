//! Wizard prompts — texts and keyboards shown for each outcome.

use crate::channels::{Button, Keyboard, TextMessage};
use crate::config::WizardSettings;

use super::event::{actions, LocationMode};
use super::machine::{ActiveWizard, Outcome, Rejection};
use super::state::WizardStep;

/// What to show the user after an event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reply {
    /// Message to send (or edit in place, for button presses).
    pub message: Option<TextMessage>,
    /// Popup shown when acknowledging a button press.
    pub alert: Option<String>,
}

impl Reply {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn text(message: TextMessage) -> Self {
        Self {
            message: Some(message),
            alert: None,
        }
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self {
            message: None,
            alert: Some(text.into()),
        }
    }
}

// ── Keyboards ───────────────────────────────────────────────────────

fn nav_row() -> Vec<Button> {
    vec![
        Button::new("⬅️ Back", actions::BACK),
        Button::new("❌ Cancel", actions::CANCEL),
    ]
}

pub fn category_keyboard() -> Keyboard {
    vec![
        vec![
            Button::new("🐶 Dog", "category:dog"),
            Button::new("🐱 Cat", "category:cat"),
        ],
        vec![Button::new("🐾 Other", "category:other")],
        vec![Button::new("❌ Cancel", actions::CANCEL)],
    ]
}

pub fn sex_keyboard() -> Keyboard {
    vec![
        vec![
            Button::new("♂️ Male", "sex:male"),
            Button::new("♀️ Female", "sex:female"),
        ],
        vec![Button::new("❓ Don't know", "sex:unknown")],
        nav_row(),
    ]
}

pub fn photos_keyboard() -> Keyboard {
    vec![
        vec![Button::new("✅ Finish upload", actions::PHOTOS_DONE)],
        nav_row(),
    ]
}

pub fn location_keyboard() -> Keyboard {
    vec![
        vec![Button::new("📍 Send location", actions::LOCATION_GEO)],
        vec![Button::new("✏️ Type the address", actions::LOCATION_MANUAL)],
        nav_row(),
    ]
}

pub fn navigation_keyboard() -> Keyboard {
    vec![nav_row()]
}

pub fn confirmation_keyboard() -> Keyboard {
    vec![
        vec![
            Button::new("✅ Confirm", actions::CONFIRM),
            Button::new("❌ Discard", actions::REJECT),
        ],
        vec![Button::new("🔄 Start over", actions::RESTART)],
        vec![Button::new("⬅️ Back", actions::BACK)],
    ]
}

// ── Rendering ───────────────────────────────────────────────────────

const ASK_CATEGORY: &str = "What animal did you find?";

/// Render the reply for an outcome. `wizard` is the state after the event.
pub fn render(outcome: &Outcome, wizard: Option<&ActiveWizard>, settings: &WizardSettings) -> Reply {
    match outcome {
        Outcome::Ignored => Reply::none(),

        Outcome::Started => Reply::text(
            TextMessage::new(format!(
                "👋 Hi! I help reunite lost pets with their owners.\n\n\
                 To post a report about an animal you found, I will ask a few questions.\n\n\
                 {ASK_CATEGORY}"
            ))
            .with_keyboard(category_keyboard()),
        ),

        Outcome::Advanced(step) => match wizard {
            Some(wizard) => Reply::text(entering(*step, wizard, settings)),
            None => Reply::none(),
        },

        Outcome::SteppedBack(step) => match wizard {
            Some(wizard) => Reply::text(revisiting(*step, wizard, settings)),
            None => Reply::none(),
        },

        Outcome::PhotoAdded { count } => Reply::text(
            TextMessage::new(format!(
                "✅ Photo {count}/{} uploaded!\n\n\
                 You can send more photos or press 'Finish upload'.",
                settings.max_photos
            ))
            .with_keyboard(photos_keyboard()),
        ),

        Outcome::Rejected(Rejection::PhotoLimit) => Reply::text(
            TextMessage::new(format!(
                "⚠️ You have already uploaded the maximum number of photos ({}).\n\
                 Press 'Finish upload' to go to the next step.",
                settings.max_photos
            ))
            .with_keyboard(photos_keyboard()),
        ),

        Outcome::Rejected(Rejection::NoPhotos) => {
            Reply::alert("⚠️ Please upload at least one photo of the animal!")
        }

        Outcome::Rejected(Rejection::EmptyAddress) => Reply::text(
            TextMessage::new(
                "⚠️ Please enter a valid address.\n\
                 Or go back to choose another way to give the location.",
            )
            .with_keyboard(navigation_keyboard()),
        ),

        Outcome::Rejected(Rejection::IncompleteDraft) => Reply::text(
            TextMessage::new(
                "⚠️ The report is missing required details. \
                 Go back and fill them in, or start over.",
            )
            .with_keyboard(confirmation_keyboard()),
        ),

        Outcome::LocationModeChosen(LocationMode::Geo) => Reply::text(
            TextMessage::new(
                "📍 Please send the location where you found the animal.\n\n\
                 Tap the attachment button (📎) and choose 'Location'.\n\
                 Or type /cancel to cancel.",
            )
            .with_keyboard(navigation_keyboard()),
        ),

        Outcome::LocationModeChosen(LocationMode::Manual) => Reply::text(
            TextMessage::new(
                "🏙️ Please type the address where you found the animal.\n\n\
                 For example: Moscow, Pushkin St 10",
            )
            .with_keyboard(navigation_keyboard()),
        ),

        Outcome::Cancelled => Reply::text(TextMessage::new(
            "❌ Cancelled. All entered data has been deleted.\n\n\
             Use /start to create a new report.",
        )),

        Outcome::NothingToCancel => Reply::text(TextMessage::new(
            "🤔 Nothing to cancel. Use /start to create a report.",
        )),

        Outcome::Discarded => Reply::text(TextMessage::new(
            "🔄 You cancelled the submission.\n\n\
             To start again, use /start.",
        )),

        Outcome::Restarted => Reply::text(
            TextMessage::new(format!("🔄 Starting over.\n\n{ASK_CATEGORY}"))
                .with_keyboard(category_keyboard()),
        ),

        Outcome::Submitted(_) => Reply::text(TextMessage::new("⏳ Publishing your report...")),
    }
}

/// Prompt shown when a step is reached by moving forward.
fn entering(step: WizardStep, wizard: &ActiveWizard, settings: &WizardSettings) -> TextMessage {
    let draft = &wizard.draft;
    match step {
        WizardStep::SelectingSex => {
            let category = draft.category.as_ref().map(|c| c.label()).unwrap_or("Unknown");
            TextMessage::new(format!(
                "You found: {category}.\n\nNow choose the animal's sex."
            ))
            .with_keyboard(sex_keyboard())
        }
        WizardStep::UploadingPhotos => {
            let category = draft.category.as_ref().map(|c| c.label()).unwrap_or("Unknown");
            let sex = draft.sex.as_ref().map(|s| s.label()).unwrap_or("Unknown");
            TextMessage::new(format!(
                "You found: {category}, {sex}.\n\n{}",
                photos_prompt(settings)
            ))
            .with_keyboard(photos_keyboard())
        }
        WizardStep::EnteringComment => {
            let saved = match draft.location.address.as_deref() {
                Some(address) => format!("✅ Address '{address}' saved!"),
                None => "✅ Location saved!".to_string(),
            };
            TextMessage::new(format!("{saved}\n\n{}", comment_prompt(settings)))
                .with_keyboard(navigation_keyboard())
        }
        WizardStep::Confirming => TextMessage::new(format!(
            "📝 Here is how your report will look:\n\n{}\n\nIs everything correct?",
            draft.render_preview()
        ))
        .with_keyboard(confirmation_keyboard()),
        other => revisiting(other, wizard, settings),
    }
}

/// Prompt shown when a step is re-entered by going back.
fn revisiting(step: WizardStep, wizard: &ActiveWizard, settings: &WizardSettings) -> TextMessage {
    match step {
        WizardStep::SelectingCategory => {
            TextMessage::new(ASK_CATEGORY).with_keyboard(category_keyboard())
        }
        WizardStep::SelectingSex => {
            TextMessage::new("Choose the animal's sex:").with_keyboard(sex_keyboard())
        }
        WizardStep::UploadingPhotos => {
            TextMessage::new(format!("📸 {}", photos_prompt(settings)))
                .with_keyboard(photos_keyboard())
        }
        WizardStep::EnteringLocation => TextMessage::new(
            "🌍 Tell us where you found the animal.\n\n\
             You can send a location or type the address.",
        )
        .with_keyboard(location_keyboard()),
        WizardStep::EnteringComment => {
            TextMessage::new(comment_prompt(settings)).with_keyboard(navigation_keyboard())
        }
        WizardStep::Confirming => TextMessage::new(format!(
            "📝 Here is how your report will look:\n\n{}\n\nIs everything correct?",
            wizard.draft.render_preview()
        ))
        .with_keyboard(confirmation_keyboard()),
    }
}

fn photos_prompt(settings: &WizardSettings) -> String {
    format!(
        "Send photos of the animal. You can send up to {} photos.\n\
         When you are done, press 'Finish upload'.",
        settings.max_photos
    )
}

fn comment_prompt(settings: &WizardSettings) -> String {
    let no_word = settings
        .no_comment_words
        .first()
        .map(String::as_str)
        .unwrap_or("no");
    format!(
        "Now add a comment about the animal: distinctive marks, behaviour, \
         a collar and so on.\nOr write '{no_word}' if you have nothing to add."
    )
}
