//! Transition function: (current wizard, event) → (next wizard, outcome).
//!
//! Pure and synchronous; the manager owns session storage and side effects.

use crate::config::WizardSettings;

use super::draft::{Draft, Reporter};
use super::event::{LocationMode, WizardEvent};
use super::state::WizardStep;

/// A conversation that is inside the wizard.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveWizard {
    pub step: WizardStep,
    pub draft: Draft,
}

impl ActiveWizard {
    /// A fresh wizard at the first step.
    pub fn begin(reporter: &Reporter) -> Self {
        Self {
            step: WizardStep::SelectingCategory,
            draft: Draft::new(reporter),
        }
    }
}

/// Why an input was refused. The draft is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// "Done" pressed with no photos uploaded.
    NoPhotos,
    /// Photo cap already reached.
    PhotoLimit,
    /// Address was blank.
    EmptyAddress,
    /// Confirm pressed on a draft missing required data.
    IncompleteDraft,
}

/// What an event did to the conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Event has no meaning in the current step.
    Ignored,
    /// A fresh wizard was started.
    Started,
    /// Input accepted, moved forward to the given step.
    Advanced(WizardStep),
    /// Moved back to the given step.
    SteppedBack(WizardStep),
    /// Photo stored; `count` photos are now held.
    PhotoAdded { count: usize },
    Rejected(Rejection),
    /// Reporter picked how to give the location; step unchanged.
    LocationModeChosen(LocationMode),
    /// Draft discarded by cancel.
    Cancelled,
    /// Cancel with no active wizard.
    NothingToCancel,
    /// Draft discarded at confirmation.
    Discarded,
    /// Draft discarded at confirmation and a fresh wizard started.
    Restarted,
    /// Draft confirmed and ready to publish.
    Submitted(Box<Draft>),
}

/// Apply `event` to the conversation state.
pub fn transition(
    current: Option<ActiveWizard>,
    event: WizardEvent,
    reporter: &Reporter,
    settings: &WizardSettings,
) -> (Option<ActiveWizard>, Outcome) {
    // Start and cancel work from anywhere, including no step.
    match event {
        WizardEvent::Start => return (Some(ActiveWizard::begin(reporter)), Outcome::Started),
        WizardEvent::Cancel => {
            let outcome = if current.is_some() {
                Outcome::Cancelled
            } else {
                Outcome::NothingToCancel
            };
            return (None, outcome);
        }
        _ => {}
    }

    let Some(mut wizard) = current else {
        return (None, Outcome::Ignored);
    };

    use WizardStep::*;
    let outcome = match (wizard.step, event) {
        (step, WizardEvent::Back) => match step.previous() {
            Some(previous) if move_to(&mut wizard, previous) => {
                clear_on_back(&mut wizard.draft, step);
                Outcome::SteppedBack(previous)
            }
            _ => Outcome::Ignored,
        },

        (SelectingCategory, WizardEvent::PickCategory(category)) => {
            wizard.draft.apply_category(category);
            advance(&mut wizard)
        }

        (SelectingSex, WizardEvent::PickSex(sex)) => {
            wizard.draft.apply_sex(sex);
            advance(&mut wizard)
        }

        (UploadingPhotos, WizardEvent::Photo(photo)) => {
            if wizard.draft.add_photo(photo, settings.max_photos) {
                Outcome::PhotoAdded {
                    count: wizard.draft.photos.len(),
                }
            } else {
                Outcome::Rejected(Rejection::PhotoLimit)
            }
        }

        (UploadingPhotos, WizardEvent::PhotosDone) => {
            if wizard.draft.photos.is_empty() {
                Outcome::Rejected(Rejection::NoPhotos)
            } else {
                advance(&mut wizard)
            }
        }

        (EnteringLocation, WizardEvent::ChooseLocationMode(mode)) => {
            Outcome::LocationModeChosen(mode)
        }

        (
            EnteringLocation,
            WizardEvent::Geo {
                latitude,
                longitude,
            },
        ) => {
            wizard.draft.set_location_geo(latitude, longitude);
            advance(&mut wizard)
        }

        (EnteringLocation, WizardEvent::Text(text)) => {
            if wizard.draft.set_location_address(&text) {
                advance(&mut wizard)
            } else {
                Outcome::Rejected(Rejection::EmptyAddress)
            }
        }

        (EnteringComment, WizardEvent::Text(text)) => {
            wizard
                .draft
                .set_comment(&text, &settings.no_comment_words);
            advance(&mut wizard)
        }

        (Confirming, WizardEvent::Confirm) => {
            if wizard.draft.is_complete() {
                return (None, Outcome::Submitted(Box::new(wizard.draft)));
            }
            Outcome::Rejected(Rejection::IncompleteDraft)
        }

        (Confirming, WizardEvent::Reject) => return (None, Outcome::Discarded),

        (Confirming, WizardEvent::Restart) => {
            return (Some(ActiveWizard::begin(reporter)), Outcome::Restarted);
        }

        _ => Outcome::Ignored,
    };

    (Some(wizard), outcome)
}

fn advance(wizard: &mut ActiveWizard) -> Outcome {
    match wizard.step.next() {
        Some(next) if move_to(wizard, next) => Outcome::Advanced(next),
        _ => Outcome::Ignored,
    }
}

/// Move to `target` if the step graph allows it.
fn move_to(wizard: &mut ActiveWizard, target: WizardStep) -> bool {
    if !wizard.step.can_transition_to(target) {
        tracing::warn!(from = %wizard.step, to = %target, "Refusing invalid wizard transition");
        return false;
    }
    wizard.step = target;
    true
}

/// Clear what the step being left collected. Going back from sex selection
/// also drops the category, since that is the choice being revisited.
fn clear_on_back(draft: &mut Draft, leaving: WizardStep) {
    match leaving {
        WizardStep::SelectingCategory => draft.clear_category(),
        WizardStep::SelectingSex => {
            draft.clear_sex();
            draft.clear_category();
        }
        WizardStep::UploadingPhotos => draft.clear_photos(),
        WizardStep::EnteringLocation => draft.clear_location(),
        WizardStep::EnteringComment => draft.clear_comment(),
        WizardStep::Confirming => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::draft::{Category, Location, PhotoRef, Sex};

    fn reporter() -> Reporter {
        Reporter {
            subject_id: "42".into(),
            chat_id: "100".into(),
            display_name: Some("alice".into()),
        }
    }

    fn settings() -> WizardSettings {
        WizardSettings::default()
    }

    fn step(
        current: Option<ActiveWizard>,
        event: WizardEvent,
    ) -> (Option<ActiveWizard>, Outcome) {
        transition(current, event, &reporter(), &settings())
    }

    /// Drive a fresh wizard with valid inputs up to (and including) `target`.
    fn wizard_at(target: WizardStep) -> ActiveWizard {
        let inputs = [
            WizardEvent::PickCategory(Category::Dog),
            WizardEvent::PickSex(Sex::Male),
            WizardEvent::PhotosDone,
            WizardEvent::Text("Main St 1".into()),
            WizardEvent::Text("no".into()),
        ];
        let mut wizard = ActiveWizard::begin(&reporter());
        for input in inputs {
            if wizard.step == target {
                break;
            }
            if wizard.step == WizardStep::UploadingPhotos {
                let (w, _) = step(Some(wizard), WizardEvent::Photo(PhotoRef::new("p1", "u1")));
                wizard = w.unwrap();
            }
            let (w, _) = step(Some(wizard), input);
            wizard = w.unwrap();
        }
        assert_eq!(wizard.step, target);
        wizard
    }

    #[test]
    fn move_to_refuses_skipping_steps() {
        let mut wizard = wizard_at(WizardStep::UploadingPhotos);
        assert!(!move_to(&mut wizard, WizardStep::Confirming));
        assert!(!move_to(&mut wizard, WizardStep::SelectingCategory));
        assert_eq!(wizard.step, WizardStep::UploadingPhotos);

        assert!(move_to(&mut wizard, WizardStep::EnteringLocation));
        assert_eq!(wizard.step, WizardStep::EnteringLocation);
    }

    #[test]
    fn start_from_nothing_enters_first_step() {
        let (wizard, outcome) = step(None, WizardEvent::Start);
        assert_eq!(outcome, Outcome::Started);
        let wizard = wizard.unwrap();
        assert_eq!(wizard.step, WizardStep::SelectingCategory);
        assert_eq!(wizard.draft.subject_id, "42");
        assert_eq!(wizard.draft.display_name.as_deref(), Some("alice"));
    }

    #[test]
    fn start_mid_wizard_resets_draft() {
        let wizard = wizard_at(WizardStep::EnteringLocation);
        let (wizard, outcome) = step(Some(wizard), WizardEvent::Start);
        assert_eq!(outcome, Outcome::Started);
        let wizard = wizard.unwrap();
        assert_eq!(wizard.step, WizardStep::SelectingCategory);
        assert!(wizard.draft.category.is_none());
        assert!(wizard.draft.photos.is_empty());
    }

    #[test]
    fn events_without_wizard_are_ignored() {
        let (wizard, outcome) = step(None, WizardEvent::Text("hello".into()));
        assert!(wizard.is_none());
        assert_eq!(outcome, Outcome::Ignored);

        let (wizard, outcome) = step(None, WizardEvent::Back);
        assert!(wizard.is_none());
        assert_eq!(outcome, Outcome::Ignored);
    }

    #[test]
    fn cancel_from_every_state_ends_wizard() {
        let (wizard, outcome) = step(None, WizardEvent::Cancel);
        assert!(wizard.is_none());
        assert_eq!(outcome, Outcome::NothingToCancel);

        for target in WizardStep::ALL {
            let (wizard, outcome) = step(Some(wizard_at(target)), WizardEvent::Cancel);
            assert!(wizard.is_none(), "cancel from {target} should clear");
            assert_eq!(outcome, Outcome::Cancelled);
        }
    }

    #[test]
    fn full_walk_is_complete_exactly_at_confirming() {
        let mut wizard = ActiveWizard::begin(&reporter());
        let events = [
            WizardEvent::PickCategory(Category::Dog),
            WizardEvent::PickSex(Sex::Male),
            WizardEvent::Photo(PhotoRef::new("p1", "u1")),
            WizardEvent::PhotosDone,
            WizardEvent::Text("Main St 1".into()),
            WizardEvent::Text("Friendly".into()),
        ];
        for event in events {
            if wizard.step < WizardStep::EnteringLocation {
                assert!(!wizard.draft.is_complete(), "complete too early at {}", wizard.step);
            }
            let (w, outcome) = step(Some(wizard), event);
            assert!(!matches!(outcome, Outcome::Rejected(_) | Outcome::Ignored));
            wizard = w.unwrap();
        }
        assert_eq!(wizard.step, WizardStep::Confirming);
        assert!(wizard.draft.is_complete());
        assert_eq!(wizard.draft.comment.as_deref(), Some("Friendly"));
    }

    #[test]
    fn photo_cap_is_enforced() {
        let mut wizard = wizard_at(WizardStep::UploadingPhotos);
        wizard.draft.clear_photos();
        for i in 0..settings().max_photos {
            let (w, outcome) = step(
                Some(wizard),
                WizardEvent::Photo(PhotoRef::new(format!("p{i}"), format!("u{i}"))),
            );
            assert_eq!(outcome, Outcome::PhotoAdded { count: i + 1 });
            wizard = w.unwrap();
        }
        let (w, outcome) = step(Some(wizard), WizardEvent::Photo(PhotoRef::new("extra", "x")));
        assert_eq!(outcome, Outcome::Rejected(Rejection::PhotoLimit));
        let wizard = w.unwrap();
        assert_eq!(wizard.draft.photos.len(), 5);
        assert_eq!(wizard.step, WizardStep::UploadingPhotos);
    }

    #[test]
    fn done_without_photos_is_rejected() {
        let mut wizard = wizard_at(WizardStep::UploadingPhotos);
        wizard.draft.clear_photos();
        let (w, outcome) = step(Some(wizard), WizardEvent::PhotosDone);
        assert_eq!(outcome, Outcome::Rejected(Rejection::NoPhotos));
        assert_eq!(w.unwrap().step, WizardStep::UploadingPhotos);
    }

    #[test]
    fn blank_address_is_rejected_and_step_kept() {
        let wizard = wizard_at(WizardStep::EnteringLocation);
        let before = wizard.draft.clone();
        let (w, outcome) = step(Some(wizard), WizardEvent::Text("   ".into()));
        assert_eq!(outcome, Outcome::Rejected(Rejection::EmptyAddress));
        let w = w.unwrap();
        assert_eq!(w.step, WizardStep::EnteringLocation);
        assert_eq!(w.draft, before);
    }

    #[test]
    fn geo_location_advances() {
        let wizard = wizard_at(WizardStep::EnteringLocation);
        let (w, outcome) = step(
            Some(wizard),
            WizardEvent::Geo {
                latitude: 55.75,
                longitude: 37.62,
            },
        );
        assert_eq!(outcome, Outcome::Advanced(WizardStep::EnteringComment));
        assert_eq!(w.unwrap().draft.location, Location::geo(55.75, 37.62));
    }

    #[test]
    fn location_mode_keeps_step() {
        let wizard = wizard_at(WizardStep::EnteringLocation);
        let (w, outcome) = step(
            Some(wizard),
            WizardEvent::ChooseLocationMode(LocationMode::Manual),
        );
        assert_eq!(outcome, Outcome::LocationModeChosen(LocationMode::Manual));
        assert_eq!(w.unwrap().step, WizardStep::EnteringLocation);
    }

    #[test]
    fn no_word_comment_is_empty() {
        let wizard = wizard_at(WizardStep::EnteringComment);
        let (w, _) = step(Some(wizard), WizardEvent::Text("NO".into()));
        assert_eq!(w.unwrap().draft.comment.as_deref(), Some(""));
    }

    #[test]
    fn back_clears_only_the_step_being_left() {
        // Sex selection → category selection drops the category.
        let (w, outcome) = step(Some(wizard_at(WizardStep::SelectingSex)), WizardEvent::Back);
        assert_eq!(outcome, Outcome::SteppedBack(WizardStep::SelectingCategory));
        let w = w.unwrap();
        assert!(w.draft.category.is_none());

        // Photos → sex selection drops photos, keeps category and sex.
        let mut at_photos = wizard_at(WizardStep::UploadingPhotos);
        at_photos.draft.add_photo(PhotoRef::new("p1", "u1"), 5);
        let (w, _) = step(Some(at_photos), WizardEvent::Back);
        let w = w.unwrap();
        assert_eq!(w.step, WizardStep::SelectingSex);
        assert!(w.draft.photos.is_empty());
        assert_eq!(w.draft.category, Some(Category::Dog));
        assert_eq!(w.draft.sex, Some(Sex::Male));

        // Location → photos keeps photos.
        let mut at_location = wizard_at(WizardStep::EnteringLocation);
        at_location.draft.location = Location::address("stale");
        let (w, _) = step(Some(at_location), WizardEvent::Back);
        let w = w.unwrap();
        assert_eq!(w.step, WizardStep::UploadingPhotos);
        assert_eq!(w.draft.location, Location::default());
        assert_eq!(w.draft.photos.len(), 1);

        // Comment → location keeps location.
        let mut at_comment = wizard_at(WizardStep::EnteringComment);
        at_comment.draft.comment = Some("stale".into());
        let (w, _) = step(Some(at_comment), WizardEvent::Back);
        let w = w.unwrap();
        assert_eq!(w.step, WizardStep::EnteringLocation);
        assert!(w.draft.comment.is_none());
        assert!(w.draft.location.is_valid());

        // Confirming → comment clears nothing.
        let at_confirm = wizard_at(WizardStep::Confirming);
        let before = at_confirm.draft.clone();
        let (w, outcome) = step(Some(at_confirm), WizardEvent::Back);
        assert_eq!(outcome, Outcome::SteppedBack(WizardStep::EnteringComment));
        assert_eq!(w.unwrap().draft, before);
    }

    #[test]
    fn back_at_first_step_is_ignored() {
        let (w, outcome) = step(
            Some(wizard_at(WizardStep::SelectingCategory)),
            WizardEvent::Back,
        );
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(w.unwrap().step, WizardStep::SelectingCategory);
    }

    #[test]
    fn confirm_submits_complete_draft() {
        let (w, outcome) = step(Some(wizard_at(WizardStep::Confirming)), WizardEvent::Confirm);
        assert!(w.is_none());
        match outcome {
            Outcome::Submitted(draft) => {
                assert!(draft.is_complete());
                assert_eq!(draft.location, Location::address("Main St 1"));
            }
            other => panic!("expected submission, got {other:?}"),
        }
    }

    #[test]
    fn confirm_refuses_incomplete_draft() {
        let mut wizard = wizard_at(WizardStep::Confirming);
        wizard.draft.clear_photos();
        let (w, outcome) = step(Some(wizard), WizardEvent::Confirm);
        assert_eq!(outcome, Outcome::Rejected(Rejection::IncompleteDraft));
        assert_eq!(w.unwrap().step, WizardStep::Confirming);
    }

    #[test]
    fn reject_and_restart() {
        let (w, outcome) = step(Some(wizard_at(WizardStep::Confirming)), WizardEvent::Reject);
        assert!(w.is_none());
        assert_eq!(outcome, Outcome::Discarded);

        let (w, outcome) = step(Some(wizard_at(WizardStep::Confirming)), WizardEvent::Restart);
        assert_eq!(outcome, Outcome::Restarted);
        let w = w.unwrap();
        assert_eq!(w.step, WizardStep::SelectingCategory);
        assert!(w.draft.category.is_none());
    }

    #[test]
    fn unexpected_events_are_ignored_without_mutation() {
        let cases = [
            (WizardStep::SelectingCategory, WizardEvent::Text("dog".into())),
            (WizardStep::SelectingSex, WizardEvent::PickCategory(Category::Cat)),
            (WizardStep::UploadingPhotos, WizardEvent::Text("hi".into())),
            (WizardStep::EnteringComment, WizardEvent::Photo(PhotoRef::new("x", "y"))),
            (WizardStep::Confirming, WizardEvent::Text("yes".into())),
        ];
        for (at, event) in cases {
            let wizard = wizard_at(at);
            let before = wizard.clone();
            let (w, outcome) = step(Some(wizard), event);
            assert_eq!(outcome, Outcome::Ignored);
            assert_eq!(w.unwrap(), before);
        }
    }
}
