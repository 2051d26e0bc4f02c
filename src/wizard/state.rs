//! Wizard step machine — tracks which step a conversation is in.

use serde::{Deserialize, Serialize};

/// The steps of the report wizard.
///
/// Progresses linearly: SelectingCategory → SelectingSex → UploadingPhotos →
/// EnteringLocation → EnteringComment → Confirming. "No step" (the idle
/// conversation) is represented by the absence of an active wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    SelectingCategory,
    SelectingSex,
    UploadingPhotos,
    EnteringLocation,
    EnteringComment,
    Confirming,
}

impl WizardStep {
    /// All steps in order.
    pub const ALL: [WizardStep; 6] = [
        WizardStep::SelectingCategory,
        WizardStep::SelectingSex,
        WizardStep::UploadingPhotos,
        WizardStep::EnteringLocation,
        WizardStep::EnteringComment,
        WizardStep::Confirming,
    ];

    /// Check if a transition from `self` to `target` is valid.
    ///
    /// Forward moves go one step at a time, back moves go exactly one step
    /// back. Restarting from Confirming is a fresh wizard, not a transition.
    pub fn can_transition_to(&self, target: WizardStep) -> bool {
        self.next() == Some(target) || self.previous() == Some(target)
    }

    /// The step after this one, if any.
    pub fn next(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            SelectingCategory => Some(SelectingSex),
            SelectingSex => Some(UploadingPhotos),
            UploadingPhotos => Some(EnteringLocation),
            EnteringLocation => Some(EnteringComment),
            EnteringComment => Some(Confirming),
            Confirming => None,
        }
    }

    /// The step before this one, if any.
    pub fn previous(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            SelectingCategory => None,
            SelectingSex => Some(SelectingCategory),
            UploadingPhotos => Some(SelectingSex),
            EnteringLocation => Some(UploadingPhotos),
            EnteringComment => Some(EnteringLocation),
            Confirming => Some(EnteringComment),
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SelectingCategory => "selecting_category",
            Self::SelectingSex => "selecting_sex",
            Self::UploadingPhotos => "uploading_photos",
            Self::EnteringLocation => "entering_location",
            Self::EnteringComment => "entering_comment",
            Self::Confirming => "confirming",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_forward_transitions() {
        use WizardStep::*;
        let transitions = [
            (SelectingCategory, SelectingSex),
            (SelectingSex, UploadingPhotos),
            (UploadingPhotos, EnteringLocation),
            (EnteringLocation, EnteringComment),
            (EnteringComment, Confirming),
        ];
        for (from, to) in transitions {
            assert!(from.can_transition_to(to), "{from} should transition to {to}");
            assert!(to.can_transition_to(from), "{to} should go back to {from}");
        }
    }

    #[test]
    fn invalid_transitions() {
        use WizardStep::*;
        // Skip steps
        assert!(!SelectingCategory.can_transition_to(UploadingPhotos));
        assert!(!SelectingSex.can_transition_to(EnteringComment));
        // Back more than one step
        assert!(!EnteringLocation.can_transition_to(SelectingSex));
        // Self-transition
        assert!(!UploadingPhotos.can_transition_to(UploadingPhotos));
    }

    #[test]
    fn no_wraparound_from_confirming() {
        assert!(!WizardStep::Confirming.can_transition_to(WizardStep::SelectingCategory));
        assert!(!WizardStep::SelectingCategory.can_transition_to(WizardStep::Confirming));
    }

    #[test]
    fn next_walks_all_steps() {
        let mut current = WizardStep::SelectingCategory;
        for expected in &WizardStep::ALL[1..] {
            let next = current.next().unwrap();
            assert_eq!(next, *expected);
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn previous_is_inverse_of_next() {
        for step in WizardStep::ALL {
            if let Some(next) = step.next() {
                assert_eq!(next.previous(), Some(step));
            }
        }
        assert!(WizardStep::SelectingCategory.previous().is_none());
    }

    #[test]
    fn display_matches_serde() {
        for step in WizardStep::ALL {
            let display = format!("{step}");
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(
                format!("\"{display}\""),
                json,
                "Display and serde should match for {step:?}"
            );
        }
    }
}
