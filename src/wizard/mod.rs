//! Report wizard — the step-by-step conversation that collects a found-pet
//! report.
//!
//! The wizard walks a reporter through six steps (category, sex, photos,
//! location, comment, confirmation), accumulating a `Draft`. Back and cancel
//! work from every step. Once confirmed, the draft is handed to the
//! submission pipeline.

pub mod draft;
pub mod event;
pub mod machine;
pub mod manager;
pub mod prompts;
pub mod state;

pub use draft::{Category, Draft, Location, PhotoRef, Reporter, Sex};
pub use event::{LocationMode, WizardEvent};
pub use machine::{transition, ActiveWizard, Outcome, Rejection};
pub use manager::WizardManager;
pub use prompts::Reply;
pub use state::WizardStep;
