//! Applications module - domain models, services, and traits.

mod applications_model;
mod applications_service;
mod applications_traits;
mod checklist;
mod editor;
mod notes;
mod progress;

pub use applications_model::{ApplicationRecord, BulkDeleteRequest, NewApplication};
pub use applications_service::ApplicationService;
pub use applications_traits::{ApplicationRepositoryTrait, ApplicationServiceTrait};
pub use checklist::{Checklist, ChecklistItem};
pub use editor::{ApplicationEditor, EditableField, EditorMode};
pub use notes::{Note, Notes};
pub use progress::{progress_of, Progress};
