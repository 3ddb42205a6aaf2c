//! Specification drafting: projects, drafts moving through eight steps, and
//! section generation with a recorded history of every attempt.

pub mod domain;
pub mod generator;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Draft, DraftId, DraftPatch, DraftSection, DraftSections, GenerationRecord, InventionDisclosure,
    Project, ProjectId, ProjectOverview, ProjectStatus, SectionContent, StartDraft, StartedDraft,
};
pub use generator::{BoilerplateGenerator, GenerationError, SectionGenerator, SectionPrompt};
pub use repository::{DraftRepository, RepositoryError};
pub use router::drafting_router;
pub use service::{DraftingError, DraftingService, DEFAULT_REPHRASE_INSTRUCTION};
