use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::{
    Draft, DraftId, DraftPatch, DraftSection, DraftSections, Project, ProjectId, ProjectOverview,
    ProjectStatus, SectionContent, StartDraft, StartedDraft, FIRST_STEP, LAST_STEP,
};
use super::generator::{GenerationError, SectionGenerator, SectionPrompt};
use super::repository::{DraftRepository, RepositoryError};

pub const DEFAULT_REPHRASE_INSTRUCTION: &str = "improve clarity";

static PROJECT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static DRAFT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_project_id() -> ProjectId {
    let id = PROJECT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProjectId(format!("proj-{id:06}"))
}

fn next_draft_id() -> DraftId {
    let id = DRAFT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    DraftId(format!("draft-{id:06}"))
}

pub type Clock = fn() -> DateTime<Utc>;

/// Service composing the draft repository and the section generator.
pub struct DraftingService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    clock: Clock,
}

impl<R, G> DraftingService<R, G>
where
    R: DraftRepository + 'static,
    G: SectionGenerator + 'static,
{
    pub fn new(repository: Arc<R>, generator: Arc<G>) -> Self {
        Self::with_clock(repository, generator, Utc::now)
    }

    pub fn with_clock(repository: Arc<R>, generator: Arc<G>, clock: Clock) -> Self {
        Self {
            repository,
            generator,
            clock,
        }
    }

    /// Open a draft at step one, creating its project unless the request
    /// names an existing one.
    pub fn start(&self, request: StartDraft) -> Result<StartedDraft, DraftingError> {
        let now = (self.clock)();
        let project_id = match request.project_id {
            Some(project_id) => match self.repository.fetch_project(&project_id)? {
                Some(project) => project.id,
                None => return Err(DraftingError::ProjectNotFound(project_id)),
            },
            None => {
                let project = self.repository.insert_project(Project {
                    id: next_project_id(),
                    user_id: request.user_id,
                    title: request.project_title,
                    description: request.project_description,
                    status: ProjectStatus::Draft,
                    created_at: now,
                    updated_at: now,
                })?;
                project.id
            }
        };

        let draft = self.repository.insert_draft(Draft {
            id: next_draft_id(),
            project_id: project_id.clone(),
            disclosure: request.disclosure,
            sections: DraftSections::default(),
            current_step: FIRST_STEP,
            is_complete: false,
            created_at: now,
            updated_at: now,
            ai_generated_sections: Vec::new(),
            generation_history: Vec::new(),
        })?;

        info!(draft_id = %draft.id, project_id = %project_id, "started draft");
        Ok(StartedDraft {
            draft_id: draft.id,
            project_id,
        })
    }

    pub fn get(&self, draft_id: &DraftId) -> Result<Draft, DraftingError> {
        let draft = self
            .repository
            .fetch_draft(draft_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(draft)
    }

    /// Apply the supplied fields of `patch`; nothing is written when the
    /// step is out of range.
    pub fn update(&self, draft_id: &DraftId, patch: DraftPatch) -> Result<Draft, DraftingError> {
        if let Some(step) = patch.current_step {
            if !(FIRST_STEP..=LAST_STEP).contains(&step) {
                return Err(DraftingError::InvalidStep(step));
            }
        }

        let mut draft = self.get(draft_id)?;
        patch.apply(&mut draft);
        draft.updated_at = (self.clock)();
        self.repository.update_draft(draft.clone())?;
        Ok(draft)
    }

    /// Generate `section` from the disclosure and earlier sections. A failed
    /// attempt is still recorded in the generation history.
    pub fn generate_section(
        &self,
        draft_id: &DraftId,
        section: DraftSection,
    ) -> Result<SectionContent, DraftingError> {
        let mut draft = self.get(draft_id)?;
        let prompt = SectionPrompt::for_section(&draft, section);
        let outcome = self.generator.generate(section, &prompt);
        let now = (self.clock)();

        match outcome {
            Ok(content) => {
                draft.sections.set(section, content.clone());
                draft.mark_generated(section);
                draft.record_generation(section, now, None);
                draft.updated_at = now;
                self.repository.update_draft(draft)?;
                info!(draft_id = %draft_id, %section, chars = content.len(), "generated section");
                Ok(SectionContent { section, content })
            }
            Err(error) => {
                warn!(draft_id = %draft_id, %section, %error, "section generation failed");
                draft.record_generation(section, now, Some(error.to_string()));
                draft.updated_at = now;
                self.repository.update_draft(draft)?;
                Err(error.into())
            }
        }
    }

    pub fn rephrase_section(
        &self,
        draft_id: &DraftId,
        section: DraftSection,
        instruction: Option<&str>,
    ) -> Result<SectionContent, DraftingError> {
        let mut draft = self.get(draft_id)?;
        let current = draft.section(section);
        if current.trim().is_empty() {
            return Err(DraftingError::EmptySection(section));
        }

        let instruction = instruction
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_REPHRASE_INSTRUCTION);
        let content = self.generator.rephrase(section, current, instruction)?;

        draft.sections.set(section, content.clone());
        draft.updated_at = (self.clock)();
        self.repository.update_draft(draft)?;
        info!(draft_id = %draft_id, %section, instruction, "rephrased section");
        Ok(SectionContent { section, content })
    }

    /// Projects owned by `user_id`, most recently updated first.
    pub fn projects_for_user(&self, user_id: &str) -> Result<Vec<ProjectOverview>, DraftingError> {
        let mut projects = self.repository.projects_for_user(user_id)?;
        projects.sort_by_key(|project| Reverse((project.updated_at, project.id.clone())));

        projects
            .into_iter()
            .map(|project| {
                let draft_count = self.repository.drafts_for_project(&project.id)?.len();
                Ok(ProjectOverview {
                    project,
                    draft_count,
                })
            })
            .collect()
    }

    /// Drafts in `project_id`, most recently updated first.
    pub fn drafts_for_project(&self, project_id: &ProjectId) -> Result<Vec<Draft>, DraftingError> {
        let mut drafts = self.repository.drafts_for_project(project_id)?;
        drafts.sort_by_key(|draft| Reverse((draft.updated_at, draft.id.clone())));
        Ok(drafts)
    }
}

/// Error raised by the drafting service.
#[derive(Debug, thiserror::Error)]
pub enum DraftingError {
    #[error("current_step must be between 1 and 8, found {0}")]
    InvalidStep(u8),
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),
    #[error("No content found for section: {0}")]
    EmptySection(DraftSection),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
