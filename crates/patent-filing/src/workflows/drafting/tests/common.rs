use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::drafting::domain::{
    Draft, DraftId, DraftSection, InventionDisclosure, Project, ProjectId, StartDraft,
};
use crate::workflows::drafting::generator::{GenerationError, SectionGenerator, SectionPrompt};
use crate::workflows::drafting::repository::{DraftRepository, RepositoryError};
use crate::workflows::drafting::{drafting_router, DraftingService};

static TICKS: AtomicI64 = AtomicI64::new(0);

/// Clock advancing one second per reading, so update order is observable.
pub(super) fn ticking_clock() -> DateTime<Utc> {
    let tick = TICKS.fetch_add(1, Ordering::Relaxed);
    let epoch = Utc
        .with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
        .single()
        .expect("valid epoch");
    epoch + Duration::seconds(tick)
}

pub(super) fn start_request() -> StartDraft {
    StartDraft {
        user_id: "inventor-7".to_string(),
        project_title: "Solar mounts".to_string(),
        disclosure: InventionDisclosure {
            title: "Self-cleaning solar panel mount".to_string(),
            field_of_invention: "Renewable energy".to_string(),
            brief_summary: "A mount with a rain-driven wiper.".to_string(),
            key_components: "Frame, wiper arm, gutter".to_string(),
            problem_solved: "Dust reduces panel output.".to_string(),
        },
        ..StartDraft::default()
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryDrafts {
    projects: Arc<Mutex<HashMap<ProjectId, Project>>>,
    drafts: Arc<Mutex<HashMap<DraftId, Draft>>>,
}

impl DraftRepository for MemoryDrafts {
    fn insert_project(&self, project: Project) -> Result<Project, RepositoryError> {
        let mut guard = self.projects.lock().expect("project mutex poisoned");
        guard.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    fn fetch_project(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        let guard = self.projects.lock().expect("project mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn projects_for_user(&self, user_id: &str) -> Result<Vec<Project>, RepositoryError> {
        let guard = self.projects.lock().expect("project mutex poisoned");
        Ok(guard
            .values()
            .filter(|project| project.user_id == user_id)
            .cloned()
            .collect())
    }

    fn insert_draft(&self, draft: Draft) -> Result<Draft, RepositoryError> {
        let mut guard = self.drafts.lock().expect("draft mutex poisoned");
        guard.insert(draft.id.clone(), draft.clone());
        Ok(draft)
    }

    fn update_draft(&self, draft: Draft) -> Result<(), RepositoryError> {
        let mut guard = self.drafts.lock().expect("draft mutex poisoned");
        guard.insert(draft.id.clone(), draft);
        Ok(())
    }

    fn fetch_draft(&self, id: &DraftId) -> Result<Option<Draft>, RepositoryError> {
        let guard = self.drafts.lock().expect("draft mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn drafts_for_project(&self, project_id: &ProjectId) -> Result<Vec<Draft>, RepositoryError> {
        let guard = self.drafts.lock().expect("draft mutex poisoned");
        Ok(guard
            .values()
            .filter(|draft| &draft.project_id == project_id)
            .cloned()
            .collect())
    }
}

/// Generator echoing the section and the rephrase instruction, recording
/// every prompt it receives.
#[derive(Default, Clone)]
pub(super) struct ScriptedGenerator {
    prompts: Arc<Mutex<Vec<SectionPrompt>>>,
}

impl ScriptedGenerator {
    pub(super) fn prompts(&self) -> Vec<SectionPrompt> {
        self.prompts.lock().expect("prompt mutex poisoned").clone()
    }
}

impl SectionGenerator for ScriptedGenerator {
    fn generate(
        &self,
        section: DraftSection,
        prompt: &SectionPrompt,
    ) -> Result<String, GenerationError> {
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(prompt.clone());
        Ok(format!("generated {section}"))
    }

    fn rephrase(
        &self,
        _section: DraftSection,
        current: &str,
        instruction: &str,
    ) -> Result<String, GenerationError> {
        Ok(format!("{current} ({instruction})"))
    }
}

pub(super) struct OfflineGenerator;

impl SectionGenerator for OfflineGenerator {
    fn generate(
        &self,
        _section: DraftSection,
        _prompt: &SectionPrompt,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::Unavailable("quota exceeded".to_string()))
    }

    fn rephrase(
        &self,
        _section: DraftSection,
        _current: &str,
        _instruction: &str,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::Unavailable("quota exceeded".to_string()))
    }
}

pub(super) fn build_service() -> (
    DraftingService<MemoryDrafts, ScriptedGenerator>,
    Arc<MemoryDrafts>,
    Arc<ScriptedGenerator>,
) {
    let repository = Arc::new(MemoryDrafts::default());
    let generator = Arc::new(ScriptedGenerator::default());
    let service =
        DraftingService::with_clock(repository.clone(), generator.clone(), ticking_clock);
    (service, repository, generator)
}

pub(super) fn offline_service() -> (DraftingService<MemoryDrafts, OfflineGenerator>, Arc<MemoryDrafts>) {
    let repository = Arc::new(MemoryDrafts::default());
    let service =
        DraftingService::with_clock(repository.clone(), Arc::new(OfflineGenerator), ticking_clock);
    (service, repository)
}

pub(super) fn drafting_router_with_service(
    service: DraftingService<MemoryDrafts, ScriptedGenerator>,
) -> axum::Router {
    drafting_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
