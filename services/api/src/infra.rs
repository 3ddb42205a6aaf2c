use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use patent_filing::workflows::drafting::{
    Draft, DraftId, DraftRepository, Project, ProjectId, RepositoryError,
};
use patent_filing::workflows::filing::{
    ApplicationContext, DocumentRenderer, RenderError, RenderedDocument,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDraftRepository {
    projects: Arc<Mutex<HashMap<ProjectId, Project>>>,
    drafts: Arc<Mutex<HashMap<DraftId, Draft>>>,
}

impl DraftRepository for InMemoryDraftRepository {
    fn insert_project(&self, project: Project) -> Result<Project, RepositoryError> {
        lock(&self.projects)?.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    fn fetch_project(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        Ok(lock(&self.projects)?.get(id).cloned())
    }

    fn projects_for_user(&self, user_id: &str) -> Result<Vec<Project>, RepositoryError> {
        Ok(lock(&self.projects)?
            .values()
            .filter(|project| project.user_id == user_id)
            .cloned()
            .collect())
    }

    fn insert_draft(&self, draft: Draft) -> Result<Draft, RepositoryError> {
        lock(&self.drafts)?.insert(draft.id.clone(), draft.clone());
        Ok(draft)
    }

    fn update_draft(&self, draft: Draft) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.drafts)?;
        if guard.contains_key(&draft.id) {
            guard.insert(draft.id.clone(), draft);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch_draft(&self, id: &DraftId) -> Result<Option<Draft>, RepositoryError> {
        Ok(lock(&self.drafts)?.get(id).cloned())
    }

    fn drafts_for_project(&self, project_id: &ProjectId) -> Result<Vec<Draft>, RepositoryError> {
        Ok(lock(&self.drafts)?
            .values()
            .filter(|draft| &draft.project_id == project_id)
            .cloned()
            .collect())
    }
}

/// Hands the template context back as a JSON attachment. Stands in for the
/// DOCX template renderer.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct JsonContextRenderer;

impl DocumentRenderer for JsonContextRenderer {
    fn render(&self, context: &ApplicationContext) -> Result<RenderedDocument, RenderError> {
        let bytes = serde_json::to_vec_pretty(context)
            .map_err(|err| RenderError::Rendering(err.to_string()))?;
        Ok(RenderedDocument {
            bytes,
            content_type: mime::APPLICATION_JSON,
            extension: "json",
        })
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use patent_filing::workflows::drafting::{DraftSections, InventionDisclosure};

    fn draft(id: &str) -> Draft {
        let now = Utc::now();
        Draft {
            id: DraftId(id.to_string()),
            project_id: ProjectId("proj-1".to_string()),
            disclosure: InventionDisclosure::default(),
            sections: DraftSections::default(),
            current_step: 1,
            is_complete: false,
            created_at: now,
            updated_at: now,
            ai_generated_sections: Vec::new(),
            generation_history: Vec::new(),
        }
    }

    #[test]
    fn update_requires_existing_draft() {
        let repository = InMemoryDraftRepository::default();
        assert!(matches!(
            repository.update_draft(draft("draft-9")),
            Err(RepositoryError::NotFound)
        ));

        repository.insert_draft(draft("draft-9")).expect("insert");
        repository.update_draft(draft("draft-9")).expect("update");
        let listed = repository
            .drafts_for_project(&ProjectId("proj-1".to_string()))
            .expect("list");
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn parse_date_reports_input() {
        assert_eq!(
            parse_date("2025-03-07").expect("valid"),
            NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date")
        );
        let error = parse_date("07/03/2025").expect_err("wrong format");
        assert!(error.contains("07/03/2025"));
    }
}
