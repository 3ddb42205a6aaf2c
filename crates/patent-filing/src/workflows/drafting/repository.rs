use super::domain::{Draft, DraftId, Project, ProjectId};

/// Storage abstraction for projects and drafts. Writes are last-write-wins
/// by identifier.
pub trait DraftRepository: Send + Sync {
    fn insert_project(&self, project: Project) -> Result<Project, RepositoryError>;
    fn fetch_project(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError>;
    fn projects_for_user(&self, user_id: &str) -> Result<Vec<Project>, RepositoryError>;
    fn insert_draft(&self, draft: Draft) -> Result<Draft, RepositoryError>;
    fn update_draft(&self, draft: Draft) -> Result<(), RepositoryError>;
    fn fetch_draft(&self, id: &DraftId) -> Result<Option<Draft>, RepositoryError>;
    fn drafts_for_project(&self, project_id: &ProjectId) -> Result<Vec<Draft>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
