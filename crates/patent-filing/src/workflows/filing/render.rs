use super::context::ApplicationContext;

/// Binary document produced by the template collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub content_type: mime::Mime,
    pub extension: &'static str,
}

impl RenderedDocument {
    /// Attachment name in the `patent_application_<stamp>.<ext>` form.
    pub fn file_name(&self, stamp: &str) -> String {
        format!("patent_application_{stamp}.{}", self.extension)
    }
}

/// Template collaborator mapping context keys onto a document.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, context: &ApplicationContext) -> Result<RenderedDocument, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("document template unavailable: {0}")]
    TemplateUnavailable(String),
    #[error("failed to render document: {0}")]
    Rendering(String),
}
