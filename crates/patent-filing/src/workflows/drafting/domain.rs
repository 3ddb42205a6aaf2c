use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 8;

/// Identifier wrapper for drafting projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub String);

/// Identifier wrapper for specification drafts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DraftId(pub String);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Completed,
    Archived,
}

/// Container grouping the drafts a user works on for one invention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The five prose sections of a complete specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftSection {
    Background,
    Summary,
    DetailedDescription,
    Claims,
    Abstract,
}

impl DraftSection {
    pub const ALL: [DraftSection; 5] = [
        DraftSection::Background,
        DraftSection::Summary,
        DraftSection::DetailedDescription,
        DraftSection::Claims,
        DraftSection::Abstract,
    ];

    /// Path segment and JSON name of the section.
    pub const fn slug(self) -> &'static str {
        match self {
            DraftSection::Background => "background",
            DraftSection::Summary => "summary",
            DraftSection::DetailedDescription => "detailed_description",
            DraftSection::Claims => "claims",
            DraftSection::Abstract => "abstract",
        }
    }

    pub fn from_slug(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.slug() == value)
    }

    /// Heading printed above the section in a specification.
    pub const fn heading(self) -> &'static str {
        match self {
            DraftSection::Background => "BACKGROUND OF THE INVENTION",
            DraftSection::Summary => "SUMMARY OF THE INVENTION",
            DraftSection::DetailedDescription => "DETAILED DESCRIPTION OF THE INVENTION",
            DraftSection::Claims => "CLAIMS",
            DraftSection::Abstract => "ABSTRACT",
        }
    }

    /// Sections written before this one; they feed the prompt for it.
    pub fn preceding(self) -> &'static [DraftSection] {
        let position = Self::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or_default();
        &Self::ALL[..position]
    }
}

impl fmt::Display for DraftSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// One attempt at generating a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub section: DraftSection,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub error_message: Option<String>,
}

/// Invention disclosure entered in the first drafting steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventionDisclosure {
    pub title: String,
    pub field_of_invention: String,
    pub brief_summary: String,
    pub key_components: String,
    pub problem_solved: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftSections {
    pub background: String,
    pub summary: String,
    pub detailed_description: String,
    pub claims: String,
    pub r#abstract: String,
}

impl DraftSections {
    pub fn get(&self, section: DraftSection) -> &str {
        match section {
            DraftSection::Background => &self.background,
            DraftSection::Summary => &self.summary,
            DraftSection::DetailedDescription => &self.detailed_description,
            DraftSection::Claims => &self.claims,
            DraftSection::Abstract => &self.r#abstract,
        }
    }

    pub fn set(&mut self, section: DraftSection, content: String) {
        let slot = match section {
            DraftSection::Background => &mut self.background,
            DraftSection::Summary => &mut self.summary,
            DraftSection::DetailedDescription => &mut self.detailed_description,
            DraftSection::Claims => &mut self.claims,
            DraftSection::Abstract => &mut self.r#abstract,
        };
        *slot = content;
    }
}

/// A specification draft moving through the eight drafting steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub id: DraftId,
    pub project_id: ProjectId,
    #[serde(flatten)]
    pub disclosure: InventionDisclosure,
    #[serde(flatten)]
    pub sections: DraftSections,
    pub current_step: u8,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub ai_generated_sections: Vec<DraftSection>,
    pub generation_history: Vec<GenerationRecord>,
}

impl Draft {
    pub fn section(&self, section: DraftSection) -> &str {
        self.sections.get(section)
    }

    pub fn mark_generated(&mut self, section: DraftSection) {
        if !self.ai_generated_sections.contains(&section) {
            self.ai_generated_sections.push(section);
        }
    }

    pub fn record_generation(
        &mut self,
        section: DraftSection,
        timestamp: DateTime<Utc>,
        error: Option<String>,
    ) {
        self.generation_history.push(GenerationRecord {
            section,
            timestamp,
            success: error.is_none(),
            error_message: error,
        });
    }
}

fn default_user() -> String {
    "default_user".to_string()
}

fn default_project_title() -> String {
    "New Patent Project".to_string()
}

/// Request to open a draft, in a new project unless `project_id` names an
/// existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartDraft {
    #[serde(default = "default_user")]
    pub user_id: String,
    #[serde(default = "default_project_title")]
    pub project_title: String,
    #[serde(default)]
    pub project_description: String,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(flatten)]
    pub disclosure: InventionDisclosure,
}

impl Default for StartDraft {
    fn default() -> Self {
        Self {
            user_id: default_user(),
            project_title: default_project_title(),
            project_description: String::new(),
            project_id: None,
            disclosure: InventionDisclosure::default(),
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftPatch {
    pub title: Option<String>,
    pub field_of_invention: Option<String>,
    pub brief_summary: Option<String>,
    pub key_components: Option<String>,
    pub problem_solved: Option<String>,
    pub background: Option<String>,
    pub summary: Option<String>,
    pub detailed_description: Option<String>,
    pub claims: Option<String>,
    pub r#abstract: Option<String>,
    pub current_step: Option<u8>,
}

impl DraftPatch {
    pub(crate) fn apply(self, draft: &mut Draft) {
        let disclosure = &mut draft.disclosure;
        for (value, slot) in [
            (self.title, &mut disclosure.title),
            (self.field_of_invention, &mut disclosure.field_of_invention),
            (self.brief_summary, &mut disclosure.brief_summary),
            (self.key_components, &mut disclosure.key_components),
            (self.problem_solved, &mut disclosure.problem_solved),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }

        for (section, value) in [
            (DraftSection::Background, self.background),
            (DraftSection::Summary, self.summary),
            (DraftSection::DetailedDescription, self.detailed_description),
            (DraftSection::Claims, self.claims),
            (DraftSection::Abstract, self.r#abstract),
        ] {
            if let Some(value) = value {
                draft.sections.set(section, value);
            }
        }

        if let Some(step) = self.current_step {
            draft.current_step = step;
        }
    }
}

/// Identifiers handed back when a draft is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartedDraft {
    pub draft_id: DraftId,
    pub project_id: ProjectId,
}

/// Project listing entry with the number of drafts it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOverview {
    #[serde(flatten)]
    pub project: Project,
    pub draft_count: usize,
}

/// Section text produced by generation or rephrasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionContent {
    pub section: DraftSection,
    pub content: String,
}
