
use super::domain::{Draft, DraftSection};

const SYSTEM_PROMPT: &str = "You are an expert patent attorney and technical writer specialising in Indian patent law. \
Help inventors draft complete specifications that meet the requirements of the Indian Patent Office. \
Write clear technical language in the third person and present tense, follow Indian patent practice, \
use standard patent terminology and avoid marketing language or subjective claims.";

const PLAIN_TEXT: &str = "Format the response as clean text without markdown formatting.";

/// Prompt pair handed to a [`SectionGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPrompt {
    pub system: String,
    pub user: String,
}

impl SectionPrompt {
    /// Compose the prompt for drafting `section` from the disclosure and
    /// the sections written before it.
    pub fn for_section(draft: &Draft, section: DraftSection) -> Self {
        let disclosure = &draft.disclosure;
        let mut user = format!(
            "Based on the following invention details, {}\n\n",
            section_request(section)
        );

        for (label, value) in [
            ("Title", &disclosure.title),
            ("Field of Invention", &disclosure.field_of_invention),
            ("Brief Summary", &disclosure.brief_summary),
            ("Key Components", &disclosure.key_components),
            ("Problem Solved", &disclosure.problem_solved),
        ] {
            user.push_str(&format!("{label}: {value}\n"));
        }
        for earlier in section.preceding() {
            user.push_str(&format!(
                "{}: {}\n",
                section_label(*earlier),
                draft.section(*earlier)
            ));
        }

        user.push('\n');
        user.push_str(section_instructions(section));
        user.push_str("\n\n");
        user.push_str(if section == DraftSection::Claims {
            "Format each claim on a new line starting with \"Claim 1:\", \"Claim 2:\", and so on."
        } else {
            PLAIN_TEXT
        });

        Self {
            system: SYSTEM_PROMPT.to_string(),
            user,
        }
    }

    pub fn for_rephrase(section: DraftSection, current: &str, instruction: &str) -> Self {
        let user = format!(
            "Rephrase the following {} section with the instruction: {instruction}\n\n\
             Original content:\n{current}\n\n\
             Keep every technical detail, patent-appropriate language and a professional tone.\n\n\
             {PLAIN_TEXT}",
            section_label(section).to_lowercase(),
        );
        Self {
            system: SYSTEM_PROMPT.to_string(),
            user,
        }
    }
}

fn section_label(section: DraftSection) -> &'static str {
    match section {
        DraftSection::Background => "Background",
        DraftSection::Summary => "Summary",
        DraftSection::DetailedDescription => "Detailed Description",
        DraftSection::Claims => "Claims",
        DraftSection::Abstract => "Abstract",
    }
}

fn section_request(section: DraftSection) -> &'static str {
    match section {
        DraftSection::Background => "write a Background of Invention section:",
        DraftSection::Summary => "write a Summary of Invention section:",
        DraftSection::DetailedDescription => "write a Detailed Description section:",
        DraftSection::Claims => "write 5-8 patent claims:",
        DraftSection::Abstract => "write a concise patent abstract (150-250 words):",
    }
}

fn section_instructions(section: DraftSection) -> &'static str {
    match section {
        DraftSection::Background => {
            "Write two or three paragraphs that introduce the technical field, describe the state of \
             the art, identify the limitations of existing solutions and set up the need for the invention."
        }
        DraftSection::Summary => {
            "Write two or three paragraphs giving an overview of the invention, its objectives and \
             advantages, its key technical features and how it solves the stated problem."
        }
        DraftSection::DetailedDescription => {
            "Write four to six paragraphs explaining each component, how the components cooperate, \
             implementation steps, technical parameters, alternative embodiments and working examples."
        }
        DraftSection::Claims => {
            "Start with an independent claim of the broadest scope, follow with dependent claims \
             adding specific features, and include method claims where applicable."
        }
        DraftSection::Abstract => {
            "Summarise the invention in one paragraph naming the technical field, the problem, \
             the technical solution and its main advantages."
        }
    }
}

/// Text generation backend for specification sections.
pub trait SectionGenerator: Send + Sync {
    fn generate(
        &self,
        section: DraftSection,
        prompt: &SectionPrompt,
    ) -> Result<String, GenerationError>;

    fn rephrase(
        &self,
        section: DraftSection,
        current: &str,
        instruction: &str,
    ) -> Result<String, GenerationError>;
}

/// Error raised by a generation backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("section generator unavailable: {0}")]
    Unavailable(String),
    #[error("section generator rejected the request: {0}")]
    Rejected(String),
}

/// Offline generator producing placeholder prose under the section heading.
/// Used when no language-model backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoilerplateGenerator;

impl BoilerplateGenerator {
    fn body(section: DraftSection) -> &'static str {
        match section {
            DraftSection::Background => {
                "The present invention relates to its stated technical field and addresses \
                 limitations of the existing solutions in that field."
            }
            DraftSection::Summary => {
                "The present invention provides an arrangement of components that overcomes the \
                 identified problem with improved performance and reliability."
            }
            DraftSection::DetailedDescription => {
                "The invention is now described with reference to specific embodiments. It is not \
                 limited to those embodiments and variations remain within its scope."
            }
            DraftSection::Claims => {
                "Claim 1: A system comprising the components described herein, configured to \
                 solve the stated problem.\n\
                 Claim 2: The system of claim 1, further comprising monitoring of its operation."
            }
            DraftSection::Abstract => {
                "A system and method addressing limitations in the stated technical field by \
                 integrating the described components into a single arrangement."
            }
        }
    }
}

impl SectionGenerator for BoilerplateGenerator {
    fn generate(
        &self,
        section: DraftSection,
        _prompt: &SectionPrompt,
    ) -> Result<String, GenerationError> {
        Ok(format!("{}\n\n{}", section.heading(), Self::body(section)))
    }

    fn rephrase(
        &self,
        _section: DraftSection,
        current: &str,
        _instruction: &str,
    ) -> Result<String, GenerationError> {
        Ok(current.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}
