//! Prompt Templates
//!
//! Every prompt the service sends is rendered from a named template. The
//! built-in templates target the Solar Panel Technician course; any of them can
//! be replaced at startup by a Markdown file of the same name.
//!
//! Templates use `{placeholder}` markers that are substituted verbatim:
//! `{course_name}`, `{module_title}` and `{question}`.

use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Identifies one of the prompt templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKey {
    Curriculum,
    Lesson,
    TutorText,
    TutorImage,
}

impl PromptKey {
    pub const ALL: [PromptKey; 4] = [
        PromptKey::Curriculum,
        PromptKey::Lesson,
        PromptKey::TutorText,
        PromptKey::TutorImage,
    ];

    /// The name used for override files (`<name>.md`).
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKey::Curriculum => "curriculum",
            PromptKey::Lesson => "lesson",
            PromptKey::TutorText => "tutor_text",
            PromptKey::TutorImage => "tutor_image",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    fn builtin(&self) -> &'static str {
        match self {
            PromptKey::Curriculum => CURRICULUM_TEMPLATE,
            PromptKey::Lesson => LESSON_TEMPLATE,
            PromptKey::TutorText => TUTOR_TEXT_TEMPLATE,
            PromptKey::TutorImage => TUTOR_IMAGE_TEMPLATE,
        }
    }
}

impl fmt::Display for PromptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CURRICULUM_TEMPLATE: &str = "You are an expert curriculum designer for rural Indian youth in a context like Kothri Kalan. Create a 7-module curriculum for a 'Solar Panel Technician' course. The output MUST be a valid JSON array where each object has 'module_id', 'title', and 'description' keys. The language should be simple, practical, and encouraging.";

const LESSON_TEMPLATE: &str = "You are a friendly teacher explaining a topic to a student in rural India. Generate the lesson content for the module titled '{module_title}'. Use an 8th-grade reading level, Markdown for structure, and simple analogies relevant to village life.";

const TUTOR_TEXT_TEMPLATE: &str = "You are a helpful AI tutor. A student is asking: '{question}'. Answer them clearly and simply.";

const TUTOR_IMAGE_TEMPLATE: &str = "You are an expert Solar Technician tutor. A student has sent this image and asked: '{question}'. Analyze the image and provide a helpful, safe, and encouraging answer. Prioritize safety if they are showing something dangerous.";

/// The full set of prompt templates in use by the process.
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    templates: HashMap<PromptKey, String>,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        let templates = PromptKey::ALL
            .into_iter()
            .map(|key| (key, key.builtin().to_string()))
            .collect();
        Self { templates }
    }
}

impl PromptCatalog {
    /// Builds a catalog from the built-ins, replacing any template whose name
    /// appears in `overrides`. Unrecognised names are skipped.
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        let mut catalog = Self::default();
        for (name, template) in overrides {
            match PromptKey::from_name(&name) {
                Some(key) => {
                    catalog.templates.insert(key, template.trim().to_string());
                }
                None => warn!(prompt = %name, "Ignoring unknown prompt template"),
            }
        }
        catalog
    }

    pub fn template(&self, key: PromptKey) -> &str {
        self.templates
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.builtin())
    }

    /// Renders `key`, substituting each `{name}` with its value.
    pub fn render(&self, key: PromptKey, vars: &[(&str, &str)]) -> String {
        vars.iter()
            .fold(self.template(key).to_string(), |prompt, (name, value)| {
                prompt.replace(&format!("{{{name}}}"), value)
            })
    }

    /// The curriculum prompt. The built-in template is fixed to one course and
    /// ignores `course_name`; overrides may reference `{course_name}`.
    pub fn curriculum_prompt(&self, key: PromptKey, course_name: &str) -> String {
        self.render(key, &[("course_name", course_name)])
    }

    pub fn lesson_prompt(&self, key: PromptKey, module_title: &str) -> String {
        self.render(key, &[("module_title", module_title)])
    }

    pub fn tutor_prompt(&self, key: PromptKey, question: &str) -> String {
        self.render(key, &[("question", question)])
    }
}
