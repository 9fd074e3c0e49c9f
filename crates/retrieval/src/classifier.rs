/// Intent category of a user question, used to pick a response-style
/// instruction for the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Asks to compare two or more things
    Comparison,
    /// Asks to enumerate or choose between options
    Selection,
    /// Asks for an explanation or definition
    Definition,
    /// Everything else
    General,
}

const COMPARISON_KEYWORDS: &[&str] =
    &["difference", "comparison", "vs", "better than", "better suited"];

const SELECTION_KEYWORDS: &[&str] = &[
    "which",
    "what kind of",
    "options",
    "choice",
    "specializations",
    "are there",
];

const DEFINITION_KEYWORDS: &[&str] = &["what is", "explain", "definition", "means"];

impl QuestionKind {
    /// Classify a question by case-insensitive keyword matching.
    ///
    /// Categories are tried in a fixed precedence order (comparison,
    /// selection, definition); the first matching set wins. A pure function
    /// of the question text.
    #[must_use]
    pub fn classify(question: &str) -> Self {
        let lowered = question.to_lowercase();
        let matches = |keywords: &[&str]| keywords.iter().any(|kw| lowered.contains(kw));

        if matches(COMPARISON_KEYWORDS) {
            Self::Comparison
        } else if matches(SELECTION_KEYWORDS) {
            Self::Selection
        } else if matches(DEFINITION_KEYWORDS) {
            Self::Definition
        } else {
            Self::General
        }
    }

    /// Response-style instruction for this kind of question
    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Comparison => {
                "If the question asks for a comparison, present commonalities and differences in a structured form."
            }
            Self::Selection => {
                "If several options are possible, list them clearly and describe each in brief bullet points."
            }
            Self::Definition => {
                "If the question asks for an explanation or a definition, explain precisely and factually."
            }
            Self::General => "Answer the question clearly, completely, and as factually as possible.",
        }
    }

    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comparison => "comparison",
            Self::Selection => "selection",
            Self::Definition => "definition",
            Self::General => "general",
        }
    }
}
