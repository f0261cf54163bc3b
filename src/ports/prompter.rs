use crate::domain::AppError;

/// A value the resolver needs from the operator.
#[derive(Debug, Clone)]
pub struct Question {
    /// Field being resolved, e.g. `requestMemory`.
    pub field: String,
    pub prompt: String,
    pub help: Option<String>,
    pub default: Option<String>,
    pub validator: fn(&str) -> bool,
    /// Description of the accepted format, shown when validation fails.
    pub expected: &'static str,
}

impl Question {
    pub fn new(
        field: impl Into<String>,
        prompt: impl Into<String>,
        validator: fn(&str) -> bool,
        expected: &'static str,
    ) -> Self {
        Self {
            field: field.into(),
            prompt: prompt.into(),
            help: None,
            default: None,
            validator,
            expected,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn accepts(&self, answer: &str) -> bool {
        (self.validator)(answer)
    }
}

/// Port for resolving missing fields.
pub trait Prompter {
    /// Ask `question`; the returned answer satisfies its validator.
    fn ask(&self, question: &Question) -> Result<String, AppError>;
}
