use crate::domain::AppError;
use crate::ports::{Prompter, Question};

/// Prompter for unattended runs: every question is an unresolved field.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
    fn ask(&self, question: &Question) -> Result<String, AppError> {
        Err(AppError::unresolved(question.field.clone()))
    }
}
