use std::io::ErrorKind;

use dialoguer::{Error as DialoguerError, Input};

use crate::domain::AppError;
use crate::ports::{Prompter, Question};

/// Terminal prompter backed by `dialoguer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn ask(&self, question: &Question) -> Result<String, AppError> {
        if let Some(help) = &question.help {
            eprintln!("{help}");
        }
        let mut input = Input::<String>::new().with_prompt(&question.prompt);
        if let Some(default) = &question.default {
            input = input.default(default.clone());
        }
        let answer = input
            .validate_with(|answer: &String| -> Result<(), String> {
                if question.accepts(answer.trim()) {
                    Ok(())
                } else {
                    Err(format!("Expected {}", question.expected))
                }
            })
            .interact_text();
        match answer {
            Ok(value) => Ok(value.trim().to_string()),
            Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => {
                Err(AppError::Prompt(format!("Aborted while asking for {}", question.field)))
            }
            Err(err) => {
                Err(AppError::Prompt(format!("Failed to read {}: {}", question.field, err)))
            }
        }
    }
}
