// src/models/quiz.rs

use std::collections::HashMap;

use axum::extract::Multipart;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::{chain::Address, error::AppError};

/// The quiz metadata document published to content-addressed storage.
///
/// The correct answers are not stored in the clear: `encrypted_answers`
/// holds the ciphertext of a JSON object mapping question-index strings to
/// correct-option-index strings (e.g. `{"0":"1","2":"0"}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizMetadata {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub questions_per_user: Option<u32>,

    pub questions: Vec<QuizQuestion>,

    pub encrypted_answers: String,
}

/// One published question: the prompt and its option texts. The correct
/// option index lives only in the encrypted answer key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,

    #[serde(default)]
    pub options: Vec<String>,
}

/// Drains a multipart body into a name -> text map.
pub async fn multipart_fields(
    multipart: &mut Multipart,
) -> Result<HashMap<String, String>, AppError> {
    let mut fields = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed multipart body: {}", e)))?;
        fields.insert(name, value);
    }
    Ok(fields)
}

/// Raw form fields of an answer-set encryption request.
#[derive(Debug, Validate)]
pub struct EncryptAnswersForm {
    #[validate(required, length(min = 1))]
    pub answers: Option<String>,
}

impl EncryptAnswersForm {
    pub fn from_fields(mut fields: HashMap<String, String>) -> Self {
        Self {
            answers: fields.remove("answers"),
        }
    }

    pub fn into_plaintext(self) -> Result<String, AppError> {
        if self.validate().is_err() {
            return Err(AppError::Validation("Missing answers field".to_string()));
        }
        let Some(answers) = self.answers else {
            return Err(AppError::Validation("Missing answers field".to_string()));
        };
        Ok(answers)
    }
}

/// Raw form fields of a quiz submission, prior to parsing.
#[derive(Debug, Validate)]
pub struct SubmitQuizForm {
    #[validate(required, length(min = 1))]
    pub chain_id: Option<String>,

    #[validate(required, length(min = 1))]
    pub user_address: Option<String>,

    #[validate(required, length(min = 1))]
    pub quiz_id: Option<String>,

    #[validate(required, length(min = 1))]
    pub user_answers: Option<String>,
}

/// A fully parsed and validated submission, ready for the scoring pipeline.
#[derive(Debug, Clone)]
pub struct SubmitQuizCommand {
    pub chain_id: u64,
    pub user_address: Address,
    pub quiz_id: u64,
    pub user_answers: HashMap<String, Value>,
}

impl SubmitQuizForm {
    pub fn from_fields(mut fields: HashMap<String, String>) -> Self {
        Self {
            chain_id: fields.remove("chainId"),
            user_address: fields.remove("userAddress"),
            quiz_id: fields.remove("quizId"),
            user_answers: fields.remove("userAnswers"),
        }
    }

    pub fn into_command(self) -> Result<SubmitQuizCommand, AppError> {
        if self.validate().is_err() {
            return Err(AppError::Validation("Missing required fields".to_string()));
        }
        let (Some(chain_id), Some(user_address), Some(quiz_id), Some(user_answers)) =
            (self.chain_id, self.user_address, self.quiz_id, self.user_answers)
        else {
            return Err(AppError::Validation("Missing required fields".to_string()));
        };

        let chain_id = chain_id
            .trim()
            .parse::<u64>()
            .map_err(|_| AppError::Validation("Invalid chainId".to_string()))?;

        let user_address: Address = user_address.trim().parse()?;

        let quiz_id = quiz_id
            .trim()
            .parse::<u64>()
            .map_err(|_| AppError::Validation("Invalid quizId".to_string()))?;

        let user_answers: HashMap<String, Value> = serde_json::from_str(&user_answers)
            .map_err(|_| AppError::Validation("Invalid userAnswers JSON".to_string()))?;

        Ok(SubmitQuizCommand {
            chain_id,
            user_address,
            quiz_id,
            user_answers,
        })
    }
}

/// Raw form fields of a metadata upload request.
#[derive(Debug, Validate)]
pub struct UploadMetadataForm {
    #[validate(required, length(min = 1))]
    pub metadata: Option<String>,

    #[validate(length(max = 100))]
    pub name: Option<String>,
}

impl UploadMetadataForm {
    pub fn from_fields(mut fields: HashMap<String, String>) -> Self {
        Self {
            metadata: fields.remove("metadata"),
            name: fields.remove("name"),
        }
    }

    pub fn into_parts(self) -> Result<(Value, String), AppError> {
        if self.validate().is_err() {
            return Err(AppError::Validation("Missing metadata field".to_string()));
        }
        let Some(metadata) = self.metadata else {
            return Err(AppError::Validation("Missing metadata field".to_string()));
        };
        let content: Value = serde_json::from_str(&metadata)
            .map_err(|_| AppError::Validation("Metadata must be valid JSON".to_string()))?;
        let name = self
            .name
            .unwrap_or_else(|| "quiz-metadata".to_string());
        Ok((content, name))
    }
}
