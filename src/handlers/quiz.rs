// src/handlers/quiz.rs

use std::collections::HashMap;

use axum::{Json, extract::{Multipart, State}, response::IntoResponse};
use serde_json::{Value, json};

use crate::{
    error::AppError,
    models::quiz::{
        EncryptAnswersForm, QuizQuestion, SubmitQuizForm, multipart_fields,
    },
    state::AppState,
    utils::crypto,
};

/// Encrypts a plaintext answer set under the server secret.
///
/// Used by quiz creators before publishing a metadata document: the returned
/// ciphertext is embedded in the document as `encryptedAnswers`, so the
/// correct answers never appear in the clear on content-addressed storage.
pub async fn encrypt_answers(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let secret = state
        .config
        .quiz_secret_key
        .as_deref()
        .ok_or_else(|| AppError::Configuration("Encryption secret key not set".to_string()))?;

    let fields = multipart_fields(&mut multipart).await?;
    let answers = EncryptAnswersForm::from_fields(fields).into_plaintext()?;

    let encrypted = crypto::encrypt(&answers, secret)?;

    Ok(Json(json!({ "encryptedAnswers": encrypted })))
}

/// Scores a user's quiz submission and records it on-chain.
///
/// * Validates the form fields and resolves the target network.
/// * Reads the quiz tuple from the registry contract; inactive quizzes are
///   rejected before any metadata fetch.
/// * Fetches the published metadata document and decrypts its answer key.
/// * Scores the submission and relays the result through the relayer
///   account via `setHasTried`. A score of 0 is still recorded.
pub async fn submit_quiz(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let fields = multipart_fields(&mut multipart).await?;
    let cmd = SubmitQuizForm::from_fields(fields).into_command()?;

    let chain = state
        .config
        .chains
        .get(&cmd.chain_id)
        .ok_or_else(|| AppError::UnsupportedChain("Unsupported chainId".to_string()))?;

    let quiz = state.registry.quiz(chain, cmd.quiz_id).await?;
    if !quiz.exists {
        return Err(AppError::QuizNotFound(
            "Quiz not found or not active".to_string(),
        ));
    }

    let metadata = state.metadata.fetch(&quiz.metadata_uri).await?;

    let secret = state
        .config
        .quiz_secret_key
        .as_deref()
        .ok_or_else(|| AppError::Configuration("Encryption secret key not set".to_string()))?;
    let answer_key = decrypt_answer_key(&metadata.encrypted_answers, secret)?;

    let score = score_submission(&metadata.questions, &answer_key, &cmd.user_answers);

    let tx_hash = state
        .registry
        .record_attempt(chain, cmd.user_address, score, cmd.quiz_id)
        .await?;

    tracing::info!(
        "Quiz {} on chain {}: user {} scored {} ({})",
        cmd.quiz_id,
        cmd.chain_id,
        cmd.user_address,
        score,
        tx_hash
    );

    Ok(Json(json!({
        "success": true,
        "score": score,
        "txHash": tx_hash,
    })))
}

/// Decrypts the metadata document's embedded answer key into its
/// question-index -> correct-option map.
pub fn decrypt_answer_key(
    encrypted: &str,
    secret: &str,
) -> Result<HashMap<String, Value>, AppError> {
    let plaintext = crypto::decrypt(encrypted, secret)?;
    serde_json::from_str(&plaintext)
        .map_err(|_| AppError::Decryption("Decrypted answer key is not valid JSON".to_string()))
}

/// Counts correct answers among the questions the user answered.
///
/// Walks the answered subset in published order and maps each question back
/// to its index in the full list by prompt text, then compares the answer
/// key entry against the user's choice, both coerced to strings.
pub fn score_submission(
    questions: &[QuizQuestion],
    answer_key: &HashMap<String, Value>,
    user_answers: &HashMap<String, Value>,
) -> u64 {
    let answered: Vec<&QuizQuestion> = questions
        .iter()
        .enumerate()
        .filter(|(index, _)| user_answers.contains_key(&index.to_string()))
        .map(|(_, question)| question)
        .collect();

    let mut score = 0;
    for question in answered {
        // TODO: match on a stable question id; duplicate prompts all resolve
        // to the first occurrence here.
        let Some(index) = questions
            .iter()
            .position(|q| q.question == question.question)
        else {
            continue;
        };

        let key = index.to_string();
        let (Some(correct), Some(chosen)) = (answer_key.get(&key), user_answers.get(&key)) else {
            continue;
        };

        if as_answer_string(correct) == as_answer_string(chosen) {
            score += 1;
        }
    }
    score
}

/// String coercion matching how the frontend serializes option indices:
/// numbers and strings compare by their textual form.
fn as_answer_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
