//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::domain::{Language, Topic};
use crate::error::ApiError;
use crate::logic;
use crate::protocol::*;
use crate::state::AppState;

const ENDPOINTS: &[&str] = &[
  "POST /lessons",
  "POST /lessons/translate",
  "GET /lessons/topics",
  "GET /lessons/languages",
  "POST /quiz",
  "POST /quiz/check",
  "POST /conversation",
  "POST /progress/update",
  "GET /progress/:user_id/:language",
];

#[instrument(level = "info")]
pub async fn http_root() -> impl IntoResponse {
  Json(RootOut {
    message: "LangGpt API is running!",
    supported_languages: Language::ALL.to_vec(),
    endpoints: ENDPOINTS,
  })
}

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, llm_configured: state.llm.is_some() })
}

#[instrument(level = "info", skip(state, body), fields(language = %body.language, level = %body.level, topic = %body.topic))]
pub async fn http_post_lesson(
  State(state): State<Arc<AppState>>,
  Json(body): Json<LessonIn>,
) -> Result<Json<LessonOut>, ApiError> {
  let lesson = logic::generate_lesson(&state, body.language, body.level, body.topic)
    .await
    .map_err(ApiError::generation("Lesson generation"))?;
  info!(target: "langgpt_backend", words = lesson.vocabulary.len(), "HTTP lesson served");
  Ok(Json(LessonOut::new(&body, lesson)))
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len(), from = %body.from_language, to = %body.to_language))]
pub async fn http_post_translate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<TranslateIn>,
) -> Result<impl IntoResponse, ApiError> {
  let translation = logic::translate(&state, &body.text, &body.from_language, body.to_language)
    .await
    .map_err(ApiError::generation("Translation"))?;
  Ok(Json(translation))
}

#[instrument(level = "info")]
pub async fn http_get_topics() -> impl IntoResponse {
  Json(TopicsOut { topics: Topic::ALL.to_vec() })
}

#[instrument(level = "info")]
pub async fn http_get_languages() -> impl IntoResponse {
  Json(LanguagesOut { languages: Language::ALL.iter().map(|l| l.info()).collect() })
}

#[instrument(level = "info", skip(state, body), fields(language = %body.language, topic = %body.topic, num_questions = body.num_questions))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<QuizIn>,
) -> Result<Json<QuizOut>, ApiError> {
  let quiz = logic::generate_quiz(&state, body.language, body.level, body.topic, body.num_questions)
    .await
    .map_err(ApiError::generation("Quiz generation"))?;
  Ok(Json(QuizOut::new(&body, quiz)))
}

#[instrument(level = "info", skip(state, body), fields(language = %body.language, answer_len = body.user_answer.len()))]
pub async fn http_post_check_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<CheckAnswerIn>,
) -> Result<Json<CheckAnswerOut>, ApiError> {
  let check = logic::check_answer(&state, body.language, &body.question, &body.user_answer, &body.correct_answer)
    .await
    .map_err(ApiError::generation("Answer checking"))?;
  Ok(Json(check))
}

#[instrument(level = "info", skip(state, body), fields(language = %body.language, history_len = body.conversation_history.len()))]
pub async fn http_post_conversation(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ConversationIn>,
) -> Result<impl IntoResponse, ApiError> {
  let turn = logic::chat(
    &state,
    body.language,
    body.level,
    body.topic,
    &body.conversation_history,
    &body.user_message,
  )
  .await
  .map_err(ApiError::generation("Conversation"))?;
  Ok(Json(turn))
}

#[instrument(level = "info", skip(state, body), fields(user_id = %body.user_id, language = %body.language, topic = %body.topic, score = body.score))]
pub async fn http_post_progress_update(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ProgressUpdateIn>,
) -> Result<impl IntoResponse, ApiError> {
  let view = logic::update_progress(&state, body.user_id, body.language, body.topic, body.score, body.level).await?;
  Ok(Json(view))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_progress(
  State(state): State<Arc<AppState>>,
  Path((user_id, language)): Path<(String, Language)>,
) -> impl IntoResponse {
  Json(logic::get_progress(&state, user_id, language).await)
}
