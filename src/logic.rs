//! Core operations behind the HTTP handlers.
//!
//! Each generation operation follows the same path: build the prompt, call the
//! model, parse and map the reply. Errors are returned untouched so the caller
//! can tell provider, parse and mapping failures apart.

use tracing::{info, instrument};

use crate::domain::{AnswerCheck, ChatTurn, ConversationTurn, Language, Lesson, Level, Quiz, Topic, Translation};
use crate::error::{GenerationError, ProgressError};
use crate::progress::{ProgressKey, ProgressView, Score};
use crate::prompts;
use crate::state::AppState;

#[instrument(level = "info", skip(state), fields(%language, %level, %topic))]
pub async fn generate_lesson(state: &AppState, language: Language, level: Level, topic: Topic) -> Result<Lesson, GenerationError> {
  let prompt = prompts::lesson_prompt(&state.prompts, language, level, topic);
  let lesson: Lesson = state.generation()?.generate_json(&prompt).await?;
  info!(target: "generation", words = lesson.vocabulary.len(), "Lesson generated");
  Ok(lesson)
}

#[instrument(level = "info", skip(state, text), fields(text_len = text.len(), %from_language, %to_language))]
pub async fn translate(state: &AppState, text: &str, from_language: &str, to_language: Language) -> Result<Translation, GenerationError> {
  let prompt = prompts::translation_prompt(&state.prompts, text, from_language, to_language);
  state.generation()?.generate_json(&prompt).await
}

#[instrument(level = "info", skip(state), fields(%language, %level, %topic))]
pub async fn generate_quiz(
  state: &AppState,
  language: Language,
  level: Level,
  topic: Topic,
  num_questions: u32,
) -> Result<Quiz, GenerationError> {
  let prompt = prompts::quiz_prompt(&state.prompts, language, level, topic, num_questions);
  let quiz: Quiz = state.generation()?.generate_json(&prompt).await?;
  info!(target: "generation", requested = num_questions, received = quiz.questions.len(), "Quiz generated");
  Ok(quiz)
}

#[instrument(level = "info", skip(state, question, user_answer, correct_answer), fields(%language))]
pub async fn check_answer(
  state: &AppState,
  language: Language,
  question: &str,
  user_answer: &str,
  correct_answer: &str,
) -> Result<AnswerCheck, GenerationError> {
  let prompt = prompts::check_answer_prompt(&state.prompts, language, question, user_answer, correct_answer);
  let check: AnswerCheck = state.generation()?.generate_json(&prompt).await?;
  info!(target: "generation", is_correct = check.is_correct, "Answer checked");
  Ok(check)
}

#[instrument(level = "info", skip(state, history, user_message), fields(%language, %level, %topic, history_len = history.len()))]
pub async fn chat(
  state: &AppState,
  language: Language,
  level: Level,
  topic: Topic,
  history: &[ChatTurn],
  user_message: &str,
) -> Result<ConversationTurn, GenerationError> {
  let prompt = prompts::conversation_prompt(&state.prompts, language, level, topic, history, user_message);
  state.generation()?.generate_json(&prompt).await
}

/// Validate the score, then record it.
pub async fn update_progress(
  state: &AppState,
  user_id: String,
  language: Language,
  topic: Topic,
  score: i64,
  level: Level,
) -> Result<ProgressView, ProgressError> {
  let score = Score::new(score)?;
  Ok(state.progress.update(ProgressKey { user_id, language }, topic, score, level).await)
}

pub async fn get_progress(state: &AppState, user_id: String, language: Language) -> ProgressView {
  state.progress.get(&ProgressKey { user_id, language }).await
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::config::Prompts;
  use crate::generation::{testing::ScriptedProvider, GenerationClient};
  use crate::progress::InMemoryProgressStore;

  fn state_with(provider: Arc<ScriptedProvider>) -> AppState {
    AppState::with_parts(
      Some(GenerationClient::new(provider)),
      Prompts::default(),
      Arc::new(InMemoryProgressStore::new()),
    )
  }

  fn offline_state() -> AppState {
    AppState::with_parts(None, Prompts::default(), Arc::new(InMemoryProgressStore::new()))
  }

  #[tokio::test]
  async fn lesson_flows_from_prompt_to_typed_result() {
    let provider = Arc::new(ScriptedProvider::new().reply(
      r#"```json
{
  "language": "Igbo", "level": "beginner", "topic": "greetings",
  "introduction": "Greetings matter.",
  "vocabulary": [{"word": "Ndewo", "translation": "Hello", "pronunciation": "(n-DEH-wo)",
                  "example_sentence": "Ndewo, nne!", "sentence_translation": "Hello, mother!"}],
  "cultural_note": "Elders are greeted first.",
  "tip": "Say it with a smile."
}
```"#,
    ));
    let state = state_with(provider.clone());
    let lesson = generate_lesson(&state, Language::Igbo, Level::Beginner, Topic::Greetings).await.unwrap();
    assert_eq!(lesson.vocabulary[0].word, "Ndewo");
    assert_eq!(lesson.cultural_note, "Elders are greeted first.");
    let prompts = provider.seen_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"greetings\" in Igbo"));
  }

  #[tokio::test]
  async fn translation_flattens_object_breakdown() {
    let provider = Arc::new(ScriptedProvider::new().reply(
      r#"{"original": "hello world", "translation": "ẹ n lẹ ayé", "pronunciation": "(eh-n-leh ah-YEH)",
          "breakdown": {"word1": "hello", "word2": "world"}}"#,
    ));
    let state = state_with(provider);
    let t = translate(&state, "hello world", "English", Language::Yoruba).await.unwrap();
    assert_eq!(t.breakdown.as_deref(), Some("word1: hello | word2: world"));
  }

  #[tokio::test]
  async fn chat_sends_windowed_history() {
    let provider = Arc::new(ScriptedProvider::new().reply(
      r#"{"reply": "Lafiya lau", "translation": "Very well", "corrections": null, "vocabulary_used": ["lafiya"]}"#,
    ));
    let state = state_with(provider.clone());
    let history: Vec<ChatTurn> = (0..10)
      .map(|i| ChatTurn { role: "user".into(), content: format!("turn-{i}") })
      .collect();
    let turn = chat(&state, Language::Hausa, Level::Beginner, Topic::Greetings, &history, "Ina kwana?").await.unwrap();
    assert_eq!(turn.vocabulary_used, vec!["lafiya".to_string()]);
    assert_eq!(turn.corrections, None);
    let prompt = &provider.seen_prompts()[0];
    assert!(!prompt.contains("turn-3"));
    assert!(prompt.contains("User: turn-4"));
    assert!(prompt.contains("User: turn-9"));
  }

  #[tokio::test]
  async fn quiz_parse_failure_surfaces_as_parse_error() {
    let state = state_with(Arc::new(ScriptedProvider::new().reply("Here is your quiz: 1) ...")));
    let err = generate_quiz(&state, Language::Igbo, Level::Beginner, Topic::Numbers, 5).await.unwrap_err();
    assert_eq!(err.kind(), "parse");
  }

  #[tokio::test]
  async fn missing_provider_is_a_provider_error() {
    let err = check_answer(&offline_state(), Language::Igbo, "q", "a", "b").await.unwrap_err();
    assert_eq!(err.kind(), "provider");
  }

  #[tokio::test]
  async fn out_of_range_score_is_rejected_and_not_stored() {
    let state = offline_state();
    let err = update_progress(&state, "ada".into(), Language::Igbo, Topic::Food, 150, Level::Beginner).await.unwrap_err();
    assert_eq!(err, ProgressError::ScoreOutOfRange(150));
    let view = get_progress(&state, "ada".into(), Language::Igbo).await;
    assert!(view.completed_topics.is_empty());
  }
}
