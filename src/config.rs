//! Prompt templates (defaults, optionally overridden from a TOML file).
//!
//! Templates use `{name}` placeholders filled by [`crate::util::fill_template`].
//! Literal JSON braces in the templates are left alone because only the named
//! placeholders are substituted.
//!
//! TOML schema (every key optional):
//! ```toml
//! [prompts]
//! lesson = "..."
//! quiz = "..."
//! check_answer = "..."
//! conversation = "..."
//! translation = "..."
//! ```

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// One template per generation mode.
///
/// Placeholders:
/// - lesson: `{language}`, `{level}`, `{topic}`
/// - quiz: `{language}`, `{level}`, `{topic}`, `{num_questions}`
/// - check_answer: `{language}`, `{question}`, `{user_answer}`, `{correct_answer}`
/// - conversation: `{language}`, `{level}`, `{topic}`, `{history}`, `{user_message}`
/// - translation: `{text}`, `{from_language}`, `{to_language}`
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub lesson: String,
  pub quiz: String,
  pub check_answer: String,
  pub conversation: String,
  pub translation: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      lesson: LESSON_TEMPLATE.into(),
      quiz: QUIZ_TEMPLATE.into(),
      check_answer: CHECK_ANSWER_TEMPLATE.into(),
      conversation: CONVERSATION_TEMPLATE.into(),
      translation: TRANSLATION_TEMPLATE.into(),
    }
  }
}

const LESSON_TEMPLATE: &str = r#"
You are an expert {language} language tutor building a lesson for a Duolingo-style app.

Create a {level}-level lesson on the topic: "{topic}" in {language}.

You must respond ONLY with valid JSON (no markdown, no extra text) in this exact format:
{
  "language": "{language}",
  "level": "{level}",
  "topic": "{topic}",
  "introduction": "A 2-sentence friendly intro to this topic in {language} culture",
  "vocabulary": [
    {
      "word": "the {language} word",
      "translation": "English meaning",
      "pronunciation": "phonetic guide e.g. (ee-BOO)",
      "example_sentence": "A sentence using this word in {language}",
      "sentence_translation": "English translation of that sentence"
    }
  ],
  "cultural_note": "An interesting cultural fact related to this topic",
  "tip": "A memory trick or learning tip for this topic"
}

Include 8 vocabulary items. Make the content culturally accurate and engaging for a Nigerian learner.
Level guide: beginner=basic words/phrases, intermediate=sentences and grammar, advanced=complex expressions and proverbs.
Every value must be a plain string unless the format above shows a list.
"#;

const QUIZ_TEMPLATE: &str = r#"
You are an expert {language} language tutor creating a quiz for a Duolingo-style app.

Create {num_questions} {level}-level multiple choice questions about "{topic}" in {language}.

You must respond ONLY with valid JSON in this exact format:
{
  "language": "{language}",
  "topic": "{topic}",
  "questions": [
    {
      "question": "The quiz question (can include {language} words)",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correct_answer": "The exact text of the correct option",
      "explanation": "Why this is correct, with cultural context"
    }
  ]
}

Each question has exactly 4 options.
Mix question types: translations, fill-in-the-blank, cultural knowledge, and pronunciation matching.
Make distractors (wrong options) realistic, not obviously wrong.
"#;

const CHECK_ANSWER_TEMPLATE: &str = r#"
You are a friendly {language} language tutor checking a student's quiz answer.

Question: {question}
Student's answer: {user_answer}
Correct answer: {correct_answer}

Respond ONLY with valid JSON:
{
  "is_correct": true or false,
  "feedback": "Explain whether they're right or wrong and why, in a kind way. If wrong, explain the correct answer.",
  "encouragement": "A short motivational message in both English and a word/phrase in {language}"
}
"#;

const CONVERSATION_TEMPLATE: &str = r#"
You are a friendly {language} conversation partner helping a {level}-level learner practice "{topic}".

Conversation so far:
{history}
User: {user_message}

Rules:
- Reply in {language} but keep it at {level} level
- If beginner: use simple words, the reply should be short
- Always provide the English translation of your reply
- Gently correct any {language} mistakes the user made
- Suggest vocabulary they used well

Respond ONLY with valid JSON:
{
  "reply": "Your response in {language}",
  "translation": "English translation of your reply",
  "corrections": "Any corrections for the user's {language} (null if no mistakes)",
  "vocabulary_used": ["list", "of", "key", "{language}", "words", "used"]
}
"#;

const TRANSLATION_TEMPLATE: &str = r#"
Translate the following from {from_language} to {to_language}.
Text: "{text}"

IMPORTANT: Every value in the JSON must be a plain string, not a nested object or dict.

Respond ONLY with valid JSON:
{
  "original": "{text}",
  "translation": "The full translated text in {to_language}",
  "pronunciation": "Phonetic pronunciation guide e.g. (eh-kah-ah-roh WAH-leh)",
  "breakdown": "A single plain string explaining word by word. Example: word1 (meaning) + word2 (meaning) = full phrase meaning"
}
"#;

/// Attempt to load `AppConfig` from PROMPTS_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("PROMPTS_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "langgpt_backend", %path, "Loaded prompt config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "langgpt_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "langgpt_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_keeps_remaining_defaults() {
    let cfg: AppConfig = toml::from_str(
      r#"
        [prompts]
        quiz = "Make {num_questions} questions about {topic}."
      "#,
    )
    .unwrap();
    assert_eq!(cfg.prompts.quiz, "Make {num_questions} questions about {topic}.");
    assert_eq!(cfg.prompts.lesson, LESSON_TEMPLATE);
    assert_eq!(cfg.prompts.translation, TRANSLATION_TEMPLATE);
  }

  #[test]
  fn empty_toml_is_all_defaults() {
    let cfg: AppConfig = toml::from_str("").unwrap();
    assert_eq!(cfg.prompts.conversation, CONVERSATION_TEMPLATE);
  }
}
