//! Public request/response structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{
  AnswerCheck, ChatTurn, Language, LanguageInfo, Lesson, Level, Quiz, QuizQuestion, Topic, VocabItem,
};

const fn default_num_questions() -> u32 {
  5
}

//
// Lessons
//

#[derive(Debug, Deserialize)]
pub struct LessonIn {
  pub language: Language,
  #[serde(default)]
  pub level: Level,
  #[serde(default)]
  pub topic: Topic,
}

/// Lesson as delivered to clients, echoing the request parameters.
#[derive(Debug, Serialize)]
pub struct LessonOut {
  pub language: Language,
  pub level: Level,
  pub topic: Topic,
  pub introduction: String,
  pub vocabulary: Vec<VocabItem>,
  pub cultural_note: String,
  pub tip: String,
}

impl LessonOut {
  pub fn new(req: &LessonIn, lesson: Lesson) -> Self {
    Self {
      language: req.language,
      level: req.level,
      topic: req.topic,
      introduction: lesson.introduction,
      vocabulary: lesson.vocabulary,
      cultural_note: lesson.cultural_note,
      tip: lesson.tip,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct TranslateIn {
  pub text: String,
  /// "English" or one of the supported languages; free text.
  pub from_language: String,
  pub to_language: Language,
}

#[derive(Serialize)]
pub struct TopicsOut {
  pub topics: Vec<Topic>,
}

#[derive(Serialize)]
pub struct LanguagesOut {
  pub languages: Vec<LanguageInfo>,
}

//
// Quiz
//

#[derive(Debug, Deserialize)]
pub struct QuizIn {
  pub language: Language,
  #[serde(default)]
  pub level: Level,
  #[serde(default)]
  pub topic: Topic,
  #[serde(default = "default_num_questions")]
  pub num_questions: u32,
}

#[derive(Debug, Serialize)]
pub struct QuizOut {
  pub language: Language,
  pub topic: Topic,
  pub questions: Vec<QuizQuestion>,
}

impl QuizOut {
  pub fn new(req: &QuizIn, quiz: Quiz) -> Self {
    Self { language: req.language, topic: req.topic, questions: quiz.questions }
  }
}

#[derive(Debug, Deserialize)]
pub struct CheckAnswerIn {
  pub language: Language,
  pub question: String,
  pub user_answer: String,
  pub correct_answer: String,
}

pub type CheckAnswerOut = AnswerCheck;

//
// Conversation
//

#[derive(Debug, Deserialize)]
pub struct ConversationIn {
  pub language: Language,
  #[serde(default)]
  pub level: Level,
  #[serde(default)]
  pub topic: Topic,
  pub user_message: String,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub conversation_history: Vec<ChatTurn>,
}

fn null_as_empty<'de, D>(d: D) -> Result<Vec<ChatTurn>, D::Error>
where
  D: serde::Deserializer<'de>,
{
  Ok(Option::<Vec<ChatTurn>>::deserialize(d)?.unwrap_or_default())
}

//
// Progress
//

#[derive(Debug, Deserialize)]
pub struct ProgressUpdateIn {
  pub user_id: String,
  pub language: Language,
  pub topic: Topic,
  /// Validated to 0..=100 before it reaches the store.
  pub score: i64,
  pub level: Level,
}

//
// Service info
//

#[derive(Serialize)]
pub struct RootOut {
  pub message: &'static str,
  pub supported_languages: Vec<Language>,
  pub endpoints: &'static [&'static str],
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
  pub llm_configured: bool,
}
