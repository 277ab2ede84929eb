//! Prompt builders, one per generation mode.
//!
//! Each builder is a pure function of its inputs and the configured templates.
//! User-supplied values are substituted last in a single pass (see
//! [`fill_template`]) so they can never inject placeholders.

use crate::config::Prompts;
use crate::domain::{ChatTurn, Language, Level, Topic};
use crate::util::{capitalize, fill_template};

/// How many trailing history turns are inlined into a conversation prompt.
pub const HISTORY_WINDOW: usize = 6;

pub fn lesson_prompt(prompts: &Prompts, language: Language, level: Level, topic: Topic) -> String {
  fill_template(
    &prompts.lesson,
    &[("language", language.as_str()), ("level", level.as_str()), ("topic", topic.as_str())],
  )
}

pub fn quiz_prompt(prompts: &Prompts, language: Language, level: Level, topic: Topic, num_questions: u32) -> String {
  let n = num_questions.to_string();
  fill_template(
    &prompts.quiz,
    &[
      ("language", language.as_str()),
      ("level", level.as_str()),
      ("topic", topic.as_str()),
      ("num_questions", &n),
    ],
  )
}

pub fn check_answer_prompt(
  prompts: &Prompts,
  language: Language,
  question: &str,
  user_answer: &str,
  correct_answer: &str,
) -> String {
  fill_template(
    &prompts.check_answer,
    &[
      ("language", language.as_str()),
      ("question", question),
      ("user_answer", user_answer),
      ("correct_answer", correct_answer),
    ],
  )
}

pub fn conversation_prompt(
  prompts: &Prompts,
  language: Language,
  level: Level,
  topic: Topic,
  history: &[ChatTurn],
  user_message: &str,
) -> String {
  let history_text = render_history(history);
  fill_template(
    &prompts.conversation,
    &[
      ("language", language.as_str()),
      ("level", level.as_str()),
      ("topic", topic.as_str()),
      ("history", &history_text),
      ("user_message", user_message),
    ],
  )
}

pub fn translation_prompt(prompts: &Prompts, text: &str, from_language: &str, to_language: Language) -> String {
  fill_template(
    &prompts.translation,
    &[("from_language", from_language), ("to_language", to_language.as_str()), ("text", text)],
  )
}

/// Last [`HISTORY_WINDOW`] turns, one `"<Role>: <content>"` line each.
fn render_history(history: &[ChatTurn]) -> String {
  let start = history.len().saturating_sub(HISTORY_WINDOW);
  history[start..]
    .iter()
    .map(|t| format!("{}: {}\n", capitalize(&t.role), t.content))
    .collect()
}
