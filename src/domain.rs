//! Domain models: supported languages, levels, lesson topics, the learning path,
//! and the typed shapes parsed out of model replies.

use serde::{Deserialize, Serialize};

use crate::mapper::deserialize_plain_string;

/// Target language taught by the backend.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
  #[serde(alias = "igbo")]
  Igbo,
  #[serde(alias = "yoruba")]
  Yoruba,
  #[serde(alias = "hausa")]
  Hausa,
}

impl Language {
  pub const ALL: [Language; 3] = [Language::Igbo, Language::Yoruba, Language::Hausa];

  pub fn as_str(self) -> &'static str {
    match self {
      Language::Igbo => "Igbo",
      Language::Yoruba => "Yoruba",
      Language::Hausa => "Hausa",
    }
  }

  /// Static descriptor shown by the languages listing.
  pub fn info(self) -> LanguageInfo {
    match self {
      Language::Igbo => LanguageInfo { code: "igbo", name: "Igbo", region: "Southeast Nigeria", speakers: "~45 million" },
      Language::Yoruba => LanguageInfo { code: "yoruba", name: "Yoruba", region: "Southwest Nigeria", speakers: "~50 million" },
      Language::Hausa => LanguageInfo { code: "hausa", name: "Hausa", region: "North Nigeria", speakers: "~80 million" },
    }
  }
}

impl std::fmt::Display for Language {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct LanguageInfo {
  pub code: &'static str,
  pub name: &'static str,
  pub region: &'static str,
  pub speakers: &'static str,
}

/// Learner proficiency. Drives vocabulary complexity in prompts.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Level {
  #[default]
  Beginner,
  Intermediate,
  Advanced,
}

impl Level {
  pub fn as_str(self) -> &'static str {
    match self {
      Level::Beginner => "beginner",
      Level::Intermediate => "intermediate",
      Level::Advanced => "advanced",
    }
  }
}

impl std::fmt::Display for Level {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Lesson topics. Declaration order is the order used by the topics listing;
/// recommendation order lives in [`LEARNING_PATH`].
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
  #[default]
  #[serde(rename = "greetings")]
  Greetings,
  #[serde(rename = "numbers")]
  Numbers,
  #[serde(rename = "colors")]
  Colors,
  #[serde(rename = "family")]
  Family,
  #[serde(rename = "food")]
  Food,
  #[serde(rename = "animals")]
  Animals,
  #[serde(rename = "body parts")]
  BodyParts,
  #[serde(rename = "days and time")]
  DaysAndTime,
  #[serde(rename = "travel")]
  Travel,
  #[serde(rename = "market and shopping")]
  Market,
  #[serde(rename = "emotions")]
  Emotions,
  #[serde(rename = "common verbs")]
  Verbs,
  #[serde(rename = "forming sentences")]
  Sentences,
  #[serde(rename = "proverbs and culture")]
  Proverbs,
}

impl Topic {
  pub const ALL: [Topic; 14] = [
    Topic::Greetings, Topic::Numbers, Topic::Colors, Topic::Family, Topic::Food,
    Topic::Animals, Topic::BodyParts, Topic::DaysAndTime, Topic::Travel, Topic::Market,
    Topic::Emotions, Topic::Verbs, Topic::Sentences, Topic::Proverbs,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Topic::Greetings => "greetings",
      Topic::Numbers => "numbers",
      Topic::Colors => "colors",
      Topic::Family => "family",
      Topic::Food => "food",
      Topic::Animals => "animals",
      Topic::BodyParts => "body parts",
      Topic::DaysAndTime => "days and time",
      Topic::Travel => "travel",
      Topic::Market => "market and shopping",
      Topic::Emotions => "emotions",
      Topic::Verbs => "common verbs",
      Topic::Sentences => "forming sentences",
      Topic::Proverbs => "proverbs and culture",
    }
  }
}

impl std::fmt::Display for Topic {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Fixed progression from first contact to cultural fluency.
pub const LEARNING_PATH: [Topic; 14] = [
  Topic::Greetings,
  Topic::Numbers,
  Topic::Colors,
  Topic::Family,
  Topic::Food,
  Topic::Animals,
  Topic::BodyParts,
  Topic::DaysAndTime,
  Topic::Emotions,
  Topic::Market,
  Topic::Travel,
  Topic::Verbs,
  Topic::Sentences,
  Topic::Proverbs,
];

// --- Generated content ---

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VocabItem {
  pub word: String,
  pub translation: String,
  pub pronunciation: String,
  pub example_sentence: String,
  pub sentence_translation: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lesson {
  pub introduction: String,
  pub vocabulary: Vec<VocabItem>,
  pub cultural_note: String,
  pub tip: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
  pub question: String,
  pub options: Vec<String>,
  pub correct_answer: String,
  pub explanation: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Quiz {
  pub questions: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnswerCheck {
  pub is_correct: bool,
  pub feedback: String,
  pub encouragement: String,
}

/// One tutor reply in a practice conversation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConversationTurn {
  pub reply: String,
  pub translation: String,
  #[serde(default, deserialize_with = "deserialize_plain_string")]
  pub corrections: Option<String>,
  #[serde(default, deserialize_with = "deserialize_string_list")]
  pub vocabulary_used: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Translation {
  pub original: String,
  pub translation: String,
  pub pronunciation: String,
  #[serde(default, deserialize_with = "deserialize_plain_string")]
  pub breakdown: Option<String>,
}

/// A prior message in a conversation, as sent by the client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
  pub role: String,
  pub content: String,
}

// The model writes `null` for "nothing to list"; treat it as empty.
fn deserialize_string_list<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
  D: serde::Deserializer<'de>,
{
  Ok(Option::<Vec<String>>::deserialize(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn topics_round_trip_through_their_display_names() {
    for t in Topic::ALL {
      let json = serde_json::to_string(&t).unwrap();
      assert_eq!(json, format!("\"{}\"", t.as_str()));
      let back: Topic = serde_json::from_str(&json).unwrap();
      assert_eq!(back, t);
    }
  }

  #[test]
  fn learning_path_covers_every_topic_once() {
    let mut path = LEARNING_PATH.to_vec();
    path.sort();
    let mut all = Topic::ALL.to_vec();
    all.sort();
    assert_eq!(path, all);
    assert_eq!(LEARNING_PATH[0], Topic::Greetings);
    assert_eq!(LEARNING_PATH[13], Topic::Proverbs);
  }

  #[test]
  fn language_accepts_lowercase_codes() {
    let l: Language = serde_json::from_str("\"yoruba\"").unwrap();
    assert_eq!(l, Language::Yoruba);
    assert_eq!(serde_json::to_string(&l).unwrap(), "\"Yoruba\"");
    assert!(serde_json::from_str::<Language>("\"Swahili\"").is_err());
  }

  #[test]
  fn unknown_topic_is_rejected() {
    assert!(serde_json::from_str::<Topic>("\"body_parts\"").is_err());
  }

  #[test]
  fn conversation_turn_tolerates_null_optionals() {
    let v = serde_json::json!({
      "reply": "Ndewo",
      "translation": "Hello",
      "corrections": null,
      "vocabulary_used": null
    });
    let t: ConversationTurn = serde_json::from_value(v).unwrap();
    assert_eq!(t.corrections, None);
    assert!(t.vocabulary_used.is_empty());
  }
}
