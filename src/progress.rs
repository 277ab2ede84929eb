//! Learner progress: completed topics and per-topic scores, keyed by
//! (user, language), plus the next-topic recommendation.
//!
//! Handlers talk to a [`ProgressStore`]. The bundled implementation keeps
//! records in memory for the process lifetime and serializes updates per key,
//! so concurrent submissions for the same learner cannot lose a score.

use std::{
  collections::{BTreeMap, HashMap},
  sync::Arc,
};

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument};

use crate::domain::{Language, Level, Topic, LEARNING_PATH};
use crate::error::ProgressError;
use crate::generation::BoxFuture;

/// A quiz/lesson score, guaranteed to be within 0..=100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
  pub const MAX: u8 = 100;

  pub fn new(raw: i64) -> Result<Self, ProgressError> {
    u8::try_from(raw)
      .ok()
      .filter(|s| *s <= Self::MAX)
      .map(Score)
      .ok_or(ProgressError::ScoreOutOfRange(raw))
  }

  pub fn get(self) -> u8 {
    self.0
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProgressKey {
  pub user_id: String,
  pub language: Language,
}

/// Stored state for one learner in one language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressRecord {
  /// Insertion order, no duplicates.
  pub completed_topics: Vec<Topic>,
  pub scores: BTreeMap<Topic, Score>,
  pub current_level: Level,
}

impl ProgressRecord {
  pub fn total_score(&self) -> u32 {
    self.scores.values().map(|s| u32::from(s.get())).sum()
  }

  /// Record a score; a repeated topic replaces its old score.
  pub fn apply(&mut self, topic: Topic, score: Score, level: Level) {
    if !self.completed_topics.contains(&topic) {
      self.completed_topics.push(topic);
    }
    self.scores.insert(topic, score);
    self.current_level = level;
  }

  fn view(&self, key: &ProgressKey) -> ProgressView {
    ProgressView {
      user_id: key.user_id.clone(),
      language: key.language,
      completed_topics: self.completed_topics.clone(),
      scores: self.scores.clone(),
      current_level: self.current_level,
      total_score: self.total_score(),
      next_recommended_topic: next_recommended_topic(&self.completed_topics),
    }
  }
}

/// What callers see: the record plus derived totals and recommendation.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ProgressView {
  pub user_id: String,
  pub language: Language,
  pub completed_topics: Vec<Topic>,
  pub scores: BTreeMap<Topic, Score>,
  pub current_level: Level,
  pub total_score: u32,
  pub next_recommended_topic: Topic,
}

/// First learning-path topic not yet completed; the last one once all are done.
pub fn next_recommended_topic(completed: &[Topic]) -> Topic {
  LEARNING_PATH
    .iter()
    .copied()
    .find(|t| !completed.contains(t))
    .unwrap_or(LEARNING_PATH[LEARNING_PATH.len() - 1])
}

pub trait ProgressStore: Send + Sync {
  /// Stored view, or a zero-valued one without creating a record.
  fn get<'a>(&'a self, key: &'a ProgressKey) -> BoxFuture<'a, ProgressView>;

  fn update<'a>(&'a self, key: ProgressKey, topic: Topic, score: Score, level: Level) -> BoxFuture<'a, ProgressView>;
}

/// Process-lifetime store. Records are lost on restart.
#[derive(Default)]
pub struct InMemoryProgressStore {
  records: RwLock<HashMap<ProgressKey, Arc<Mutex<ProgressRecord>>>>,
}

impl InMemoryProgressStore {
  pub fn new() -> Self {
    Self::default()
  }

  #[cfg(test)]
  pub async fn len(&self) -> usize {
    self.records.read().await.len()
  }

  async fn slot(&self, key: &ProgressKey) -> Arc<Mutex<ProgressRecord>> {
    let existing = { self.records.read().await.get(key).cloned() };
    if let Some(slot) = existing {
      return slot;
    }
    let mut records = self.records.write().await;
    records.entry(key.clone()).or_default().clone()
  }

  #[instrument(level = "debug", skip_all, fields(user_id = %key.user_id, language = %key.language))]
  async fn read_view(&self, key: &ProgressKey) -> ProgressView {
    let slot = { self.records.read().await.get(key).cloned() };
    match slot {
      Some(slot) => slot.lock().await.view(key),
      None => {
        debug!(target: "progress", "No progress yet; returning empty view");
        ProgressRecord::default().view(key)
      }
    }
  }

  #[instrument(level = "info", skip_all, fields(user_id = %key.user_id, language = %key.language, %topic, score = score.get(), %level))]
  async fn record_score(&self, key: ProgressKey, topic: Topic, score: Score, level: Level) -> ProgressView {
    let slot = self.slot(&key).await;
    let mut record = slot.lock().await;
    record.apply(topic, score, level);
    let view = record.view(&key);
    info!(target: "progress", total = view.total_score, next = %view.next_recommended_topic, "Progress updated");
    view
  }
}

impl ProgressStore for InMemoryProgressStore {
  fn get<'a>(&'a self, key: &'a ProgressKey) -> BoxFuture<'a, ProgressView> {
    Box::pin(self.read_view(key))
  }

  fn update<'a>(&'a self, key: ProgressKey, topic: Topic, score: Score, level: Level) -> BoxFuture<'a, ProgressView> {
    Box::pin(self.record_score(key, topic, score, level))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(user: &str, language: Language) -> ProgressKey {
    ProgressKey { user_id: user.into(), language }
  }

  fn score(n: i64) -> Score {
    Score::new(n).unwrap()
  }

  #[test]
  fn score_range_is_enforced() {
    assert_eq!(Score::new(0).unwrap().get(), 0);
    assert_eq!(Score::new(100).unwrap().get(), 100);
    assert_eq!(Score::new(101), Err(ProgressError::ScoreOutOfRange(101)));
    assert_eq!(Score::new(-1), Err(ProgressError::ScoreOutOfRange(-1)));
    assert_eq!(Score::new(1_000), Err(ProgressError::ScoreOutOfRange(1_000)));
  }

  #[tokio::test]
  async fn repeated_topic_replaces_score() {
    let store = InMemoryProgressStore::new();
    let k = key("ada", Language::Igbo);
    store.update(k.clone(), Topic::Greetings, score(60), Level::Beginner).await;
    let v = store.update(k.clone(), Topic::Greetings, score(90), Level::Beginner).await;
    assert_eq!(v.scores.get(&Topic::Greetings), Some(&score(90)));
    assert_eq!(v.total_score, 90);
    assert_eq!(v.completed_topics, vec![Topic::Greetings]);
  }

  #[tokio::test]
  async fn total_is_sum_and_level_follows_latest_update() {
    let store = InMemoryProgressStore::new();
    let k = key("ada", Language::Yoruba);
    store.update(k.clone(), Topic::Numbers, score(70), Level::Beginner).await;
    let v = store.update(k.clone(), Topic::Greetings, score(80), Level::Intermediate).await;
    assert_eq!(v.total_score, 150);
    assert_eq!(v.completed_topics, vec![Topic::Numbers, Topic::Greetings]);
    assert_eq!(v.current_level, Level::Intermediate);
    assert_eq!(v.next_recommended_topic, Topic::Colors);
  }

  #[tokio::test]
  async fn get_recommends_next_unfinished_topic() {
    let store = InMemoryProgressStore::new();
    let k = key("bola", Language::Hausa);
    store.update(k.clone(), Topic::Greetings, score(50), Level::Beginner).await;
    store.update(k.clone(), Topic::Numbers, score(50), Level::Beginner).await;
    assert_eq!(store.get(&k).await.next_recommended_topic, Topic::Colors);
  }

  #[test]
  fn recommendation_skips_out_of_order_completions() {
    assert_eq!(next_recommended_topic(&[Topic::Colors, Topic::Greetings]), Topic::Numbers);
    assert_eq!(next_recommended_topic(&[]), Topic::Greetings);
  }

  #[test]
  fn all_topics_done_recommends_last_path_entry() {
    assert_eq!(next_recommended_topic(&Topic::ALL), Topic::Proverbs);
  }

  #[tokio::test]
  async fn get_on_unknown_key_is_zero_valued_and_does_not_insert() {
    let store = InMemoryProgressStore::new();
    let v = store.get(&key("new", Language::Igbo)).await;
    assert!(v.completed_topics.is_empty());
    assert!(v.scores.is_empty());
    assert_eq!(v.total_score, 0);
    assert_eq!(v.current_level, Level::Beginner);
    assert_eq!(v.next_recommended_topic, Topic::Greetings);
    assert_eq!(store.len().await, 0);

    let other = store.get(&key("someone-else", Language::Hausa)).await;
    assert_eq!(other.total_score, 0);
    assert_eq!(store.len().await, 0);
  }

  #[tokio::test]
  async fn languages_are_tracked_separately() {
    let store = InMemoryProgressStore::new();
    store.update(key("ada", Language::Igbo), Topic::Food, score(40), Level::Beginner).await;
    let yoruba = store.get(&key("ada", Language::Yoruba)).await;
    assert_eq!(yoruba.total_score, 0);
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn concurrent_updates_to_one_key_are_not_lost() {
    let store = Arc::new(InMemoryProgressStore::new());
    let k = key("race", Language::Igbo);
    let mut handles = Vec::new();
    for (i, topic) in Topic::ALL.into_iter().enumerate() {
      let store = store.clone();
      let k = k.clone();
      handles.push(tokio::spawn(async move {
        store.update(k, topic, score(i as i64), Level::Beginner).await
      }));
    }
    for h in handles {
      h.await.unwrap();
    }
    let v = store.get(&k).await;
    assert_eq!(v.completed_topics.len(), 14);
    assert_eq!(v.total_score, (0..14).sum::<u32>());
    assert_eq!(v.next_recommended_topic, Topic::Proverbs);
  }
}
