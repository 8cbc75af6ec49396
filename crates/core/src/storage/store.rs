//! The chapter and quiz data store.
//!
//! [`Store`] owns both content collections. Reads return cloned snapshots;
//! creates stamp a fresh UUID and the current time before appending.
//! The two collections persist to separate files and are saved independently.

use crate::config;
use crate::content::{Chapter, NewChapter, NewQuiz, Quiz, User};
use crate::error::Result;
use crate::storage::collection::RecordCollection;
use chrono::{DateTime, Utc};
use std::path::Path;
use uuid::Uuid;

/// In-memory chapter and quiz collections backed by JSON files in one directory.
#[derive(Debug)]
pub struct Store {
    chapters: RecordCollection<Chapter>,
    quizzes: RecordCollection<Quiz>,
}

impl Store {
    /// Loads both collections from `data_dir`.
    ///
    /// Missing files are empty collections. Malformed JSON or any other read
    /// failure is returned so the caller can abort startup.
    pub fn load_all(data_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = data_dir.as_ref();
        let chapters = RecordCollection::load(dir.join(config::CHAPTERS_FILE))?;
        let quizzes = RecordCollection::load(dir.join(config::QUIZZES_FILE))?;
        tracing::info!(
            chapters = chapters.len(),
            quizzes = quizzes.len(),
            "Store loaded from {:?}",
            dir
        );
        Ok(Self { chapters, quizzes })
    }

    // ── Chapters ───────────────────────────────────────────────────────

    /// Every chapter, in insertion order.
    pub fn list_chapters(&self) -> Vec<Chapter> {
        self.chapters.all()
    }

    /// Chapters of one class, sorted by subject and then by `order`.
    pub fn list_chapters_by_class(&self, class_number: i64) -> Vec<Chapter> {
        let mut chapters = self.chapters.filtered(|c| c.class_number == class_number);
        chapters.sort_by(|a, b| a.subject.cmp(&b.subject).then(a.order.cmp(&b.order)));
        chapters
    }

    pub fn get_chapter(&self, id: &Uuid) -> Option<Chapter> {
        self.chapters.get(id)
    }

    /// The `limit` most recently stamped chapters, newest first.
    pub fn list_recent_chapters(&self, limit: usize) -> Vec<Chapter> {
        let mut chapters = self.chapters.all();
        chapters.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        chapters.truncate(limit);
        chapters
    }

    pub fn create_chapter(&self, new: NewChapter) -> Result<Chapter> {
        self.create_chapter_at(new, Utc::now())
    }

    /// Like [`create_chapter`](Self::create_chapter) with an explicit timestamp.
    pub fn create_chapter_at(&self, new: NewChapter, now: DateTime<Utc>) -> Result<Chapter> {
        let chapter = Chapter::from_new(new, Uuid::new_v4(), now);
        let chapter = self.chapters.insert(chapter)?;
        tracing::debug!(id = %chapter.id, class = chapter.class_number, "Chapter stored");
        Ok(chapter)
    }

    /// Removes a chapter. Returns `Ok(false)` when the id is unknown.
    pub fn delete_chapter(&self, id: &Uuid) -> Result<bool> {
        self.chapters.remove(id)
    }

    // ── Quizzes ────────────────────────────────────────────────────────

    /// Every quiz, in insertion order.
    pub fn list_quizzes(&self) -> Vec<Quiz> {
        self.quizzes.all()
    }

    pub fn get_quiz(&self, id: &Uuid) -> Option<Quiz> {
        self.quizzes.get(id)
    }

    pub fn create_quiz(&self, new: NewQuiz) -> Result<Quiz> {
        self.create_quiz_at(new, Utc::now())
    }

    pub fn create_quiz_at(&self, new: NewQuiz, now: DateTime<Utc>) -> Result<Quiz> {
        let quiz = Quiz::from_new(new, Uuid::new_v4(), now);
        let quiz = self.quizzes.insert(quiz)?;
        tracing::debug!(id = %quiz.id, questions = quiz.questions.len(), "Quiz stored");
        Ok(quiz)
    }

    /// Removes a quiz. Returns `Ok(false)` when the id is unknown.
    pub fn delete_quiz(&self, id: &Uuid) -> Result<bool> {
        self.quizzes.remove(id)
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn quiz_count(&self) -> usize {
        self.quizzes.len()
    }

    // ── Users ──────────────────────────────────────────────────────────

    /// Admin account lookup.
    ///
    /// No account store exists, so this always returns `None` and admin
    /// login can never succeed. Replacing it needs a persisted credential
    /// store with hashed passwords.
    pub fn user_by_username(&self, _username: &str) -> Option<User> {
        None
    }
}
