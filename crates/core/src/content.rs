//! Core content types for StudyMitra.
//!
//! A [`Chapter`] is a unit of reading material scoped to a class and subject.
//! A [`Quiz`] is an ordered list of multiple-choice [`QuizQuestion`]s scoped the
//! same way. Both are created whole and never edited in place; the server
//! assigns `id` and the timestamp at creation.
//!
//! All types serialize with camelCase keys, which is the shape of both the
//! JSON collection files and the HTTP bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored record that can be looked up by its server-assigned id.
pub trait Record: Clone + Serialize + serde::de::DeserializeOwned + Send + Sync {
    fn id(&self) -> Uuid;
}

/// A chapter of content for one class and subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: Uuid,
    /// School class, 6 through 9 in practice. Not range-checked.
    pub class_number: i64,
    /// Science, Math, English or Social Science in practice. Any string is accepted.
    pub subject: String,
    pub title: String,
    pub content: String,
    /// Secondary sort key within a subject.
    pub order: i64,
    /// Set once at creation.
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload for a chapter.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChapter {
    pub class_number: i64,
    pub subject: String,
    pub title: String,
    pub content: String,
    pub order: Option<i64>,
}

impl Chapter {
    /// Builds a stored chapter from a create payload. `order` defaults to 0.
    pub fn from_new(new: NewChapter, id: Uuid, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            class_number: new.class_number,
            subject: new.subject,
            title: new.title,
            content: new.content,
            order: new.order.unwrap_or(0),
            updated_at,
        }
    }
}

impl Record for Chapter {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// One multiple-choice question embedded in a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    /// Answer options in display order. The UI always renders four.
    pub options: Vec<String>,
    /// Index into `options`. Bounds are not enforced.
    pub correct_answer: i64,
}

/// A quiz for one class and subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Uuid,
    pub class_number: i64,
    pub subject: String,
    pub title: String,
    /// Questions in presentation order.
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Validated create payload for a quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuiz {
    pub class_number: i64,
    pub subject: String,
    pub title: String,
    pub questions: Vec<QuizQuestion>,
    pub featured: Option<bool>,
}

impl Quiz {
    /// Builds a stored quiz from a create payload. `featured` defaults to false.
    pub fn from_new(new: NewQuiz, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            class_number: new.class_number,
            subject: new.subject,
            title: new.title,
            questions: new.questions,
            featured: new.featured.unwrap_or(false),
            created_at,
        }
    }

    /// Scores a set of answers against this quiz.
    ///
    /// `answers[i]` is the selected option index for question `i`. Missing
    /// or `None` entries count as wrong; extra entries are ignored.
    pub fn grade(&self, answers: &[Option<i64>]) -> QuizGrade {
        let results: Vec<QuestionResult> = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, q)| {
                let selected = answers.get(index).copied().flatten();
                QuestionResult {
                    index,
                    selected,
                    correct_answer: q.correct_answer,
                    correct: selected == Some(q.correct_answer),
                }
            })
            .collect();

        let total = results.len();
        let score = results.iter().filter(|r| r.correct).count();
        let percentage = if total == 0 {
            0
        } else {
            ((score as f64 / total as f64) * 100.0).round() as u32
        };

        QuizGrade {
            quiz_id: self.id,
            score,
            total,
            percentage,
            results,
        }
    }
}

impl Record for Quiz {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Outcome of grading one quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizGrade {
    pub quiz_id: Uuid,
    pub score: usize,
    pub total: usize,
    /// `score / total` as a whole percentage, rounded half away from zero.
    pub percentage: u32,
    pub results: Vec<QuestionResult>,
}

/// Per-question grading detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub index: usize,
    pub selected: Option<i64>,
    pub correct_answer: i64,
    pub correct: bool,
}

/// An admin account. No account is ever persisted; see [`crate::storage::Store::user_by_username`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password: String,
}

/// The non-sensitive projection of a [`User`] returned after login.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}
