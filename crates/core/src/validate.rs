//! Shape validation for create payloads.
//!
//! Payloads arrive as arbitrary JSON. Each check collects every problem it
//! finds instead of stopping at the first, so a client gets the full list of
//! [`FieldError`]s in one response. Only types and presence are checked; class
//! numbers, subjects, option counts and answer bounds are left to the UI.

use crate::content::{NewChapter, NewQuiz, QuizQuestion};
use serde::Serialize;
use serde_json::{Map, Value};

/// A single field-level validation failure.
///
/// Besides type and presence errors, a chapter or quiz `title` that is empty
/// or only whitespace is rejected with "Title must not be empty". Older
/// clients that saved blank titles will get a 400 here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path to the field, e.g. `questions.0.options`. Empty for the root.
    pub path: String,
    pub message: String,
}

impl FieldError {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Validate a chapter create payload.
pub fn chapter_from_json(value: &Value) -> Result<NewChapter, Vec<FieldError>> {
    let mut errors = Vec::new();
    let Some(obj) = root_object(value, &mut errors) else {
        return Err(errors);
    };

    let class_number = required_integer(obj, "classNumber", "", &mut errors);
    let subject = required_string(obj, "subject", "", &mut errors);
    let title = required_title(obj, "", &mut errors);
    let content = required_string(obj, "content", "", &mut errors);
    let order = optional_integer(obj, "order", "", &mut errors);

    match (class_number, subject, title, content, order) {
        (Some(class_number), Some(subject), Some(title), Some(content), Ok(order))
            if errors.is_empty() =>
        {
            Ok(NewChapter {
                class_number,
                subject,
                title,
                content,
                order,
            })
        }
        _ => Err(errors),
    }
}

/// Validate a quiz create payload.
pub fn quiz_from_json(value: &Value) -> Result<NewQuiz, Vec<FieldError>> {
    let mut errors = Vec::new();
    let Some(obj) = root_object(value, &mut errors) else {
        return Err(errors);
    };

    let class_number = required_integer(obj, "classNumber", "", &mut errors);
    let subject = required_string(obj, "subject", "", &mut errors);
    let title = required_title(obj, "", &mut errors);
    let questions = questions(obj, &mut errors);
    let featured = match obj.get("featured") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => {
            errors.push(type_mismatch("featured", "boolean", other));
            Err(())
        }
    };

    match (class_number, subject, title, questions, featured) {
        (Some(class_number), Some(subject), Some(title), Some(questions), Ok(featured))
            if errors.is_empty() =>
        {
            Ok(NewQuiz {
                class_number,
                subject,
                title,
                questions,
                featured,
            })
        }
        _ => Err(errors),
    }
}

fn questions(obj: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<Vec<QuizQuestion>> {
    let items = match obj.get("questions") {
        None | Some(Value::Null) => {
            errors.push(FieldError::new("questions", "Required"));
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            errors.push(type_mismatch("questions", "array", other));
            return None;
        }
    };
    if items.is_empty() {
        errors.push(FieldError::new(
            "questions",
            "Array must contain at least 1 element(s)",
        ));
        return None;
    }

    let before = errors.len();
    let parsed: Vec<QuizQuestion> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| question(item, &format!("questions.{i}"), errors))
        .collect();
    (errors.len() == before).then_some(parsed)
}

fn question(value: &Value, path: &str, errors: &mut Vec<FieldError>) -> Option<QuizQuestion> {
    let Value::Object(obj) = value else {
        errors.push(type_mismatch(path, "object", value));
        return None;
    };

    let question = required_string(obj, "question", path, errors);
    let correct_answer = required_integer(obj, "correctAnswer", path, errors);
    let options_path = join(path, "options");
    let options = match obj.get("options") {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(options_path, "Required"));
            None
        }
        Some(Value::Array(items)) => {
            let before = errors.len();
            let options: Vec<String> = items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| match item {
                    Value::String(s) => Some(s.clone()),
                    other => {
                        errors.push(type_mismatch(&format!("{options_path}.{i}"), "string", other));
                        None
                    }
                })
                .collect();
            (errors.len() == before).then_some(options)
        }
        Some(other) => {
            errors.push(type_mismatch(&options_path, "array", other));
            None
        }
    };

    Some(QuizQuestion {
        question: question?,
        options: options?,
        correct_answer: correct_answer?,
    })
}

fn root_object<'a>(
    value: &'a Value,
    errors: &mut Vec<FieldError>,
) -> Option<&'a Map<String, Value>> {
    match value {
        Value::Object(obj) => Some(obj),
        other => {
            errors.push(type_mismatch("", "object", other));
            None
        }
    }
}

fn required_integer(
    obj: &Map<String, Value>,
    key: &str,
    parent: &str,
    errors: &mut Vec<FieldError>,
) -> Option<i64> {
    let path = join(parent, key);
    match obj.get(key) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(path, "Required"));
            None
        }
        Some(v) => match as_integer(v) {
            Some(n) => Some(n),
            None => {
                errors.push(integer_error(&path, v));
                None
            }
        },
    }
}

/// `Ok(None)` when absent, `Err(())` when present with the wrong type.
fn optional_integer(
    obj: &Map<String, Value>,
    key: &str,
    parent: &str,
    errors: &mut Vec<FieldError>,
) -> Result<Option<i64>, ()> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => match as_integer(v) {
            Some(n) => Ok(Some(n)),
            None => {
                errors.push(integer_error(&join(parent, key), v));
                Err(())
            }
        },
    }
}

fn required_string(
    obj: &Map<String, Value>,
    key: &str,
    parent: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let path = join(parent, key);
    match obj.get(key) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(path, "Required"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(type_mismatch(&path, "string", other));
            None
        }
    }
}

fn required_title(
    obj: &Map<String, Value>,
    parent: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let title = required_string(obj, "title", parent, errors)?;
    if title.trim().is_empty() {
        errors.push(FieldError::new(
            join(parent, "title"),
            "Title must not be empty",
        ));
        return None;
    }
    Some(title)
}

/// Accepts JSON integers and floats with no fractional part (`6` and `6.0`).
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

/// Whole numbers outside the `i64` range get a bound message, not a type one.
fn integer_error(path: &str, value: &Value) -> FieldError {
    let whole = match value {
        Value::Number(n) => n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0),
        _ => false,
    };
    match value.as_f64() {
        Some(f) if whole && f > 0.0 => FieldError::new(
            path,
            format!("Number must be less than or equal to {}", i64::MAX),
        ),
        Some(_) if whole => FieldError::new(
            path,
            format!("Number must be greater than or equal to {}", i64::MIN),
        ),
        _ => type_mismatch(path, "integer", value),
    }
}

fn type_mismatch(path: &str, expected: &str, actual: &Value) -> FieldError {
    FieldError::new(
        path,
        format!("Expected {}, received {}", expected, json_type(actual)),
    )
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.path.as_str()).collect()
    }

    fn valid_question() -> Value {
        json!({
            "question": "2 + 2 = ?",
            "options": ["3", "4", "5", "22"],
            "correctAnswer": 1
        })
    }

    // ── Chapters ───────────────────────────────────────────────────────

    #[test]
    fn test_valid_chapter() {
        let new = chapter_from_json(&json!({
            "classNumber": 6,
            "subject": "Math",
            "title": "Whole Numbers",
            "content": "Counting and place value",
            "order": 2
        }))
        .unwrap();
        assert_eq!(new.class_number, 6);
        assert_eq!(new.order, Some(2));
    }

    #[test]
    fn test_chapter_order_is_optional() {
        let new = chapter_from_json(&json!({
            "classNumber": 7,
            "subject": "English",
            "title": "Poems",
            "content": ""
        }))
        .unwrap();
        assert_eq!(new.order, None);
    }

    #[test]
    fn test_chapter_missing_title() {
        let errors = chapter_from_json(&json!({
            "classNumber": 6,
            "subject": "Math",
            "content": "x"
        }))
        .unwrap_err();
        assert_eq!(paths(&errors), vec!["title"]);
        assert_eq!(errors[0].message, "Required");
    }

    #[test]
    fn test_chapter_empty_title_rejected() {
        let errors = chapter_from_json(&json!({
            "classNumber": 6,
            "subject": "Math",
            "title": "   ",
            "content": "x"
        }))
        .unwrap_err();
        assert_eq!(paths(&errors), vec!["title"]);
    }

    #[test]
    fn test_chapter_collects_every_error() {
        let errors = chapter_from_json(&json!({
            "classNumber": "six",
            "order": "first"
        }))
        .unwrap_err();
        assert_eq!(
            paths(&errors),
            vec!["classNumber", "subject", "title", "content", "order"]
        );
        assert_eq!(errors[0].message, "Expected integer, received string");
    }

    #[test]
    fn test_chapter_fractional_class_rejected() {
        let errors = chapter_from_json(&json!({
            "classNumber": 6.5,
            "subject": "Math",
            "title": "t",
            "content": "c"
        }))
        .unwrap_err();
        assert_eq!(errors[0].message, "Expected integer, received number");
    }

    #[test]
    fn test_chapter_class_beyond_i64_reports_bound() {
        let errors = chapter_from_json(&json!({
            "classNumber": 18446744073709551615u64,
            "subject": "Math",
            "title": "t",
            "content": "c",
            "order": -1e19
        }))
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path, "classNumber");
        assert_eq!(
            errors[0].message,
            "Number must be less than or equal to 9223372036854775807"
        );
        assert_eq!(errors[1].path, "order");
        assert_eq!(
            errors[1].message,
            "Number must be greater than or equal to -9223372036854775808"
        );
    }

    #[test]
    fn test_chapter_whole_float_accepted() {
        let new = chapter_from_json(&json!({
            "classNumber": 8.0,
            "subject": "Math",
            "title": "t",
            "content": "c"
        }))
        .unwrap();
        assert_eq!(new.class_number, 8);
    }

    #[test]
    fn test_chapter_class_range_not_enforced() {
        assert!(chapter_from_json(&json!({
            "classNumber": 12,
            "subject": "Astronomy",
            "title": "t",
            "content": "c"
        }))
        .is_ok());
    }

    #[test]
    fn test_non_object_payload() {
        let errors = chapter_from_json(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "");
        assert_eq!(errors[0].message, "Expected object, received array");
    }

    // ── Quizzes ────────────────────────────────────────────────────────

    #[test]
    fn test_valid_quiz() {
        let new = quiz_from_json(&json!({
            "classNumber": 9,
            "subject": "Science",
            "title": "Atoms",
            "questions": [valid_question(), valid_question()],
            "featured": true
        }))
        .unwrap();
        assert_eq!(new.questions.len(), 2);
        assert_eq!(new.questions[0].options[1], "4");
        assert_eq!(new.featured, Some(true));
    }

    #[test]
    fn test_quiz_empty_questions_rejected() {
        let errors = quiz_from_json(&json!({
            "classNumber": 9,
            "subject": "Science",
            "title": "Atoms",
            "questions": []
        }))
        .unwrap_err();
        assert_eq!(paths(&errors), vec!["questions"]);
    }

    #[test]
    fn test_quiz_nested_question_errors() {
        let errors = quiz_from_json(&json!({
            "classNumber": 9,
            "subject": "Science",
            "title": "Atoms",
            "questions": [
                valid_question(),
                { "question": 5, "options": ["a", 2], "correctAnswer": "0" },
                "not a question"
            ]
        }))
        .unwrap_err();
        assert_eq!(
            paths(&errors),
            vec![
                "questions.1.question",
                "questions.1.correctAnswer",
                "questions.1.options.1",
                "questions.2"
            ]
        );
    }

    #[test]
    fn test_quiz_featured_must_be_boolean() {
        let errors = quiz_from_json(&json!({
            "classNumber": 9,
            "subject": "Science",
            "title": "Atoms",
            "questions": [valid_question()],
            "featured": "yes"
        }))
        .unwrap_err();
        assert_eq!(paths(&errors), vec!["featured"]);
    }

    #[test]
    fn test_quiz_option_count_not_enforced() {
        let new = quiz_from_json(&json!({
            "classNumber": 6,
            "subject": "Math",
            "title": "Odd one",
            "questions": [{ "question": "?", "options": ["only"], "correctAnswer": 3 }]
        }))
        .unwrap();
        assert_eq!(new.questions[0].options.len(), 1);
        assert_eq!(new.questions[0].correct_answer, 3);
    }
}
