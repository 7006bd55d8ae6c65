use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Question;

/// Why a question deck could not be loaded.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} must contain at least one question")]
    Empty { path: PathBuf },

    #[error("question {index} in {path} has no answers")]
    NoAnswers { path: PathBuf, index: usize },
}

/// Load a question deck from a JSON array of `{wording, answers}` objects.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let questions: Vec<Question> =
        serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if questions.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    if let Some(index) = questions.iter().position(|q| q.answers.is_empty()) {
        return Err(LoadError::NoAnswers {
            path: path.to_path_buf(),
            index,
        });
    }

    tracing::debug!(path = %path.display(), count = questions.len(), "loaded question deck");
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn deck(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_questions_in_order() {
        let file = deck(
            r#"[
                {"wording": "Pick one", "answers": ["Cat", "Dog"]},
                {"wording": "Best editor?", "answers": ["vi", "emacs", "ed"]}
            ]"#,
        );

        let questions = load_questions_from_json(file.path()).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].wording, "Pick one");
        assert_eq!(questions[1].answers, vec!["vi", "emacs", "ed"]);
    }

    #[test]
    fn test_rejects_empty_deck() {
        let file = deck("[]");
        let err = load_questions_from_json(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn test_rejects_question_without_answers() {
        let file = deck(r#"[{"wording": "a", "answers": ["x"]}, {"wording": "b", "answers": []}]"#);
        let err = load_questions_from_json(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::NoAnswers { index: 1, .. }));
    }

    #[test]
    fn test_reports_missing_file_and_bad_json() {
        let err = load_questions_from_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));

        let file = deck(r#"{"wording": "not a list"}"#);
        let err = load_questions_from_json(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
