use agri_derive::agri_error;
use std::borrow::Cow;

#[agri_error]
pub enum ArtifactError {
    #[error("Artifact I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Width mismatch{}: expected {expected}, got {actual}", format_context(.context))]
    Width { expected: usize, actual: usize, context: Option<Cow<'static, str>> },

    #[error("Internal artifact error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn missing_file() -> Result<String, ArtifactError> {
    std::fs::read_to_string("/definitely/not/here.json").context("Reading model artifact")
}

#[test]
fn source_errors_convert_with_context() {
    let err = missing_file().unwrap_err();
    assert!(matches!(err, ArtifactError::Io { context: Some(_), .. }));
    assert!(err.to_string().starts_with("Artifact I/O error (Reading model artifact): "));
}

#[test]
fn question_mark_uses_from_impl() {
    fn read() -> Result<String, ArtifactError> {
        Ok(std::fs::read_to_string("/definitely/not/here.json")?)
    }

    let err = read().unwrap_err();
    assert!(matches!(err, ArtifactError::Io { context: None, .. }));
}

#[test]
fn context_is_attached_to_own_results() {
    let res: Result<(), ArtifactError> =
        Err(ArtifactError::Width { expected: 7, actual: 8, context: None });

    let err = res.context("classifier").unwrap_err();
    assert_eq!(err.to_string(), "Width mismatch (classifier): expected 7, got 8");
}

#[test]
fn strings_become_internal_errors() {
    let from_static: ArtifactError = "boom".into();
    let from_owned: ArtifactError = String::from("bang").into();

    assert_eq!(from_static.to_string(), "Internal artifact error: boom");
    assert!(matches!(from_owned, ArtifactError::Internal { .. }));
}
