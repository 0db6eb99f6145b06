use std::borrow::Cow;

/// Failures of the prediction pipelines.
///
/// Every variant is reported inline to the caller; none of them is allowed to take the
/// process down. Soft failures (unknown crops, unrecognized feature slots) are not
/// errors at all, see [`crate::Degradation`].
#[agri_derive::agri_error]
pub enum PredictionError {
    /// A required form field is missing or not a finite number.
    #[error("Invalid input{}: {message}", format_context(.context))]
    Validation {
        field: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The assembled vector does not have the width the model was fitted with.
    #[error(
        "Feature schema mismatch{}: model expects {expected} features, got {actual}",
        format_context(.context)
    )]
    SchemaMismatch { expected: usize, actual: usize, context: Option<Cow<'static, str>> },

    /// The model call failed or produced an output that cannot be interpreted.
    #[error("Inference failed{}: {message}", format_context(.context))]
    Inference { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No model is loaded for this pipeline.
    #[error("Model unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The model artifact is not valid JSON for any known model kind.
    #[error("Invalid model artifact{}: {source}", format_context(.context))]
    Artifact { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The model artifact could not be read.
    #[error("Model artifact I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal prediction error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl PredictionError {
    pub(crate) fn inference(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Inference { message: message.into(), context: None }
    }

    /// Short machine-readable name of the variant, used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::SchemaMismatch { .. } => "schema_mismatch",
            Self::Inference { .. } => "inference",
            Self::Unavailable { .. } => "unavailable",
            Self::Artifact { .. } => "artifact",
            Self::Io { .. } => "io",
            Self::Internal { .. } => "internal",
        }
    }
}
