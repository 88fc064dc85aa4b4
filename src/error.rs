/// Errors from the edges around the control loop: inspector edits and telemetry export.
///
/// The tick path itself never returns one of these.
#[derive(Debug, thiserror::Error)]
pub enum DamperError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field is read-only: {0}")]
    ReadOnly(String),

    #[error("Field {field} expects a {expected} value")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("Cannot parse {text:?} for field {field}")]
    Parse { field: String, text: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
