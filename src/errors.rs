use thiserror::Error;

/// Validation failure for untrusted resume JSON.
///
/// Raised only when a field that *is present* in the input has the wrong
/// fundamental type. Missing fields are defaulted, never errors. Callers use
/// this to distinguish "the AI returned an invalid response format" from
/// other failures.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("resume payload must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("field `{field}` has the wrong type: expected {expected}, found {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Unrecognized template identity at dispatch.
///
/// Internal and always recovered: the string-identity dispatch entry points
/// fall back to the registry default instead of surfacing this. Only the
/// strict `TemplateId::from_name` API exposes it.
#[derive(Debug, Error)]
#[error("unknown template identity: {0:?}")]
pub struct UnknownTemplateError(pub String);

/// Failure while producing the binary PDF document.
///
/// The rendering core cannot fail on schema-valid input, so everything here
/// comes from the document-assembly layer and is propagated opaquely.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF document assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("writing PDF output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("export task failed: {0}")]
    Task(String),
}
