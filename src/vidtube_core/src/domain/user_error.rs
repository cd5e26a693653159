use thiserror::Error;

/// Validation failures raised while parsing user input into domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("{0} file is missing")]
    MissingFile(&'static str),
    #[error("{0} file is empty")]
    EmptyFile(&'static str),
}
