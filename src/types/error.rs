use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("duplicate rule id '{id}'")]
    DuplicateRule { id: String },

    #[error("rule at position {position} has an empty id")]
    EmptyId { position: usize },
}
