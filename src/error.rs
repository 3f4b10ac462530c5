use thiserror::Error;

/// Failure signal from the allocation policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    #[error("out of memory: could not allocate {requested} bytes")]
    OutOfMemory { requested: usize },

    #[error("length overflow: {left} + {right} bytes does not fit in usize")]
    LengthOverflow { left: usize, right: usize },
}

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Allocation failed: {0}")]
    Alloc(#[from] AllocError),

    #[error("Invalid arena capacity: {0}")]
    InvalidCapacity(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
