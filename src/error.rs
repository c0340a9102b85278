use thiserror::Error;

pub type AnnotationResult<T> = Result<T, AnnotationError>;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("unknown chart handle: index={index}, generation={generation}")]
    UnknownChart { index: u32, generation: u32 },

    #[error("invalid shape registration: {0}")]
    InvalidShape(String),

    #[error("invalid annotation config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("chart state registry is full ({capacity} slots)")]
    RegistryFull { capacity: usize },
}
