use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneticsError {
    #[error("Gene span too large: {length} base pairs (at most 32 can be sampled)")]
    SpanTooLarge { length: i32 },

    #[error("Gene span {span} out of bounds for chromosome of {capacity} bytes")]
    SpanOutOfBounds { span: String, capacity: usize },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Genetic driver {0} is not set, this is due to either a missing gene in the genome, or a gene ordering problem")]
    DriverNotSet(String),

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Exhausted after {attempts} attempts while matching {target}")]
    Exhausted { target: String, attempts: usize },

    #[error("Topology conflict: {0}")]
    TopologyConflict(String),

    #[error("Dependency cycle through genetic driver {0}")]
    DependencyCycle(String),

    #[error("Unknown genetic driver: {0}")]
    UnknownDriver(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeneticsError>;
