//! Error types for NDT-PSO SLAM

/// Result type alias
pub type Result<T> = std::result::Result<T, NdtPsoError>;

/// NDT-PSO SLAM error types
///
/// Scan processing itself never fails: degenerate input is reported through
/// [`AlignmentResult`](crate::pso::AlignmentResult) flags instead.
#[derive(Debug, thiserror::Error)]
pub enum NdtPsoError {
    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Alignment worker pool could not be started
    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
