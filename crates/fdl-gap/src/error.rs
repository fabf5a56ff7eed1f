use fdl_core::errors::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum GapError {
    /// Includes `CircularReference`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("maximum depth {limit} exceeded: {}", path.join(" -> "))]
    DepthExceeded { limit: usize, path: Vec<String> },
}
