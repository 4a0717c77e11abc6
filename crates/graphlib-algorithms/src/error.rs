//! Error types for graph algorithms

use thiserror::Error;

/// Errors raised by the algorithm suite and the priority queue
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgoError {
    #[error("Graph does not have node: {0}")]
    NodeNotFound(String),

    /// Raised by topological sort; `is_acyclic` turns it into `false`.
    #[error("Graph contains a cycle")]
    Cycle,

    #[error("Negative edge weight {weight} on {edge}")]
    NegativeWeight { edge: String, weight: f64 },

    #[error("Graph contains a negative-weight cycle")]
    NegativeCycle,

    #[error("Input graph is not connected")]
    NotConnected,

    #[error("Priority queue underflow")]
    QueueUnderflow,

    #[error("Key not found in priority queue: {0}")]
    KeyNotFound(String),

    #[error("New priority {requested} is greater than current priority {current} for key {key}")]
    PriorityIncrease {
        key: String,
        current: f64,
        requested: f64,
    },
}

pub type AlgoResult<T> = Result<T, AlgoError>;
