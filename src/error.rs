use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Queue {queue} is full (capacity {capacity})")]
    QueueFull { queue: usize, capacity: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Thread error: {0}")]
    Thread(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
