use thiserror::Error;

/// Errors raised while building or decoding an RMQ structure.
#[derive(Debug, Error)]
pub enum Error {
    /// The partition sizes cannot support the block hierarchy.
    #[error("invalid partition sizes: {0}")]
    InvalidConfig(String),

    /// Too few blocks for the block-level sparse table to fit inside one superblock.
    #[error("array too small: {len} elements form {blocks} blocks, at least {required} required")]
    ArrayTooSmall {
        len: usize,
        blocks: usize,
        required: usize,
    },

    /// Positions are stored as 32-bit integers.
    #[error("array too large: {0} elements")]
    ArrayTooLarge(usize),

    /// The stream ended before the named table was complete.
    #[error("truncated stream while reading {section}")]
    Truncated { section: &'static str },

    /// A decoded entry does not describe a valid structure.
    #[error("corrupt {section}: {reason}")]
    Corrupt {
        section: &'static str,
        reason: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
