use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid bcrypt cost {cost}: must be between {min} and {max}")]
    InvalidCost { cost: u32, min: u32, max: u32 },
}
