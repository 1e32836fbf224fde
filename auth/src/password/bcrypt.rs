use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Provides adaptive one-way hashing (internally uses bcrypt) with a fixed
/// work factor chosen at construction.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Work factor used when none is configured.
    pub const DEFAULT_COST: u32 = 10;

    /// Smallest cost bcrypt accepts.
    pub const MIN_COST: u32 = 4;

    /// Largest cost bcrypt accepts.
    pub const MAX_COST: u32 = 31;

    /// Create a new password hasher with the default work factor.
    ///
    /// # Returns
    /// PasswordHasher instance using cost 10
    pub fn new() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
        }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `cost` - bcrypt cost (log2 of the number of rounds)
    ///
    /// # Errors
    /// * `InvalidCost` - Cost is outside the range bcrypt accepts
    pub fn with_cost(cost: u32) -> Result<Self, PasswordError> {
        if !(Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost {
                cost,
                min: Self::MIN_COST,
                max: Self::MAX_COST,
            });
        }

        Ok(Self { cost })
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// A random salt is generated per call, so equal inputs produce different hashes.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt format hash (`$2b$<cost>$<salt+digest>`)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Never fails: an empty or malformed stored hash simply does not match.
    /// Accounts created through a federated login store an empty hash, so
    /// they can never pass local verification.
    ///
    /// # Arguments
    /// * `password` - Plaintext candidate
    /// * `hash` - Stored password hash
    ///
    /// # Returns
    /// True if `hash` was produced from `password`
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if hash.is_empty() {
            return false;
        }

        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
