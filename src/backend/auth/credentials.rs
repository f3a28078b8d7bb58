/**
 * Credential Hashing
 *
 * One-way hashing and verification of user passwords with bcrypt. The
 * plaintext is never stored; only the salted hash produced here is.
 */

/// bcrypt hasher with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Salt and hash `password`
    pub fn hash_password(&self, password: &str) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(password, self.cost)
    }

    /// Check `password` against a stored hash.
    ///
    /// A hash that bcrypt cannot parse is treated as a mismatch.
    pub fn is_valid(&self, hashed_password: &str, password: &str) -> bool {
        match bcrypt::verify(password, hashed_password) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("Password verification error: {:?}", e);
                false
            }
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
