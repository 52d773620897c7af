use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;
use crate::secret::Secret;

/// Argon2id memory cost in KiB.
const MEMORY_COST_KIB: u32 = 19_456;
/// Argon2id iteration count.
const TIME_COST: u32 = 2;
/// Argon2id lanes.
const PARALLELISM: u32 = 1;

/// Peppered password hashing.
///
/// Every password is hashed with Argon2id, a random per-record salt and a
/// process-wide pepper fed through Argon2's keyed-hashing input. The pepper
/// never appears in the stored PHC string, so a leaked hash table cannot be
/// attacked without it.
pub struct PasswordHasher {
    pepper: Secret,
    params: Params,
}

impl PasswordHasher {
    /// Create a password hasher bound to a pepper.
    ///
    /// # Arguments
    /// * `pepper` - Non-empty process-wide secret
    ///
    /// # Errors
    /// * `InvalidConfiguration` - Argon2 rejected the work factor or pepper
    pub fn new(pepper: Secret) -> Result<Self, PasswordError> {
        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
            .map_err(|e| PasswordError::InvalidConfiguration(e.to_string()))?;

        let hasher = Self { pepper, params };
        // Surface an oversized pepper now rather than on the first login.
        hasher.argon2()?;
        Ok(hasher)
    }

    fn argon2(&self) -> Result<Argon2<'_>, PasswordError> {
        Argon2::new_with_secret(
            self.pepper.expose(),
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
        .map_err(|e| PasswordError::InvalidConfiguration(e.to_string()))
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 failed to produce a digest
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored PHC string.
    ///
    /// A mismatch is `Ok(false)`, never an error. The digest comparison is
    /// constant-time.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is malformed or uses an unsupported algorithm
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        match self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}
