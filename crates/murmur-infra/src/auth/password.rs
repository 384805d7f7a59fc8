//! Argon2 hashing behind the `PasswordService` port.
//!
//! Hashes carry their own salt and parameters in PHC string format, so
//! stored credentials survive parameter changes.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use murmur_core::ports::{AuthError, PasswordService};

/// Hashes registration passwords and checks login attempts.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    /// A mismatch is `Ok(false)`; `Err` means the stored hash itself
    /// is malformed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trips_and_rejects_wrong_password() {
        let service = Argon2PasswordService::new();

        let hash = service.hash("correct horse battery").unwrap();
        assert!(service.verify("correct horse battery", &hash).unwrap());
        assert!(!service.verify("incorrect horse", &hash).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let service = Argon2PasswordService::new();

        let first = service.hash("hunter2hunter2").unwrap();
        let second = service.hash("hunter2hunter2").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_stored_hash_is_an_error() {
        let service = Argon2PasswordService::new();

        let result = service.verify("whatever", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::HashingError(_))));
    }
}
