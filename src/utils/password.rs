use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::ErrorMessage;

const MAX_PASSWORD_LENGTH: usize = 64;

pub fn hash(password: impl Into<String>) -> Result<String, ErrorMessage> {
    let password = password.into();

    if password.is_empty() || password.len() > MAX_PASSWORD_LENGTH {
        return Err(ErrorMessage::HashingError);
    }

    let salt = SaltString::generate(&mut OsRng);
    let hashed_password = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| ErrorMessage::HashingError)?
        .to_string();

    Ok(hashed_password)
}

pub fn compare(password: &str, hashed_password: &str) -> Result<bool, ErrorMessage> {
    if password.is_empty() || password.len() > MAX_PASSWORD_LENGTH {
        return Err(ErrorMessage::InvalidHashFormat);
    }

    let parsed_hash =
        PasswordHash::new(hashed_password).map_err(|_| ErrorMessage::InvalidHashFormat)?;

    let password_matched = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    Ok(password_matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_compare_round_trip() {
        let hashed = hash("password123").unwrap();
        assert!(compare("password123", &hashed).unwrap());
        assert!(!compare("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn empty_password_is_rejected() {
        assert_eq!(hash("").unwrap_err(), ErrorMessage::HashingError);
    }

    #[test]
    fn oversized_password_is_rejected() {
        let long = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        assert_eq!(hash(long).unwrap_err(), ErrorMessage::HashingError);
    }

    #[test]
    fn garbage_hash_is_invalid_format() {
        assert_eq!(
            compare("password123", "not-a-hash").unwrap_err(),
            ErrorMessage::InvalidHashFormat
        );
    }
}
