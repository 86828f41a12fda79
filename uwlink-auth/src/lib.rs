use base64::{engine::general_purpose, Engine as _};
use hkdf::Hkdf;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Key derivation failed")]
    KeyDerivation,
    #[error("Invalid password hash format")]
    InvalidHashFormat,
    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),
    #[error("Token creation failed")]
    TokenCreation,
    #[error("Token is invalid")]
    TokenInvalid,
    #[error("Token has expired")]
    TokenExpired,
}

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
const SCHEME: &str = "hkdf-sha256";

// Domain label so password digests can never collide with other key material
// derived from the same HKDF construction.
const KEY_INFO: &[u8] = b"uwlink-password:";

/// A derived credential digest that zeroes itself when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
struct DerivedKey([u8; KEY_LEN]);

fn derive_key(password: &str, salt: &[u8]) -> Result<DerivedKey, AuthError> {
    let (_, hk) = Hkdf::<Sha256>::extract(Some(salt), password.as_bytes());
    let mut okm = [0u8; KEY_LEN];
    hk.expand(KEY_INFO, &mut okm)
        .map_err(|_| AuthError::KeyDerivation)?;
    Ok(DerivedKey(okm))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Salted password hashing.
///
/// Stored form is `hkdf-sha256$<salt>$<digest>` with both parts encoded as
/// unpadded url-safe base64. The plaintext password is never stored.
pub struct Password;

impl Password {
    /// Hash a password with a fresh random salt
    pub fn hash(password: &str) -> Result<String, AuthError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let key = derive_key(password, &salt)?;

        Ok(format!(
            "{}${}${}",
            SCHEME,
            general_purpose::URL_SAFE_NO_PAD.encode(salt),
            general_purpose::URL_SAFE_NO_PAD.encode(key.0)
        ))
    }

    /// Check a password attempt against a stored hash
    pub fn verify(password: &str, encoded: &str) -> Result<bool, AuthError> {
        let mut parts = encoded.split('$');
        let (scheme, salt, digest) = match (parts.next(), parts.next(), parts.next(), parts.next())
        {
            (Some(scheme), Some(salt), Some(digest), None) => (scheme, salt, digest),
            _ => return Err(AuthError::InvalidHashFormat),
        };

        if scheme != SCHEME {
            return Err(AuthError::InvalidHashFormat);
        }

        let salt = general_purpose::URL_SAFE_NO_PAD.decode(salt)?;
        let expected = general_purpose::URL_SAFE_NO_PAD.decode(digest)?;

        if salt.len() != SALT_LEN || expected.len() != KEY_LEN {
            return Err(AuthError::InvalidHashFormat);
        }

        let key = derive_key(password, &salt)?;
        Ok(constant_time_eq(&key.0, &expected))
    }
}

/// Claims carried by an access token. The subject is the owner's public id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys for access tokens (HS256)
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a token for the given owner, valid for `ttl`
    pub fn issue(&self, owner_id: Uuid, ttl: chrono::Duration) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: owner_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|_| AuthError::TokenCreation)
    }

    /// Verify a token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let encoded = Password::hash("correct horse battery staple").unwrap();

        assert!(Password::verify("correct horse battery staple", &encoded).unwrap());
        assert!(!Password::verify("incorrect horse", &encoded).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = Password::hash("same password").unwrap();
        let second = Password::hash("same password").unwrap();

        // Same password hashed twice must produce different salts and digests
        assert_ne!(first, second);
        assert!(Password::verify("same password", &first).unwrap());
        assert!(Password::verify("same password", &second).unwrap());
    }

    #[test]
    fn test_malformed_hash_rejected() {
        assert!(Password::verify("pw", "not-a-hash").is_err());
        assert!(Password::verify("pw", "md5$abc$def").is_err());
        assert!(Password::verify("pw", "hkdf-sha256$!!!$!!!").is_err());
    }

    #[test]
    fn test_token_roundtrip() {
        let keys = TokenKeys::from_secret(b"test secret");
        let owner_id = Uuid::new_v4();

        let token = keys.issue(owner_id, chrono::Duration::minutes(15)).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, owner_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = TokenKeys::from_secret(b"test secret");

        // Well past the default validation leeway
        let token = keys
            .issue(Uuid::new_v4(), chrono::Duration::seconds(-300))
            .unwrap();

        assert!(matches!(keys.verify(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let keys = TokenKeys::from_secret(b"test secret");
        let other = TokenKeys::from_secret(b"another secret");

        let token = keys.issue(Uuid::new_v4(), chrono::Duration::minutes(15)).unwrap();

        assert!(matches!(other.verify(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let keys = TokenKeys::from_secret(b"test secret");

        assert!(matches!(
            keys.verify("not.a.token"),
            Err(AuthError::TokenInvalid)
        ));
    }
}
