//! Secret encryption for stored profiles.
//!
//! API keys and CSRF tokens are stored AES-256-GCM encrypted and Base64
//! encoded as `[nonce (12 bytes)][ciphertext]`.

use crate::error::{Error, Result};
use aes_gcm::{
    Aes256Gcm,
    aead::{Aead, AeadCore, KeyInit, Nonce, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// Environment variable holding a Base64 encoded 32-byte key
pub const SECRET_KEY_ENV: &str = "AUTHCFG_SECRET_KEY";

/// Key used when no key is supplied through the environment.
///
/// Only obscures secrets at rest; set `AUTHCFG_SECRET_KEY` for real protection.
const BUILTIN_KEY: &[u8; 32] = b"authcfg-console-profile-secrets!";

const NONCE_LEN: usize = 12;

fn cipher() -> Result<Aes256Gcm> {
    match std::env::var(SECRET_KEY_ENV) {
        Ok(encoded) => {
            let key = BASE64.decode(encoded.trim()).map_err(|e| Error::Invalid {
                message: format!("{SECRET_KEY_ENV} is not valid Base64: {e}"),
            })?;
            Aes256Gcm::new_from_slice(&key).map_err(|_| Error::Invalid {
                message: format!("{SECRET_KEY_ENV} must decode to 32 bytes"),
            })
        }
        Err(_) => Ok(Aes256Gcm::new(BUILTIN_KEY.into())),
    }
}

/// Encrypt a secret for storage
pub fn encrypt(plain_text: &str) -> Result<String> {
    let cipher = cipher()?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plain_text.as_bytes())
        .map_err(|e| Error::Invalid {
            message: format!("Encryption failed: {e}"),
        })?;

    let mut combined = nonce.to_vec();
    combined.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(combined))
}

/// Decrypt a secret produced by [`encrypt`]
pub fn decrypt(cipher_text: &str) -> Result<String> {
    let data = BASE64.decode(cipher_text).map_err(|e| Error::Invalid {
        message: format!("Base64 decode failed: {e}"),
    })?;

    if data.len() < NONCE_LEN {
        return Err(Error::Invalid {
            message: "Ciphertext too short".to_string(),
        });
    }

    let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
    let nonce = Nonce::<Aes256Gcm>::from_slice(nonce_bytes);

    let plaintext = cipher()?
        .decrypt(nonce, ciphertext)
        .map_err(|e| Error::Invalid {
            message: format!("Decryption failed: {e}"),
        })?;

    String::from_utf8(plaintext).map_err(|e| Error::Invalid {
        message: format!("UTF-8 decode failed: {e}"),
    })
}

/// Mask a secret for display, keeping the last four characters
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}
