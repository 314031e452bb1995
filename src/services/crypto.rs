use crate::domain::models::EncryptedPayload;
use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::AeadInPlace;
use aes_gcm::KeyInit;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

/// AES-256-GCM with a 128-bit nonce, to match the wire format where the IV
/// is 16 random bytes.
type RuleCipher = aes_gcm::AesGcm<aes_gcm::aes::Aes256, U16>;

const KDF_ITERATIONS: u32 = 100_000;
const KEY_LEN: usize = 32;
const SALT_LEN: usize = 16;
const IV_LEN: usize = 16;

#[derive(thiserror::Error, Debug)]
pub enum CryptoError {
    #[error("encryption failed")]
    Encrypt,
    /// Wrong password and corrupted data are deliberately not distinguished,
    /// so a failed decrypt cannot be used as a password-guessing oracle.
    #[error("invalid password or corrupted data")]
    Decrypt,
}

/// The salt is fed to the KDF in its hex-string form: the reference wire
/// format transports it that way and existing payloads depend on it.
fn derive_key(password: &str, salt_hex: &str) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt_hex.as_bytes(),
        KDF_ITERATIONS,
        &mut key,
    );
    key
}

/// Encrypt `plaintext` under a key derived from `password`.
///
/// A fresh salt and IV are drawn from the OS RNG on every call; reuse is
/// forbidden. The returned fields are hex-encoded and independently
/// transportable.
pub fn encrypt(plaintext: &str, password: &str) -> Result<EncryptedPayload, CryptoError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let salt_hex = hex::encode(salt);

    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let key = derive_key(password, &salt_hex);
    let cipher = RuleCipher::new(GenericArray::from_slice(&key));

    let mut buf = plaintext.as_bytes().to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&iv), b"", &mut buf)
        .map_err(|_| CryptoError::Encrypt)?;

    Ok(EncryptedPayload {
        ciphertext: hex::encode(buf),
        salt: salt_hex,
        iv: hex::encode(iv),
        auth_tag: hex::encode(tag),
    })
}

/// Decrypt a payload with the password it was encrypted under.
///
/// Every failure mode (malformed salt/iv/tag, tag mismatch, cipher error)
/// collapses into the single [`CryptoError::Decrypt`].
pub fn decrypt(payload: &EncryptedPayload, password: &str) -> Result<String, CryptoError> {
    let iv = hex::decode(&payload.iv).map_err(|_| CryptoError::Decrypt)?;
    let tag = hex::decode(&payload.auth_tag).map_err(|_| CryptoError::Decrypt)?;
    let mut buf = hex::decode(&payload.ciphertext).map_err(|_| CryptoError::Decrypt)?;
    if iv.len() != IV_LEN || tag.len() != 16 {
        return Err(CryptoError::Decrypt);
    }

    let key = derive_key(password, &payload.salt);
    let cipher = RuleCipher::new(GenericArray::from_slice(&key));
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(&iv),
            b"",
            &mut buf,
            GenericArray::from_slice(&tag),
        )
        .map_err(|_| CryptoError::Decrypt)?;

    String::from_utf8(buf).map_err(|_| CryptoError::Decrypt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_plaintext() {
        let payload = encrypt("## Rules\n- be concise\n", "Thunder!Frost42").unwrap();
        let plain = decrypt(&payload, "Thunder!Frost42").unwrap();
        assert_eq!(plain, "## Rules\n- be concise\n");
    }

    #[test]
    fn fresh_salt_and_iv_per_call() {
        let a = encrypt("same input", "same password").unwrap();
        let b = encrypt("same input", "same password").unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn wrong_password_fails() {
        let payload = encrypt("secret rules", "Storm#Blaze77").unwrap();
        let err = decrypt(&payload, "Storm#Blaze78").unwrap_err();
        assert_eq!(err.to_string(), "invalid password or corrupted data");
    }

    #[test]
    fn tampering_any_field_fails_closed() {
        let payload = encrypt("secret rules", "pw").unwrap();

        let flip = |s: &str| {
            let mut chars: Vec<char> = s.chars().collect();
            chars[0] = if chars[0] == '0' { '1' } else { '0' };
            chars.into_iter().collect::<String>()
        };

        for field in 0..4 {
            let mut tampered = payload.clone();
            match field {
                0 => tampered.ciphertext = flip(&tampered.ciphertext),
                1 => tampered.salt = flip(&tampered.salt),
                2 => tampered.iv = flip(&tampered.iv),
                _ => tampered.auth_tag = flip(&tampered.auth_tag),
            }
            assert!(decrypt(&tampered, "pw").is_err(), "field {} accepted", field);
        }
    }

    #[test]
    fn malformed_hex_is_a_decrypt_error() {
        let mut payload = encrypt("x", "pw").unwrap();
        payload.iv = "zz".to_string();
        assert!(matches!(decrypt(&payload, "pw"), Err(CryptoError::Decrypt)));
    }
}
