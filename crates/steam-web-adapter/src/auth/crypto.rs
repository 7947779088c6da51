/*
[INPUT]:  RSA modulus/exponent (hex or DER), plaintext bytes, session keys
[OUTPUT]: RSA PKCS#1 v1.5 ciphertext and Steam-format AES session encryption
[POS]:    Auth layer - cryptographic primitives for the login handshake
[UPDATE]: When changing padding, key sources or symmetric format
*/

use aes::Aes256;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, BlockEncryptMut, KeyInit, KeyIvInit, block_padding::Pkcs7};
use rand::RngCore;
use rand::rngs::OsRng;
use rsa::pkcs8::DecodePublicKey;
use rsa::{BigUint, Pkcs1v15Encrypt, RsaPublicKey};

use crate::http::{Result, SteamError};

/// Length of the random AES-256 session key
pub const SESSION_KEY_LEN: usize = 32;

const AES_BLOCK_LEN: usize = 16;

/// DER SubjectPublicKeyInfo of the Steam Public universe key
const PUBLIC_UNIVERSE_KEY_DER_HEX: &str = concat!(
    "30819D300D06092A864886F70D010101050003818B0030818702818100",
    "DFEC1AD62C10662C17353A14B07C59117F9DD3D82B7AE3E015CD191E46E87B87",
    "74A2184631A9031479828EE945A24912A923687389CF69A1B16146BDC1BEBFD6",
    "011BD881D4DC90FBFE4F527366CB9570D7C58EBA1C7A3375A1623446BB60B780",
    "68FA13A77A8A374B9EC6F45D5F3A99F99EC43AE963A2BB881928E0E714C04289",
    "020111",
);

/// RSA public key used to encrypt credentials and session keys
#[derive(Debug, Clone)]
pub struct RsaEncryptor {
    key: RsaPublicKey,
}

impl RsaEncryptor {
    /// Build from hex-encoded modulus and exponent (as served by getrsakey)
    pub fn from_hex(modulus: &str, exponent: &str) -> Result<Self> {
        let n = BigUint::from_bytes_be(&decode_hex("modulus", modulus)?);
        let e = BigUint::from_bytes_be(&decode_hex("exponent", exponent)?);
        let key = RsaPublicKey::new(n, e)
            .map_err(|e| SteamError::crypto(format!("invalid RSA public key: {e}")))?;
        Ok(Self { key })
    }

    /// Build from a DER-encoded SubjectPublicKeyInfo
    pub fn from_public_key_der(der: &[u8]) -> Result<Self> {
        let key = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| SteamError::crypto(format!("invalid RSA public key DER: {e}")))?;
        Ok(Self { key })
    }

    /// Steam's Public universe key
    pub fn public_universe() -> Result<Self> {
        Self::from_public_key_der(&decode_hex("universe key", PUBLIC_UNIVERSE_KEY_DER_HEX)?)
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.key
    }

    /// Encrypt with PKCS#1 v1.5 padding
    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.key
            .encrypt(&mut OsRng, Pkcs1v15Encrypt, data)
            .map_err(|e| SteamError::crypto(format!("RSA encryption failed: {e}")))
    }
}

/// Random AES-256 session key
pub fn generate_session_key() -> [u8; SESSION_KEY_LEN] {
    let mut key = [0u8; SESSION_KEY_LEN];
    OsRng.fill_bytes(&mut key);
    key
}

/// Encrypt `input` the way Steam expects session-keyed payloads.
///
/// Output is `AES-ECB(key, iv) || AES-CBC-PKCS7(key, iv, input)` with a
/// random 16-byte IV.
pub fn symmetric_encrypt(input: &[u8], key: &[u8; SESSION_KEY_LEN]) -> Result<Vec<u8>> {
    let mut iv = [0u8; AES_BLOCK_LEN];
    OsRng.fill_bytes(&mut iv);

    let key = GenericArray::from_slice(key);

    let mut encrypted_iv = GenericArray::clone_from_slice(&iv);
    Aes256::new(key).encrypt_block(&mut encrypted_iv);

    let ciphertext = cbc::Encryptor::<Aes256>::new(key, GenericArray::from_slice(&iv))
        .encrypt_padded_vec_mut::<Pkcs7>(input);

    let mut output = Vec::with_capacity(AES_BLOCK_LEN + ciphertext.len());
    output.extend_from_slice(&encrypted_iv);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

fn decode_hex(what: &str, value: &str) -> Result<Vec<u8>> {
    let value = value.trim();
    let decoded = if value.len() % 2 == 1 {
        hex::decode(format!("0{value}"))
    } else {
        hex::decode(value)
    };
    decoded.map_err(|e| SteamError::crypto(format!("invalid {what} hex: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes::cipher::{BlockDecrypt, BlockDecryptMut};
    use rsa::RsaPrivateKey;
    use rsa::traits::PublicKeyParts;

    fn test_key() -> RsaPrivateKey {
        RsaPrivateKey::new(&mut OsRng, 1024).expect("RSA keygen")
    }

    #[test]
    fn test_rsa_encrypt_from_hex_roundtrip() {
        let private = test_key();
        let modulus = hex::encode_upper(private.n().to_bytes_be());
        let exponent = hex::encode_upper(private.e().to_bytes_be());

        let encryptor = RsaEncryptor::from_hex(&modulus, &exponent).unwrap();
        let ciphertext = encryptor.encrypt(b"hunter2").unwrap();

        assert_eq!(ciphertext.len(), private.size());
        let plaintext = private.decrypt(Pkcs1v15Encrypt, &ciphertext).unwrap();
        assert_eq!(plaintext, b"hunter2");
    }

    #[test]
    fn test_odd_length_exponent_hex() {
        let private = test_key();
        let modulus = hex::encode(private.n().to_bytes_be());

        // 65537 written without its leading zero nibble
        let encryptor = RsaEncryptor::from_hex(&modulus, "10001").unwrap();
        assert_eq!(encryptor.public_key().e(), &BigUint::from(65537u32));
    }

    #[test]
    fn test_invalid_hex_is_crypto_error() {
        let err = RsaEncryptor::from_hex("zz", "010001").unwrap_err();
        assert!(matches!(err, SteamError::Crypto { .. }));
    }

    #[test]
    fn test_public_universe_key() {
        let encryptor = RsaEncryptor::public_universe().unwrap();
        assert_eq!(encryptor.public_key().size(), 128);
        assert_eq!(encryptor.public_key().e(), &BigUint::from(17u32));

        let ciphertext = encryptor.encrypt(&generate_session_key()).unwrap();
        assert_eq!(ciphertext.len(), 128);
    }

    #[test]
    fn test_symmetric_encrypt_decrypts() {
        let key = generate_session_key();
        let output = symmetric_encrypt(b"login-key-value", &key).unwrap();

        // one IV block plus one padded data block
        assert_eq!(output.len(), 32);

        let key = GenericArray::from_slice(&key);
        let (encrypted_iv, ciphertext) = output.split_at(AES_BLOCK_LEN);
        let mut iv = GenericArray::clone_from_slice(encrypted_iv);
        Aes256::new(key).decrypt_block(&mut iv);

        let plaintext = cbc::Decryptor::<Aes256>::new(key, &iv)
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .unwrap();
        assert_eq!(plaintext, b"login-key-value");
    }

    #[test]
    fn test_session_keys_differ() {
        assert_ne!(generate_session_key(), generate_session_key());
    }
}
