/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for steam-web-adapter tests

use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use rsa::traits::PublicKeyParts;
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Generate a small RSA key standing in for Steam's per-account key
#[allow(dead_code)]
pub fn generate_test_rsa_key() -> RsaPrivateKey {
    RsaPrivateKey::new(&mut OsRng, 1024).expect("RSA keygen")
}

/// getrsakey response body serving `key`
#[allow(dead_code)]
pub fn rsa_key_body(key: &RsaPrivateKey) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "publickey_mod": hex::encode(key.n().to_bytes_be()),
        "publickey_exp": hex::encode(key.e().to_bytes_be()),
        "timestamp": "196980000000",
        "token_gid": "2f3f2a1b",
    })
}

/// A well-formed 64-bit Steam id
#[allow(dead_code)]
pub fn mock_steam_id() -> u64 {
    76561198000000000
}
