//! Token minting shared by the server test suites. The service itself never
//! issues tokens.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

pub const SECRET: &str = "foo";

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

pub fn sign(claims: serde_json::Value, secret: &str) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// A one-hour token for user `id`, signed with `SECRET`.
pub fn token_for(id: i64) -> String {
    sign(
        json!({"username": "Admin", "id": id, "role": "admin", "exp": now() + 3600}),
        SECRET,
    )
}

#[allow(dead_code)]
pub fn foreign_token(id: i64) -> String {
    sign(
        json!({"username": "Invalid", "id": id, "exp": now() + 3600}),
        "wrong-secret",
    )
}

#[allow(dead_code)]
pub fn expired_token(id: i64) -> String {
    sign(json!({"id": id, "exp": now() - 3600}), SECRET)
}
