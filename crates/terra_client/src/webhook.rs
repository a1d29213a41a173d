use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::collections::HashSet;
use tokio::sync::RwLock;

type HmacSha256 = Hmac<Sha256>;

/// Verify a `terra-signature` header of the form `t=<unix>,v1=<hex>`.
///
/// The MAC covers `"<t>.<raw body>"`, so the raw request bytes must be passed
/// before any JSON re-serialization.
pub fn verify_signature(secret: &SecretString, body: &[u8], signature_header: &str) -> bool {
    let Some((timestamp, sig_hex)) = parse_signature_header(signature_header) else {
        return false;
    };
    let sig = match hex::decode(sig_hex) {
        Ok(s) => s,
        Err(_) => return false,
    };
    let mut mac = match HmacSha256::new_from_slice(secret.expose_secret().as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    mac.verify_slice(&sig).is_ok()
}

fn parse_signature_header(header: &str) -> Option<(&str, &str)> {
    let mut timestamp = None;
    let mut signature = None;
    for part in header.split(',') {
        let (key, value) = part.trim().split_once('=')?;
        match key {
            "t" => timestamp = Some(value),
            "v1" => signature = Some(value),
            _ => {}
        }
    }
    Some((timestamp?, signature?))
}

/// In-memory dedupe set for webhook deliveries. The aggregation service
/// redelivers on timeout, so the same event can arrive more than once.
pub struct Deduper {
    seen: RwLock<HashSet<String>>,
}

impl Deduper {
    pub fn new() -> Self {
        Self {
            seen: RwLock::new(HashSet::new()),
        }
    }

    pub async fn is_duplicate(&self, uid: &str) -> bool {
        let mut lock = self.seen.write().await;
        if lock.contains(uid) {
            true
        } else {
            lock.insert(uid.to_string());
            false
        }
    }
}

impl Default for Deduper {
    fn default() -> Self {
        Self::new()
    }
}
