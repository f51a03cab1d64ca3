use sha2::{Digest, Sha256};

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar";

/// Builds the avatar URL for an email: size 200, rating pg, "mystery man" fallback.
///
/// The hash is taken over the trimmed, lowercased address so the same
/// mailbox always maps to the same picture.
pub fn avatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!("{}/{:x}?s=200&r=pg&d=mm", GRAVATAR_BASE, digest)
}
