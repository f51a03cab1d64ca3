pub mod post;
pub mod profile;
pub mod user;

pub use post::*;
pub use profile::*;
pub use user::*;

/// Fresh document id: the 24-hex-character form of a MongoDB ObjectId.
pub fn new_id() -> String {
    mongodb::bson::oid::ObjectId::new().to_hex()
}

/// Current time as Unix milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
