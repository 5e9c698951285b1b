//! Value objects - immutable types that represent domain concepts

mod emoji;
mod fingerprint;
mod image_ref;
mod post_id;
mod request_metadata;

pub use emoji::EmojiKind;
pub use fingerprint::{FingerprintSalt, ViewerFingerprint};
pub use image_ref::ImageRef;
pub use post_id::PostId;
pub use request_metadata::RequestMetadata;
