//! Thumbnail storage strategies.
//!
//! Every strategy implements [`ThumbnailStore`] and turns an uploaded image
//! into the reference string recorded on the video:
//!
//! - [`InlineEncoder`] -- a self-contained `data:<type>;base64,<payload>` URL.
//! - [`AssetWriter`] -- a file `<video_id>.<ext>` under the assets root,
//!   referenced by `http://<host>:<port>/assets/<video_id>.<ext>`.
//!
//! [`create_thumbnail_store`] picks one from configuration.

pub mod assets;
pub mod factory;
pub mod inline;
pub mod traits;

pub use assets::AssetWriter;
pub use factory::create_thumbnail_store;
pub use inline::InlineEncoder;
pub use traits::{StorageError, StorageResult, ThumbnailStore};
pub use tubely_core::storage::ThumbnailStorageKind;
