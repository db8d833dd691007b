//! Object storage: upload key generation and SigV4 presigned upload URLs.
//!
//! Uploads never pass through this service. Clients ask for a presigned PUT
//! URL, upload straight to the bucket, then store the returned key on the
//! content row.

mod key;
mod presign;
mod public;

pub use key::{ObjectKey, ObjectKeyError};
pub use presign::{PresignError, Presigner};
pub use public::object_url;
