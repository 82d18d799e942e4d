//! Resource types returned by the BigML API.

use serde::de::DeserializeOwned;
use std::fmt;

// We re-export everything from our support submodules.
pub use self::id::*;
pub use self::meta::*;
pub use self::status::*;

// We only re-export the main names from our resource submodules.  For any
// other types, use a fully-qualified name.
pub use self::dataset::{Dataset, DatasetResponse};

/// A shared interface to all BigML resource types.
pub trait Resource: fmt::Debug + DeserializeOwned + Send + Sync + 'static {
    /// The prefix used for all IDs of this type.
    fn id_prefix() -> &'static str;

    /// The ID of this resource.
    fn id(&self) -> &Id<Self>;
}

// Support modules defining general types.
mod id;
mod meta;
mod status;

// Individual resource types.
pub mod dataset;
