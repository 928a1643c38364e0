pub mod client;
pub mod envelope;
pub mod error;
pub mod movies;
pub mod traits;
pub mod troupe;
pub mod user;

mod http;

pub use client::ApiClient;
pub use envelope::{Collection, Envelope};
pub use error::{ApiError, ErrorKind};
pub use movies::SortOrder;
pub use traits::MovieStore;
