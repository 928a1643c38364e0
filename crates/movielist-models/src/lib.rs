pub mod dates;
pub mod error;
pub mod list_entry;
pub mod movie;
pub mod review;
pub mod troupe;
pub mod user;
pub mod wire;

pub use dates::parse_api_date;
pub use error::ModelError;
pub use list_entry::{ListEntry, ListFilter, ListFlags, MovieRef};
pub use movie::{MovieDetails, MovieRecord, MovieSummary};
pub use review::{Review, ReviewDraft, ReviewRecord};
pub use troupe::{Troupe, TroupeRecord};
pub use user::{User, UserRecord};
