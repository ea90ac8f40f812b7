//! Storage boundary: journal notes and user accounts over a Supabase-style
//! PostgREST endpoint. The prediction pipeline never touches this crate;
//! callers predict first, then persist.

mod client;
mod error;
mod notes;
mod users;

pub use error::StoreError;
pub use notes::{NoteStore, SeriesPoint};
pub use users::UserStore;
