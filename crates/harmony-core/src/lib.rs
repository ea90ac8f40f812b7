pub mod note;
pub mod text;
pub mod user;

pub use note::{JournalNote, Metric, NewNote};
pub use text::preview;
pub use user::{NewUser, User, is_valid_email};
