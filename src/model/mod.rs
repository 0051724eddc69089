//! Model layer - document buffer, edit history and the owning session

pub mod document;
pub mod history;
pub mod session;

pub use document::Document;
pub use history::{EditHistory, EditOperation};
pub use session::{Session, UnsavedChoice};
