pub mod note;

pub use note::{Note, NoteData, NoteList};
