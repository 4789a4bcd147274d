//! Rope-backed text editing for the task buffer and the bulk import box.

mod buffer;

pub use buffer::{Cursor, Direction, TextBuffer};
