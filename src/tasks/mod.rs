//! Task records and the editing model around the task buffer.
//!
//! - [`codec`]: reading and writing the buffer text
//! - [`form`]: the candidate record and add/edit mode
//! - [`ops`]: structural edits (append, save, remove, bulk import)
//! - [`live`]: the newest-first list derived from the buffer
//! - [`state`]: the editor state and its command dispatch

pub mod codec;
pub mod form;
pub mod ids;
pub mod live;
pub mod ops;
pub mod record;
pub mod state;

pub use codec::{ParseError, ParsedBuffer, encode_tasks, read_tasks};
pub use form::{EditMode, FormField, FormState};
pub use ids::{IdSource, SystemIds};
pub use live::{LiveEntry, LiveList};
pub use ops::EditError;
pub use record::{TaskRecord, sample_tasks};
pub use state::{EditCommand, EditorState, Notice, Outcome, apply};
