//! `notesvc` - An in-memory notes service with a REST interface
//!
//! This library provides the note store, its HTTP surface, and the
//! configuration and logging plumbing for the `notesvc` binary.
//!
//! Notes are addressed by position: a note's id is its index in the store at
//! the time of the request, and deleting a note shifts every later id down.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod note;
pub mod server;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use note::{Info, Note, NoteId, NoteList, NoteRequest};
pub use store::NoteStore;
