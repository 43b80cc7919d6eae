//! RFID reading for the school bag.
//!
//! The reader is polled at a fixed rate. Each poll runs one complete tag
//! transaction ([`reader::read_once`]) and reduces it to a [`ReadOutcome`];
//! the [`TagDebouncer`] turns the noisy stream of outcomes into accepted
//! tags, which [`task::run_reader`] forwards to the content task.

pub mod debounce;
pub mod reader;
pub mod task;

pub use debounce::{DebounceConfig, ReadOutcome, TagDebouncer};
pub use reader::{ReaderConfig, read_once};
pub use task::run_reader;
