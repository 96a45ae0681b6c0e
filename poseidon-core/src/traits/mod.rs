//! Storage layer abstraction trait definition

mod server_record_store;

pub use server_record_store::{InMemoryServerRecordStore, ServerRecordStore};
