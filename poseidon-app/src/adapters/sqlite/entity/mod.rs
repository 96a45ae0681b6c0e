//! `SeaORM` entities.

pub mod server;
