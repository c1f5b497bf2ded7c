//! Error types shared by the connection helpers

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
