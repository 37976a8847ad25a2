//! SQLite storage backend for the Bistro engine.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
