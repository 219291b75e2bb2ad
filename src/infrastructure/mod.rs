pub mod config;
pub mod sqlite_repo;
