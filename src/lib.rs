pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod profiling;
pub mod srs;
pub mod state;
pub mod store;
pub mod trainer;

#[cfg(test)]
pub mod testing;
