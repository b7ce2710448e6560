pub mod backend;
pub mod cache;
pub mod error;
pub mod helpers;
pub mod models;
pub mod run_tool;
pub mod synchronizer;
