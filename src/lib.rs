#![forbid(unsafe_code)]

pub mod cli;
pub mod dims;
pub mod enrich;
pub mod fetch;
pub mod formats;
pub mod logging;
pub mod merge;
pub mod metadata;
pub mod store;
