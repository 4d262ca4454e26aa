// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod date_format;
pub mod error;
pub mod model;
pub mod paths;
