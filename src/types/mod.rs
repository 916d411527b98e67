pub mod config;
pub mod context;
pub mod matrix;
pub mod scoring;
