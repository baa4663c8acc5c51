pub mod aggregate;
pub mod artifact;
pub mod config;
pub mod data;
pub mod datasets;
pub mod errors;
pub mod filter;
pub mod logging;
pub mod model;
pub mod pages;
pub mod visual;
