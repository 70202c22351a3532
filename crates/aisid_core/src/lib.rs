pub mod analytics;
pub mod clock;
pub mod config;
pub mod demo;
pub mod domain;
pub mod error;
pub mod filter;
pub mod format;
pub mod ids;
pub mod normalize;
pub mod session;
pub mod store;
pub mod validate;
