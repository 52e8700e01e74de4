//! Configuration module
//!
//! Application-level configuration plus the rewriter's field-name settings.

pub mod app_config;
mod rewrite_config;

pub use app_config::AppConfig;
pub use rewrite_config::RewriteConfig;
