//! Client-side matching layer for a résumé/job matching service: submits
//! résumés, then normalizes, classifies and ranks what the service returns.

pub mod client;
pub mod config;
pub mod errors;
pub mod files;
pub mod flows;
pub mod models;
pub mod pipeline;
pub mod render;
