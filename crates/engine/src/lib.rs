//! Issue tracking engine library.
//!
//! ## Structure
//!
//! - `entities/` - Issue operations over the repository ports
//! - `infrastructure/` - Port traits and their Neo4j implementations
//! - `api/` - HTTP entry points
//! - `app` - Application composition
//! - `config` - Environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod entities;
pub mod infrastructure;

pub use app::App;
