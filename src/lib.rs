//! Interactive controls for the Tost Q&A site: likes, comment threads, answers
//! with solution marking, and the profile tabs, each talking to the site's
//! REST API.

pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use config::{Config, PageContext};
pub use error::{AppError, Result};
pub use state::AppState;
