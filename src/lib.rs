mod macros;

pub mod bot;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod problemset;
pub mod service;
pub mod statement;

pub use config::Config;
pub use error::LookupError;
pub use service::{ProblemPayload, ProblemService};
