pub mod cli;
pub mod error;
pub mod finder;
pub mod github;
pub mod output;
pub mod query;
pub mod server;
pub mod types;
pub mod view;
