pub mod config;
pub mod error;
pub mod record;
pub mod store;
pub mod text;

pub use config::Config;
pub use error::*;
pub use record::*;
