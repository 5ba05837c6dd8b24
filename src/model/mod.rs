pub mod catalog;
pub mod config;
pub mod record;
pub mod selection;

pub use catalog::*;
pub use config::*;
pub use record::*;
pub use selection::*;
