pub mod account;
pub mod catalog;
pub mod error;
pub mod io;
pub mod mission;
pub mod narrative;
pub mod paths;
pub mod profile;
pub mod record;
pub mod settings;
pub mod types;

pub use error::{Result, VeilError};
