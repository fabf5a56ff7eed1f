mod log;
mod validate;

pub use log::LogCommands;
pub use validate::{LinksArgs, NamingArgs, ValidateCommands};
