pub mod backend;
pub mod cli;
pub mod config;
pub mod engine;
pub mod models;
pub mod tui;

pub use backend::Backend;
pub use config::{Config, Profile};
pub use models::{Credential, Folder, Note, Task};
