#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod console;
pub mod impls;

mod cli;
pub use cli::{Cli, Commands, PathOrStd, TokenCommand};

mod config;
pub use config::AppConfig;
