#![allow(dead_code)]

mod application;
mod permissions;

pub use application::{TestApp, Unavailable};
pub use permissions::Permissions;
