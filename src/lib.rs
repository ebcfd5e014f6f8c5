use std::sync::{Arc, Mutex};

pub mod app;
pub mod config;
pub mod error;
pub mod errors;
pub mod notifier;
pub mod poller;
pub mod refresher;
pub mod server;
pub mod session;
pub mod spotify;
pub mod supervisor;
pub mod token;

pub use error::Error;

pub type Shared<T> = Arc<T>;
pub type Locked<T> = Mutex<T>;
