mod error;
mod playback;
mod token;

pub use error::*;
pub use playback::*;
pub use token::*;
