pub mod error;
pub mod platform;
pub mod seed;
pub mod user;

pub use platform::Platform;
