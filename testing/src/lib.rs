#[cfg(feature = "ac")]
pub mod ac;
#[cfg(feature = "chrono")]
pub mod chrono;

mod utils;
pub use utils::*;
