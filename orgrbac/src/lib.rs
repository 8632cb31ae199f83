pub mod builder;
pub mod error;
pub mod policy;
pub mod simple;

pub use builder::Builder;
pub use policy::Policy;
