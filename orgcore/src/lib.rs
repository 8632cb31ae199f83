pub mod agent;
#[cfg(feature = "audit")]
pub mod audit;
pub mod decision;
pub mod error;
pub mod organization;
pub mod permission;
pub mod platform;
pub mod role;
pub mod scope;
pub mod traits;
pub mod user;

#[cfg(feature = "chrono")]
pub(crate) mod chrono {
    #[cfg(not(test))]
    pub use ::chrono::Utc;
    #[cfg(test)]
    pub use test_org::chrono::Utc;
}
