pub mod message;
pub mod bundle;
pub mod event;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use bundle::GeneratedCode;
pub use error::SitegenError;
pub type Result<T> = std::result::Result<T, SitegenError>;
