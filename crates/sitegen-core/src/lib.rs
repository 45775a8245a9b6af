pub mod ports;
pub mod event_bus;
pub mod throttle;
pub mod retry;
pub mod credentials;
pub mod client;
pub mod parser;
pub mod preview;
pub mod tree;
pub mod archive;
pub mod workspace;
