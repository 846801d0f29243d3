pub mod audit;
pub mod backup;
pub mod calculator;
pub mod checksum;
pub mod config;
pub mod leave;
pub mod log;
pub mod service;
pub mod signature;
pub mod store;
pub mod template;
pub mod workflow;
