//! Found-pet bot — a chat wizard that collects found-animal reports and
//! publishes them.

pub mod bot;
pub mod channels;
pub mod config;
pub mod error;
pub mod publish;
pub mod storage;
pub mod submission;
pub mod wizard;
