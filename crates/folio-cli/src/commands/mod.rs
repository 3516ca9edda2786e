//! Command handlers

pub mod config;
pub mod draft;
pub mod history;
pub mod init;
pub mod publish;
pub mod status;
