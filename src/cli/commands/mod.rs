pub mod archive;
pub mod config;
pub mod fetch;
pub mod init;
