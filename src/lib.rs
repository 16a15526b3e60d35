pub mod archive;
pub mod checksum;
pub mod cleanup;
pub mod commands;
pub mod download;
pub mod error;
pub mod http;
pub mod inspect;
pub mod package;
pub mod platform;
pub mod resolve;
pub mod runtime;
pub mod stage;
