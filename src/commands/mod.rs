pub mod config;
mod fetch;
mod info;
mod resolve;

pub use config::{Config, DEFAULT_TIMEOUT_SECS, NetworkOptions};
pub use fetch::{FetchOptions, Packager, fetch, run};
pub use info::{info, render_info};
pub use resolve::{print_assets, resolve_assets};
