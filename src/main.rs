use anyhow::Result;
use clap::Parser;
use pact_ffi_pkg::commands::{self, DEFAULT_TIMEOUT_SECS, FetchOptions, NetworkOptions};
use pact_ffi_pkg::http::MAX_RETRIES;
use pact_ffi_pkg::package::{DEFAULT_VERSION, PackageDescriptor};
use std::path::PathBuf;
use std::time::Duration;

/// pact-ffi-pkg - Pact FFI package builder
///
/// Downloads the prebuilt Pact FFI shared library and headers from the
/// pact-reference GitHub releases and stages them into lib/, bin/ and include/.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
///
/// Examples:
///   pact-ffi-pkg fetch                     # Package for the current host
///   pact-ffi-pkg fetch --os Windows -o out # Package the Windows DLL into ./out
///   pact-ffi-pkg resolve --os Linux        # Show what would be downloaded
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Release version of the FFI library
    #[arg(
        long = "pkg-version",
        env = "PACT_FFI_VERSION",
        value_name = "VERSION",
        default_value = DEFAULT_VERSION,
        global = true
    )]
    pub pkg_version: String,

    /// Repository URL the releases are served from
    #[arg(
        long = "base-url",
        env = "PACT_FFI_BASE_URL",
        value_name = "URL",
        global = true
    )]
    pub base_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Download, decompress and stage the package
    Fetch(FetchArgs),

    /// Print the download URLs for a platform without fetching
    Resolve(TargetArgs),

    /// Show package metadata and linkage
    Info(InfoArgs),
}

#[derive(clap::Args, Debug)]
pub struct TargetArgs {
    /// Target operating system (Windows, Linux, Macos); defaults to the host
    #[arg(long, value_name = "OS")]
    pub os: Option<String>,

    /// Target architecture; defaults to the host
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Package root directory
    #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Check each download against its published .sha256 file
    #[arg(long)]
    pub verify: bool,

    /// Attempts per download
    #[arg(long, value_name = "N", default_value_t = MAX_RETRIES)]
    pub retries: usize,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let descriptor = PackageDescriptor::new(&cli.pkg_version, cli.base_url.as_deref())?;

    match cli.command {
        Commands::Fetch(args) => {
            let options = FetchOptions {
                os: args.target.os,
                arch: args.target.arch,
                output: args.output,
                verify: args.verify,
            };
            let network = NetworkOptions {
                attempts: args.retries,
                timeout: Duration::from_secs(args.timeout),
            };
            commands::fetch(pact_ffi_pkg::runtime::RealRuntime, descriptor, options, network)
                .await?
        }
        Commands::Resolve(args) => {
            commands::print_assets(&descriptor, args.os.as_deref(), args.arch.as_deref())?
        }
        Commands::Info(args) => commands::info(&descriptor, args.json)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_fetch_defaults() {
        let cli = Cli::try_parse_from(["pact-ffi-pkg", "fetch"]).unwrap();
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.target.os, None);
                assert_eq!(args.target.arch, None);
                assert_eq!(args.output, PathBuf::from("."));
                assert!(!args.verify);
                assert_eq!(args.retries, 3);
                assert_eq!(args.timeout, 300);
            }
            _ => panic!("Expected Fetch command"),
        }
    }

    #[test]
    fn test_cli_fetch_with_target() {
        let cli = Cli::try_parse_from([
            "pact-ffi-pkg",
            "fetch",
            "--os",
            "Windows",
            "--arch",
            "x86_64",
            "-o",
            "/tmp/pkg",
            "--verify",
            "--retries",
            "1",
        ])
        .unwrap();
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.target.os.as_deref(), Some("Windows"));
                assert_eq!(args.target.arch.as_deref(), Some("x86_64"));
                assert_eq!(args.output, PathBuf::from("/tmp/pkg"));
                assert!(args.verify);
                assert_eq!(args.retries, 1);
            }
            _ => panic!("Expected Fetch command"),
        }
    }

    #[test]
    fn test_cli_global_version_and_base_url() {
        let cli = Cli::try_parse_from([
            "pact-ffi-pkg",
            "resolve",
            "--pkg-version",
            "0.1.0",
            "--base-url",
            "http://localhost:1234",
        ])
        .unwrap();
        assert_eq!(cli.pkg_version, "0.1.0");
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:1234"));
        assert!(matches!(cli.command, Commands::Resolve(_)));
    }

    #[test]
    fn test_cli_info_json() {
        let cli = Cli::try_parse_from(["pact-ffi-pkg", "info", "--json"]).unwrap();
        match cli.command {
            Commands::Info(args) => assert!(args.json),
            _ => panic!("Expected Info command"),
        }
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        let result = Cli::try_parse_from(["pact-ffi-pkg"]);
        assert!(result.is_err());
    }
}
