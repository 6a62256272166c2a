use clap::{Args, Parser, Subcommand, ValueEnum};
use cloudfront_signatures::pem;
use miette::{Result, miette};
use std::{
    path::PathBuf,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct Expiration {
    /// Expiration as a Unix timestamp (in seconds)
    #[arg(long)]
    pub expires_at: Option<u64>,

    /// Expiration relative to now (in seconds)
    #[arg(long)]
    pub expires_in: Option<u64>,
}

impl Expiration {
    /// Resolve the expiration into a point in time
    ///
    /// Errors out if the point in time can't be represented on this platform
    pub fn to_system_time(&self) -> Result<SystemTime> {
        let expiration = match (self.expires_at, self.expires_in) {
            (Some(expires_at), _) => UNIX_EPOCH.checked_add(Duration::from_secs(expires_at)),
            (None, expires_in) => {
                SystemTime::now().checked_add(Duration::from_secs(expires_in.unwrap_or_default()))
            }
        };

        expiration.ok_or_else(|| {
            miette!(
                help = "pick an expiration closer to the present",
                "Expiration is out of range"
            )
        })
    }
}

#[derive(Args)]
pub struct SignUrl {
    /// URL to sign
    pub url: String,

    #[command(flatten)]
    pub expiration: Expiration,
}

#[derive(Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Query string parameters
    Query,

    /// Cookies
    Cookies,
}

#[derive(Args)]
pub struct SignPolicy {
    /// Path to the policy JSON document
    pub policy_path: PathBuf,

    /// Whether to list the query string parameters or the cookies
    #[arg(
        default_value_t = OutputFormat::Query,
        long,
        short,
        value_enum,
    )]
    pub format: OutputFormat,

    /// Append the query string parameters to this URL instead of listing them
    #[arg(long, conflicts_with = "format")]
    pub url: Option<String>,
}

#[derive(Args)]
pub struct PemFormat {
    /// Key material as a single line of Base64
    pub key: String,

    /// Label of the PEM document
    #[arg(default_value = pem::RSA_PRIVATE_KEY, long, short)]
    pub label: String,
}

#[derive(Subcommand)]
pub enum ToolSubcommand {
    /// Sign a URL using a canned policy
    SignUrl(SignUrl),

    /// Sign a custom policy read from a JSON file
    SignPolicy(SignPolicy),

    /// Wrap single-line key material into a PEM document
    PemFormat(PemFormat),
}

#[derive(Parser)]
#[command(about, name = "cloudfront-sign", version)]
pub struct ToolArgs {
    #[clap(subcommand)]
    pub command: ToolSubcommand,
}
