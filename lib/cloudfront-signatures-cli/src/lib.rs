use self::args::{OutputFormat, SignPolicy, ToolSubcommand};
use clap::Parser;
use cloudfront_signatures::{Policy, Signature, Signer, pem};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::{ffi::OsString, fs, io::Write};
use tracing::debug;

pub use self::{args::ToolArgs, config::Configuration};

mod args;
mod config;

fn write_signature<W>(sink: &mut W, signature: &Signature, args: &SignPolicy) -> Result<()>
where
    W: Write,
{
    if let Some(ref url) = args.url {
        writeln!(sink, "{}", signature.add_to_url(url)).into_diagnostic()?;
        return Ok(());
    }

    let pairs = match args.format {
        OutputFormat::Query => signature
            .to_query_string_params()
            .map(|(name, value)| (name.to_string(), value)),
        OutputFormat::Cookies => signature.to_cookies(),
    };

    for (name, value) in pairs {
        writeln!(sink, "{name}={value}").into_diagnostic()?;
    }

    Ok(())
}

pub fn run<W>(config: &Configuration, sink: &mut W, args: ToolArgs) -> Result<()>
where
    W: Write,
{
    match args.command {
        ToolSubcommand::SignUrl(args) => {
            let key_pair = config.key_pair()?;
            let expiration = args.expiration.to_system_time()?;
            let signed_url = Signer::new(&key_pair).sign_url(&args.url, expiration)?;

            writeln!(sink, "{signed_url}").into_diagnostic()?;
        }
        ToolSubcommand::SignPolicy(args) => {
            let key_pair = config.key_pair()?;
            let raw_policy = fs::read(&args.policy_path)
                .into_diagnostic()
                .wrap_err_with(|| {
                    format!("Failed to read policy from {}", args.policy_path.display())
                })?;

            let policy: Policy = serde_json::from_slice(&raw_policy)
                .into_diagnostic()
                .wrap_err("Malformed policy document")?;
            debug!(statements = policy.statement.len(), "parsed policy");

            let signature = Signer::new(&key_pair).sign(&policy)?;
            write_signature(sink, &signature, &args)?;
        }
        ToolSubcommand::PemFormat(args) => {
            writeln!(sink, "{}", pem::format(&args.key, &args.label)).into_diagnostic()?;
        }
    }

    Ok(())
}

pub fn handle<W, I>(config: &Configuration, sink: &mut W, input: I) -> Result<()>
where
    W: Write,
    I: IntoIterator,
    <I as IntoIterator>::Item: Into<OsString> + Clone,
{
    let args = ToolArgs::try_parse_from(input).into_diagnostic()?;
    run(config, sink, args)
}
