use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(log_directives(cli.verbose, env.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    commands::run_command(cli)
}

/// `--verbose` wins over `RUST_LOG`; without either, only warnings are shown.
fn log_directives(verbose: bool, env: Option<&str>) -> &str {
    if verbose {
        return "debug";
    }
    match env {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ => "warn",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_overrides_environment() {
        assert_eq!(log_directives(true, Some("slink_sdk=trace")), "debug");
        assert_eq!(log_directives(true, None), "debug");
    }

    #[test]
    fn environment_used_when_not_verbose() {
        assert_eq!(log_directives(false, Some("slink_sdk=trace")), "slink_sdk=trace");
    }

    #[test]
    fn defaults_to_warn() {
        assert_eq!(log_directives(false, None), "warn");
        assert_eq!(log_directives(false, Some("  ")), "warn");
    }
}
