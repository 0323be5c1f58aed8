use anyhow::Result;
use clap::Parser;
use pkgchain::commands::{self, Config, OutputFormat};
use std::path::PathBuf;

/// pkgchain - dependency chain resolver
///
/// Resolve packages that each have at most one dependency into a single
/// dependency-first installation order.
///
/// Specs are either bare names ("app") or declarations ("app: lib",
/// "lib:"). Without a registry, declarations describe the whole package set.
///
/// Examples:
///   pkgchain resolve "A: B" "B: C"      # prints: C, B, A
///   pkgchain --registry reg.json resolve app tool
#[derive(Parser, Debug)]
#[command(author, version = env!("PKGCHAIN_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Package registry file (JSON); also via PKGCHAIN_REGISTRY
    #[arg(
        long = "registry",
        short = 'r',
        env = "PKGCHAIN_REGISTRY",
        value_name = "PATH",
        global = true
    )]
    pub registry: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Resolve packages into an installation order
    Resolve(ResolveArgs),

    /// Show the dependency chain of one package
    Chain(ChainArgs),

    /// Check that every package in the registry resolves
    Check,
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Package specs, "name" or "name: dependency"
    #[arg(value_name = "SPEC")]
    pub specs: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ChainArgs {
    /// Package spec, "name" or "name: dependency"
    #[arg(value_name = "SPEC")]
    pub spec: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = Config::new(pkgchain::runtime::RealRuntime, cli.registry, cli.format);

    match cli.command {
        Commands::Resolve(args) => commands::resolve(config, &args.specs)?,
        Commands::Chain(args) => commands::chain(config, &args.spec)?,
        Commands::Check => commands::check(config)?,
    }
    Ok(())
}
