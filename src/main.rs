use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tinysh::config::{Config, ConfigLoader};
use tinysh::executor::DefaultExecutor;
use tinysh::shell::Shell;

#[derive(Parser, Debug)]
#[command(name = "tinysh", version, about = "A tiny interactive shell")]
struct Args {
    /// Run a single command line and exit with its status
    #[arg(short = 'c', value_name = "LINE")]
    command: Option<String>,

    /// Config file (defaults to ~/.tinyshrc)
    #[arg(long, env = "TINYSH_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

fn init_tracing(args: &Args, config: &Config) {
    let level = if args.debug {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("warn")
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() {
    let args = Args::parse();

    let loaded = ConfigLoader::load(args.config.as_deref());
    let config = loaded.as_ref().cloned().unwrap_or_else(|_| ConfigLoader::default_config());
    init_tracing(&args, &config);
    if let Err(e) = &loaded {
        warn!(error = %e, "config error, using defaults");
    }

    let mut shell = Shell::new(DefaultExecutor::new(), &config);

    if let Some(line) = &args.command {
        shell.run_line(line);
        process::exit(shell.last_status());
    }

    if let Err(e) = shell.run(io::stdin().lock()) {
        eprintln!("tinysh: {}", e);
        process::exit(1);
    }
}
