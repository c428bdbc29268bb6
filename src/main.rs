use clap::Parser;
use utility_api::cli::{Cli, Commands};
use utility_api::{Config, init_tracing, run};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // `init` writes the config, so there may be nothing to load yet.
    let config = if cli.command == Some(Commands::Init) {
        Config::default()
    } else {
        Config::load(cli.config.as_deref())?
    };

    init_tracing(&config);

    let worker_threads = config.general.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build()?;
    runtime.block_on(run(cli, config))
}
