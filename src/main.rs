//! clipsync CLI entry point

use std::process::ExitCode;

use clap::Parser;

use clipsync::cli::{
    app::{load_merged_config, resolve_options, run_sync, EXIT_USAGE_ERROR},
    args::Cli,
    presenter::Presenter,
};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new(cli.debug);

    // Merge config
    let config = load_merged_config(cli.to_config(), cli.config.clone(), &presenter).await;

    let options = match resolve_options(&config, cli.wrapped_command()) {
        Ok(options) => options,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    run_sync(options).await
}
