use std::{io, process::ExitCode};

use clap::Parser;
use escrow_deploy_scripts::{
    cli::Cli,
    commands::{report, run_deployment},
    utils::setup_logging,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging();

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let setup = cli
        .client()
        .and_then(|client| Ok((client, cli.deployment_request()?)));

    let code = match setup {
        Ok((client, request)) => {
            run_deployment(&client, &request, &mut stdout, &mut stderr).await
        }
        Err(e) => report(&cli.contract, Err(e), &mut stdout, &mut stderr),
    };

    ExitCode::from(code)
}
