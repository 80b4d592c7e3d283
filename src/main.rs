use std::io::Write;
use std::process::ExitCode;
use clap::Parser;
use sonar_gate::errors::ErrorHandler;
use sonar_gate::structs::cli::Cli;
use sonar_gate::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .try_init()?;

    match CommandRunner::new().run(cli).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            ErrorHandler::handle_error(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}
