use clap::Parser;
use open_waveform_lib::cli::Cli;
use open_waveform_lib::utils::ErrorResponse;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    open_waveform_lib::init_tracing();

    let cli = Cli::parse();
    if let Err(e) = open_waveform_lib::run(cli).await {
        tracing::error!("{}", e);
        let response = ErrorResponse::from(e);
        eprintln!("{}", serde_json::to_string(&response)?);
        std::process::exit(1);
    }

    Ok(())
}
