use emailengine_cli::run_cli;

#[tokio::main]
async fn main() {
    // Run CLI and handle errors
    if let Err(e) = run_cli().await {
        // The verdict has already been printed to stdout
        if !matches!(e, emailengine_cli::CliError::InvalidSignature) {
            eprintln!("Error: {}", e);
        }

        std::process::exit(e.exit_code());
    }
}
