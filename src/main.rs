use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = sheethook::cli::Cli::parse();
    if let Err(e) = sheethook::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
