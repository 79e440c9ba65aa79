use clap::Parser;
use you_and_i::Config;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    if let Err(e) = you_and_i::run(config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
