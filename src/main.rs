#[tokio::main]
async fn main() {
    if let Err(e) = safe_queue_monitor::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
