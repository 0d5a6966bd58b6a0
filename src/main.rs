#[tokio::main]
async fn main() {
    if let Err(e) = foliotrack::run().await {
        eprintln!("foliotrack: {}", e);
        std::process::exit(1);
    }
}
