//! Accepts TCP connections and prints the request each one sends.

use tcphttp::config::Config;
use tcphttp::http::parser::read_request;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    tracing::info!("Listening on {}", cfg.server.listen_addr);

    loop {
        let (mut socket, peer) = listener.accept().await?;
        tracing::info!("Accepted connection from {}", peer);

        let req = match read_request(&mut socket, cfg.server.read_buffer_size).await {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!(peer = %peer, error = %e, "Could not parse request");
                continue;
            }
        };

        println!("Request line:");
        println!("- Method: {}", req.method());
        println!("- Target: {}", req.target());
        println!("- Version: {}", req.version());
        println!("Headers:");
        for (name, value) in req.headers.iter() {
            println!("- {}: {}", name, value);
        }
        println!("Body:");
        println!("{}", String::from_utf8_lossy(&req.body));

        tracing::info!("Connection to {} closed", peer);
    }
}
