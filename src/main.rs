use tcphttp::config::Config;
use tcphttp::http::request::Request;
use tcphttp::http::response::{StatusCode, default_headers};
use tcphttp::http::writer::{ResponseWriter, WriteError};
use tcphttp::server::{Handler, HandlerError, Server};
use tokio::io::AsyncWrite;

const PAGE_400: &str = "<html>
  <head><title>400 Bad Request</title></head>
  <body><h1>Bad Request</h1><p>That request could not be understood.</p></body>
</html>";

const PAGE_500: &str = "<html>
  <head><title>500 Internal Server Error</title></head>
  <body><h1>Internal Server Error</h1><p>Something went wrong on our side.</p></body>
</html>";

const PAGE_200: &str = "<html>
  <head><title>200 OK</title></head>
  <body><h1>Success!</h1><p>Your request was served.</p></body>
</html>";

struct Pages;

impl Handler for Pages {
    async fn handle<W>(&self, w: &mut ResponseWriter<W>, req: &Request) -> Result<(), HandlerError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        tracing::info!(method = %req.method(), target = %req.target(), "Serving page");

        let (status, page) = match req.target() {
            "/yourproblem" => (StatusCode::BadRequest, PAGE_400),
            "/myproblem" => (StatusCode::InternalServerError, PAGE_500),
            _ => (StatusCode::Ok, PAGE_200),
        };

        write_html(w, status, page)
            .await
            .map_err(|e| HandlerError::internal(e.to_string()))
    }
}

async fn write_html<W>(w: &mut ResponseWriter<W>, status: StatusCode, html: &str) -> Result<(), WriteError>
where
    W: AsyncWrite + Unpin,
{
    let mut headers = default_headers(html.len());
    headers.replace("Content-Type", "text/html");

    w.write_status_line(status).await?;
    w.write_headers(&headers).await?;
    w.write_body(html.as_bytes()).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let mut server = Server::serve(&cfg.server, Pages).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    server.close().await
}
