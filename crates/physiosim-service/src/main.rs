use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use physiosim_core::AppConfig;
use physiosim_service::{route, AppState, HttpBody};

async fn handle_request(
    state: AppState,
    req: Request<hyper::body::Incoming>,
) -> Result<Response<HttpBody>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let resp = route(&state, &method, &path, req.uri().query());
    log::info!("{} {} -> {}", method, path, resp.status.as_u16());
    Ok(resp.into_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("loading configuration")?;
    let addr: SocketAddr = config
        .server
        .bind_addr()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server.bind_addr()))?;
    let state = AppState::new(config);

    let listener = TcpListener::bind(addr).await?;
    log::info!("physiosim-service listening on http://{}", addr);

    loop {
        let (stream, peer) = listener.accept().await?;
        let state_clone = state.clone();

        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            if let Err(e) = http1::Builder::new()
                .serve_connection(io, service_fn(move |req| handle_request(state_clone.clone(), req)))
                .await
            {
                log::warn!("connection error from {}: {:?}", peer, e);
            }
        });
    }
}
