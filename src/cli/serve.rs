//! `showcase serve`: HTTP site command.

use std::net::SocketAddr;
use std::path::Path;

use crate::server;

pub async fn run(config_path: Option<&Path>, bind: Option<SocketAddr>) -> anyhow::Result<()> {
    let mut config = super::load(config_path)?;
    if let Some(bind) = bind {
        config.bind = bind;
    }
    server::run_server(config).await?;
    Ok(())
}
