//! `objscan serve`

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use objscan_config::{ScanConfig, ValidationReport};
use objscan_gateway::{start_server, GatewayState};
use tracing::info;

use crate::config::build_detector;

pub async fn run(
    config: &ScanConfig,
    report: ValidationReport,
    port: Option<u16>,
    bind: Option<String>,
) -> Result<()> {
    report.log();
    report.into_result()?;

    let server = config.server();
    let addr = socket_addr(
        bind.as_deref().unwrap_or(server.bind()),
        port.unwrap_or(server.port()),
    )?;

    // Built before binding so a missing credential stops startup.
    let provider = config.provider();
    let detector = build_detector(&provider)?;
    info!(
        addr = %addr,
        provider = %provider.kind(),
        model = %provider.model(),
        max_upload_bytes = server.max_upload_bytes(),
        "Starting objscan gateway"
    );

    start_server(addr, GatewayState::new(detector, server.max_upload_bytes())).await
}

fn socket_addr(bind: &str, port: u16) -> Result<SocketAddr> {
    let ip: IpAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address '{bind}'"))?;
    Ok(SocketAddr::new(ip, port))
}
