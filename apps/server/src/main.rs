use agri::domain::config::ApiConfig;
use agri::kernel::config::load_config;
use agri_logger::Logger;
use agri_server::{Server, build_runtime};
use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig = load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let _log = Logger::from_config(env!("CARGO_PKG_NAME"), &cfg.logging)?.init()?;

    let runtime = build_runtime(&cfg.runtime)?;
    runtime.block_on(async { Server::builder().config(cfg).build()?.run().await })
}
