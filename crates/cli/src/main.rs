use anyhow::Context;
use clap::Parser;
use ruledns_domain::CliOverrides;
use std::net::SocketAddr;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ruledns")]
#[command(version)]
#[command(about = "ruledns - rule-driven DNS responder with upstream forwarding")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Rules file path
    #[arg(short = 'r', long, value_name = "FILE")]
    rules: Option<String>,

    /// Upstream resolver (IP:PORT) for queries no rule matches
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Compile the rules file, report the result and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        rules_path: cli.rules.clone(),
        upstream: cli.upstream.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    let rules = bootstrap::load_rules(&config.rules.path)?;

    if cli.check {
        println!("{}: {} rules OK", config.rules.path, rules.len());
        return Ok(());
    }

    info!("Starting ruledns v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = cli.config.clone().or_else(ruledns_domain::Config::get_config_path) {
        info!(path = %path, "Configuration file loaded");
    }

    let services = di::DnsServices::new(&config, rules).await?;

    let listen = config.server.listen_addr();
    let dns_addr: SocketAddr = listen
        .parse()
        .with_context(|| format!("Invalid listen address {}", listen))?;

    tokio::select! {
        result = server::start_dns_server(dns_addr, services) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    info!("Server shutdown complete");
    Ok(())
}
