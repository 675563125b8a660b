//! Server configuration from the command line and environment.

use clap::Parser;
use std::time::Duration;

/// Matchmaking server for the 米-pattern three-in-a-row game.
#[derive(Parser, Debug, Clone)]
#[command(name = "mizi_server")]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Seconds between liveness pings
    #[arg(
        long,
        env = "HEARTBEAT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub heartbeat_secs: u64,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_secs)
    }
}
