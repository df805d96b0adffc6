use std::net::{IpAddr, Ipv4Addr};

use clap::Args;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_PORT_RETRIES: u32 = 10;

/// HTTP server settings. Port and CORS origin can also come from the
/// environment.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to bind
    #[arg(long, short, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Origin allowed to call the API from a browser
    #[arg(long, env = "CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    pub cors_origin: String,

    /// How many following ports to try when the port is already in use
    #[arg(long, default_value_t = DEFAULT_PORT_RETRIES)]
    pub port_retries: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            port_retries: DEFAULT_PORT_RETRIES,
        }
    }
}
