use farmgraph::Advisor;

/// Holds the configuration for a FarmGraph web server.
pub struct ServerConfig {
    /// The advisor that answers the requests.
    pub advisor: Advisor,
    /// The IP address or DNS name and the port that the socket binds to.
    pub bind: String,
    /// Whether CORS is enabled.
    pub cors: bool,
}
