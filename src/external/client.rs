use std::sync::LazyLock;
use std::time::Duration;

/// User-Agent sent with every API request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Global HTTP client instance
///
/// Initialized lazily on first access and shared by every dispatch, so
/// overlapping notifications reuse pooled connections.
///
/// # Features
/// - **Timeouts**: 30s request timeout, 10s connect timeout
/// - **Compression**: gzip responses
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
///
/// # Example
/// ```ignore
/// use opencode_pushover::external::client::HTTP_CLIENT;
///
/// async fn ping() -> Result<u16, reqwest::Error> {
///     let response = HTTP_CLIENT
///         .post("https://api.pushover.net/1/messages.json")
///         .send()
///         .await?;
///
///     Ok(response.status().as_u16())
/// }
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
});
