/// Default client disconnect timeout in seconds.
/// This is the time the server waits for cleanup after a client disconnects.
pub const DEFAULT_CLIENT_DISCONNECT_TIMEOUT_SECONDS: u64 = 5;

/// Seconds the server waits for in-flight requests on shutdown.
pub const SERVER_SHUTDOWN_TIMEOUT_SECONDS: u64 = 5;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_CONFIG_DIR: &str = "./config";
pub const DEFAULT_CONFIG_FILE_NAME: &str = "config.json";

/// Deadline for a single request handler. Covers a mint with its full
/// confirmation polling.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 90;
pub const REQUEST_TIMEOUT_MESSAGE: &str = "Request timed out";
