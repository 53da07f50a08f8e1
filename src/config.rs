/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port to listen on
    pub port: u16,
}

const DEFAULT_PORT: u16 = 8000;

impl Config {
    /// Load config from environment variables.
    ///
    /// `PORT` selects the listening port; unset or unparseable values fall
    /// back to 8000, in keeping with the rest of the app never rejecting bad
    /// input.
    pub fn from_env() -> Self {
        let port = match std::env::var("PORT") {
            Ok(raw) => match raw.trim().parse() {
                Ok(port) => port,
                Err(_) => {
                    tracing::warn!("Invalid PORT value {raw:?}, using default {DEFAULT_PORT}");
                    DEFAULT_PORT
                }
            },
            Err(_) => DEFAULT_PORT,
        };
        Self { port }
    }
}
