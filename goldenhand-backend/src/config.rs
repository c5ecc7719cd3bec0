use std::env;

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("GOLDENHAND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("GOLDENHAND_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("GOLDENHAND_PORT must be a valid port number"),
        }
    }
}
