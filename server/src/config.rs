use log::{info, warn};
use std::{env, fmt::Display, path::PathBuf, str::FromStr};

pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub client_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: try_load(&lookup, "BILLING_HOST", "127.0.0.1".to_string()),
            port: try_load(&lookup, "BILLING_PORT", 8000),
            data_dir: try_load(&lookup, "BILLING_DATA_DIR", PathBuf::from("data")),
            client_dir: try_load(&lookup, "BILLING_CLIENT_DIR", PathBuf::from("./client")),
        }
    }
}

fn try_load<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{} not set, using default", key);
            default
        }
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                warn!("Invalid {} value {:?}: {}, using default", key, raw, e);
                default
            }
        },
    }
}
