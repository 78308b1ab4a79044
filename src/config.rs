use std::env;
use std::path::PathBuf;
use anyhow::{Result, ensure};
use log::info;

pub struct EnvPaths {
    pub options: PathBuf,
}

impl EnvPaths {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        Self {
            options: env::var("OPTIONS_PATH")
                .unwrap_or_else(|_| "options.json".to_string())
                .into(),
        }
    }

    pub fn validate(self) -> Result<Self> {
        info!("--- Checking env variables ---");
        info!("📄 Options: {:?}", self.options);

        ensure!(
            self.options.exists(),
            "Critical Error: options file {:?} not found! Set OPTIONS_PATH.",
            self.options
        );

        Ok(self)
    }
}
