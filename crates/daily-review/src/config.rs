use anyhow::{bail, Result};
use std::env;
use std::path::PathBuf;
use technical_analysis::InstrumentProfile;

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewConfig {
    // Collaborators
    pub input_path: PathBuf,  // JSON array of daily candles
    pub output_path: PathBuf, // data.json

    // Narrative
    pub profile: InstrumentProfile,
}

impl ReviewConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, environment-style.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = InstrumentProfile::default();

        let config = Self {
            input_path: lookup("REVIEW_INPUT_PATH").map(PathBuf::from).unwrap_or_default(),
            output_path: lookup("REVIEW_OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data.json")),
            profile: InstrumentProfile {
                instrument: lookup("REVIEW_INSTRUMENT").unwrap_or(defaults.instrument),
                currency: lookup("REVIEW_CURRENCY").unwrap_or(defaults.currency),
                price_unit: lookup("REVIEW_PRICE_UNIT").unwrap_or(defaults.price_unit),
                volume_unit: lookup("REVIEW_VOLUME_UNIT").unwrap_or(defaults.volume_unit),
            },
        };

        Ok(config)
    }

    /// Applies `--input <path>` / `--output <path>` overrides.
    pub fn apply_args(&mut self, args: &[String]) {
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .map(PathBuf::from)
        };

        if let Some(input) = value_of("--input") {
            self.input_path = input;
        }
        if let Some(output) = value_of("--output") {
            self.output_path = output;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            bail!("REVIEW_INPUT_PATH (or --input) must be set");
        }
        if self.output_path.as_os_str().is_empty() {
            bail!("REVIEW_OUTPUT_PATH must not be empty");
        }
        if self.profile.instrument.trim().is_empty() {
            bail!("REVIEW_INSTRUMENT must not be empty");
        }
        Ok(())
    }
}
