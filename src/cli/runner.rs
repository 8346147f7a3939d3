//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::cli::dataset::Dataset;
use crate::config::{load_settings, PaginationSettings};
use crate::cursor::codec_from_settings;
use crate::error::{Error, Result};
use crate::pagination::{PageRequest, PaginationPolicy};
use crate::types::JsonValue;
use serde_json::json;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Paginate {
                input,
                query,
                controls,
            } => self.paginate(input, query, *controls),
            Commands::Validate => self.validate(),
            Commands::Cursor { token } => self.cursor(token),
            Commands::Serve { input, port } => {
                let config = crate::cli::ServerConfig {
                    input: input.clone(),
                    settings: self.load_settings()?,
                };
                crate::cli::serve(config, *port).await
            }
        }
    }

    /// Load settings from the config file (defaults when absent)
    fn load_settings(&self) -> Result<PaginationSettings> {
        let mut settings = match &self.cli.config {
            Some(path) => load_settings(path)?,
            None => PaginationSettings::default(),
        };

        if let Some(strategy) = self.cli.strategy {
            settings.strategy = strategy;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Print one page of a JSON array file
    fn paginate(&self, input: &Path, query: &str, controls: bool) -> Result<()> {
        let settings = self.load_settings()?;
        let dataset = Dataset::load(input, &settings)?;
        let request = PageRequest::from_query(query);
        let page = dataset.paginate(&request)?;

        let mut output = serde_json::to_value(&page)?;

        if controls {
            let PaginationPolicy::PageNumber(paginator) = dataset.policy() else {
                return Err(Error::config(
                    "Navigation controls are only available for page_number pagination",
                ));
            };

            if let (Some(info), JsonValue::Object(map)) = (&page.page, &mut output) {
                map.insert(
                    "controls".to_string(),
                    serde_json::to_value(paginator.controls(info, &request))?,
                );
            }
        }

        self.output_message(&output);
        Ok(())
    }

    /// Validate settings
    fn validate(&self) -> Result<()> {
        let settings = self.load_settings()?;

        // The JSON policy adds its own checks (cursor needs an ordering field)
        let policy = PaginationPolicy::for_json(&settings)?;

        let mut shown = serde_json::to_value(&settings)?;
        if settings.cursor_secret.is_some() {
            shown["cursor_secret"] = json!("********");
        }

        self.output_message(&json!({
            "valid": true,
            "strategy": policy.kind(),
            "settings": shown,
        }));

        Ok(())
    }

    /// Decode a cursor token
    fn cursor(&self, token: &str) -> Result<()> {
        let settings = self.load_settings()?;
        let cursor = codec_from_settings(&settings)
            .decode(token)
            .map_err(|e| Error::invalid_cursor(&settings.cursor_param, e.detail()))?;

        self.output_message(&json!({
            "position": cursor.position,
            "reverse": cursor.reverse,
        }));

        Ok(())
    }

    /// Output a JSON message
    fn output_message(&self, msg: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
