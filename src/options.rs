use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

use telegram_select_menu::buttons::align::{DEFAULT_BUTTON_COLUMNS, DEFAULT_BUTTON_ROWS};
use telegram_select_menu::Choice;

/// Bot settings read from `options.json`.
#[derive(Deserialize, Debug, Clone)]
pub struct AppOptions {
    pub bot_token: String,

    /// Users allowed to open the menu. Empty means everyone.
    /// Accepts `123`, `"123,456"` or `[123, 456]`.
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub allowed_users: Vec<u64>,

    pub menu: MenuOptions,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MenuOptions {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_columns")]
    pub columns: usize,
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    #[serde(default)]
    pub show_false_emoji: bool,
    pub choices: Vec<Choice>,
}

fn default_title() -> String {
    "Pick your topics:".to_string()
}

fn default_prefix() -> String {
    "topics".to_string()
}

fn default_columns() -> usize {
    DEFAULT_BUTTON_COLUMNS
}

fn default_max_rows() -> usize {
    DEFAULT_BUTTON_ROWS
}

impl AppOptions {
    /// Loads and validates the options file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        ensure!(path.exists(), "Configuration file not found: {:?}", path);

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file: {:?}", path))?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let options: AppOptions = serde_json::from_str(content)
            .context("JSON schema mismatch in options file")?;

        ensure!(!options.bot_token.is_empty(), "bot_token cannot be empty");
        ensure!(!options.menu.prefix.is_empty(), "menu.prefix cannot be empty");
        ensure!(!options.menu.choices.is_empty(), "menu.choices cannot be empty");
        ensure!(options.menu.columns > 0, "menu.columns must be at least 1");
        ensure!(options.menu.max_rows > 0, "menu.max_rows must be at least 1");

        Ok(options)
    }

    pub fn is_allowed(&self, user_id: u64) -> bool {
        self.allowed_users.is_empty() || self.allowed_users.contains(&user_id)
    }
}

fn deserialize_ids<'de, D>(deserializer: D) -> std::result::Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringIntOrList {
        Str(String),
        Int(u64),
        List(Vec<u64>),
    }

    match StringIntOrList::deserialize(deserializer)? {
        StringIntOrList::Int(i) => Ok(vec![i]),
        StringIntOrList::List(l) => Ok(l),
        StringIntOrList::Str(s) => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<u64>().map_err(serde::de::Error::custom))
            .collect(),
    }
}
