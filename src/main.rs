use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::dispatching::Dispatcher;
use teloxide::dptree;

extern crate pretty_env_logger;
#[macro_use] extern crate log;

use telegram_select_menu::choices::{choice_keys, ensure_correct_choice_keys, ensure_pagination_fits};

use crate::config::EnvPaths;
use crate::models::{AppConfig, SelectionStore};
use crate::options::AppOptions;

mod bot;
mod config;
mod models;
mod options;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    info!("🚀 Starting select menu BOT.");

    let paths = EnvPaths::load()
        .validate()
        .context("Error checking env variables.")?;

    let options = AppOptions::load(&paths.options)
        .context("Error load options.json.")?;

    ensure_correct_choice_keys(&options.menu.prefix, bot::menu::MENU_PATH, &choice_keys(&options.menu.choices))
        .context("Invalid menu choices in options.json.")?;
    ensure_pagination_fits(
        &options.menu.prefix,
        bot::menu::MENU_PATH,
        options.menu.choices.len(),
        options.menu.columns,
        options.menu.max_rows,
    )
    .context("Menu prefix leaves no room for page buttons.")?;

    info!("📋 Menu {:?} with {} choices", options.menu.prefix, options.menu.choices.len());

    let bot = bot::init(options.bot_token.clone());
    let topics = bot::menu::build_topics(&options.menu);
    let app_config = Arc::new(AppConfig {
        options,
        store: Arc::new(SelectionStore::default()),
        topics,
    });

    info!("✅ Run Dispatcher...");

    Dispatcher::builder(bot, bot::schema())
        .dependencies(dptree::deps![app_config])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Graceful Shutdown...");
    Ok(())
}
