use anyhow::{Context, Result};
use std::sync::Arc;

use teloxide::macros::BotCommands;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, MessageId, ParseMode};
use teloxide::{ApiError, Bot, RequestError};

use telegram_select_menu::AfterAction;

use crate::bot::menu::{self, MENU_PATH};
use crate::bot::utils::escape_markdown_v2;
use crate::models::AppConfig;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Show the topics menu")]
    Start,
    #[command(description = "List the selected topics")]
    Selected,
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    config: Arc<AppConfig>,
) -> Result<()> {
    let user_id = msg.from.as_ref().context("User missing")?.id.0;
    let chat_id = msg.chat.id;

    log::info!("Processing command {:?} for user {}", cmd, user_id);

    if !config.options.is_allowed(user_id) {
        warn!("User {} is not allowed", user_id);
        return Ok(());
    }

    match cmd {
        Command::Start => {
            let (text, kb) = menu::render(&config, user_id).await?;
            bot.send_message(chat_id, text)
                .parse_mode(ParseMode::MarkdownV2)
                .reply_markup(kb)
                .await?;
        }
        Command::Selected => {
            let selected = config.store.selected(user_id);
            let text = if selected.is_empty() {
                "Nothing selected yet".to_string()
            } else {
                selected.join("\n")
            };
            bot.send_message(chat_id, escape_markdown_v2(&text))
                .parse_mode(ParseMode::MarkdownV2)
                .await?;
        }
    }

    Ok(())
}

/// Routes a button press to the menu and redraws it.
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    config: Arc<AppConfig>,
) -> Result<()> {
    let _ = bot.answer_callback_query(q.id.clone()).await;

    let data = q.data.as_ref().context("No callback data")?;
    let user_id = q.from.id.0;
    let msg = q.message.as_ref().context("Message missing")?;

    if !config.options.is_allowed(user_id) {
        warn!("User {} is not allowed", user_id);
        return Ok(());
    }

    let Some(relative_path) = data.strip_prefix(MENU_PATH) else {
        warn!("Callback data outside of the menu: {}", data);
        return Ok(());
    };

    let ctx = config.context(user_id);
    let outcome = config.topics
        .handle(&ctx, MENU_PATH, relative_path)
        .await
        .with_context(|| format!("Failed to handle callback {:?}", data))?;

    match outcome {
        Some(AfterAction::Keep) => Ok(()),
        Some(AfterAction::Refresh) => redraw(&bot, &config, msg.chat().id, msg.id(), user_id).await,
        Some(AfterAction::Navigate(path)) => {
            debug!("Navigation to {} requested, only {} exists", path, MENU_PATH);
            redraw(&bot, &config, msg.chat().id, msg.id(), user_id).await
        }
        None => {
            warn!("Unhandled callback data: {}", data);
            Ok(())
        }
    }
}

async fn redraw(
    bot: &Bot,
    config: &AppConfig,
    chat_id: ChatId,
    message_id: MessageId,
    user_id: u64,
) -> Result<()> {
    let (text, kb) = menu::render(config, user_id).await?;
    edit_view(bot, chat_id, message_id, text, kb).await
}

async fn edit_view(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    text: String,
    kb: InlineKeyboardMarkup,
) -> Result<()> {
    let res = bot.edit_message_text(chat_id, message_id, text)
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(kb)
        .await;

    match res {
        Ok(_) => Ok(()),
        // Pressing the current page button yields an identical message.
        Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
        Err(e) => {
            error!("Edit menu failed: {}", e);
            Err(e.into())
        }
    }
}
