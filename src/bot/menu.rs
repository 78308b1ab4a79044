use anyhow::Result;
use teloxide::types::InlineKeyboardMarkup;

use telegram_select_menu::{
    to_inline_keyboard, AfterAction, ButtonStyle, ConstOrResolver, SelectButtons, SelectOptions,
};

use crate::models::{AppConfig, MenuContext};
use crate::options::MenuOptions;
use super::utils::escape_markdown_v2;

/// The bot has a single menu, so every callback lives under the root path.
pub const MENU_PATH: &str = "/";

pub fn build_topics(menu: &MenuOptions) -> SelectButtons<MenuContext> {
    let options = SelectOptions::new(
        menu.choices.clone(),
        |ctx: &MenuContext, key| {
            let selected = ctx.store.is_selected(ctx.user_id, key);
            Box::pin(async move { Ok(selected) })
        },
        |ctx: &MenuContext, key, new_state| {
            ctx.store.set(ctx.user_id, key, new_state);
            Box::pin(async move { Ok(AfterAction::Refresh) })
        },
    )
    .show_false_emoji(menu.show_false_emoji)
    .columns(menu.columns)
    .max_rows(menu.max_rows)
    .style(ConstOrResolver::resolver(|ctx: &MenuContext, key| {
        let style = ctx.store.is_selected(ctx.user_id, key).then_some(ButtonStyle::Success);
        Box::pin(async move { Ok(style) })
    }))
    .get_current_page(|ctx: &MenuContext| {
        let page = ctx.store.page(ctx.user_id);
        Box::pin(async move { Ok(page) })
    })
    .set_page(|ctx: &MenuContext, page| {
        ctx.store.set_page(ctx.user_id, page);
        Box::pin(async move { Ok(AfterAction::Refresh) })
    });

    SelectButtons::new(menu.prefix.clone(), options)
}

/// Message text and keyboard of the topics menu for one user.
pub async fn render(config: &AppConfig, user_id: u64) -> Result<(String, InlineKeyboardMarkup)> {
    let ctx = config.context(user_id);
    let rows = config.topics.render(&ctx, MENU_PATH).await?;

    let selected: Vec<String> = config
        .store
        .selected(user_id)
        .into_iter()
        .map(|key| {
            config.options.menu.choices
                .iter()
                .find(|c| c.key == key)
                .map(|c| c.text.clone())
                .unwrap_or(key)
        })
        .collect();

    let summary = if selected.is_empty() {
        "Nothing selected yet".to_string()
    } else {
        format!("Selected: {}", selected.join(", "))
    };

    let text = format!(
        "*{}*\n\n{}",
        escape_markdown_v2(&config.options.menu.title),
        escape_markdown_v2(&summary)
    );

    Ok((text, to_inline_keyboard(MENU_PATH, &rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use teloxide::types::InlineKeyboardButtonKind;
    use crate::models::SelectionStore;
    use crate::options::AppOptions;

    fn config() -> AppConfig {
        let options = AppOptions::from_json(
            r#"{
                "bot_token": "123:abc",
                "menu": {
                    "title": "Topics",
                    "columns": 2,
                    "max_rows": 1,
                    "choices": [
                        { "key": "news", "text": "News" },
                        { "key": "sport", "text": "Sport" },
                        { "key": "tech", "text": "Tech" }
                    ]
                }
            }"#,
        )
        .expect("test options must load");
        let topics = build_topics(&options.menu);

        AppConfig {
            options,
            store: Arc::new(SelectionStore::default()),
            topics,
        }
    }

    fn callback_data(kb: &InlineKeyboardMarkup) -> Vec<String> {
        kb.inline_keyboard
            .iter()
            .flatten()
            .filter_map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_first_page_with_pagination_row() -> Result<()> {
        let config = config();

        let (text, kb) = render(&config, 1).await?;

        assert_eq!(text, "*Topics*\n\nNothing selected yet");
        assert_eq!(kb.inline_keyboard.len(), 2);
        assert_eq!(
            callback_data(&kb),
            vec!["/topicsT:news", "/topicsT:sport", "/topicsP:0", "/topicsP:1"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_press_toggles_and_rerenders() -> Result<()> {
        let config = config();
        let ctx = config.context(1);

        let outcome = config.topics.handle(&ctx, MENU_PATH, "topicsT:sport").await?;
        assert_eq!(outcome, Some(AfterAction::Refresh));
        assert!(config.store.is_selected(1, "sport"));

        let (text, kb) = render(&config, 1).await?;
        assert!(text.ends_with("Selected: Sport"));
        assert_eq!(kb.inline_keyboard[0][1].text, "✅ Sport");
        assert_eq!(callback_data(&kb)[1], "/topicsF:sport");

        config.topics.handle(&ctx, MENU_PATH, "topicsF:sport").await?;
        assert!(!config.store.is_selected(1, "sport"));
        Ok(())
    }

    #[tokio::test]
    async fn test_page_press_moves_window() -> Result<()> {
        let config = config();
        let ctx = config.context(1);

        config.topics.handle(&ctx, MENU_PATH, "topicsP:1").await?;
        let (_, kb) = render(&config, 1).await?;

        assert_eq!(kb.inline_keyboard[0][0].text, "Tech");
        assert_eq!(config.store.page(2), 0, "other users keep their page");
        Ok(())
    }
}
