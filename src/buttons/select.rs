use std::sync::Arc;

use anyhow::Result;
use futures_util::future::{try_join_all, BoxFuture};
use log::debug;

use crate::buttons::align::{get_buttons_as_rows, get_buttons_of_page, DEFAULT_BUTTON_COLUMNS, DEFAULT_BUTTON_ROWS};
use crate::buttons::types::{AfterAction, ButtonInfo, ButtonStyle, FormatResult};
use crate::choices::{
    choice_keys, ensure_correct_choice_keys, ensure_pagination_fits, generate_choices_pagination_buttons, ChoiceText,
    Choices,
};
use crate::keyboard::CallbackButton;
use crate::prefix::{prefix_emoji, PrefixOptions};
use crate::resolve::{context_key_fn, ConstOrResolver, ContextFn, ContextKeyFn};

pub type SetFn<C> = Arc<dyn for<'a> Fn(&'a C, &'a str, bool) -> BoxFuture<'a, Result<AfterAction>> + Send + Sync>;
pub type SetPageFn<C> = Arc<dyn for<'a> Fn(&'a C, usize) -> BoxFuture<'a, Result<AfterAction>> + Send + Sync>;
/// `(ctx, text, state, key)`
pub type FormatStateFn<C> =
    Arc<dyn for<'a> Fn(&'a C, &'a str, bool, &'a str) -> BoxFuture<'a, Result<FormatResult>> + Send + Sync>;
pub type ButtonRows = Vec<Vec<CallbackButton>>;

pub struct SelectOptions<C> {
    pub choices: Choices<C>,
    /// Current state of a choice.
    pub is_set: ContextKeyFn<C, bool>,
    /// Called with the new state when a choice is pressed.
    pub set: SetFn<C>,
    /// Show [`crate::prefix::EMOJI_FALSE`] on unset choices, hinting that several can be picked.
    pub show_false_emoji: bool,
    pub format_state: Option<FormatStateFn<C>>,
    pub button_text: Option<ContextKeyFn<C, String>>,
    pub icon_custom_emoji_id: ConstOrResolver<C, Option<String>>,
    pub style: ConstOrResolver<C, Option<ButtonStyle>>,
    /// Called with the menu path; `true` hides the whole group.
    pub hide: Option<ContextKeyFn<C, bool>>,
    pub get_current_page: Option<ContextFn<C, usize>>,
    pub set_page: Option<SetPageFn<C>>,
    pub columns: usize,
    pub max_rows: usize,
    /// Accept presses on keys that are no longer part of the choices.
    pub disable_choice_exists_check: bool,
}

impl<C> SelectOptions<C> {
    pub fn new<I, S>(choices: impl Into<Choices<C>>, is_set: I, set: S) -> Self
    where
        I: for<'a> Fn(&'a C, &'a str) -> BoxFuture<'a, Result<bool>> + Send + Sync + 'static,
        S: for<'a> Fn(&'a C, &'a str, bool) -> BoxFuture<'a, Result<AfterAction>> + Send + Sync + 'static,
    {
        Self {
            choices: choices.into(),
            is_set: context_key_fn(is_set),
            set: Arc::new(set),
            show_false_emoji: false,
            format_state: None,
            button_text: None,
            icon_custom_emoji_id: ConstOrResolver::default(),
            style: ConstOrResolver::default(),
            hide: None,
            get_current_page: None,
            set_page: None,
            columns: DEFAULT_BUTTON_COLUMNS,
            max_rows: DEFAULT_BUTTON_ROWS,
            disable_choice_exists_check: false,
        }
    }

    pub fn show_false_emoji(mut self, show: bool) -> Self {
        self.show_false_emoji = show;
        self
    }

    pub fn format_state<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a C, &'a str, bool, &'a str) -> BoxFuture<'a, Result<FormatResult>> + Send + Sync + 'static,
    {
        self.format_state = Some(Arc::new(f));
        self
    }

    pub fn button_text<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a C, &'a str) -> BoxFuture<'a, Result<String>> + Send + Sync + 'static,
    {
        self.button_text = Some(context_key_fn(f));
        self
    }

    pub fn icon_custom_emoji_id(mut self, icon: ConstOrResolver<C, Option<String>>) -> Self {
        self.icon_custom_emoji_id = icon;
        self
    }

    pub fn style(mut self, style: ConstOrResolver<C, Option<ButtonStyle>>) -> Self {
        self.style = style;
        self
    }

    pub fn hide<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a C, &'a str) -> BoxFuture<'a, Result<bool>> + Send + Sync + 'static,
    {
        self.hide = Some(context_key_fn(f));
        self
    }

    pub fn get_current_page<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a C) -> BoxFuture<'a, Result<usize>> + Send + Sync + 'static,
    {
        self.get_current_page = Some(Arc::new(f));
        self
    }

    pub fn set_page<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a C, usize) -> BoxFuture<'a, Result<AfterAction>> + Send + Sync + 'static,
    {
        self.set_page = Some(Arc::new(f));
        self
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn disable_choice_exists_check(mut self, disable: bool) -> Self {
        self.disable_choice_exists_check = disable;
        self
    }
}

/// Relative path of a choice button. The flag is the state a press switches to:
/// `F` for a choice that is currently set, `T` for one that is not.
pub fn select_relative_path(prefix: &str, state: bool, key: &str) -> String {
    let flag = if state { 'F' } else { 'T' };
    format!("{}{}:{}", prefix, flag, key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAction<'a> {
    Set { key: &'a str, new_state: bool },
    Page(usize),
}

/// Parses a relative path produced by [`SelectButtons::render`].
/// Returns `None` for paths of other button groups.
pub fn parse_select_action<'a>(prefix: &str, relative_path: &'a str) -> Option<SelectAction<'a>> {
    let rest = relative_path.strip_prefix(prefix)?;
    let (flag, value) = rest.split_once(':')?;

    match flag {
        "T" if !value.is_empty() => Some(SelectAction::Set { key: value, new_state: true }),
        "F" if !value.is_empty() => Some(SelectAction::Set { key: value, new_state: false }),
        "P" => value.parse().ok().map(SelectAction::Page),
        _ => None,
    }
}

/// A group of toggle buttons bound to one prefix.
pub struct SelectButtons<C> {
    prefix: String,
    options: SelectOptions<C>,
}

impl<C> SelectButtons<C>
where
    C: Send + Sync + 'static,
{
    pub fn new(prefix: impl Into<String>, options: SelectOptions<C>) -> Self {
        Self {
            prefix: prefix.into(),
            options,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn options(&self) -> &SelectOptions<C> {
        &self.options
    }

    /// Builds the button rows of the current page for the menu at `path`.
    pub async fn render(&self, ctx: &C, path: &str) -> Result<ButtonRows> {
        if self.is_hidden(ctx, path).await? {
            debug!("select {}: hidden at {}", self.prefix, path);
            return Ok(Vec::new());
        }

        let choices = self.options.choices.resolve(ctx).await?;
        let keys = choice_keys(&choices);
        ensure_correct_choice_keys(&self.prefix, path, &keys)?;
        if self.options.set_page.is_some() {
            ensure_pagination_fits(&self.prefix, path, keys.len(), self.options.columns, self.options.max_rows)?;
        }

        let texts = ChoiceText::new(&choices, self.options.button_text.as_ref());
        let current_page = self.current_page(ctx).await?;
        let keys_of_page = get_buttons_of_page(&keys, self.options.columns, self.options.max_rows, current_page);

        debug!(
            "select {}: rendering {} of {} choices, page {}",
            self.prefix,
            keys_of_page.len(),
            keys.len(),
            current_page
        );

        let buttons = try_join_all(
            keys_of_page
                .iter()
                .copied()
                .map(|key| self.render_choice(ctx, key, &texts)),
        )
        .await?;

        let mut rows = get_buttons_as_rows(buttons, self.options.columns);

        if self.options.set_page.is_some() {
            let pagination = generate_choices_pagination_buttons(
                &self.prefix,
                keys.len(),
                current_page,
                self.options.columns,
                self.options.max_rows,
            );
            if !pagination.is_empty() {
                rows.push(pagination);
            }
        }

        Ok(rows)
    }

    /// Handles a pressed button. `Ok(None)` means the path belongs to another group.
    pub async fn handle(&self, ctx: &C, path: &str, relative_path: &str) -> Result<Option<AfterAction>> {
        let Some(action) = parse_select_action(&self.prefix, relative_path) else {
            return Ok(None);
        };

        if self.is_hidden(ctx, path).await? {
            debug!("select {}: press on hidden group at {}", self.prefix, path);
            return Ok(Some(AfterAction::Refresh));
        }

        match action {
            SelectAction::Set { key, new_state } => {
                if !self.options.disable_choice_exists_check && !self.choice_exists(ctx, key).await? {
                    debug!("select {}: choice {:?} no longer exists", self.prefix, key);
                    return Ok(Some(AfterAction::Refresh));
                }

                debug!("select {}: set {:?} to {}", self.prefix, key, new_state);
                (self.options.set)(ctx, key, new_state).await.map(Some)
            }
            SelectAction::Page(page) => match &self.options.set_page {
                Some(set_page) => {
                    debug!("select {}: page {}", self.prefix, page);
                    set_page(ctx, page).await.map(Some)
                }
                None => Ok(None),
            },
        }
    }

    async fn render_choice(&self, ctx: &C, key: &str, texts: &ChoiceText<'_, C>) -> Result<CallbackButton> {
        let (text, state) = futures_util::try_join!(texts.resolve(ctx, key), (self.options.is_set)(ctx, key))?;

        let info = match &self.options.format_state {
            Some(format) => format(ctx, &text, state, key).await?.into_button_info(),
            None => ButtonInfo::new(prefix_emoji(
                &text,
                state,
                &PrefixOptions {
                    hide_false_emoji: !self.options.show_false_emoji,
                    ..Default::default()
                },
            )),
        };

        // A formatted icon, even an empty one, stops the option-level lookup.
        let icon_custom_emoji_id = match info.icon_custom_emoji_id {
            Some(id) => Some(id),
            None => self.options.icon_custom_emoji_id.resolve(ctx, key).await?,
        }
        .filter(|id| !id.is_empty());

        let style = match info.style {
            Some(style) => Some(style),
            None => self.options.style.resolve(ctx, key).await?,
        };

        Ok(CallbackButton {
            text: info.text,
            relative_path: select_relative_path(&self.prefix, state, key),
            icon_custom_emoji_id,
            style,
        })
    }

    async fn is_hidden(&self, ctx: &C, path: &str) -> Result<bool> {
        match &self.options.hide {
            Some(hide) => hide(ctx, path).await,
            None => Ok(false),
        }
    }

    async fn current_page(&self, ctx: &C) -> Result<usize> {
        match &self.options.get_current_page {
            Some(get_current_page) => get_current_page(ctx).await,
            None => Ok(0),
        }
    }

    async fn choice_exists(&self, ctx: &C, key: &str) -> Result<bool> {
        let choices = self.options.choices.resolve(ctx).await?;
        Ok(choices.iter().any(|c| c.key == key))
    }
}

/// Closure form of [`SelectButtons::render`]: `(ctx, path) -> rows`.
pub fn generate_select_buttons<C>(prefix: impl Into<String>, options: SelectOptions<C>) -> ContextKeyFn<C, ButtonRows>
where
    C: Send + Sync + 'static,
{
    let menu = Arc::new(SelectButtons::new(prefix, options));

    context_key_fn(move |ctx: &C, path| {
        let menu = menu.clone();
        Box::pin(async move { menu.render(ctx, path).await })
    })
}
