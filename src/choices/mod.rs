pub mod pagination;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Result;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::{ChoiceKeyError, MAX_CALLBACK_DATA_BYTES};
use crate::resolve::{ContextFn, ContextKeyFn};

pub use pagination::{create_pagination_choices, ensure_pagination_fits, generate_choices_pagination_buttons};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Choice {
    pub key: String,
    pub text: String,
}

impl Choice {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

impl From<&str> for Choice {
    fn from(key: &str) -> Self {
        Choice::new(key, key)
    }
}

impl From<String> for Choice {
    fn from(key: String) -> Self {
        Choice::new(key.clone(), key)
    }
}

impl From<(&str, &str)> for Choice {
    fn from((key, text): (&str, &str)) -> Self {
        Choice::new(key, text)
    }
}

/// Where a menu gets its choices from. `Dynamic` is called again on every render.
pub enum Choices<C> {
    Const(Vec<Choice>),
    Dynamic(ContextFn<C, Vec<Choice>>),
}

impl<C> Choices<C> {
    pub fn dynamic<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a C) -> BoxFuture<'a, Result<Vec<Choice>>> + Send + Sync + 'static,
    {
        Choices::Dynamic(Arc::new(f))
    }

    pub async fn resolve(&self, ctx: &C) -> Result<Vec<Choice>> {
        match self {
            Choices::Const(choices) => Ok(choices.clone()),
            Choices::Dynamic(f) => f(ctx).await,
        }
    }
}

impl<C, T: Into<Choice>> From<Vec<T>> for Choices<C> {
    fn from(choices: Vec<T>) -> Self {
        Choices::Const(choices.into_iter().map(Into::into).collect())
    }
}

pub fn choice_keys(choices: &[Choice]) -> Vec<&str> {
    choices.iter().map(|c| c.key.as_str()).collect()
}

/// Rejects keys that would break callback routing: empty keys, keys with `/`,
/// duplicates and keys whose callback data would exceed Telegram's limit.
pub fn ensure_correct_choice_keys(prefix: &str, path: &str, keys: &[&str]) -> Result<(), ChoiceKeyError> {
    if keys.iter().any(|k| k.is_empty()) {
        return Err(ChoiceKeyError::Empty {
            prefix: prefix.to_string(),
            path: path.to_string(),
        });
    }

    let with_slash: Vec<String> = keys.iter().filter(|k| k.contains('/')).map(|k| k.to_string()).collect();
    if !with_slash.is_empty() {
        return Err(ChoiceKeyError::ContainsSlash {
            prefix: prefix.to_string(),
            path: path.to_string(),
            keys: with_slash,
        });
    }

    let mut seen = HashSet::with_capacity(keys.len());
    let mut duplicates: Vec<String> = Vec::new();
    for key in keys {
        if !seen.insert(*key) && !duplicates.iter().any(|d| d == key) {
            duplicates.push(key.to_string());
        }
    }
    if !duplicates.is_empty() {
        return Err(ChoiceKeyError::Duplicate {
            prefix: prefix.to_string(),
            path: path.to_string(),
            keys: duplicates,
        });
    }

    // Flag letter and separator are one byte each, 'F' stands in for both flags.
    if let Some(longest) = keys.iter().max_by_key(|k| k.len()) {
        let data = format!("{}{}F:{}", path, prefix, longest);
        if data.len() > MAX_CALLBACK_DATA_BYTES {
            let length = data.len();
            return Err(ChoiceKeyError::TooLong { data, length });
        }
    }

    Ok(())
}

/// Button text lookup bound to one resolved choice list.
pub struct ChoiceText<'c, C> {
    texts: HashMap<&'c str, &'c str>,
    button_text: Option<&'c ContextKeyFn<C, String>>,
}

impl<'c, C> ChoiceText<'c, C> {
    pub fn new(choices: &'c [Choice], button_text: Option<&'c ContextKeyFn<C, String>>) -> Self {
        Self {
            texts: choices.iter().map(|c| (c.key.as_str(), c.text.as_str())).collect(),
            button_text,
        }
    }

    pub async fn resolve(&self, ctx: &C, key: &str) -> Result<String> {
        if let Some(f) = self.button_text {
            return f(ctx, key).await;
        }

        Ok(self.texts.get(key).copied().unwrap_or(key).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::context_key_fn;

    #[test]
    fn test_valid_keys_pass() {
        assert_eq!(ensure_correct_choice_keys("p", "/", &["a", "b", "c d"]), Ok(()));
        assert_eq!(ensure_correct_choice_keys("p", "/", &[]), Ok(()));
    }

    #[test]
    fn test_slash_is_rejected() {
        let err = ensure_correct_choice_keys("p", "/menu/", &["ok", "a/b"]).unwrap_err();
        assert_eq!(
            err,
            ChoiceKeyError::ContainsSlash {
                prefix: "p".into(),
                path: "/menu/".into(),
                keys: vec!["a/b".into()],
            }
        );
    }

    #[test]
    fn test_duplicates_are_reported_once() {
        let err = ensure_correct_choice_keys("p", "/", &["a", "b", "a", "a"]).unwrap_err();
        match err {
            ChoiceKeyError::Duplicate { keys, .. } => assert_eq!(keys, vec!["a".to_string()]),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let err = ensure_correct_choice_keys("p", "/", &["a", ""]).unwrap_err();
        assert!(matches!(err, ChoiceKeyError::Empty { .. }));
    }

    #[test]
    fn test_callback_data_limit() {
        // "/" + "p" + "F:" = 4 bytes, 60 bytes left for the key
        let fits = "k".repeat(60);
        assert!(ensure_correct_choice_keys("p", "/", &[fits.as_str()]).is_ok());

        let too_long = "k".repeat(61);
        let err = ensure_correct_choice_keys("p", "/", &["short", too_long.as_str()]).unwrap_err();
        assert!(matches!(err, ChoiceKeyError::TooLong { length: 65, .. }));
    }

    #[test]
    fn test_choice_conversions() {
        assert_eq!(Choice::from("news"), Choice::new("news", "news"));
        assert_eq!(Choice::from(("en", "English")), Choice::new("en", "English"));

        let choices: Choices<()> = vec!["a", "b"].into();
        match choices {
            Choices::Const(list) => assert_eq!(choice_keys(&list), vec!["a", "b"]),
            Choices::Dynamic(_) => panic!("expected constant choices"),
        }
    }

    #[tokio::test]
    async fn test_choice_text_falls_back_to_key() -> Result<()> {
        let choices = vec![Choice::new("en", "English")];
        let texts: ChoiceText<'_, ()> = ChoiceText::new(&choices, None);

        assert_eq!(texts.resolve(&(), "en").await?, "English");
        assert_eq!(texts.resolve(&(), "de").await?, "de");
        Ok(())
    }

    #[tokio::test]
    async fn test_button_text_override_wins() -> Result<()> {
        let choices = vec![Choice::new("en", "English")];
        let override_fn: ContextKeyFn<(), String> =
            context_key_fn(|_: &(), key| Box::pin(async move { Ok(key.to_uppercase()) }));
        let texts = ChoiceText::new(&choices, Some(&override_fn));

        assert_eq!(texts.resolve(&(), "en").await?, "EN");
        Ok(())
    }

    #[tokio::test]
    async fn test_dynamic_choices_use_context() -> Result<()> {
        let choices: Choices<usize> = Choices::dynamic(|count: &usize| {
            Box::pin(async move { Ok((0..*count).map(|i| Choice::from(i.to_string())).collect()) })
        });

        assert_eq!(choices.resolve(&3).await?.len(), 3);
        assert_eq!(choices.resolve(&1).await?.len(), 1);
        Ok(())
    }
}
