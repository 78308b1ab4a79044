pub const EMOJI_TRUE: &str = "✅";
pub const EMOJI_FALSE: &str = "🚫";

#[derive(Debug, Clone, Default)]
pub struct PrefixOptions {
    /// Replaces [`EMOJI_TRUE`].
    pub prefix_true: Option<String>,
    /// Replaces [`EMOJI_FALSE`].
    pub prefix_false: Option<String>,
    pub hide_true_emoji: bool,
    pub hide_false_emoji: bool,
}

/// Prefixes `text` with the glyph matching `state`.
///
/// Example: `prefix_emoji("News", true, &Default::default())` → `"✅ News"`.
pub fn prefix_emoji(text: &str, state: bool, options: &PrefixOptions) -> String {
    let prefix = if state {
        (!options.hide_true_emoji).then(|| options.prefix_true.as_deref().unwrap_or(EMOJI_TRUE))
    } else {
        (!options.hide_false_emoji).then(|| options.prefix_false.as_deref().unwrap_or(EMOJI_FALSE))
    };

    prefix_text(text, prefix)
}

pub fn prefix_text(text: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{} {}", prefix, text),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_emoji_defaults() {
        let options = PrefixOptions::default();
        assert_eq!(prefix_emoji("News", true, &options), "✅ News");
        assert_eq!(prefix_emoji("News", false, &options), "🚫 News");
    }

    #[test]
    fn test_prefix_emoji_hidden_false() {
        let options = PrefixOptions {
            hide_false_emoji: true,
            ..Default::default()
        };
        assert_eq!(prefix_emoji("News", false, &options), "News");
        assert_eq!(prefix_emoji("News", true, &options), "✅ News");
    }

    #[test]
    fn test_prefix_emoji_custom_glyphs() {
        let options = PrefixOptions {
            prefix_true: Some("🔔".into()),
            prefix_false: Some("🔕".into()),
            ..Default::default()
        };
        assert_eq!(prefix_emoji("Alerts", true, &options), "🔔 Alerts");
        assert_eq!(prefix_emoji("Alerts", false, &options), "🔕 Alerts");
    }

    #[test]
    fn test_prefix_text_empty_prefix_keeps_text() {
        assert_eq!(prefix_text("Plain", Some("")), "Plain");
        assert_eq!(prefix_text("Plain", None), "Plain");
    }
}
