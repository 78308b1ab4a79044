/// Escapes text for Telegram MarkdownV2.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        match c {
            '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|' | '{' | '}' | '.' | '!' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown_v2() {
        assert_eq!(escape_markdown_v2("Pick (any) topics!"), "Pick \\(any\\) topics\\!");
        assert_eq!(escape_markdown_v2("plain text"), "plain text");
        assert_eq!(escape_markdown_v2(r"C:\News"), r"C:\\News");
    }
}
