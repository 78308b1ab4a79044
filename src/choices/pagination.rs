//! Page navigation row for menus with more choices than fit on one page.

use std::collections::BTreeMap;

use crate::buttons::align::total_pages;
use crate::error::{ChoiceKeyError, MAX_CALLBACK_DATA_BYTES};
use crate::keyboard::CallbackButton;

/// Pages worth a button around `current_page`, keyed by zero-based page index.
///
/// Labels are one-based: `1 ⏪`, `4 ◀️`, `5`, `▶️ 6`, `⏩ 9` for page index 4 of 9.
/// Nothing is returned for menus with fewer than two pages.
pub fn create_pagination_choices(total_pages: usize, current_page: usize) -> BTreeMap<usize, String> {
    let mut buttons = BTreeMap::new();
    if total_pages < 2 {
        return buttons;
    }

    let last = total_pages - 1;
    let current = current_page.min(last);

    if current > 0 {
        let before = current - 1;
        if before > 0 {
            buttons.insert(0, "1 ⏪".to_string());
        }
        buttons.insert(before, format!("{} ◀️", before + 1));
    }

    buttons.insert(current, (current + 1).to_string());

    if current < last {
        let after = current + 1;
        buttons.insert(after, format!("▶️ {}", after + 1));
        if after < last {
            buttons.insert(last, format!("⏩ {}", last + 1));
        }
    }

    buttons
}

pub fn generate_choices_pagination_buttons(
    prefix: &str,
    total_keys: usize,
    current_page: usize,
    columns: usize,
    max_rows: usize,
) -> Vec<CallbackButton> {
    let pages = total_pages(total_keys, columns, max_rows);

    create_pagination_choices(pages, current_page)
        .into_iter()
        .map(|(page, text)| CallbackButton::new(text, pagination_relative_path(prefix, page)))
        .collect()
}

pub fn pagination_relative_path(prefix: &str, page: usize) -> String {
    format!("{}P:{}", prefix, page)
}

/// Checks that the widest page button, the last page, fits Telegram's callback data limit.
pub fn ensure_pagination_fits(
    prefix: &str,
    path: &str,
    total_keys: usize,
    columns: usize,
    max_rows: usize,
) -> Result<(), ChoiceKeyError> {
    let pages = total_pages(total_keys, columns, max_rows);
    if pages < 2 {
        return Ok(());
    }

    let data = format!("{}{}", path, pagination_relative_path(prefix, pages - 1));
    if data.len() > MAX_CALLBACK_DATA_BYTES {
        let length = data.len();
        return Err(ChoiceKeyError::TooLong { data, length });
    }

    Ok(())
}
