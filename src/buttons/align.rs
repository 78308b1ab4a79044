//! Page slicing and row chunking for button grids.

pub const DEFAULT_BUTTON_COLUMNS: usize = 6;
pub const DEFAULT_BUTTON_ROWS: usize = 10;

pub fn maximum_buttons_per_page(columns: usize, max_rows: usize) -> usize {
    columns.max(1) * max_rows.max(1)
}

pub fn total_pages(item_count: usize, columns: usize, max_rows: usize) -> usize {
    item_count.div_ceil(maximum_buttons_per_page(columns, max_rows))
}

/// Returns the items shown on the zero-based `page`.
///
/// Pages past the end are clamped to the last page, so a menu that shrank
/// between two presses still shows something.
pub fn get_buttons_of_page<T>(items: &[T], columns: usize, max_rows: usize, page: usize) -> &[T] {
    let per_page = maximum_buttons_per_page(columns, max_rows);
    let pages = total_pages(items.len(), columns, max_rows);
    let page = page.min(pages.saturating_sub(1));

    let start = (page * per_page).min(items.len());
    let end = (start + per_page).min(items.len());
    &items[start..end]
}

pub fn get_buttons_as_rows<T>(items: Vec<T>, columns: usize) -> Vec<Vec<T>> {
    let columns = columns.max(1);
    let mut rows = Vec::with_capacity(items.len().div_ceil(columns));
    let mut row = Vec::with_capacity(columns);

    for item in items {
        row.push(item);
        if row.len() == columns {
            rows.push(std::mem::replace(&mut row, Vec::with_capacity(columns)));
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }

    rows
}
