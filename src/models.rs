use std::collections::HashSet;
use std::sync::Arc;
use dashmap::DashMap;

use telegram_select_menu::SelectButtons;
use crate::options::AppOptions;

/// Per-user menu state. Lives in memory only.
#[derive(Default)]
pub struct SelectionStore {
    selections: DashMap<u64, HashSet<String>>,
    pages: DashMap<u64, usize>,
}

impl SelectionStore {
    pub fn is_selected(&self, user_id: u64, key: &str) -> bool {
        self.selections
            .get(&user_id)
            .map(|keys| keys.contains(key))
            .unwrap_or(false)
    }

    pub fn set(&self, user_id: u64, key: &str, selected: bool) {
        let mut keys = self.selections.entry(user_id).or_default();
        if selected {
            keys.insert(key.to_string());
        } else {
            keys.remove(key);
        }
    }

    pub fn selected(&self, user_id: u64) -> Vec<String> {
        let mut keys: Vec<String> = self.selections
            .get(&user_id)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    pub fn page(&self, user_id: u64) -> usize {
        self.pages.get(&user_id).map(|p| *p).unwrap_or(0)
    }

    pub fn set_page(&self, user_id: u64, page: usize) {
        self.pages.insert(user_id, page);
    }
}

/// What every menu callback receives.
pub struct MenuContext {
    pub user_id: u64,
    pub store: Arc<SelectionStore>,
}

pub struct AppConfig {
    pub options: AppOptions,
    pub store: Arc<SelectionStore>,
    pub topics: SelectButtons<MenuContext>,
}

impl AppConfig {
    pub fn context(&self, user_id: u64) -> MenuContext {
        MenuContext {
            user_id,
            store: self.store.clone(),
        }
    }
}
