//! Restaurant menu management: add and remove items locally.

use std::sync::OnceLock;

use regex::Regex;
use shared::domain::{MenuItem, MenuItemId};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("Nome e preço são obrigatórios")]
    MissingNameOrPrice,
}

/// `R$ 32,90`
pub fn format_currency(value: f64) -> String {
    format!("R$ {value:.2}").replace('.', ",")
}

fn numeric_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
            .expect("price pattern compiles")
    })
}

/// Reads a typed price, accepting `,` as decimal separator. Only the
/// leading numeric part counts (exponents included); text without one
/// reads as zero.
pub fn parse_price(raw: &str) -> f64 {
    let normalized = raw.trim_start().replacen(',', ".", 1);
    numeric_prefix()
        .find(&normalized)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Contents of the "add item" modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemDraft {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: String,
}

impl MenuItemDraft {
    pub fn set_price_text(&mut self, raw: &str) {
        self.price = parse_price(raw);
    }

    /// Text shown in the price input; empty while the price is zero.
    pub fn price_text(&self) -> String {
        if self.price == 0.0 {
            String::new()
        } else {
            self.price.to_string()
        }
    }

    fn is_complete(&self) -> bool {
        !self.name.is_empty() && self.price > 0.0
    }
}

pub fn sample_menu() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: MenuItemId::new("1"),
            name: "Pizza Margherita".to_string(),
            price: 32.90,
            description: "Molho de tomate, mussarela, tomate e manjericão".to_string(),
            image: Some(
                "https://images.unsplash.com/photo-1598023696416-0193a0bcd302?q=80&w=2236&auto=format&fit=crop"
                    .to_string(),
            ),
        },
        MenuItem {
            id: MenuItemId::new("2"),
            name: "Pizza Pepperoni".to_string(),
            price: 36.90,
            description: "Molho de tomate, mussarela e pepperoni".to_string(),
            image: Some(
                "https://images.unsplash.com/photo-1628840042765-356cda07504e?q=80&w=2080&auto=format&fit=crop"
                    .to_string(),
            ),
        },
        MenuItem {
            id: MenuItemId::new("3"),
            name: "Pizza Calabresa".to_string(),
            price: 34.90,
            description: "Molho de tomate, mussarela e calabresa".to_string(),
            image: Some(
                "https://images.unsplash.com/photo-1513104890138-7c749659a591?q=80&w=2070&auto=format&fit=crop"
                    .to_string(),
            ),
        },
    ]
}

#[derive(Debug, Clone)]
pub struct MenuScreen {
    items: Vec<MenuItem>,
    draft: MenuItemDraft,
    add_modal_open: bool,
}

impl Default for MenuScreen {
    fn default() -> Self {
        Self::new(sample_menu())
    }
}

impl MenuScreen {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            draft: MenuItemDraft::default(),
            add_modal_open: false,
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn draft(&self) -> &MenuItemDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut MenuItemDraft {
        &mut self.draft
    }

    pub fn is_add_modal_open(&self) -> bool {
        self.add_modal_open
    }

    pub fn open_add_modal(&mut self) {
        self.add_modal_open = true;
    }

    /// Hides the modal; whatever was typed stays in the draft.
    pub fn close_add_modal(&mut self) {
        self.add_modal_open = false;
    }

    pub fn add_menu_item(&mut self) -> Result<&MenuItem, MenuError> {
        if !self.draft.is_complete() {
            warn!(name = %self.draft.name, price = self.draft.price, "menu: item rejected");
            return Err(MenuError::MissingNameOrPrice);
        }

        let draft = std::mem::take(&mut self.draft);
        let item = MenuItem {
            id: MenuItemId::generate(),
            name: draft.name,
            price: draft.price,
            description: draft.description,
            image: Some(draft.image).filter(|url| !url.trim().is_empty()),
        };
        info!(id = %item.id, name = %item.name, "menu: item added");
        self.items.push(item);
        self.add_modal_open = false;
        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes by id. Unknown ids leave the menu as it is.
    pub fn remove_menu_item(&mut self, id: &MenuItemId) -> Option<MenuItem> {
        let position = self.items.iter().position(|item| &item.id == id)?;
        let removed = self.items.remove(position);
        info!(id = %removed.id, name = %removed.name, "menu: item removed");
        Some(removed)
    }
}

#[cfg(test)]
#[path = "tests/menu_tests.rs"]
mod tests;
