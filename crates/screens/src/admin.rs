//! Administrative list of registered restaurants.

use chrono::NaiveDate;
use shared::domain::{Restaurant, RestaurantId};
use thiserror::Error;
use tracing::info;

use crate::alert::Alert;

pub const EMPTY_LIST_MESSAGE: &str = "Nenhum restaurante cadastrado";
pub const DELETE_CONFIRM_TITLE: &str = "Confirmar Exclusão";
pub const DELETE_SUCCESS_MESSAGE: &str = "Restaurante excluído com sucesso!";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("no restaurant with id {0}")]
    UnknownRestaurant(RestaurantId),
}

/// Confirmation asked before a restaurant is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub restaurant_id: RestaurantId,
    pub title: &'static str,
    pub message: String,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn sample_restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant {
            id: RestaurantId::new("1"),
            name: "Lanchonete A".to_string(),
            email: "lanchonete.a@email.com".to_string(),
            registered_at: date(2024, 1, 15),
        },
        Restaurant {
            id: RestaurantId::new("2"),
            name: "Pizzaria Bella".to_string(),
            email: "bella@pizza.com".to_string(),
            registered_at: date(2024, 2, 20),
        },
        Restaurant {
            id: RestaurantId::new("3"),
            name: "Burger King".to_string(),
            email: "contact@burgerking.com".to_string(),
            registered_at: date(2024, 3, 10),
        },
    ]
}

/// `Cadastrado em: 2024-01-15`
pub fn registered_label(restaurant: &Restaurant) -> String {
    format!("Cadastrado em: {}", restaurant.registered_at.format("%Y-%m-%d"))
}

#[derive(Debug, Clone)]
pub struct AdminScreen {
    restaurants: Vec<Restaurant>,
}

impl Default for AdminScreen {
    fn default() -> Self {
        Self::new(sample_restaurants())
    }
}

impl AdminScreen {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.restaurants.is_empty().then_some(EMPTY_LIST_MESSAGE)
    }

    pub fn request_delete(&self, id: &RestaurantId) -> Result<DeletePrompt, AdminError> {
        let restaurant = self
            .restaurants
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| AdminError::UnknownRestaurant(id.clone()))?;
        Ok(DeletePrompt {
            restaurant_id: restaurant.id.clone(),
            title: DELETE_CONFIRM_TITLE,
            message: format!(
                "Tem certeza que deseja excluir o restaurante \"{}\"?",
                restaurant.name
            ),
        })
    }

    /// Removes the restaurant once the prompt is accepted.
    pub fn confirm_delete(&mut self, prompt: &DeletePrompt) -> Result<Alert, AdminError> {
        let position = self
            .restaurants
            .iter()
            .position(|r| r.id == prompt.restaurant_id)
            .ok_or_else(|| AdminError::UnknownRestaurant(prompt.restaurant_id.clone()))?;
        let removed = self.restaurants.remove(position);
        info!(id = %removed.id, name = %removed.name, "admin: restaurant deleted");
        Ok(Alert::titled("Sucesso", DELETE_SUCCESS_MESSAGE))
    }
}

#[cfg(test)]
#[path = "tests/admin_tests.rs"]
mod tests;
