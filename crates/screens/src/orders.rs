//! Order history with a single status filter.

use std::{fmt, str::FromStr};

use shared::domain::{Order, OrderId, OrderItem, OrderStatus, UnknownStatus};
use tracing::debug;

pub const EMPTY_STATE_TITLE: &str = "Nada por aqui";

/// Selected tab of the order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

/// Filter tabs in display order.
pub const FILTER_TABS: [(&str, StatusFilter); 4] = [
    ("Todos", StatusFilter::All),
    ("Em preparo", StatusFilter::Only(OrderStatus::InProgress)),
    ("Entregues", StatusFilter::Only(OrderStatus::Delivered)),
    ("Cancelados", StatusFilter::Only(OrderStatus::Cancelled)),
];

impl StatusFilter {
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    pub fn empty_state_message(self) -> &'static str {
        match self {
            StatusFilter::Only(OrderStatus::Delivered) => "Nenhum pedido entregue ainda.",
            StatusFilter::Only(OrderStatus::InProgress) => "Você não tem pedidos em preparo.",
            StatusFilter::Only(OrderStatus::Cancelled) => "Nenhum pedido foi cancelado.",
            StatusFilter::All => "Você ainda não fez nenhum pedido.",
        }
    }
}

impl From<OrderStatus> for StatusFilter {
    fn from(status: OrderStatus) -> Self {
        StatusFilter::Only(status)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("todos") {
            return Ok(StatusFilter::All);
        }
        trimmed.parse().map(StatusFilter::Only)
    }
}

/// Orders matching `filter`, in their original order.
pub fn filter_orders(orders: &[Order], filter: StatusFilter) -> Vec<&Order> {
    orders
        .iter()
        .filter(|order| filter.matches(order.status))
        .collect()
}

pub fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            id: OrderId::new("1234"),
            date: "16 Maio, 14:30".to_string(),
            status: OrderStatus::Delivered,
            items: vec![
                OrderItem::new("X-Burger", 1, 18.90),
                OrderItem::new("Batata Frita", 1, 12.50),
                OrderItem::new("Coca-Cola", 2, 8.00),
            ],
            total: Some(47.40),
        },
        Order {
            id: OrderId::new("1235"),
            date: "16 Maio, 16:45".to_string(),
            status: OrderStatus::InProgress,
            items: vec![
                OrderItem::new("Pizza Margherita", 1, 45.00),
                OrderItem::new("Água Mineral", 1, 5.00),
            ],
            total: Some(50.00),
        },
        Order {
            id: OrderId::new("1236"),
            date: "15 Maio, 20:15".to_string(),
            status: OrderStatus::Cancelled,
            items: vec![
                OrderItem::new("Salada Caesar", 1, 28.50),
                OrderItem::new("Suco de Laranja", 1, 9.00),
            ],
            total: Some(37.50),
        },
        Order {
            id: OrderId::new("1237"),
            date: "14 Maio, 13:20".to_string(),
            status: OrderStatus::Delivered,
            items: vec![
                OrderItem::new("Parmegiana", 1, 36.90),
                OrderItem::new("Arroz", 1, 8.00),
                OrderItem::new("Guaraná", 1, 7.50),
            ],
            total: Some(52.40),
        },
    ]
}

#[derive(Debug, Clone)]
pub struct OrdersScreen {
    orders: Vec<Order>,
    filter: StatusFilter,
}

impl Default for OrdersScreen {
    fn default() -> Self {
        Self::new(sample_orders())
    }
}

impl OrdersScreen {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders,
            filter: StatusFilter::All,
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn select_filter(&mut self, filter: StatusFilter) {
        debug!(%filter, "orders: filter selected");
        self.filter = filter;
    }

    pub fn visible_orders(&self) -> Vec<&Order> {
        filter_orders(&self.orders, self.filter)
    }

    /// Message for the empty list, `None` while something is visible.
    pub fn empty_state(&self) -> Option<&'static str> {
        if self.orders.iter().any(|order| self.filter.matches(order.status)) {
            None
        } else {
            Some(self.filter.empty_state_message())
        }
    }

    pub fn press_order(&self, id: &OrderId) -> Option<&Order> {
        let order = self.orders.iter().find(|order| &order.id == id)?;
        debug!(order_id = %order.id, status = %order.status, "orders: order pressed");
        Some(order)
    }
}

#[cfg(test)]
#[path = "tests/orders_tests.rs"]
mod tests;
