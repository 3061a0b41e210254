use super::*;

fn ids(orders: &[&Order]) -> Vec<String> {
    orders.iter().map(|order| order.id.to_string()).collect()
}

fn all_filters() -> Vec<StatusFilter> {
    FILTER_TABS.iter().map(|(_, filter)| *filter).collect()
}

#[test]
fn cancelled_filter_returns_only_1236() {
    let orders = sample_orders();
    let cancelled = filter_orders(&orders, StatusFilter::Only(OrderStatus::Cancelled));
    assert_eq!(ids(&cancelled), ["1236"]);
}

#[test]
fn all_keeps_every_order_in_order() {
    let orders = sample_orders();
    let all = filter_orders(&orders, StatusFilter::All);
    assert_eq!(all.len(), orders.len());
    assert_eq!(ids(&all), ["1234", "1235", "1236", "1237"]);
}

#[test]
fn every_filter_yields_an_order_preserving_subsequence() {
    let orders = sample_orders();
    for filter in all_filters() {
        let result = filter_orders(&orders, filter);
        let mut cursor = orders.iter();
        for picked in &result {
            assert!(filter.matches(picked.status));
            assert!(
                cursor.any(|order| std::ptr::eq(order, *picked)),
                "{filter} broke ordering"
            );
        }
        let expected = orders.iter().filter(|o| filter.matches(o.status)).count();
        assert_eq!(result.len(), expected);
    }
}

#[test]
fn delivered_filter_keeps_relative_order() {
    let orders = sample_orders();
    let delivered = filter_orders(&orders, OrderStatus::Delivered.into());
    assert_eq!(ids(&delivered), ["1234", "1237"]);
}

#[test]
fn empty_state_messages_cover_every_selector() {
    let messages: Vec<&str> = all_filters()
        .into_iter()
        .map(StatusFilter::empty_state_message)
        .collect();
    assert_eq!(
        messages,
        [
            "Você ainda não fez nenhum pedido.",
            "Você não tem pedidos em preparo.",
            "Nenhum pedido entregue ainda.",
            "Nenhum pedido foi cancelado.",
        ]
    );
}

#[test]
fn screen_reports_empty_state_for_missing_status() {
    let orders: Vec<Order> = sample_orders()
        .into_iter()
        .filter(|order| order.status != OrderStatus::Cancelled)
        .collect();
    let mut screen = OrdersScreen::new(orders);
    assert_eq!(screen.empty_state(), None);

    screen.select_filter(StatusFilter::Only(OrderStatus::Cancelled));
    assert!(screen.visible_orders().is_empty());
    assert_eq!(screen.empty_state(), Some("Nenhum pedido foi cancelado."));
}

#[test]
fn empty_screen_uses_default_message() {
    let screen = OrdersScreen::new(Vec::new());
    assert_eq!(screen.empty_state(), Some("Você ainda não fez nenhum pedido."));
}

#[test]
fn filter_parses_from_text() {
    assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
    assert_eq!("Todos".parse::<StatusFilter>(), Ok(StatusFilter::All));
    assert_eq!(
        "em progresso".parse::<StatusFilter>(),
        Ok(StatusFilter::Only(OrderStatus::InProgress))
    );
    assert_eq!(
        "Cancelado".parse::<StatusFilter>(),
        Ok(StatusFilter::Only(OrderStatus::Cancelled))
    );
    assert!("pending".parse::<StatusFilter>().is_err());
}

#[test]
fn totals_are_kept_as_given() {
    let orders = sample_orders();
    // 18.90 + 12.50 + 2 * 8.00 = 47.40, but nothing enforces it
    assert!((orders[0].items_subtotal() - 47.40).abs() < 1e-9);

    let mut screen = OrdersScreen::new(vec![Order {
        total: Some(1.0),
        ..orders[1].clone()
    }]);
    screen.select_filter(StatusFilter::All);
    assert_eq!(screen.visible_orders()[0].total, Some(1.0));
}

#[test]
fn pressing_an_order_finds_it_by_id() {
    let screen = OrdersScreen::default();
    assert_eq!(
        screen.press_order(&OrderId::new("1235")).map(|o| o.status),
        Some(OrderStatus::InProgress)
    );
    assert!(screen.press_order(&OrderId::new("9999")).is_none());
}
