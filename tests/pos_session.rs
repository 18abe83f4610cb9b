use mealdesk::pos::{PosSession, PosSnapshot, PosState};
use mealdesk_api_types::orders::{Order, OrderStatus, OrderType, PriceType};

fn order(id: &str) -> Order {
    Order {
        id: id.into(),
        order_type: OrderType::DineIn,
        price_type: PriceType::Restaurant,
        status: OrderStatus::Preparing,
        customer: Some("c1".into()),
        table: Some("T4".into()),
        lines: Vec::new(),
        total: 4500,
        created_at: None,
    }
}

fn initial() -> PosSnapshot {
    PosSnapshot {
        selected_order_type: None,
        selected_price_type: None,
        show_order_type_modal: true,
        is_edit_mode: false,
        editing_order: None,
    }
}

#[test]
fn reset_always_yields_the_initial_state() {
    let session = PosSession::new();
    session.reset();
    assert_eq!(session.snapshot(), initial());

    session.select_order_type(OrderType::Online, PriceType::Online);
    session.reset();
    assert_eq!(session.snapshot(), initial());

    session.enter_edit_mode(order("o1"), OrderType::DineIn, PriceType::Restaurant);
    session.reset();
    assert_eq!(session.snapshot(), initial());
}

#[test]
fn exiting_edit_mode_equals_a_fresh_reset() {
    let edited = PosSession::new();
    edited.enter_edit_mode(order("o1"), OrderType::DineIn, PriceType::Restaurant);
    assert_eq!(edited.state(), PosState::EditingOrder);
    edited.exit_edit_mode();

    let fresh = PosSession::new();
    fresh.reset();
    assert_eq!(edited.snapshot(), fresh.snapshot());
}

#[test]
fn clones_share_one_session() {
    let screen = PosSession::new();
    let sidebar = screen.clone();
    sidebar.select_order_type(OrderType::TakeAway, PriceType::Restaurant);
    assert_eq!(
        screen.snapshot().selected_order_type,
        Some(OrderType::TakeAway)
    );
}

#[test]
fn modal_tracks_the_missing_order_type() {
    let session = PosSession::new();
    for order_type in OrderType::ALL {
        session.reset();
        assert!(session.snapshot().show_order_type_modal);
        session.select_order_type(order_type, order_type.default_price_type());
        let snapshot = session.snapshot();
        assert!(!snapshot.show_order_type_modal);
        assert_eq!(snapshot.selected_price_type, Some(order_type.default_price_type()));
    }
}
