//! Point-of-sale screen state.
//!
//! The session tracks which order type and price tier the operator is
//! ringing up, whether the order-type picker is showing, and the order being
//! edited, if any. Transitions are pure ([`PosSnapshot::apply`]); the
//! [`PosSession`] store wraps them in a shared last-write-wins cell that
//! views can watch.

use std::fmt;
use std::sync::Arc;

use mealdesk_api_types::orders::{Order, OrderType, PriceType};
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PosState {
    NoOrder,
    OrderTypeSelected,
    EditingOrder,
}

impl PosState {
    pub fn as_str(self) -> &'static str {
        match self {
            PosState::NoOrder => "no_order",
            PosState::OrderTypeSelected => "order_type_selected",
            PosState::EditingOrder => "editing_order",
        }
    }
}

impl fmt::Display for PosState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the POS screen renders from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PosSnapshot {
    pub selected_order_type: Option<OrderType>,
    pub selected_price_type: Option<PriceType>,
    pub show_order_type_modal: bool,
    pub is_edit_mode: bool,
    pub editing_order: Option<Order>,
}

impl Default for PosSnapshot {
    fn default() -> Self {
        Self {
            selected_order_type: None,
            selected_price_type: None,
            show_order_type_modal: true,
            is_edit_mode: false,
            editing_order: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PosAction {
    SelectOrderType {
        order_type: OrderType,
        price_type: PriceType,
    },
    OpenOrderTypeModal,
    CloseOrderTypeModal,
    EnterEditMode {
        order: Box<Order>,
        order_type: OrderType,
        price_type: PriceType,
    },
    ExitEditMode,
    Reset,
}

impl PosAction {
    fn name(&self) -> &'static str {
        match self {
            PosAction::SelectOrderType { .. } => "select_order_type",
            PosAction::OpenOrderTypeModal => "open_order_type_modal",
            PosAction::CloseOrderTypeModal => "close_order_type_modal",
            PosAction::EnterEditMode { .. } => "enter_edit_mode",
            PosAction::ExitEditMode => "exit_edit_mode",
            PosAction::Reset => "reset",
        }
    }
}

impl PosSnapshot {
    pub fn state(&self) -> PosState {
        if self.is_edit_mode {
            PosState::EditingOrder
        } else if self.selected_order_type.is_some() {
            PosState::OrderTypeSelected
        } else {
            PosState::NoOrder
        }
    }

    /// Apply one transition. Never fails.
    pub fn apply(&mut self, action: PosAction) {
        match action {
            // While editing, this retypes the order being edited.
            PosAction::SelectOrderType {
                order_type,
                price_type,
            } => {
                self.selected_order_type = Some(order_type);
                self.selected_price_type = Some(price_type);
                self.show_order_type_modal = false;
            }
            PosAction::OpenOrderTypeModal => self.show_order_type_modal = true,
            // The picker stays up until an order type exists.
            PosAction::CloseOrderTypeModal => {
                if self.selected_order_type.is_some() {
                    self.show_order_type_modal = false;
                }
            }
            PosAction::EnterEditMode {
                order,
                order_type,
                price_type,
            } => {
                self.selected_order_type = Some(order_type);
                self.selected_price_type = Some(price_type);
                self.show_order_type_modal = false;
                self.is_edit_mode = true;
                self.editing_order = Some(*order);
            }
            PosAction::ExitEditMode => {
                if self.is_edit_mode {
                    *self = Self::default();
                }
            }
            PosAction::Reset => *self = Self::default(),
        }
    }
}

/// Shared, watchable POS session. Clones share state.
#[derive(Debug, Clone)]
pub struct PosSession {
    state: Arc<watch::Sender<PosSnapshot>>,
}

impl Default for PosSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PosSession {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(PosSnapshot::default());
        Self {
            state: Arc::new(sender),
        }
    }

    pub fn snapshot(&self) -> PosSnapshot {
        self.state.borrow().clone()
    }

    pub fn state(&self) -> PosState {
        self.state.borrow().state()
    }

    pub fn subscribe(&self) -> watch::Receiver<PosSnapshot> {
        self.state.subscribe()
    }

    pub fn dispatch(&self, action: PosAction) {
        let name = action.name();
        self.state.send_modify(|snapshot| {
            let from = snapshot.state();
            snapshot.apply(action);
            debug!(
                target = "mealdesk::pos",
                action = name,
                from = %from,
                to = %snapshot.state(),
                "pos transition"
            );
        });
    }

    pub fn select_order_type(&self, order_type: OrderType, price_type: PriceType) {
        self.dispatch(PosAction::SelectOrderType {
            order_type,
            price_type,
        });
    }

    pub fn open_order_type_modal(&self) {
        self.dispatch(PosAction::OpenOrderTypeModal);
    }

    pub fn close_order_type_modal(&self) {
        self.dispatch(PosAction::CloseOrderTypeModal);
    }

    pub fn enter_edit_mode(&self, order: Order, order_type: OrderType, price_type: PriceType) {
        self.dispatch(PosAction::EnterEditMode {
            order: Box::new(order),
            order_type,
            price_type,
        });
    }

    pub fn exit_edit_mode(&self) {
        self.dispatch(PosAction::ExitEditMode);
    }

    pub fn reset(&self) {
        self.dispatch(PosAction::Reset);
    }
}
