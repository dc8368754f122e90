//! Products store: actions, reducer, thunks and toast dismissal.
//!
//! Data flow is one-way. Thunks perform a request through the
//! [`AuthContext`](crate::auth::AuthContext) and emit actions into a
//! [`Dispatch`] sink; the [`Store`] folds them through [`reduce`].

pub mod actions;
mod reducer;
mod state;
pub mod thunks;
mod toast;

use std::mem;

use serde_json::Value;
use tracing::debug;

pub use actions::ProductAction;
pub use reducer::{
    CREATE_SUCCESS_MESSAGE, DELETE_SUCCESS_MESSAGE, READ_SUCCESS_MESSAGE, UPDATE_SUCCESS_MESSAGE,
    reduce,
};
pub use state::ProductsState;
pub use toast::ToastTimer;

/// Sink for actions emitted by thunks.
pub trait Dispatch {
    fn dispatch(&mut self, action: ProductAction);
}

/// Records actions instead of reducing them.
impl Dispatch for Vec<ProductAction> {
    fn dispatch(&mut self, action: ProductAction) {
        self.push(action);
    }
}

/// Holds the current [`ProductsState`].
///
/// With a [`ToastTimer`] attached, every toast-raising action arms the timer
/// and the owner is expected to feed the timer's `ClearToast` back in.
#[derive(Debug, Default)]
pub struct Store {
    state: ProductsState,
    toast_timer: Option<ToastTimer>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toast_timer(timer: ToastTimer) -> Self {
        Self {
            state: ProductsState::default(),
            toast_timer: Some(timer),
        }
    }

    pub fn state(&self) -> &ProductsState {
        &self.state
    }

    pub fn into_state(self) -> ProductsState {
        self.state
    }

    /// Dispatches an action given in its `{ "type", "payload" }` form.
    ///
    /// Unknown or malformed actions leave the state untouched. Returns whether
    /// the action was applied.
    pub fn dispatch_value(&mut self, value: Value) -> bool {
        match serde_json::from_value::<ProductAction>(value) {
            Ok(action) => {
                self.dispatch(action);
                true
            }
            Err(err) => {
                debug!(error = %err, "ignoring unrecognized action");
                false
            }
        }
    }
}

impl Dispatch for Store {
    fn dispatch(&mut self, action: ProductAction) {
        debug!(action = action.kind(), "dispatch");

        let sets_toast = action.sets_toast();
        let clears_toast = matches!(action, ProductAction::ClearToast);
        self.state = reduce(mem::take(&mut self.state), action);

        if let Some(timer) = self.toast_timer.as_mut() {
            if sets_toast {
                timer.arm();
            } else if clears_toast {
                timer.cancel();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use prodmanage_types::Toast;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unknown_action_is_identity() {
        let mut store = Store::new();
        store.dispatch(actions::read_products_failure("boom"));
        let before = store.state().clone();

        assert!(!store.dispatch_value(json!({ "type": "SOMETHING_ELSE", "payload": 1 })));
        assert!(!store.dispatch_value(json!({ "payload": "no tag" })));
        assert!(!store.dispatch_value(json!({ "type": "CREATE_PRODUCT_SUCCESS", "payload": "x" })));
        assert!(!store.dispatch_value(json!({ "type": "DELETE_PRODUCT_SUCCESS" })));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_dispatch_value_applies_known_action() {
        let mut store = Store::new();
        assert!(store.dispatch_value(json!({
            "type": "CREATE_PRODUCT_SUCCESS",
            "payload": { "id": "1", "title": "A", "image": "http://x/1.png",
                         "description": "d", "price": 9.99 }
        })));

        let state = store.into_state();
        assert_eq!(state.products.len(), 1);
        assert_eq!(state.toast, Some(Toast::success(CREATE_SUCCESS_MESSAGE)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_dismissed_by_timer() {
        let (timer, mut rx) = ToastTimer::new(Duration::from_millis(3000));
        let mut store = Store::with_toast_timer(timer);

        store.dispatch(actions::delete_product_success("1"));
        assert!(store.state().toast.is_some());

        let action = rx.recv().await.unwrap();
        store.dispatch(action);
        assert_eq!(store.state().toast, None);
    }
}
