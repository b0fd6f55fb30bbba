//! Counter store: a single integer with derived values.

mod intent;
mod reducer;
mod state;

pub use intent::CounterIntent;
pub use reducer::CounterReducer;
pub use state::CounterState;

use crate::store::Store;

pub type CounterStore = Store<CounterReducer>;

impl Store<CounterReducer> {
    pub fn increment(&self) {
        self.apply(CounterIntent::Increment);
    }

    pub fn decrement(&self) {
        self.apply(CounterIntent::Decrement);
    }

    pub fn reset(&self) {
        self.apply(CounterIntent::Reset);
    }

    pub fn set_count(&self, value: i64) {
        self.apply(CounterIntent::Set(value));
    }

    pub fn count(&self) -> i64 {
        self.current().count
    }

    pub fn double_count(&self) -> i64 {
        self.current().double_count()
    }

    pub fn is_positive(&self) -> bool {
        self.current().is_positive()
    }

    fn apply(&self, intent: CounterIntent) {
        if self.dispatch(intent) {
            tracing::debug!(?intent, count = self.count(), "Counter updated");
        }
    }
}
