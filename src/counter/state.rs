use crate::store::StoreState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterState {
    pub count: i64,
}

impl StoreState for CounterState {}

impl CounterState {
    pub fn double_count(&self) -> i64 {
        self.count.saturating_mul(2)
    }

    pub fn is_positive(&self) -> bool {
        self.count > 0
    }
}
