use crate::store::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterIntent {
    Increment,
    Decrement,
    Reset,
    Set(i64),
}

impl Intent for CounterIntent {}
