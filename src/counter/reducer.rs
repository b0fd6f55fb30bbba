use crate::counter::intent::CounterIntent;
use crate::counter::state::CounterState;
use crate::store::Reducer;

pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Intent = CounterIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        let count = match intent {
            CounterIntent::Increment => state.count.saturating_add(1),
            CounterIntent::Decrement => state.count.saturating_sub(1),
            CounterIntent::Reset => 0,
            CounterIntent::Set(value) => value,
        };
        CounterState { count }
    }
}
