use crate::functions::{FunctionSpec, CONDITIONAL_FUNCTION};

// `:IF(condition, then, else)`. The condition must be a conditional statement and both
// branches must reference a tag or an embedded expression; see `validate::function`.
inventory::submit! {
    FunctionSpec {
        name: CONDITIONAL_FUNCTION,
        min_params: Some(3),
        max_params: Some(3),
        param_types: &[],
    }
}
