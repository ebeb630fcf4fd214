use crate::functions::FunctionSpec;
use crate::token::TokenType;

// Moving average over a tag's series: `:MAVG($asset|tag|, window)`.
inventory::submit! {
    FunctionSpec {
        name: "MAVG",
        min_params: Some(2),
        max_params: Some(2),
        param_types: &[(0, TokenType::Tag), (1, TokenType::Number)],
    }
}
