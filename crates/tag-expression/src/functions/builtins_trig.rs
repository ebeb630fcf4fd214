use crate::functions::FunctionSpec;

inventory::submit! {
    FunctionSpec {
        name: "COS",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "SIN",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "TAN",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "ACOS",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "ASIN",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "ATAN",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "CSC",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "SEC",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "COT",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "ATAN2",
        min_params: Some(2),
        max_params: Some(2),
        param_types: &[],
    }
}
