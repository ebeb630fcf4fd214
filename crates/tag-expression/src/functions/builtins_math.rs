use crate::functions::FunctionSpec;

// Aggregates take any number of parameters from two upwards.
inventory::submit! {
    FunctionSpec {
        name: "MIN",
        min_params: Some(2),
        max_params: None,
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "MAX",
        min_params: Some(2),
        max_params: None,
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "AVG",
        min_params: Some(2),
        max_params: None,
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "SUM",
        min_params: Some(2),
        max_params: None,
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "MEDIAN",
        min_params: Some(2),
        max_params: None,
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "ABS",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "CEIL",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "FLOOR",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "SQRT",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "ROUND",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "LOG",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "EXP",
        min_params: Some(1),
        max_params: Some(1),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "MOD",
        min_params: Some(2),
        max_params: Some(2),
        param_types: &[],
    }
}

inventory::submit! {
    FunctionSpec {
        name: "POW",
        min_params: Some(2),
        max_params: Some(2),
        param_types: &[],
    }
}
