//! Built-in function catalog.
//!
//! Every built-in is registered with [`inventory::submit!`] from one of the `builtins_*`
//! modules. The registry is collected once into a process-wide, read-only map; per-host data
//! such as help text lives on a [`FunctionCatalog`] that is carried by the lexer configuration.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use crate::token::TokenType;

// Built-in registrations live in dedicated modules, grouped by family.
mod builtins_conditional;
mod builtins_math;
mod builtins_series;
mod builtins_trig;

/// Name of the conditional function whose first parameter is a conditional statement.
pub const CONDITIONAL_FUNCTION: &str = "IF";

#[derive(Debug)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub min_params: Option<usize>,
    pub max_params: Option<usize>,
    /// Required token type for every non-whitespace token of a parameter, keyed by the
    /// 0-indexed parameter position.
    pub param_types: &'static [(usize, TokenType)],
}

impl FunctionSpec {
    pub fn param_type(&self, index: usize) -> Option<TokenType> {
        self.param_types
            .iter()
            .find(|(idx, _)| *idx == index)
            .map(|(_, ty)| *ty)
    }

    pub fn is_conditional(&self) -> bool {
        self.name.eq_ignore_ascii_case(CONDITIONAL_FUNCTION)
    }
}

inventory::collect!(FunctionSpec);

/// Iterate all [`FunctionSpec`] registrations collected via [`inventory`].
pub fn iter_function_specs() -> impl Iterator<Item = &'static FunctionSpec> {
    inventory::iter::<FunctionSpec>.into_iter()
}

fn registry() -> &'static HashMap<String, &'static FunctionSpec> {
    static REGISTRY: OnceLock<HashMap<String, &'static FunctionSpec>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map = HashMap::new();
        for spec in inventory::iter::<FunctionSpec> {
            map.insert(spec.name.to_ascii_uppercase(), spec);
        }
        map
    })
}

/// Case-insensitive lookup in the built-in registry.
pub fn lookup_function(name: &str) -> Option<&'static FunctionSpec> {
    registry().get(&name.trim().to_ascii_uppercase()).copied()
}

#[derive(Debug, Clone)]
pub struct FunctionEntry {
    pub spec: &'static FunctionSpec,
    pub help: String,
}

/// The functions a lexer accepts, together with their host-supplied help text.
///
/// Catalogs are immutable; [`FunctionCatalog::with_help`] returns a new catalog.
#[derive(Debug, Clone)]
pub struct FunctionCatalog {
    entries: BTreeMap<String, FunctionEntry>,
}

impl FunctionCatalog {
    /// The built-in catalog without help text. Shared by every default configuration.
    pub fn builtin() -> Arc<FunctionCatalog> {
        static BUILTIN: OnceLock<Arc<FunctionCatalog>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                let entries = registry()
                    .iter()
                    .map(|(key, spec)| {
                        (
                            key.clone(),
                            FunctionEntry {
                                spec,
                                help: String::new(),
                            },
                        )
                    })
                    .collect();
                Arc::new(FunctionCatalog { entries })
            })
            .clone()
    }

    pub fn get(&self, name: &str) -> Option<&'static FunctionSpec> {
        self.entry(name).map(|entry| entry.spec)
    }

    pub fn entry(&self, name: &str) -> Option<&FunctionEntry> {
        self.entries.get(&name.trim().to_ascii_uppercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    pub fn help(&self, name: &str) -> Option<&str> {
        self.entry(name).map(|entry| entry.help.as_str())
    }

    /// Entries ordered by function name.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionEntry> {
        self.entries.values()
    }

    /// `(name, help)` pairs, ordered by function name.
    pub fn functions(&self) -> Vec<(&'static str, &str)> {
        self.iter()
            .map(|entry| (entry.spec.name, entry.help.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy of the catalog with help text replaced for every function named in
    /// `help`. Names are matched case-insensitively; unknown names are ignored.
    pub fn with_help<I, K, V>(&self, help: I) -> FunctionCatalog
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut entries = self.entries.clone();
        for (name, text) in help {
            let key = name.as_ref().trim().to_ascii_uppercase();
            match entries.get_mut(&key) {
                Some(entry) => entry.help = text.into(),
                None => log::debug!("ignoring help text for unknown function {key:?}"),
            }
        }
        FunctionCatalog { entries }
    }
}
