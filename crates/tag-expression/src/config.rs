//! Lexer configuration.
//!
//! A [`LexerConfig`] bundles every table the lexer and validators read: the function catalog,
//! the embedded expression catalog and the localized token-type names. Configurations are
//! immutable and cheap to clone; every `with_*` method returns a new configuration and leaves
//! the receiver (and anything sharing its tables) untouched.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::expressions::{ExpressionCatalog, ExpressionDefinition};
use crate::functions::FunctionCatalog;
use crate::locale::TypeNames;

#[derive(Debug, Clone)]
pub struct LexerConfig {
    functions: Arc<FunctionCatalog>,
    expressions: Arc<ExpressionCatalog>,
    type_names: Arc<TypeNames>,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            functions: FunctionCatalog::builtin(),
            expressions: Arc::new(ExpressionCatalog::default()),
            type_names: TypeNames::english(),
        }
    }
}

impl LexerConfig {
    pub fn functions(&self) -> &FunctionCatalog {
        &self.functions
    }

    pub fn expressions(&self) -> &ExpressionCatalog {
        &self.expressions
    }

    pub fn type_names(&self) -> &TypeNames {
        &self.type_names
    }

    pub fn with_function_help<I, K, V>(&self, help: I) -> LexerConfig
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        LexerConfig {
            functions: Arc::new(self.functions.with_help(help)),
            ..self.clone()
        }
    }

    /// Replaces the embedded expression catalog.
    pub fn with_expressions<I>(&self, expressions: I) -> LexerConfig
    where
        I: IntoIterator<Item = ExpressionDefinition>,
    {
        LexerConfig {
            expressions: Arc::new(ExpressionCatalog::new(expressions)),
            ..self.clone()
        }
    }

    pub fn with_type_names(&self, type_names: TypeNames) -> LexerConfig {
        LexerConfig {
            type_names: Arc::new(type_names),
            ..self.clone()
        }
    }

    /// Applies host setup data. Sections missing from `settings` keep their current tables.
    pub fn with_settings(&self, settings: LexerSettings) -> Result<LexerConfig, ConfigError> {
        let mut config = self.clone();
        if !settings.function_help.is_empty() {
            config = config.with_function_help(settings.function_help);
        }
        if let Some(expressions) = settings.expressions {
            config = config.with_expressions(expressions);
        }
        if !settings.type_names.is_empty() {
            let names = config.type_names.with_overrides(settings.type_names)?;
            config = config.with_type_names(names);
        }
        Ok(config)
    }
}

/// Host setup data, typically shipped as JSON next to the UI string tables:
///
/// ```json
/// {
///   "functionHelp": { "ABS": "Absolute value" },
///   "expressions": [{ "name": "NetPower" }],
///   "typeNames": { "TAG": "Tag" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LexerSettings {
    #[serde(default)]
    pub function_help: BTreeMap<String, String>,
    #[serde(default)]
    pub expressions: Option<Vec<ExpressionDefinition>>,
    #[serde(default)]
    pub type_names: BTreeMap<String, String>,
}

impl LexerSettings {
    pub fn from_json(json: &str) -> Result<LexerSettings, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
