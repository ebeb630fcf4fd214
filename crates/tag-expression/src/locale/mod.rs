//! Localized token-type names.
//!
//! Diagnostics such as "a Number cannot follow a Tag" name the neighbouring token types. The
//! host renders the text, but the type names travel inside the message params, so they are
//! resolved here against a [`TypeNames`] table.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::error::ConfigError;
use crate::token::TokenType;

/// Default names, stored outside the Rust source so translators can edit them directly.
static EN_US_TSV: &str = include_str!("data/en-US.tsv");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeNames {
    names: HashMap<TokenType, String>,
}

impl TypeNames {
    /// The embedded `en-US` table, parsed once.
    pub fn english() -> Arc<TypeNames> {
        static EN_US: OnceLock<Arc<TypeNames>> = OnceLock::new();
        EN_US
            .get_or_init(|| {
                let names = TypeNames::from_tsv(EN_US_TSV)
                    .unwrap_or_else(|err| panic!("invalid embedded en-US type names: {err}"));
                Arc::new(names)
            })
            .clone()
    }

    /// Parses a `<TOKEN_TYPE>\t<name>` table. Blank lines and `#` comments are skipped.
    pub fn from_tsv(data: &str) -> Result<TypeNames, ConfigError> {
        let mut names = HashMap::new();
        for (idx, raw_line) in data.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((ty, name)) = line.split_once('\t') else {
                return Err(ConfigError::TypeNameTable {
                    line: line_no,
                    reason: format!("expected TSV, got {line:?}"),
                });
            };
            let ty = TokenType::from_name(ty).ok_or_else(|| ConfigError::TypeNameTable {
                line: line_no,
                reason: format!("unknown token type {:?}", ty.trim()),
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::TypeNameTable {
                    line: line_no,
                    reason: "empty name".to_string(),
                });
            }
            if names.insert(ty, name.to_string()).is_some() {
                return Err(ConfigError::TypeNameTable {
                    line: line_no,
                    reason: format!("duplicate entry for {ty}"),
                });
            }
        }
        Ok(TypeNames { names })
    }

    /// Returns a copy with the given entries replaced. Keys are token type identifiers such
    /// as `LPAREN` or `CONDITIONAL_OPERATOR`.
    pub fn with_overrides<I, K, V>(&self, overrides: I) -> Result<TypeNames, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut names = self.names.clone();
        for (key, name) in overrides {
            let ty = TokenType::from_name(key.as_ref()).ok_or_else(|| {
                ConfigError::UnknownTokenType {
                    name: key.as_ref().to_string(),
                }
            })?;
            names.insert(ty, name.into());
        }
        Ok(TypeNames { names })
    }

    /// Display name for `ty`, falling back to its identifier.
    pub fn name(&self, ty: TokenType) -> &str {
        self.names
            .get(&ty)
            .map(String::as_str)
            .unwrap_or_else(|| ty.as_str())
    }
}
