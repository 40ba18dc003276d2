// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RSR value expressions.
//!
//! An expression is a `;` separated list of parsers. Each parser is either a
//! constant or a dynamic reference to a request field:
//!
//! ```text
//! ^1004                              constant "1004"
//! 1004                               constant "1004"
//! ~*req.Account                      field reference
//! ~*req.Account:s/^(\d+)$/+$1/       field reference with search/replace
//! ~*req.Usage{*duration_seconds}     field reference with converters
//! ```
//!
//! Legacy records use a looser grammar where a bare name is a field reference;
//! [`RsrParsers::compile_legacy`] accepts that form.

use crate::meta::{
    AND_SEP, DYNAMIC_DATA_PREFIX, INFIELD_SEP, META_REQ, NESTING_SEP, STATIC_VALUE_PREFIX,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SEARCH_REPLACE_SEP: &str = ":s/";
const CONVERTER_START: &str = "{*";
const CONVERTER_END: &str = "}";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RsrError {
    #[error("empty field reference in <{0}>")]
    EmptyPath(String),
    #[error("invalid search/replace rule <{0}>")]
    InvalidRule(String),
    #[error("invalid regex in <{rule}>: {reason}")]
    Regex { rule: String, reason: String },
    #[error("invalid converter terminator in rule <{0}>")]
    Converter(String),
}

/// A compiled `:s/<search>/<replace>/` rule.
#[derive(Clone, Debug)]
pub struct SearchReplace {
    pub search: Regex,
    pub replace: String,
}

impl PartialEq for SearchReplace {
    fn eq(&self, other: &Self) -> bool {
        self.search.as_str() == other.search.as_str() && self.replace == other.replace
    }
}

impl Eq for SearchReplace {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RsrParser {
    Constant(String),
    Field {
        path: String,
        replacements: Vec<SearchReplace>,
        converters: Vec<String>,
    },
}

impl RsrParser {
    fn parse(rule: &str, bare_is_field: bool) -> Result<Self, RsrError> {
        if let Some(value) = rule.strip_prefix(STATIC_VALUE_PREFIX) {
            return Ok(RsrParser::Constant(value.to_string()));
        }
        match rule.strip_prefix(DYNAMIC_DATA_PREFIX) {
            Some(body) => parse_field(rule, body),
            None if bare_is_field && !rule.is_empty() => parse_field(rule, rule),
            None => Ok(RsrParser::Constant(rule.to_string())),
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, RsrParser::Constant(_))
    }
}

fn parse_field(rule: &str, body: &str) -> Result<RsrParser, RsrError> {
    let (body, converters) = match body.find(CONVERTER_START) {
        Some(idx) => {
            let tail = &body[idx..];
            let inner = tail
                .strip_prefix("{")
                .and_then(|t| t.strip_suffix(CONVERTER_END))
                .ok_or_else(|| RsrError::Converter(rule.to_string()))?;
            (
                &body[..idx],
                inner.split(AND_SEP).map(str::to_string).collect(),
            )
        }
        None => (body, Vec::new()),
    };

    let mut parts = body.split(SEARCH_REPLACE_SEP);
    let path = parts.next().unwrap_or_default();
    if path.is_empty() {
        return Err(RsrError::EmptyPath(rule.to_string()));
    }
    let replacements = parts
        .map(|sr| parse_search_replace(rule, sr))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RsrParser::Field {
        path: namespaced(path),
        replacements,
        converters,
    })
}

fn parse_search_replace(rule: &str, sr: &str) -> Result<SearchReplace, RsrError> {
    let (search, replace) = sr
        .strip_suffix('/')
        .and_then(|s| s.split_once('/'))
        .ok_or_else(|| RsrError::InvalidRule(rule.to_string()))?;
    let search = Regex::new(search).map_err(|e| RsrError::Regex {
        rule: rule.to_string(),
        reason: e.to_string(),
    })?;
    Ok(SearchReplace {
        search,
        replace: replace.to_string(),
    })
}

/// Put un-namespaced paths under `*req`.
fn namespaced(path: &str) -> String {
    if path.starts_with('*') {
        path.to_string()
    } else {
        format!("{}{}{}", META_REQ, NESTING_SEP, path)
    }
}

impl std::fmt::Display for RsrParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RsrParser::Constant(value) => {
                if value.starts_with(DYNAMIC_DATA_PREFIX)
                    || value.starts_with(STATIC_VALUE_PREFIX)
                {
                    f.write_str(STATIC_VALUE_PREFIX)?;
                }
                f.write_str(value)
            }
            RsrParser::Field {
                path,
                replacements,
                converters,
            } => {
                write!(f, "{}{}", DYNAMIC_DATA_PREFIX, path)?;
                for sr in replacements {
                    write!(f, "{}{}/{}/", SEARCH_REPLACE_SEP, sr.search.as_str(), sr.replace)?;
                }
                if !converters.is_empty() {
                    write!(f, "{{{}}}", converters.join(AND_SEP))?;
                }
                Ok(())
            }
        }
    }
}

/// A compiled RSR expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RsrParsers(Vec<RsrParser>);

impl RsrParsers {
    /// Compile an expression in the current grammar.
    pub fn compile(rules: &str) -> Result<Self, RsrError> {
        Self::compile_with(rules, false)
    }

    /// Compile an expression in the legacy grammar, where a bare name is a
    /// reference to that request field.
    pub fn compile_legacy(rules: &str) -> Result<Self, RsrError> {
        Self::compile_with(rules, true)
    }

    fn compile_with(rules: &str, bare_is_field: bool) -> Result<Self, RsrError> {
        rules
            .split(INFIELD_SEP)
            .map(|rule| RsrParser::parse(rule, bare_is_field))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Constants spelling out `text`. The rule separator cannot live inside
    /// one parser, so `a;b` becomes two constants that concatenate back to
    /// `ab`, exactly what compiling the stored rule text yields.
    pub fn literal(text: &str) -> Self {
        Self(
            text.split(INFIELD_SEP)
                .map(|part| RsrParser::Constant(part.to_string()))
                .collect(),
        )
    }

    pub fn parsers(&self) -> &[RsrParser] {
        &self.0
    }

    /// True when no parser reads from the request.
    pub fn is_constant(&self) -> bool {
        self.0.iter().all(RsrParser::is_constant)
    }

    /// Render back to rule text.
    pub fn rules(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for RsrParsers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, parser) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(INFIELD_SEP)?;
            }
            write!(f, "{}", parser)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for RsrParsers {
    type Error = RsrError;

    fn try_from(rules: String) -> Result<Self, Self::Error> {
        Self::compile(&rules)
    }
}

impl From<RsrParsers> for String {
    fn from(p: RsrParsers) -> Self {
        p.rules()
    }
}

#[cfg(test)]
#[path = "rsr_tests.rs"]
mod tests;
