//! Owned view of slash command options.
//!
//! Serenity's `ResolvedOption` borrows from the interaction. Commands instead receive
//! an `OptionMap`, which owns its values and can be built by hand in tests.

use std::collections::HashMap;

use serenity::all::{ResolvedOption, ResolvedValue};

use crate::server::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

/// Option values of one invocation keyed by option name.
#[derive(Debug, Clone, Default)]
pub struct OptionMap {
    values: HashMap<String, OptionValue>,
}

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits resolved options into the invoked subcommand, if any, and its values.
    pub fn from_resolved(options: Vec<ResolvedOption<'_>>) -> (Option<String>, Self) {
        let mut map = Self::new();

        for option in options {
            match option.value {
                ResolvedValue::SubCommand(nested) => {
                    let (_, nested) = Self::from_resolved(nested);
                    return (Some(option.name.to_string()), nested);
                }
                ResolvedValue::String(value) => {
                    map.insert(option.name, OptionValue::String(value.to_string()))
                }
                ResolvedValue::Integer(value) => map.insert(option.name, OptionValue::Integer(value)),
                ResolvedValue::Boolean(value) => map.insert(option.name, OptionValue::Boolean(value)),
                _ => {
                    tracing::debug!(option = option.name, "Ignoring unsupported option type");
                }
            }
        }

        (None, map)
    }

    pub fn insert(&mut self, name: &str, value: OptionValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Builder form of `insert`, used to assemble invocations in tests.
    pub fn with(mut self, name: &str, value: OptionValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Trimmed string value; blank strings count as absent.
    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::String(value)) if !value.trim().is_empty() => Some(value.trim()),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(OptionValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(OptionValue::Boolean(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn required_string(&self, name: &str) -> Result<&str, AppError> {
        self.string(name).ok_or_else(|| missing(name))
    }

    pub fn required_integer(&self, name: &str) -> Result<i64, AppError> {
        self.integer(name).ok_or_else(|| missing(name))
    }

    pub fn required_boolean(&self, name: &str) -> Result<bool, AppError> {
        self.boolean(name).ok_or_else(|| missing(name))
    }

    /// Integer option narrowed to `i32`, as the panel API uses for ids and limits.
    pub fn i32(&self, name: &str) -> Result<Option<i32>, AppError> {
        self.integer(name)
            .map(|value| {
                i32::try_from(value).map_err(|_| {
                    AppError::BadRequest(format!("Option '{}' is out of range: {}", name, value))
                })
            })
            .transpose()
    }

    pub fn required_i32(&self, name: &str) -> Result<i32, AppError> {
        self.i32(name)?.ok_or_else(|| missing(name))
    }
}

fn missing(name: &str) -> AppError {
    AppError::BadRequest(format!("Missing required option '{}'", name))
}
