//! Caller-supplied editing schema: prompt labels, allowed values, numeric
//! limits and the action-script key categories.

use std::collections::{HashMap, HashSet};

/// Field shape of an action-script entry, selected by its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// `(key,)`
    NoValue,
    /// `(key,)` or `(key, value)`
    OptionalValue,
    /// `(key, value, extra)`
    ValueAndExtra,
    /// `(key, value)` or `(key, value, extra)`
    OptionalValueAndExtra,
    /// `(key, "x, y")` captured from the pointer or typed.
    Position,
    /// `(key, value, [sub-actions])` or `(key, value, preset-call)`
    ControlFlow,
    /// `(key, value)`
    Generic,
}

/// Lookup table from action key to [`ActionKind`], plus the completion
/// vocabularies used while editing action scripts.
#[derive(Debug, Clone, Default)]
pub struct ActionSchema {
    kinds: HashMap<String, ActionKind>,
    all_keys: Vec<String>,
    preset_values: Vec<String>,
    preset_value_keys: HashSet<String>,
    preset_calls: Vec<String>,
}

impl ActionSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register keys under a kind. A key keeps the first kind it was
    /// registered with.
    #[must_use]
    pub fn with_kind<I, S>(mut self, kind: ActionKind, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            self.kinds.entry(key.into()).or_insert(kind);
        }
        self
    }

    /// Keys offered for completion when entering an action key.
    #[must_use]
    pub fn with_all_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.all_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Preset values offered for the value field of `keys`.
    #[must_use]
    pub fn with_preset_values<I, S, K, T>(mut self, values: I, keys: K) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        K: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.preset_values = values.into_iter().map(Into::into).collect();
        self.preset_value_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Values a control-flow entry may `call` instead of building sub-actions.
    #[must_use]
    pub fn with_preset_calls<I, S>(mut self, calls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preset_calls = calls.into_iter().map(Into::into).collect();
        self
    }

    /// Kind of `key`; unregistered keys are [`ActionKind::Generic`].
    #[must_use]
    pub fn kind_of(&self, key: &str) -> ActionKind {
        self.kinds.get(key).copied().unwrap_or(ActionKind::Generic)
    }

    #[must_use]
    pub fn all_keys(&self) -> Option<&[String]> {
        non_empty(&self.all_keys)
    }

    /// Preset values for `key`'s value field, if `key` takes them.
    #[must_use]
    pub fn preset_values_for(&self, key: &str) -> Option<&[String]> {
        if self.preset_value_keys.contains(key) {
            non_empty(&self.preset_values)
        } else {
            None
        }
    }

    #[must_use]
    pub fn preset_calls(&self) -> Option<&[String]> {
        non_empty(&self.preset_calls)
    }
}

fn non_empty(values: &[String]) -> Option<&[String]> {
    (!values.is_empty()).then_some(values)
}

/// Allowed values per position.
///
/// A single set applies to every position; otherwise position `i` uses
/// set `i` and positions beyond the last set are free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedValues(Vec<Vec<String>>);

impl AllowedValues {
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// One set shared by every position.
    #[must_use]
    pub fn uniform<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(vec![values.into_iter().map(Into::into).collect()])
    }

    /// One set per position.
    #[must_use]
    pub fn positional(sets: Vec<Vec<String>>) -> Self {
        Self(sets)
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        self.0.is_empty()
    }

    /// Allowed set for `position`, if constrained.
    #[must_use]
    pub fn at(&self, position: usize) -> Option<&[String]> {
        let set = if self.0.len() == 1 {
            self.0.first()
        } else {
            self.0.get(position)
        };
        set.and_then(|values| non_empty(values))
    }
}

/// Inclusive numeric bounds; the variant fixes integer or float coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Limits {
    Int { min: i64, max: i64 },
    Float { min: f64, max: f64 },
}

/// Prompt labels. Unset labels fall back to context-specific defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompts {
    pub value: Option<String>,
    pub key: Option<String>,
    pub additional_value: Option<String>,
    pub preset_additional_value: Option<String>,
    pub end_of_list: Option<String>,
    /// Fixed per-position labels; when set, tuples have fixed arity.
    pub values: Vec<String>,
}

impl Prompts {
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or("value")
    }

    #[must_use]
    pub fn key_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.key.as_deref().unwrap_or(fallback)
    }

    #[must_use]
    pub fn additional_value(&self) -> &str {
        self.additional_value
            .as_deref()
            .unwrap_or("additional value")
    }

    #[must_use]
    pub fn preset_additional_value(&self) -> &str {
        self.preset_additional_value
            .as_deref()
            .unwrap_or("preset additional value")
    }

    #[must_use]
    pub fn end_of_list_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.end_of_list.as_deref().unwrap_or(fallback)
    }
}

/// Everything a caller can tune about one editing call.
#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    /// Offer `back` (never at the first position).
    pub can_back: bool,
    /// Offer structural `insert`/`delete`; `delete` replaces `default`.
    pub can_insert_delete: bool,
    /// Value seeded into a missing option; discarded again on quit if
    /// still unchanged.
    pub initial_value: Option<String>,
    pub prompts: Prompts,
    pub schema: ActionSchema,
    pub allowed: AllowedValues,
    pub limits: Option<Limits>,
}

impl EditOptions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            can_back: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_insert_delete(mut self, enabled: bool) -> Self {
        self.can_insert_delete = enabled;
        self
    }

    #[must_use]
    pub fn with_back(mut self, enabled: bool) -> Self {
        self.can_back = enabled;
        self
    }

    #[must_use]
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: ActionSchema) -> Self {
        self.schema = schema;
        self
    }

    #[must_use]
    pub fn with_allowed(mut self, allowed: AllowedValues) -> Self {
        self.allowed = allowed;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }
}
