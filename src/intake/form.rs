use std::collections::BTreeMap;

use crate::intake::{fields::FormField, validation};

/// Current values and inline errors of one form.
///
/// `change` clears the edited field's error without re-validating it;
/// `validate_all` is the only place errors are produced.
#[derive(Debug, Clone)]
pub struct FormState<F: FormField> {
    values: BTreeMap<F, String>,
    errors: BTreeMap<F, &'static str>,
}

impl<F: FormField> Default for FormState<F> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }
}

impl<F: FormField> FormState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (F, V)>,
        V: Into<String>,
    {
        let mut state = Self::new();
        for (field, value) in values {
            state.values.insert(field, value.into());
        }
        state
    }

    pub fn value(&self, field: F) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> impl Iterator<Item = (F, &str)> + '_ {
        F::all().iter().map(|field| (*field, self.value(*field)))
    }

    pub fn change(&mut self, field: F, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.errors.remove(&field);
    }

    /// Runs every field rule, replaces the error map with the failures and
    /// reports whether the form can be submitted.
    pub fn validate_all(&mut self) -> bool {
        let errors = F::all()
            .iter()
            .filter_map(|field| {
                field
                    .validate(self.value(*field))
                    .err()
                    .map(|message| (*field, message))
            })
            .collect::<BTreeMap<_, _>>();
        self.errors = errors;

        self.errors.is_empty() && self.required_fields_present()
    }

    pub fn errors(&self) -> &BTreeMap<F, &'static str> {
        &self.errors
    }

    pub fn error(&self, field: F) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
    }

    fn required_fields_present(&self) -> bool {
        F::all()
            .iter()
            .filter(|field| field.is_required())
            .all(|field| validation::present(self.value(*field)).is_some())
    }
}
