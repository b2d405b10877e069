//! Payload validation against the declared product field table.
//!
//! Validation is non-short-circuiting: every failing field is collected, so
//! a client sees the complete list in one response. The validator is pure and
//! stateless; it never logs and never swallows an error.

use crate::types::Product;
use serde_json::Value;
use std::fmt;

/// JSON object payload as received from the transport layer.
pub type Payload = serde_json::Map<String, Value>;

/// Types a product field may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FieldType {
    Text,
    Number,
}

/// A single rule in the product field table.
struct FieldRule {
    name: &'static str,
    field_type: FieldType,
    required: bool,
}

/// The declared product schema.
///
/// `id` is deliberately not listed: it is assigned by the store and never
/// accepted from a payload. A required text field must also be non-empty
/// whenever it is present.
const PRODUCT_FIELDS: &[FieldRule] = &[
    FieldRule {
        name: "nome",
        field_type: FieldType::Text,
        required: true,
    },
    FieldRule {
        name: "preco",
        field_type: FieldType::Number,
        required: true,
    },
    FieldRule {
        name: "descricao",
        field_type: FieldType::Text,
        required: false,
    },
];

/// One per-field validation failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the failing field.
    pub field: &'static str,

    /// Client-facing message.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Accumulated validation failures, one entry per failing field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: String) {
        self.errors.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Client-facing messages, in field-table order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
            first = false;
        }
        Ok(())
    }
}

/// Outcome of full validation: everything needed to build or replace a record.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedProduct {
    pub nome: String,
    pub preco: f64,
    pub descricao: Option<String>,
}

/// Outcome of partial validation: only the fields the payload named.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductPatch {
    pub nome: Option<String>,
    pub preco: Option<f64>,
    pub descricao: Option<String>,
}

impl ProductPatch {
    /// Merge the validated fields into `product`, leaving every field the
    /// payload did not name untouched.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(nome) = &self.nome {
            product.nome = nome.clone();
        }
        if let Some(preco) = self.preco {
            product.preco = preco;
        }
        if let Some(descricao) = &self.descricao {
            product.descricao = Some(descricao.clone());
        }
    }
}

/// Validate a payload against the full product schema.
///
/// Requires `nome` (non-empty string) and `preco` (number) to be present and
/// type-correct; `descricao`, when present, must be a string. Unknown fields
/// are ignored. Numbers are not coerced from strings.
pub fn validate_full(payload: &Payload) -> Result<ValidatedProduct, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let mut nome = None;
    let mut preco = None;
    let mut descricao = None;

    for rule in PRODUCT_FIELDS {
        let Some(value) = payload.get(rule.name) else {
            if rule.required {
                errors.push(rule.name, format!("{} is a required field", rule.name));
            }
            continue;
        };

        match (rule.name, rule.field_type) {
            ("nome", FieldType::Text) => nome = check_text(rule, value, &mut errors),
            ("preco", FieldType::Number) => preco = check_number(rule, value, &mut errors),
            ("descricao", FieldType::Text) => descricao = check_text(rule, value, &mut errors),
            _ => {}
        }
    }

    match (nome, preco) {
        (Some(nome), Some(preco)) if errors.is_empty() => Ok(ValidatedProduct {
            nome,
            preco,
            descricao,
        }),
        _ => Err(errors),
    }
}

/// Validate a payload against the schema restricted to the payload's own keys.
///
/// The restricted schema is the static field table filtered by the key set;
/// the same type rules apply to just those fields, and a field absent from
/// the restricted set is not checked even if normally required.
pub fn validate_partial(payload: &Payload) -> Result<ProductPatch, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let mut patch = ProductPatch::default();

    for rule in restricted(payload) {
        let value = &payload[rule.name];
        match (rule.name, rule.field_type) {
            ("nome", FieldType::Text) => patch.nome = check_text(rule, value, &mut errors),
            ("preco", FieldType::Number) => patch.preco = check_number(rule, value, &mut errors),
            ("descricao", FieldType::Text) => {
                patch.descricao = check_text(rule, value, &mut errors)
            }
            _ => {}
        }
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

/// The restricted schema: the field table filtered to keys the payload names.
fn restricted(payload: &Payload) -> impl Iterator<Item = &'static FieldRule> + '_ {
    PRODUCT_FIELDS
        .iter()
        .filter(|rule| payload.contains_key(rule.name))
}

fn check_text(rule: &FieldRule, value: &Value, errors: &mut ValidationErrors) -> Option<String> {
    let Some(text) = value.as_str() else {
        errors.push(rule.name, format!("{} must be a string", rule.name));
        return None;
    };
    if rule.required && text.is_empty() {
        errors.push(rule.name, format!("{} must not be empty", rule.name));
        return None;
    }
    Some(text.to_string())
}

fn check_number(rule: &FieldRule, value: &Value, errors: &mut ValidationErrors) -> Option<f64> {
    match value.as_f64() {
        Some(number) => Some(number),
        None => {
            errors.push(rule.name, format!("{} must be a number", rule.name));
            None
        }
    }
}
