use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{BatchError, ErrorKind},
    interpreter::{
        evaluator::core::{Context, Evaluator},
        value::core::{Number, NumericMode},
    },
};

/// One independent expression of a batch request.
///
/// Only `expr` is required.
///
/// # Example
/// ```
/// use reckon::batch::BatchItem;
///
/// let item: BatchItem = serde_json::from_str(r#"{"expr": "ans * 2", "ans": 21}"#).unwrap();
/// assert_eq!(item.expr, "ans * 2");
/// assert!(!item.decimal);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchItem {
    /// The expression to evaluate.
    pub expr:      String,
    /// The value of `ans`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ans:       Option<Number>,
    /// Variables the expression may refer to.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub variables: HashMap<String, Number>,
    /// Evaluate in exact-decimal mode.
    #[serde(default)]
    pub decimal:   bool,
}

impl BatchItem {
    /// An item evaluating `expr` in float mode with an empty context.
    pub fn new(expr: impl Into<String>) -> Self {
        Self { expr: expr.into(),
               ..Self::default() }
    }
}

/// The result of one batch item.
///
/// Serializes as `{"result": ...}` or `{"error": "...", "kind": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    /// The item evaluated to a number.
    Success {
        /// The value.
        result: Number,
    },
    /// The item could not be read or evaluated.
    Failure {
        /// Human-readable message.
        error: String,
        /// Taxonomy tag, absent when the item itself was malformed.
        #[serde(skip_serializing_if = "Option::is_none")]
        kind:  Option<ErrorKind>,
    },
}

impl BatchOutcome {
    /// Returns `true` for a successful item.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl Evaluator {
    /// Evaluates every item independently, in order.
    ///
    /// A failing item never affects the others; the returned list always has
    /// one outcome per item.
    ///
    /// # Example
    /// ```
    /// use reckon::{
    ///     Evaluator,
    ///     batch::{BatchItem, BatchOutcome},
    /// };
    ///
    /// let outcomes = Evaluator::new().evaluate_batch(&[BatchItem::new("1 + 1"),
    ///                                                  BatchItem::new("1 / 0")]);
    /// assert!(outcomes[0].is_success());
    /// assert!(!outcomes[1].is_success());
    /// ```
    #[must_use]
    pub fn evaluate_batch(&self, items: &[BatchItem]) -> Vec<BatchOutcome> {
        items.iter().map(|item| self.evaluate_item(item)).collect()
    }

    /// Evaluates one batch item.
    #[must_use]
    pub fn evaluate_item(&self, item: &BatchItem) -> BatchOutcome {
        let mode = if item.decimal {
            NumericMode::Decimal
        } else {
            NumericMode::Float
        };
        let mut context = Context::new(mode).with_variables(&item.variables);
        if let Some(ans) = &item.ans {
            context = context.with_previous_result(ans);
        }

        match self.evaluate(&item.expr, &context) {
            Ok(result) => BatchOutcome::Success { result },
            Err(e) => BatchOutcome::Failure { error: e.to_string(),
                                              kind:  Some(e.kind()), },
        }
    }

    /// Evaluates a JSON array of batch items.
    ///
    /// Elements that are not valid items yield a failure outcome without a
    /// kind, and the remaining elements are still evaluated.
    ///
    /// # Errors
    /// `BatchError::InvalidJson` when `payload` is not JSON and
    /// `BatchError::NotAnArray` when it is not an array.
    ///
    /// # Example
    /// ```
    /// use reckon::Evaluator;
    ///
    /// let outcomes = Evaluator::new().evaluate_json(r#"[{"expr": "0.1 + 0.2", "decimal": true}, 3]"#)
    ///                                .unwrap();
    /// assert_eq!(serde_json::to_string(&outcomes).unwrap(),
    ///            r#"[{"result":"0.3"},{"error":"invalid item: expected a JSON object"}]"#);
    /// ```
    pub fn evaluate_json(&self, payload: &str) -> Result<Vec<BatchOutcome>, BatchError> {
        let value = serde_json::from_str::<serde_json::Value>(payload)?;
        let serde_json::Value::Array(elements) = value else {
            return Err(BatchError::NotAnArray);
        };

        tracing::debug!(items = elements.len(), "evaluating batch");
        Ok(elements.into_iter()
                   .map(|element| self.evaluate_element(element))
                   .collect())
    }

    fn evaluate_element(&self, element: serde_json::Value) -> BatchOutcome {
        if !element.is_object() {
            return invalid_item("expected a JSON object");
        }
        match serde_json::from_value::<BatchItem>(element) {
            Ok(item) => self.evaluate_item(&item),
            Err(e) => invalid_item(&e.to_string()),
        }
    }
}

fn invalid_item(reason: &str) -> BatchOutcome {
    BatchOutcome::Failure { error: format!("invalid item: {reason}"),
                            kind:  None, }
}
