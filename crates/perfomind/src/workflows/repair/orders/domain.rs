use serde::{Deserialize, Serialize};

/// Validation failures surfaced at the intake edge (router or CLI). The
/// recording planner itself assumes already-validated input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderValidationError {
    #[error("order number '{0}' does not match the Samsung format 417XXXXXXX")]
    InvalidOrderNumber(String),
    #[error("technician name is required")]
    MissingTechnician,
    #[error("approved and paid amounts are required when the budget is approved")]
    MissingBudgetFigures,
}

/// Samsung service-order number: `417` followed by seven digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn parse(raw: &str) -> Result<Self, OrderValidationError> {
        let trimmed = raw.trim();
        let valid = trimmed.len() == 10
            && trimmed.starts_with("417")
            && trimmed.bytes().all(|byte| byte.is_ascii_digit());
        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(OrderValidationError::InvalidOrderNumber(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = OrderValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OrderNumber> for String {
    fn from(value: OrderNumber) -> Self {
        value.0
    }
}

/// Non-empty technician name, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TechnicianName(String);

impl TechnicianName {
    pub fn parse(raw: &str) -> Result<Self, OrderValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(OrderValidationError::MissingTechnician)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TechnicianName {
    type Error = OrderValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TechnicianName> for String {
    fn from(value: TechnicianName) -> Self {
        value.0
    }
}

/// Approved-budget figures; present iff the event is budget-approved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetFigures {
    pub approved_amount: f64,
    pub paid_amount: f64,
}

/// One submitted service-order form. Immutable once recorded; resubmitting
/// under the same order number revises the financial figures, and the
/// recorder backs out the previous contribution before applying the new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrderEvent {
    pub technician: TechnicianName,
    pub order_number: Option<OrderNumber>,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub defect_code: String,
    #[serde(default)]
    pub repair_code: String,
    #[serde(default)]
    pub replaced_part: String,
    #[serde(default)]
    pub notes: String,
    pub is_warranty_visit: bool,
    pub is_budget_approved: bool,
    pub budget: Option<BudgetFigures>,
    pub is_first_visit_repair: bool,
}

impl ServiceOrderEvent {
    /// The first-visit flag only counts on warranty visits.
    pub fn counts_as_first_visit(&self) -> bool {
        self.is_warranty_visit && self.is_first_visit_repair
    }

    /// Budget figures when the budget branch applies, zeros otherwise.
    pub(crate) fn budget_figures(&self) -> BudgetFigures {
        if self.is_budget_approved {
            self.budget.unwrap_or_default()
        } else {
            BudgetFigures::default()
        }
    }
}
