//! Cost record model
//!
//! A `CostRecord` is one expense entry in the ledger: date, client/project,
//! category, description, pricing detail, and payment information. The field
//! list mirrors the columns of the backing worksheet, and `to_fields` /
//! `from_fields` define the row format shared by the sheet store and the CSV
//! exporter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::RecordId;
use super::money::Money;

/// Date format used in worksheet rows and exported files
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column headers, in worksheet/CSV order
pub const FIELD_HEADERS: [&str; 12] = [
    "id",
    "date",
    "client",
    "category",
    "description",
    "quantity",
    "unit_price",
    "discount_pct",
    "amount",
    "status",
    "method",
    "notes",
];

/// Payment status of a cost record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Not yet paid
    #[default]
    Pending,
    /// Fully paid
    Paid,
    /// Partially paid
    Partial,
    /// Cancelled, kept for the record
    Cancelled,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Paid => write!(f, "Paid"),
            Self::Partial => write!(f, "Partial"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "partial" => Ok(Self::Partial),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("unknown payment status: {}", other)),
        }
    }
}

/// Payment method of a cost record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Pix,
    DebitCard,
    CreditCard,
    Transfer,
    Check,
    /// Brazilian bank payment slip ("boleto")
    BankSlip,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Pix => write!(f, "pix"),
            Self::DebitCard => write!(f, "debit-card"),
            Self::CreditCard => write!(f, "credit-card"),
            Self::Transfer => write!(f, "transfer"),
            Self::Check => write!(f, "check"),
            Self::BankSlip => write!(f, "bank-slip"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "pix" => Ok(Self::Pix),
            "debit-card" | "debit" => Ok(Self::DebitCard),
            "credit-card" | "credit" => Ok(Self::CreditCard),
            "transfer" => Ok(Self::Transfer),
            "check" | "cheque" => Ok(Self::Check),
            "bank-slip" | "boleto" => Ok(Self::BankSlip),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

/// One expense entry in the cost ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    /// Unique identifier, assigned on creation
    pub id: RecordId,

    /// Date the cost was incurred
    pub date: NaiveDate,

    /// Client or project the cost belongs to
    pub client: String,

    /// Cost category (non-empty free-form tag, e.g. "Materiais")
    pub category: String,

    /// Detailed description
    #[serde(default)]
    pub description: String,

    /// Quantity purchased (finite, greater than zero)
    pub quantity: f64,

    /// Price per unit
    pub unit_price: Money,

    /// Discount percentage applied to the subtotal (0-100)
    pub discount_pct: u8,

    /// Total amount (quantity x unit price, less discount); never negative
    pub amount: Money,

    /// Payment status
    #[serde(default)]
    pub status: PaymentStatus,

    /// Payment method
    #[serde(default)]
    pub method: PaymentMethod,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

impl CostRecord {
    /// Build a record from a draft, assigning a fresh identifier
    pub fn from_draft(draft: RecordDraft) -> Self {
        let amount = draft.amount.unwrap_or_else(|| {
            draft.unit_price.extend(draft.quantity, draft.discount_pct)
        });
        Self {
            id: RecordId::new(),
            date: draft.date,
            client: draft.client.trim().to_string(),
            category: draft.category.trim().to_string(),
            description: draft.description,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            discount_pct: draft.discount_pct,
            amount,
            status: draft.status,
            method: draft.method,
            notes: draft.notes,
        }
    }

    /// Check the record invariants
    ///
    /// The date is valid by construction (`NaiveDate`); everything else is
    /// checked here. Errors are plain strings; the ledger wraps them in
    /// `LedgerError::Validation`.
    pub fn validate(&self) -> Result<(), String> {
        if self.amount.is_negative() {
            return Err(format!(
                "amount must not be negative (got {})",
                self.amount
            ));
        }
        if self.unit_price.is_negative() {
            return Err(format!(
                "unit price must not be negative (got {})",
                self.unit_price
            ));
        }
        if self.category.trim().is_empty() {
            return Err("category must not be empty".into());
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(format!("quantity must be greater than zero (got {})", self.quantity));
        }
        if self.discount_pct > 100 {
            return Err(format!(
                "discount must be between 0 and 100 (got {})",
                self.discount_pct
            ));
        }
        Ok(())
    }

    /// Apply a patch, returning the merged record
    pub fn merged(&self, patch: RecordPatch) -> Self {
        let mut rec = self.clone();
        if let Some(date) = patch.date {
            rec.date = date;
        }
        if let Some(client) = patch.client {
            rec.client = client.trim().to_string();
        }
        if let Some(category) = patch.category {
            rec.category = category.trim().to_string();
        }
        if let Some(description) = patch.description {
            rec.description = description;
        }
        if let Some(quantity) = patch.quantity {
            rec.quantity = quantity;
        }
        if let Some(unit_price) = patch.unit_price {
            rec.unit_price = unit_price;
        }
        if let Some(discount_pct) = patch.discount_pct {
            rec.discount_pct = discount_pct;
        }
        if let Some(status) = patch.status {
            rec.status = status;
        }
        if let Some(method) = patch.method {
            rec.method = method;
        }
        if let Some(notes) = patch.notes {
            rec.notes = notes;
        }
        // Recompute the total unless the caller pinned it explicitly.
        match patch.amount {
            Some(amount) => rec.amount = amount,
            None => {
                if patch.quantity.is_some()
                    || patch.unit_price.is_some()
                    || patch.discount_pct.is_some()
                {
                    rec.amount = rec.unit_price.extend(rec.quantity, rec.discount_pct);
                }
            }
        }
        rec
    }

    /// Serialize to a worksheet/CSV row, in `FIELD_HEADERS` order
    pub fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.format(DATE_FORMAT).to_string(),
            self.client.clone(),
            self.category.clone(),
            self.description.clone(),
            format_quantity(self.quantity),
            self.unit_price.to_decimal_string(),
            self.discount_pct.to_string(),
            self.amount.to_decimal_string(),
            self.status.to_string().to_ascii_lowercase(),
            self.method.to_string(),
            self.notes.clone(),
        ]
    }

    /// Parse a worksheet/CSV row in `FIELD_HEADERS` order
    ///
    /// A blank or unparsable id cell gets a freshly generated identifier, so
    /// rows hand-typed into the sheet (or re-imported exports) are accepted.
    pub fn from_fields(fields: &[String]) -> Result<Self, String> {
        if fields.len() != FIELD_HEADERS.len() {
            return Err(format!(
                "expected {} columns, got {}",
                FIELD_HEADERS.len(),
                fields.len()
            ));
        }

        let id = fields[0]
            .parse::<RecordId>()
            .unwrap_or_else(|_| RecordId::new());
        let date = NaiveDate::parse_from_str(fields[1].trim(), DATE_FORMAT)
            .map_err(|e| format!("bad date {:?}: {}", fields[1], e))?;
        let quantity: f64 = fields[5]
            .trim()
            .parse()
            .map_err(|_| format!("bad quantity {:?}", fields[5]))?;
        let unit_price = Money::parse(&fields[6]).map_err(|e| e.to_string())?;
        let discount_pct: u8 = fields[7]
            .trim()
            .parse()
            .map_err(|_| format!("bad discount {:?}", fields[7]))?;
        let amount = Money::parse(&fields[8]).map_err(|e| e.to_string())?;
        let status = fields[9].parse::<PaymentStatus>()?;
        let method = fields[10].parse::<PaymentMethod>()?;

        Ok(Self {
            id,
            date,
            client: fields[2].clone(),
            category: fields[3].clone(),
            description: fields[4].clone(),
            quantity,
            unit_price,
            discount_pct,
            amount,
            status,
            method,
            notes: fields[11].clone(),
        })
    }
}

/// Format a quantity the same way on every platform ("1", "2.5", "0.25")
pub fn format_quantity(q: f64) -> String {
    if q.fract() == 0.0 && q.abs() < 1e15 {
        format!("{}", q as i64)
    } else {
        format!("{}", q)
    }
}

/// Input for creating a new cost record; the ledger assigns the identifier
#[derive(Debug, Clone)]
pub struct RecordDraft {
    pub date: NaiveDate,
    pub client: String,
    pub category: String,
    pub description: String,
    pub quantity: f64,
    pub unit_price: Money,
    pub discount_pct: u8,
    /// Explicit total; when `None` it is computed from the pricing fields
    pub amount: Option<Money>,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    pub notes: String,
}

impl RecordDraft {
    /// Draft with an explicit total and unit pricing defaulted to the total
    pub fn new(
        date: NaiveDate,
        client: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date,
            client: client.into(),
            category: category.into(),
            description: description.into(),
            quantity: 1.0,
            unit_price: amount,
            discount_pct: 0,
            amount: Some(amount),
            status: PaymentStatus::default(),
            method: PaymentMethod::default(),
            notes: String::new(),
        }
    }

    /// Set quantity/unit-price/discount; the total is recomputed on build
    pub fn with_pricing(mut self, quantity: f64, unit_price: Money, discount_pct: u8) -> Self {
        self.quantity = quantity;
        self.unit_price = unit_price;
        self.discount_pct = discount_pct;
        self.amount = None;
        self
    }

    /// Set the payment status
    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the payment method
    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = method;
        self
    }

    /// Set free-form notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Partial update of an existing record; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub date: Option<NaiveDate>,
    pub client: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<Money>,
    pub discount_pct: Option<u8>,
    pub amount: Option<Money>,
    pub status: Option<PaymentStatus>,
    pub method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

impl RecordPatch {
    /// An empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.client.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.quantity.is_none()
            && self.unit_price.is_none()
            && self.discount_pct.is_none()
            && self.amount.is_none()
            && self.status.is_none()
            && self.method.is_none()
            && self.notes.is_none()
    }
}
