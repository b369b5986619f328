use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::ZugferdError;

/// Parse a monetary or quantity field carried as text into an exact decimal.
///
/// Malformed input is fatal ([`ZugferdError::Amount`]) — it is never wrapped
/// as a business validation failure.
pub fn parse_amount(field: &str, value: &str) -> Result<Decimal, ZugferdError> {
    Decimal::from_str(value.trim()).map_err(|_| ZugferdError::Amount {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// The top-level invoice document.
///
/// All monetary fields are exact decimal values carried as text; they are
/// parsed on demand and a malformed value surfaces as
/// [`ZugferdError::Amount`]. Instances are plain value records: construct
/// once with all fields set, then treat as immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice number.
    pub id: String,
    /// Issue date; also reused as the actual delivery date.
    pub issue_date: NaiveDate,
    /// Seller party.
    pub seller: Party,
    /// Buyer party.
    pub buyer: Party,
    /// Deviating ship-to party; the buyer is used when unset.
    pub recipient: Option<Party>,
    /// Line items, in line-numbering order.
    pub line_items: Vec<LineItem>,
    /// ISO 4217 currency code (e.g. "EUR").
    pub currency: String,
    /// Payment type key resolved through [`CodeTables::payment_code`].
    ///
    /// [`CodeTables::payment_code`]: super::CodeTables::payment_code
    pub payment_type: Option<String>,
    /// Payment means free text.
    pub payment_text: Option<String>,
    pub iban: Option<String>,
    pub bic: Option<String>,
    /// Creditor account holder name.
    pub account_name: Option<String>,
    /// Tax category key (e.g. "standard", "reverse_charge").
    pub tax_category: String,
    /// Tax rate percentage, e.g. "19".
    pub tax_percent: String,
    /// Total VAT amount.
    pub tax_amount: String,
    /// Overrides the category's default exemption reason text.
    pub tax_exemption_reason: Option<String>,
    /// Invoice total without VAT; must equal the sum of line charge amounts.
    pub basis_amount: String,
    /// Invoice total with VAT.
    pub grand_total_amount: String,
    /// Amount due for payment.
    pub due_amount: String,
    /// Prepaid amount; "0.00" when nothing was paid.
    pub paid_amount: String,
    /// Buyer reference (Leitweg-ID for XRechnung); emitted for version >= 2.
    pub buyer_reference: Option<String>,
    /// Payment terms free text, emitted while the invoice is unpaid.
    pub payment_description: Option<String>,
    /// Payment status; "unpaid" (or unset) keeps the due date in the
    /// payment terms, any other status replaces them with its capitalized
    /// form.
    pub payment_status: Option<String>,
    pub payment_due_date: Option<NaiveDate>,
    /// Free-text note at the top of the document.
    pub header_text: Option<String>,
    /// Free-text note at the bottom of the document.
    pub footer_text: Option<String>,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    /// Invoicing period.
    pub period: Option<Period>,
    /// Document type; `None` falls back to [`InvoiceKind::Invoice`].
    pub kind: Option<InvoiceKind>,
}

/// One invoice line. Line numbers are not stored — they are the 1-based
/// position within [`Invoice::line_items`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name.
    pub name: String,
    pub description: Option<String>,
    /// Billed quantity.
    pub quantity: String,
    /// Unit of measure key resolved through [`CodeTables::unit_code`].
    ///
    /// [`CodeTables::unit_code`]: super::CodeTables::unit_code
    pub unit: String,
    /// Unit price before discount.
    pub gross_amount: String,
    /// Unit price after discount.
    pub net_amount: String,
    /// Tax category key.
    pub tax_category: String,
    pub tax_percent: String,
    pub tax_amount: String,
    pub discount_amount: Option<String>,
    pub discount_reason: Option<String>,
    /// Line total; must equal net amount times quantity.
    pub charge_amount: String,
    /// ISO 3166-1 country of origin.
    pub origin_country: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Buyer's item identifier; emitted for version >= 2.
    pub buyer_item_id: Option<String>,
    /// Line billing period.
    pub period: Option<Period>,
    /// Free-text line note.
    pub note: Option<String>,
    /// External document reference, emitted as an additional referenced
    /// document with type code 130.
    pub reference_id: Option<String>,
}

/// A trade party at the emission boundary: the fields here are the minimum
/// the Seller/Buyer/ShipTo subtree rendering needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: Option<String>,
    /// VAT identifier (e.g. "DE123456789").
    pub vat_id: Option<String>,
}

/// Invoicing or line billing period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// UNTDID 1001 — document types of the German invoicing subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceKind {
    /// 380 — Commercial invoice.
    Invoice,
    /// 381 — Credit note.
    CreditNote,
    /// 384 — Corrected invoice.
    Correction,
    /// 326 — Partial invoice.
    PartialInvoice,
}

impl InvoiceKind {
    /// Display name shown in the version-1 document header.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Invoice => "RECHNUNG",
            Self::CreditNote => "GUTSCHRIFT",
            Self::Correction => "RECHNUNGSKORREKTUR",
            Self::PartialInvoice => "ABSCHLAGSRECHNUNG",
        }
    }

    /// UNTDID 1001 numeric code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invoice => "380",
            Self::CreditNote => "381",
            Self::Correction => "384",
            Self::PartialInvoice => "326",
        }
    }
}
