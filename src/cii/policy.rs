//! Version/mode resolution for the CII vocabulary.
//!
//! Every version-dependent decision of the emitter goes through
//! [`VersionPolicy`]: element names, namespace sets, context identifiers,
//! and structural toggles. Nothing else in the crate compares versions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{
    BUSINESS_PROCESS_ID, GUIDELINE_1P0, GUIDELINE_EN16931, XRECHNUNG_SUFFIX_V2,
    XRECHNUNG_SUFFIX_V3, ns_1p0, ns_100,
};
use crate::core::{CodeTables, ZugferdError};

/// ZUGFeRD document version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Version {
    V1,
    V2,
    V3,
}

impl Version {
    /// Resolve a numeric version; anything outside 1–3 is a configuration
    /// error.
    pub fn from_number(number: u8) -> Result<Self, ZugferdError> {
        match number {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            3 => Ok(Self::V3),
            other => Err(ZugferdError::UnsupportedVersion(other)),
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
        }
    }

    /// Version 2 switched to the EN 16931 vocabulary; every structural
    /// split in the emitter sits on this threshold.
    pub fn since_en16931(&self) -> bool {
        !matches!(self, Self::V1)
    }
}

/// Compliance mode of the emitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Standard,
    XRechnung,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::XRechnung => "xrechnung",
        }
    }
}

impl FromStr for Mode {
    type Err = ZugferdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "xrechnung" => Ok(Self::XRechnung),
            other => Err(ZugferdError::UnsupportedMode(other.to_string())),
        }
    }
}

/// Resolved (version × mode) configuration.
#[derive(Debug, Clone, Copy)]
pub struct VersionPolicy {
    version: Version,
    mode: Mode,
}

impl VersionPolicy {
    /// Validate the combination. XRechnung requires version >= 2.
    pub fn new(version: Version, mode: Mode) -> Result<Self, ZugferdError> {
        if mode == Mode::XRechnung && !version.since_en16931() {
            return Err(ZugferdError::IncompatibleMode {
                mode: mode.as_str().to_string(),
                version: version.number(),
            });
        }
        Ok(Self { version, mode })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The single before/after-version-2 vocabulary rule. Every element name
    /// that changed with version 2 resolves through this pick.
    fn pick<'a>(&self, legacy: &'a str, current: &'a str) -> &'a str {
        if self.version.since_en16931() {
            current
        } else {
            legacy
        }
    }

    pub fn root_element(&self) -> &'static str {
        self.pick("rsm:CrossIndustryDocument", "rsm:CrossIndustryInvoice")
    }

    pub fn namespaces(&self) -> [(&'static str, &'static str); 5] {
        if self.version.since_en16931() {
            [
                ("xmlns:rsm", ns_100::RSM),
                ("xmlns:ram", ns_100::RAM),
                ("xmlns:qdt", ns_100::QDT),
                ("xmlns:udt", ns_100::UDT),
                ("xmlns:xsi", ns_100::XSI),
            ]
        } else {
            [
                ("xmlns:rsm", ns_1p0::RSM),
                ("xmlns:ram", ns_1p0::RAM),
                ("xmlns:qdt", ns_1p0::QDT),
                ("xmlns:udt", ns_1p0::UDT),
                ("xmlns:xsi", ns_1p0::XSI),
            ]
        }
    }

    /// Guideline identifier for the document context.
    pub fn guideline_id(&self) -> String {
        let base = self.pick(GUIDELINE_1P0, GUIDELINE_EN16931);
        match (self.version, self.mode) {
            (_, Mode::Standard) => base.to_string(),
            (Version::V2, Mode::XRechnung) => format!("{base}{XRECHNUNG_SUFFIX_V2}"),
            (_, Mode::XRechnung) => format!("{base}{XRECHNUNG_SUFFIX_V3}"),
        }
    }

    /// The business process context block is only declared where the
    /// profiles require it.
    pub fn business_process_id(&self) -> Option<&'static str> {
        let declared = match self.mode {
            Mode::Standard => self.version.since_en16931(),
            Mode::XRechnung => self.version == Version::V3,
        };
        declared.then_some(BUSINESS_PROCESS_ID)
    }

    pub fn document_context(&self) -> &'static str {
        self.pick(
            "rsm:SpecifiedExchangedDocumentContext",
            "rsm:ExchangedDocumentContext",
        )
    }

    pub fn exchanged_document(&self) -> &'static str {
        self.pick("rsm:HeaderExchangedDocument", "rsm:ExchangedDocument")
    }

    pub fn transaction(&self) -> &'static str {
        self.pick(
            "rsm:SpecifiedSupplyChainTradeTransaction",
            "rsm:SupplyChainTradeTransaction",
        )
    }

    pub fn trade_agreement(&self) -> &'static str {
        self.pick(
            "ram:ApplicableSupplyChainTradeAgreement",
            "ram:ApplicableHeaderTradeAgreement",
        )
    }

    pub fn trade_delivery(&self) -> &'static str {
        self.pick(
            "ram:ApplicableSupplyChainTradeDelivery",
            "ram:ApplicableHeaderTradeDelivery",
        )
    }

    pub fn trade_settlement(&self) -> &'static str {
        self.pick(
            "ram:ApplicableSupplyChainTradeSettlement",
            "ram:ApplicableHeaderTradeSettlement",
        )
    }

    pub fn monetary_summation(&self) -> &'static str {
        self.pick(
            "ram:SpecifiedTradeSettlementMonetarySummation",
            "ram:SpecifiedTradeSettlementHeaderMonetarySummation",
        )
    }

    pub fn line_trade_agreement(&self) -> &'static str {
        self.pick(
            "ram:SpecifiedSupplyChainTradeAgreement",
            "ram:SpecifiedLineTradeAgreement",
        )
    }

    pub fn line_trade_delivery(&self) -> &'static str {
        self.pick(
            "ram:SpecifiedSupplyChainTradeDelivery",
            "ram:SpecifiedLineTradeDelivery",
        )
    }

    pub fn line_trade_settlement(&self) -> &'static str {
        self.pick(
            "ram:SpecifiedSupplyChainTradeSettlement",
            "ram:SpecifiedLineTradeSettlement",
        )
    }

    pub fn line_monetary_summation(&self) -> &'static str {
        self.pick(
            "ram:SpecifiedTradeSettlementMonetarySummation",
            "ram:SpecifiedTradeSettlementLineMonetarySummation",
        )
    }

    pub fn applicable_percent(&self) -> &'static str {
        self.pick("ram:ApplicablePercent", "ram:RateApplicablePercent")
    }

    /// Version 1 carries the document type display name next to the code.
    pub fn emits_type_name(&self) -> bool {
        !self.version.since_en16931()
    }

    pub fn emits_buyer_reference(&self) -> bool {
        self.version.since_en16931()
    }

    pub fn emits_ship_to(&self) -> bool {
        self.version.since_en16931()
    }

    pub fn emits_product_block(&self) -> bool {
        self.version.since_en16931()
    }

    pub fn emits_buyer_assigned_id(&self) -> bool {
        self.version.since_en16931()
    }

    pub fn emits_basis_quantity(&self) -> bool {
        self.version.since_en16931()
    }

    /// Version 1 places line items after the settlement block; later
    /// versions lead the transaction with them.
    pub fn lines_before_agreement(&self) -> bool {
        self.version.since_en16931()
    }

    /// The category-code vocabulary also split with version 2.
    pub fn tax_category_code<'t>(&self, tables: &'t CodeTables, category: &str) -> Option<&'t str> {
        let table = if self.version.since_en16931() {
            &tables.tax_categories
        } else {
            &tables.tax_categories_1p0
        };
        table.get(category).map(String::as_str)
    }
}
