//! Code tables mapping domain keys to UN/CEFACT code-list values.
//!
//! The tables are built once at startup and injected into the document
//! builder — they are configuration, not ambient globals. The defaults cover
//! the German e-invoicing subset of the relevant code lists.

use std::collections::HashMap;

/// UN/CEFACT Rec 20 "one" (piece) — used for unrecognized units.
pub const FALLBACK_UNIT_CODE: &str = "C62";

/// UNTDID 4461 "instrument not defined" — used for unknown payment types.
pub const FALLBACK_PAYMENT_CODE: &str = "1";

/// Process-wide immutable code tables.
#[derive(Debug, Clone)]
pub struct CodeTables {
    /// Tax category → UNTDID 5305 letter, ZUGFeRD 1.0 vocabulary.
    pub tax_categories_1p0: HashMap<String, String>,
    /// Tax category → UNTDID 5305 letter, version 2 and later.
    pub tax_categories: HashMap<String, String>,
    /// Tax category → default exemption reason text.
    pub exemption_reasons: HashMap<String, String>,
    /// Payment type → UNTDID 4461 code.
    pub payment_types: HashMap<String, String>,
    /// Unit of measure → UN/CEFACT Rec 20 code.
    pub units: HashMap<String, String>,
}

impl Default for CodeTables {
    fn default() -> Self {
        Self {
            tax_categories_1p0: map(&[
                ("standard", "S"),
                ("zero_rated", "Z"),
                ("exempt", "E"),
                ("reverse_charge", "AE"),
                // the K category letter only exists in the rev-100 code list
                ("intra_community", "E"),
                ("export", "G"),
                ("not_taxable", "O"),
            ]),
            tax_categories: map(&[
                ("standard", "S"),
                ("zero_rated", "Z"),
                ("exempt", "E"),
                ("reverse_charge", "AE"),
                ("intra_community", "K"),
                ("export", "G"),
                ("not_taxable", "O"),
            ]),
            exemption_reasons: map(&[
                ("exempt", "Steuerbefreite Leistung"),
                (
                    "reverse_charge",
                    "Steuerschuldnerschaft des Leistungsempfängers (§ 13b UStG)",
                ),
                (
                    "intra_community",
                    "Steuerfreie innergemeinschaftliche Lieferung (§ 4 Nr. 1b UStG)",
                ),
                ("export", "Steuerfreie Ausfuhrlieferung (§ 4 Nr. 1a UStG)"),
            ]),
            payment_types: map(&[
                ("cash", "10"),
                ("check", "20"),
                ("transfer", "30"),
                ("bank_account", "42"),
                ("card", "48"),
                ("direct_debit", "49"),
                ("standing_agreement", "57"),
                ("sepa_transfer", "58"),
                ("sepa_direct_debit", "59"),
            ]),
            units: map(&[
                ("piece", "C62"),
                ("hour", "HUR"),
                ("day", "DAY"),
                ("week", "WEE"),
                ("month", "MON"),
                ("year", "ANN"),
                ("kg", "KGM"),
                ("gram", "GRM"),
                ("tonne", "TNE"),
                ("litre", "LTR"),
                ("m", "MTR"),
                ("m2", "MTK"),
                ("m3", "MTQ"),
                ("km", "KMT"),
                ("minute", "MIN"),
                ("second", "SEC"),
                ("set", "SET"),
                ("lump_sum", "LS"),
            ]),
        }
    }
}

fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl CodeTables {
    /// Rec 20 unit code for `unit`, falling back to the generic piece code.
    pub fn unit_code(&self, unit: &str) -> &str {
        self.units
            .get(unit)
            .map(String::as_str)
            .unwrap_or(FALLBACK_UNIT_CODE)
    }

    /// UNTDID 4461 payment means code, falling back to "instrument not
    /// defined" when the type is unset or unknown.
    pub fn payment_code(&self, payment_type: Option<&str>) -> &str {
        payment_type
            .and_then(|t| self.payment_types.get(t))
            .map(String::as_str)
            .unwrap_or(FALLBACK_PAYMENT_CODE)
    }

    /// Default exemption reason text for a tax category, if any.
    pub fn exemption_reason(&self, category: &str) -> Option<&str> {
        self.exemption_reasons.get(category).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_lookup_with_fallback() {
        let tables = CodeTables::default();
        assert_eq!(tables.unit_code("hour"), "HUR");
        assert_eq!(tables.unit_code("kg"), "KGM");
        assert_eq!(tables.unit_code("palette"), "C62");
        assert_eq!(tables.unit_code(""), "C62");
    }

    #[test]
    fn payment_lookup_with_fallback() {
        let tables = CodeTables::default();
        assert_eq!(tables.payment_code(Some("sepa_transfer")), "58");
        assert_eq!(tables.payment_code(Some("barter")), "1");
        assert_eq!(tables.payment_code(None), "1");
    }

    #[test]
    fn category_vocabulary_split() {
        let tables = CodeTables::default();
        assert_eq!(
            tables.tax_categories.get("intra_community").unwrap(),
            "K"
        );
        assert_eq!(
            tables.tax_categories_1p0.get("intra_community").unwrap(),
            "E"
        );
        assert_eq!(tables.tax_categories.get("standard").unwrap(), "S");
        assert_eq!(tables.tax_categories_1p0.get("standard").unwrap(), "S");
    }

    #[test]
    fn exemption_reasons_cover_exempting_categories() {
        let tables = CodeTables::default();
        assert!(tables.exemption_reason("reverse_charge").is_some());
        assert!(tables.exemption_reason("standard").is_none());
    }
}
