//! Cross Industry Invoice XML emission.
//!
//! Produces UN/CEFACT CII documents for the ZUGFeRD family: version 1 emits
//! a `CrossIndustryDocument` in the rev-12/15 vocabulary, versions 2 and 3
//! emit a `CrossIndustryInvoice` in the rev-100 vocabulary, each optionally
//! under the XRechnung compliance profile.
//!
//! # Example
//!
//! ```
//! use zugferd_cii::cii::{Mode, Version, VersionPolicy};
//!
//! let policy = VersionPolicy::new(Version::V2, Mode::Standard).unwrap();
//! assert_eq!(policy.root_element(), "rsm:CrossIndustryInvoice");
//! assert_eq!(policy.guideline_id(), "urn:cen.eu:en16931:2017");
//!
//! // XRechnung requires version 2 or later
//! assert!(VersionPolicy::new(Version::V1, Mode::XRechnung).is_err());
//! ```

mod emitter;
pub mod format;
mod line;
mod party;
mod policy;
mod tree;

pub use emitter::{DocumentBuilder, serialize};
pub use policy::{Mode, Version, VersionPolicy};
pub use tree::XmlNode;

use std::io::Read;

/// External XSD/Schematron conformance oracle.
///
/// The emitter only needs to produce output this collaborator accepts; the
/// schema artifacts themselves live outside this crate. An empty list means
/// the document is conformant.
pub trait SchemaValidator {
    fn validate(&mut self, xml: &mut dyn Read, version: Version) -> Vec<String>;
}

/// ZUGFeRD 1.0 Comfort guideline identifier.
pub const GUIDELINE_1P0: &str = "urn:ferd:CrossIndustryDocument:invoice:1p0:comfort";

/// EN 16931 guideline base for version 2 and later.
pub const GUIDELINE_EN16931: &str = "urn:cen.eu:en16931:2017";

/// XRechnung conformance suffix appended for version 2.
pub const XRECHNUNG_SUFFIX_V2: &str = "#compliant#urn:xoev-de:kosit:standard:xrechnung_2.0";

/// XRechnung conformance suffix appended for version 3.
pub const XRECHNUNG_SUFFIX_V3: &str = "#compliant#urn:xeinkauf.de:kosit:xrechnung_3.0";

/// Business process identifier for the document context.
pub const BUSINESS_PROCESS_ID: &str = "urn:fdc:peppol.eu:2017:poacc:billing:01:1.0";

/// Namespace URIs for version 1 (`CrossIndustryDocument`).
pub mod ns_1p0 {
    pub const RSM: &str = "urn:ferd:CrossIndustryDocument:invoice:1p0";
    pub const RAM: &str =
        "urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:12";
    pub const QDT: &str = "urn:un:unece:uncefact:data:standard:QualifiedDataType:12";
    pub const UDT: &str = "urn:un:unece:uncefact:data:standard:UnqualifiedDataType:15";
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
}

/// Namespace URIs for versions 2 and 3 (`CrossIndustryInvoice`).
pub mod ns_100 {
    pub const RSM: &str = "urn:un:unece:uncefact:data:standard:CrossIndustryInvoice:100";
    pub const RAM: &str =
        "urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:100";
    pub const QDT: &str = "urn:un:unece:uncefact:data:standard:QualifiedDataType:100";
    pub const UDT: &str = "urn:un:unece:uncefact:data:standard:UnqualifiedDataType:100";
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
}
