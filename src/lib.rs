//! # zugferd-cii
//!
//! Cross Industry Invoice XML generation for the ZUGFeRD document family —
//! versions 1 to 3, in `standard` and `xrechnung` compliance modes.
//!
//! All monetary values are exact decimals ([`rust_decimal::Decimal`]) — never
//! floating point. Invoice fields carry them as text and parse on demand, so
//! a malformed amount surfaces as a fatal error rather than a silently wrong
//! document.
//!
//! Serialization runs in three steps:
//!
//! 1. **Business validation** — cross-field arithmetic identities (tax,
//!    grand total, line sums) checked fail-fast, unless explicitly bypassed.
//! 2. **Tree construction** — the full element tree is built in the fixed
//!    CII order, with every version-dependent name and structural decision
//!    resolved through one [`cii::VersionPolicy`].
//! 3. **Pruning and writing** — empty elements are removed at every depth,
//!    then the tree is streamed out as a UTF-8 XML string.
//!
//! ```
//! use zugferd_cii::{Mode, Version};
//!
//! let version = Version::from_number(2).unwrap();
//! let mode: Mode = "xrechnung".parse().unwrap();
//! assert_eq!(version, Version::V2);
//! assert_eq!(mode, Mode::XRechnung);
//! ```
//!
//! See `demos/basic_invoice.rs` for an end-to-end construction and
//! serialization example.

pub mod cii;
pub mod core;

// Re-export the serialization surface at the crate root for convenience
pub use crate::cii::{DocumentBuilder, Mode, SchemaValidator, Version, VersionPolicy, serialize};
pub use crate::core::*;
