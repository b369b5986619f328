//! Trade-party subtree rendering.
//!
//! This is the collaborator boundary for seller, buyer, and ship-to blocks:
//! a party renders itself into the active tree given the resolved policy and
//! an exclude-tax flag. The field set is deliberately small — name, postal
//! address, VAT registration.

use super::policy::VersionPolicy;
use super::tree::XmlNode;
use crate::core::Party;

/// Render `party` as `element` (Seller/Buyer/ShipToTradeParty) under
/// `parent`. `exclude_tax` suppresses the tax registration block, as
/// required for ship-to parties.
pub(crate) fn emit_party(
    parent: &mut XmlNode,
    party: &Party,
    element: &str,
    _policy: &VersionPolicy,
    exclude_tax: bool,
) {
    let mut node = XmlNode::element(element);
    node.add(XmlNode::text("ram:Name", &party.name));

    let mut address = XmlNode::element("ram:PostalTradeAddress");
    address.add_opt("ram:PostcodeCode", party.postal_code.as_deref());
    address.add_opt("ram:LineOne", party.street.as_deref());
    address.add_opt("ram:CityName", party.city.as_deref());
    address.add_opt("ram:CountryID", party.country_code.as_deref());
    node.add(address);

    if !exclude_tax {
        if let Some(vat_id) = &party.vat_id {
            let mut registration = XmlNode::element("ram:SpecifiedTaxRegistration");
            registration.add(XmlNode::text("ram:ID", vat_id).attr("schemeID", "VA"));
            node.add(registration);
        }
    }

    parent.add(node);
}
