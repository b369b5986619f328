//! Line-item subtree emission.

use rust_decimal::Decimal;

use super::emitter::period_node;
use super::format;
use super::policy::VersionPolicy;
use super::tree::XmlNode;
use crate::core::{CodeTables, LineItem, ZugferdError, parse_amount, validate_line};

/// Emit one line item under `parent`. `number` is the 1-based position in
/// the invoice's line sequence — it is the printed line identifier, not a
/// stored field.
pub(crate) fn emit_line(
    parent: &mut XmlNode,
    line: &LineItem,
    number: usize,
    policy: &VersionPolicy,
    tables: &CodeTables,
    skip_validation: bool,
) -> Result<(), ZugferdError> {
    if !skip_validation {
        validate_line(line, number)?;
    }

    let unit_code = tables.unit_code(&line.unit);
    let gross = parse_amount("gross_amount", &line.gross_amount)?;
    let net = parse_amount("net_amount", &line.net_amount)?;
    let quantity = parse_amount("quantity", &line.quantity)?;
    let percent = parse_amount("tax_percent", &line.tax_percent)?;
    let charge = parse_amount("charge_amount", &line.charge_amount)?;

    let mut item = XmlNode::element("ram:IncludedSupplyChainTradeLineItem");

    let mut document = XmlNode::element("ram:AssociatedDocumentLineDocument");
    document.add(XmlNode::text("ram:LineID", number.to_string()));
    if let Some(note) = &line.note {
        let mut included = XmlNode::element("ram:IncludedNote");
        included.add(XmlNode::text("ram:Content", note));
        document.add(included);
    }
    item.add(document);

    // current versions lead with the product; version 1 closes the item
    // with a name-only block instead
    if policy.emits_product_block() {
        let mut product = XmlNode::element("ram:SpecifiedTradeProduct");
        if policy.emits_buyer_assigned_id() {
            product.add_opt("ram:BuyerAssignedID", line.buyer_item_id.as_deref());
        }
        product.add(XmlNode::text("ram:Name", &line.name));
        product.add_opt("ram:Description", line.description.as_deref());
        let mut origin = XmlNode::element("ram:OriginTradeCountry");
        origin.add(XmlNode::text("ram:ID", &line.origin_country));
        product.add(origin);
        item.add(product);
    }

    let mut agreement = XmlNode::element(policy.line_trade_agreement());
    let mut gross_price = XmlNode::element("ram:GrossPriceProductTradePrice");
    gross_price.add(XmlNode::text("ram:ChargeAmount", format::unit_amount(gross)));
    if let Some(discount) = &line.discount_amount {
        let discount = parse_amount("discount_amount", discount)?;
        if policy.emits_basis_quantity() {
            gross_price.add(
                XmlNode::text("ram:BasisQuantity", format::unit_amount(Decimal::ONE))
                    .attr("unitCode", unit_code),
            );
        }
        let mut allowance = XmlNode::element("ram:AppliedTradeAllowanceCharge");
        allowance.add(XmlNode::text("ram:ChargeIndicator", "false"));
        allowance.add(XmlNode::text(
            "ram:ActualAmount",
            format::unit_amount(discount),
        ));
        allowance.add_opt("ram:Reason", line.discount_reason.as_deref());
        gross_price.add(allowance);
    }
    agreement.add(gross_price);

    let mut net_price = XmlNode::element("ram:NetPriceProductTradePrice");
    net_price.add(XmlNode::text("ram:ChargeAmount", format::unit_amount(net)));
    if policy.emits_basis_quantity() {
        net_price.add(
            XmlNode::text("ram:BasisQuantity", format::unit_amount(Decimal::ONE))
                .attr("unitCode", unit_code),
        );
    }
    agreement.add(net_price);
    item.add(agreement);

    let mut delivery = XmlNode::element(policy.line_trade_delivery());
    delivery.add(
        XmlNode::text("ram:BilledQuantity", format::unit_amount(quantity))
            .attr("unitCode", unit_code),
    );
    item.add(delivery);

    let mut settlement = XmlNode::element(policy.line_trade_settlement());
    let mut tax = XmlNode::element("ram:ApplicableTradeTax");
    tax.add(XmlNode::text("ram:TypeCode", "VAT"));
    tax.add_opt(
        "ram:CategoryCode",
        policy.tax_category_code(tables, &line.tax_category),
    );
    tax.add(XmlNode::text(
        policy.applicable_percent(),
        format::amount(percent),
    ));
    settlement.add(tax);

    if let Some(period) = &line.period {
        settlement.add(period_node(period));
    }

    let mut summation = XmlNode::element(policy.line_monetary_summation());
    summation.add(XmlNode::text("ram:LineTotalAmount", format::amount(charge)));
    settlement.add(summation);

    if let Some(reference) = &line.reference_id {
        let mut referenced = XmlNode::element("ram:AdditionalReferencedDocument");
        referenced.add(XmlNode::text("ram:IssuerAssignedID", reference));
        referenced.add(XmlNode::text("ram:TypeCode", "130"));
        settlement.add(referenced);
    }
    item.add(settlement);

    if !policy.emits_product_block() {
        let mut product = XmlNode::element("ram:SpecifiedTradeProduct");
        product.add(XmlNode::text("ram:Name", &line.name));
        item.add(product);
    }

    parent.add(item);
    Ok(())
}
