//! Document-level CII emission.
//!
//! [`DocumentBuilder`] walks the invoice and produces the full element tree,
//! consulting the [`VersionPolicy`] at every version-dependent decision and
//! the formatting rules for every numeric and date literal. Business
//! validation gates emission unless explicitly bypassed; the malformed-
//! amount error is fatal either way.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::format;
use super::line::emit_line;
use super::party::emit_party;
use super::policy::{Mode, Version, VersionPolicy};
use super::tree::XmlNode;
use crate::core::{
    CodeTables, Invoice, InvoiceKind, Period, ZugferdError, parse_amount, validate_invoice,
};

/// Serialize `invoice` as a CII document with the default code tables.
pub fn serialize(
    invoice: &Invoice,
    version: Version,
    mode: Mode,
    skip_business_validation: bool,
) -> Result<String, ZugferdError> {
    let tables = CodeTables::default();
    DocumentBuilder::new(invoice, version, mode, &tables)?.to_xml(skip_business_validation)
}

/// Builds the CII document tree for one invoice under a resolved
/// version/mode policy.
pub struct DocumentBuilder<'a> {
    invoice: &'a Invoice,
    policy: VersionPolicy,
    tables: &'a CodeTables,
}

impl<'a> DocumentBuilder<'a> {
    /// Resolve the policy. Unsupported or incompatible configurations fail
    /// here, before any invoice data is inspected.
    pub fn new(
        invoice: &'a Invoice,
        version: Version,
        mode: Mode,
        tables: &'a CodeTables,
    ) -> Result<Self, ZugferdError> {
        Ok(Self {
            invoice,
            policy: VersionPolicy::new(version, mode)?,
            tables,
        })
    }

    pub fn policy(&self) -> &VersionPolicy {
        &self.policy
    }

    /// Build, prune, and serialize to a UTF-8 XML string.
    pub fn to_xml(&self, skip_business_validation: bool) -> Result<String, ZugferdError> {
        self.build(skip_business_validation)?.to_xml()
    }

    /// Build the document tree and run the pruning pass over it.
    pub fn build(&self, skip_business_validation: bool) -> Result<XmlNode, ZugferdError> {
        if !skip_business_validation {
            validate_invoice(self.invoice)?;
        }

        let mut root = XmlNode::element(self.policy.root_element());
        for (name, uri) in self.policy.namespaces() {
            root = root.attr(name, uri);
        }

        root.add(self.document_context());
        root.add(self.exchanged_document());
        root.add(self.transaction(skip_business_validation)?);

        root.prune_empty();
        Ok(root)
    }

    fn document_context(&self) -> XmlNode {
        let mut context = XmlNode::element(self.policy.document_context());
        if let Some(process) = self.policy.business_process_id() {
            let mut block = XmlNode::element("ram:BusinessProcessSpecifiedDocumentContextParameter");
            block.add(XmlNode::text("ram:ID", process));
            context.add(block);
        }
        let mut guideline = XmlNode::element("ram:GuidelineSpecifiedDocumentContextParameter");
        guideline.add(XmlNode::text("ram:ID", self.policy.guideline_id()));
        context.add(guideline);
        context
    }

    fn exchanged_document(&self) -> XmlNode {
        let invoice = self.invoice;
        let kind = invoice.kind.unwrap_or(InvoiceKind::Invoice);

        let mut document = XmlNode::element(self.policy.exchanged_document());
        document.add(XmlNode::text("ram:ID", &invoice.id));
        if self.policy.emits_type_name() {
            document.add(XmlNode::text("ram:Name", kind.name()));
        }
        document.add(XmlNode::text("ram:TypeCode", kind.code()));
        document.add(date_node("ram:IssueDateTime", invoice.issue_date));
        for text in [&invoice.header_text, &invoice.footer_text] {
            if let Some(text) = text {
                document.add(note_node(text));
            }
        }
        document
    }

    fn transaction(&self, skip: bool) -> Result<XmlNode, ZugferdError> {
        let mut transaction = XmlNode::element(self.policy.transaction());

        if self.policy.lines_before_agreement() {
            self.emit_lines(&mut transaction, skip)?;
        }

        transaction.add(self.trade_agreement());
        transaction.add(self.trade_delivery());
        transaction.add(self.trade_settlement()?);

        if !self.policy.lines_before_agreement() {
            self.emit_lines(&mut transaction, skip)?;
        }

        Ok(transaction)
    }

    fn emit_lines(&self, transaction: &mut XmlNode, skip: bool) -> Result<(), ZugferdError> {
        for (index, line) in self.invoice.line_items.iter().enumerate() {
            emit_line(transaction, line, index + 1, &self.policy, self.tables, skip)?;
        }
        Ok(())
    }

    fn trade_agreement(&self) -> XmlNode {
        let invoice = self.invoice;
        let mut agreement = XmlNode::element(self.policy.trade_agreement());
        if self.policy.emits_buyer_reference() {
            agreement.add_opt("ram:BuyerReference", invoice.buyer_reference.as_deref());
        }
        emit_party(
            &mut agreement,
            &invoice.seller,
            "ram:SellerTradeParty",
            &self.policy,
            false,
        );
        emit_party(
            &mut agreement,
            &invoice.buyer,
            "ram:BuyerTradeParty",
            &self.policy,
            false,
        );
        if invoice.project_id.is_some() || invoice.project_name.is_some() {
            let mut project = XmlNode::element("ram:SpecifiedProcuringProject");
            project.add_opt("ram:ID", invoice.project_id.as_deref());
            project.add_opt("ram:Name", invoice.project_name.as_deref());
            agreement.add(project);
        }
        agreement
    }

    fn trade_delivery(&self) -> XmlNode {
        let invoice = self.invoice;
        let mut delivery = XmlNode::element(self.policy.trade_delivery());
        if self.policy.emits_ship_to() {
            let recipient = invoice.recipient.as_ref().unwrap_or(&invoice.buyer);
            emit_party(
                &mut delivery,
                recipient,
                "ram:ShipToTradeParty",
                &self.policy,
                true,
            );
        }
        // the delivery event date duplicates the issue date
        let mut event = XmlNode::element("ram:ActualDeliverySupplyChainEvent");
        event.add(date_node("ram:OccurrenceDateTime", invoice.issue_date));
        delivery.add(event);
        delivery
    }

    fn trade_settlement(&self) -> Result<XmlNode, ZugferdError> {
        let invoice = self.invoice;
        let mut settlement = XmlNode::element(self.policy.trade_settlement());
        settlement.add(XmlNode::text("ram:InvoiceCurrencyCode", &invoice.currency));
        settlement.add(self.payment_means());
        settlement.add(self.applicable_tax()?);
        if let Some(period) = &invoice.period {
            settlement.add(period_node(period));
        }
        settlement.add(self.payment_terms());
        settlement.add(self.monetary_summation()?);
        Ok(settlement)
    }

    fn payment_means(&self) -> XmlNode {
        let invoice = self.invoice;
        let mut means = XmlNode::element("ram:SpecifiedTradeSettlementPaymentMeans");
        means.add(XmlNode::text(
            "ram:TypeCode",
            self.tables.payment_code(invoice.payment_type.as_deref()),
        ));
        means.add_opt("ram:Information", invoice.payment_text.as_deref());
        if let Some(iban) = &invoice.iban {
            let mut account = XmlNode::element("ram:PayeePartyCreditorFinancialAccount");
            account.add(XmlNode::text("ram:IBANID", iban));
            account.add_opt("ram:AccountName", invoice.account_name.as_deref());
            means.add(account);
            if let Some(bic) = &invoice.bic {
                let mut institution =
                    XmlNode::element("ram:PayeeSpecifiedCreditorFinancialInstitution");
                institution.add(XmlNode::text("ram:BICID", bic));
                means.add(institution);
            }
        }
        means
    }

    fn applicable_tax(&self) -> Result<XmlNode, ZugferdError> {
        let invoice = self.invoice;
        let tax_amount = parse_amount("tax_amount", &invoice.tax_amount)?;
        let basis = parse_amount("basis_amount", &invoice.basis_amount)?;
        let percent = parse_amount("tax_percent", &invoice.tax_percent)?;

        let mut tax = XmlNode::element("ram:ApplicableTradeTax");
        tax.add(XmlNode::text(
            "ram:CalculatedAmount",
            format::amount(tax_amount),
        ));
        tax.add(XmlNode::text("ram:TypeCode", "VAT"));
        let reason = invoice
            .tax_exemption_reason
            .as_deref()
            .or_else(|| self.tables.exemption_reason(&invoice.tax_category));
        tax.add_opt("ram:ExemptionReason", reason);
        tax.add(XmlNode::text("ram:BasisAmount", format::amount(basis)));
        tax.add_opt(
            "ram:CategoryCode",
            self.policy.tax_category_code(self.tables, &invoice.tax_category),
        );
        tax.add(XmlNode::text(
            self.policy.applicable_percent(),
            format::amount(percent),
        ));
        Ok(tax)
    }

    fn payment_terms(&self) -> XmlNode {
        let invoice = self.invoice;
        let mut terms = XmlNode::element("ram:SpecifiedTradePaymentTerms");
        match invoice.payment_status.as_deref() {
            None | Some("unpaid") => {
                terms.add_opt("ram:Description", invoice.payment_description.as_deref());
                if let Some(due) = invoice.payment_due_date {
                    terms.add(date_node("ram:DueDateDateTime", due));
                }
            }
            Some(status) => {
                terms.add(XmlNode::text("ram:Description", capitalize(status)));
            }
        }
        terms
    }

    fn monetary_summation(&self) -> Result<XmlNode, ZugferdError> {
        let invoice = self.invoice;
        let basis = parse_amount("basis_amount", &invoice.basis_amount)?;
        let tax = parse_amount("tax_amount", &invoice.tax_amount)?;
        let grand_total = parse_amount("grand_total_amount", &invoice.grand_total_amount)?;
        let paid = parse_amount("paid_amount", &invoice.paid_amount)?;
        let due = parse_amount("due_amount", &invoice.due_amount)?;

        let mut summation = XmlNode::element(self.policy.monetary_summation());
        summation.add(XmlNode::text("ram:LineTotalAmount", format::amount(basis)));
        // zero-valued placeholders, reserved for surcharge/discount totals
        summation.add(XmlNode::text(
            "ram:ChargeTotalAmount",
            format::amount(Decimal::ZERO),
        ));
        summation.add(XmlNode::text(
            "ram:AllowanceTotalAmount",
            format::amount(Decimal::ZERO),
        ));
        summation.add(XmlNode::text(
            "ram:TaxBasisTotalAmount",
            format::amount(basis),
        ));
        if !tax.is_zero() {
            summation.add(
                XmlNode::text("ram:TaxTotalAmount", format::amount(tax))
                    .attr("currencyID", &invoice.currency),
            );
        }
        summation.add(XmlNode::text(
            "ram:GrandTotalAmount",
            format::amount(grand_total),
        ));
        if !paid.is_zero() {
            summation.add(XmlNode::text(
                "ram:TotalPrepaidAmount",
                format::amount(paid),
            ));
        }
        summation.add(XmlNode::text("ram:DuePayableAmount", format::amount(due)));
        Ok(summation)
    }
}

/// `<name><udt:DateTimeString format="102">YYYYMMDD</udt:DateTimeString></name>`
pub(crate) fn date_node(name: &str, date: NaiveDate) -> XmlNode {
    let mut node = XmlNode::element(name);
    node.add(XmlNode::text("udt:DateTimeString", format::date(date)).attr("format", "102"));
    node
}

pub(crate) fn period_node(period: &Period) -> XmlNode {
    let mut node = XmlNode::element("ram:BillingSpecifiedPeriod");
    node.add(date_node("ram:StartDateTime", period.start));
    node.add(date_node("ram:EndDateTime", period.end));
    node
}

fn note_node(text: &str) -> XmlNode {
    let mut note = XmlNode::element("ram:IncludedNote");
    note.add(XmlNode::text("ram:Content", text));
    // UNTDID 4451 "SUR" — note from the seller
    note.add(XmlNode::text("ram:SubjectCode", "SUR"));
    note
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
