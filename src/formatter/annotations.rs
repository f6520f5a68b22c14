//! Descriptive names used when annotation is enabled

use crate::parser::Standard;

const X12_SEGMENTS: &[(&str, &str)] = &[
    ("AK1", "Functional Group Response Header"),
    ("AK2", "Transaction Set Response Header"),
    ("AK5", "Transaction Set Response Trailer"),
    ("AK9", "Functional Group Response Trailer"),
    ("AMT", "Monetary Amount"),
    ("BEG", "Beginning Segment for Purchase Order"),
    ("BHT", "Beginning of Hierarchical Transaction"),
    ("BIG", "Beginning Segment for Invoice"),
    ("BPR", "Beginning Segment for Payment Order/Remittance Advice"),
    ("BSN", "Beginning Segment for Ship Notice"),
    ("CLM", "Claim Information"),
    ("CLP", "Claim Payment Information"),
    ("CTT", "Transaction Totals"),
    ("CUR", "Currency"),
    ("DTM", "Date/Time Reference"),
    ("FOB", "F.O.B. Related Instructions"),
    ("GE", "Functional Group Trailer"),
    ("GS", "Functional Group Header"),
    ("HL", "Hierarchical Level"),
    ("IEA", "Interchange Control Trailer"),
    ("ISA", "Interchange Control Header"),
    ("IT1", "Baseline Item Data (Invoice)"),
    ("ITD", "Terms of Sale/Deferred Terms of Sale"),
    ("LIN", "Item Identification"),
    ("MEA", "Measurements"),
    ("MSG", "Message Text"),
    ("N1", "Name"),
    ("N2", "Additional Name Information"),
    ("N3", "Address Information"),
    ("N4", "Geographic Location"),
    ("NM1", "Individual or Organizational Name"),
    ("PER", "Administrative Communications Contact"),
    ("PID", "Product/Item Description"),
    ("PO1", "Baseline Item Data"),
    ("PRF", "Purchase Order Reference"),
    ("REF", "Reference Identification"),
    ("SAC", "Service, Promotion, Allowance, or Charge Information"),
    ("SE", "Transaction Set Trailer"),
    ("SN1", "Item Detail (Shipment)"),
    ("ST", "Transaction Set Header"),
    ("SV1", "Professional Service"),
    ("SVC", "Service Payment Information"),
    ("TD1", "Carrier Details (Quantity and Weight)"),
    ("TD5", "Carrier Details (Routing Sequence/Transit Time)"),
    ("TDS", "Total Monetary Value Summary"),
    ("TRN", "Trace"),
];

const EDIFACT_SEGMENTS: &[(&str, &str)] = &[
    ("ALC", "Allowance or charge"),
    ("BGM", "Beginning of message"),
    ("CNT", "Control total"),
    ("COM", "Communication contact"),
    ("CTA", "Contact information"),
    ("CUX", "Currencies"),
    ("DTM", "Date/time/period"),
    ("FTX", "Free text"),
    ("IMD", "Item description"),
    ("LIN", "Line item"),
    ("LOC", "Place/location identification"),
    ("MOA", "Monetary amount"),
    ("NAD", "Name and address"),
    ("PAT", "Payment terms basis"),
    ("PIA", "Additional product id"),
    ("PRI", "Price details"),
    ("QTY", "Quantity"),
    ("RFF", "Reference"),
    ("TAX", "Duty/tax/fee details"),
    ("TDT", "Details of transport"),
    ("UNB", "Interchange header"),
    ("UNE", "Functional group trailer"),
    ("UNG", "Functional group header"),
    ("UNH", "Message header"),
    ("UNS", "Section control"),
    ("UNT", "Message trailer"),
    ("UNZ", "Interchange trailer"),
];

const X12_TRANSACTIONS: &[(&str, &str)] = &[
    ("204", "Motor Carrier Load Tender"),
    ("210", "Motor Carrier Freight Details and Invoice"),
    ("214", "Transportation Carrier Shipment Status Message"),
    ("270", "Eligibility, Coverage or Benefit Inquiry"),
    ("271", "Eligibility, Coverage or Benefit Information"),
    ("276", "Health Care Claim Status Request"),
    ("277", "Health Care Claim Status Notification"),
    ("810", "Invoice"),
    ("820", "Payment Order/Remittance Advice"),
    ("835", "Health Care Claim Payment/Advice"),
    ("837", "Health Care Claim"),
    ("846", "Inventory Inquiry/Advice"),
    ("850", "Purchase Order"),
    ("855", "Purchase Order Acknowledgment"),
    ("856", "Ship Notice/Manifest"),
    ("860", "Purchase Order Change Request - Buyer Initiated"),
    ("940", "Warehouse Shipping Order"),
    ("945", "Warehouse Shipping Advice"),
    ("997", "Functional Acknowledgment"),
    ("999", "Implementation Acknowledgment"),
];

const EDIFACT_MESSAGES: &[(&str, &str)] = &[
    ("APERAK", "Application error and acknowledgement message"),
    ("CONTRL", "Syntax and service report message"),
    ("DESADV", "Despatch advice message"),
    ("IFTMIN", "Instruction message"),
    ("INVOIC", "Invoice message"),
    ("ORDCHG", "Purchase order change request message"),
    ("ORDERS", "Purchase order message"),
    ("ORDRSP", "Purchase order response message"),
    ("PRICAT", "Price/sales catalogue message"),
    ("REMADV", "Remittance advice message"),
];

const X12_FUNCTIONAL_GROUPS: &[(&str, &str)] = &[
    ("FA", "Functional Acknowledgment"),
    ("HC", "Health Care Claim"),
    ("HP", "Health Care Claim Payment/Advice"),
    ("IB", "Inventory Inquiry/Advice"),
    ("IN", "Invoice Information"),
    ("OW", "Warehouse Shipping Order"),
    ("PC", "Purchase Order Change Request"),
    ("PO", "Purchase Order"),
    ("PR", "Purchase Order Acknowledgment"),
    ("RA", "Payment Order/Remittance Advice"),
    ("SH", "Ship Notice/Manifest"),
    ("SM", "Motor Carrier Load Tender"),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .binary_search_by(|(code, _)| (*code).cmp(key))
        .ok()
        .map(|index| table[index].1)
}

/// Descriptive name of a segment tag
pub fn segment_name(standard: Standard, tag: &str) -> Option<&'static str> {
    match standard {
        Standard::X12 => lookup(X12_SEGMENTS, tag),
        Standard::Edifact => lookup(EDIFACT_SEGMENTS, tag),
    }
}

/// Descriptive name of a transaction set code or message type
pub fn transaction_name(standard: Standard, code: &str) -> Option<&'static str> {
    match standard {
        Standard::X12 => lookup(X12_TRANSACTIONS, code),
        Standard::Edifact => lookup(EDIFACT_MESSAGES, code),
    }
}

/// Descriptive name of a functional identifier code
pub fn group_name(standard: Standard, code: &str) -> Option<&'static str> {
    match standard {
        Standard::X12 => lookup(X12_FUNCTIONAL_GROUPS, code),
        // UNG01 names the message type carried by the group
        Standard::Edifact => lookup(EDIFACT_MESSAGES, code),
    }
}
