// src/clean/mod.rs
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::ingest::{cell, RawTable};

pub mod extract;
pub mod ffill;
pub mod filter;
pub mod partition;
pub mod split;

use self::extract::ShipmentCell;

/// The fixed output schema, in projection order. A column is emitted only
/// when the input table can back it; absent source columns are omitted from
/// the output, silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputColumn {
    Cid,
    ShipmentDate,
    CustomerName,
    ItemType,
    LineNo,
    OrderNo,
    OrderDate,
    Description,
    Quantity,
    OutstandingQuantity,
    BackOrderQuantity,
    UnitPrice,
    LineDiscount,
    InvoiceDiscount,
    OutstandingOrders,
}

impl OutputColumn {
    pub const ALL: [Self; 15] = [
        Self::Cid,
        Self::ShipmentDate,
        Self::CustomerName,
        Self::ItemType,
        Self::LineNo,
        Self::OrderNo,
        Self::OrderDate,
        Self::Description,
        Self::Quantity,
        Self::OutstandingQuantity,
        Self::BackOrderQuantity,
        Self::UnitPrice,
        Self::LineDiscount,
        Self::InvoiceDiscount,
        Self::OutstandingOrders,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Cid => "CID",
            Self::ShipmentDate => "Shipment_Date",
            Self::CustomerName => "Customer_Name",
            Self::ItemType => "Type",
            Self::LineNo => "No.",
            Self::OrderNo => "Order_No",
            Self::OrderDate => "Order_Date",
            Self::Description => "Description",
            Self::Quantity => "Quantity",
            Self::OutstandingQuantity => "OutstandingQuantity",
            Self::BackOrderQuantity => "Quantity on Back Order",
            Self::UnitPrice => "Unit Price Excl. VAT",
            Self::LineDiscount => "Line Discount Amount",
            Self::InvoiceDiscount => "Inv. Discount Amount Excl. VAT",
            Self::OutstandingOrders => "OutstandingOrders",
        }
    }

    /// Whether the input carries enough to populate this column: either the
    /// overloaded raw column it is derived from, or an already-resolved
    /// column from a previous run of the pipeline.
    fn available(self, table: &RawTable) -> bool {
        match self {
            Self::Cid => table.has_column("Shipment Date") || table.has_column("CID"),
            Self::ShipmentDate => {
                table.has_column("Shipment Date") || table.has_column("Shipment_Date")
            }
            Self::CustomerName => table.has_column("Type") || table.has_column("Customer_Name"),
            Self::ItemType => table.has_column("Type"),
            Self::LineNo => table.has_column("No."),
            Self::OrderNo => table.has_column("Description") || table.has_column("Order_No"),
            Self::OrderDate => table.has_column("Description") || table.has_column("Order_Date"),
            Self::Description => table.has_column("Description"),
            _ => table.has_column(self.name()),
        }
    }
}

/// One normalized output record. Every overloaded source column has been
/// split into single-purpose fields and the group context forward-filled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedRow {
    pub cid: Option<String>,
    pub shipment_date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub item_type: Option<String>,
    pub line_no: Option<String>,
    pub order_no: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub description: String,
    pub quantity: Option<f64>,
    pub outstanding_quantity: Option<f64>,
    pub back_order_quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub line_discount: Option<f64>,
    pub invoice_discount: Option<f64>,
    pub outstanding_orders: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct CleanedTable {
    /// Output columns backed by the input, in fixed schema order.
    pub columns: Vec<OutputColumn>,
    pub rows: Vec<CleanedRow>,
}

impl CleanedTable {
    pub fn has_column(&self, column: OutputColumn) -> bool {
        self.columns.contains(&column)
    }
}

/// Working record while the pipeline runs: raw date text is carried through
/// propagation and parsed only at the end, so an unparsable date still
/// anchors its own run instead of letting an older date bleed through.
#[derive(Debug, Default)]
struct WorkRow {
    customer_name: Option<String>,
    item_type: Option<String>,
    cid: Option<String>,
    shipment_raw: Option<String>,
    order_no: Option<String>,
    order_date_raw: Option<String>,
    line_no: Option<String>,
    marker: bool,
    description: Option<String>,
    quantity: Option<f64>,
    outstanding_quantity: Option<f64>,
    back_order_quantity: Option<f64>,
    unit_price: Option<f64>,
    line_discount: Option<f64>,
    invoice_discount: Option<f64>,
    outstanding_orders: Option<f64>,
}

/// Normalize one raw table: split the group headers out of `Type`, classify
/// the overloaded `Shipment Date` column, pull order headers out of
/// `Description`, forward-fill the group context, drop the administrative
/// rows and project onto the fixed output schema.
///
/// Pure and synchronous; the whole table is transformed in memory and no
/// I/O happens here.
#[tracing::instrument(level = "debug", skip(table), fields(rows = table.rows.len()))]
pub fn clean_table(table: &RawTable) -> CleanedTable {
    let c_type = table.column_index("Type");
    let c_ship = table.column_index("Shipment Date");
    let c_desc = table.column_index("Description");
    let c_no = table.column_index("No.");

    // Already-resolved columns, present when the input is the pipeline's own
    // projected output. Seeds only; classification of the raw overloaded
    // columns takes precedence.
    let c_seed_cid = table.column_index("CID");
    let c_seed_ship = table.column_index("Shipment_Date");
    let c_seed_customer = table.column_index("Customer_Name");
    let c_seed_order_no = table.column_index("Order_No");
    let c_seed_order_date = table.column_index("Order_Date");

    let c_qty = table.column_index(OutputColumn::Quantity.name());
    let c_outstanding_qty = table.column_index(OutputColumn::OutstandingQuantity.name());
    let c_back_order = table.column_index(OutputColumn::BackOrderQuantity.name());
    let c_unit_price = table.column_index(OutputColumn::UnitPrice.name());
    let c_line_disc = table.column_index(OutputColumn::LineDiscount.name());
    let c_inv_disc = table.column_index(OutputColumn::InvoiceDiscount.name());
    let c_outstanding_orders = table.column_index(OutputColumn::OutstandingOrders.name());

    if c_desc.is_none() {
        warn!("input has no Description column; every row fails the description filter");
    }

    let non_empty = |s: &str| {
        let t = s.trim();
        (!t.is_empty()).then(|| t.to_string())
    };

    let mut work: Vec<WorkRow> = Vec::with_capacity(table.rows.len());
    for raw in &table.rows {
        let mut row = WorkRow {
            cid: non_empty(cell(raw, c_seed_cid)),
            shipment_raw: non_empty(cell(raw, c_seed_ship)),
            customer_name: non_empty(cell(raw, c_seed_customer)),
            order_no: non_empty(cell(raw, c_seed_order_no)),
            order_date_raw: non_empty(cell(raw, c_seed_order_date)),
            ..WorkRow::default()
        };

        // group-header split
        let (customer, item) = split::split_type_cell(cell(raw, c_type));
        if customer.is_some() {
            row.customer_name = customer;
        }
        row.item_type = item;

        // shipment cell classification: id vs date
        match extract::classify_shipment_cell(cell(raw, c_ship)) {
            Some(ShipmentCell::Date(text)) => row.shipment_raw = Some(text),
            Some(ShipmentCell::Cid(text)) => row.cid = Some(text),
            None => {}
        }

        // order header extraction, stripped out of the description
        if c_desc.is_some() {
            let desc = cell(raw, c_desc);
            match extract::extract_order(desc) {
                Some(header) => {
                    row.order_no = Some(header.order_no);
                    row.order_date_raw = Some(header.order_date);
                    row.description = Some(header.rest);
                }
                None => row.description = Some(desc.trim().to_string()),
            }
        }

        // marker detection runs on the original cell, before any fill
        let no_raw = cell(raw, c_no);
        row.marker = filter::is_marker_row(no_raw);
        if !row.marker {
            row.line_no = non_empty(no_raw);
        }

        row.quantity = extract::parse_number(cell(raw, c_qty));
        row.outstanding_quantity = extract::parse_number(cell(raw, c_outstanding_qty));
        row.back_order_quantity = extract::parse_number(cell(raw, c_back_order));
        row.unit_price = extract::parse_number(cell(raw, c_unit_price));
        row.line_discount = extract::parse_number(cell(raw, c_line_disc));
        row.invoice_discount = extract::parse_number(cell(raw, c_inv_disc));
        row.outstanding_orders = extract::parse_number(cell(raw, c_outstanding_orders));

        work.push(row);
    }

    // forward-fill the group context, in original row order
    ffill::forward_fill(&mut work, |r| &mut r.customer_name);
    ffill::forward_fill(&mut work, |r| &mut r.cid);
    ffill::forward_fill(&mut work, |r| &mut r.shipment_raw);
    ffill::forward_fill(&mut work, |r| &mut r.order_no);
    ffill::forward_fill(&mut work, |r| &mut r.order_date_raw);

    // section-header rows go before `No.` is propagated, so the marker can
    // never overwrite a neighbouring line-item number
    let before = work.len();
    work.retain(|r| !r.marker);
    debug!(dropped = before - work.len(), "removed section-header rows");
    ffill::forward_fill(&mut work, |r| &mut r.line_no);

    // residual header/group rows carry no item description
    let before = work.len();
    work.retain(|r| filter::has_item_text(r.description.as_deref()));
    debug!(dropped = before - work.len(), "removed rows without a description");

    let rows: Vec<CleanedRow> = work
        .into_iter()
        .map(|r| CleanedRow {
            cid: r.cid,
            shipment_date: r
                .shipment_raw
                .as_deref()
                .and_then(extract::parse_shipment_date),
            customer_name: r.customer_name,
            item_type: r.item_type,
            line_no: r.line_no,
            order_no: r.order_no,
            order_date: r
                .order_date_raw
                .as_deref()
                .and_then(extract::parse_order_date),
            description: r.description.unwrap_or_default(),
            quantity: r.quantity,
            outstanding_quantity: r.outstanding_quantity,
            back_order_quantity: r.back_order_quantity,
            unit_price: r.unit_price,
            line_discount: r.line_discount,
            invoice_discount: r.invoice_discount,
            outstanding_orders: r.outstanding_orders,
        })
        .collect();

    let columns = OutputColumn::ALL
        .iter()
        .copied()
        .filter(|c| c.available(table))
        .collect();

    CleanedTable { columns, rows }
}
