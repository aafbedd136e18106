/// Literal carried by section-header rows in the `No.` column. Those rows
/// hold no item data and must never survive into the output.
pub const ORDER_NO_MARKER: &str = "Order No.";

/// Test the *original* `No.` cell, before any propagation has run, so the
/// marker cannot contaminate neighbouring rows' line-item numbers.
pub fn is_marker_row(no_cell: &str) -> bool {
    no_cell.trim() == ORDER_NO_MARKER
}

/// Rows whose description is empty after extraction are residual
/// header/group rows and carry no item data.
pub fn has_item_text(description: Option<&str>) -> bool {
    description.is_some_and(|d| !d.trim().is_empty())
}
