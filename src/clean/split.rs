// src/clean/split.rs

/// Marker value a data row carries in its `Type` cell. Every other non-empty
/// value in that column announces the customer group that follows.
pub const ITEM_MARKER: &str = "Item";

/// Split one `Type` cell into `(customer header, item marker)`.
/// Empty cells contribute to neither side and rely on propagation.
pub fn split_type_cell(cell: &str) -> (Option<String>, Option<String>) {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        (None, None)
    } else if trimmed == ITEM_MARKER {
        (None, Some(trimmed.to_string()))
    } else {
        (Some(trimmed.to_string()), None)
    }
}
