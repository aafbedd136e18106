use serde::Serialize;

use super::CleanedRow;

/// Case-sensitive suffix that routes a row into the Deli subset.
pub const DELI_SUFFIX: &str = "Deli";

/// The two disjoint output subsets. Their union is exactly the cleaned
/// table; no row is dropped at this stage.
#[derive(Debug, Clone, Default)]
pub struct Partitions {
    pub deli: Vec<CleanedRow>,
    pub foc: Vec<CleanedRow>,
}

/// Split cleaned rows on the customer-name suffix. Rows without a resolved
/// customer fall into the FOC subset.
pub fn partition_rows(rows: Vec<CleanedRow>) -> Partitions {
    let (deli, foc) = rows.into_iter().partition(|row| {
        row.customer_name
            .as_deref()
            .is_some_and(|name| name.ends_with(DELI_SUFFIX))
    });
    Partitions { deli, foc }
}

/// Per-subset report handed back to the caller: record count, plus the
/// quantity sum when the source table carried a `Quantity` column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubsetSummary {
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<f64>,
}

pub fn summarize(rows: &[CleanedRow], has_quantity: bool) -> SubsetSummary {
    let total_quantity =
        has_quantity.then(|| rows.iter().filter_map(|row| row.quantity).sum());
    SubsetSummary {
        records: rows.len(),
        total_quantity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(customer: Option<&str>, quantity: Option<f64>) -> CleanedRow {
        CleanedRow {
            customer_name: customer.map(str::to_string),
            quantity,
            ..CleanedRow::default()
        }
    }

    #[test]
    fn partition_is_complete_and_disjoint() {
        let rows = vec![
            row(Some("Acme Deli"), Some(5.0)),
            row(Some("Harbour FOC"), Some(2.0)),
            row(None, None),
        ];
        let total = rows.len();
        let parts = partition_rows(rows);
        assert_eq!(parts.deli.len() + parts.foc.len(), total);
        assert_eq!(parts.deli.len(), 1);
        assert_eq!(parts.deli[0].customer_name.as_deref(), Some("Acme Deli"));
    }

    #[test]
    fn suffix_test_is_exact_and_case_sensitive() {
        let parts = partition_rows(vec![
            row(Some("Global Deli Express"), None),
            row(Some("CORNER DELI"), None),
            row(Some("Corner Deli"), None),
        ]);
        assert_eq!(parts.deli.len(), 1);
        assert_eq!(parts.deli[0].customer_name.as_deref(), Some("Corner Deli"));
        assert_eq!(parts.foc.len(), 2);
    }

    #[test]
    fn missing_customer_routes_to_foc() {
        let parts = partition_rows(vec![row(None, None)]);
        assert!(parts.deli.is_empty());
        assert_eq!(parts.foc.len(), 1);
    }

    #[test]
    fn summary_counts_and_sums() {
        let rows = vec![row(Some("A Deli"), Some(5.0)), row(Some("A Deli"), None)];
        let summary = summarize(&rows, true);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.total_quantity, Some(5.0));

        let without = summarize(&rows, false);
        assert_eq!(without.total_quantity, None);
    }
}
