//! JSON parser for extracted expense-table snapshots.

use anyhow::Result;

use crate::record::ExpenseTable;

/// Decodes a JSON-encoded snapshot of [`ExpenseTable`]s from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON for a table array.
pub fn parse_tables(bytes: &[u8]) -> Result<Vec<ExpenseTable>> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_array() {
        let tables = parse_tables(b"[]").unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn test_parse_invalid_bytes() {
        let result = parse_tables(b"{not json");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_minimal_table() {
        let json = r#"[
            {
                "title": "2025年10月 交通費",
                "expenses": [
                    {
                        "rowId": "row0",
                        "date": "2025-10-01",
                        "from": "品川",
                        "to": "新宿",
                        "roundTrip": true,
                        "amount": 400,
                        "purpose": "客先訪問",
                        "remarks": ""
                    }
                ]
            }
        ]"#;

        let tables = parse_tables(json.as_bytes()).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title, "2025年10月 交通費");
        assert_eq!(tables[0].expenses.len(), 1);
        assert!(tables[0].expenses[0].round_trip);
        assert_eq!(tables[0].expenses[0].amount, 400);
    }

    #[test]
    fn test_parse_table_without_expenses_field() {
        let json = br#"[{ "title": "empty" }]"#;
        let tables = parse_tables(json).unwrap();
        assert!(tables[0].expenses.is_empty());
    }
}
