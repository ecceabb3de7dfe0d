//! CSV rendering of the header record and line items.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_decimal::Decimal;

use crate::error::ExportError;
use crate::models::invoice::{HeaderRecord, LineItem};

/// Column names of the header table.
pub const HEADER_COLUMNS: [&str; 5] = ["Customer", "Rep", "Date", "Invoice", "Zip"];

/// Column names of the line item table.
pub const LINE_COLUMNS: [&str; 5] = ["Activity", "Description", "Qty", "Rate", "Amount"];

/// Render the header table: column row plus exactly one data row.
pub fn header_csv(header: &HeaderRecord) -> Result<String, ExportError> {
    let row = [
        opt_text(&header.customer),
        opt_text(&header.rep),
        opt_text(&header.date),
        opt_text(&header.invoice),
        opt_text(&header.zip),
    ];
    write_table(&HEADER_COLUMNS, std::iter::once(row))
}

/// Render the line item table: column row plus one row per item.
pub fn lines_csv(items: &[LineItem]) -> Result<String, ExportError> {
    let rows = items.iter().map(|item| {
        [
            item.activity.clone(),
            item.description.clone(),
            opt_number(item.qty),
            opt_number(item.rate),
            opt_number(item.amount),
        ]
    });
    write_table(&LINE_COLUMNS, rows)
}

/// Write rows with minimal quoting, `\n` between rows and no trailing newline.
fn write_table<I>(columns: &[&str; 5], rows: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = [String; 5]>,
{
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);

    wtr.write_record(columns)?;
    for row in rows {
        wtr.write_record(&row)?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    let mut data = String::from_utf8(bytes)?;
    if data.ends_with('\n') {
        data.pop();
    }
    Ok(data)
}

fn opt_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Plain decimal rendering without trailing zeros (`50.00` → `50`).
fn opt_number(value: Option<Decimal>) -> String {
    value.map(|d| d.normalize().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    /// Split one CSV record, honoring quotes.
    fn split_record(line: &str) -> Vec<String> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(line.as_bytes());
        rdr.records()
            .next()
            .unwrap()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_header_csv_quotes_commas() {
        let header = HeaderRecord {
            customer: Some("Acme, Inc.".to_string()),
            rep: None,
            date: Some("03/04/2023".to_string()),
            invoice: Some("1001".to_string()),
            zip: Some("62704".to_string()),
        };
        let csv = header_csv(&header).unwrap();
        assert_eq!(
            csv,
            "Customer,Rep,Date,Invoice,Zip\n\"Acme, Inc.\",,03/04/2023,1001,62704"
        );

        let data_row = csv.lines().nth(1).unwrap();
        assert_eq!(
            split_record(data_row),
            vec!["Acme, Inc.", "", "03/04/2023", "1001", "62704"]
        );
    }

    #[test]
    fn test_quotes_are_doubled() {
        let header = HeaderRecord {
            customer: Some("The \"Best\" Co".to_string()),
            ..Default::default()
        };
        let csv = header_csv(&header).unwrap();
        assert!(csv.ends_with("\"The \"\"Best\"\" Co\",,,,"));
    }

    #[test]
    fn test_lines_csv() {
        let items = vec![
            LineItem::new("LBR", "Labor - site visit").with_numbers(
                Decimal::from_str("2").ok(),
                Decimal::from_str("50.00").ok(),
                Decimal::from_str("100.00").ok(),
            ),
            LineItem::new("SVC", "Multi\nline"),
        ];
        let csv = lines_csv(&items).unwrap();
        assert_eq!(
            csv,
            "Activity,Description,Qty,Rate,Amount\n\
             LBR,Labor - site visit,2,50,100\n\
             SVC,\"Multi\nline\",,,"
        );
    }

    #[test]
    fn test_empty_items_is_header_only() {
        assert_eq!(lines_csv(&[]).unwrap(), "Activity,Description,Qty,Rate,Amount");
    }

    #[test]
    fn test_fractional_numbers_keep_significant_digits() {
        let items = vec![LineItem::new("", "Fee").with_numbers(
            Decimal::from_str("1.5").ok(),
            Decimal::from_str("12.50").ok(),
            Decimal::from_str("-18.75").ok(),
        )];
        assert!(lines_csv(&items).unwrap().ends_with(",Fee,1.5,12.5,-18.75"));
    }
}
