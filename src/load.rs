//! Loads a CSV export of the Sales sheet into a [`Dataset`].
//!
//! Parsing and type coercion happen here, once, at startup; the pipeline only
//! ever sees already-typed records.

use crate::model::Dataset;
use crate::Result;
use anyhow::{bail, Context};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads the sales data file at `path` into a `Dataset`.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Unable to open the sales data file {}", path.display()))?;
    read_csv(BufReader::new(file))
        .with_context(|| format!("Unable to load sales data from {}", path.display()))
}

/// Reads CSV sales data from any reader into a `Dataset`.
///
/// The first record must be the header row, with the source sheet's exact
/// header names (`Invoice ID`, `Customer_type`, `Product line`, ...). A file
/// with headers but no data rows is an error: every downstream consumer
/// assumes the dataset has observed filter values to offer.
pub fn read_csv(reader: impl Read) -> Result<Dataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("Unable to read the CSV header row")?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = vec![headers];
    for (ix, record) in csv_reader.records().enumerate() {
        let record =
            record.with_context(|| format!("Unable to read the CSV record at row {}", ix + 2))?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    let dataset = Dataset::parse(rows)?;
    if dataset.is_empty() {
        bail!("The sales data contains no rows");
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
Invoice ID,Branch,City,Customer_type,Gender,Product line,Unit price,Quantity,Tax 5%,Total,Date,Time,Payment,cogs,gross margin percentage,gross income,Rating
750-67-8428,A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,548.9715,1/5/2019,13:08:00,Ewallet,522.83,4.761904762,26.1415,9.1
226-31-3081,C,Naypyitaw,Normal,Female,Electronic accessories,15.28,5,3.82,80.22,3/8/2019,10:29:00,Cash,76.4,4.761904762,3.82,9.6
631-41-3108,A,Yangon,Normal,Male,Home and lifestyle,46.33,7,16.2155,340.5255,3/3/2019,13:23:00,Credit card,324.31,4.761904762,16.2155,7.4
";

    #[test]
    fn test_read_csv() {
        let dataset = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.cities(), &["Yangon", "Naypyitaw"]);
        assert_eq!(dataset.customer_types(), &["Member", "Normal"]);
        assert_eq!(dataset.genders(), &["Female", "Male"]);
        assert_eq!(dataset.sales()[0].hour(), 13);
        assert_eq!(dataset.sales()[1].hour(), 10);
    }

    #[test]
    fn test_read_csv_with_no_rows_is_an_error() {
        let csv = "Invoice ID,City,Customer_type,Gender,Product line,Total,Time,Rating\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("no rows"));
    }

    #[test]
    fn test_read_csv_with_a_bad_row_names_the_row() {
        let csv = "\
Invoice ID,City,Customer_type,Gender,Product line,Total,Time,Rating
1,Yangon,Member,Female,Food,10.00,09:00:00,7.0
2,Yangon,Member,Female,Food,10.00,not-a-time,7.0
";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("row 3"));
    }

    #[test]
    fn test_load_csv_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let dataset = load_csv(file.path()).unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_load_csv_missing_file_names_the_path() {
        let err = load_csv("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("here.csv"));
    }
}
