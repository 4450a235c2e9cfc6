use sql_table_usage::batch::{BatchDriver, QuerySource, DEFAULT_QUERY_COLUMN};
use sql_table_usage::error::UsageError;
use sql_table_usage::extractor::TableExtractor;
use polars::prelude::*;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::PathBuf;

/// Create a scratch directory for one test
fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("table_usage_{}_{}", name, uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_batch_aggregation_counts() {
    let driver = BatchDriver::default();
    let summary = driver.count(["SELECT * FROM a", "SELECT * FROM a, b"]);

    let counts: Vec<(&str, usize)> = summary.counts.iter().collect();
    assert_eq!(counts, vec![("a", 2), ("b", 1)]);
}

#[test]
fn test_self_join_counts_twice() {
    let driver = BatchDriver::default();
    let summary = driver.count(["SELECT * FROM orders o1, orders o2"]);
    assert_eq!(summary.counts.get("orders"), 2);
}

#[test]
fn test_report_from_csv_file() {
    let dir = test_dir("csv");
    let path = dir.join("queries.csv");
    fs::write(
        &path,
        "id,SQL\n\
         1,SELECT * FROM orders\n\
         2,\"SELECT * FROM customers c, orders o WHERE o.cid = c.id\"\n\
         3,SELECT 1\n\
         4,\n",
    )
    .unwrap();

    let driver = BatchDriver::default();
    let report = driver
        .run(&QuerySource::new(&path, DEFAULT_QUERY_COLUMN))
        .unwrap();

    assert_eq!(report.queries_scanned, 3);
    assert_eq!(report.queries_without_tables, 1);
    assert_eq!(
        report.render_text(),
        "Table: orders, Access Count: 2\nTable: customers, Access Count: 1\n"
    );
    assert_eq!(report.source.as_deref(), Some(path.display().to_string().as_str()));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_custom_column_and_dialect() {
    let dir = test_dir("column");
    let path = dir.join("log.csv");
    fs::write(
        &path,
        "query_text\n\
         SELECT * FROM [dbo].[Orders]\n\
         SELECT * FROM [dbo].[Orders] o WHERE o.id = 7\n",
    )
    .unwrap();

    let driver = BatchDriver::new(TableExtractor::with_dialect("mssql").unwrap());
    let report = driver.run(&QuerySource::new(&path, "query_text")).unwrap();

    assert_eq!(report.tables.len(), 1);
    assert_eq!(report.tables[0].table, "Orders");
    assert_eq!(report.tables[0].access_count, 2);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_column_names_available_columns() {
    let dir = test_dir("missing_column");
    let path = dir.join("queries.csv");
    fs::write(&path, "id,query\n1,SELECT * FROM a\n").unwrap();

    let driver = BatchDriver::default();
    let err = driver
        .run(&QuerySource::new(&path, DEFAULT_QUERY_COLUMN))
        .unwrap_err();

    match err {
        UsageError::MissingColumn { column, available } => {
            assert_eq!(column, "SQL");
            assert_eq!(available, "id, query");
        }
        other => panic!("unexpected error: {}", other),
    }

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_report_from_json_file() {
    let dir = test_dir("json");
    let path = dir.join("queries.json");
    fs::write(
        &path,
        r#"[{"SQL": "SELECT * FROM events"}, {"SQL": "SELECT * FROM events e, users u"}]"#,
    )
    .unwrap();

    let driver = BatchDriver::default();
    let report = driver
        .run(&QuerySource::new(&path, DEFAULT_QUERY_COLUMN))
        .unwrap();

    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tables"][0]["table"], "events");
    assert_eq!(value["tables"][0]["access_count"], 2);
    assert_eq!(value["tables"][1]["table"], "users");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_report_from_xlsx_file() {
    let dir = test_dir("xlsx");
    let path = dir.join("queries.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "id").unwrap();
    worksheet.write_string(0, 1, "SQL").unwrap();
    worksheet.write_number(1, 0, 1).unwrap();
    worksheet.write_string(1, 1, "SELECT * FROM orders").unwrap();
    // row 3 has no SQL text
    worksheet.write_number(2, 0, 2).unwrap();
    worksheet.write_number(3, 0, 3).unwrap();
    worksheet
        .write_string(3, 1, "SELECT * FROM customers c, orders o WHERE o.cid = c.id")
        .unwrap();
    workbook.save(&path).unwrap();

    let driver = BatchDriver::default();
    let report = driver
        .run(&QuerySource::new(&path, DEFAULT_QUERY_COLUMN))
        .unwrap();

    assert_eq!(report.queries_scanned, 2);
    assert_eq!(report.queries_without_tables, 0);
    assert_eq!(
        report.render_text(),
        "Table: orders, Access Count: 2\nTable: customers, Access Count: 1\n"
    );

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_xlsx_missing_column() {
    let dir = test_dir("xlsx_column");
    let path = dir.join("queries.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "query").unwrap();
    worksheet.write_string(1, 0, "SELECT * FROM a").unwrap();
    workbook.save(&path).unwrap();

    let err = BatchDriver::default()
        .run(&QuerySource::new(&path, DEFAULT_QUERY_COLUMN))
        .unwrap_err();
    assert!(matches!(err, UsageError::MissingColumn { available, .. } if available == "query"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_report_from_parquet_file() {
    let dir = test_dir("parquet");
    let path = dir.join("queries.parquet");

    let mut df = df! [
        "SQL" => [
            "SELECT * FROM events",
            "SELECT * FROM users u, events e",
            "SELECT * FROM (SELECT * FROM users) recent",
        ]
    ]
    .unwrap();
    let mut file = fs::File::create(&path).unwrap();
    ParquetWriter::new(&mut file).finish(&mut df).unwrap();

    let driver = BatchDriver::default();
    let report = driver
        .run(&QuerySource::new(&path, DEFAULT_QUERY_COLUMN))
        .unwrap();

    let counts: Vec<(&str, usize)> = report
        .tables
        .iter()
        .map(|entry| (entry.table.as_str(), entry.access_count))
        .collect();
    assert_eq!(counts, vec![("events", 2), ("users", 2)]);
    assert_eq!(report.queries_scanned, 3);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_report_from_ndjson_file() {
    let dir = test_dir("ndjson");
    let path = dir.join("queries.ndjson");
    fs::write(
        &path,
        "{\"SQL\": \"SELECT * FROM payments\"}\n\
         {\"SQL\": \"SELECT * FROM refunds r, payments p\"}\n\
         {\"SQL\": \"SELECT * FROM refunds WHERE amount > 10\"}\n",
    )
    .unwrap();

    let driver = BatchDriver::default();
    let report = driver
        .run(&QuerySource::new(&path, DEFAULT_QUERY_COLUMN))
        .unwrap();

    assert_eq!(
        report.render_text(),
        "Table: payments, Access Count: 2\nTable: refunds, Access Count: 2\n"
    );

    fs::remove_dir_all(&dir).ok();
}
