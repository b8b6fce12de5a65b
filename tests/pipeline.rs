use std::io::{Cursor, Write};

use chrono::NaiveDate;
use demand_ai::data::loader;
use demand_ai::data::model::CellValue;
use demand_ai::pipeline::PipelineError;
use demand_ai::{PipelineConfig, RunOutcome, Session, UploadedFile, run};
use zip::write::SimpleFileOptions;

const HEADER: &str = "Produto,Ano-Mês,Filial,Quantidade de Vendas\n";

fn session(name: &str, bytes: Vec<u8>) -> Session {
    Session {
        upload: Some(UploadedFile::new(name, bytes)),
        ..Session::default()
    }
}

fn widget_north_csv() -> String {
    let mut body = HEADER.to_string();
    for (m, qty) in [10, 12, 11, 15, 14, 18].iter().enumerate() {
        body.push_str(&format!("Widget,2023-{:02},North,{qty}\n", m + 1));
    }
    body
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Workbook fixture
// ---------------------------------------------------------------------------

enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

/// Smallest xlsx calamine will open: one sheet, inline strings.
fn xlsx(rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        sheet.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", (b'A' + c as u8) as char, r + 1);
            match cell {
                Cell::Text(s) => sheet.push_str(&format!(
                    r#"<c r="{reference}" t="inlineStr"><is><t>{s}</t></is></c>"#
                )),
                Cell::Number(n) => {
                    sheet.push_str(&format!(r#"<c r="{reference}"><v>{n}</v></c>"#))
                }
            }
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    let files = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#
                .to_string(),
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#
                .to_string(),
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#
                .to_string(),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#
                .to_string(),
        ),
        ("xl/worksheets/sheet1.xml", sheet),
    ];

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in files {
        zip.start_file(name, SimpleFileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn widget_north_xlsx() -> Vec<u8> {
    let mut rows = vec![vec![
        Cell::Text("Produto"),
        Cell::Text("Ano-Mês"),
        Cell::Text("Filial"),
        Cell::Text("Quantidade de Vendas"),
    ]];
    let months = ["2023-01", "2023-02", "2023-03", "2023-04"];
    for (month, qty) in months.iter().zip([5.0, 7.0, 6.0, 9.0]) {
        rows.push(vec![
            Cell::Text("Widget"),
            Cell::Text(month),
            Cell::Text("North"),
            Cell::Number(qty),
        ]);
    }
    xlsx(&rows)
}

// ---------------------------------------------------------------------------
// End-to-end runs
// ---------------------------------------------------------------------------

#[test]
fn widget_north_scenario() {
    let out = run(
        &session("sales.csv", widget_north_csv().into_bytes()),
        &PipelineConfig::default(),
    );

    let RunOutcome::Forecast(view) = out.outcome else {
        panic!("expected a forecast, got {:?}", out.outcome);
    };
    assert_eq!(view.history.len(), 6);
    assert_eq!(view.forecast.len(), 12);

    let future = view.forecast.future();
    assert_eq!(future.len(), 6);
    let months: Vec<NaiveDate> = future.iter().map(|p| p.ds).collect();
    assert_eq!(
        months,
        vec![
            date(2023, 7, 31),
            date(2023, 8, 31),
            date(2023, 9, 30),
            date(2023, 10, 31),
            date(2023, 11, 30),
            date(2023, 12, 31),
        ]
    );
    for p in future {
        assert!(p.yhat.is_finite());
        assert!(p.yhat_lower.is_finite());
        assert!(p.yhat_upper.is_finite());
    }
}

#[test]
fn series_length_matches_rows_and_is_sorted() {
    let body = format!(
        "{HEADER}Widget,2023-04,North,4\nGadget,2023-01,North,9\nWidget,2023-02,North,2\n\
         Widget,2023-03,South,7\nWidget,2023-01,North,1\nWidget,2023-03,North,3\n"
    );
    let mut s = session("sales.csv", body.into_bytes());
    s.product = Some("Widget".into());
    s.branch = Some("North".into());

    let out = run(&s, &PipelineConfig::default());
    let RunOutcome::Forecast(view) = out.outcome else {
        panic!("expected a forecast, got {:?}", out.outcome);
    };
    assert_eq!(view.history.len(), 4);
    assert!(view.history.points.windows(2).all(|w| w[0].ds <= w[1].ds));
    assert_eq!(view.forecast.len(), 4 + 6);
}

#[test]
fn future_horizon_follows_last_month() {
    let body = format!("{HEADER}A,2022-10,X,3\nA,2022-11,X,4\nA,2022-12,X,5\n");
    let out = run(&session("s.csv", body.into_bytes()), &PipelineConfig::default());
    let RunOutcome::Forecast(view) = out.outcome else {
        panic!("expected a forecast, got {:?}", out.outcome);
    };
    let future = view.forecast.future();
    assert_eq!(future.first().map(|p| p.ds), Some(date(2023, 1, 31)));
    assert_eq!(future.last().map(|p| p.ds), Some(date(2023, 6, 30)));
}

#[test]
fn missing_any_required_column_is_a_schema_failure() {
    let columns = ["Produto", "Ano-Mês", "Filial", "Quantidade de Vendas"];
    for skip in 0..columns.len() {
        let header: Vec<&str> = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, c)| *c)
            .collect();
        let body = format!("{}\na,b,c\n", header.join(","));
        let out = run(&session("s.csv", body.into_bytes()), &PipelineConfig::default());

        assert!(
            matches!(out.outcome, RunOutcome::Failed(PipelineError::Schema(_))),
            "dropping {} should fail the schema check",
            columns[skip]
        );
        assert!(out.selection.is_none());
    }
}

#[test]
fn two_points_are_a_warning_not_an_error() {
    let body = format!("{HEADER}A,2023-01,X,1\nA,2023-02,X,2\n");
    let out = run(&session("s.csv", body.into_bytes()), &PipelineConfig::default());
    assert!(matches!(
        out.outcome,
        RunOutcome::InsufficientData { points: 2, .. }
    ));
}

#[test]
fn malformed_month_fails_the_run() {
    let body = format!("{HEADER}A,2023-01,X,1\nA,2023/13,X,2\nA,2023-03,X,3\n");
    let out = run(&session("s.csv", body.into_bytes()), &PipelineConfig::default());
    let RunOutcome::Failed(err) = out.outcome else {
        panic!("expected failure, got {:?}", out.outcome);
    };
    assert!(matches!(err, PipelineError::Series(_)));
    assert!(err.to_string().contains("2023/13"));
}

#[test]
fn workbook_upload_forecasts() {
    let out = run(
        &session("sales.xlsx", widget_north_xlsx()),
        &PipelineConfig::default(),
    );
    let choices = out.choices.as_ref().expect("schema should be valid");
    assert_eq!(choices.products, vec![CellValue::from("Widget")]);

    let RunOutcome::Forecast(view) = out.outcome else {
        panic!("expected a forecast, got {:?}", out.outcome);
    };
    assert_eq!(view.history.len(), 4);
    assert_eq!(view.history.points[3].y, 9.0);
    assert_eq!(view.forecast.len(), 10);
}

#[test]
fn preview_shows_first_five_rows() {
    let out = run(
        &session("sales.csv", widget_north_csv().into_bytes()),
        &PipelineConfig::default(),
    );
    let preview = out.preview.expect("preview after parse");
    assert_eq!(preview.len(), 5);
    assert_eq!(preview.columns.len(), 4);
}

#[test]
fn load_file_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.xlsx");
    std::fs::write(&path, widget_north_xlsx()).unwrap();

    let table = loader::load_file(&path).unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(table.rows[0][0], CellValue::from("Widget"));
    assert_eq!(table.rows[0][3], CellValue::Integer(5));
}
