// ==========================================
// Prueba de extremo a extremo - despachos
// ==========================================
// Genera un libro Excel real en un directorio
// temporal y lo pasa por la tubería completa:
// lectura, normalización, estado de aplicación,
// agregación y armado del reporte.
// ==========================================

use rust_xlsxwriter::Workbook;
use salar_dashboard::engine::aggregator::{aggregate, default_charts, GroupField, Measure};
use salar_dashboard::report::{assemble_dispatch_report, dispatch_report_filename, ReportSections};
use salar_dashboard::{
    build_chart, day_stats, logging, AppState, DashboardInsight, ImportError,
};
use std::path::PathBuf;
use tempfile::TempDir;

const HEADERS: [&str; 9] = [
    "ID",
    "FECHA",
    "PRODUCTO",
    "DESTINO",
    "TON_PROG",
    "TON_REAL",
    "EQ_PROG",
    "EQ_REAL",
    "REGULACION_REAL",
];

/// Libro de despachos con hoja "Base de Datos":
/// - fila con fecha como número de serie (45000 = 2023-03-15)
/// - fila con fecha como texto DD-MM-YYYY y destino de planta de litio
/// - fila sin fecha, que debe omitirse
fn write_dispatch_workbook(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("despachos.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Base de Datos").unwrap();

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }

    // Fila 1: serie 45000, NITRATO a TOCOPILLA
    sheet.write_number(1, 0, 1.0).unwrap();
    sheet.write_number(1, 1, 45000.0).unwrap();
    sheet.write_string(1, 2, "nitrato").unwrap();
    sheet.write_string(1, 3, "tocopilla").unwrap();
    sheet.write_number(1, 4, 100.0).unwrap();
    sheet.write_number(1, 5, 90.0).unwrap();
    sheet.write_number(1, 6, 4.0).unwrap();
    sheet.write_number(1, 7, 3.0).unwrap();
    sheet.write_number(1, 8, 1.0).unwrap();

    // Fila 2: misma jornada como texto, destino colapsa a PQL
    sheet.write_number(2, 0, 2.0).unwrap();
    sheet.write_string(2, 1, "15-03-2023").unwrap();
    sheet.write_string(2, 2, "YODO").unwrap();
    sheet.write_string(2, 3, "Antofagasta P de Litio").unwrap();
    sheet.write_number(2, 4, 50.0).unwrap();
    sheet.write_number(2, 5, 60.0).unwrap();
    sheet.write_number(2, 6, 2.0).unwrap();
    sheet.write_number(2, 7, 2.0).unwrap();
    sheet.write_string(2, 8, "no numérico").unwrap();

    // Fila 3: sin fecha, debe omitirse
    sheet.write_number(3, 0, 3.0).unwrap();
    sheet.write_string(3, 1, "").unwrap();
    sheet.write_string(3, 2, "CLORURO").unwrap();

    workbook.save(&path).unwrap();
    path
}

#[tokio::test]
async fn test_dispatch_pipeline_end_to_end() {
    logging::init_test();

    let dir = TempDir::new().unwrap();
    let path = write_dispatch_workbook(&dir);

    let state = AppState::new(Default::default());
    let summary = state.load_dispatch_file(&path).await.unwrap();

    assert_eq!(summary.sheet_name, "Base de Datos");
    assert_eq!(summary.total_rows, 3);
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 1);

    let dataset = state.dispatch_snapshot().await.unwrap();
    assert_eq!(dataset.len(), 2);

    // Ambas representaciones de fecha caen en la misma jornada
    let dates = dataset.available_dates();
    assert_eq!(dates.len(), 1);
    let day = dataset.for_date(dates[0]);
    assert_eq!(day.len(), 2);
    assert_eq!(day[0].date_str(), "2023-03-15");

    // Normalización categórica aplicada
    let destinations: Vec<&str> = day.iter().map(|r| r.destination.as_str()).collect();
    assert!(destinations.contains(&"TOCOPILLA"));
    assert!(destinations.contains(&"PQL"));

    // Medida no numérica coaccionada a cero
    let yodo = day.iter().find(|r| r.product == "YODO").unwrap();
    assert_eq!(yodo.regulation_actual, 0.0);
}

#[tokio::test]
async fn test_dispatch_aggregation_and_report() {
    let dir = TempDir::new().unwrap();
    let path = write_dispatch_workbook(&dir);

    let state = AppState::new(Default::default());
    state.load_dispatch_file(&path).await.unwrap();
    let dataset = state.dispatch_snapshot().await.unwrap();
    let date = dataset.available_dates()[0];
    let day: Vec<_> = dataset.for_date(date).into_iter().cloned().collect();

    // Agregación por producto
    let groups = aggregate(&day, GroupField::Product, &[Measure::TonActual], 10);
    assert_eq!(groups[0].key, "NITRATO");
    assert_eq!(groups[0].sums, vec![90.0]);
    assert_eq!(groups[1].key, "YODO");

    // Indicadores del día
    let stats = day_stats(&day);
    assert_eq!(stats.total_planned, 150.0);
    assert_eq!(stats.total_actual, 150.0);
    assert!((stats.compliance_pct - 100.0).abs() < 1e-9);

    // Reporte completo con el tablero fijo
    let charts: Vec<_> = default_charts().iter().map(|c| build_chart(&day, c)).collect();
    let doc = assemble_dispatch_report(
        date,
        &day,
        &charts,
        &DashboardInsight::fallback(),
        ReportSections::default(),
    );

    // Portada + 2 páginas de gráficos + 2 productos
    assert_eq!(doc.pages.len(), 5);
    assert_eq!(dispatch_report_filename(date), "REPORTE_LOGISTICA_2023-03-15.pdf");
}

#[tokio::test]
async fn test_reload_replaces_dataset() {
    let dir = TempDir::new().unwrap();
    let path = write_dispatch_workbook(&dir);

    // Segundo libro con una sola fila
    let path2 = dir.path().join("despachos_v2.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Base de Datos").unwrap();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_number(1, 0, 1.0).unwrap();
    sheet.write_string(1, 1, "2023-04-01").unwrap();
    sheet.write_string(1, 2, "CLORURO").unwrap();
    sheet.write_string(1, 3, "BAQ").unwrap();
    sheet.write_number(1, 4, 10.0).unwrap();
    sheet.write_number(1, 5, 10.0).unwrap();
    workbook.save(&path2).unwrap();

    let state = AppState::new(Default::default());
    state.load_dispatch_file(&path).await.unwrap();
    assert_eq!(state.dispatch_snapshot().await.unwrap().len(), 2);

    state.load_dispatch_file(&path2).await.unwrap();
    let dataset = state.dispatch_snapshot().await.unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].destination, "BAQUEDANO");
}

#[tokio::test]
async fn test_header_only_workbook_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vacio.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Base de Datos").unwrap();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    workbook.save(&path).unwrap();

    let state = AppState::new(Default::default());
    let result = state.load_dispatch_file(&path).await;
    assert!(matches!(result, Err(ImportError::InsufficientRows { rows: 1 })));
    assert!(state.dispatch_snapshot().await.is_none());
}

#[tokio::test]
async fn test_wrong_extension_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("despachos.csv");
    std::fs::write(&path, "FECHA;PRODUCTO\n").unwrap();

    let state = AppState::new(Default::default());
    let result = state.load_dispatch_file(&path).await;
    assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_fallback_to_first_sheet_when_preferred_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("otra_hoja.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Resumen Mensual").unwrap();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_number(1, 0, 1.0).unwrap();
    sheet.write_string(1, 1, "2023-03-15").unwrap();
    sheet.write_string(1, 2, "NITRATO").unwrap();
    sheet.write_string(1, 3, "TOCOPILLA").unwrap();
    sheet.write_number(1, 4, 10.0).unwrap();
    sheet.write_number(1, 5, 10.0).unwrap();
    workbook.save(&path).unwrap();

    let state = AppState::new(Default::default());
    let summary = state.load_dispatch_file(&path).await.unwrap();
    assert_eq!(summary.sheet_name, "Resumen Mensual");
    assert_eq!(summary.imported, 1);
}
