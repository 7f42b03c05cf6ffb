// ==========================================
// Panel Logístico Salar - Armado de reportes
// ==========================================
// Ensambla los documentos exportables del panel:
// reporte diario de despachos (resumen, gráficos
// paginados de a dos y detalle por producto) y
// reporte de llegadas por empresa. El dibujado
// queda detrás de un trait; aquí solo se decide
// QUÉ páginas existen y en qué orden.
// ==========================================

use crate::domain::dispatch::DispatchRecord;
use crate::engine::aggregator::{aggregate, AggregatedGroup, ChartView, GroupField, Measure};
use crate::engine::day_summary::{day_stats, product_list, DayStats, HourlyProfile};
use crate::importer::date_normalizer::canonical;
use crate::insight::DashboardInsight;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Gráficos por página en el reporte de despachos
pub const CHARTS_PER_PAGE: usize = 2;

// ==========================================
// Geometría de página
// ==========================================

/// Geometría de dibujado de una página
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width_px: u32,
    pub height_px: u32,
    pub margin_px: u32,
    /// Calidad de compresión de imagen, 0.0 a 1.0
    pub image_quality: f32,
    /// Factor de sobremuestreo del rasterizado
    pub scale: f32,
}

impl PageGeometry {
    /// Página apaisada del reporte de despachos (pantalla completa)
    pub fn dispatch() -> Self {
        Self {
            width_px: 1056,
            height_px: 816,
            margin_px: 0,
            image_quality: 0.98,
            scale: 1.5,
        }
    }

    /// Página A4 vertical del reporte de llegadas
    pub fn arrival() -> Self {
        Self {
            width_px: 794,
            height_px: 1123,
            margin_px: 24,
            image_quality: 0.95,
            scale: 1.5,
        }
    }
}

// ==========================================
// Documento
// ==========================================

/// Secciones opcionales del reporte de despachos
#[derive(Debug, Clone, Copy)]
pub struct ReportSections {
    pub summary: bool,
    pub charts: bool,
    pub products: bool,
}

impl Default for ReportSections {
    fn default() -> Self {
        Self {
            summary: true,
            charts: true,
            products: true,
        }
    }
}

/// Una página lógica del documento
#[derive(Debug, Clone, Serialize)]
pub enum ReportPage {
    /// Portada con indicadores del día y análisis automático
    Summary {
        date: NaiveDate,
        stats: DayStats,
        insight: DashboardInsight,
    },
    /// Página de gráficos (hasta CHARTS_PER_PAGE por página)
    Charts {
        charts: Vec<ChartView>,
        page_no: usize,
        total_pages: usize,
    },
    /// Detalle de un producto: desglose por destino
    ProductDetail {
        product: String,
        index: usize,
        total: usize,
        breakdown: Vec<AggregatedGroup>,
    },
    /// Gráfico del perfil horario de llegadas de una empresa
    ArrivalChart {
        company: String,
        date: NaiveDate,
        profile: HourlyProfile,
    },
    /// Tabla horaria de llegadas de una empresa
    ArrivalTable {
        company: String,
        date: NaiveDate,
        profile: HourlyProfile,
    },
}

/// Documento listo para dibujar
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub date: NaiveDate,
    pub pages: Vec<ReportPage>,
}

// ==========================================
// Ensamblado
// ==========================================

/// Medidas del desglose por destino en el detalle de producto
const DETAIL_MEASURES: [Measure; 4] = [
    Measure::TonPlanned,
    Measure::TonActual,
    Measure::EquipPlanned,
    Measure::EquipActual,
];

/// Ensambla el reporte diario de despachos
///
/// Orden de páginas: portada, gráficos de a dos, un detalle por
/// producto. Las secciones desactivadas simplemente no emiten páginas.
pub fn assemble_dispatch_report(
    date: NaiveDate,
    records: &[DispatchRecord],
    charts: &[ChartView],
    insight: &DashboardInsight,
    sections: ReportSections,
) -> ReportDocument {
    let mut pages = Vec::new();

    if sections.summary {
        pages.push(ReportPage::Summary {
            date,
            stats: day_stats(records),
            insight: insight.clone(),
        });
    }

    if sections.charts && !charts.is_empty() {
        let chunks: Vec<&[ChartView]> = charts.chunks(CHARTS_PER_PAGE).collect();
        let total_pages = chunks.len();
        for (i, chunk) in chunks.into_iter().enumerate() {
            pages.push(ReportPage::Charts {
                charts: chunk.to_vec(),
                page_no: i + 1,
                total_pages,
            });
        }
    }

    if sections.products {
        let products = product_list(records);
        let total = products.len();
        for (index, product) in products.into_iter().enumerate() {
            let of_product: Vec<DispatchRecord> = records
                .iter()
                .filter(|r| r.product == product)
                .cloned()
                .collect();
            let breakdown = aggregate(
                &of_product,
                GroupField::Destination,
                &DETAIL_MEASURES,
                usize::MAX,
            );
            pages.push(ReportPage::ProductDetail {
                product,
                index: index + 1,
                total,
                breakdown,
            });
        }
    }

    info!(fecha = %date, paginas = pages.len(), "reporte de despachos ensamblado");

    ReportDocument {
        title: format!("Reporte Logístico {}", canonical(date)),
        date,
        pages,
    }
}

/// Ensambla el reporte de llegadas de una empresa: gráfico + tabla
pub fn assemble_arrival_report(
    company: &str,
    date: NaiveDate,
    profile: &HourlyProfile,
) -> ReportDocument {
    let pages = vec![
        ReportPage::ArrivalChart {
            company: company.to_string(),
            date,
            profile: profile.clone(),
        },
        ReportPage::ArrivalTable {
            company: company.to_string(),
            date,
            profile: profile.clone(),
        },
    ];

    ReportDocument {
        title: format!("Reporte de Equipos {company}"),
        date,
        pages,
    }
}

// ==========================================
// Nombres de archivo de exportación
// ==========================================

pub fn dispatch_report_filename(date: NaiveDate) -> String {
    format!("REPORTE_LOGISTICA_{}.pdf", canonical(date))
}

pub fn dispatch_teaser_filename(date: NaiveDate) -> String {
    format!("TEASER_LOGISTICA_LITIO_{}.png", canonical(date))
}

pub fn arrival_report_filename(company: &str, date: NaiveDate) -> String {
    format!("Reporte_Equipos_{}_{}.pdf", company, canonical(date))
}

// ==========================================
// Dibujado
// ==========================================

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("fallo de dibujado en la página {page}: {detail}")]
    PageFailed { page: usize, detail: String },

    #[error("documento sin páginas")]
    EmptyDocument,
}

/// Dibujante de documentos (PDF, PNG u otro destino)
pub trait DocumentRenderer {
    fn render(&self, doc: &ReportDocument, geometry: &PageGeometry) -> Result<Vec<u8>, RenderError>;
}

/// Dibuja el documento, validando que tenga contenido
pub fn export_document(
    renderer: &dyn DocumentRenderer,
    doc: &ReportDocument,
    geometry: &PageGeometry,
) -> Result<Vec<u8>, RenderError> {
    if doc.pages.is_empty() {
        return Err(RenderError::EmptyDocument);
    }
    renderer.render(doc, geometry)
}
