// ==========================================
// Panel Logístico Salar - Normalizador de nombres
// ==========================================
// Canonicaliza empresas y destinos de texto libre:
// limpieza + tabla de equivalencias muchos-a-uno.
// Determinista, idempotente y total.
// ==========================================

/// Centinela para empresa vacía
pub const NO_COMPANY: &str = "SIN EMPRESA";

/// Centinela para destino vacío
pub const NO_DESTINATION: &str = "S/D";

/// Centinela para producto vacío
pub const NO_PRODUCT: &str = "SIN PRODUCTO";

/// Código de la planta de litio (colapso por regla cruzada ciudad+producto)
pub const LITHIUM_PLANT_CODE: &str = "PQL";

// ==========================================
// Empresas
// ==========================================

/// Normaliza el nombre de una empresa transportista
///
/// Pasos: trim + mayúsculas; sin puntos; `&` → "AND"; corridas de
/// espacios colapsadas; búsqueda en la tabla de equivalencias. Si no
/// hay entrada, el texto limpio es la forma canónica.
pub fn normalize_company(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if upper.is_empty() {
        return NO_COMPANY.to_string();
    }

    let cleaned = upper.replace('.', "").replace('&', "AND");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        // Solo puntuación: conserva el invariante de campo no vacío
        return NO_COMPANY.to_string();
    }

    company_alias(&cleaned)
        .map(str::to_string)
        .unwrap_or(cleaned)
}

/// Tabla de equivalencias muchos-a-uno de empresas
///
/// Las claves están en forma limpia (sin puntos, `&` expandido);
/// cubre también la forma limpia de cada etiqueta canónica para que
/// la normalización sea idempotente.
fn company_alias(cleaned: &str) -> Option<&'static str> {
    let canonical = match cleaned {
        "JORQUERA TRANSPORTE S A" => "JORQUERA TRANSPORTE S. A.",
        "JORQUERA TRANSPORTE SA" => "JORQUERA TRANSPORTE S. A.",
        "MINING SERVICES AND DERIVATES" => "M S & D SPA",
        "MINING SERVICES AND DERIVATES SPA" => "M S & D SPA",
        "M S AND D" => "M S & D SPA",
        "M S AND D SPA" => "M S & D SPA",
        "MSANDD SPA" => "M S & D SPA",
        "M S D" => "M S & D SPA",
        "M S D SPA" => "M S & D SPA",
        "M AND Q SPA" => "M&Q SPA",
        "M AND Q" => "M&Q SPA",
        "M Q SPA" => "M&Q SPA",
        "MQ SPA" => "M&Q SPA",
        "MANDQ SPA" => "M&Q SPA",
        "MINING AND QUARRYING SPA" => "M&Q SPA",
        "MINING AND QUARRYNG SPA" => "M&Q SPA",
        "AG SERVICE SPA" => "AG SERVICES SPA",
        "AG SERVICES SPA" => "AG SERVICES SPA",
        "AG SERVICES" => "AG SERVICES SPA",
        "COSEDUCAM" => "COSEDUCAM S A",
        "AGRETOC" => "AGRETOC",
        _ => return None,
    };
    Some(canonical)
}

// ==========================================
// Destinos
// ==========================================

/// Normaliza un destino (ruta compartida: despachos y llegadas)
///
/// Trim + mayúsculas; las variantes conocidas de Baquedano colapsan a
/// un solo código.
pub fn normalize_destination(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if upper.is_empty() {
        return NO_DESTINATION.to_string();
    }
    match upper.as_str() {
        "BAQUEDANO/CLB" | "BAQUEDANO CLB" | "BAQ" => "BAQUEDANO".to_string(),
        _ => upper,
    }
}

/// Normaliza un destino en la ruta de despachos
///
/// Además de la regla compartida aplica el colapso cruzado: un destino
/// que menciona la ciudad y la planta de litio se unifica al código de
/// instalación. Solo despachos; las llegadas no usan esta regla.
pub fn normalize_dispatch_destination(raw: &str) -> String {
    let destination = normalize_destination(raw);
    if destination.contains("ANTOFAGASTA") && destination.contains("LITIO") {
        return LITHIUM_PLANT_CODE.to_string();
    }
    destination
}

// ==========================================
// Productos
// ==========================================

/// Normaliza un producto de despacho (mayúsculas + trim)
pub fn normalize_product(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if upper.is_empty() {
        return NO_PRODUCT.to_string();
    }
    upper
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cada par (variante, canónica) de la tabla de equivalencias
    const COMPANY_PAIRS: &[(&str, &str)] = &[
        ("JORQUERA TRANSPORTE S A", "JORQUERA TRANSPORTE S. A."),
        ("JORQUERA TRANSPORTE SA", "JORQUERA TRANSPORTE S. A."),
        ("MINING SERVICES AND DERIVATES", "M S & D SPA"),
        ("MINING SERVICES AND DERIVATES SPA", "M S & D SPA"),
        ("M S AND D", "M S & D SPA"),
        ("M S AND D SPA", "M S & D SPA"),
        ("MSANDD SPA", "M S & D SPA"),
        ("M S D", "M S & D SPA"),
        ("M S D SPA", "M S & D SPA"),
        ("M S & D", "M S & D SPA"),
        ("M S & D SPA", "M S & D SPA"),
        ("MS&D SPA", "M S & D SPA"),
        ("M AND Q SPA", "M&Q SPA"),
        ("M AND Q", "M&Q SPA"),
        ("M Q SPA", "M&Q SPA"),
        ("M & Q", "M&Q SPA"),
        ("MQ SPA", "M&Q SPA"),
        ("M&Q SPA", "M&Q SPA"),
        ("MANDQ SPA", "M&Q SPA"),
        ("MINING AND QUARRYING SPA", "M&Q SPA"),
        ("MINING AND QUARRYNG SPA", "M&Q SPA"),
        ("AG SERVICE SPA", "AG SERVICES SPA"),
        ("AG SERVICES SPA", "AG SERVICES SPA"),
        ("AG SERVICES", "AG SERVICES SPA"),
        ("COSEDUCAM", "COSEDUCAM S A"),
        ("AGRETOC", "AGRETOC"),
    ];

    #[test]
    fn test_company_alias_table_exhaustive() {
        for (variant, canonical) in COMPANY_PAIRS {
            assert_eq!(
                normalize_company(variant),
                *canonical,
                "variante {variant:?} debe colapsar a {canonical:?}"
            );
        }
    }

    #[test]
    fn test_company_normalization_idempotent() {
        for (_, canonical) in COMPANY_PAIRS {
            assert_eq!(
                normalize_company(canonical),
                *canonical,
                "canónica {canonical:?} debe quedar idéntica"
            );
        }
    }

    #[test]
    fn test_company_cleanup_without_alias() {
        // Sin entrada en la tabla: el texto limpio es la forma canónica
        assert_eq!(normalize_company("  transportes   del norte  "), "TRANSPORTES DEL NORTE");
        assert_eq!(normalize_company("COSEDUCAM S.A."), "COSEDUCAM S A");
    }

    #[test]
    fn test_company_empty_maps_to_sentinel() {
        assert_eq!(normalize_company(""), NO_COMPANY);
        assert_eq!(normalize_company("   "), NO_COMPANY);
        // Solo puntuación: limpia a vacío, igual conserva el centinela
        assert_eq!(normalize_company("..."), NO_COMPANY);
    }

    #[test]
    fn test_destination_variants_collapse() {
        assert_eq!(normalize_destination("BAQUEDANO/CLB"), "BAQUEDANO");
        assert_eq!(normalize_destination("baquedano clb"), "BAQUEDANO");
        assert_eq!(normalize_destination("BAQ"), "BAQUEDANO");
        assert_eq!(normalize_destination("BAQUEDANO"), "BAQUEDANO");
        assert_eq!(normalize_destination(" tocopilla "), "TOCOPILLA");
    }

    #[test]
    fn test_destination_empty_maps_to_sentinel() {
        assert_eq!(normalize_destination(""), NO_DESTINATION);
        assert_eq!(normalize_destination("  "), NO_DESTINATION);
    }

    #[test]
    fn test_dispatch_lithium_plant_override() {
        assert_eq!(
            normalize_dispatch_destination("ANTOFAGASTA P DE LITIO"),
            LITHIUM_PLANT_CODE
        );
        assert_eq!(
            normalize_dispatch_destination("antofagasta planta litio"),
            LITHIUM_PLANT_CODE
        );
        // La regla cruzada exige ambos tokens
        assert_eq!(normalize_dispatch_destination("ANTOFAGASTA"), "ANTOFAGASTA");
        // Y no aplica en la ruta compartida
        assert_eq!(
            normalize_destination("ANTOFAGASTA P DE LITIO"),
            "ANTOFAGASTA P DE LITIO"
        );
    }

    #[test]
    fn test_destination_idempotent() {
        for value in ["BAQUEDANO", "TOCOPILLA", NO_DESTINATION, LITHIUM_PLANT_CODE] {
            assert_eq!(normalize_destination(value), value);
            assert_eq!(normalize_dispatch_destination(value), value);
        }
    }

    #[test]
    fn test_product_normalization() {
        assert_eq!(normalize_product(" nitrato "), "NITRATO");
        assert_eq!(normalize_product(""), NO_PRODUCT);
    }
}
