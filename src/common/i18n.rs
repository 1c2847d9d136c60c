// src/common/i18n.rs

use std::collections::HashMap;

const FALLBACK_LANG: &str = "en";

// (chave, en, es, pt)
const MESSAGES: &[(&str, &str, &str, &str)] = &[
    (
        "error.no_tenant",
        "The X-Tenant-ID header is required.",
        "El encabezado X-Tenant-ID es obligatorio.",
        "O cabeçalho X-Tenant-ID é obrigatório.",
    ),
    (
        "error.invalid_tenant_header",
        "The X-Tenant-ID header is not a valid UUID.",
        "El encabezado X-Tenant-ID no es un UUID válido.",
        "Cabeçalho X-Tenant-ID inválido (não é um UUID).",
    ),
    (
        "error.validation",
        "One or more fields are invalid.",
        "Uno o más campos son inválidos.",
        "Um ou mais campos são inválidos.",
    ),
    (
        "error.store_not_found",
        "Store not found.",
        "Sucursal no encontrada.",
        "Loja não encontrada.",
    ),
    (
        "error.internal",
        "An unexpected error occurred.",
        "Ocurrió un error inesperado.",
        "Ocorreu um erro inesperado.",
    ),
];

/// Catálogo de mensagens por idioma, montado uma vez no startup.
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>> = HashMap::new();
        for &(key, en, es, pt) in MESSAGES {
            catalogs.entry("en").or_default().insert(key, en);
            catalogs.entry("es").or_default().insert(key, es);
            catalogs.entry("pt").or_default().insert(key, pt);
        }
        Self { catalogs }
    }

    /// Traduz `key` para `lang`; cai para inglês e, em último caso, devolve a própria chave.
    pub fn translate<'a>(&'a self, lang: &str, key: &'a str) -> &'a str {
        self.catalogs
            .get(lang)
            .and_then(|catalog| catalog.get(key))
            .or_else(|| self.catalogs.get(FALLBACK_LANG).and_then(|c| c.get(key)))
            .copied()
            .unwrap_or(key)
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_languages() {
        let store = I18nStore::new();
        assert_eq!(store.translate("pt", "error.store_not_found"), "Loja não encontrada.");
        assert_eq!(store.translate("es", "error.store_not_found"), "Sucursal no encontrada.");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let store = I18nStore::new();
        assert_eq!(store.translate("de", "error.internal"), "An unexpected error occurred.");
    }

    #[test]
    fn unknown_key_is_returned_as_is() {
        let store = I18nStore::new();
        assert_eq!(store.translate("en", "error.nope"), "error.nope");
    }
}
