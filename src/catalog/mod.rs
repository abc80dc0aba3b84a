//! Module catalog - which course modules belong to each program ("cicle") and year ("curs").
//!
//! This is the single definition used by the submission validator and served
//! to the form page at `/api/cataleg`.

pub mod handlers;


use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::BTreeMap;

const FIRST_YEAR_COMMON: &[&str] = &[
    "Programació",
    "Bases de Dades",
    "Sistemes Informàtics",
    "Entorns de Desenvolupament",
    "Llenguatges de Marques i Sistemes de Gestió de la Informació",
    "Projecte Intermodular I",
    "Anglès Professional I",
    "Itinerari Personal per a l'Ocupabilitat I",
];

const DAM_SECOND_YEAR: &[&str] = &[
    "Accés a Dades",
    "Desenvolupament d'Interfícies",
    "Programació Multimèdia i Dispositius mòbils",
    "Programació de Serveis i Processos",
    "Sistemes de Gestió Empresarial",
    "Projecte Intermodular II",
    "Itinerari Personal per a l'Ocupabilitat II",
];

const DAW_SECOND_YEAR: &[&str] = &[
    "Desenvolupament Web en entorn client",
    "Desenvolupament web en entorn servidor",
    "Desplegament d'aplicacions web",
    "Disseny d'interfícies web",
    "Projecte Intermodular II",
    "Itinerari Personal per a l'Ocupabilitat II",
];

lazy_static! {
    /// The institution's catalog.
    pub static ref CATALOG: ModuleCatalog = ModuleCatalog::builder()
        .year("DAM", "1", FIRST_YEAR_COMMON)
        .year("DAM", "2", DAM_SECOND_YEAR)
        .year("DAW", "1", FIRST_YEAR_COMMON)
        .year("DAW", "2", DAW_SECOND_YEAR)
        .build();
}

/// Read-only mapping `(program, year) -> ordered module names`.
///
/// Serializes as `{"DAM": {"1": [...], "2": [...]}, ...}`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ModuleCatalog {
    programs: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl ModuleCatalog {
    pub fn builder() -> ModuleCatalogBuilder {
        ModuleCatalogBuilder::default()
    }

    /// Program codes, sorted.
    pub fn programs(&self) -> Vec<&str> {
        self.programs.keys().map(String::as_str).collect()
    }

    /// Years offered by a program, sorted. `None` if the program is unknown.
    pub fn years(&self, program: &str) -> Option<Vec<&str>> {
        self.programs
            .get(program.trim())
            .map(|years| years.keys().map(String::as_str).collect())
    }

    /// Modules of one program year, in catalog order.
    pub fn modules(&self, program: &str, year: &str) -> Option<&[String]> {
        self.programs
            .get(program.trim())
            .and_then(|years| years.get(year.trim()))
            .map(Vec::as_slice)
    }

    pub fn contains(&self, program: &str, year: &str, module: &str) -> bool {
        self.modules(program, year)
            .map(|modules| modules.iter().any(|m| m == module.trim()))
            .unwrap_or(false)
    }
}

#[derive(Debug, Default)]
pub struct ModuleCatalogBuilder {
    programs: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl ModuleCatalogBuilder {
    /// Add (or replace) the module list of one program year.
    pub fn year(mut self, program: &str, year: &str, modules: &[&str]) -> Self {
        self.programs.entry(program.to_string()).or_default().insert(
            year.to_string(),
            modules.iter().map(|m| m.to_string()).collect(),
        );
        self
    }

    pub fn build(self) -> ModuleCatalog {
        ModuleCatalog {
            programs: self.programs,
        }
    }
}
