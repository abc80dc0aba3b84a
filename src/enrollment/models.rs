use serde::Deserialize;
use utoipa::ToSchema;

/// A scalar form value. Browsers send strings, but hand-written JSON
/// clients sometimes send `"curs": 1` or a phone number as a number.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl FieldValue {
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
            Self::Bool(flag) => flag.to_string(),
        }
    }
}

/// Selected modules as they arrive: a list, or one comma-joined string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ModulsField {
    List(Vec<String>),
    Joined(String),
}

impl ModulsField {
    /// Turn the wire value into an ordered list of module names.
    ///
    /// A joined string is split on commas, every item trimmed and empty items
    /// dropped. A list is returned as is.
    pub fn normalize(self) -> Vec<String> {
        match self {
            Self::List(modules) => modules,
            Self::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Enrollment form payload, exactly as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MatriculaRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Anna")]
    pub nom: Option<FieldValue>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Puig")]
    pub cognoms: Option<FieldValue>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "a@x.com")]
    pub email: Option<FieldValue>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "C/ Major 1")]
    pub adreca: Option<FieldValue>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "600111222")]
    pub telefon: Option<FieldValue>,
    /// Program code, e.g. `DAM` or `DAW`.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "DAM")]
    pub cicle: Option<FieldValue>,
    /// Program year, `1` or `2`.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "1")]
    pub curs: Option<FieldValue>,
    /// Selected modules: an array of names, or one comma-separated string.
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>, example = json!(["Programació", "Bases de Dades"]))]
    pub moduls: Option<ModulsField>,
}

impl MatriculaRequest {
    /// Build a request from `application/x-www-form-urlencoded` pairs.
    ///
    /// A repeated `moduls` key yields a list; a single one is treated as a
    /// comma-joined string. For other keys the last value wins.
    pub fn from_form_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut request = Self::default();
        let mut moduls: Vec<String> = Vec::new();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "nom" => &mut request.nom,
                "cognoms" => &mut request.cognoms,
                "email" => &mut request.email,
                "adreca" => &mut request.adreca,
                "telefon" => &mut request.telefon,
                "cicle" => &mut request.cicle,
                "curs" => &mut request.curs,
                "moduls" | "moduls[]" => {
                    moduls.push(value);
                    continue;
                }
                _ => continue,
            };
            *slot = Some(FieldValue::Text(value));
        }

        request.moduls = match moduls.len() {
            0 => None,
            1 => moduls.pop().map(ModulsField::Joined),
            _ => Some(ModulsField::List(moduls)),
        };

        request
    }
}

/// Canonical enrollment submission, one per request and never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    pub nom: String,
    pub cognoms: String,
    pub email: String,
    pub adreca: String,
    pub telefon: String,
    pub cicle: String,
    pub curs: String,
    pub moduls: Vec<String>,
}

impl Submission {
    /// Scalar fields as `(element name, value)` in document order.
    pub fn scalar_fields(&self) -> [(&'static str, &str); 7] {
        [
            ("nom", self.nom.as_str()),
            ("cognoms", self.cognoms.as_str()),
            ("email", self.email.as_str()),
            ("adreca", self.adreca.as_str()),
            ("telefon", self.telefon.as_str()),
            ("cicle", self.cicle.as_str()),
            ("curs", self.curs.as_str()),
        ]
    }
}

impl From<MatriculaRequest> for Submission {
    fn from(request: MatriculaRequest) -> Self {
        fn text(value: Option<FieldValue>) -> String {
            value.map(FieldValue::into_text).unwrap_or_default()
        }

        Self {
            nom: text(request.nom),
            cognoms: text(request.cognoms),
            email: text(request.email),
            adreca: text(request.adreca),
            telefon: text(request.telefon),
            cicle: text(request.cicle),
            curs: text(request.curs),
            moduls: request
                .moduls
                .map(ModulsField::normalize)
                .unwrap_or_default(),
        }
    }
}
