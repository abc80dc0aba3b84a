//! XML rendering of an enrollment submission.
//!
//! The element names are the contract with `static/matricula.xsl`; changing
//! one here means changing the stylesheet too.

use std::fmt::Write;

use super::common::escape_xml;
use crate::enrollment::models::Submission;

/// Root element of the document.
pub const ROOT_ELEMENT: &str = "matricula";
/// Container for the selected modules.
pub const MODULES_ELEMENT: &str = "moduls";
/// One selected module.
pub const MODULE_ELEMENT: &str = "modul";

/// Render a submission as the `<matricula>` XML document.
///
/// Every value is escaped, so the result is well-formed whatever the student
/// typed. Modules keep their submitted order and are not deduplicated.
pub fn render_matricula_xml(submission: &Submission) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<{ROOT_ELEMENT}>\n"));

    for (element, value) in submission.scalar_fields() {
        push_element(&mut xml, 1, element, value);
    }

    if submission.moduls.is_empty() {
        xml.push_str(&format!("  <{MODULES_ELEMENT}/>\n"));
    } else {
        xml.push_str(&format!("  <{MODULES_ELEMENT}>\n"));
        for modul in &submission.moduls {
            push_element(&mut xml, 2, MODULE_ELEMENT, modul);
        }
        xml.push_str(&format!("  </{MODULES_ELEMENT}>\n"));
    }

    xml.push_str(&format!("</{ROOT_ELEMENT}>\n"));
    xml
}

fn push_element(xml: &mut String, depth: usize, name: &str, value: &str) {
    // Writing to a String never fails.
    let _ = writeln!(
        xml,
        "{indent}<{name}>{value}</{name}>",
        indent = "  ".repeat(depth),
        value = escape_xml(value),
    );
}
