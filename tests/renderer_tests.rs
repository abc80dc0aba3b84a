mod common;

use matricula_server::document::xml::render_matricula_xml;
use matricula_server::enrollment::models::Submission;

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn test_one_element_per_scalar_field() {
    let xml = render_matricula_xml(&common::anna());

    for field in ["nom", "cognoms", "email", "adreca", "telefon", "cicle", "curs"] {
        assert_eq!(count(&xml, &format!("<{field}>")), 1, "opening <{field}>");
        assert_eq!(count(&xml, &format!("</{field}>")), 1, "closing </{field}>");
    }
    assert_eq!(count(&xml, "<matricula>"), 1);
    assert_eq!(count(&xml, "</matricula>"), 1);
}

#[test]
fn test_anna_document() {
    let xml = render_matricula_xml(&common::anna());

    assert!(xml.contains("<nom>Anna</nom>"));
    assert!(xml.contains("<email>a@x.com</email>"));
    assert!(xml.contains("<cicle>DAM</cicle>"));

    let first = xml.find("<modul>Programació</modul>").unwrap();
    let second = xml.find("<modul>Bases de Dades</modul>").unwrap();
    assert!(first < second);
    assert_eq!(count(&xml, "<modul>"), 2);
}

#[test]
fn test_module_count_and_order_preserved_with_duplicates() {
    let submission = Submission {
        moduls: vec![
            "C".to_string(),
            "A".to_string(),
            "C".to_string(),
            "B".to_string(),
        ],
        ..common::anna()
    };
    let xml = render_matricula_xml(&submission);

    let rendered: Vec<&str> = xml
        .lines()
        .filter_map(|line| {
            line.trim()
                .strip_prefix("<modul>")
                .and_then(|rest| rest.strip_suffix("</modul>"))
        })
        .collect();
    assert_eq!(rendered, vec!["C", "A", "C", "B"]);
}

#[test]
fn test_reserved_characters_are_escaped_everywhere() {
    let submission = Submission {
        nom: "<script>alert('x')</script>".to_string(),
        cognoms: "Puig & Vila".to_string(),
        email: "\"a\"@x.com".to_string(),
        adreca: "C/ Major > 1".to_string(),
        telefon: "600<111>222".to_string(),
        cicle: "DAM&DAW".to_string(),
        curs: "1</curs><curs>2".to_string(),
        moduls: vec!["</moduls>".to_string(), "R&D".to_string()],
    };
    let xml = render_matricula_xml(&submission);

    assert!(xml.contains("<nom>&lt;script&gt;alert(&apos;x&apos;)&lt;/script&gt;</nom>"));
    assert!(xml.contains("<cognoms>Puig &amp; Vila</cognoms>"));
    assert!(xml.contains("<email>&quot;a&quot;@x.com</email>"));
    assert!(xml.contains("<curs>1&lt;/curs&gt;&lt;curs&gt;2</curs>"));
    assert!(xml.contains("<modul>&lt;/moduls&gt;</modul>"));
    assert!(xml.contains("<modul>R&amp;D</modul>"));

    // Injected markup must not add elements.
    assert_eq!(count(&xml, "<curs>"), 1);
    assert_eq!(count(&xml, "</moduls>"), 1);
    assert_eq!(count(&xml, "<script>"), 0);

    // Every remaining '&' starts an entity.
    for (i, _) in xml.match_indices('&') {
        let rest = &xml[i..];
        assert!(
            ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"]
                .iter()
                .any(|entity| rest.starts_with(entity)),
            "bare ampersand at {i}"
        );
    }
}

#[test]
fn test_empty_submission_is_still_complete() {
    let xml = render_matricula_xml(&Submission::default());
    assert!(xml.contains("<nom></nom>"));
    assert!(xml.contains("<curs></curs>"));
    assert!(xml.contains("<moduls/>"));
}
