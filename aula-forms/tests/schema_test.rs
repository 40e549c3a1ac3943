use serde_json::{json, Map, Value};

use aula_forms::rut;
use aula_forms::{FieldRule, FormSchema};

fn values(v: Value) -> Map<String, Value> {
    v.as_object().cloned().unwrap_or_default()
}

#[test]
fn rut_examples() {
    assert!(rut::validate("12.345.678-5"));
    assert!(!rut::validate("12.345.678-9"));
    assert!(rut::validate("10.000.013-k"));
    assert!(!rut::validate("0-0"));
    assert!(!rut::validate(""));
    assert_eq!(rut::format("123456785").as_deref(), Some("12.345.678-5"));
    assert_eq!(rut::format("7654321-6").as_deref(), Some("7.654.321-6"));
    assert_eq!(rut::format("12.345.678-9"), None);
}

#[test]
fn rut_with_non_ascii_tail_is_invalid() {
    assert!(!rut::validate("12345678ñ"));
    assert!(!rut::validate("1234-é"));
    assert!(FieldRule::Rut.check("12345678Ñ").is_some());
    assert!(FieldRule::Rut.check("1234-é").is_some());
}

#[test]
fn student_schema() {
    let schema = FormSchema::new()
        .field("nombre", [FieldRule::Required, FieldRule::MinLength(2), FieldRule::MaxLength(40)])
        .field("rut", [FieldRule::Required, FieldRule::Rut])
        .field("correo", [FieldRule::Email])
        .field(
            "curso",
            FieldRule::pattern(r"^\d[A-Z]$", "Formato de curso inválido (ej. 4B)"),
        );

    let ok = values(json!({
        "nombre": "Javiera",
        "rut": "12.345.678-5",
        "correo": "apoderado@colegio.cl",
        "curso": "4B",
    }));
    assert!(schema.validate(&ok).is_ok());

    let bad = values(json!({
        "nombre": "J",
        "rut": "12.345.678-9",
        "correo": "sin-arroba",
        "curso": "cuarto",
    }));
    let err = schema.validate(&bad).unwrap_err();
    assert_eq!(err.field_names(), vec!["correo", "curso", "nombre", "rut"]);
    assert_eq!(err.messages("rut"), ["RUT inválido".to_string()]);
    assert_eq!(err.messages("nombre"), ["Debe tener al menos 2 caracteres".to_string()]);
    assert_eq!(err.messages("curso"), ["Formato de curso inválido (ej. 4B)".to_string()]);
}

#[test]
fn empty_optional_fields_pass_and_required_fail() {
    let schema = FormSchema::new()
        .field("correo", [FieldRule::Email])
        .field("rut", [FieldRule::Required, FieldRule::Rut]);

    let err = schema.validate(&values(json!({ "correo": "  " }))).unwrap_err();
    assert_eq!(err.field_names(), vec!["rut"]);
    assert_eq!(err.messages("rut"), ["Este campo es obligatorio".to_string()]);
}

#[test]
fn length_counts_characters_not_bytes() {
    let rule = FieldRule::MaxLength(5);
    assert_eq!(rule.check("ñandú"), None);
    assert!(rule.check("ñandúes").is_some());
}

#[test]
fn invalid_pattern_is_rejected_at_build_time() {
    assert!(FieldRule::pattern("(", "nunca").is_none());
}
