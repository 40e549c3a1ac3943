use aula_core::errors::*;

#[test]
fn storage_error_converts_to_aula_error() {
    let storage_err = StorageError::Backend {
        message: "disk full".into(),
    };
    let err: AulaError = storage_err.into();
    assert!(matches!(err, AulaError::Storage(_)));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn stream_error_closed_is_definitive() {
    assert!(StreamError::Closed.is_closed());
    assert!(StreamError::ConnectFailed {
        url: "http://x".into(),
        reason: "refused".into()
    }
    .is_closed());
    assert!(!StreamError::Transient {
        reason: "chunk timeout".into()
    }
    .is_closed());
}

#[test]
fn reconnect_exhausted_carries_attempts() {
    let err: AulaError = StreamError::ReconnectExhausted { attempts: 3 }.into();
    assert!(err.to_string().contains('3'));
}

#[test]
fn api_error_status_carries_code_and_body() {
    let err = ApiError::Status {
        status: 404,
        body: "not found".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("404"));
    assert!(msg.contains("not found"));
}

#[test]
fn validation_error_lists_fields() {
    let mut err = ValidationError::new();
    err.push("rut", "RUT inválido");
    err.push("email", "Correo inválido");
    err.push("rut", "Campo requerido");

    assert_eq!(err.messages("rut").len(), 2);
    assert!(err.messages("nombre").is_empty());
    let msg = err.to_string();
    assert!(msg.starts_with("2 invalid field(s)"));
    assert!(msg.contains("email"));
    assert!(msg.contains("rut"));
}

#[test]
fn validation_error_merge_combines_messages() {
    let mut a = ValidationError::new();
    a.push("nombre", "Campo requerido");
    let mut b = ValidationError::new();
    b.push("nombre", "Muy corto");
    b.push("curso", "Campo requerido");
    a.merge(b);
    assert_eq!(a.messages("nombre").len(), 2);
    assert_eq!(a.field_names(), vec!["curso".to_string(), "nombre".to_string()]);
}

#[test]
fn serde_error_converts() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: AulaError = parse_err.into();
    assert!(matches!(err, AulaError::Serialization(_)));
}
