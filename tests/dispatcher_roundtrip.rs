use serde_json::{json, Map, Value};
use simple_mcp_server::engine::Dispatcher;
use simple_mcp_server::engine_core::models::{InvocationRequest, ParamKind};

/// Minimal well-formed value for a parameter.
fn sample(name: &str, kind: ParamKind, allowed: Option<&[&str]>) -> Value {
    match (kind, allowed) {
        // sqrt is the only operation without a second operand
        (ParamKind::String, Some(values)) if values.contains(&"sqrt") => json!("sqrt"),
        (ParamKind::String, Some(values)) => json!(values[0]),
        (ParamKind::String, None) if name == "timezone" => json!("UTC"),
        (ParamKind::String, None) => json!("sample"),
        (ParamKind::Number, _) => json!(4),
    }
}

fn required_args(operation: &str) -> Map<String, Value> {
    let descriptor = Dispatcher::list_operations()
        .into_iter()
        .find(|d| d.name == operation)
        .unwrap();
    descriptor
        .parameters
        .iter()
        .filter(|p| p.required)
        .map(|p| (p.name.to_string(), sample(p.name, p.kind, p.allowed_values)))
        .collect()
}

#[test]
fn test_every_operation_invocable_with_required_params() {
    for descriptor in Dispatcher::list_operations() {
        let args = required_args(descriptor.name);
        let res = Dispatcher::invoke(&InvocationRequest::new(descriptor.name, args));
        assert!(!res.is_error, "{} failed: {}", descriptor.name, res.text);
        assert!(!res.text.is_empty());
    }
}

#[test]
fn test_omitting_a_required_param_fails_predictably() {
    for descriptor in Dispatcher::list_operations() {
        for param in descriptor.parameters.iter().filter(|p| p.required) {
            let mut args = required_args(descriptor.name);
            args.remove(param.name);
            let res = Dispatcher::invoke(&InvocationRequest::new(descriptor.name, args));
            assert!(res.is_error);
            let expected = if param.unchecked {
                // Resolved by the operation itself, which names the missing value
                format!("Unknown {}: undefined", param.name)
            } else {
                format!("Parameter \"{}\" must be a {}", param.name, param.kind)
            };
            assert_eq!(res.text, expected);
        }
    }
}

#[test]
fn test_fully_specified_calls_are_idempotent() {
    let calls = [
        ("hello", json!({"name": "Lin"})),
        ("calculator", json!({"operation": "multiply", "a": 6, "b": 7})),
        ("calculator", json!({"operation": "divide", "a": 1, "b": 0})),
        ("nope", json!({})),
    ];
    for (name, args) in calls {
        let first = Dispatcher::invoke(&InvocationRequest::from_value(name, args.clone()));
        let second = Dispatcher::invoke(&InvocationRequest::from_value(name, args));
        assert_eq!(first, second);
    }
}

#[test]
fn test_time_formats() {
    let res = Dispatcher::invoke(&InvocationRequest::from_value("time", json!({"format": "unix"})));
    assert!(!res.is_error);
    let digits = res.text.strip_prefix("Current time: ").unwrap();
    assert!(!digits.is_empty());
    assert!(digits.chars().all(|c| c.is_ascii_digit()));

    let res = Dispatcher::invoke(&InvocationRequest::from_value("time", json!({"format": "iso"})));
    assert!(res.text.ends_with('Z'));

    let res = Dispatcher::invoke(&InvocationRequest::from_value(
        "time",
        json!({"format": "locale", "timezone": "europe/paris"}),
    ));
    assert!(!res.is_error, "{}", res.text);
}
