use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("simple-mcp-server").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("LOG_LEVEL")
        .env_remove("LOG_FORMAT")
        .env_remove("SIMPLE_MCP_PROTOCOL_VERSION");
    cmd
}

fn line(value: Value) -> String {
    format!("{}\n", serde_json::to_string(&value).unwrap())
}

fn responses(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn test_binary_help() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--list-tools"))
        .stdout(predicate::str::contains("--invoke"));
}

#[test]
fn test_list_tools() {
    let output = bin().arg("--list-tools").assert().success().get_output().clone();
    let catalog: Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = catalog["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["hello", "time", "calculator"]);
}

#[test]
fn test_invoke_success() {
    bin()
        .args(["--invoke", "calculator", "--args", r#"{"operation":"add","a":2,"b":3}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Result: 2 + 3 = 5"));

    bin()
        .args(["--invoke", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, World!"));
}

#[test]
fn test_invoke_error_exit_code() {
    bin()
        .args(["--invoke", "calculator", "--args", r#"{"operation":"divide","a":1,"b":0}"#])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Cannot divide by zero"))
        .stdout(predicate::str::contains("\"isError\":true"));

    bin()
        .args(["--invoke", "weather"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Unknown tool: weather"));
}

#[test]
fn test_invalid_log_format_is_rejected() {
    bin()
        .env("LOG_FORMAT", "yaml")
        .arg("--list-tools")
        .assert()
        .failure()
        .stderr(predicate::str::contains("yaml"));
}

#[test]
fn test_stdio_session() {
    let mut input = String::new();
    input.push_str(&line(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2025-03-26",
            "capabilities": {},
            "clientInfo": {"name": "test-runner", "version": "1.0"}
        }
    })));
    input.push_str(&line(json!({"jsonrpc": "2.0", "method": "notifications/initialized"})));
    input.push_str(&line(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})));
    input.push_str(&line(json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "tools/call",
        "params": {"name": "calculator", "arguments": {"operation": "sqrt", "a": 16}}
    })));

    let output = bin().write_stdin(input).assert().success().get_output().clone();
    let resps = responses(&output.stdout);
    assert_eq!(resps.len(), 3);

    assert_eq!(resps[0]["id"], 1);
    assert_eq!(resps[0]["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(resps[1]["id"], 2);
    assert_eq!(resps[1]["result"]["tools"].as_array().unwrap().len(), 3);
    assert_eq!(resps[2]["id"], 3);
    assert_eq!(resps[2]["result"]["content"][0]["text"], "Result: √16 = 4");
}

#[test]
fn test_garbage_input() {
    let output = bin()
        .write_stdin("this is not json\n")
        .assert()
        .success()
        .get_output()
        .clone();
    let resps = responses(&output.stdout);
    assert_eq!(resps.len(), 1);
    assert_eq!(resps[0]["error"]["code"], -32700);
    assert_eq!(resps[0]["id"], Value::Null);
}

#[test]
fn test_content_length_framing() {
    let body = serde_json::to_string(&json!({"jsonrpc": "2.0", "id": 7, "method": "ping"})).unwrap();
    let msg = format!("Content-Length: {}\r\n\r\n{}", body.len(), body);

    bin()
        .write_stdin(msg)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Content-Length: "))
        .stdout(predicate::str::contains(r#""id":7"#));
}
