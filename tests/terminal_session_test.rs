use fortune_client::{HttpFortuneApi, TerminalHost, TomlConfig};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_terminal_session_with_config_file() {
    let server = MockServer::start();
    let get_mock = server.mock(|when, then| {
        when.method(GET).path("/v2/fortune.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"fortune": {"text": "A journey of a thousand miles"}}));
    });

    let mut config_file = NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"
[api]
base_url = "{}"
fetch_path = "/v2/fortune.json"
submit_path = "/v2/fortune"
"#,
        server.base_url()
    )
    .unwrap();

    let config = TomlConfig::from_file(config_file.path()).unwrap();
    let api = HttpFortuneApi::new(&config).unwrap();

    let input = tokio::io::BufReader::new(&b"draft text\n"[..]);
    let mut output = Vec::new();
    TerminalHost::new(api).run(input, &mut output).await.unwrap();

    get_mock.assert();
    let screen = String::from_utf8(output).unwrap();
    assert!(screen.contains("# Your Fortune: A journey of a thousand miles"));
    assert!(screen.contains("New Fortune: [draft text]"));
}

#[tokio::test]
async fn test_terminal_session_survives_backend_failure() {
    let server = MockServer::start();
    let get_mock = server.mock(|when, then| {
        when.method(GET).path("/api/fortune.json");
        then.status(503);
    });

    let config =
        TomlConfig::from_toml_str(&format!("[api]\nbase_url = \"{}\"\n", server.base_url())).unwrap();
    let api = HttpFortuneApi::new(&config).unwrap();

    let input = tokio::io::BufReader::new(&b""[..]);
    let mut output = Vec::new();
    let result = TerminalHost::new(api).run(input, &mut output).await;

    assert!(result.is_ok());
    get_mock.assert();
    let screen = String::from_utf8(output).unwrap();
    assert!(screen.starts_with("# Your Fortune: \n"));
}
