use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tfblocks::composer::{BlockKind, FilterOptions, compose, select_located};
use tfblocks::matcher::parse_patterns;
use tfblocks::{FormatError, Registry, parse_state};

const STATE: &str = r#"{
    "format_version": "1.0",
    "terraform_version": "1.9.5",
    "values": {
        "root_module": {
            "resources": [
                {
                    "address": "aws_s3_bucket.this",
                    "mode": "managed",
                    "type": "aws_s3_bucket",
                    "name": "this",
                    "provider_name": "registry.terraform.io/hashicorp/aws",
                    "values": {"bucket": "x"}
                },
                {
                    "address": "aws_iam_role.unsupported_type_stub",
                    "mode": "managed",
                    "type": "aws_iam_role",
                    "name": "unsupported_type_stub",
                    "provider_name": "registry.terraform.io/hashicorp/aws",
                    "values": {"name": "stub"}
                }
            ]
        }
    }
}"#;

const MODULE_STATE: &str = r#"{
    "format_version": "1.0",
    "values": {
        "root_module": {
            "resources": [
                {
                    "address": "aws_s3_bucket.logs[0]",
                    "mode": "managed",
                    "type": "aws_s3_bucket",
                    "name": "logs",
                    "index": 0,
                    "values": {"bucket": "logs-0"}
                },
                {
                    "address": "aws_s3_bucket.logs[1]",
                    "mode": "managed",
                    "type": "aws_s3_bucket",
                    "name": "logs",
                    "index": 1,
                    "values": {"bucket": "logs-1"}
                }
            ],
            "child_modules": [
                {
                    "address": "module.queue",
                    "resources": [
                        {
                            "address": "module.queue.aws_sqs_queue.jobs",
                            "mode": "managed",
                            "type": "aws_sqs_queue",
                            "name": "jobs",
                            "values": {"url": "https://sqs.eu-west-1.amazonaws.com/1/jobs"}
                        }
                    ]
                }
            ]
        }
    }
}"#;

fn tfblocks(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tfblocks"))
        .args(args)
        .env("RUST_LOG", "warn")
        .env_remove("NO_COLOR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start tfblocks");

    // Usage errors exit before stdin is read.
    let _ = child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes());

    child.wait_with_output().expect("failed to wait for tfblocks")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_import_scenario_through_library() {
    let resources = parse_state(STATE).unwrap();
    let composition = compose(
        Registry::builtin().unwrap(),
        &resources,
        &[],
        BlockKind::Import,
        &[],
        FilterOptions::default(),
    );

    assert_eq!(composition.blocks.len(), 1);
    assert_eq!(composition.blocks[0].address, "aws_s3_bucket.this");
    assert_eq!(composition.blocks[0].identifier.as_deref(), Some("x"));

    assert_eq!(composition.skipped.len(), 1);
    assert_eq!(
        composition.skipped[0].error,
        FormatError::Unsupported("aws_iam_role".to_string())
    );
}

#[test]
fn test_list_scenario_through_library() {
    let resources = parse_state(STATE).unwrap();
    let patterns = parse_patterns(&["aws_s3_bucket.*"]).unwrap();
    let located = select_located(&resources, &patterns, &[], FilterOptions::default());

    let addresses: Vec<&str> = located.iter().map(|l| l.resource.address.as_str()).collect();
    assert_eq!(addresses, vec!["aws_s3_bucket.this"]);
}

#[test]
fn test_binary_import_warns_about_unsupported_resource() {
    let output = tfblocks(&["--no-color", "import"], STATE);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "import {\n  to = aws_s3_bucket.this\n  id = \"x\"\n}\n"
    );
    let diagnostics = stderr(&output);
    assert!(diagnostics.contains("aws_iam_role.unsupported_type_stub"));
    assert!(diagnostics.contains("WARN"));
}

#[test]
fn test_binary_import_is_colored_by_default() {
    let output = tfblocks(&["import", "aws_s3_bucket.this"], STATE);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("\u{1b}["));
    assert!(text.contains("to = aws_s3_bucket.this"));
}

#[test]
fn test_binary_list_mode() {
    let output = tfblocks(&["list", "aws_s3_bucket.*"], STATE);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "aws_s3_bucket.this\n");
}

#[test]
fn test_binary_remove_collapses_instances() {
    let output = tfblocks(&["--no-color", "remove", "--destroy"], MODULE_STATE);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "removed {\n  from = aws_s3_bucket.logs\n  lifecycle {\n    destroy = true\n  }\n}\n\n\
         removed {\n  from = module.queue.aws_sqs_queue.jobs\n  lifecycle {\n    destroy = true\n  }\n}\n"
    );
}

#[test]
fn test_binary_move_blocks() {
    let output = tfblocks(&["--no-color", "move", "module.queue"], MODULE_STATE);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "moved {\n  from = module.queue.aws_sqs_queue.jobs\n  to   = module.queue.aws_sqs_queue.jobs # TODO\n}\n"
    );
}

#[test]
fn test_binary_groups_by_declaring_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = dir.path().join("storage.tf");
    let queues = dir.path().join("queues.tf");
    std::fs::write(&storage, "resource \"aws_s3_bucket\" \"logs\" {\n  count = 2\n}\n").unwrap();
    std::fs::write(&queues, "module \"queue\" {\n  source = \"./modules/queue\"\n}\n").unwrap();

    let dir_arg = dir.path().to_str().unwrap();
    let output = tfblocks(&["--no-color", "import", "--files", dir_arg], MODULE_STATE);

    assert!(output.status.success());
    let text = stdout(&output);
    let header = |path: &Path| format!("# Source file: {}", path.display());

    let storage_at = text.find(&header(&storage)).unwrap();
    let queues_at = text.find(&header(&queues)).unwrap();
    assert!(storage_at < text.find("aws_s3_bucket.logs[1]").unwrap());
    assert!(storage_at < queues_at);
    assert!(queues_at < text.find("module.queue.aws_sqs_queue.jobs").unwrap());
    assert_eq!(text.matches(&"#".repeat(80)).count(), 4);
}

const GLOB_STATE: &str = r#"{
    "format_version": "1.0",
    "values": {
        "root_module": {
            "resources": [
                {
                    "address": "aws_s3_bucket.this",
                    "mode": "managed",
                    "type": "aws_s3_bucket",
                    "name": "this",
                    "values": {"bucket": "this"}
                },
                {
                    "address": "aws_sqs_queue.q",
                    "mode": "managed",
                    "type": "aws_sqs_queue",
                    "name": "q",
                    "values": {"url": "https://sqs.eu-west-1.amazonaws.com/1/q"}
                }
            ],
            "child_modules": [
                {
                    "address": "module.m",
                    "resources": [
                        {
                            "address": "module.m.aws_s3_bucket.this",
                            "mode": "managed",
                            "type": "aws_s3_bucket",
                            "name": "this",
                            "values": {"bucket": "nested"}
                        }
                    ]
                }
            ]
        }
    }
}"#;

#[test]
fn test_binary_files_accepts_quoted_glob() {
    let dir = tempfile::tempdir().unwrap();
    let declared = "resource \"aws_s3_bucket\" \"this\" {}\n";
    std::fs::write(dir.path().join("s3.tf"), declared).unwrap();
    std::fs::write(dir.path().join("notes.md"), "resource \"aws_sqs_queue\" \"q\" {}\n").unwrap();

    let glob = dir.path().join("*.tf");
    let output = tfblocks(&["list", "--files", glob.to_str().unwrap()], GLOB_STATE);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "aws_s3_bucket.this\nmodule.m.aws_s3_bucket.this\n"
    );
}

#[test]
fn test_binary_module_call_file_owns_module_resources() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.tf");
    let b = dir.path().join("b.tf");
    std::fs::write(&a, "resource \"aws_s3_bucket\" \"this\" {}\n").unwrap();
    std::fs::write(&b, "module \"m\" {\n  source = \"./m\"\n}\n").unwrap();

    let output = tfblocks(
        &["--no-color", "import", "--files", a.to_str().unwrap(), b.to_str().unwrap()],
        GLOB_STATE,
    );

    assert!(output.status.success());
    let text = stdout(&output);
    let a_at = text.find(&format!("# Source file: {}", a.display())).unwrap();
    let b_at = text.find(&format!("# Source file: {}", b.display())).unwrap();
    let root_at = text.find("to = aws_s3_bucket.this\n").unwrap();
    let nested_at = text.find("to = module.m.aws_s3_bucket.this").unwrap();

    assert!(a_at < root_at && root_at < b_at && b_at < nested_at);
    assert!(!text.contains("aws_sqs_queue.q"));
}

#[test]
fn test_binary_rejects_unsupported_format_version() {
    let output = tfblocks(&["import"], r#"{"format_version": "0.2"}"#);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("unsupported state format version"));
}

#[test]
fn test_binary_rejects_malformed_json() {
    let output = tfblocks(&["list"], "not json");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to decode state JSON"));
}

#[test]
fn test_binary_no_match_is_success() {
    let output = tfblocks(&["import", "aws_lambda_function.*"], STATE);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("no resources matched"));
}

#[test]
fn test_binary_empty_state_without_filters_is_quiet() {
    let output = tfblocks(&["import"], r#"{"format_version": "1.0"}"#);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(!stderr(&output).contains("no resources matched"));
}

#[test]
fn test_binary_unknown_subcommand_is_usage_error() {
    let output = tfblocks(&["export"], STATE);
    assert!(!output.status.success());
}
