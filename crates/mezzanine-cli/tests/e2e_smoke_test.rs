use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use mezzanine::{MezzanineError, export::ExportFormat, validate::IssueCode};
use mezzanine_cli::{Args, Command, QuoteArgs, error_adapter::to_reportables, run};

fn demos_dir() -> PathBuf {
    // Demos are at workspace root, relative to workspace not the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(command: Command, config: Option<&Path>) -> Args {
    Args {
        command,
        config: config.map(|path| path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
    }
}

fn quote_args(input: &Path) -> QuoteArgs {
    QuoteArgs {
        input: input.to_string_lossy().to_string(),
        name: "Kari Nordmann".to_string(),
        email: "kari@example.no".to_string(),
        telephone: "12345678".to_string(),
        company: "Lager AS".to_string(),
        postal_code: "0150".to_string(),
        message: String::new(),
        include_installation: true,
        attachments: Vec::new(),
    }
}

fn write_quote_config(dir: &Path, success_rate: f64) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(
        &path,
        format!("[quote]\ndelay_ms = 0\nsuccess_rate = {success_rate:?}\n"),
    )
    .unwrap();
    path
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_json_files(demos_dir());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let input = demo_path.to_string_lossy().to_string();
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();

        let mut commands = vec![
            Command::Price {
                input: input.clone(),
                json: false,
            },
            Command::Price {
                input: input.clone(),
                json: true,
            },
            Command::Layout {
                input: input.clone(),
            },
        ];
        for format in ExportFormat::ALL {
            let output = temp_dir
                .path()
                .join(format!("{stem}.{}", format.extension()));
            commands.push(Command::Export {
                input: input.clone(),
                format,
                output: Some(output.to_string_lossy().to_string()),
            });
        }

        for command in commands {
            if let Err(e) = run(&args(command, None)) {
                failed_demos.push((demo_path.clone(), e));
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo run(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let error_demos = collect_json_files(demos_dir().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let command = Command::Price {
            input: demo_path.to_string_lossy().to_string(),
            json: false,
        };

        match run(&args(command, None)) {
            Ok(()) => unexpectedly_succeeded.push(demo_path.clone()),
            Err(err) => {
                let source = fs::read_to_string(demo_path).ok();
                assert!(!to_reportables(&err, source.as_deref()).is_empty());
            }
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!("✅ All {} error demos failed as expected", error_demos.len());
}

#[test]
fn test_out_of_range_demo_reports_every_issue() {
    let input = demos_dir().join("errors").join("out-of-range.json");
    let command = Command::Layout {
        input: input.to_string_lossy().to_string(),
    };

    let err = run(&args(command, None)).unwrap_err();
    let codes: Vec<IssueCode> = err
        .validation_issues()
        .expect("Expected validation error")
        .issues()
        .iter()
        .map(|issue| issue.code())
        .collect();
    assert_eq!(codes, vec![IssueCode::V001, IssueCode::V002, IssueCode::V003]);
    assert_eq!(to_reportables(&err, None).len(), 3);
}

#[test]
fn test_export_writes_requested_format() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("report.csv");
    let command = Command::Export {
        input: demos_dir().join("basic.json").to_string_lossy().to_string(),
        format: ExportFormat::Csv,
        output: Some(output.to_string_lossy().to_string()),
    };

    run(&args(command, None)).unwrap();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("Mezzanine Configuration Export"));
    assert!(csv.contains("Total price,168000.00"));
}

#[test]
fn test_svg_export_contains_plan() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("plan.svg");
    let command = Command::Export {
        input: demos_dir().join("warehouse.json").to_string_lossy().to_string(),
        format: ExportFormat::Svg,
        output: Some(output.to_string_lossy().to_string()),
    };

    run(&args(command, None)).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<svg"));
    assert_eq!(svg.matches("data-accessory-id").count(), 6);
}

#[test]
fn test_explicit_config_is_applied() {
    let temp_dir = tempdir().unwrap();
    let config = temp_dir.path().join("strict.toml");
    fs::write(&config, "[limits.length_mm]\nmin = 6000\nmax = 20000\n").unwrap();

    let command = Command::Price {
        input: demos_dir().join("basic.json").to_string_lossy().to_string(),
        json: true,
    };
    let err = run(&args(command, Some(&config))).unwrap_err();
    assert!(err.validation_issues().is_some());
}

#[test]
fn test_missing_config_file_fails() {
    let temp_dir = tempdir().unwrap();
    let command = Command::Price {
        input: demos_dir().join("basic.json").to_string_lossy().to_string(),
        json: false,
    };

    let err = run(&args(command, Some(&temp_dir.path().join("absent.toml")))).unwrap_err();
    assert!(matches!(err, MezzanineError::Config(_)));
}

#[test]
fn test_quote_submission() {
    let temp_dir = tempdir().unwrap();
    let config = write_quote_config(temp_dir.path(), 1.0);
    let drawing = temp_dir.path().join("site.png");
    fs::write(&drawing, [0u8; 16]).unwrap();

    let mut quote = quote_args(&demos_dir().join("warehouse.json"));
    quote.attachments = vec![drawing.to_string_lossy().to_string()];

    run(&args(Command::Quote(quote), Some(&config))).unwrap();
}

#[test]
fn test_rejected_quote_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let config = write_quote_config(temp_dir.path(), 0.0);
    let quote = quote_args(&demos_dir().join("basic.json"));

    let err = run(&args(Command::Quote(quote), Some(&config))).unwrap_err();
    assert!(matches!(err, MezzanineError::Quote(_)));
}

#[test]
fn test_quote_with_invalid_email_is_rejected() {
    let temp_dir = tempdir().unwrap();
    let config = write_quote_config(temp_dir.path(), 1.0);
    let mut quote = quote_args(&demos_dir().join("basic.json"));
    quote.email = "not-an-email".to_string();

    let err = run(&args(Command::Quote(quote), Some(&config))).unwrap_err();
    let issues = err.validation_issues().expect("Expected validation error");
    assert_eq!(issues.issues()[0].code(), IssueCode::V101);
}

#[test]
fn test_quote_with_missing_attachment_fails() {
    let temp_dir = tempdir().unwrap();
    let config = write_quote_config(temp_dir.path(), 1.0);
    let mut quote = quote_args(&demos_dir().join("basic.json"));
    quote.attachments = vec![temp_dir.path().join("missing.pdf").to_string_lossy().to_string()];

    let err = run(&args(Command::Quote(quote), Some(&config))).unwrap_err();
    assert!(matches!(err, MezzanineError::Io(_)));
}
