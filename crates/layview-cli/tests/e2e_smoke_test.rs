use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use layview_cli::{Args, run};

/// Collects all .lay files from a directory
fn collect_lay_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("lay")
            })
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

/// Fixtures live at the workspace root, not in the crate
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("fixtures")
}

fn args_for(input: &Path, output: PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        fonts_dir: Some(fixtures_path().join("fonts").to_string_lossy().to_string()),
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_fixtures = collect_lay_files(fixtures_path());
    assert!(
        !valid_fixtures.is_empty(),
        "No valid fixtures found in fixtures/"
    );

    let mut failed_fixtures = Vec::new();

    for fixture_path in &valid_fixtures {
        let output_path = temp_dir.path().join(format!(
            "{}.png",
            fixture_path.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args_for(fixture_path, output_path.clone())) {
            Ok(()) => assert!(output_path.is_file(), "No PNG written for {fixture_path:?}"),
            Err(e) => failed_fixtures.push((fixture_path.clone(), e)),
        }
    }

    if !failed_fixtures.is_empty() {
        eprintln!("\nValid fixtures that failed:");
        for (path, err) in &failed_fixtures {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!(
            "{} valid fixture(s) failed unexpectedly",
            failed_fixtures.len()
        );
    }

    println!("All {} valid fixtures passed", valid_fixtures.len());
}

#[test]
fn e2e_smoke_test_error_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_fixtures = collect_lay_files(fixtures_path().join("errors"));
    assert!(
        !error_fixtures.is_empty(),
        "No error fixtures found in fixtures/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for fixture_path in &error_fixtures {
        let output_path = temp_dir.path().join(format!(
            "error_{}.png",
            fixture_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(fixture_path, output_path.clone())).is_ok() {
            unexpectedly_succeeded.push(fixture_path.clone());
        }
        assert!(
            !output_path.exists(),
            "Failed render left output behind for {fixture_path:?}"
        );
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError fixtures that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error fixture(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "All {} error fixtures failed as expected",
        error_fixtures.len()
    );
}

#[test]
fn e2e_output_directory_is_created() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let fixture = fixtures_path().join("single_box.lay");
    let output_path = temp_dir.path().join("nested").join("dir").join("box.png");

    run(&args_for(&fixture, output_path.clone())).expect("Failed to render");

    let image = fs::read(&output_path).expect("Failed to read output");
    assert!(image.starts_with(b"\x89PNG"));
}

#[test]
fn e2e_text_fixture_writes_png() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let fixture = fixtures_path().join("writes_text.lay");
    let output_path = temp_dir.path().join("text.png");

    run(&args_for(&fixture, output_path.clone())).expect("Failed to render text");

    let image = fs::read(&output_path).expect("Failed to read output");
    assert!(image.starts_with(b"\x89PNG"));
}

#[test]
fn e2e_missing_input_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("missing.lay");

    assert!(run(&args_for(&missing, temp_dir.path().join("out.png"))).is_err());
}
