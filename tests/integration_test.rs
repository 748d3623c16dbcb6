use image::{ColorType, GrayImage, Luma};
use std::path::Path;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_handwriting-ocr"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run handwriting-ocr")
}

fn write_sample(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    GrayImage::from_fn(64, 32, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            Luma([40])
        } else {
            Luma([210])
        }
    })
    .save(&path)
    .expect("Failed to write sample image");
    path.to_string_lossy().into_owned()
}

#[test]
fn test_help_lists_flags() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--enhance-only"));
    assert!(stdout.contains("--languages"));
    assert!(stdout.contains("--no-visualize"));
}

#[test]
fn test_version() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_image_argument_is_required() {
    let output = run_cli(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_enhance_only_writes_preprocessed_sibling() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path(), "111.png");

    let output = run_cli(&[input.as_str(), "--enhance-only"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let expected = dir.path().join("preprocessed_111.png");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), expected.to_string_lossy());

    let saved = image::open(&expected).expect("preprocessed image should exist");
    assert_eq!(saved.color(), ColorType::Rgb8);
    assert_eq!((saved.width(), saved.height()), (64, 32));

    // Input is never overwritten
    let original = image::open(&input).unwrap();
    assert_eq!(original.color(), ColorType::L8);
}

#[test]
fn test_enhance_only_with_custom_factors() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path(), "note.png");

    let output = run_cli(&[
        input.as_str(),
        "--enhance-only",
        "--contrast",
        "1.0",
        "--sharpness",
        "1.0",
    ]);
    assert!(output.status.success());

    // Neutral factors leave the pixels as they were
    let saved = image::open(dir.path().join("preprocessed_note.png"))
        .unwrap()
        .to_luma8();
    assert_eq!(saved, image::open(&input).unwrap().to_luma8());
}

#[test]
fn test_enhance_only_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.jpg");

    let output = run_cli(&[missing.to_str().unwrap(), "--enhance-only"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to load image"),
        "unexpected stderr: {}",
        stderr
    );
    assert!(!dir.path().join("preprocessed_missing.jpg").exists());
}
