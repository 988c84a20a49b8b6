use assert_cmd::prelude::*;
use image::{GenericImageView, ImageBuffer, Pixel, Rgb, RgbImage};
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_sample(dir: &Path, width: u32, height: u32) -> std::path::PathBuf {
    let sample: RgbImage = ImageBuffer::from_fn(width, height, |x, y| {
        let v = ((x * 29 + y * 13 + x * y) % 256) as u8;
        *Rgb::from_slice(&[v, 255 - v, v / 2])
    });
    let path = dir.join("sample.png");
    sample.save(&path).unwrap();
    path
}

fn seamcarve() -> Command {
    Command::cargo_bin("seamcarve").unwrap()
}

#[test]
fn carves_columns_and_rows() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(dir.path(), 12, 9);
    let output = dir.path().join("carved.png");

    seamcarve()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(&["-c", "3", "-r", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Image saved to"));

    let carved = image::open(&output).unwrap();
    assert_eq!(carved.dimensions(), (9, 7));
}

#[test]
fn writes_the_energy_map_when_asked() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(dir.path(), 8, 8);
    let output = dir.path().join("carved.png");
    let energy = dir.path().join("energy.png");

    seamcarve()
        .arg("--in")
        .arg(&input)
        .arg("--out")
        .arg(&output)
        .args(&["--remove-n-cols", "1"])
        .arg("--energy-map")
        .arg(&energy)
        .assert()
        .success();

    assert_eq!(image::open(&output).unwrap().dimensions(), (7, 8));
    assert_eq!(image::open(&energy).unwrap().dimensions(), (8, 8));
}

#[test]
fn nothing_requested_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(dir.path(), 5, 5);
    let output = dir.path().join("carved.png");

    seamcarve()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert!(!output.exists());
}

#[test]
fn too_many_columns_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(dir.path(), 4, 4);
    let output = dir.path().join("carved.png");

    seamcarve()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(&["-c", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot remove 4 seam(s)"));

    assert!(!output.exists());
}

#[test]
fn negative_counts_are_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(dir.path(), 4, 4);
    let output = dir.path().join("carved.png");

    seamcarve()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--remove-n-rows=-1")
        .assert()
        .failure();

    assert!(!output.exists());
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    seamcarve()
        .arg("-i")
        .arg(dir.path().join("nope.png"))
        .arg("-o")
        .arg(dir.path().join("out.png"))
        .args(&["-c", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("seamcarve: "));
}

#[test]
fn unwritable_energy_map_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(dir.path(), 6, 6);
    let output = dir.path().join("carved.png");
    let energy = dir.path().join("energy.nosuchext");

    seamcarve()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(&["-c", "1"])
        .arg("-e")
        .arg(&energy)
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("seamcarve: "));

    assert!(!output.exists());
    assert!(!energy.exists());
}

#[test]
fn unwritable_output_takes_the_energy_map_with_it() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(dir.path(), 6, 6);
    let output = dir.path().join("carved.nosuchext");
    let energy = dir.path().join("energy.png");

    seamcarve()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(&["-c", "1"])
        .arg("-e")
        .arg(&energy)
        .assert()
        .failure();

    assert!(!output.exists());
    assert!(!energy.exists());
}
