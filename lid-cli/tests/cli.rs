use std::fs;

use assert_cmd::Command;

const TRAINING: &str = "alpha aaaaaaaaaa\nbeta bbbbbbbbbb\n";

#[test]
fn test_writes_labelled_lines() {
	let dir = tempfile::tempdir().unwrap();
	let train = dir.path().join("train.txt");
	let test = dir.path().join("test.txt");
	let output = dir.path().join("out.txt");
	fs::write(&train, TRAINING).unwrap();
	fs::write(&test, "aaaaaaaaaa\nbbbbbbbbbb\n0123456789\nab\n").unwrap();
	fs::write(&output, "previous run\n".repeat(10)).unwrap();

	Command::cargo_bin("lid")
		.unwrap()
		.arg("-b")
		.arg(&train)
		.arg("-t")
		.arg(&test)
		.arg("-o")
		.arg(&output)
		.args(["--labels", "alpha,beta"])
		.assert()
		.success();

	assert_eq!(
		fs::read_to_string(&output).unwrap(),
		"alpha aaaaaaaaaa\nbeta bbbbbbbbbb\nother 0123456789\nother ab\n"
	);
}

#[test]
fn test_missing_arguments() {
	let assert = Command::cargo_bin("lid").unwrap().args(["-b", "train.txt"]).assert().failure();
	let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
	assert!(stderr.contains("Usage"), "{stderr}");
}

#[test]
fn test_missing_training_file() {
	let dir = tempfile::tempdir().unwrap();
	let test = dir.path().join("test.txt");
	let output = dir.path().join("out.txt");
	fs::write(&test, "aaaaaaaaaa\n").unwrap();

	let assert = Command::cargo_bin("lid")
		.unwrap()
		.arg("-b")
		.arg(dir.path().join("missing.txt"))
		.arg("-t")
		.arg(&test)
		.arg("-o")
		.arg(&output)
		.assert()
		.failure()
		.code(2);

	let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
	assert!(stderr.contains("missing.txt"), "{stderr}");
	assert!(stderr.contains("Usage"), "{stderr}");
	assert!(!output.exists());
}

#[test]
fn test_strict_labels() {
	let dir = tempfile::tempdir().unwrap();
	let train = dir.path().join("train.txt");
	let test = dir.path().join("test.txt");
	fs::write(&train, "alpha aaaaaaaaaa\ngamma cccccccccc\n").unwrap();
	fs::write(&test, "aaaaaaaaaa\n").unwrap();

	Command::cargo_bin("lid")
		.unwrap()
		.arg("-b")
		.arg(&train)
		.arg("-t")
		.arg(&test)
		.arg("-o")
		.arg(dir.path().join("out.txt"))
		.args(["--labels", "alpha,beta", "--strict-labels"])
		.assert()
		.failure();
}

#[test]
fn test_rejects_bad_threshold() {
	let dir = tempfile::tempdir().unwrap();
	let train = dir.path().join("train.txt");
	fs::write(&train, TRAINING).unwrap();

	Command::cargo_bin("lid")
		.unwrap()
		.arg("-b")
		.arg(&train)
		.arg("-t")
		.arg(&train)
		.arg("-o")
		.arg(dir.path().join("out.txt"))
		.args(["--labels", "alpha,beta", "--threshold", "1.5"])
		.assert()
		.failure();
}
