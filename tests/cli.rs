use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const WORDS: &str = "the\nquick\nbrown\nfox\njumps\nover\nlazy\ndog\n";

fn workspace(posts: &[(&str, &str)], words: &str) -> TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("posts")).unwrap();
    for (name, body) in posts {
        fs::write(dir.path().join("posts").join(name), body).unwrap();
    }
    fs::write(dir.path().join("words.txt"), words).unwrap();
    dir
}

fn proofread(dir: &Path) -> Command {
    proofread_with(dir, "words.txt")
}

fn proofread_with(dir: &Path, dictionary: &str) -> Command {
    let mut cmd = Command::cargo_bin("proofread").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("RUST_LOG")
        .args(["--posts", "posts", "--dictionary", dictionary, "--no-color"]);
    cmd
}

#[test]
fn test_dry_run_reports_corrections() {
    let dir = workspace(&[("1.md", "The quikc brown fox\n")], WORDS);

    proofread(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1:5 quikc => quick"))
        .stdout(predicate::str::contains("1 word flagged in 1 post"));

    let body = fs::read_to_string(dir.path().join("posts/1.md")).unwrap();
    assert_eq!(body, "The quikc brown fox\n");
}

#[test]
fn test_no_fail_exits_cleanly() {
    let dir = workspace(&[("1.md", "The quikc brown fox\n")], WORDS);

    proofread(dir.path()).arg("--no-fail").assert().success();
}

#[test]
fn test_clean_posts_pass() {
    let dir = workspace(
        &[("1.md", "# The fox\n\nThe quick brown fox jumps over the lazy dog.\n")],
        WORDS,
    );

    proofread(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No spelling errors found"));
}

#[test]
fn test_write_applies_corrections() {
    let dir = workspace(
        &[
            ("1.md", "The quikc brown fox\njumsp over the `lazzy` dog\n"),
            ("2.md", "The lazy dog\n"),
        ],
        WORDS,
    );

    proofread(dir.path())
        .arg("--write")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 corrections written to 1 post"));

    let first = fs::read_to_string(dir.path().join("posts/1.md")).unwrap();
    assert_eq!(first, "The quick brown fox\njumps over the `lazzy` dog\n");
    let second = fs::read_to_string(dir.path().join("posts/2.md")).unwrap();
    assert_eq!(second, "The lazy dog\n");
}

#[test]
fn test_unresolved_words_are_marked() {
    let dir = workspace(&[("1.md", "Zorp\n")], "");

    proofread(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1:1 Zorp => ???"));
}

#[test]
fn test_json_output() {
    let dir = workspace(&[("7.md", "# Brown fox\n\nThe quikc fox\n")], WORDS);

    let output = proofread(dir.path())
        .args(["--format", "json", "--no-fail"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["posts_checked"], 1);
    assert_eq!(json["total_flagged"], 1);
    let correction = &json["corrections"][0];
    assert_eq!(correction["post_id"], 7);
    assert_eq!(correction["title"], "Brown fox");
    assert_eq!(correction["row"], 3);
    assert_eq!(correction["column"], 5);
    assert_eq!(correction["suggestion"], "quick");
}

#[test]
fn test_missing_dictionary_is_fatal() {
    let dir = workspace(&[("1.md", "The quikc brown fox\n")], WORDS);

    proofread_with(dir.path(), "missing.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.txt"));

    let body = fs::read_to_string(dir.path().join("posts/1.md")).unwrap();
    assert_eq!(body, "The quikc brown fox\n");
}

#[test]
fn test_local_config_is_used() {
    let dir = workspace(&[("1.md", "The quikc brown fox\n")], WORDS);
    fs::write(
        dir.path().join(".proofread.toml"),
        "posts_dir = \"posts\"\ndictionary = \"words.txt\"\n",
    )
    .unwrap();

    Command::cargo_bin("proofread")
        .unwrap()
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .args(["--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("quikc => quick"));
}

#[test]
fn test_separate_corpus_and_min_frequency() {
    let dir = workspace(&[("1.md", "The zorblat fox\n")], WORDS);
    fs::create_dir(dir.path().join("corpus")).unwrap();
    for name in ["a.md", "b.md", "c.md"] {
        fs::write(dir.path().join("corpus").join(name), "A zorblat here.\n").unwrap();
    }

    proofread(dir.path())
        .args(["--corpus", "corpus", "--min-frequency", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No spelling errors found"));

    proofread(dir.path())
        .args(["--corpus", "corpus", "--min-frequency", "4"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1:5 zorblat =>"));

    // Without --corpus only the posts are mined, where the word appears once.
    proofread(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1:5 zorblat =>"));
}

#[test]
fn test_global_config_is_layered_under_local() {
    let dir = workspace(&[("1.md", "The quikc brown fox\n")], WORDS);
    let global_dir = dir.path().join("config").join("proofread");
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(
        global_dir.join("config.toml"),
        "posts_dir = \"posts\"\ndictionary = \"missing.txt\"\nmin_frequency = 1\n",
    )
    .unwrap();
    fs::write(dir.path().join(".proofread.toml"), "dictionary = \"words.txt\"\n").unwrap();

    let run = || {
        let mut cmd = Command::cargo_bin("proofread").unwrap();
        cmd.current_dir(dir.path())
            .env("XDG_CONFIG_HOME", dir.path().join("config"))
            .env_remove("RUST_LOG")
            .arg("--no-color");
        cmd
    };

    // Global posts_dir and min_frequency, local dictionary.
    run()
        .assert()
        .success()
        .stdout(predicate::str::contains("No spelling errors found"));

    // A local value equal to the default still overrides the global one.
    fs::write(
        dir.path().join(".proofread.toml"),
        "dictionary = \"words.txt\"\nmin_frequency = 3\n",
    )
    .unwrap();
    run()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1:5 quikc => quick"));
}
