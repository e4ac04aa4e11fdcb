use std::process::{Command, Output};

fn ascent(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ascent"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn prints_the_result() {
    let output = ascent(&["2 + 3 * 4"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "14\n");
}

#[test]
fn prints_the_tree() {
    let output = ascent(&["--tree", "2 * 3 + 4"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "(+ (* 2 3) 4)\n10\n");
}

#[test]
fn reports_unexpected_tokens() {
    let output = ascent(&["1 +"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unexpected token: "), "{}", stderr);

    let output = ascent(&["1 2"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unexpected token: 2"), "{}", stderr);
}

#[test]
fn hyphenated_input_is_an_expression() {
    for (input, lexeme) in [("- 1", "-"), ("-1", "-1"), ("-1 + 2", "-1")] {
        let output = ascent(&[input]);
        assert_eq!(output.status.code(), Some(1), "{:?}", input);
        assert_eq!(stdout(&output), "", "{:?}", input);
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert_eq!(stderr, format!("unexpected token: {}\n", lexeme));
    }
}

#[test]
fn prints_the_tree_of_a_long_chain() {
    let input = vec!["1"; 20_000].join(" + ");
    let output = ascent(&["--tree", &input]);
    assert!(output.status.success());
    let out = stdout(&output);
    let mut lines = out.lines();
    let tree = lines.next().unwrap();
    assert!(tree.starts_with(&"(+ ".repeat(19_999)));
    assert!(tree.ends_with(" 1) 1)"));
    assert_eq!(lines.next(), Some("20000"));
    assert_eq!(lines.next(), None);
}

#[test]
fn wrong_argument_count_prints_usage() {
    for args in [&[][..], &["1", "2"][..]] {
        let output = ascent(args);
        assert!(output.status.success());
        let out = stdout(&output);
        assert!(out.starts_with("usage: "), "{}", out);
        assert!(out.ends_with(" [STRING]\n"), "{}", out);
    }
}

#[test]
fn runs_the_differential_tester() {
    let output = ascent(&["--seed", "1", "--cases", "200", "test"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "all tests passed!\n");
}
