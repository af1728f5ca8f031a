use std::io::Cursor;

use exprir::repl::{ReplOptions, run_prompt};

fn run(input: &str) -> (String, String, usize) {
  let mut out = Vec::new();
  let mut err = Vec::new();
  let options = ReplOptions {
    prompt: "> ".to_string(),
    debug: false,
  };
  let failures = run_prompt(Cursor::new(input), &mut out, &mut err, &options).unwrap();
  (
    String::from_utf8(out).unwrap(),
    String::from_utf8(err).unwrap(),
    failures,
  )
}

#[test]
fn translates_each_line_and_survives_errors() {
  let (out, err, failures) = run("1 + 2\n1 $ 2\n(a\nq\n");
  assert_eq!(failures, 2);
  assert_eq!(
    out,
    "> %x1 = 1.000000\n%x2 = 2.000000\n%addtmp3 = add %x1 %x2\n%result = %addtmp3\n\
     > > > %x1 = %q\n%result = %x1\n> \n"
  );
  let diagnostics: Vec<&str> = err.lines().collect();
  assert_eq!(diagnostics.len(), 2);
  assert_eq!(diagnostics[0], "lex error at position 2: character '$'");
  assert!(diagnostics[1].starts_with("parse error: "));
}

#[test]
fn blank_lines_and_crlf_are_tolerated() {
  let (out, err, failures) = run("\n   \r\n7\r\n");
  assert_eq!(failures, 0);
  assert!(err.is_empty());
  assert_eq!(out, "> > > %x1 = 7.000000\n%result = %x1\n> \n");
}

#[test]
fn empty_input_ends_immediately() {
  let (out, _, failures) = run("");
  assert_eq!(out, "> \n");
  assert_eq!(failures, 0);
}

#[test]
fn oversized_lines_fail_without_ending_the_prompt() {
  let depth = 100_000;
  let nested = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
  let huge = format!("9{}", "9".repeat(400));
  let (out, err, failures) = run(&format!("{nested}\n{huge}\nz\n"));
  assert_eq!(failures, 2);
  assert!(out.ends_with("%x1 = %z\n%result = %x1\n> \n"));
  let diagnostics: Vec<&str> = err.lines().collect();
  assert_eq!(
    diagnostics,
    vec![
      "parse error: expression nested too deeply",
      format!("parse error: number literal out of range: \"{huge}\"").as_str(),
    ]
  );
}
