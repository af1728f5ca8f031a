use std::io;
use std::process;

use clap::Parser;
use exprir::repl::{self, ReplOptions};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
  /// Translate this expression and exit instead of starting the prompt.
  expr: Option<String>,
  /// Dump tokens and the AST to stderr.
  #[arg(short, long)]
  debug: bool,
  #[arg(short, long, default_value = ">>> ")]
  prompt: String,
}

fn main() {
  let args = Args::parse();
  let options = ReplOptions {
    prompt: args.prompt,
    debug: args.debug,
  };

  let stdout = io::stdout();
  let stderr = io::stderr();

  // The prompt keeps going past bad lines; a one-shot translation reports
  // failure through the exit status.
  let result = match args.expr.as_deref() {
    Some(expr) => repl::run_line(expr, stdout.lock(), stderr.lock(), options.debug)
      .map(|translated| usize::from(!translated)),
    None => repl::run_prompt(io::stdin().lock(), stdout.lock(), stderr.lock(), &options)
      .map(|_| 0),
  };

  match result {
    Ok(0) => {}
    Ok(_) => process::exit(1),
    Err(err) => {
      eprintln!("i/o error: {err}");
      process::exit(1);
    }
  }
}
