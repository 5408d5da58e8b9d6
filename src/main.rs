use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use kscript::interpreter::script::core::ScriptModule;

/// kScript is a tiny interpreted scripting language with numbers, strings
/// and block-structured control flow.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a script file; the interactive prompt starts when omitted.
    script: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    match args.script {
        Some(path) => run_file(&path),
        None => run_prompt(),
    }
}

/// Batch mode: compile the whole file, then execute it. Errors are
/// reported on stdout and the process still exits cleanly.
fn run_file(path: &Path) {
    let source = fs::read_to_string(path).unwrap_or_else(|_| {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  path.display());
        process::exit(1);
    });

    let mut module = ScriptModule::new();
    match module.compile(&source) {
        Ok(()) => {
            if let Err(e) = module.execute() {
                println!("{e}");
            }
        },
        Err(e) => println!("{e}"),
    }
}

/// Interactive mode: evaluate each input line against one persistent
/// module, so variable bindings survive between lines.
fn run_prompt() {
    let mut module = ScriptModule::interactive();
    let stdin = io::stdin();

    loop {
        print!(">> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {},
        }

        match module.eval_line(&line) {
            Ok(Some(value)) => println!("Result >> {value}"),
            Ok(None) => {},
            Err(e) => println!("Syntax error: {e}"),
        }
    }
}
