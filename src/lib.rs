#![allow(clippy::needless_return)]

//! Rocks is a programming language written in Rust. It is a dynamically typed language with
//! lexical scoping and first-class functions. Rocks is a tree-walk interpreter with a hand-written
//! recursive descent parser. Rocks is a hobby project and is not intended for production use.
//!
//! Rocks is a dynamically typed language. This means that the type of a variable is determined at
//! runtime. This is in contrast to statically typed languages, where the type of a variable is
//! determined at compile time. Dynamically typed languages are often easier to use, but are
//! generally slower than statically typed languages.
//!
//! Rocks is a tree-walk interpreter. This means that the interpreter walks the abstract syntax tree
//! (AST) and evaluates each node. This is in contrast to a compiler, which would convert the AST
//! into bytecode or machine code. Tree-walk interpreters are generally easier to implement than
//! compilers, but are generally slower than compilers.
//!
//! Rocks is a hobby project and is not intended for production use. The goal of this project is to
//! learn more about programming languages and interpreters. This project is inspired by the
//! [Crafting Interpreters](https://craftinginterpreters.com/) book by Bob Nystrom.
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process of converting a string of
//! characters into a list of tokens. A token is a single unit of a programming language. For
//! example, the string `1 + 2` would be converted into the following tokens:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module as an iterator over the characters
//! in the source code. It is a simple state machine that returns the next token in the source code
//! when called.
//!
//! The scanner reports lexical errors as a [`ScanError`](error::ScanError). These are trivial
//! problems like an unterminated string literal or an unexpected character. Scanning continues past
//! the first error so that every lexical mistake in the source is reported in one pass.
//!
//! ## Parsing
//! The second step in the interpreter is parsing. Parsing is the process of converting a list of
//! tokens into an abstract syntax tree (AST). The parser is implemented in the [`parser`](parser)
//! module as a recursive descent parser. The parser transforms the list of tokens into expressions
//! and statements. [`Expressions`](expr::Expr) are pieces of code that produce a value, specifically
//! an [`Object`](object::Object). Objects are an umbrella term for all types of values in Rocks
//! including literals, functions, classes and instances. [`Statements`](stmt::Stmt) are pieces of
//! code that do not produce a value but instead perform some action — a side effect. For example, a
//! variable declaration or an if clause is a statement.
//!
//! The parser reports syntax errors as a [`ParseError`](error::ParseError) and, like the scanner,
//! keeps going past the first one using panic-mode synchronization: it skips ahead to the next
//! plausible statement boundary and resumes, so a single run can surface more than one mistake.
//!
//! ## Resolving
//! The third step is resolving: a static pass over the finished AST that annotates every variable
//! reference with its lexical distance and rejects a handful of statically-detectable mistakes (self
//! -referential initializers, `return` outside a function, `this`/`super` outside a class). The
//! resolver is implemented in the [`resolver`](resolver) module and reports the first problem it
//! finds as a [`ResolveError`](error::ResolveError); unlike the scanner and parser it does not keep
//! going, since a half-resolved program is not safe to interpret.
//!
//! ## Interpreting
//! The final step is interpreting: walking the AST and producing values and side effects. The
//! interpreter is implemented in [`interpreter`](interpreter) and drives the [`environment`] chain
//! that backs lexical scoping, closures, and `this`/`super` binding. Runtime failures — type
//! mismatches, undefined variables, calling something that isn't callable — are reported as a
//! [`RuntimeError`](error::RuntimeError).

use std::io::Write;
use std::path::PathBuf;
use std::{fmt, fs, process};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// How a single call to [`rocks::run`] ended. The CLI maps each variant to
/// an exit code (spec.md §6/§7); tests match on it directly instead of
/// scraping process exit status.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Ok,
    LexError,
    SyntaxError,
    CompileError,
    RuntimeError,
}

/// Top-level orchestrator: scan, parse, resolve, interpret, formatting
/// errors along the way (spec.md §4.6). Holds the one [`Interpreter`]
/// instance for the process so that the REPL can share global state across
/// lines (spec.md §9 "Global REPL state").
#[allow(non_camel_case_types)]
pub struct rocks<'o> {
    interpreter: Interpreter<'o>,
}

impl<'o> rocks<'o> {
    pub fn new(out: &'o mut dyn Write) -> Self {
        rocks { interpreter: Interpreter::new(out) }
    }

    /// Reads `path` as UTF-8 and runs it as a single program, exiting with
    /// the code the book's convention assigns each error category: 65 for
    /// anything caught before interpretation starts (lexical, syntax,
    /// static-resolution), 70 for a runtime error.
    pub fn run_file(&mut self, path: &str) {
        let contents = fs::read_to_string(path).unwrap_or_else(|error| {
            eprintln!("Could not read file \"{path}\": {error}");
            process::exit(66);
        });

        match self.run(&contents) {
            RunOutcome::Ok => {},
            RunOutcome::LexError | RunOutcome::SyntaxError | RunOutcome::CompileError => process::exit(65),
            RunOutcome::RuntimeError => process::exit(70),
        }
    }

    /// Interactive prompt: one line at a time until EOF (Ctrl-D) or Ctrl-C.
    /// A single interpreter persists across lines, so `var`/`fun`/`class`
    /// declarations from one line are visible on the next.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("line editor to initialize");
        let history_path = history_path();
        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.run(&line);
                },
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("Readline error: {error}");
                    break;
                },
            }
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }
    }

    /// Runs one program through the full pipeline, writing any `print`
    /// output and any error report to the sink this `rocks` was built with
    /// (spec.md §6). Returns which stage (if any) failed.
    pub fn run(&mut self, source: &str) -> RunOutcome {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();

        if !scanner.errors.is_empty() {
            self.report("There were lexical errors:", &scanner.errors);
            return RunOutcome::LexError;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();

        if !parser.errors.is_empty() {
            self.report("There were syntax errors:", &parser.errors);
            return RunOutcome::SyntaxError;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        if let Err(error) = resolver.resolve(&statements) {
            self.interpreter.write_line(&error.to_string());
            return RunOutcome::CompileError;
        }

        match self.interpreter.interpret(&statements) {
            Ok(()) => RunOutcome::Ok,
            Err(error) => {
                self.interpreter.write_line(&error.to_string());
                RunOutcome::RuntimeError
            },
        }
    }

    /// Prints a category header followed by every collected error, each
    /// indented by two spaces (spec.md §6).
    fn report(&mut self, header: &str, errors: &[impl fmt::Display]) {
        self.interpreter.write_line(header);
        for error in errors {
            self.interpreter.write_line(&format!("  {error}"));
        }
    }
}

fn history_path() -> Option<PathBuf> {
    home::home_dir().map(|mut home| {
        home.push(".rocks_history");
        home
    })
}
