use std::io;
use std::{env, process};

use rocks_lang::rocks;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut stdout = io::stdout();
    let mut rocks = rocks::new(&mut stdout);

    match args.len() {
        n if n > 2 => {
            println!("Usage: bin/run [script]");
            process::exit(64);
        },
        2 => rocks.run_file(&args[1]),
        _ => rocks.run_prompt(),
    };
}
