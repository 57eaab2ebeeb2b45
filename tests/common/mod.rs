/// Runs `$source` to completion and asserts its captured stdout equals the
/// joined `$expected` lines (each `print` ends with its own newline).
///
/// This plays the same role as the reference crate's fixture-file-driven
/// `tests!` macro, adapted to take the Lox source inline instead of reading
/// a `.rocks` script from disk (this pack carries no such fixtures).
#[macro_export]
macro_rules! tests {
    ($name:ident is OK $source:expr => $($expected:expr),* $(,)?) => {
        #[test]
        fn $name() {
            let expected: Vec<&str> = vec![$($expected),*];
            let expected = if expected.is_empty() {
                String::new()
            } else {
                format!("{}\n", expected.join("\n"))
            };

            let mut output = Vec::new();
            let mut rocks = rocks_lang::rocks::new(&mut output);
            let outcome = rocks.run($source);
            drop(rocks);

            assert_eq!(outcome, rocks_lang::RunOutcome::Ok, "expected program to run cleanly");
            assert_eq!(String::from_utf8(output).unwrap(), expected);
        }
    };

    ($name:ident is ERR $source:expr => $contains:expr) => {
        #[test]
        fn $name() {
            let mut output = Vec::new();
            let mut rocks = rocks_lang::rocks::new(&mut output);
            let outcome = rocks.run($source);
            drop(rocks);

            assert_ne!(outcome, rocks_lang::RunOutcome::Ok, "expected program to fail");
            let output = String::from_utf8(output).unwrap();
            assert!(
                output.contains($contains),
                "expected output {output:?} to contain {:?}", $contains,
            );
        }
    };
}
