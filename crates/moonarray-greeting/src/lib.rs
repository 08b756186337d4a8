//! Greeting helpers shared by the moonarray binaries.

use std::io::{self, Write};

/// Text printed by [`print_hello`].
pub const GREETING: &str = "Hello World!";

/// The greeting text, without a trailing newline.
pub fn greeting() -> &'static str {
    GREETING
}

/// Write the greeting, followed by a newline, to `out`.
pub fn write_hello<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", GREETING)
}

/// Print the greeting to stdout.
pub fn print_hello() {
    println!("{}", GREETING);
}
