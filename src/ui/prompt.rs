//! Yes/no confirmation on stdin

use std::io::{self, Write};

/// Ask `question [y/N]`. Anything but `y` is a no.
pub fn confirm(question: &str) -> io::Result<bool> {
	print!("\n{} [y/N]: ", question);
	io::stdout().flush()?;

	let mut input = String::new();
	io::stdin().read_line(&mut input)?;

	Ok(input.trim().eq_ignore_ascii_case("y"))
}
