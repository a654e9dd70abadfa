use std::io::{self, Write};

/// Writes `message` to stdout and, when given, to `writer` as well.
pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        tracing::warn!(error = %e, "failed to write to stdout");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}

/// Writes every line of `lines` through [`println`].
pub fn print_lines(lines: &[String], writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    for line in lines {
        println(line, writer)?;
    }
    Ok(())
}
