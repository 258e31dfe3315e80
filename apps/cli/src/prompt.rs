use std::io::{self, BufRead, IsTerminal, Write};

/// Asks a yes/no question. Anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    confirm_with(&mut stdin.lock(), &mut io::stderr(), question)
}

/// Reads one trimmed line after showing `label`.
pub fn read_line(label: &str) -> io::Result<String> {
    let stdin = io::stdin();
    read_line_with(&mut stdin.lock(), &mut io::stderr(), label)
}

/// Reads a password. On a terminal the input is not echoed. The value is
/// kept exactly as typed apart from the line ending.
pub fn read_password(label: &str) -> io::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return rpassword::prompt_password(label);
    }
    read_raw_line_with(&mut stdin.lock(), &mut io::stderr(), label)
}

fn confirm_with<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool> {
    let answer = read_line_with(input, output, &format!("{} [y/N] ", question))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn read_line_with<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    Ok(read_raw_line_with(input, output, label)?.trim().to_string())
}

fn read_raw_line_with<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    write!(output, "{}", label)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let kept = line.strip_suffix('\n').unwrap_or(&line);
    let kept = kept.strip_suffix('\r').unwrap_or(kept);
    Ok(kept.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_confirm_accepts_only_yes() {
        for (typed, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("\n", false), ("", false)] {
            let mut out = Vec::new();
            let answer = confirm_with(&mut Cursor::new(typed), &mut out, "Delete?").unwrap();
            assert_eq!(answer, expected, "input {:?}", typed);
            assert_eq!(String::from_utf8(out).unwrap(), "Delete? [y/N] ");
        }
    }

    #[test]
    fn test_read_line_trims() {
        let mut out = Vec::new();
        let code = read_line_with(&mut Cursor::new("  0000  \n"), &mut out, "Code: ").unwrap();
        assert_eq!(code, "0000");
    }

    #[test]
    fn test_password_keeps_surrounding_spaces() {
        let mut out = Vec::new();
        let secret = read_raw_line_with(&mut Cursor::new(" pa ss \r\n"), &mut out, "Password: ").unwrap();
        assert_eq!(secret, " pa ss ");
        assert_eq!(String::from_utf8(out).unwrap(), "Password: ");
    }
}
