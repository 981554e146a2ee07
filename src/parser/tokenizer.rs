use super::ParseError;

/// Splits a raw input line into shell words.
///
/// Single- and double-quoted regions are taken literally, a backslash
/// outside quotes escapes the following character, and unquoted
/// whitespace separates words. Quoting state left open at the end of the
/// line is an error.
pub fn tokenize(input: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // A quoted empty string is still a word, so track token presence
    // separately from the buffer content.
    let mut pending = false;
    let mut in_single = false;
    let mut in_double = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' if !in_double => {
                in_single = !in_single;
                pending = true;
            }
            '"' if !in_single => {
                in_double = !in_double;
                pending = true;
            }
            '\\' if !in_single && !in_double => {
                match chars.next() {
                    Some(next) => current.push(next),
                    // Nothing left to escape, keep the backslash itself
                    None => current.push('\\'),
                }
                pending = true;
            }
            c if c.is_whitespace() && !in_single && !in_double => {
                if pending {
                    tokens.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }

    if in_single || in_double {
        return Err(ParseError::UnterminatedQuote);
    }

    if pending {
        tokens.push(current);
    }

    Ok(tokens)
}
