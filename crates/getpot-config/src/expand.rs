//! Environment-variable expansion for user-supplied paths
//!
//! Override paths may reference environment variables (`$HOME/bin/helper`,
//! `${TOOLS}/helper`) and a leading `~`. Unset variables expand to the empty
//! string, matching shell behavior; the literal text is never kept.

/// Expand `$VAR`, `${VAR}` and a leading `~` in `input`.
pub fn expand_vars(input: &str) -> String {
    let tilde_expanded = expand_tilde(input);
    let mut out = String::with_capacity(tilde_expanded.len());
    let mut chars = tilde_expanded.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some(&(_, '{')) => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if closed {
                    out.push_str(&std::env::var(&name).unwrap_or_default());
                } else {
                    // Unterminated ${ is kept verbatim
                    out.push_str("${");
                    out.push_str(&name);
                }
            }
            Some(&(_, c)) if c == '_' || c.is_ascii_alphabetic() => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c == '_' || c.is_ascii_alphanumeric() {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push_str(&std::env::var(&name).unwrap_or_default());
            }
            _ => out.push('$'),
        }
    }

    out
}

fn expand_tilde(input: &str) -> String {
    if input == "~" {
        if let Some(home) = dirs::home_dir() {
            return home.to_string_lossy().into_owned();
        }
    } else if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest).to_string_lossy().into_owned();
        }
    }
    input.to_string()
}
