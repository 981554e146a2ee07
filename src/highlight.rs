use inksac::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// Colors the command word and `-`-prefixed arguments, keeping the
    /// line's original spacing so the rendered text stays aligned with
    /// the edit buffer.
    pub fn highlight_command(&self, line: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return line.to_string();
        }

        let command_style = Style::builder().foreground(Color::Cyan).bold().build();
        let flag_style = Style::builder().foreground(Color::Yellow).build();

        let mut out = String::with_capacity(line.len());
        let mut remaining = line;
        let mut word_index = 0;

        while !remaining.is_empty() {
            let ws_len = remaining.len() - remaining.trim_start().len();
            out.push_str(&remaining[..ws_len]);
            remaining = &remaining[ws_len..];
            if remaining.is_empty() {
                break;
            }

            let end = remaining
                .find(char::is_whitespace)
                .unwrap_or(remaining.len());
            let word = &remaining[..end];

            if word_index == 0 {
                out.push_str(&word.style(command_style).to_string());
            } else if word.starts_with('-') {
                out.push_str(&word.style(flag_style).to_string());
            } else {
                out.push_str(word);
            }

            remaining = &remaining[end..];
            word_index += 1;
        }

        out
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        hint.style(hint_style).to_string()
    }
}
