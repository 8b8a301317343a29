use crate::rendering::Embed;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

/// 24-bit foreground colour for an embed's accent colour.
fn accent(color: u32) -> String {
    let (r, g, b) = ((color >> 16) & 0xFF, (color >> 8) & 0xFF, color & 0xFF);
    format!("\x1b[38;2;{r};{g};{b}m")
}

/// Renders an embed as a terminal block. Lines end in `\r\n` like the rest of the console output.
pub fn render_embed(embed: &Embed) -> String {
    let bar = format!("{}┃{RESET} ", accent(embed.color));
    let mut lines: Vec<String> = Vec::new();

    if let Some(author) = &embed.author {
        lines.push(format!("{BOLD}{}{RESET}", author.name));
    }
    if let Some(thumb) = &embed.thumbnail {
        lines.push(format!("{DIM}{thumb}{RESET}"));
    }
    if let Some(description) = &embed.description {
        lines.extend(description.lines().map(str::to_string));
    }
    for field in &embed.fields {
        lines.push(String::new());
        lines.push(format!("{BOLD}{}{RESET}", field.name));
        lines.extend(field.value.lines().map(str::to_string));
    }
    if let Some(footer) = &embed.footer {
        lines.push(String::new());
        lines.push(format!("{DIM}{footer}{RESET}"));
    }

    lines.iter().map(|l| format!("{bar}{l}\r\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_line_carries_the_accent_bar() {
        let mut e = Embed::new(0xFF0000).title("Error").description("No item was specified");
        e.add_field("Links", "a\nb");

        let out = render_embed(&e);
        assert!(out.starts_with("\x1b[38;2;255;0;0m┃"));
        assert_eq!(out.matches("\r\n").count(), 6);
        assert!(out.contains("No item was specified"));
    }
}
