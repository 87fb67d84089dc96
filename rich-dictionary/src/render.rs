use std::io::{self, Write};
use std::mem;

use console::{measure_text_width, pad_str, strip_ansi_codes, truncate_str, Alignment, Style, Term};
use dictionary::{LookupOutcome, PartOfSpeechGroup};

const DEFAULT_WIDTH: usize = 80;
const MIN_WIDTH: usize = 24;

/// Writes lookup outcomes to a terminal as bordered panels.
pub struct Presenter {
    width: usize,
    colors: bool,
}

/// One logical line of panel content. The prefix is printed once and the text
/// wraps underneath it.
struct Line {
    prefix: String,
    prefix_style: Style,
    text: String,
    text_style: Style,
}

struct Panel {
    title: String,
    title_style: Style,
    border_style: Style,
    padding: (usize, usize),
    lines: Vec<Line>,
}

impl Presenter {
    pub fn new(colors: bool) -> Self {
        let width = Term::stdout()
            .size_checked()
            .map(|(_, columns)| usize::from(columns))
            .unwrap_or(DEFAULT_WIDTH);
        Self::with_width(width, colors)
    }

    pub fn with_width(width: usize, colors: bool) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            colors,
        }
    }

    fn style(&self) -> Style {
        Style::new().force_styling(self.colors)
    }

    pub fn render<W: Write>(
        &self,
        outcome: &LookupOutcome,
        word: &str,
        out: &mut W,
    ) -> io::Result<()> {
        match outcome {
            LookupOutcome::Found(record) => {
                self.write_panel(out, &self.title_panel(word))?;
                if let Some(phonetic) = &record.phonetic {
                    writeln!(
                        out,
                        "  Pronunciation: {}",
                        self.style().italic().apply_to(sanitize(phonetic))
                    )?;
                }
                for group in &record.parts_of_speech {
                    self.write_panel(out, &self.group_panel(group))?;
                }
            }
            LookupOutcome::NotFound => {
                writeln!(
                    out,
                    "{} Found no definition for '{}'.",
                    self.style().bold().yellow().apply_to("Error:"),
                    self.style().yellow().apply_to(sanitize(word))
                )?;
            }
            LookupOutcome::TransportError(cause) => {
                writeln!(
                    out,
                    "{} {}",
                    self.style().bold().red().apply_to("Error:"),
                    self.style().red().apply_to(sanitize(cause))
                )?;
            }
        }
        Ok(())
    }

    fn title_panel(&self, word: &str) -> Panel {
        Panel {
            title: "Dictionary search".to_owned(),
            title_style: self.style().bold().green(),
            border_style: self.style().cyan(),
            padding: (0, 1),
            lines: vec![Line {
                prefix: "WORD: ".to_owned(),
                prefix_style: self.style().bold().magenta(),
                text: sanitize(word).to_uppercase(),
                text_style: self.style().bold().yellow(),
            }],
        }
    }

    fn group_panel(&self, group: &PartOfSpeechGroup) -> Panel {
        let mut lines = Vec::with_capacity(group.definitions.len() * 2);
        for (index, entry) in group.definitions.iter().enumerate() {
            lines.push(Line {
                prefix: format!("{}. ", index + 1),
                prefix_style: self.style().bold(),
                text: sanitize(&entry.definition),
                text_style: self.style(),
            });
            if let Some(example) = &entry.example {
                lines.push(Line {
                    prefix: "    Example: ".to_owned(),
                    prefix_style: self.style().dim(),
                    text: format!("\"{}\"", sanitize(example)),
                    text_style: self.style().italic(),
                });
            }
        }
        Panel {
            title: capitalize(&sanitize(&group.part_of_speech)),
            title_style: self.style().yellow(),
            border_style: self.style().green(),
            padding: (1, 2),
            lines,
        }
    }

    fn write_panel<W: Write>(&self, out: &mut W, panel: &Panel) -> io::Result<()> {
        let border = &panel.border_style;
        let (pad_y, pad_x) = panel.padding;
        let inner = self.width - 2 - 2 * pad_x;

        // ╭─ title ───╮
        let title = truncate_str(&panel.title, self.width - 6, "…");
        let rest = self.width - 5 - measure_text_width(&title);
        writeln!(
            out,
            "{}{}{}",
            border.apply_to("╭─ "),
            panel.title_style.apply_to(&title),
            border.apply_to(format!(" {}╮", "─".repeat(rest)))
        )?;

        let side = border.apply_to("│");
        let blank = " ".repeat(self.width - 2);
        let margin = " ".repeat(pad_x);
        for _ in 0..pad_y {
            writeln!(out, "{side}{blank}{side}")?;
        }
        for line in &panel.lines {
            for row in line.rows(inner) {
                let row = pad_str(&row, inner, Alignment::Left, None);
                writeln!(out, "{side}{margin}{row}{margin}{side}")?;
            }
        }
        for _ in 0..pad_y {
            writeln!(out, "{side}{blank}{side}")?;
        }
        writeln!(
            out,
            "{}",
            border.apply_to(format!("╰{}╯", "─".repeat(self.width - 2)))
        )
    }
}

impl Line {
    fn rows(&self, width: usize) -> Vec<String> {
        let prefix_width = measure_text_width(&self.prefix);
        let text_width = width.saturating_sub(prefix_width).max(1);
        wrap(&self.text, text_width)
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| {
                let lead = if index == 0 {
                    self.prefix_style.apply_to(&self.prefix).to_string()
                } else {
                    " ".repeat(prefix_width)
                };
                format!("{lead}{}", self.text_style.apply_to(chunk))
            })
            .collect()
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strips escape sequences and control characters from remote text so it
/// cannot drive the terminal. Whitespace controls become spaces.
fn sanitize(text: &str) -> String {
    strip_ansi_codes(text)
        .chars()
        .filter_map(|ch| match ch {
            ch if ch.is_whitespace() => Some(' '),
            ch if ch.is_control() => None,
            ch => Some(ch),
        })
        .collect()
}

/// Greedy word wrap. Words wider than `width` are split between characters.
/// Always returns at least one row.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = measure_text_width(word);
        if current_width > 0 && current_width + 1 + word_width > width {
            rows.push(mem::take(&mut current));
            current_width = 0;
        }
        if word_width > width {
            let mut buf = [0u8; 4];
            for ch in word.chars() {
                let ch_width = measure_text_width(ch.encode_utf8(&mut buf));
                if current_width > 0 && current_width + ch_width > width {
                    rows.push(mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
            continue;
        }
        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }
    rows.push(current);
    rows
}
