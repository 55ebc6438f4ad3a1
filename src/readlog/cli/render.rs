use colored::{ColoredString, Colorize};
use readlog::api::{BookColumn, CmdMessage, MessageLevel, YearStats};
use readlog::config::ReadlogConfig;
use readlog::model::{Book, Status};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const DATE_WIDTH: usize = 10;
const LABEL_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 50;
const BAR_CHAR: &str = "█";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_columns(columns: &[BookColumn]) {
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", render_column(column));
    }
}

fn render_column(column: &BookColumn) -> String {
    let mut out = format!(
        "{} {}\n",
        heading(column.status),
        format!("({})", column.total).dimmed()
    );
    if column.books.is_empty() {
        out.push_str(&format!("    {}\n", "Nothing here yet.".dimmed()));
        return out;
    }

    let id_width = column
        .books
        .iter()
        .map(|b| b.id.to_string().len())
        .max()
        .unwrap_or(1);

    for book in &column.books {
        out.push_str(&render_book_line(book, id_width));
        out.push('\n');
    }
    if column.hidden() > 0 {
        out.push_str(&format!(
            "    {}\n",
            format!("… {} more (use --more)", column.hidden()).dimmed()
        ));
    }
    out
}

fn heading(status: Status) -> ColoredString {
    let text = status.heading();
    match status {
        Status::ToRead => text.blue().bold(),
        Status::Reading => text.yellow().bold(),
        Status::Completed => text.green().bold(),
    }
}

fn render_book_line(book: &Book, id_width: usize) -> String {
    let idx = format!("{:>width$}. ", book.id, width = id_width);
    let date = format!("{} {}", short_month(book), book.year);

    let fixed = 4 + idx.width() + DATE_WIDTH + 1;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let text = truncate_to_width(&format!("{} · {}", book.title, book.author), available);
    let padding = available.saturating_sub(text.width());

    format!(
        "    {}{}{} {}",
        idx.yellow(),
        text,
        " ".repeat(padding),
        format!("{:>width$}", date, width = DATE_WIDTH).dimmed()
    )
}

fn short_month(book: &Book) -> String {
    book.month_name().chars().take(3).collect()
}

pub(super) fn print_stats(stats: &YearStats, term_width: usize) {
    print!("{}", render_stats(stats, term_width));
}

fn render_stats(stats: &YearStats, term_width: usize) -> String {
    let years: Vec<String> = stats
        .years
        .iter()
        .map(|y| {
            if *y == stats.year {
                format!("[{}]", y).bold().to_string()
            } else {
                y.to_string()
            }
        })
        .collect();

    let mut out = if years.is_empty() {
        format!("{} {}\n", "Years:".dimmed(), "none yet".dimmed())
    } else {
        format!("{} {}\n", "Years:".dimmed(), years.join(" "))
    };
    if !stats.authors.is_empty() {
        out.push_str(&format!("{} {}\n", "Authors:".dimmed(), stats.authors.join(", ")));
    }
    out.push('\n');

    let title = match &stats.author {
        Some(author) => format!("Books read in {} by {}", stats.year, author),
        None => format!("Books read in {}", stats.year),
    };
    out.push_str(&format!("{}\n", title.bold()));

    if stats.books.is_empty() {
        let hint = format!(
            "Complete a book in {} to unlock stats for it (readlog move <id> completed)",
            stats.year
        );
        out.push_str(&format!("    {}\n", hint.dimmed()));
        return out;
    }

    for book in &stats.books {
        out.push_str(&format!("    {} ({})\n", book.title, book.month_name()));
    }
    out.push_str(&format!(
        "{}\n\n",
        format!("Total: {}", stats.books.len()).bold()
    ));
    out.push_str(&render_chart(stats, term_width));
    out
}

fn render_chart(stats: &YearStats, term_width: usize) -> String {
    let chart = &stats.chart;
    let max = chart.max();
    let count_width = max.to_string().len();
    let bar_space = term_width
        .saturating_sub(4 + LABEL_WIDTH + 1 + count_width + 1)
        .clamp(1, MAX_BAR_WIDTH);

    let mut out = format!("{}\n", chart.label.dimmed());
    for (label, count) in chart.labels.iter().zip(chart.series.iter()) {
        let bar_len = scaled(*count, max, bar_space);
        let count_text = format!("{:>width$}", count, width = count_width);
        out.push_str(&format!(
            "    {:<width$} {} {}\n",
            label,
            BAR_CHAR.repeat(bar_len).red(),
            if *count == 0 {
                count_text.dimmed()
            } else {
                count_text.normal()
            },
            width = LABEL_WIDTH
        ));
    }
    out
}

/// Bar length for `count`, scaled so that `max` fills `space`. Non-zero counts
/// always get at least one cell.
fn scaled(count: u32, max: u32, space: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    let len = (count as usize * space) / max as usize;
    len.max(1)
}

pub(super) fn print_config(config: &ReadlogConfig) {
    for (key, value) in config.entries() {
        println!("{} = {}", key, value);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("Dune", 10), "Dune");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        let cut = truncate_to_width("The Left Hand of Darkness", 10);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 10);
    }

    fn year_stats(books: Vec<Book>) -> YearStats {
        let mut chart = readlog::chart::ChartData {
            label: "Books Read Count".into(),
            labels: readlog::model::month_names().into_iter().map(String::from).collect(),
            series: vec![0; 12],
        };
        for book in &books {
            chart.series[book.month as usize] += 1;
        }
        YearStats {
            year: 2024,
            author: None,
            years: vec![2024],
            authors: vec!["Herbert".into()],
            books,
            chart,
        }
    }

    #[test]
    fn stats_list_books_and_chart() {
        colored::control::set_override(false);
        let dune = Book {
            id: 1,
            title: "Dune".into(),
            author: "Herbert".into(),
            status: Status::Completed,
            month: 5,
            year: 2024,
        };
        let out = render_stats(&year_stats(vec![dune]), 80);
        assert!(out.contains("Dune (June)"));
        assert!(out.contains("Total: 1"));
        assert!(out.contains("Books Read Count"));
    }

    #[test]
    fn empty_year_shows_unlock_hint_instead_of_chart() {
        colored::control::set_override(false);
        let out = render_stats(&year_stats(Vec::new()), 80);
        assert!(out.contains("Books read in 2024"));
        assert!(out.contains("Complete a book in 2024 to unlock stats"));
        assert!(!out.contains("Total:"));
        assert!(!out.contains("Books Read Count"));
    }

    #[test]
    fn scaled_bars() {
        assert_eq!(scaled(0, 5, 40), 0);
        assert_eq!(scaled(5, 5, 40), 40);
        assert_eq!(scaled(1, 100, 40), 1);
        assert_eq!(scaled(3, 0, 40), 0);
    }
}
