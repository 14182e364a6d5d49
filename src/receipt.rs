//! Receipt

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::quote::{MARKUP, QuoteResult};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Printable view of a quote.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'q> {
    quote: &'q QuoteResult,
    color: bool,
}

impl<'q> Receipt<'q> {
    /// Create a coloured receipt for `quote`.
    pub fn new(quote: &'q QuoteResult) -> Self {
        Self { quote, color: true }
    }

    /// Enable or disable ANSI colours.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Writes the line item table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Subtotal"]);

        for (idx, line) in self.quote.line_items().iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.label.to_string(),
                line.quantity.to_string(),
                self.money(line.unit_price),
                self.money(line.subtotal),
            ]);
        }

        self.write_table(&mut out, builder)?;
        self.write_summary(&mut out)?;

        Ok(())
    }

    fn money(&self, amount: Decimal) -> String {
        format!("{}", self.quote.money(amount.round_dp(2)))
    }

    fn write_table(&self, out: &mut impl io::Write, builder: Builder) -> Result<(), ReceiptError> {
        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Columns::new(2..5), Alignment::right());

        if self.color {
            table.modify(Rows::first(), Color::BOLD);
        }

        let rendered = table.to_string();

        let rendered = if self.color {
            grey_borders(&rendered)
        } else {
            rendered
        };

        writeln!(out, "\n{rendered}")?;

        Ok(())
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let quote = self.quote;
        let margin_points = percent_points_from_fractional_percentage(quote.margin_percent());

        let rows = [
            (" Guests:".to_string(), format!("{}  ", quote.guest_count())),
            (" Linen:".to_string(), format!("{}  ", self.money(quote.linen_subtotal()))),
            (
                format!(" Staff ({} h):", format_quantity(quote.staff_hours())),
                format!("{}  ", self.money(quote.staff_cost())),
            ),
            (
                format!(" Markup (×{}):", MARKUP.normalize()),
                format!("{}  ", self.money(quote.raw_total())),
            ),
            (
                self.bold(" Total:"),
                self.bold(&format!("{}  ", self.money(quote.total()))),
            ),
            (
                " Margin:".to_string(),
                format!("({margin_points:.2}%) {}  ", self.money(quote.margin())),
            ),
        ];

        let label_width = rows
            .iter()
            .map(|(label, _)| visible_width(label))
            .max()
            .unwrap_or(0);

        let value_width = rows
            .iter()
            .map(|(_, value)| visible_width(value))
            .max()
            .unwrap_or(0);

        for (label, value) in &rows {
            write_summary_line(out, label, value, label_width, value_width)?;
        }

        writeln!(out)?;

        Ok(())
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Formats a quantity as an integer when whole, otherwise to two decimals.
pub fn format_quantity(value: Decimal) -> String {
    if value.fract().is_zero() {
        value.trunc().normalize().to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Converts a fractional percentage to percent points for display.
fn percent_points_from_fractional_percentage(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2)
}

const GREY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Box-drawing characters, U+2500..U+257F.
fn is_border(ch: char) -> bool {
    matches!(ch, '\u{2500}'..='\u{257F}')
}

/// Greys out each run of border characters, leaving cell text untouched.
fn grey_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() * 2);
    let mut chars = table.chars().peekable();

    while let Some(ch) = chars.next() {
        if !is_border(ch) {
            out.push(ch);
            continue;
        }

        out.push_str(GREY);
        out.push(ch);

        while let Some(next) = chars.next_if(|&c| is_border(c)) {
            out.push(next);
        }

        out.push_str(RESET);
    }

    out
}

/// Printed width of `s`, not counting `ESC [ ... <letter>` sequences.
fn visible_width(s: &str) -> usize {
    s.split('\x1b')
        .enumerate()
        .map(|(idx, part)| {
            if idx == 0 {
                part.chars().count()
            } else {
                part.chars()
                    .skip_while(|c| !c.is_ascii_alphabetic())
                    .skip(1)
                    .count()
            }
        })
        .sum()
}

/// Writes a summary line with a right-aligned label and a fixed-width value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), ReceiptError> {
    let label_pad = label_col_width.saturating_sub(visible_width(label));
    let value_pad = value_col_width.saturating_sub(visible_width(value));

    writeln!(
        out,
        "{:>label_pad$}{label}  {}{value}",
        "",
        " ".repeat(value_pad)
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{occupancy::OccupancyInput, prices::UnitPriceTable, quote::compute_quote};

    use super::*;

    fn render(input: &OccupancyInput, color: bool) -> Result<String, Box<dyn std::error::Error>> {
        let quote = compute_quote(input, &UnitPriceTable::standard())?;
        let mut out = Vec::new();

        Receipt::new(&quote).with_color(color).write_to(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn lists_every_priced_item_in_order() -> TestResult {
        let output = render(&OccupancyInput::new(1, 0, 1, 1, dec!(2)), false)?;

        let double = output.find("Double sheets").ok_or("double sheets missing")?;
        let towels = output.find("Body towels").ok_or("body towels missing")?;
        let paper = output.find("Toilet paper").ok_or("toilet paper missing")?;

        assert!(double < towels && towels < paper, "items out of order");
        assert!(!output.contains("Single sheets"), "empty item rendered");
        assert!(output.contains("Staff (2 h):"), "staff row missing");
        assert!(output.contains("(35.56%)"), "margin share missing");

        Ok(())
    }

    #[test]
    fn plain_output_has_no_escape_codes() -> TestResult {
        let output = render(&OccupancyInput::new(2, 1, 1, 2, dec!(1.5)), false)?;

        assert!(!output.contains('\x1b'), "unexpected escape code");
        assert!(output.contains("Staff (1.50 h):"), "fractional hours not shown");

        Ok(())
    }

    #[test]
    fn coloured_output_greys_borders() -> TestResult {
        let output = render(&OccupancyInput::new(1, 0, 0, 0, Decimal::ZERO), true)?;

        assert!(output.contains(GREY), "borders not coloured");

        Ok(())
    }

    #[test]
    fn empty_quote_still_renders_totals() -> TestResult {
        let output = render(&OccupancyInput::default(), false)?;

        assert!(output.contains("Item"), "header missing");
        assert!(output.contains("Total:"), "total missing");
        assert!(output.contains("(0.00%)"), "margin share missing");

        Ok(())
    }

    #[test]
    fn quantities_drop_trailing_zeros_when_whole() {
        assert_eq!(format_quantity(dec!(2.00)), "2");
        assert_eq!(format_quantity(dec!(0)), "0");
        assert_eq!(format_quantity(dec!(1.5)), "1.50");
        assert_eq!(format_quantity(dec!(0.333)), "0.33");
    }

    #[test]
    fn visible_width_ignores_escape_codes() {
        assert_eq!(visible_width("\x1b[1mTotal:\x1b[0m"), 6);
        assert_eq!(visible_width(&grey_borders("╭──╮ a")), 6);
    }

    #[test]
    fn border_runs_share_one_escape_sequence() {
        assert_eq!(
            grey_borders("─┼x─"),
            format!("{GREY}─┼{RESET}x{GREY}─{RESET}")
        );
        assert_eq!(grey_borders("plain"), "plain");
    }
}
