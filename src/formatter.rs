//! Calendar formatting and display with localization and modifier highlighting.

use unicode_width::UnicodeWidthStr;

use crate::calendar::{add_months, build_week_grid};
use crate::locale::{ChronoLocaleUtils, LocaleUtils, get_weekday_order};
use crate::modifiers::resolve_modifiers;
use crate::types::{
    COLOR_DIM, COLOR_RED, COLOR_RESET, COLOR_REVERSE, COLOR_SAND_YELLOW, COLOR_TEAL, CalContext,
    CalendarDate, ColumnsMode, MODIFIER_OUTSIDE, MODIFIER_TODAY, MONTH_WIDTH, OutputFormat,
};

/// Modifiers of a grid day: the configured ones, then `today` and `outside`.
pub fn day_modifiers(ctx: &CalContext, month: CalendarDate, day: CalendarDate) -> Vec<String> {
    let mut modifiers = resolve_modifiers(day, &ctx.modifiers);
    if day == ctx.today {
        modifiers.push(MODIFIER_TODAY.to_string());
    }
    if !day.is_same_month(month) {
        modifiers.push(MODIFIER_OUTSIDE.to_string());
    }
    modifiers
}

/// Pick the cell style for a set of modifiers.
///
/// Priority: selected > disabled > today > custom modifier > outside
pub fn modifier_style(ctx: &CalContext, modifiers: &[String]) -> Option<&'static str> {
    let has = |name: &str| modifiers.iter().any(|m| m == name);

    if has(ctx.class_names.selected.as_str()) {
        Some(COLOR_REVERSE)
    } else if has(ctx.class_names.disabled.as_str()) {
        Some(COLOR_DIM)
    } else if has(MODIFIER_TODAY) {
        Some(COLOR_TEAL)
    } else if modifiers.iter().any(|m| m != MODIFIER_OUTSIDE) {
        Some(COLOR_RED)
    } else if has(MODIFIER_OUTSIDE) {
        Some(COLOR_DIM)
    } else {
        None
    }
}

/// Format month header with optional year and color.
pub fn format_month_header(ctx: &CalContext, month: CalendarDate, width: usize) -> String {
    let month_name = ChronoLocaleUtils.month_name(month.month(), &ctx.locale);
    let header = if ctx.show_year_in_header {
        format!("{} {}", month_name, month.year())
    } else {
        month_name
    };
    let centered = center_text(&header, width);
    if ctx.color {
        format!("{}{}{}", COLOR_TEAL, centered, COLOR_RESET)
    } else {
        centered
    }
}

/// Center text within a specified width, accounting for Unicode character widths.
pub fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

/// Format weekday header row starting at the context's first day of week.
pub fn format_weekday_headers(ctx: &CalContext) -> String {
    let names: Vec<String> = get_weekday_order(ctx.first_day_of_week)
        .iter()
        .map(|&weekday| {
            let name = ChronoLocaleUtils.weekday_short(weekday, &ctx.locale);
            // Keep every column two cells wide, even for narrow abbreviations
            format!("{}{}", name, " ".repeat(2usize.saturating_sub(name.width())))
        })
        .collect();
    let row = names.join(" ");

    if ctx.color {
        format!("{}{}{}", COLOR_SAND_YELLOW, row, COLOR_RESET)
    } else {
        row
    }
}

/// Format one day cell (two columns wide, no separator).
fn format_day(ctx: &CalContext, month: CalendarDate, day: CalendarDate) -> String {
    let outside = !day.is_same_month(month);
    if outside && !ctx.show_outside_days {
        return "  ".to_string();
    }

    let day_str = format!("{:>2}", day.day());
    if !ctx.color {
        return day_str;
    }
    match modifier_style(ctx, &day_modifiers(ctx, month, day)) {
        Some(style) => format!("{}{}{}", style, day_str, COLOR_RESET),
        None => day_str,
    }
}

/// Format month as grid of lines: header, weekday names, one line per week.
pub fn format_month_grid(ctx: &CalContext, month: CalendarDate) -> Vec<String> {
    let weeks = build_week_grid(month, ctx.first_day_of_week, ctx.fixed_weeks);
    let mut lines = Vec::with_capacity(weeks.len() + 2);

    lines.push(format_month_header(ctx, month, MONTH_WIDTH));
    lines.push(format_weekday_headers(ctx));

    for week in &weeks {
        let cells: Vec<String> = week.iter().map(|&day| format_day(ctx, month, day)).collect();
        lines.push(cells.join(" "));
    }

    lines
}

/// One line per grid day: the date followed by its modifier names.
pub fn format_day_list(ctx: &CalContext, month: CalendarDate) -> Vec<String> {
    build_week_grid(month, ctx.first_day_of_week, ctx.fixed_weeks)
        .iter()
        .flatten()
        .filter(|day| ctx.show_outside_days || day.is_same_month(month))
        .map(|&day| {
            let modifiers = day_modifiers(ctx, month, day);
            if modifiers.is_empty() {
                day.to_string()
            } else {
                format!("{} {}", day, modifiers.join(","))
            }
        })
        .collect()
}

/// Lay out month grids side by side, padding shorter months with blank rows.
pub fn format_months_side_by_side(ctx: &CalContext, grids: &[Vec<String>]) -> Vec<String> {
    let max_height = grids.iter().map(|g| g.len()).max().unwrap_or(0);
    let gutter = " ".repeat(ctx.gutter_width);

    (0..max_height)
        .map(|row| {
            let cells: Vec<String> = grids
                .iter()
                .map(|grid| {
                    let text = grid.get(row).map(String::as_str).unwrap_or("");
                    let padding = MONTH_WIDTH.saturating_sub(visible_width(text));
                    format!("{}{}", text, " ".repeat(padding))
                })
                .collect();
            cells.join(&gutter).trim_end().to_string()
        })
        .collect()
}

/// Display width ignoring ANSI escape sequences.
fn visible_width(text: &str) -> usize {
    let mut in_escape = false;
    let plain: String = text
        .chars()
        .filter(|&c| match c {
            '\x1b' => {
                in_escape = true;
                false
            }
            'm' if in_escape => {
                in_escape = false;
                false
            }
            _ => !in_escape,
        })
        .collect();
    plain.width()
}

impl CalContext {
    /// Months per row for multi-month output.
    pub fn months_per_row(&self) -> u32 {
        match self.columns {
            ColumnsMode::Fixed(n) => n,
            ColumnsMode::Auto => {
                // month width + gutter, clamp to 1-3 for readability
                let month_width = MONTH_WIDTH + self.gutter_width;
                if let Some(term_width) = get_terminal_width() {
                    (term_width / month_width as u32).clamp(1, 3)
                } else {
                    3
                }
            }
        }
    }
}

/// Render `count` consecutive months starting at `start`.
///
/// Stops early at the last supported year.
pub fn format_months(ctx: &CalContext, start: CalendarDate, count: u32) -> Vec<String> {
    let months: Vec<CalendarDate> = (0..count)
        .map_while(|i| add_months(start, i32::try_from(i).ok()?))
        .collect();

    match ctx.format {
        OutputFormat::List => months
            .iter()
            .flat_map(|&month| format_day_list(ctx, month))
            .collect(),
        OutputFormat::Grid => {
            let per_row = ctx.months_per_row().max(1) as usize;
            let mut lines = Vec::new();
            for (i, chunk) in months.chunks(per_row).enumerate() {
                if i > 0 {
                    lines.push(String::new());
                }
                let grids: Vec<Vec<String>> =
                    chunk.iter().map(|&m| format_month_grid(ctx, m)).collect();
                lines.extend(format_months_side_by_side(ctx, &grids));
            }
            lines
        }
    }
}

/// Print `count` consecutive months starting at `start`.
pub fn print_months(ctx: &CalContext, start: CalendarDate, count: u32) {
    for line in format_months(ctx, start, count) {
        println!("{}", line);
    }
}

/// Get terminal width using terminal_size crate.
fn get_terminal_width() -> Option<u32> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as u32)
}
