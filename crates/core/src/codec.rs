//! Descriptor codec
//!
//! A page template is persisted as one line of whitespace separated fields:
//!
//! ```text
//! <width> <height> <#RRGGBB> <none|lined|ruled|graph|...> <true|false>
//! ```
//!
//! Parsing is lenient. Template files get hand-edited and older versions wrote
//! a different layout, so a bad field falls back to its own default and a
//! shapeless input falls back to [`PageTemplate::default`]. Nothing here
//! returns an error.

use crate::color::Color;
use crate::template::{
    validate_dimension, Axis, BackgroundType, PageTemplate, DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH,
};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// First line of the keyed multi-line layout written by older versions
pub const LEGACY_HEADER: &str = "xoj/template";

/// Number of fields in the single-line layout
pub const FIELD_COUNT: usize = 5;

/// Parse a descriptor. Never fails; see module docs for the fallback rules.
pub fn parse(text: &str) -> PageTemplate {
    // Editors on Windows like to prepend a byte order mark
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let Some(first) = lines.next() else {
        return PageTemplate::default();
    };

    if first == LEGACY_HEADER {
        return parse_legacy(lines);
    }

    if lines.next().is_some() {
        log::debug!("page template: expected a single line, using defaults");
        return PageTemplate::default();
    }

    parse_line(first)
}

/// Serialize a template into the single-line layout.
pub fn serialize(template: &PageTemplate) -> String {
    format!(
        "{:.2} {:.2} {} {} {}",
        template.page_width(),
        template.page_height(),
        template.background_color(),
        template.background_type().name(),
        template.is_copy_last_page_settings(),
    )
}

fn parse_line(line: &str) -> PageTemplate {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() > FIELD_COUNT {
        log::debug!(
            "page template: ignoring {} trailing field(s)",
            tokens.len() - FIELD_COUNT
        );
    }
    let field = |i: usize| tokens.get(i).copied();

    let mut template = PageTemplate::default();
    let width = field(0).map_or(DEFAULT_PAGE_WIDTH, |t| dimension_or_default(Axis::Width, t));
    let height = field(1).map_or(DEFAULT_PAGE_HEIGHT, |t| dimension_or_default(Axis::Height, t));
    apply_size(&mut template, width, height);

    if let Some(token) = field(2) {
        template.set_background_color(color_or_default(token));
    }
    if let Some(token) = field(3) {
        set_background_or_default(&mut template, token);
    }
    if let Some(token) = field(4) {
        template.set_copy_last_page_settings(bool_or_default(token));
    }
    template
}

/// Keyed layout:
///
/// ```text
/// xoj/template
/// copyLastPageSettings=true
/// size=595.275591x841.889764
/// backgroundType=lined
/// backgroundColor=#ffffff
/// ```
fn parse_legacy<'a>(lines: impl Iterator<Item = &'a str>) -> PageTemplate {
    let mut template = PageTemplate::default();

    for line in lines {
        let Some((key, value)) = line.split_once('=') else {
            log::debug!("page template: skipping line without '=': {line}");
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "copyLastPageSettings" => template.set_copy_last_page_settings(bool_or_default(value)),
            "backgroundColor" => template.set_background_color(color_or_default(value)),
            "backgroundType" => set_background_or_default(&mut template, value),
            "size" => {
                let (w, h) = value.split_once('x').unwrap_or((value, ""));
                let width = dimension_or_default(Axis::Width, w.trim());
                let height = dimension_or_default(Axis::Height, h.trim());
                apply_size(&mut template, width, height);
            }
            other => log::debug!("page template: ignoring unknown key '{other}'"),
        }
    }
    template
}

fn apply_size(template: &mut PageTemplate, width: f64, height: f64) {
    // Both values already passed validation or are the defaults
    if let Err(e) = template.set_page_size(width, height) {
        log::debug!("page template: {e}");
    }
}

fn dimension_or_default(axis: Axis, token: &str) -> f64 {
    let default = match axis {
        Axis::Width => DEFAULT_PAGE_WIDTH,
        Axis::Height => DEFAULT_PAGE_HEIGHT,
    };
    match token.parse::<f64>() {
        Ok(value) => validate_dimension(axis, value).unwrap_or_else(|e| {
            log::debug!("page template: {e}, using default");
            default
        }),
        Err(_) => {
            log::debug!("page template: invalid {axis} '{token}', using default");
            default
        }
    }
}

fn set_background_or_default(template: &mut PageTemplate, token: &str) {
    // Tokens that cannot survive the single-line layout (empty, spaced) keep the default
    if let Err(e) = template.set_background_type(BackgroundType::from_token(token)) {
        log::debug!("page template: {e}, using none");
    }
}

fn color_or_default(token: &str) -> Color {
    Color::parse_token(token).unwrap_or_else(|| {
        log::debug!("page template: invalid color '{token}', using white");
        Color::WHITE
    })
}

fn bool_or_default(token: &str) -> bool {
    if token.eq_ignore_ascii_case("true") {
        true
    } else if token.eq_ignore_ascii_case("false") {
        false
    } else {
        log::debug!("page template: invalid flag '{token}', using false");
        false
    }
}

impl FromStr for PageTemplate {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

impl fmt::Display for PageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PageTemplate {
        PageTemplate::new(100.0, 200.0, Color::WHITE, BackgroundType::None, false).unwrap()
    }

    #[test]
    fn test_serialize_layout() {
        let t = PageTemplate::new(
            595.28,
            841.89,
            Color::from_hex(0xfafafa),
            BackgroundType::Lined,
            true,
        )
        .unwrap();
        assert_eq!(serialize(&t), "595.28 841.89 #FAFAFA lined true");
        assert_eq!(serialize(&sample()), "100.00 200.00 #FFFFFF none false");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse(""), PageTemplate::default());
        assert_eq!(parse("   \n\t\n"), PageTemplate::default());
    }

    #[test]
    fn test_parse_full_line() {
        let t = parse("210.00 297.00 #00FF00 graph true");
        assert_eq!(t.page_width(), 210.0);
        assert_eq!(t.page_height(), 297.0);
        assert_eq!(t.background_color(), Color::from_rgb(0, 0xFF, 0));
        assert_eq!(t.background_type(), &BackgroundType::Graph);
        assert!(t.is_copy_last_page_settings());
    }

    #[test]
    fn test_parse_trailing_newline() {
        // Files saved by other editors often end in a newline
        assert_eq!(parse("100.00 200.00 #FFFFFF none false\n"), sample());
        assert_eq!(parse("\r\n  100.00 200.00 #FFFFFF none false \r\n"), sample());
    }

    #[test]
    fn test_partial_corruption_only_touches_color() {
        let original = parse("100.00 200.00 #123456 none false");
        let corrupted = parse("100.00 200.00 not-a-color none false");
        assert_eq!(corrupted.background_color(), Color::WHITE);

        let mut expected = original.clone();
        expected.set_background_color(Color::WHITE);
        assert_eq!(corrupted, expected);
    }

    #[test]
    fn test_bad_dimension_falls_back_per_axis() {
        let t = parse("abc 200.00 #FFFFFF none false");
        assert_eq!(t.page_width(), DEFAULT_PAGE_WIDTH);
        assert_eq!(t.page_height(), 200.0);

        let t = parse("100.00 -3 #FFFFFF none false");
        assert_eq!(t.page_width(), 100.0);
        assert_eq!(t.page_height(), DEFAULT_PAGE_HEIGHT);

        let t = parse("inf NaN #FFFFFF none false");
        assert_eq!(t.page_width(), DEFAULT_PAGE_WIDTH);
        assert_eq!(t.page_height(), DEFAULT_PAGE_HEIGHT);
    }

    #[test]
    fn test_bad_flag_falls_back() {
        let t = parse("100.00 200.00 #FFFFFF none yes");
        assert!(!t.is_copy_last_page_settings());
        assert_eq!(t.page_width(), 100.0);
    }

    #[test]
    fn test_case_tolerance() {
        assert_eq!(
            parse("100.00 200.00 #FFFFFF LINED TRUE"),
            parse("100.00 200.00 #FFFFFF lined true")
        );
        assert_eq!(parse("100.00 200.00 #ffffff none False"), sample());
    }

    #[test]
    fn test_unknown_background_preserved() {
        let t = parse("100.00 200.00 #FFFFFF customfuture false");
        assert_eq!(t.background_type(), &BackgroundType::Other("customfuture".into()));
        assert_eq!(serialize(&t), "100.00 200.00 #FFFFFF customfuture false");

        let t = parse("100.00 200.00 #FFFFFF Dotted false");
        assert!(serialize(&t).contains(" Dotted "));
    }

    #[test]
    fn test_missing_trailing_fields() {
        let t = parse("100 200");
        assert_eq!(t.page_width(), 100.0);
        assert_eq!(t.page_height(), 200.0);
        assert_eq!(t.background_color(), Color::WHITE);
        assert_eq!(t.background_type(), &BackgroundType::None);
        assert!(!t.is_copy_last_page_settings());
    }

    #[test]
    fn test_extra_fields_ignored() {
        assert_eq!(parse("100.00 200.00 #FFFFFF none false 42 extra"), sample());
    }

    #[test]
    fn test_multiline_garbage_defaults() {
        assert_eq!(
            parse("100.00 200.00 #FFFFFF graph true\nsecond line"),
            PageTemplate::default()
        );
    }

    #[test]
    fn test_parse_legacy() {
        let t = parse(
            "xoj/template\n\
             copyLastPageSettings=true\n\
             size=595.275591x841.889764\n\
             backgroundType=ruled\n\
             backgroundColor=#fafafa\n",
        );
        assert_eq!(t.page_width(), 595.28);
        assert_eq!(t.page_height(), 841.89);
        assert_eq!(t.background_type(), &BackgroundType::Ruled);
        assert_eq!(t.background_color(), Color::from_hex(0xfafafa));
        assert!(t.is_copy_last_page_settings());

        // Re-saved in the current layout
        assert_eq!(serialize(&t), "595.28 841.89 #FAFAFA ruled true");
    }

    #[test]
    fn test_leading_bom_is_ignored() {
        let t = parse("\u{FEFF}100.00 200.00 #000000 graph true");
        assert_eq!(t.page_width(), 100.0);
        assert_eq!(serialize(&t), "100.00 200.00 #000000 graph true");

        let t = parse("\u{FEFF}xoj/template\nbackgroundType=ruled");
        assert_eq!(t.background_type(), &BackgroundType::Ruled);
    }

    #[test]
    fn test_legacy_spaced_background_keeps_default() {
        let t = parse("xoj/template\nbackgroundType=my pattern\nbackgroundColor=#000000");
        assert_eq!(t.background_type(), &BackgroundType::None);
        assert_eq!(t.background_color(), Color::BLACK);
    }

    #[test]
    fn test_parse_legacy_lenient() {
        let t = parse("xoj/template\nsize=oops\nunknownKey=1\nnot a pair\nbackgroundType=lined");
        assert_eq!(t.page_width(), DEFAULT_PAGE_WIDTH);
        assert_eq!(t.page_height(), DEFAULT_PAGE_HEIGHT);
        assert_eq!(t.background_type(), &BackgroundType::Lined);
    }

    #[test]
    fn test_from_str_and_display() {
        let t: PageTemplate = "100.00 200.00 #FFFFFF none false".parse().unwrap();
        assert_eq!(t, sample());
        assert_eq!(t.to_string(), "100.00 200.00 #FFFFFF none false");
    }
}
