use codespan_reporting::term::{
    termcolor::{Color, ColorSpec},
    Chars, Config, DisplayStyle, Styles,
};

/// The terminal configuration used when rendering diagnostics.
pub fn config() -> Config {
    let mut red = ColorSpec::new();
    red.set_fg(Some(Color::Red));
    red.set_bold(true);
    red.set_intense(true);

    let mut cyan = ColorSpec::new();
    cyan.set_fg(Some(Color::Cyan));
    cyan.set_bold(true);
    cyan.set_intense(true);

    let mut styles = Styles::default();
    styles.header_error = red.clone();
    styles.primary_label_error = red;
    styles.secondary_label = cyan.clone();
    styles.line_number = cyan.clone();
    styles.source_border = cyan.clone();
    styles.note_bullet = cyan;

    Config {
        display_style: DisplayStyle::Rich,
        tab_width: 4,
        styles,
        chars: Chars::ascii(),
        ..Config::default()
    }
}
