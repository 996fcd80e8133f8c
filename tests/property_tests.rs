//! Property-based tests for ak_logger using proptest

use ak_logger::prelude::*;
use ak_logger::{format_string, TimestampFormat};
use chrono::NaiveDate;
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warning),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

fn fixed_clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2001, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .expect("valid datetime"),
    )
}

fn render_narrow(template: &str, level: LogLevel, message: &str, args: &[FormatArg]) -> String {
    Template::<u8>::parse(template.as_bytes())
        .render(level, message.as_bytes(), args, &fixed_clock())
        .to_string_lossy()
}

fn render_wide(template: &str, level: LogLevel, message: &str, args: &[FormatArg]) -> String {
    Template::<u16>::parse(&wide(template))
        .render(level, &wide(message), args, &fixed_clock())
        .to_string_lossy()
}

fn quiet_logger(level: LogLevel) -> Logger {
    Logger::builder()
        .level(level)
        .console(AnsiConsole::new(Vec::<u8>::new()).with_colors(false))
        .clock(fixed_clock())
        .build()
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), use_lower in any::<bool>()) {
        let input = if use_lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };
        let parsed: LogLevel = input.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Level color is a fixed function of the level
    #[test]
    fn test_level_color_mapping(level in any_level()) {
        let expected = match level {
            LogLevel::Trace | LogLevel::Debug | LogLevel::Info => Color::Green,
            LogLevel::Warning => Color::Yellow,
            LogLevel::Error | LogLevel::Fatal => Color::Red,
        };
        prop_assert_eq!(level.color(), expected);
        prop_assert_eq!(level.color(), level.color());
    }

    /// Test that LogLevel serialization roundtrips
    #[test]
    fn test_log_level_serde_roundtrip(level in any_level()) {
        let json = serde_json::to_string(&level).unwrap();
        let back: LogLevel = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(level, back);
    }
}

// ============================================================================
// Leveled call tests
// ============================================================================

proptest! {
    /// Leveled calls never leave the level changed
    #[test]
    fn test_leveled_call_restores_level(
        start in any_level(),
        call_level in any_level(),
        use_wide in any::<bool>(),
    ) {
        let mut logger = quiet_logger(start);
        if use_wide {
            logger.log_w(call_level, wide("message %d"), &[1.into()]);
        } else {
            logger.log(call_level, "message %d", &[1.into()]);
        }
        prop_assert_eq!(logger.level(), start);
    }

    /// `%l` follows the level set on the logger
    #[test]
    fn test_render_labels_current_level(start in any_level(), call_level in any_level()) {
        let mut logger = Logger::builder()
            .format("%l")
            .level(start)
            .console(AnsiConsole::new(Vec::<u8>::new()).with_colors(false))
            .build();
        logger.set_level(call_level);
        let rendered = logger.render("", &[]).to_string_lossy();
        logger.set_level(start);
        prop_assert_eq!(rendered, call_level.to_str());
    }
}

// ============================================================================
// Wrapper template tests
// ============================================================================

proptest! {
    /// Templates without `%` render verbatim
    #[test]
    fn test_literal_template_verbatim(text in "[^%\\x00]{0,64}", level in any_level()) {
        prop_assert_eq!(render_narrow(&text, level, "m", &[]), text.clone());
        prop_assert_eq!(render_wide(&text, level, "m", &[]), text);
    }

    /// Unrecognized codes vanish and scanning continues after them
    #[test]
    fn test_unknown_code_dropped(
        before in "[a-z ]{0,16}",
        code in (0x20u8..0x7f).prop_filter("recognized code", |c| !b"012345678tdls".contains(c)),
        after in "[a-z ]{0,16}",
    ) {
        let template = format!("{}%{}{}", before, char::from(code), after);
        let expected = format!("{}{}", before, after);
        prop_assert_eq!(render_narrow(&template, LogLevel::Info, "", &[]), expected.clone());
        prop_assert_eq!(render_wide(&template, LogLevel::Info, "", &[]), expected);
    }

    /// Any template, message and argument list renders without panicking,
    /// including a trailing `%`
    #[test]
    fn test_arbitrary_templates_render(
        template in "\\PC{0,48}%?",
        message in "\\PC{0,48}%?",
        ints in prop::collection::vec(-512i64..512, 0..4),
        level in any_level(),
    ) {
        let args: Vec<FormatArg> = ints.into_iter().map(FormatArg::from).collect();
        let _ = render_narrow(&template, level, &message, &args);
        let _ = render_wide(&template, level, &message, &args);
    }

    /// Narrow and wide paths agree on ASCII input and ASCII arguments
    #[test]
    fn test_narrow_and_wide_agree_on_ascii(
        template in "[ -~]{0,32}",
        message in "[ -~]{0,32}",
        n in 0i32..128,
        s in "[a-z]{0,8}",
        level in any_level(),
    ) {
        let args = [FormatArg::from(n), FormatArg::from(s.as_str()), FormatArg::from(n)];
        prop_assert_eq!(
            render_narrow(&template, level, &message, &args),
            render_wide(&template, level, &message, &args)
        );
    }

    /// Time and date placeholders are zero-padded clock fields
    #[test]
    fn test_time_and_date_shape(
        year in 1000i32..9999,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
    ) {
        let at = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .unwrap();
        prop_assert_eq!(
            TimestampFormat::Time.format(&at),
            format!("{:02}:{:02}:{:02}", hour, minute, second)
        );
        prop_assert_eq!(
            TimestampFormat::Date.format(&at),
            format!("{:04}/{:02}/{:02}", year, month, day)
        );
    }
}

// ============================================================================
// Message formatting tests
// ============================================================================

proptest! {
    #[test]
    fn test_decimal_matches_display(n in any::<i32>(), wide_n in any::<i64>()) {
        prop_assert_eq!(format_string("%d", &[n.into()]), n.to_string());
        prop_assert_eq!(format_string("%lld", &[wide_n.into()]), wide_n.to_string());
        prop_assert_eq!(format_string("%d", &[wide_n.into()]), (wide_n as i32).to_string());
    }

    #[test]
    fn test_hex_and_octal_match_std(n in any::<u64>()) {
        prop_assert_eq!(format_string("%llx", &[n.into()]), format!("{:x}", n));
        prop_assert_eq!(format_string("%lX", &[n.into()]), format!("{:X}", n));
        prop_assert_eq!(format_string("%llo", &[n.into()]), format!("{:o}", n));
        prop_assert_eq!(format_string("%x", &[n.into()]), format!("{:x}", n as u32));
    }

    #[test]
    fn test_width_pads_to_at_least_width(n in any::<i32>(), width in 0usize..24) {
        let out = format_string(&format!("%{}d", width), &[n.into()]);
        prop_assert!(out.len() >= width);
        prop_assert_eq!(out.trim_start(), n.to_string());

        let left = format_string(&format!("%-{}d|", width), &[n.into()]);
        prop_assert!(left.starts_with(&n.to_string()));
        prop_assert!(left.ends_with('|'));
    }

    #[test]
    fn test_string_argument_copied(s in "[^\\x00]{0,32}") {
        prop_assert_eq!(format_string("%s", &[s.as_str().into()]), s.clone());
        prop_assert_eq!(format_string("<%s>", &[s.clone().into()]), format!("<{}>", s));
    }

    #[test]
    fn test_fixed_precision_matches_std(x in -1.0e9f64..1.0e9, precision in 0usize..8) {
        prop_assert_eq!(
            format_string(&format!("%.{}f", precision), &[x.into()]),
            format!("{:.*}", precision, x)
        );
    }
}
