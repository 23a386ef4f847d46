use pretty_assertions::assert_eq;

use super::*;

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn defaults() {
    let options = CompileOptions::default();
    assert_eq!(options.line_format, LineFormat::Cards);
    assert_eq!(options.macro_depth_limit, 8);
    assert_eq!(options.max_parameters, 12);
    assert_eq!(options.parse_stack_limit, 75);
    assert_eq!(options.error_limit, 0);
    assert_eq!(options.include_library, None);
    assert!(!options.trace_reductions);
}

#[test]
fn builders_set_each_field() {
    let options = CompileOptions::default()
        .with_line_format(LineFormat::Free)
        .with_macro_depth_limit(3)
        .with_max_parameters(4)
        .with_parse_stack_limit(200)
        .with_error_limit(10)
        .with_include_library("/lib/hal")
        .with_trace_reductions(true);
    assert_eq!(
        options,
        CompileOptions {
            line_format: LineFormat::Free,
            macro_depth_limit: 3,
            max_parameters: 4,
            parse_stack_limit: 200,
            error_limit: 10,
            include_library: Some(PathBuf::from("/lib/hal")),
            trace_reductions: true,
        }
    );
    assert_eq!(
        options.expansion_limits(),
        ExpansionLimits {
            depth: 3,
            max_parameters: 4
        }
    );
}

#[test]
fn flags_and_positionals() {
    let parsed = parse_compile_options(&args(&[
        "main.hal",
        "--free",
        "--macro-depth=4",
        "--stack=120",
        "--error-limit=5",
        "--max-params=6",
        "--lib=members",
        "--trace",
        "-",
    ]))
    .unwrap();
    assert_eq!(parsed.positional, args(&["main.hal", "-"]));
    let options = parsed.options;
    assert_eq!(options.line_format, LineFormat::Free);
    assert_eq!(options.macro_depth_limit, 4);
    assert_eq!(options.parse_stack_limit, 120);
    assert_eq!(options.error_limit, 5);
    assert_eq!(options.max_parameters, 6);
    assert_eq!(options.include_library, Some(PathBuf::from("members")));
    assert!(options.trace_reductions);
}

#[test]
fn later_flags_win() {
    let parsed = parse_compile_options(&args(&["--free", "--cards"])).unwrap();
    assert_eq!(parsed.options.line_format, LineFormat::Cards);
}

#[test]
fn bad_flags_are_errors() {
    assert_eq!(
        parse_compile_options(&args(&["--verbose"])),
        Err(OptionError::UnknownFlag("--verbose".to_owned()))
    );
    assert_eq!(
        parse_compile_options(&args(&["--stack=deep"])),
        Err(OptionError::InvalidNumber {
            flag: "--stack",
            value: "deep".to_owned()
        })
    );
    assert_eq!(
        parse_compile_options(&args(&["--lib="])),
        Err(OptionError::MissingValue("--lib"))
    );
    assert_eq!(
        OptionError::InvalidNumber {
            flag: "--stack",
            value: "deep".to_owned()
        }
        .to_string(),
        "`--stack` expects a number, found `deep`"
    );
}
