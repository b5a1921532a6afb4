use super::*;
use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_MODEL_NAME};

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn no_subcommand_means_chat() {
    let args = parse_args(&["sparkle"]);
    assert!(args.command.is_none());
}

#[test]
fn global_flags_work_after_the_subcommand() {
    let args = parse_args(&[
        "sparkle",
        "say",
        "-u",
        "http://localhost:8000",
        "--model",
        "m1",
        "--log-file",
        "out.log",
        "hello",
        "there",
    ]);
    assert_eq!(args.url.as_deref(), Some("http://localhost:8000"));
    assert_eq!(args.model.as_deref(), Some("m1"));
    assert_eq!(args.log_file, Some(PathBuf::from("out.log")));
    assert_eq!(
        args.command,
        Some(Commands::Say {
            html: false,
            prompt: vec!["hello".into(), "there".into()],
        })
    );
}

#[test]
fn say_requires_a_prompt() {
    assert!(Args::try_parse_from(["sparkle", "say"]).is_err());
}

#[test]
fn chat_accepts_an_html_export_path() {
    let args = parse_args(&["sparkle", "chat", "--html", "chat.html"]);
    assert_eq!(
        args.command,
        Some(Commands::Chat {
            html: Some(PathBuf::from("chat.html")),
        })
    );
}

#[test]
fn set_collects_the_remaining_words() {
    let args = parse_args(&["sparkle", "set", "model-name", "gemini", "pro"]);
    assert_eq!(
        args.command,
        Some(Commands::Set {
            key: "model-name".into(),
            value: vec!["gemini".into(), "pro".into()],
        })
    );
}

#[test]
fn only_chat_is_interactive() {
    assert!(Commands::Chat { html: None }.is_interactive());
    assert!(!Commands::Reset.is_interactive());
    assert!(!Commands::Render { file: None }.is_interactive());
}

#[test]
fn connection_prefers_flags_over_config() {
    let config = Config {
        base_url: Some("http://configured:1".into()),
        model_name: Some("configured-model".into()),
        ..Default::default()
    };

    let from_config = Connection::resolve(None, None, &config).expect("config values are valid");
    assert_eq!(from_config.base_url, "http://configured:1");
    assert_eq!(from_config.model_name, "configured-model");

    let overridden = Connection::resolve(Some("https://flag.example/"), Some(" flag-model "), &config)
        .expect("flag values are valid");
    assert_eq!(overridden.base_url, "https://flag.example");
    assert_eq!(overridden.model_name, "flag-model");
}

#[test]
fn connection_defaults_and_validation() {
    let defaults = Connection::resolve(None, Some(""), &Config::default()).expect("defaults");
    assert_eq!(defaults.base_url, DEFAULT_BASE_URL);
    assert_eq!(defaults.model_name, DEFAULT_MODEL_NAME);

    assert!(Connection::resolve(Some("not a url"), None, &Config::default()).is_err());
}

#[test]
fn render_options_follow_config() {
    let config = Config {
        raw_html: Some(true),
        syntax: Some(false),
        ..Default::default()
    };
    let options = render_options(&config);
    assert!(options.raw_html);
    assert!(!options.highlight);
}
