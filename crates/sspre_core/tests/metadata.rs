use sspre_core::{MetadataString, Token};

#[test]
fn empty_input_has_no_tokens() {
    let metadata = MetadataString::parse("");
    assert!(metadata.is_empty());
    assert_eq!(metadata.serialize(), "");
}

#[test]
fn absent_keys_fall_back_to_defaults() {
    let metadata = MetadataString::parse("");
    assert_eq!(metadata.get_float("hbox", 1.0), 1.0);
    assert_eq!(metadata.get_float("hitw", 58.0), 58.0);
}

#[test]
fn unparseable_values_fall_back_to_defaults() {
    let metadata = MetadataString::parse("hbox:wide;hitw:");
    assert_eq!(metadata.get_float("hbox", 1.0), 1.0);
    assert_eq!(metadata.get_float("hitw", 58.0), 58.0);
}

#[test]
fn first_matching_key_wins() {
    let metadata = MetadataString::parse("hitw:70;hitw:80");
    assert_eq!(metadata.get_float("hitw", 58.0), 70.0);
    assert_eq!(metadata.get("hitw"), Some("70"));
}

#[test]
fn bare_tokens_do_not_match_keys() {
    let metadata = MetadataString::parse("hbox;m_chaos");
    assert_eq!(metadata.get("hbox"), None);
    assert_eq!(metadata.get_float("hbox", 1.0), 1.0);
}

#[test]
fn parses_tagged_tokens_in_order() {
    let metadata = MetadataString::parse("hbox:1.2;hitw:60;m_chaos;s:++");
    assert_eq!(
        metadata.tokens(),
        &[
            Token::key_value("hbox", "1.2"),
            Token::key_value("hitw", "60"),
            Token::bare("m_chaos"),
            Token::key_value("s", "++"),
        ]
    );
}

#[test]
fn empty_segments_are_dropped() {
    let metadata = MetadataString::parse(";;hbox:1.1;;m_ghost;");
    assert_eq!(metadata.len(), 2);
    assert_eq!(metadata.serialize(), "hbox:1.1;m_ghost");
}

#[test]
fn remove_prefixed_returns_removed_tokens_in_order() {
    let mut metadata = MetadataString::parse("m_a;hbox:1;m_b;s:+;m_c");
    let removed = metadata.remove_prefixed("m_");
    assert_eq!(
        removed,
        vec![Token::bare("m_a"), Token::bare("m_b"), Token::bare("m_c")]
    );
    assert_eq!(metadata.serialize(), "hbox:1;s:+");
}

#[test]
fn remove_prefixed_matches_across_the_key_separator() {
    let mut metadata = MetadataString::parse("s:+;sx:1;s:--");
    let removed = metadata.remove_prefixed("s:");
    assert_eq!(removed.len(), 2);
    assert_eq!(metadata.serialize(), "sx:1");
}

#[test]
fn remove_key_requires_exact_key() {
    let mut metadata = MetadataString::parse("s:+;speed:2;s:-");
    let removed = metadata.remove_key("s");
    assert_eq!(
        removed,
        vec![Token::key_value("s", "+"), Token::key_value("s", "-")]
    );
    assert_eq!(metadata.serialize(), "speed:2");
}

#[test]
fn append_goes_to_the_end() {
    let mut metadata = MetadataString::parse("hbox:1");
    metadata.append(Token::bare("m_ghost"));
    metadata.append(Token::key_value("s", "="));
    assert_eq!(metadata.serialize(), "hbox:1;m_ghost;s:=");
}

#[test]
fn reparse_of_serialized_form_is_stable() {
    for raw in [
        "",
        "a",
        "a:b:c",
        ":x",
        "k:",
        "hbox:1.2;hitw:60;m_chaos;s:++",
        ";;weird;;:;",
    ] {
        let once = MetadataString::parse(raw);
        let twice = MetadataString::parse(&once.serialize());
        assert_eq!(once, twice, "raw={raw:?}");
    }
}

#[test]
fn from_str_matches_parse() {
    let parsed: MetadataString = "hbox:1;m_x".parse().expect("infallible");
    assert_eq!(parsed, MetadataString::parse("hbox:1;m_x"));
    assert_eq!(parsed.to_string(), "hbox:1;m_x");
}
