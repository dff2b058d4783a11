use crate::ParseErrorKind;
use crate::strip_ignored;
use crate::tests::utils::token_texts;
use crate::token::TokenKind;
use crate::tokenize;

#[test]
fn punctuators_are_separate_tokens() {
    assert_eq!(
        token_texts("{a(b:[c]){d}}"),
        vec!["{", "a", "(", "b", ":", "[", "c", "]", ")", "{", "d", "}", "}"],
    );
}

#[test]
fn whitespace_and_commas_are_insignificant() {
    assert_eq!(
        token_texts("  a,b ,\t c\r\n\nd,,,"),
        vec!["a", "b", "c", "d"],
    );
}

#[test]
fn comments_run_to_end_of_line() {
    assert_eq!(
        token_texts("# leading\n{ a # trailing } b\n c }"),
        vec!["{", "a", "c", "}"],
    );
}

#[test]
fn comment_directly_after_a_name_ends_the_name() {
    assert_eq!(token_texts("abc#def\nghi"), vec!["abc", "ghi"]);
}

#[test]
fn string_literal_keeps_quotes_and_hash() {
    let tokens = tokenize(r#"(name: "Bat # man")"#).unwrap();
    assert_eq!(tokens[3].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[3].text, r#""Bat # man""#);
}

#[test]
fn escaped_quote_does_not_close_string() {
    let tokens = tokenize(r#""a\"b" c"#).unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].text, r#""a\"b""#);
}

#[test]
fn leading_byte_order_mark_is_dropped() {
    assert_eq!(token_texts("\u{FEFF}{ a }"), vec!["{", "a", "}"]);
}

#[test]
fn variables_directives_and_spreads_are_single_names() {
    let tokens = tokenize("$id @include ...Frag ... on").unwrap();
    assert!(tokens.iter().all(|token| token.kind == TokenKind::Name));
    assert_eq!(
        tokens.iter().map(|t| t.text).collect::<Vec<_>>(),
        vec!["$id", "@include", "...Frag", "...", "on"],
    );
}

#[test]
fn control_characters_are_illegal() {
    let err = tokenize("{ a\u{0007} }").unwrap_err();
    assert_eq!(
        err.kind(),
        &ParseErrorKind::IllegalCharacter { codepoint: '\u{0007}' },
    );
    assert_eq!(err.position().unwrap().col(), 3);
}

#[test]
fn control_characters_inside_comments_are_illegal_too() {
    let err = tokenize("# bad \u{0001}\n{ a }").unwrap_err();
    assert!(matches!(err.kind(), ParseErrorKind::IllegalCharacter { .. }));
}

#[test]
fn unterminated_string_is_rejected() {
    let err = tokenize(r#"{ a(b: "oops) }"#).unwrap_err();
    assert_eq!(err.kind(), &ParseErrorKind::UnterminatedString);
}

#[test]
fn positions_track_lines_and_columns() {
    let tokens = tokenize("{\n  hero\r\n  name }").unwrap();
    let hero = &tokens[1];
    assert_eq!((hero.position.line(), hero.position.col()), (1, 2));
    let name = &tokens[2];
    assert_eq!((name.position.line(), name.position.col()), (2, 2));
    assert_eq!(name.index, 2);
}

#[test]
fn strip_ignored_removes_comments_and_bom_only() {
    assert_eq!(
        strip_ignored("\u{FEFF}{ a # c\n b(x: \"#keep\") }"),
        "{ a \n b(x: \"#keep\") }",
    );
}
