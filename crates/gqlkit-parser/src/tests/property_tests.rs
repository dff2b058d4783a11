use crate::ParseErrorKind;
use crate::parse_document;
use crate::strip_ignored;
use crate::tokenize;
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,6}"
}

fn ignored() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(" ".to_string()),
        Just(",".to_string()),
        Just("\n".to_string()),
        Just("\t".to_string()),
        "#[ a-z{}]{0,8}\n",
    ]
}

fn document_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        name(),
        "\"[ a-z#]{0,6}\"",
        Just("{".to_string()),
        Just("}".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just(":".to_string()),
        ignored(),
    ]
}

proptest! {
    #[test]
    fn stripping_ignored_text_preserves_tokens(
        parts in prop::collection::vec(document_fragment(), 0..24),
    ) {
        let source = parts.join(" ");
        let stripped = strip_ignored(&source);

        let original = tokenize(&source).unwrap();
        let again = tokenize(&stripped).unwrap();
        prop_assert_eq!(original.len(), again.len());
        for (a, b) in original.iter().zip(again.iter()) {
            prop_assert!(a.same_lexeme(b), "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn repeated_response_key_is_always_rejected(
        mut keys in prop::collection::vec(name(), 1..6),
        dup_idx in 0usize..6,
        alias_dup in any::<bool>(),
    ) {
        keys.sort();
        keys.dedup();
        let dup_key = keys[dup_idx % keys.len()].clone();
        let duplicate =
            if alias_dup {
                format!("{dup_key}: other")
            } else {
                dup_key.clone()
            };

        let mut selections = keys.clone();
        selections.insert(dup_idx % (selections.len() + 1), duplicate);
        let source = format!("{{ {} }}", selections.join(" "));

        let err = parse_document(&source).unwrap_err();
        prop_assert_eq!(
            err.kind(),
            &ParseErrorKind::DuplicateSelection { key: dup_key },
        );
    }
}
