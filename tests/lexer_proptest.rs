//! Property-based tests for the lexer and the parser's tolerance
//!
//! The lexer must cover any text window exactly: token ranges start at the window start,
//! follow each other without gaps or overlaps, and end at the window end. The parser must
//! accept anything the lexer does.

use proptest::prelude::*;
use proptest::sample::Index;
use r_parser::r::lexing::{tokenize, tokenize_text, Token, TokenKind};
use r_parser::r::parsing::parse;

/// Pieces of R source, valid or not, that stress brackets, strings and comments
fn fragment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z.][a-zA-Z0-9._]{0,6}",
        "[0-9]{1,4}(\\.[0-9]{1,3})?L?",
        Just("if".to_string()),
        Just("else".to_string()),
        Just("function".to_string()),
        Just("for".to_string()),
        Just("in".to_string()),
        Just("TRUE".to_string()),
        Just("NULL".to_string()),
        Just("NA_integer_".to_string()),
        Just("<-".to_string()),
        Just("%in%".to_string()),
        Just("|>".to_string()),
        Just("::".to_string()),
        Just("$".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just("[[".to_string()),
        Just("]]".to_string()),
        Just(",".to_string()),
        Just(";".to_string()),
        Just("=".to_string()),
        Just("\n".to_string()),
        Just("\r\n".to_string()),
        Just(" ".to_string()),
        "\"[a-z ]{0,5}\"?",
        "'[a-z]{0,3}'?",
        "#[a-z ]{0,8}",
        "[+*/^<>!&|~?:@-]",
        "[`\\\\é∑]",
    ]
}

fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment_strategy(), 0..40).prop_map(|parts| parts.concat())
}

fn assert_covers(tokens: &[Token], start: usize, end: usize) {
    let mut offset = start;
    for token in tokens {
        assert_eq!(token.start, offset, "gap or overlap at {:?}", token);
        assert!(token.length > 0, "empty token {:?}", token);
        offset = token.end();
    }
    assert_eq!(offset, end);
}

/// Pick a char-boundary window of `text`
fn window(text: &str, a: Index, b: Index) -> (usize, usize) {
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let x = boundaries[a.index(boundaries.len())];
    let y = boundaries[b.index(boundaries.len())];
    (x.min(y), x.max(y))
}

proptest! {
    #[test]
    fn tokens_cover_whole_text(text in source_strategy()) {
        let tokens: Vec<Token> = tokenize_text(&text).collect();
        assert_covers(&tokens, 0, text.len());
    }

    #[test]
    fn tokens_cover_any_window(
        text in source_strategy(),
        a in any::<Index>(),
        b in any::<Index>(),
    ) {
        let (start, end) = window(&text, a, b);
        let tokens: Vec<Token> = tokenize(&text, start, end - start).collect();
        assert_covers(&tokens, start, end);
    }

    #[test]
    fn token_texts_reproduce_input(text in source_strategy()) {
        let tokens: Vec<Token> = tokenize_text(&text).collect();
        let rebuilt: String = tokens.iter().map(|token| token.text(&text)).collect();
        prop_assert_eq!(&rebuilt, &text);

        let retokenized: Vec<Token> = tokenize_text(&rebuilt).collect();
        prop_assert_eq!(retokenized, tokens);
    }

    #[test]
    fn tokenizing_is_restartable(text in source_strategy(), skip in 0usize..20) {
        let mut tokens = tokenize_text(&text);
        for _ in 0..skip {
            tokens.next();
        }
        let resumed: Vec<Token> = tokens.clone().collect();
        let rest: Vec<Token> = tokens.collect();
        prop_assert_eq!(&resumed, &rest);

        let again: Vec<Token> = tokenize_text(&text).collect();
        let first: Vec<Token> = tokenize_text(&text).collect();
        prop_assert_eq!(first, again);
    }

    #[test]
    fn arbitrary_text_is_covered(text in "\\PC{0,40}") {
        let tokens: Vec<Token> = tokenize_text(&text).collect();
        assert_covers(&tokens, 0, text.len());
    }

    #[test]
    fn parse_accepts_anything(text in source_strategy()) {
        let (ast, errors) = parse(&text);
        prop_assert!(ast.global_scope().is_some());
        for node in ast.nodes() {
            prop_assert!(node.range.end <= text.len());
        }
        for error in &errors {
            prop_assert!(error.token.end() <= text.len());
        }
    }

    #[test]
    fn comments_move_to_the_root(text in source_strategy()) {
        let (ast, _) = parse(&text);
        let expected: Vec<Token> = tokenize_text(&text)
            .filter(|token| token.kind == TokenKind::Comment)
            .collect();
        prop_assert_eq!(ast.comments(), expected.as_slice());
        prop_assert!(ast
            .comments()
            .windows(2)
            .all(|pair| pair[0].start < pair[1].start));
    }

    #[test]
    fn parents_list_their_children(text in source_strategy()) {
        let (ast, _) = parse(&text);
        for (index, node) in ast.nodes().iter().enumerate() {
            if let Some(parent) = node.parent {
                let children = ast.kind(parent).children();
                prop_assert!(children.iter().any(|child| child.index() == index));
            }
        }
    }
}
