use mdabbr_lib::tokenize;
use proptest::prelude::*;

fn slice_chars(line: &str, start: usize, len: usize) -> String {
    line.chars().skip(start).take(len).collect()
}

proptest! {
    #[test]
    fn tokenizing_twice_gives_the_same_tokens(line in r"[A-Za-z0-9 `$\[\]()#^\\*_.,:中文]{0,40}") {
        prop_assert_eq!(tokenize(&line), tokenize(&line));
    }

    #[test]
    fn tokens_are_substrings_of_the_line(line in r"[A-Za-z0-9 `$\[\]()#^\\*_.,:中文]{0,40}") {
        let tokens = tokenize(&line);

        for token in &tokens {
            let len = token.text.chars().count();
            prop_assert!(len > 0);
            prop_assert_eq!(slice_chars(&line, token.position, len), token.text.clone());
            prop_assert!(!token.text.contains(char::is_whitespace));
        }
    }

    #[test]
    fn token_positions_increase(line in r"[A-Za-z `$\[\]()#]{0,40}") {
        let tokens = tokenize(&line);
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].position + pair[0].text.chars().count() <= pair[1].position);
        }
    }

    #[test]
    fn plain_words_are_all_found(words in prop::collection::vec("[A-Za-z]{1,8}", 1..8)) {
        let line = words.join(" ");
        let tokens: Vec<String> = tokenize(&line).into_iter().map(|t| t.text).collect();
        prop_assert_eq!(tokens, words);
    }

    #[test]
    fn inline_code_content_is_dropped(word in "[A-Z]{2,6}") {
        let line = format!("`{word}`");
        prop_assert!(tokenize(&line).is_empty());
    }
}
