use textindex::tokenizer::{tokenize, words};

#[test]
fn it_lowercases_and_strips_punctuation() {
    let toks = tokenize("Running, RUNNER'S run! (The end.)");
    assert_eq!(toks, vec!["running", "runners", "run", "the", "end"]);
}

#[test]
fn it_keeps_non_ascii_punctuation_and_letters() {
    // Only ASCII punctuation is stripped; other characters survive lowercased.
    let toks = tokenize("Café — «Menu»");
    assert_eq!(toks, vec!["café", "—", "«menu»"]);
}

#[test]
fn it_is_deterministic_and_aligned_with_words() {
    let text = "  A b,  c!\n\td -- e ";
    assert_eq!(tokenize(text), tokenize(text));
    let terms: Vec<String> = words(text).into_iter().map(|w| w.term).collect();
    assert_eq!(terms, tokenize(text));
}
