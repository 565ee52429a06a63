//! Integration tests for the lemmatizer plugin.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crowd_lemmatizer::analysis::morphology::{DictionaryMorphology, EnglishMorphology};
use crowd_lemmatizer::prelude::*;
use serde_json::json;

/// Deterministic analyzer that tags every lemma with the word and its POS.
struct EchoMorphology;

impl Morphology for EchoMorphology {
    fn lemma(&self, word: &str, pos: Option<&str>) -> Result<String> {
        Ok(format!("{}:{}", word.to_lowercase(), pos.unwrap_or("-")))
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

fn mixed_tokens() -> Vec<Token> {
    vec![
        Token::new("Cats", 0).with_pos("NNS"),
        Token::new("and", 1).with_pos("CC").stop(),
        Token::new("dogs", 2).with_pos("NNS").with_lemma("preset"),
        Token::new("of", 3).with_pos("IN").stop().with_lemma("stop-preset"),
        Token::new("ran", 4).with_pos("VBD"),
    ]
}

fn echo_plugin() -> LemmatizerPlugin {
    LemmatizerPlugin::with_morphology(Arc::new(EchoMorphology))
}

#[test]
fn test_stop_words_untouched_in_every_mode() -> Result<()> {
    let plugin = echo_plugin();

    for config in [json!({"calculate": "all"}), json!({"calculate": "new"}), json!(null)] {
        let operator = plugin.operator(Some(plugin.build_config(&config)?));
        let message = operator.call(Message::new("m").with_tokens(mixed_tokens()))?;
        let tokens = message.tokens().unwrap();

        assert_eq!(tokens[1].lemma(), None);
        assert_eq!(tokens[3].lemma(), Some("stop-preset"));
    }
    Ok(())
}

#[test]
fn test_all_mode_assigns_analyzer_output() -> Result<()> {
    let plugin = echo_plugin();
    let operator = plugin.operator(Some(LemmatizerConfig::new(CalculationMode::All)));

    let message = operator.call(Message::new("m").with_tokens(mixed_tokens()))?;
    let tokens = message.tokens().unwrap();

    assert_eq!(tokens[0].lemma(), Some("cats:NNS"));
    assert_eq!(tokens[2].lemma(), Some("dogs:NNS"));
    assert_eq!(tokens[4].lemma(), Some("ran:VBD"));
    Ok(())
}

#[test]
fn test_new_mode_only_fills_missing() -> Result<()> {
    let plugin = echo_plugin();
    let operator = plugin.operator(Some(LemmatizerConfig::new(CalculationMode::New)));

    let message = operator.call(Message::new("m").with_tokens(mixed_tokens()))?;
    let tokens = message.tokens().unwrap();

    assert_eq!(tokens[0].lemma(), Some("cats:NNS"));
    assert_eq!(tokens[2].lemma(), Some("preset"));
    assert_eq!(tokens[4].lemma(), Some("ran:VBD"));
    Ok(())
}

#[test]
fn test_message_identity_is_preserved() -> Result<()> {
    let plugin = LemmatizerPlugin::new();
    let message = Message::new("m42")
        .with_text("Cats ran")
        .with_language("en")
        .with_tokens(mixed_tokens());

    let result = plugin.single_item_process(message.clone())?;

    assert_eq!(result.id, message.id);
    assert_eq!(result.text, message.text);
    assert_eq!(result.language, message.language);
    assert_eq!(result.token_count(), message.token_count());
    let tokens = result.tokens().unwrap();
    assert_eq!(tokens[0].lemma(), Some("cat"));
    assert_eq!(tokens[4].lemma(), Some("run"));
    Ok(())
}

#[test]
fn test_empty_and_missing_token_lists() -> Result<()> {
    let plugin = echo_plugin();
    let operator = plugin.operator(None);

    let missing = operator.call(Message::new("none"))?;
    assert!(missing.tokens.is_none());

    let empty = operator.call(Message::new("empty").with_tokens(Vec::new()))?;
    assert_eq!(empty.token_count(), 0);
    assert!(empty.tokens.is_some());
    Ok(())
}

#[test]
fn test_analyzer_errors_reach_the_caller() {
    let mut dictionary = DictionaryMorphology::new();
    dictionary.insert_tagged("geese", "NNS", "goose");
    let plugin = LemmatizerPlugin::with_morphology(Arc::new(dictionary));
    let operator = plugin.operator(None);

    let ok = operator
        .call(Message::new("a").with_tokens(vec![Token::new("geese", 0).with_pos("NNS")]))
        .unwrap();
    assert_eq!(ok.tokens().unwrap()[0].lemma(), Some("goose"));

    let err = operator
        .call(Message::new("b").with_tokens(vec![Token::new("ducks", 0).with_pos("NNS")]))
        .unwrap_err();
    assert!(matches!(err, LemmatizeError::Morphology(_)));
}

#[test]
fn test_shared_analyzer_is_created_once_across_threads() {
    let created = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&created);
    let plugin = LemmatizerPlugin::with_factory(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(EnglishMorphology::new()) as Arc<dyn Morphology>)
    });

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let operator = plugin.operator(None);
            thread::spawn(move || {
                let message = Message::new(format!("m{i}"))
                    .with_tokens(vec![Token::new("stopped", 0).with_pos("VBD")]);
                operator.call(message)
            })
        })
        .collect();

    for handle in handles {
        let message = handle.join().unwrap().unwrap();
        assert_eq!(message.tokens().unwrap()[0].lemma(), Some("stop"));
    }
    assert_eq!(created.load(Ordering::SeqCst), 1);
}

#[test]
fn test_parallel_batch_matches_sequential() -> Result<()> {
    let plugin = LemmatizerPlugin::new();
    let operator =
        plugin.operator(Some(LemmatizerConfig::from_json_str(r#"{"calculate":"new"}"#)?));

    let messages: Vec<Message> = (0..100)
        .map(|i| Message::new(format!("m{i}")).with_tokens(mixed_tokens()))
        .collect();

    let sequential = operator
        .call_stream(messages.clone())
        .collect::<Result<Vec<_>>>()?;
    let parallel = operator.call_batch(messages)?;

    assert_eq!(sequential, parallel);
    Ok(())
}
