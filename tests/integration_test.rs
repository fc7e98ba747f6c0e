use quantread::engine::config::{Config, PacerConfig, WebConfig};
use quantread::input::{beam, Acquisition, DocumentSource, PdfExtractor, WebFetcher};
use quantread::reading::{split_at_midpoint, tokenize_text, Pacer, PacerState, StartOutcome};
use std::fs;
use std::io::Cursor;
use std::time::Duration;

#[test]
fn end_to_end_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("e2e.txt");
    fs::write(&path, "Hello world!\nThis is a <em>test</em> of the RSVP reader.").unwrap();

    let mut acquisition = Acquisition::new(PdfExtractor::new(), WebFetcher::new(WebConfig::default()));
    let document = acquisition.load_path(&path).expect("Should load file successfully");
    assert_eq!(document.source, DocumentSource::File("e2e.txt".to_string()));

    let mut pacer = Pacer::with_config(Config::default().pacer).unwrap();
    let count = pacer.load_text(&document.text).unwrap();
    assert_eq!(count, 10);
    assert_eq!(pacer.current_token().unwrap().as_str(), "Hello");

    assert_eq!(pacer.start(), StartOutcome::Started);
    pacer.advance_by(Duration::from_millis(200));
    assert_eq!(pacer.current_token().unwrap().as_str(), "world!");

    let split = split_at_midpoint(pacer.current_token().unwrap().as_str());
    assert_eq!((split.left, split.pivot, split.right), ("wor", "l", "d!"));

    for _ in 0..9 {
        pacer.advance_by(Duration::from_millis(200));
    }
    assert_eq!(pacer.state(), PacerState::Complete);
    assert_eq!(pacer.progress().fraction, 1.0);
    assert!(pacer.current_token().is_none());
}

#[test]
fn beam_feeds_the_pacer() {
    let input = "{\"type\":\"READY\"}\n{\"type\":\"QUANTREAD_BEAM\",\"text\":\"beamed article text\"}\n";
    let document = beam::receive(Cursor::new(input)).unwrap().unwrap();

    let mut pacer = Pacer::with_config(PacerConfig::default()).unwrap();
    pacer.load_text(&document.text).unwrap();
    assert_eq!(pacer.session().len(), 3);
    assert_eq!(pacer.state(), PacerState::Idle);
}

#[test]
fn tokenizer_round_trip_through_pacer() {
    let text = "\n\t  First words\tof  a passage ";
    let tokens = tokenize_text(text);
    let mut pacer = Pacer::with_config(PacerConfig::default()).unwrap();
    pacer.load_tokens(tokens);
    assert_eq!(pacer.current_token().unwrap().as_str(), "First");
}
