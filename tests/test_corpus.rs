use std::{fs, path::PathBuf};

use taggers::{
    evaluation::{apply_tagger, tag_list},
    tagger::DefaultTagger,
    ConfusionMatrix, Corpus, Error, ExperimentConfig, FormatOptions, TaggedCorpus,
};

fn brown_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("taggers-corpus-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("cats.txt"), "ca01 news\ncp01 fiction\nca02 news\n").unwrap();
    fs::write(dir.join("ca01"), "\n\n\tThe/at Fulton/np-tl County/nn-tl said/vbd ./.\n\n\n\tIt/pps said/vbd ./.\n").unwrap();
    fs::write(dir.join("ca02"), "\tThe/at jury/nn said/vbd ./.\n").unwrap();
    fs::write(dir.join("cp01"), "\tHe/pps ran/vbd home/nr ./.\n").unwrap();
    dir
}

#[test]
fn read_brown_layout() {
    let dir = brown_dir("layout");
    let corpus = Corpus::from_dir(&dir).unwrap();
    assert_eq!(corpus.categories(), vec!["news", "fiction"]);
    assert_eq!(corpus.tagged_sents("news").len(), 3);
    assert_eq!(corpus.words("fiction"), vec!["He", "ran", "home", "."]);
    assert_eq!(corpus.tagged_words("news")[1], ("Fulton", "NP-TL"));
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn missing_file() {
    let dir = brown_dir("missing");
    fs::remove_file(dir.join("cp01")).unwrap();
    assert!(matches!(Corpus::from_dir(&dir), Err(Error::Io(..))));
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn default_tagger_confusion() {
    let dir = brown_dir("confusion");
    let corpus = Corpus::from_dir(&dir).unwrap();
    let sents = corpus.tagged_sents("news");
    let tagged = apply_tagger(&DefaultTagger::new("NN"), sents).unwrap();
    let gold = tag_list(sents);
    let cm = ConfusionMatrix::new(&gold, &tag_list(&tagged)).unwrap();
    assert_eq!(cm.get("VBD", "NN"), 3);
    assert_eq!(cm.get("NN", "NN"), 1);
    let opts = FormatOptions { sort_by_count: true, show_percents: true, truncate: Some(3) };
    let text = cm.pretty_format(&opts);
    // VBD and . tie as the most frequent gold tags
    let rows: Vec<&str> = text.lines().filter(|l| l.contains('|') && !l.trim_start().starts_with('|')).collect();
    assert!(rows[0].trim_start().starts_with(". |"), "{text}");
    assert!(rows[1].trim_start().starts_with("VBD |"), "{text}");
    assert!(rows[2].trim_start().starts_with("AT |"), "{text}");
    assert_eq!(rows.len(), 3);
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn config_file() {
    let dir = brown_dir("config");
    let path = dir.join("config.json");
    fs::write(&path, r#"{"category": "fiction", "lookup_top_n": 10}"#).unwrap();
    let config = ExperimentConfig::from_path(&path).unwrap();
    assert_eq!(config.category, "fiction");
    assert_eq!(config.lookup_top_n, 10);

    fs::write(&path, r#"{"trigram_cutoff": -1}"#).unwrap();
    assert!(matches!(ExperimentConfig::from_path(&path), Err(Error::InvalidCutoff(-1))));
    fs::write(&path, "{").unwrap();
    assert!(matches!(ExperimentConfig::from_path(&path), Err(Error::Json(..))));
    fs::remove_dir_all(dir).unwrap();
}
