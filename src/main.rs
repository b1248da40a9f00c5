use std::{collections::HashSet, path::PathBuf, sync::Arc};

use clap::Parser;
use taggers::{
    dataset::split_sentences,
    evaluation::{accuracy, apply_tagger, average_accuracy, precision_recall_fmeasure, tag_list},
    most_common_tag,
    tagger::{DefaultTagger, LookupTagger},
    ConfusionMatrix, Corpus, Evaluation, ExperimentConfig, FormatOptions, JsonReporter, Reporter, TaggedCorpus,
    TaggedSentence, Tagger, TrainingData,
};

/// Train a series of part-of-speech taggers on one category of a
/// Brown-format corpus and compare them on every category
#[derive(Debug, Parser)]
#[command(version)]
struct Argv {
    /// directory holding cats.txt and the tagged files
    #[arg(short, long, value_name = "DIR")]
    corpus: PathBuf,
    /// read experiment settings from a JSON file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// directory the charts and matrices are written to
    #[arg(short, long, default_value = "images")]
    output: PathBuf,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let argv = Argv::parse();
    let level = match argv.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
    log::debug!("argv: {:?}", argv);

    if let Err(e) = run(&argv) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(argv: &Argv) -> taggers::Result<()> {
    let config = match &argv.config {
        Some(path) => ExperimentConfig::from_path(path)?,
        None => ExperimentConfig::default(),
    };
    let corpus = Corpus::from_dir(&argv.corpus)?;
    let mut reporter = JsonReporter::new(&argv.output)?;

    for category in corpus.categories() {
        if let Some(tag) = most_common_tag(&corpus, category) {
            log::info!("most common tag in {category}: {tag}");
        }
    }

    let sents = corpus.tagged_sents(&config.category);
    let words = corpus.words(&config.category);
    let tagged_words = corpus.tagged_words(&config.category);
    let (train, test) = split_sentences(sents, config.train_ratio);
    log::info!("{}: {} training, {} test sentences", config.category, train.len(), test.len());
    let data = TrainingData { words: &words, tagged_words: &tagged_words, train_sents: train };
    let per_category: Vec<&[TaggedSentence]> = corpus
        .categories()
        .into_iter()
        .map(|c| corpus.tagged_sents(c))
        .filter(|s| !s.is_empty())
        .collect();

    // default tagger, confusion matrix on the training category
    let default_tagger = DefaultTagger::new(config.default_tag.as_str());
    let gold = tag_list(sents);
    let tagged = apply_tagger(&default_tagger, sents)?;
    let cm = ConfusionMatrix::new(&gold, &tag_list(&tagged))?;
    let opts = FormatOptions { sort_by_count: true, show_percents: true, truncate: Some(config.confusion_truncate) };
    let text = cm.pretty_format(&opts);
    println!("{text}");
    reporter.confusion(&text, "default-confusion")?;

    // each prefix of the backoff chain
    let chain = config.backoff_chain();
    let mut labels = Vec::new();
    let mut held_out = Vec::new();
    let mut averages = Vec::new();
    for end in 1..=chain.len() {
        let tagger = taggers::compose_specs(&chain[..end], &data)?;
        let label = chain[..end].iter().map(|s| s.label()).collect::<Vec<_>>().join("+");
        let acc = accuracy(tagger.as_ref(), test)?;
        let avg = average_accuracy(tagger.as_ref(), &per_category)?;
        log::info!("{label}: held-out accuracy {acc:.4}, average accuracy {avg:.4}");
        labels.push(chain[end - 1].label().to_string());
        held_out.push(acc);
        averages.push(avg);
    }
    reporter.bar(&labels, &held_out, "backoff-held-out")?;
    reporter.bar(&labels, &averages, "backoff-average")?;

    // lookup tagger with a growing model
    let fallback: Arc<dyn Tagger> = Arc::new(default_tagger);
    let mut sizes = Vec::new();
    let mut scores = Vec::new();
    for &size in &config.lookup_sizes {
        let tagger = LookupTagger::train(&words, &tagged_words, Some(fallback.clone()), size);
        let acc = accuracy(&tagger, sents)?;
        log::debug!("lookup {size}: {acc:.4}");
        sizes.push(size as f64);
        scores.push(acc);
    }
    reporter.line(&sizes, &scores, "lookup-sizes")?;

    // the full model in detail
    let tagger = taggers::compose_specs(&chain, &data)?;
    let mut evaluation = Evaluation::default();
    evaluation.accumulate_tagger(tagger.as_ref(), test)?;
    let est = evaluation.evaluate()?;
    println!("{evaluation}");
    let gold: HashSet<&str> = tag_list(test).into_iter().collect();
    let predicted_sents = apply_tagger(tagger.as_ref(), test)?;
    let predicted: HashSet<&str> = tag_list(&predicted_sents).into_iter().collect();
    let coverage = precision_recall_fmeasure(&gold, &predicted);
    log::info!("backoff model: accuracy {:.4}, macro F1 {:.4}", est.accuracy, est.fmeasure);
    log::info!(
        "tagset coverage: precision {:.4}, recall {:.4}, F1 {:.4}",
        coverage.precision,
        coverage.recall,
        coverage.fmeasure
    );
    Ok(())
}
