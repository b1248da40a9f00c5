use std::{
    collections::{HashMap, HashSet},
    fmt::{self, Display},
    hash::Hash,
    iter::zip,
};

use crate::{
    dataset::{untag, TaggedSentence},
    tagger::Tagger,
    Error, Result,
};

/// Gold tags of `sents`, flattened.
pub fn tag_list(sents: &[TaggedSentence]) -> Vec<&str> {
    sents.iter().flatten().map(|(_, tag)| tag.as_str()).collect()
}

/// Strips the gold tags of every sentence and tags it again.
pub fn apply_tagger(tagger: &dyn Tagger, sents: &[TaggedSentence]) -> Result<Vec<TaggedSentence>> {
    sents.iter().map(|sent| tagger.tag(&untag(sent))).collect()
}

/// Fraction of tokens of `gold` that `tagger` tags like the gold standard.
pub fn accuracy(tagger: &dyn Tagger, gold: &[TaggedSentence]) -> Result<f64> {
    let mut n_match = 0;
    let mut n_total = 0;
    for sent in gold {
        let tags = tagger.tag_tokens(&untag(sent))?;
        n_match += zip(sent, tags).filter(|((_, g), p)| g.as_str() == *p).count();
        n_total += sent.len();
    }
    if n_total == 0 {
        return Err(Error::EmptyInput("no gold tokens"));
    }
    Ok(n_match as f64 / n_total as f64)
}

/// Unweighted mean of the per-category accuracies.
pub fn average_accuracy(tagger: &dyn Tagger, per_category: &[&[TaggedSentence]]) -> Result<f64> {
    if per_category.is_empty() {
        return Err(Error::EmptyInput("no categories"));
    }
    let mut sum = 0.0;
    for gold in per_category {
        let acc = accuracy(tagger, gold)?;
        log::debug!("{}: accuracy {acc:.4} on {} sentences", tagger.name(), gold.len());
        sum += acc;
    }
    Ok(sum / per_category.len() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetScores {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

/// Precision, recall and F1 over the sets of distinct tags.
///
/// This measures how much of the tagset the tagger covers, not how many
/// tokens it gets right: a tagger that emits every gold tag at least once
/// scores a perfect recall however often it is wrong. [`Evaluation`] holds
/// the token-level figures. Empty denominators give 0.
pub fn precision_recall_fmeasure<T: Eq + Hash>(gold: &HashSet<T>, predicted: &HashSet<T>) -> SetScores {
    let common = gold.intersection(predicted).count() as f64;
    let precision = if predicted.is_empty() { 0.0 } else { common / predicted.len() as f64 };
    let recall = if gold.is_empty() { 0.0 } else { common / gold.len() as f64 };
    let fmeasure = if precision + recall > 0.0 { 2.0 * precision * recall / (precision + recall) } else { 0.0 };
    SetScores { precision, recall, fmeasure }
}

#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Order tags by descending gold count, ties alphabetically, instead of first appearance.
    pub sort_by_count: bool,
    pub show_percents: bool,
    /// Keep only the first `n` tags.
    pub truncate: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { sort_by_count: true, show_percents: false, truncate: None }
    }
}

/// Counts of (gold, predicted) tag pairs.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    /// [gold][predicted]
    counts: Vec<Vec<usize>>,
    total: usize,
}

impl ConfusionMatrix {
    pub fn new<S: AsRef<str>>(gold: &[S], predicted: &[S]) -> Result<Self> {
        if gold.len() != predicted.len() {
            return Err(Error::LengthMismatch { gold: gold.len(), predicted: predicted.len() });
        }
        if gold.is_empty() {
            return Err(Error::EmptyInput("no tags to compare"));
        }
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut labels = Vec::new();
        for tag in gold.iter().chain(predicted) {
            let tag = tag.as_ref();
            if !index.contains_key(tag) {
                index.insert(tag.to_string(), labels.len());
                labels.push(tag.to_string());
            }
        }
        let mut counts = vec![vec![0; labels.len()]; labels.len()];
        for (g, p) in zip(gold, predicted) {
            counts[index[g.as_ref()]][index[p.as_ref()]] += 1;
        }
        Ok(Self { labels, index, counts, total: gold.len() })
    }

    pub fn get(&self, gold: &str, predicted: &str) -> usize {
        match (self.index.get(gold), self.index.get(predicted)) {
            (Some(&g), Some(&p)) => self.counts[g][p],
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Tags in first-seen order, gold tags before predicted-only ones.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of tokens whose gold tag is `label`.
    pub fn gold_count(&self, label: &str) -> usize {
        self.index.get(label).map(|&i| self.counts[i].iter().sum()).unwrap_or_default()
    }

    pub fn pretty_format(&self, opts: &FormatOptions) -> String {
        let mut order: Vec<usize> = (0..self.labels.len()).collect();
        if opts.sort_by_count {
            // alphabetical among equal counts
            order.sort_by(|&a, &b| self.labels[a].cmp(&self.labels[b]));
            order.sort_by_key(|&i| std::cmp::Reverse(self.counts[i].iter().sum::<usize>()));
        }
        if let Some(n) = opts.truncate {
            order.truncate(n);
        }

        let label_width = order.iter().map(|&i| self.labels[i].chars().count()).max().unwrap_or(1);
        let cell = |count: usize| -> String {
            if count == 0 {
                ".".to_string()
            } else if opts.show_percents {
                format!("{:.1}%", 100.0 * count as f64 / self.total as f64)
            } else {
                count.to_string()
            }
        };
        let cell_width = if opts.show_percents {
            6
        } else {
            order
                .iter()
                .flat_map(|&g| order.iter().map(move |&p| (g, p)))
                .map(|(g, p)| cell(self.counts[g][p]).len())
                .max()
                .unwrap_or(1)
        };

        let mut out = String::new();
        // column labels run top to bottom, right aligned
        let columns: Vec<Vec<char>> = order
            .iter()
            .map(|&i| {
                let label = &self.labels[i];
                let pad = label_width - label.chars().count();
                std::iter::repeat(' ').take(pad).chain(label.chars()).collect()
            })
            .collect();
        for row in 0..label_width {
            out.push_str(&format!("{:>label_width$} |", ""));
            for column in &columns {
                out.push_str(&format!(" {:>cell_width$} ", column[row]));
            }
            out.push_str("|\n");
        }
        let rule = format!("{}-+{}+\n", "-".repeat(label_width), "-".repeat(order.len() * (cell_width + 2)));
        out.push_str(&rule);
        for &g in &order {
            out.push_str(&format!("{:>label_width$} |", self.labels[g]));
            for &p in &order {
                let value = cell(self.counts[g][p]);
                if g == p {
                    out.push_str(&format!("<{value:>cell_width$}>"));
                } else {
                    out.push_str(&format!(" {value:>cell_width$} "));
                }
            }
            out.push_str("|\n");
        }
        out.push_str(&rule);
        out.push_str("(row = reference; col = test)\n");
        out
    }
}

impl Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_format(&FormatOptions::default()))
    }
}

/// Label-wise performance values.
#[derive(Debug, Default, Clone)]
struct LabelMeasure {
    /// Number of correct predictions.
    num_correct: usize,
    /** Number of occurrences of the label in the gold-standard data. */
    num_observation: usize,
    /** Number of predictions. */
    num_prediction: usize,
    precision: f64,
    recall: f64,
    fmeasure: f64,
}

/// Token-level performance of a tagger, per tag and overall.
#[derive(Debug, Default)]
pub struct Evaluation {
    tbl: HashMap<String, LabelMeasure>,

    /** Number of correctly predicted items. */
    item_total_correct: usize,
    /** Total number of items. */
    item_total_num: usize,
    /** Item-level accuracy. */
    pub item_accuracy: f64,

    /** Number of sentences tagged without a mistake. */
    inst_total_correct: usize,
    /** Total number of sentences. */
    inst_total_num: usize,
    /** Sentence-level accuracy. */
    pub inst_accuracy: f64,

    pub macro_precision: f64,
    pub macro_recall: f64,
    pub macro_fmeasure: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimation {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
    pub accuracy: f64,
}

impl Evaluation {
    /// Adds one sentence worth of gold and predicted tags.
    pub fn accumulate<R: AsRef<str>, P: AsRef<str>>(&mut self, reference: &[R], prediction: &[P]) -> Result<()> {
        if reference.len() != prediction.len() {
            return Err(Error::LengthMismatch { gold: reference.len(), predicted: prediction.len() });
        }
        let mut matched = 0;
        for (r, p) in zip(reference, prediction) {
            let (r, p) = (r.as_ref(), p.as_ref());
            self.tbl.entry(r.to_string()).or_default().num_observation += 1;
            self.tbl.entry(p.to_string()).or_default().num_prediction += 1;
            if r == p {
                self.tbl.entry(r.to_string()).or_default().num_correct += 1;
                matched += 1;
            }
            self.item_total_num += 1;
        }
        self.item_total_correct += matched;

        if matched == prediction.len() {
            self.inst_total_correct += 1;
        }
        self.inst_total_num += 1;
        Ok(())
    }

    /// Tags every gold sentence with `tagger` and accumulates the result.
    pub fn accumulate_tagger(&mut self, tagger: &dyn Tagger, gold: &[TaggedSentence]) -> Result<()> {
        for sent in gold {
            let prediction = tagger.tag_tokens(&untag(sent))?;
            let reference: Vec<&str> = sent.iter().map(|(_, tag)| tag.as_str()).collect();
            self.accumulate(&reference, &prediction)?;
        }
        Ok(())
    }

    /// Number of tags seen in the gold standard.
    pub fn num_labels(&self) -> usize {
        self.tbl.values().filter(|lev| lev.num_observation > 0).count()
    }

    pub fn evaluate(&mut self) -> Result<Estimation> {
        if self.item_total_num == 0 {
            return Err(Error::EmptyInput("nothing accumulated"));
        }
        self.macro_precision = 0.0;
        self.macro_recall = 0.0;
        self.macro_fmeasure = 0.0;
        for lev in self.tbl.values_mut() {
            if lev.num_observation == 0 {
                continue;
            }
            lev.precision = 0.0;
            lev.recall = 0.0;
            lev.fmeasure = 0.0;

            if lev.num_prediction > 0 {
                lev.precision = lev.num_correct as f64 / lev.num_prediction as f64;
            }
            lev.recall = lev.num_correct as f64 / lev.num_observation as f64;
            if lev.precision + lev.recall > 0.0 {
                lev.fmeasure = lev.precision * lev.recall * 2.0 / (lev.precision + lev.recall);
            }
            self.macro_precision += lev.precision;
            self.macro_recall += lev.recall;
            self.macro_fmeasure += lev.fmeasure;
        }

        let num_labels = self.num_labels() as f64;
        self.macro_precision /= num_labels;
        self.macro_recall /= num_labels;
        self.macro_fmeasure /= num_labels;

        self.item_accuracy = self.item_total_correct as f64 / self.item_total_num as f64;
        self.inst_accuracy = self.inst_total_correct as f64 / self.inst_total_num as f64;
        Ok(Estimation {
            precision: self.macro_precision,
            recall: self.macro_recall,
            fmeasure: self.macro_fmeasure,
            accuracy: self.item_accuracy,
        })
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Performance by label (#match, #model, #ref) (precision, recall, F1):")?;
        let mut labels: Vec<_> = self.tbl.iter().collect();
        labels.sort_by(|a, b| a.0.cmp(b.0));
        for (label, lev) in labels {
            if lev.num_observation == 0 {
                writeln!(f, "\t{}: ({}, {}, {}) (******, ******, ******)", label, lev.num_correct, lev.num_prediction, lev.num_observation)?;
            } else {
                writeln!(
                    f,
                    "\t{}: ({}, {}, {}) ({:.4}, {:.4}, {:.4})",
                    label, lev.num_correct, lev.num_prediction, lev.num_observation, lev.precision, lev.recall, lev.fmeasure
                )?;
            }
        }
        writeln!(f, "Macro-average precision, recall, F1: ({:.4}, {:.4}, {:.4})", self.macro_precision, self.macro_recall, self.macro_fmeasure)?;
        writeln!(f, "Item accuracy: {}/{} => {:.4}", self.item_total_correct, self.item_total_num, self.item_accuracy)?;
        writeln!(f, "Sentence accuracy: {}/{} => {:.4}", self.inst_total_correct, self.inst_total_num, self.inst_accuracy)
    }
}
