use std::{
    fs::{self, File},
    io::BufWriter,
    path::PathBuf,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Sink for experiment results.
pub trait Reporter {
    fn bar(&mut self, labels: &[String], values: &[f64], id: &str) -> Result<()>;
    fn line(&mut self, xs: &[f64], ys: &[f64], id: &str) -> Result<()>;
    fn confusion(&mut self, text: &str, id: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

/// Writes each chart as `<dir>/<id>.json` and each matrix as `<dir>/<id>.txt`.
#[derive(Debug)]
pub struct JsonReporter {
    dir: PathBuf,
}

impl JsonReporter {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn write<T: Serialize>(&self, value: &T, id: &str) -> Result<()> {
        let path = self.dir.join(format!("{id}.json"));
        serde_json::to_writer_pretty(BufWriter::new(File::create(&path)?), value)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

impl Reporter for JsonReporter {
    fn bar(&mut self, labels: &[String], values: &[f64], id: &str) -> Result<()> {
        if labels.len() != values.len() {
            return Err(Error::LengthMismatch { gold: labels.len(), predicted: values.len() });
        }
        let chart = BarChart {
            title: "Average Accuracy Achieved on each Category".to_string(),
            x_label: "Taggers".to_string(),
            y_label: "Accuracy Achieved".to_string(),
            labels: labels.to_vec(),
            values: values.to_vec(),
        };
        self.write(&chart, id)
    }

    fn line(&mut self, xs: &[f64], ys: &[f64], id: &str) -> Result<()> {
        if xs.len() != ys.len() {
            return Err(Error::LengthMismatch { gold: xs.len(), predicted: ys.len() });
        }
        let chart = LineChart {
            title: "Lookup Tagger Performance with Varying Model Size".to_string(),
            x_label: "Model Size".to_string(),
            y_label: "Accuracy Achieved".to_string(),
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        };
        self.write(&chart, id)
    }

    fn confusion(&mut self, text: &str, id: &str) -> Result<()> {
        let path = self.dir.join(format!("{id}.txt"));
        fs::write(&path, text)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}
