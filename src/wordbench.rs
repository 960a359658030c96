//! A word-frequency workbench: reads text files into a histogram and writes
//! it out as a report.
//!
//! # Examples
//!
//! ```
//! use llrb_tree::wordbench::WordBench;
//! use llrb_tree::ColumnLayout;
//!
//! let mut bench = WordBench::new();
//! bench.read_from("It was the best of times, it was the worst of times.".as_bytes(), "dickens.txt")?;
//!
//! let summary = bench.summary();
//! assert_eq!(summary.words_read(), 12);
//! assert_eq!(summary.vocabulary(), 7);
//!
//! let mut report = Vec::new();
//! bench.write_report_to(&mut report, &ColumnLayout::new(6, 3))?;
//! assert!(String::from_utf8(report)?.contains("times   2\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::wordify::tokens;
use crate::{ColumnLayout, LLRBTreeMap};

/// Errors raised by [`WordBench`] file operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WordBenchError {
    /// A file could not be opened or created.
    #[error("cannot open file {}", .path.display())]
    Open {
        /// The file that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading input or writing a report failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Formatting the report failed.
    #[error("failed to format report")]
    Format(#[from] fmt::Error),
}

/// Word frequencies collected from one or more text sources.
#[derive(Clone, Debug, Default)]
pub struct WordBench {
    frequency: LLRBTreeMap<String, usize>,
    count: usize,
    infiles: Vec<PathBuf>,
}

/// Totals reported by [`WordBench::summary`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Summary<'a> {
    files: &'a [PathBuf],
    words_read: usize,
    vocabulary: usize,
}

impl Summary<'_> {
    /// The sources read, in reading order.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        self.files
    }

    /// Words read across every source, repeats included.
    #[must_use]
    pub fn words_read(&self) -> usize {
        self.words_read
    }

    /// Distinct words read.
    #[must_use]
    pub fn vocabulary(&self) -> usize {
        self.vocabulary
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Current files:")?;
        for file in self.files {
            write!(f, " {}", file.display())?;
        }
        writeln!(f)?;
        writeln!(f, "Total words read: {}", self.words_read)?;
        write!(f, "Vocabulary size:  {}", self.vocabulary)
    }
}

impl WordBench {
    /// Creates a workbench with no data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the histogram.
    #[must_use]
    pub fn frequency(&self) -> &LLRBTreeMap<String, usize> {
        &self.frequency
    }

    /// Reads the file at `path` and counts its words.
    ///
    /// Returns the number of words read from this file.
    ///
    /// # Errors
    ///
    /// Returns [`WordBenchError::Open`] if the file cannot be opened, leaving
    /// the workbench unchanged, or [`WordBenchError::Io`] if reading fails
    /// part way through.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn read_text(&mut self, path: impl AsRef<Path>) -> Result<usize, WordBenchError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| WordBenchError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_from(BufReader::new(file), path)
    }

    /// Reads text from `reader`, recording it under the name `source`.
    ///
    /// Input need not be UTF-8; anything outside ASCII is junk to
    /// [`wordify`](crate::wordify::wordify) anyway.
    ///
    /// # Errors
    ///
    /// Returns [`WordBenchError::Io`] if reading fails. Words read before the
    /// failure stay counted.
    pub fn read_from<R: BufRead>(&mut self, mut reader: R, source: impl Into<PathBuf>) -> Result<usize, WordBenchError> {
        let source = source.into();
        let mut line = Vec::new();
        let mut words_read = 0;
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            for word in tokens(&String::from_utf8_lossy(&line)) {
                *self.frequency.get(word) += 1;
                words_read += 1;
            }
        }
        self.count += words_read;
        info!(source = %source.display(), words_read, "read text");
        self.infiles.push(source);
        Ok(words_read)
    }

    /// Writes the report to the file at `path`, creating or truncating it.
    ///
    /// Returns false, without touching `path`, when no source has been read.
    ///
    /// # Errors
    ///
    /// Returns [`WordBenchError::Open`] if the file cannot be created, or
    /// [`WordBenchError::Io`] if writing fails.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn write_report(&self, path: impl AsRef<Path>, layout: &ColumnLayout) -> Result<bool, WordBenchError> {
        let path = path.as_ref();
        if self.infiles.is_empty() {
            info!("no files in read list, leaving report unopened");
            return Ok(false);
        }
        let file = File::create(path).map_err(|source| WordBenchError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write_report_to(&mut writer, layout)?;
        writer.flush()?;
        Ok(true)
    }

    /// Writes the report to `writer`: the sources read, one line per word
    /// with its count in `layout`, then the totals.
    ///
    /// Returns false, writing nothing, when no source has been read.
    ///
    /// # Errors
    ///
    /// Returns [`WordBenchError::Io`] if writing fails.
    pub fn write_report_to<W: Write>(&self, writer: &mut W, layout: &ColumnLayout) -> Result<bool, WordBenchError> {
        if self.infiles.is_empty() {
            return Ok(false);
        }
        let mut columns = String::new();
        self.frequency.write_columns(&mut columns, layout)?;
        write!(writer, "Text analysis of files:")?;
        for file in &self.infiles {
            write!(writer, " {}", file.display())?;
        }
        writeln!(writer, "\n")?;
        writer.write_all(columns.as_bytes())?;
        writeln!(writer)?;
        writeln!(writer, "Number of words:  {}", self.count)?;
        writeln!(writer, "Vocabulary size:  {}", self.frequency.len())?;
        debug!(entries = self.frequency.len(), "wrote report");
        Ok(true)
    }

    /// Returns the current totals.
    #[must_use]
    pub fn summary(&self) -> Summary<'_> {
        Summary {
            files: &self.infiles,
            words_read: self.count,
            vocabulary: self.frequency.len(),
        }
    }

    /// Forgets every word and every source read.
    pub fn clear_data(&mut self) {
        self.frequency.clear();
        self.count = 0;
        self.infiles.clear();
        debug!("current data erased");
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    fn bench_with(text: &str) -> WordBench {
        let mut bench = WordBench::new();
        bench.read_from(text.as_bytes(), "input.txt").unwrap();
        bench
    }

    #[test]
    fn counts_repeated_words() {
        let bench = bench_with("a rose is a rose\nis a ROSE.");
        assert_eq!(bench.frequency().find(&"rose".to_string()), Some(&3));
        assert_eq!(bench.frequency().find(&"a".to_string()), Some(&3));
        assert_eq!(bench.summary().words_read(), 8);
        assert_eq!(bench.summary().vocabulary(), 3);
    }

    #[test]
    fn invalid_utf8_is_junk() {
        let mut bench = WordBench::new();
        let read = bench.read_from(&b"caf\xe9 ok\n"[..], "latin1.txt").unwrap();
        assert_eq!(read, 2);
        assert!(bench.frequency().contains_key(&"caf".to_string()));
    }

    #[test]
    fn report_lists_words_in_order() {
        let bench = bench_with("b a b");
        let mut out = Vec::new();
        assert!(bench.write_report_to(&mut out, &ColumnLayout::new(3, 2)).unwrap());
        let expected = "Text analysis of files: input.txt\n\na   1\nb   2\n\nNumber of words:  3\nVocabulary size:  2\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn report_without_sources_writes_nothing() {
        let bench = WordBench::new();
        let mut out = Vec::new();
        assert!(!bench.write_report_to(&mut out, &ColumnLayout::default()).unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn summary_display() {
        let mut bench = bench_with("one two");
        bench.read_from("two".as_bytes(), "more.txt").unwrap();
        assert_eq!(
            bench.summary().to_string(),
            "Current files: input.txt more.txt\nTotal words read: 3\nVocabulary size:  2"
        );
    }

    #[test]
    fn clear_forgets_everything() {
        let mut bench = bench_with("some words here");
        bench.clear_data();
        assert!(bench.frequency().is_empty());
        assert_eq!(bench.summary().words_read(), 0);
        assert!(bench.summary().files().is_empty());
    }
}
