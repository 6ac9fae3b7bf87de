//! Progress reporting for a crawl.

use console::{Term, style};

use crate::crawl::CrawlSummary;

/// Receives the progress of a crawl.
///
/// `hits` is always the number of hits so far; a miss does not change it.
pub trait Reporter {
    fn attempt(&mut self, identifier: &str);

    fn hit(&mut self, identifier: &str, hits: u64);

    fn miss(&mut self, identifier: &str, hits: u64);

    /// Called once when the crawl stops for any reason. `summary` is `None`
    /// when a fatal error ended it.
    fn finish(&mut self, _summary: Option<&CrawlSummary>) {}
}

/// Reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuietReporter;

impl Reporter for QuietReporter {
    fn attempt(&mut self, _identifier: &str) {}

    fn hit(&mut self, _identifier: &str, _hits: u64) {}

    fn miss(&mut self, _identifier: &str, _hits: u64) {}
}

/// Prints `<id>=hit (N)` or `<id>=miss (N)`, one line per attempt, and a
/// closing tally when the crawl ends cleanly.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    term:      Term,
    line_open: bool,
}

impl ConsoleReporter {
    pub fn new(term: Term) -> Self {
        Self {
            term,
            line_open: false,
        }
    }

    pub fn stdout() -> Self { Self::new(Term::stdout()) }

    fn write(&mut self, text: &str, end_line: bool) {
        let result = if end_line {
            self.term.write_line(text)
        } else {
            self.term.write_str(text).and_then(|()| self.term.flush())
        };
        if let Err(e) = result {
            tracing::warn!("failed to print progress: {e}");
        }
        self.line_open = !end_line;
    }
}

impl Reporter for ConsoleReporter {
    fn attempt(&mut self, identifier: &str) { self.write(&format!("{identifier}="), false); }

    fn hit(&mut self, _identifier: &str, hits: u64) {
        self.write(&format!("{} ({hits})", style("hit").green().bold()), true);
    }

    fn miss(&mut self, _identifier: &str, hits: u64) {
        self.write(&format!("{} ({hits})", style("miss").dim()), true);
    }

    fn finish(&mut self, summary: Option<&CrawlSummary>) {
        if self.line_open {
            self.write("", true);
        }
        if let Some(summary) = summary {
            self.write(&style(summary_line(summary)).dim().to_string(), true);
        }
    }
}

fn summary_line(summary: &CrawlSummary) -> String {
    let mut line = format!(
        "{} tried, {} hit, {} missed",
        summary.attempts, summary.hits, summary.misses
    );
    if summary.interrupted {
        line.push_str(" (interrupted)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts() {
        let summary = CrawlSummary {
            attempts:    3,
            hits:        1,
            misses:      2,
            interrupted: false,
        };
        assert_eq!(summary_line(&summary), "3 tried, 1 hit, 2 missed");
    }

    #[test]
    fn summary_marks_interruption() {
        let summary = CrawlSummary {
            attempts:    1,
            interrupted: true,
            ..Default::default()
        };
        assert_eq!(summary_line(&summary), "1 tried, 0 hit, 0 missed (interrupted)");
    }
}
