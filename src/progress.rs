//! Progress bar display for builds

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a multi-target build
pub struct ProgressDisplay {
    /// One tick per target
    target_pb: ProgressBar,
    /// Documents of the target being built
    document_pb: Option<ProgressBar>,
}

fn style(template: &str, chars: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(chars)
}

impl ProgressDisplay {
    /// Create a new progress display with total target count.
    /// Draws to stderr, which indicatif leaves blank when it is not a terminal.
    pub fn new(total_targets: u64) -> Self {
        let target_pb = ProgressBar::new(total_targets);
        target_pb.set_style(style("[{bar:40.cyan/blue}] {pos}/{len} {msg}", "#>-"));

        Self {
            target_pb,
            document_pb: None,
        }
    }

    /// Display that never draws
    pub fn hidden() -> Self {
        Self {
            target_pb: ProgressBar::hidden(),
            document_pb: None,
        }
    }

    /// Start a target with its document count
    pub fn start_target(&mut self, target: &str, total_documents: u64) {
        self.target_pb.set_message(target.to_string());

        if self.target_pb.is_hidden() {
            return;
        }
        let document_pb = ProgressBar::new(total_documents);
        document_pb.set_style(style(
            "  [{bar:40.green/yellow}] {pos}/{len} documents {msg}",
            "█▉▊▋▌▍▎▏  ",
        ));
        if let Some(previous) = self.document_pb.replace(document_pb) {
            previous.finish_and_clear();
        }
    }

    /// Record one document as done
    pub fn document_done(&self, name: &str) {
        if let Some(ref document_pb) = self.document_pb {
            document_pb.set_message(name.to_string());
            document_pb.inc(1);
        }
    }

    /// Finish the current target
    pub fn finish_target(&mut self) {
        if let Some(document_pb) = self.document_pb.take() {
            document_pb.finish_and_clear();
        }
        self.target_pb.inc(1);
    }

    /// Finish all progress
    pub fn finish(&self) {
        self.target_pb.finish_and_clear();
    }

    /// Abandon the current target's documents and move on
    pub fn fail_target(&mut self) {
        if let Some(document_pb) = self.document_pb.take() {
            document_pb.abandon();
        }
        self.target_pb.inc(1);
    }
}
