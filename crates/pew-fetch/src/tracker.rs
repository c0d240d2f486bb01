use indicatif::{ProgressBar, ProgressStyle};

pub trait TrackerBuilder<T: Tracker<U>, U> {
    fn build(self) -> T;
}

pub trait Tracker<Inc> {
    fn step(&self, step: Inc) -> &Self;
    fn finish(self);
    fn abandon(self);
}

const BAR_STYLE: &str = "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const SPINNER_STYLE: &str = "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {bytes} ({bytes_per_sec})";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

fn style(template: &str) -> Option<ProgressStyle> {
    ProgressStyle::with_template(template)
        .ok()
        .map(|s| s.tick_chars(TICK).progress_chars(PB_CHARS))
}

/// Byte-driven progress display on stderr.
pub struct ProgressTracker {
    pb: ProgressBar,
}

impl ProgressTracker {
    pub fn position(&self) -> u64 {
        self.pb.position()
    }

    pub fn length(&self) -> Option<u64> {
        self.pb.length()
    }
}

impl Tracker<u64> for ProgressTracker {
    fn step(&self, len: u64) -> &Self {
        self.pb.inc(len);
        self
    }

    fn finish(self) {
        self.pb.finish();
    }

    fn abandon(self) {
        self.pb.abandon();
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgressTrackerBuilder {
    len: Option<u64>,
    prefix: Option<String>,
    hidden: bool,
}

impl ProgressTrackerBuilder {
    pub fn with_len(mut self, len: u64) -> Self {
        self.len = Some(len);
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// Track without drawing anything.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

impl TrackerBuilder<ProgressTracker, u64> for ProgressTrackerBuilder {
    fn build(self) -> ProgressTracker {
        let (pb, template) = match self.len {
            Some(len) => (ProgressBar::new(len), BAR_STYLE),
            None => (ProgressBar::no_length(), SPINNER_STYLE),
        };
        let pb = match style(template) {
            Some(style) => pb.with_style(style),
            None => pb,
        };
        if self.hidden {
            pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
        }
        if let Some(prefix) = self.prefix {
            pb.set_prefix(prefix);
        }
        ProgressTracker { pb }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sized_tracker_counts_bytes() {
        let t = ProgressTrackerBuilder::default().with_len(10).hidden().build();
        t.step(4).step(3);
        assert_eq!(t.position(), 7);
        assert_eq!(t.length(), Some(10));
        t.finish();
    }

    #[test]
    fn test_unsized_tracker_is_indeterminate() {
        let t = ProgressTrackerBuilder::default().hidden().build();
        t.step(1024);
        assert_eq!(t.position(), 1024);
        assert_eq!(t.length(), None);
        t.abandon();
    }

    #[test]
    fn test_templates_parse() {
        assert!(style(BAR_STYLE).is_some());
        assert!(style(SPINNER_STYLE).is_some());
    }
}
