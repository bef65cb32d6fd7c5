//! Progress bar adapter using indicatif.

use cbir_core::{ProgressEvent, ProgressSink};
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress bar adapter for CLI output.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
    quiet: bool,
}

impl ProgressBar {
    /// Creates a new progress bar.
    ///
    /// # Arguments
    ///
    /// * `total` - Total number of candidates, if known
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, show progress bar; otherwise only report failures
    #[must_use]
    pub fn new(total: Option<u64>, quiet: bool, show_bar: bool) -> Self {
        if quiet {
            return Self {
                bar: None,
                quiet: true,
            };
        }

        let bar = if show_bar {
            let bar = total.map_or_else(IndicatifBar::new_spinner, IndicatifBar::new);

            if let Ok(style) = ProgressStyle::default_bar().template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            ) {
                bar.set_style(style.progress_chars("#>-"));
            }

            Some(bar)
        } else {
            None
        };

        Self { bar, quiet }
    }
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        if self.quiet {
            return;
        }

        match event {
            ProgressEvent::Started { id, index, total } => {
                if let Some(bar) = &self.bar {
                    bar.set_length(total as u64);
                    bar.set_position(index as u64);
                    bar.set_message(id);
                }
            }
            ProgressEvent::Scored { .. } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                }
            }
            ProgressEvent::Failed { id, reason } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                    bar.suspend(|| eprintln!("WARN: Skipping {id}: {reason}"));
                } else {
                    eprintln!("WARN: Skipping {id}: {reason}");
                }
            }
            ProgressEvent::Finished { scored, failed } => {
                if let Some(bar) = &self.bar {
                    bar.finish_with_message(format!("Done: {scored} scored, {failed} skipped"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_ignores_events() {
        let progress = ProgressBar::new(Some(3), true, true);
        assert!(progress.bar.is_none());
        progress.on_event(ProgressEvent::Failed {
            id: "x.png".to_string(),
            reason: "too small".to_string(),
        });
    }

    #[test]
    fn test_bar_tracks_position() {
        let progress = ProgressBar::new(None, false, true);
        progress.on_event(ProgressEvent::Started {
            id: "a.png".to_string(),
            index: 0,
            total: 2,
        });
        progress.on_event(ProgressEvent::Scored {
            id: "a.png".to_string(),
            score: 0.5,
        });

        let bar = progress.bar.as_ref().map(|b| (b.position(), b.length()));
        assert_eq!(bar, Some((1, Some(2))));
    }
}
