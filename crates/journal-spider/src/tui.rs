use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress of one `send_data` pass over a fetched calendar.
///
/// Every record ticks `total`; written tasks (created or modified) tick `success`, and tasks that
/// failed to serialize or upsert tick `fails`. Records the store answered with an unusable id only
/// tick `total`.
pub struct SyncProgress {
    multi: Option<MultiProgress>,
    total: ProgressBar,
    success: ProgressBar,
    fails: ProgressBar,
}

impl SyncProgress {
    /// Visible bars for a calendar of `len` records.
    pub fn new(len: usize) -> anyhow::Result<Self> {
        // one bar per outcome, stacked under the calendar total
        let multi = MultiProgress::new();

        // records handed to the store
        let total = multi.add(
            ProgressBar::new(len as u64).with_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.magenta}\n \
                            {msg:>9.white} |{bar:57.white/grey}| {pos:<2} / {human_len} \
                            ({percent_precise}%) [Time: {elapsed}, Rate: {per_sec}, ETA: {eta}]",
                    )?
                    .progress_chars("## "),
            ),
        );
        total.set_message("tasks");
        total.enable_steady_tick(Duration::from_millis(100));

        // tasks created or modified by the upsert
        let success = multi.insert_after(
            &total,
            ProgressBar::new(len as u64).with_style(
                ProgressStyle::default_bar()
                    .template(" {msg:>9.green} |{bar:57.green}| {pos:<2.green}")?
                    .progress_chars("## "),
            ),
        );
        success.set_message("upserted");

        // tasks listed in `SyncReport::failed`
        let fails = multi.insert_after(
            &success,
            ProgressBar::new(len as u64).with_style(
                ProgressStyle::default_bar()
                    .template(" {msg:>9.red} |{bar:57.red}| {pos:<2.red}")?
                    .progress_chars("## "),
            ),
        );
        fails.set_message("failed");

        Ok(Self {
            multi: Some(multi),
            total,
            success,
            fails,
        })
    }

    /// Bars that draw nothing.
    pub fn hidden() -> Self {
        Self {
            multi: None,
            total: ProgressBar::hidden(),
            success: ProgressBar::hidden(),
            fails: ProgressBar::hidden(),
        }
    }

    pub(crate) fn success(&self) {
        self.total.inc(1);
        self.success.inc(1);
    }

    pub(crate) fn fail(&self) {
        self.total.inc(1);
        self.fails.inc(1);
    }

    pub(crate) fn skip(&self) {
        self.total.inc(1);
    }

    pub(crate) fn finish(&self) {
        self.total.finish_and_clear();
        self.success.finish_and_clear();
        self.fails.finish_and_clear();
        if let Some(multi) = &self.multi {
            multi.clear().ok();
        }
    }
}
