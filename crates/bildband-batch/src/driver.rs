// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch conversion driver.
//
// Lifecycle: Idle -> Running -> Completed | Cancelled. Subfolders are handled
// strictly one after another; images inside a subfolder likewise. Only an
// invalid job aborts a run. Every other failure becomes a result entry and
// the run moves on.

use std::collections::HashSet;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use bildband_core::config::{ConversionJob, NamingMode, PageOptions, TEMP_FILE_PREFIX};
use bildband_core::error::{BildbandError, Result};
use bildband_core::natural::natural_sort_by_key;
use bildband_core::traits::{PageCompositor, PdfAssembler};
use bildband_core::types::{BatchState, ConversionResult, ResultEntry, RunId, SubfolderTask};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, info_span, instrument, warn};

use crate::events::{BatchEvent, BatchObserver};
use crate::scanner;

/// Extension of intermediate page files.
const TEMP_FILE_SUFFIX: &str = ".jpg";

/// Turns every subfolder of a job's root into one PDF.
pub struct BatchDriver<C, A> {
    compositor: C,
    assembler: A,
    state: BatchState,
}

impl<C, A> BatchDriver<C, A>
where
    C: PageCompositor,
    A: PdfAssembler,
{
    pub fn new(compositor: C, assembler: A) -> Self {
        Self {
            compositor,
            assembler,
            state: BatchState::Idle,
        }
    }

    /// State of the current run, or the terminal state of the last one.
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Run one batch.
    ///
    /// Returns `Err` only for an invalid job (`BildbandError::Config`), before
    /// any subfolder is touched. Cancellation is not an error: the partial
    /// result comes back with state `Cancelled`.
    #[instrument(skip_all, fields(root = %job.root.display()))]
    pub fn run_batch(
        &mut self,
        job: ConversionJob,
        observer: &mut dyn BatchObserver,
    ) -> Result<ConversionResult> {
        job.validate()?;
        let mut subfolders = scanner::list_subfolders(&job.root).map_err(|err| {
            BildbandError::Config(format!("cannot list {}: {err}", job.root.display()))
        })?;
        natural_sort_by_key(&mut subfolders, |name| name.as_str());

        let run_id = RunId::new();
        let total = subfolders.len();
        let options = job.page_options();
        let mut result = ConversionResult::new(run_id, total);
        let mut written: HashSet<PathBuf> = HashSet::new();

        self.state = BatchState::Running;
        info!(%run_id, total, ?options, "batch started");
        observer.on_event(&BatchEvent::Started { run_id, total });

        for (index, name) in subfolders.iter().enumerate() {
            if observer.should_cancel() {
                info!(processed = result.processed(), total, "batch cancelled");
                result.finish(BatchState::Cancelled);
                self.state = BatchState::Cancelled;
                observer.on_event(&BatchEvent::Cancelled {
                    processed: result.processed(),
                    total,
                });
                return Ok(result);
            }

            let _span = info_span!("subfolder", name = %name).entered();
            observer.on_event(&BatchEvent::SubfolderStarted {
                index,
                total,
                name: name.clone(),
            });

            let entry = self.convert_subfolder(&job, name, &options, &mut written, observer);
            result.record(entry);
            observer.on_event(&BatchEvent::Progress {
                completed: index + 1,
                total,
            });
        }

        result.finish(BatchState::Completed);
        self.state = BatchState::Completed;
        info!(
            succeeded = result.succeeded,
            skipped = result.skipped,
            failed = result.failed,
            "batch completed"
        );
        observer.on_event(&BatchEvent::Finished {
            succeeded: result.succeeded,
            skipped: result.skipped,
            failed: result.failed,
        });
        Ok(result)
    }

    /// Convert one subfolder and describe how it went. Never fails: errors
    /// are folded into the returned entry.
    fn convert_subfolder(
        &self,
        job: &ConversionJob,
        name: &str,
        options: &PageOptions,
        written: &mut HashSet<PathBuf>,
        observer: &mut dyn BatchObserver,
    ) -> ResultEntry {
        let path = job.root.join(name);
        let mut images = match scanner::list_images(&path) {
            Ok(images) => images,
            Err(err) => {
                error!(error = %err, "cannot list images");
                return fail(name, err.to_string(), Vec::new(), observer);
            }
        };
        natural_sort_by_key(&mut images, file_name_of);

        if images.is_empty() {
            debug!("no images, skipping");
            let reason = "no images";
            observer.on_event(&BatchEvent::SubfolderSkipped {
                name: name.to_string(),
                reason: reason.to_string(),
            });
            return ResultEntry::skipped(name, reason);
        }

        let task = SubfolderTask {
            name: name.to_string(),
            output_path: job.output_path_for(name),
            path,
            images,
        };

        // Dropping a NamedTempFile deletes it, so every exit from this block
        // (including a panic in a collaborator) leaves no intermediate behind.
        let mut pages: Vec<NamedTempFile> = Vec::with_capacity(task.images.len());
        let mut failed_images = Vec::new();

        for image in &task.images {
            match self.prepare_page(&task.path, image, options) {
                Ok(page) => pages.push(page),
                Err(err) => {
                    warn!(image = %image.display(), error = %err, "image left out");
                    observer.on_event(&BatchEvent::ImageFailed {
                        subfolder: task.name.clone(),
                        path: image.clone(),
                        reason: err.to_string(),
                    });
                    failed_images.push(image.clone());
                }
            }
        }

        let page_count = pages.len();
        let outcome = self.write_pdf(&task.output_path, &pages);
        remove_pages(pages);

        match outcome {
            Ok(()) => {
                info!(output = %task.output_path.display(), pages = page_count, "PDF written");
                observer.on_event(&BatchEvent::SubfolderConverted {
                    name: task.name.clone(),
                    output: task.output_path.clone(),
                    pages: page_count,
                });
                if matches!(job.naming, NamingMode::Custom(_))
                    && !written.insert(task.output_path.clone())
                {
                    warn!(output = %task.output_path.display(), "custom-named PDF overwritten");
                    observer.on_event(&BatchEvent::OutputOverwritten {
                        name: task.name.clone(),
                        output: task.output_path.clone(),
                    });
                }
                ResultEntry::succeeded(task.name, task.output_path, page_count, failed_images)
            }
            Err(err) => {
                error!(error = %err, "subfolder failed");
                fail(&task.name, err.to_string(), failed_images, observer)
            }
        }
    }

    /// Compose one image into a fresh intermediate file inside `dir`.
    fn prepare_page(
        &self,
        dir: &Path,
        image: &Path,
        options: &PageOptions,
    ) -> Result<NamedTempFile> {
        let mut temp = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .suffix(TEMP_FILE_SUFFIX)
            .tempfile_in(dir)?;

        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            let page = self.compositor.compose(image, options, &mut writer)?;
            writer.flush()?;
            debug!(width = page.width, height = page.height, "page prepared");
        }

        Ok(temp)
    }

    fn write_pdf(&self, output: &Path, pages: &[NamedTempFile]) -> Result<()> {
        if pages.is_empty() {
            return Err(BildbandError::Assembly(
                "no pages could be prepared from any image".into(),
            ));
        }
        let paths: Vec<PathBuf> = pages.iter().map(|p| p.path().to_path_buf()).collect();
        let bytes = self.assembler.assemble(&paths)?;
        std::fs::write(output, bytes).map_err(|err| {
            BildbandError::Assembly(format!("cannot write {}: {err}", output.display()))
        })
    }
}

fn fail(
    name: &str,
    reason: String,
    failed_images: Vec<PathBuf>,
    observer: &mut dyn BatchObserver,
) -> ResultEntry {
    observer.on_event(&BatchEvent::SubfolderFailed {
        name: name.to_string(),
        reason: reason.clone(),
    });
    ResultEntry::failed(name, reason, failed_images)
}

fn remove_pages(pages: Vec<NamedTempFile>) {
    for page in pages {
        let path = page.path().to_path_buf();
        if let Err(err) = page.close() {
            warn!(path = %path.display(), error = %err, "failed to remove intermediate page");
        }
    }
}

fn file_name_of(path: &PathBuf) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bildband_core::config::Margins;
    use bildband_core::traits::PreparedPage;
    use bildband_core::types::Outcome;
    use std::cell::RefCell;
    use bildband_document::{MarginCompositor, PdfReader, PdfWriter};
    use image::{Rgb, RgbImage};
    use std::fs;

    /// Records every event and cancels once `cancel_after` subfolders have
    /// reported progress.
    #[derive(Default)]
    struct Recorder {
        events: Vec<BatchEvent>,
        cancel_after: Option<usize>,
    }

    impl Recorder {
        fn cancelling_after(completed: usize) -> Self {
            Self {
                events: Vec::new(),
                cancel_after: Some(completed),
            }
        }

        fn started_names(&self) -> Vec<String> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    BatchEvent::SubfolderStarted { name, .. } => Some(name.clone()),
                    _ => None,
                })
                .collect()
        }

        fn progress_ticks(&self) -> Vec<(usize, usize)> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    BatchEvent::Progress { completed, total } => Some((*completed, *total)),
                    _ => None,
                })
                .collect()
        }
    }

    impl BatchObserver for Recorder {
        fn on_event(&mut self, event: &BatchEvent) {
            self.events.push(event.clone());
        }

        fn should_cancel(&self) -> bool {
            self.cancel_after
                .is_some_and(|limit| self.progress_ticks().len() >= limit)
        }
    }

    struct FailingAssembler;

    impl PdfAssembler for FailingAssembler {
        fn assemble(&self, _pages: &[PathBuf]) -> Result<Vec<u8>> {
            Err(BildbandError::Assembly("disk full".into()))
        }
    }

    /// Delegates to `MarginCompositor` and remembers every option set it was
    /// handed. Deletes `doomed` the first time it composes a page.
    struct SpyCompositor {
        seen: RefCell<Vec<PageOptions>>,
        doomed: Option<PathBuf>,
    }

    impl SpyCompositor {
        fn new() -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
                doomed: None,
            }
        }

        fn deleting(dir: PathBuf) -> Self {
            Self {
                doomed: Some(dir),
                ..Self::new()
            }
        }
    }

    impl PageCompositor for SpyCompositor {
        fn compose(
            &self,
            source: &Path,
            options: &PageOptions,
            sink: &mut dyn Write,
        ) -> Result<PreparedPage> {
            self.seen.borrow_mut().push(*options);
            if let Some(dir) = &self.doomed {
                if dir.exists() {
                    fs::remove_dir_all(dir).expect("remove subfolder");
                }
            }
            MarginCompositor::new().compose(source, options, sink)
        }
    }

    fn driver() -> BatchDriver<MarginCompositor, PdfWriter> {
        BatchDriver::new(MarginCompositor::new(), PdfWriter::new())
    }

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([40, 80, 120]))
            .save(dir.join(name))
            .expect("write png");
    }

    fn write_corrupt(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"\x89PNG\r\n\x1a\nthis is not really a png").expect("write");
    }

    fn subfolder(root: &Path, name: &str) -> PathBuf {
        let path = root.join(name);
        fs::create_dir(&path).expect("mkdir");
        path
    }

    fn leftover_temp_files(root: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();
        for entry in fs::read_dir(root).expect("read root").flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            for file in fs::read_dir(&path).expect("read subfolder").flatten() {
                if file.file_name().to_string_lossy().starts_with(TEMP_FILE_PREFIX) {
                    found.push(file.path());
                }
            }
        }
        found
    }

    fn page_count(path: &Path) -> usize {
        PdfReader::open(path).expect("open PDF").page_count()
    }

    #[test]
    fn end_to_end_mixed_subfolders() {
        let root = tempfile::tempdir().expect("tempdir");
        let a = subfolder(root.path(), "A");
        write_png(&a, "1.png", 20, 30);
        write_png(&a, "2.png", 20, 30);
        let b = subfolder(root.path(), "B");
        fs::write(b.join("notes.txt"), b"nothing to see").expect("write");
        let c = subfolder(root.path(), "C");
        write_png(&c, "good.png", 16, 16);
        write_corrupt(&c, "bad.png");

        let mut recorder = Recorder::default();
        let mut driver = driver();
        let result = driver
            .run_batch(ConversionJob::new(root.path()), &mut recorder)
            .expect("run");

        assert_eq!(result.state, BatchState::Completed);
        assert_eq!(driver.state(), BatchState::Completed);
        assert_eq!((result.succeeded, result.skipped, result.failed), (2, 1, 0));

        assert_eq!(page_count(&root.path().join("A.pdf")), 2);
        assert!(!root.path().join("B.pdf").exists());
        assert_eq!(page_count(&root.path().join("C.pdf")), 1);

        let c_entry = result.entry("C").expect("C entry");
        assert_eq!(c_entry.outcome, Outcome::Succeeded);
        assert_eq!(c_entry.pages, 1);
        assert_eq!(c_entry.failed_images.len(), 1);
        assert!(recorder
            .events
            .iter()
            .any(|e| matches!(e, BatchEvent::ImageFailed { subfolder, .. } if subfolder == "C")));

        assert!(leftover_temp_files(root.path()).is_empty());
    }

    #[test]
    fn subfolders_and_pages_follow_natural_order() {
        let root = tempfile::tempdir().expect("tempdir");
        for name in ["vol10", "vol2", "vol1"] {
            let dir = subfolder(root.path(), name);
            write_png(&dir, "p10.png", 30, 10);
            write_png(&dir, "p2.png", 20, 10);
            write_png(&dir, "p1.png", 10, 10);
        }

        let mut recorder = Recorder::default();
        driver()
            .run_batch(ConversionJob::new(root.path()), &mut recorder)
            .expect("run");

        assert_eq!(recorder.started_names(), vec!["vol1", "vol2", "vol10"]);

        let reader = PdfReader::open(root.path().join("vol2.pdf")).expect("open");
        assert_eq!(reader.page_count(), 3);
        let widths: Vec<f32> = (1..=3)
            .map(|n| reader.page_size_pt(n).expect("size").0.round())
            .collect();
        assert_eq!(widths, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn margins_grow_every_page() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = subfolder(root.path(), "book");
        write_png(&dir, "cover.png", 50, 40);

        let mut margins = Margins::default();
        margins.left = 10.0;
        margins.top = 10.0;
        let job = ConversionJob::new(root.path()).with_margins(margins);
        driver().run_batch(job, &mut ()).expect("run");

        let reader = PdfReader::open(root.path().join("book.pdf")).expect("open");
        let (w, h) = reader.page_size_pt(1).expect("size");
        assert_eq!((w.round(), h.round()), (50.0 + 118.0, 40.0 + 118.0));
    }

    #[test]
    fn cancellation_stops_before_next_subfolder() {
        let root = tempfile::tempdir().expect("tempdir");
        for name in ["s1", "s2", "s3", "s4"] {
            let dir = subfolder(root.path(), name);
            write_png(&dir, "page.png", 8, 8);
        }

        // Cancel before subfolder K = 3 starts.
        let mut recorder = Recorder::cancelling_after(2);
        let mut driver = driver();
        let result = driver
            .run_batch(ConversionJob::new(root.path()), &mut recorder)
            .expect("run");

        assert!(result.is_cancelled());
        assert_eq!(driver.state(), BatchState::Cancelled);
        assert_eq!(result.total, 4);
        assert_eq!(result.processed(), 2);
        assert!(result.entry("s3").is_none());
        assert!(root.path().join("s2.pdf").exists());
        assert!(!root.path().join("s3.pdf").exists());
        assert_eq!(recorder.started_names(), vec!["s1", "s2"]);
        assert!(matches!(
            recorder.events.last(),
            Some(BatchEvent::Cancelled { processed: 2, total: 4 })
        ));
        assert!(leftover_temp_files(root.path()).is_empty());
    }

    #[test]
    fn cancel_before_first_subfolder_yields_empty_result() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = subfolder(root.path(), "only");
        write_png(&dir, "page.png", 8, 8);

        let mut recorder = Recorder::cancelling_after(0);
        let result = driver()
            .run_batch(ConversionJob::new(root.path()), &mut recorder)
            .expect("run");

        assert!(result.is_cancelled());
        assert!(result.entries.is_empty());
        assert!(!root.path().join("only.pdf").exists());
    }

    #[test]
    fn invalid_root_fails_before_running() {
        let root = tempfile::tempdir().expect("tempdir");
        let mut recorder = Recorder::default();
        let mut driver = driver();

        let err = driver
            .run_batch(ConversionJob::new(root.path().join("missing")), &mut recorder)
            .unwrap_err();

        assert!(err.is_fatal());
        assert_eq!(driver.state(), BatchState::Idle);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn all_images_corrupt_fails_subfolder_without_output() {
        let root = tempfile::tempdir().expect("tempdir");
        let broken = subfolder(root.path(), "broken");
        write_corrupt(&broken, "a.png");
        write_corrupt(&broken, "b.jpg");
        let fine = subfolder(root.path(), "fine");
        write_png(&fine, "a.png", 8, 8);

        let result = driver()
            .run_batch(ConversionJob::new(root.path()), &mut ())
            .expect("run");

        assert_eq!((result.succeeded, result.skipped, result.failed), (1, 0, 1));
        let entry = result.entry("broken").expect("entry");
        assert_eq!(entry.outcome, Outcome::Failed);
        assert_eq!(entry.failed_images.len(), 2);
        assert!(!root.path().join("broken.pdf").exists());
        assert!(root.path().join("fine.pdf").exists());
        assert!(leftover_temp_files(root.path()).is_empty());
    }

    #[test]
    fn assembly_failure_is_recorded_and_cleaned_up() {
        let root = tempfile::tempdir().expect("tempdir");
        for name in ["one", "two"] {
            let dir = subfolder(root.path(), name);
            write_png(&dir, "a.png", 8, 8);
            write_png(&dir, "b.png", 8, 8);
        }

        let mut driver = BatchDriver::new(MarginCompositor::new(), FailingAssembler);
        let result = driver
            .run_batch(ConversionJob::new(root.path()), &mut ())
            .expect("run");

        assert_eq!(result.failed, 2);
        assert_eq!(result.state, BatchState::Completed);
        assert!(result.entries.iter().all(|e| e.message.contains("disk full")));
        assert!(leftover_temp_files(root.path()).is_empty());
    }

    #[test]
    fn custom_name_overwrites_and_warns() {
        let root = tempfile::tempdir().expect("tempdir");
        let out = tempfile::tempdir().expect("out dir");
        let first = subfolder(root.path(), "first");
        write_png(&first, "a.png", 8, 8);
        let second = subfolder(root.path(), "second");
        write_png(&second, "a.png", 8, 8);
        write_png(&second, "b.png", 8, 8);

        let job = ConversionJob::new(root.path())
            .with_output_folder(out.path())
            .with_custom_name("book");
        let mut recorder = Recorder::default();
        let result = driver().run_batch(job, &mut recorder).expect("run");

        assert_eq!(result.succeeded, 2);
        assert_eq!(page_count(&out.path().join("book.pdf")), 2);
        assert!(!root.path().join("book.pdf").exists());
        let overwrites: Vec<_> = recorder
            .events
            .iter()
            .filter(|e| matches!(e, BatchEvent::OutputOverwritten { .. }))
            .collect();
        assert_eq!(overwrites.len(), 1);
    }

    #[test]
    fn progress_covers_skipped_subfolders() {
        let root = tempfile::tempdir().expect("tempdir");
        subfolder(root.path(), "empty1");
        let full = subfolder(root.path(), "full");
        write_png(&full, "a.png", 8, 8);
        subfolder(root.path(), "empty2");

        let mut recorder = Recorder::default();
        let result = driver()
            .run_batch(ConversionJob::new(root.path()), &mut recorder)
            .expect("run");

        assert_eq!(result.skipped, 2);
        assert_eq!(recorder.progress_ticks(), vec![(1, 3), (2, 3), (3, 3)]);
        assert!(matches!(
            recorder.events.last(),
            Some(BatchEvent::Finished {
                succeeded: 1,
                skipped: 2,
                failed: 0
            })
        ));
    }

    #[test]
    fn source_images_are_untouched() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = subfolder(root.path(), "pages");
        write_png(&dir, "a.png", 8, 8);
        let before = fs::read(dir.join("a.png")).expect("read");

        let job = ConversionJob::new(root.path()).with_margins(Margins::uniform(5.0));
        driver().run_batch(job, &mut ()).expect("run");

        assert_eq!(fs::read(dir.join("a.png")).expect("read"), before);
        let names: Vec<String> = fs::read_dir(&dir)
            .expect("read dir")
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png"]);
    }

    #[test]
    fn job_quality_reaches_the_compositor() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = subfolder(root.path(), "book");
        write_png(&dir, "a.png", 8, 8);
        write_png(&dir, "b.png", 8, 8);

        let job = ConversionJob::new(root.path())
            .with_margins(Margins::uniform(10.0))
            .with_jpeg_quality(10);
        let mut driver = BatchDriver::new(SpyCompositor::new(), PdfWriter::new());
        driver.run_batch(job, &mut ()).expect("run");

        let seen = driver.compositor.seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|o| o.jpeg_quality == 10));
        assert!(seen.iter().all(|o| o.margins.left == 118));
    }

    #[test]
    fn vanished_subfolder_fails_and_batch_continues() {
        let root = tempfile::tempdir().expect("tempdir");
        for name in ["s1", "s2", "s3"] {
            let dir = subfolder(root.path(), name);
            write_png(&dir, "page.png", 8, 8);
        }

        // s2 is removed while s1 is being composed, after the subfolder list
        // was taken.
        let compositor = SpyCompositor::deleting(root.path().join("s2"));
        let mut recorder = Recorder::default();
        let result = BatchDriver::new(compositor, PdfWriter::new())
            .run_batch(ConversionJob::new(root.path()), &mut recorder)
            .expect("run");

        assert_eq!(result.state, BatchState::Completed);
        assert_eq!((result.succeeded, result.skipped, result.failed), (2, 0, 1));
        let entry = result.entry("s2").expect("s2 entry");
        assert_eq!(entry.outcome, Outcome::Failed);
        assert!(!root.path().join("s2.pdf").exists());
        assert_eq!(page_count(&root.path().join("s1.pdf")), 1);
        assert_eq!(page_count(&root.path().join("s3.pdf")), 1);
        assert!(recorder
            .events
            .iter()
            .any(|e| matches!(e, BatchEvent::SubfolderFailed { name, .. } if name == "s2")));
        assert_eq!(recorder.progress_ticks().len(), 3);
    }

    #[test]
    fn vanished_image_is_left_out() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = subfolder(root.path(), "book");
        write_png(&dir, "p1.png", 8, 8);
        write_png(&dir, "p2.png", 8, 8);

        // A compositor that removes p2 before it is reached.
        struct Deleting(PathBuf);
        impl PageCompositor for Deleting {
            fn compose(
                &self,
                source: &Path,
                options: &PageOptions,
                sink: &mut dyn Write,
            ) -> Result<PreparedPage> {
                let _ = fs::remove_file(&self.0);
                MarginCompositor::new().compose(source, options, sink)
            }
        }

        let mut recorder = Recorder::default();
        let result = BatchDriver::new(Deleting(dir.join("p2.png")), PdfWriter::new())
            .run_batch(ConversionJob::new(root.path()), &mut recorder)
            .expect("run");

        let entry = result.entry("book").expect("entry");
        assert_eq!(entry.outcome, Outcome::Succeeded);
        assert_eq!(entry.pages, 1);
        assert_eq!(entry.failed_images.len(), 1);
        assert!(recorder.events.iter().any(|e| matches!(
            e,
            BatchEvent::ImageFailed { reason, .. } if reason.contains("not found")
        )));
    }
}
