use crate::config::EngineConfig;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::compare_frames::compare_frames::{
    CompareFramesError, FrameComparison, compare_frames,
};
use crate::core::actions::render_frame::render_frame::{DriveError, render_frame};
use crate::core::data::frame::Frame;
use crate::core::engine::events::RenderSummary;
use crate::core::engine::raster_engine::RasterEngine;
use crate::adapters::framebuffer::memory::MemoryFramebuffer;
use crate::input::framebuffer_dump::{DumpFileError, read_framebuffer_dump};
use crate::input::test_cases::RenderCase;
use rayon::prelude::*;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

pub const IMAGE_DIR: &str = "images";
pub const DUMP_DIR: &str = "output_files";

#[must_use]
pub fn image_file_name(index: usize) -> String {
    format!("{}_framestore.ppm", index)
}

#[must_use]
pub fn dump_file_name(index: usize) -> String {
    format!("output_file_{}.txt", index)
}

#[derive(Debug)]
pub enum BatchError {
    Drive { case: usize, source: DriveError },
    Io { path: PathBuf, source: std::io::Error },
    Golden { case: usize, source: DumpFileError },
    Compare { case: usize, source: CompareFramesError },
    FramesDiffer { failed: usize, total: usize },
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drive { case, source } => write!(f, "case {}: {}", case, source),
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Golden { case, source } => write!(f, "case {}: {}", case, source),
            Self::Compare { case, source } => write!(f, "case {}: {}", case, source),
            Self::FramesDiffer { failed, total } => {
                write!(f, "{} of {} frames differ from the golden dumps", failed, total)
            }
        }
    }
}

impl Error for BatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Drive { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Golden { source, .. } => Some(source),
            Self::Compare { source, .. } => Some(source),
            Self::FramesDiffer { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedCase {
    pub case: RenderCase,
    pub summary: RenderSummary,
    pub frame: Frame,
}

#[derive(Debug, Clone)]
pub struct CaseVerification {
    pub case: usize,
    pub comparison: FrameComparison,
}

#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub cases: Vec<CaseVerification>,
}

impl VerifyReport {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.cases.iter().filter(|c| !c.comparison.matches()).count()
    }

    pub fn into_result(self) -> Result<Self, BatchError> {
        match self.failed() {
            0 => Ok(self),
            failed => Err(BatchError::FramesDiffer {
                failed,
                total: self.cases.len(),
            }),
        }
    }
}

/// Renders a script of test cases, each on its own engine and simulated
/// framebuffer, then hands the frames to file presenters.
pub struct BatchController<P: FilePresenterPort, D: FilePresenterPort> {
    config: EngineConfig,
    image_presenter: P,
    dump_presenter: D,
    rendered: Vec<RenderedCase>,
}

fn render_case(config: &EngineConfig, case: RenderCase) -> Result<RenderedCase, BatchError> {
    let mut engine = RasterEngine::new();
    let mut framebuffer = MemoryFramebuffer::new(config.display)
        .with_fill(config.framebuffer.fill_colour())
        .with_ack_latency(config.framebuffer.ack_latency);

    let summary = render_frame(
        &mut engine,
        &mut framebuffer,
        case.request,
        config.render.tick_budget,
    )
    .map_err(|source| BatchError::Drive {
        case: case.index,
        source,
    })?;

    info!(
        "case {}: {} pixels in {} ticks",
        case.index, summary.pixels, summary.ticks
    );

    Ok(RenderedCase {
        case,
        summary,
        frame: framebuffer.frame(),
    })
}

fn create_dir(path: &Path) -> Result<(), BatchError> {
    std::fs::create_dir_all(path).map_err(|source| BatchError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl<P: FilePresenterPort, D: FilePresenterPort> BatchController<P, D> {
    pub fn new(config: EngineConfig, image_presenter: P, dump_presenter: D) -> Self {
        Self {
            config,
            image_presenter,
            dump_presenter,
            rendered: Vec::new(),
        }
    }

    #[must_use]
    pub fn rendered(&self) -> &[RenderedCase] {
        &self.rendered
    }

    pub fn generate(&mut self, cases: &[RenderCase]) -> Result<(), BatchError> {
        info!(
            "Rendering {} frames at {}x{}",
            cases.len(),
            self.config.display.width,
            self.config.display.height
        );

        let start = Instant::now();
        let config = &self.config;

        self.rendered = cases
            .par_iter()
            .map(|&case| render_case(config, case))
            .collect::<Result<Vec<_>, _>>()?;

        info!("Duration: {:?}", start.elapsed());

        Ok(())
    }

    /// Writes `images/<n>_framestore.ppm` and `output_files/output_file_<n>.txt`
    /// under `output_dir` for every rendered case.
    pub fn write(&self, output_dir: impl AsRef<Path>) -> Result<(), BatchError> {
        let image_dir = output_dir.as_ref().join(IMAGE_DIR);
        let dump_dir = output_dir.as_ref().join(DUMP_DIR);

        create_dir(&image_dir)?;
        create_dir(&dump_dir)?;

        for rendered in &self.rendered {
            let image = image_dir.join(image_file_name(rendered.case.index));
            let dump = dump_dir.join(dump_file_name(rendered.case.index));

            self.image_presenter
                .present(&rendered.frame, &image)
                .map_err(|source| BatchError::Io { path: image, source })?;
            self.dump_presenter
                .present(&rendered.frame, &dump)
                .map_err(|source| BatchError::Io { path: dump, source })?;
        }

        Ok(())
    }

    /// Compares every rendered frame with `golden_dir/output_file_<n>.txt`.
    pub fn verify(&self, golden_dir: impl AsRef<Path>) -> Result<VerifyReport, BatchError> {
        let display = self.config.display;
        let mut report = VerifyReport::default();

        for rendered in &self.rendered {
            let index = rendered.case.index;
            let path = golden_dir.as_ref().join(dump_file_name(index));
            let golden = read_framebuffer_dump(&path, display.width, display.height)
                .map_err(|source| BatchError::Golden { case: index, source })?;
            let comparison = compare_frames(&golden, &rendered.frame)
                .map_err(|source| BatchError::Compare { case: index, source })?;

            if comparison.matches() {
                info!("case {}: all {} pixels match", index, comparison.total);
            } else {
                warn!(
                    "case {}: {} of {} pixels differ, first at {}",
                    index,
                    comparison.mismatches.len(),
                    comparison.total,
                    comparison.mismatches[0]
                );
            }

            report.cases.push(CaseVerification {
                case: index,
                comparison,
            });
        }

        Ok(report)
    }
}
