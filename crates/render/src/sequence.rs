//! Rendering a whole [`Scene`] into numbered PNG frames.
//!
//! Frame `i` is rendered at `t = i / fps` and written as `<i>.png`. Every
//! built-in field sets rotation and size absolutely, so frames may be
//! rendered in any order and still match a full sequential run.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use spinning_squares_core::color::ColorMapper;
use spinning_squares_core::coverage::CoverageField;
use spinning_squares_core::error::SquaresError;
use spinning_squares_core::grid::SquareGrid;
use spinning_squares_core::raster::{FrameRasterizer, FrameStats};
use spinning_squares_core::scene::Scene;

use crate::snapshot::write_png;
use crate::FieldKind;

/// Creates `dir` (and parents) if missing.
///
/// With `clear` set, regular files directly inside `dir` are deleted;
/// subdirectories are left alone.
pub fn prepare_output_dir(dir: &Path, clear: bool) -> Result<(), SquaresError> {
    let io_err = |e: std::io::Error| SquaresError::Io(format!("{}: {e}", dir.display()));
    fs::create_dir_all(dir).map_err(io_err)?;
    if !clear {
        return Ok(());
    }
    let mut removed = 0usize;
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if entry.file_type().map_err(io_err)?.is_file() {
            let path = entry.path();
            fs::remove_file(&path)
                .map_err(|e| SquaresError::Io(format!("{}: {e}", path.display())))?;
            removed += 1;
        }
    }
    debug!(dir = %dir.display(), removed, "cleared output directory");
    Ok(())
}

/// File name of frame `index`.
pub fn frame_file_name(index: usize) -> String {
    format!("{index}.png")
}

/// Outcome of one written frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub index: usize,
    /// Simulation time in seconds.
    pub time: f64,
    pub stats: FrameStats,
    pub path: PathBuf,
}

/// A validated scene together with the state needed to render it.
#[derive(Debug, Clone)]
pub struct Sequence {
    scene: Scene,
    grid: SquareGrid,
    rasterizer: FrameRasterizer,
    field: FieldKind,
    mapper: ColorMapper,
}

impl Sequence {
    /// Validates `scene` and builds its grid, rasterizer, field and mapper.
    pub fn new(scene: Scene) -> Result<Self, SquaresError> {
        scene.validate()?;
        let field = FieldKind::from_name(&scene.field, scene.square_size, &scene.params)?;
        let grid = scene.grid()?;
        let rasterizer = scene.rasterizer()?;
        let mapper = scene.color_mapper()?;
        debug!(
            field = field.name(),
            rows = grid.rows(),
            cols = grid.cols(),
            "sequence ready"
        );
        Ok(Self {
            scene,
            grid,
            rasterizer,
            field,
            mapper,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn field(&self) -> &FieldKind {
        &self.field
    }

    pub fn frame_count(&self) -> usize {
        self.scene.frames
    }

    /// Coverage of the most recently rendered frame.
    pub fn coverage(&self) -> &CoverageField {
        self.rasterizer.coverage()
    }

    pub fn mapper(&self) -> &ColorMapper {
        &self.mapper
    }

    /// Rasterizes frame `index` into the internal coverage field.
    pub fn render_frame(&mut self, index: usize) -> Result<FrameStats, SquaresError> {
        if index >= self.scene.frames {
            return Err(SquaresError::InvalidScene(format!(
                "frame index {index} out of range (scene has {} frames)",
                self.scene.frames
            )));
        }
        let t = self.scene.time_at(index);
        self.rasterizer.rasterize(&mut self.grid, t, &self.field)
    }

    /// Renders frame `index` and writes it to `path`.
    pub fn write_frame_to(
        &mut self,
        index: usize,
        path: &Path,
    ) -> Result<FrameReport, SquaresError> {
        let stats = self.render_frame(index)?;
        write_png(self.rasterizer.coverage(), &self.mapper, path)?;
        Ok(FrameReport {
            index,
            time: self.scene.time_at(index),
            stats,
            path: path.to_path_buf(),
        })
    }

    /// Renders frame `index` and writes it as `<index>.png` inside `dir`.
    pub fn write_frame(&mut self, index: usize, dir: &Path) -> Result<FrameReport, SquaresError> {
        self.write_frame_to(index, &dir.join(frame_file_name(index)))
    }

    /// Renders every frame in order into `dir`, calling `on_frame` after each.
    ///
    /// `dir` must already exist; see [`prepare_output_dir`].
    pub fn render_all<F>(
        &mut self,
        dir: &Path,
        mut on_frame: F,
    ) -> Result<Vec<FrameReport>, SquaresError>
    where
        F: FnMut(&FrameReport),
    {
        let mut reports = Vec::with_capacity(self.scene.frames);
        for index in 0..self.scene.frames {
            let report = self.write_frame(index, dir)?;
            on_frame(&report);
            reports.push(report);
        }
        let degenerate: usize = reports.iter().map(|r| r.stats.degenerate).sum();
        info!(
            frames = reports.len(),
            degenerate,
            dir = %dir.display(),
            "sequence written"
        );
        Ok(reports)
    }
}
