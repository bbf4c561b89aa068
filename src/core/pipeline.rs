use crate::adapters::csv_source::{parse_records, RowTable};
use crate::adapters::{PlottersCanvas, SvgCanvas};
use crate::config::toml_config::{PlotConfig, RenderBackend};
use crate::core::render::RenderOptions;
use crate::domain::model::{Boundary, PlanetarySystem};
use crate::domain::ports::{Pipeline, Storage};
use crate::domain::record::{PlotOutcome, PlotSummary, RenderReport, VariableRecord};
use crate::utils::error::Result;
use chrono::Utc;
use plotters::prelude::{IntoDrawingArea, SVGBackend};

/// Reads the data table, assembles the configured system and writes the
/// diagram (plus an optional JSON summary) through `Storage`.
pub struct PlotPipeline<S: Storage> {
    storage: S,
    config: PlotConfig,
}

impl<S: Storage> PlotPipeline<S> {
    pub fn new(storage: S, config: PlotConfig) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }
}

/// Groups table rows into the boundaries listed in the config, in order.
pub fn build_system(table: &RowTable, config: &PlotConfig) -> Result<PlanetarySystem> {
    let mut boundaries = Vec::with_capacity(config.boundaries.len());
    for boundary in &config.boundaries {
        let variables = boundary
            .variables
            .iter()
            .map(|label| table.variable(label))
            .collect::<Result<Vec<_>>>()?;
        boundaries.push(Boundary::new(boundary.name.clone(), variables)?);
    }
    PlanetarySystem::new(config.system.name.clone(), boundaries)
}

/// Renders `system` into an SVG document with the configured backend.
pub fn render_document(
    system: &PlanetarySystem,
    config: &PlotConfig,
    options: &RenderOptions,
) -> Result<(String, RenderReport)> {
    let size = (config.render.width, config.render.height);
    let title = config.system.title.clone();

    match config.render.backend {
        RenderBackend::Gradient => {
            let mut canvas = SvgCanvas::new(size.0, size.1);
            if let Some(title) = title {
                canvas = canvas.with_title(title);
            }
            let report = system.render(&mut canvas, options)?;
            Ok((canvas.into_document()?, report))
        }
        RenderBackend::Segments => {
            let mut buffer = String::new();
            let report = {
                let area = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
                let mut canvas = PlottersCanvas::new(area);
                if let Some(title) = title {
                    canvas = canvas.with_title(title);
                }
                system.render(&mut canvas, options)?
            };
            Ok((buffer, report))
        }
    }
}

impl<S: Storage> Pipeline for PlotPipeline<S> {
    fn extract(&self) -> Result<Vec<VariableRecord>> {
        tracing::debug!("Reading data table from: {}", self.config.data.path);
        let data = self.storage.read_file(&self.config.data.path)?;
        parse_records(&data)
    }

    fn transform(&self, records: Vec<VariableRecord>) -> Result<PlanetarySystem> {
        let table = RowTable::new(records);
        build_system(&table, &self.config)
    }

    fn load(&self, system: &PlanetarySystem) -> Result<PlotOutcome> {
        let options = self.config.render_options();
        tracing::debug!(
            "Rendering with {:?} backend ({}x{}, {} segments)",
            self.config.render.backend,
            self.config.render.width,
            self.config.render.height,
            options.segments
        );

        let (document, report) = render_document(system, &self.config, &options)?;

        let plot_path = self.config.plot_file();
        tracing::debug!("Writing plot ({} bytes) to storage", document.len());
        self.storage.write_file(&plot_path, document.as_bytes())?;

        for boundary in report.unquantified_boundaries() {
            tracing::warn!("Boundary '{}' is not yet quantified", boundary.name.replace('\n', " "));
        }

        let summary = PlotSummary {
            title: self.config.system.title.clone(),
            generated_at: Utc::now(),
            report,
        };

        let summary_path = if self.config.render.summary {
            let path = self.config.summary_file();
            let json = serde_json::to_string_pretty(&summary)?;
            self.storage.write_file(&path, json.as_bytes())?;
            Some(path)
        } else {
            None
        };

        Ok(PlotOutcome {
            plot_path,
            summary_path,
            summary,
        })
    }
}
