use crate::config::toml_config::{PlotConfig, RenderBackend};
use clap::Parser;
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "pbs-plot")]
#[command(about = "Render planetary boundary risk diagrams from a TOML plot file")]
pub struct CliConfig {
    /// Path to the TOML plot configuration
    #[arg(short, long, default_value = "pbs.toml")]
    pub config: String,

    /// Override the data CSV path (relative to the working directory)
    #[arg(long)]
    pub data: Option<String>,

    /// Override the output directory (relative to the working directory)
    #[arg(long)]
    pub output_path: Option<String>,

    /// Radial segments per bar for the segment backend
    #[arg(long)]
    pub segments: Option<usize>,

    #[arg(long, value_enum)]
    pub backend: Option<RenderBackend>,

    #[arg(long, help = "Hide boundary labels")]
    pub no_boundary_labels: bool,

    #[arg(long, help = "Hide control variable labels")]
    pub no_variable_labels: bool,

    #[arg(long, help = "Print the JSON render summary to stdout")]
    pub summary: bool,

    #[arg(long, help = "Build the model and print it without rendering")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

impl CliConfig {
    /// 將命令列覆蓋設定套用到 TOML 配置
    ///
    /// Paths in the TOML file are relative to the file itself, paths given on
    /// the command line are relative to `cwd`.
    pub fn apply(&self, config: &mut PlotConfig, cwd: &Path) {
        if let Some(data) = &self.data {
            config.data.path = from_cwd(cwd, data);
            tracing::info!("🔧 Data path overridden to: {}", config.data.path);
        }
        if let Some(output_path) = &self.output_path {
            config.render.output_path = from_cwd(cwd, output_path);
            tracing::info!("🔧 Output path overridden to: {}", config.render.output_path);
        }
        if let Some(segments) = self.segments {
            config.render.segments = segments;
        }
        if let Some(backend) = self.backend {
            config.render.backend = backend;
        }
        if self.no_boundary_labels {
            config.render.boundary_labels = false;
        }
        if self.no_variable_labels {
            config.render.variable_labels = false;
        }
    }
}

fn from_cwd(cwd: &Path, path: &str) -> String {
    if Path::new(path).is_absolute() {
        path.to_string()
    } else {
        cwd.join(path).to_string_lossy().into_owned()
    }
}
