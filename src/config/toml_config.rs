use crate::core::palette::ColorLaw;
use crate::core::render::{RenderOptions, DEFAULT_LABEL_RADIUS, DEFAULT_SEGMENTS};
use crate::domain::model::RiskZoneFormula;
use crate::utils::error::{PlotError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum RenderBackend {
    /// Native SVG with radial gradient fills.
    #[default]
    Gradient,
    /// plotters SVG output with flat-coloured radial segments.
    Segments,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    pub system: SystemConfig,
    pub data: DataConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub boundaries: Vec<BoundaryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    pub name: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: String,
}

// [render] 區段可以只寫部分欄位，其餘使用預設值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub output_path: String,
    pub filename: String,
    pub backend: RenderBackend,
    pub width: u32,
    pub height: u32,
    pub segments: usize,
    pub label_radius: f64,
    pub boundary_labels: bool,
    pub variable_labels: bool,
    pub risk_zone_formula: RiskZoneFormula,
    pub summary: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_path: "plots".to_string(),
            filename: "planetary_boundaries.svg".to_string(),
            backend: RenderBackend::default(),
            width: 1200,
            height: 1200,
            segments: DEFAULT_SEGMENTS,
            label_radius: DEFAULT_LABEL_RADIUS,
            boundary_labels: true,
            variable_labels: true,
            risk_zone_formula: RiskZoneFormula::default(),
            summary: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryConfig {
    pub name: String,
    pub variables: Vec<String>,
}

impl PlotConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlotError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlotError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlotError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("system.name", &self.system.name)?;
        validation::validate_path("data.path", &self.data.path)?;
        validation::validate_file_extension("data.path", &self.data.path, &["csv"])?;
        validation::validate_path("render.output_path", &self.render.output_path)?;
        validation::validate_file_extension("render.filename", &self.render.filename, &["svg"])?;
        validation::validate_range("render.width", self.render.width, 100, 10_000)?;
        validation::validate_range("render.height", self.render.height, 100, 10_000)?;
        validation::validate_positive_number("render.segments", self.render.segments, 1)?;
        validation::validate_positive_float("render.label_radius", self.render.label_radius)?;

        if self.boundaries.is_empty() {
            return Err(PlotError::MissingConfigError {
                field: "boundaries".to_string(),
            });
        }
        for (i, boundary) in self.boundaries.iter().enumerate() {
            validation::validate_non_empty_string(&format!("boundaries[{}].name", i), &boundary.name)?;
            if boundary.variables.is_empty() {
                return Err(PlotError::InvalidConfigValueError {
                    field: format!("boundaries[{}].variables", i),
                    value: boundary.name.clone(),
                    reason: "A boundary needs at least one control variable".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_boundary_labels: self.render.boundary_labels,
            show_variable_labels: self.render.variable_labels,
            segments: self.render.segments,
            label_radius: self.render.label_radius,
            formula: self.render.risk_zone_formula,
            palette: ColorLaw::default(),
        }
    }

    pub fn plot_file(&self) -> String {
        join_output(&self.render.output_path, &self.render.filename)
    }

    pub fn summary_file(&self) -> String {
        let stem = Path::new(&self.render.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("planetary_boundaries");
        join_output(&self.render.output_path, &format!("{}.json", stem))
    }
}

fn join_output(dir: &str, file: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        file.to_string()
    } else {
        format!("{}/{}", dir, file)
    }
}

impl Validate for PlotConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
