use crate::domain::ports::Pipeline;
use crate::domain::record::PlotOutcome;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct PlotEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> PlotEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&self) -> Result<PlotOutcome> {
        tracing::info!("Starting plot pipeline...");
        self.monitor.log_stats("Start");

        // Extract
        let records = self.pipeline.extract()?;
        tracing::info!("Extracted {} control variable rows", records.len());
        self.monitor.log_stats("Extract");

        // Transform
        let system = self.pipeline.transform(records)?;
        tracing::info!(
            "Built '{}' with {} boundaries and {} control variables",
            system.name(),
            system.len(),
            system.variable_count()
        );
        self.monitor.log_stats("Transform");

        // Load
        let outcome = self.pipeline.load(&system)?;
        tracing::info!("Plot saved to: {}", outcome.plot_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(outcome)
    }
}
