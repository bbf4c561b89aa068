#[cfg(feature = "cli")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Resource snapshot taken at the end of one pipeline phase.
#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub cpu_usage: f32,
    pub memory_mb: u64,
    pub memory_percent: f32,
    /// Time spent since the previous snapshot.
    pub phase_time: Duration,
    pub total_time: Duration,
}

/// Per-phase resource reporting for the plot pipeline.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: RefCell<System>,
    pid: Option<Pid>,
    start_time: Instant,
    last_mark: Cell<Instant>,
    peak_memory_mb: Cell<u64>,
    phases: RefCell<Vec<PhaseStats>>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = if enabled {
            sysinfo::get_current_pid()
                .map_err(|e| tracing::warn!("System monitoring unavailable: {}", e))
                .ok()
        } else {
            None
        };

        let mut system = System::new();
        if let Some(pid) = pid {
            system.refresh_memory();
            system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        }

        let now = Instant::now();
        Self {
            system: RefCell::new(system),
            pid,
            start_time: now,
            last_mark: Cell::new(now),
            peak_memory_mb: Cell::new(0),
            phases: RefCell::new(Vec::new()),
            enabled,
        }
    }

    /// Samples this process and records the result under `phase`.
    pub fn snapshot(&self, phase: &str) -> Option<PhaseStats> {
        let pid = self.pid?;
        let mut system = self.system.try_borrow_mut().ok()?;
        system.refresh_memory();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        let process = system.process(pid)?;
        let memory_mb = process.memory() / 1024 / 1024;
        let total_mb = system.total_memory() / 1024 / 1024;
        let memory_percent = if total_mb > 0 {
            memory_mb as f32 / total_mb as f32 * 100.0
        } else {
            0.0
        };
        self.peak_memory_mb.set(self.peak_memory_mb.get().max(memory_mb));

        let now = Instant::now();
        let stats = PhaseStats {
            phase: phase.to_string(),
            cpu_usage: process.cpu_usage(),
            memory_mb,
            memory_percent,
            phase_time: now.duration_since(self.last_mark.replace(now)),
            total_time: now.duration_since(self.start_time),
        };
        self.phases.borrow_mut().push(stats.clone());
        Some(stats)
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.snapshot(phase) {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB ({:.1}%), Phase: {:?}",
                stats.phase,
                stats.cpu_usage,
                stats.memory_mb,
                stats.memory_percent,
                stats.phase_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }
        let phases = self.phases.borrow();
        let slowest = phases.iter().max_by_key(|p| p.phase_time);
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB, Slowest Phase: {}",
            self.start_time.elapsed(),
            self.peak_memory_mb.get(),
            slowest.map(|p| p.phase.as_str()).unwrap_or("-")
        );
    }

    pub fn phases(&self) -> Vec<PhaseStats> {
        self.phases.borrow().clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 非 CLI 建置時的空實作
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
