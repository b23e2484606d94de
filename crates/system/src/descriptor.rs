//! One-shot CPU / GPU identification.
//!
//! Each platform gets its own [`SystemDescriptorProvider`]; the right one is
//! picked by [`platform_provider`] and queried exactly once by [`detect`].

use crate::gpu::{self, GpuProbe};
use std::path::PathBuf;
use std::process::Command;
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use sysmon_core::{MonitorError, Result, SystemDescriptor};
use tracing::{debug, info, warn};

/// Looks up the CPU model name.
pub trait SystemDescriptorProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn cpu_name(&self) -> Result<String>;
}

/// Linux: first `model name` line of `/proc/cpuinfo`.
#[derive(Debug, Clone)]
pub struct ProcCpuInfo {
    path: PathBuf,
}

impl ProcCpuInfo {
    pub fn new() -> Self {
        Self::at("/proc/cpuinfo")
    }

    /// Read from a different file (used by tests).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcCpuInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemDescriptorProvider for ProcCpuInfo {
    fn name(&self) -> &'static str {
        "procfs"
    }

    fn cpu_name(&self) -> Result<String> {
        let text = std::fs::read_to_string(&self.path)?;
        parse_model_name(&text)
            .ok_or_else(|| MonitorError::Probe(format!("no model name in {}", self.path.display())))
    }
}

/// Windows: `wmic cpu get name`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WmicQuery;

impl SystemDescriptorProvider for WmicQuery {
    fn name(&self) -> &'static str {
        "wmic"
    }

    fn cpu_name(&self) -> Result<String> {
        let output = Command::new("wmic").args(["cpu", "get", "name"]).output()?;
        if !output.status.success() {
            return Err(MonitorError::Probe(format!("wmic exited with {}", output.status)));
        }
        parse_wmic_output(&String::from_utf8_lossy(&output.stdout))
            .ok_or_else(|| MonitorError::Probe("wmic returned no CPU name".into()))
    }
}

/// Everywhere else: the brand string `sysinfo` reports for the first CPU.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoBrand;

impl SystemDescriptorProvider for SysinfoBrand {
    fn name(&self) -> &'static str {
        "sysinfo"
    }

    fn cpu_name(&self) -> Result<String> {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()),
        );
        sys.cpus()
            .first()
            .map(|c| c.brand().trim().to_string())
            .filter(|b| !b.is_empty())
            .ok_or_else(|| MonitorError::Probe("no CPU brand reported".into()))
    }
}

/// The provider for the platform this binary was built for.
pub fn platform_provider() -> Box<dyn SystemDescriptorProvider> {
    if cfg!(target_os = "linux") {
        Box::new(ProcCpuInfo::new())
    } else if cfg!(target_os = "windows") {
        Box::new(WmicQuery)
    } else {
        Box::new(SysinfoBrand)
    }
}

/// Resolve CPU and GPU names, substituting sentinels for anything that fails.
pub fn resolve(provider: &dyn SystemDescriptorProvider, gpu: &dyn GpuProbe) -> SystemDescriptor {
    let cpu_name = match provider.cpu_name() {
        Ok(name) => name,
        Err(e) => {
            warn!(provider = provider.name(), "CPU name lookup failed: {e}");
            SystemDescriptor::UNKNOWN_CPU.to_string()
        }
    };
    let gpu_name = gpu::gpu_label(gpu);

    debug!(%cpu_name, %gpu_name, "descriptor resolved");
    SystemDescriptor { cpu_name, gpu_name }
}

/// Resolve the descriptor with the platform's providers.  Blocking: may spawn
/// a subprocess.
pub fn detect() -> SystemDescriptor {
    let descriptor = resolve(platform_provider().as_ref(), gpu::platform_probe().as_ref());
    info!("Host: {} / {}", descriptor.cpu_name, descriptor.gpu_name);
    descriptor
}

/// Value of the first `model name` line in `/proc/cpuinfo` text.
fn parse_model_name(text: &str) -> Option<String> {
    text.lines()
        .filter(|line| line.starts_with("model name"))
        .find_map(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Second non-blank line of `wmic cpu get name` (the first is the `Name` header).
fn parse_wmic_output(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .nth(1)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCpu(&'static str);

    impl SystemDescriptorProvider for FixedCpu {
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn cpu_name(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct BrokenCpu;

    impl SystemDescriptorProvider for BrokenCpu {
        fn name(&self) -> &'static str {
            "broken"
        }
        fn cpu_name(&self) -> Result<String> {
            Err(MonitorError::Probe("boom".into()))
        }
    }

    struct NoCapability;

    impl GpuProbe for NoCapability {
        fn gpu_names(&self) -> Result<Vec<String>> {
            Err(MonitorError::Unsupported("no GPU library".into()))
        }
    }

    struct OneGpu;

    impl GpuProbe for OneGpu {
        fn gpu_names(&self) -> Result<Vec<String>> {
            Ok(vec!["GeForce RTX 3060".into()])
        }
    }

    const CPUINFO: &str = "processor\t: 0\nvendor_id\t: GenuineIntel\n\
        model name\t: Intel(R) Core(TM) i7-8650U CPU @ 1.90GHz\nflags\t\t: fpu\n\n\
        processor\t: 1\nmodel name\t: something else\n";

    #[test]
    fn model_name_is_first_match() {
        assert_eq!(
            parse_model_name(CPUINFO).as_deref(),
            Some("Intel(R) Core(TM) i7-8650U CPU @ 1.90GHz")
        );
    }

    #[test]
    fn cpuinfo_without_model_name() {
        assert_eq!(parse_model_name("processor : 0\nHardware : BCM2835\n"), None);
    }

    #[test]
    fn wmic_skips_header_and_blanks() {
        let out = "Name  \r\n\r\nAMD Ryzen 9 5900X 12-Core Processor  \r\n\r\n";
        assert_eq!(
            parse_wmic_output(out).as_deref(),
            Some("AMD Ryzen 9 5900X 12-Core Processor")
        );
    }

    #[test]
    fn wmic_header_only() {
        assert_eq!(parse_wmic_output("Name\r\n"), None);
    }

    #[test]
    fn missing_cpuinfo_file_is_an_error() {
        let provider = ProcCpuInfo::at("/nonexistent/cpuinfo");
        assert!(matches!(provider.cpu_name(), Err(MonitorError::Io { .. })));
    }

    #[test]
    fn cpu_failure_becomes_unknown_cpu() {
        let d = resolve(&BrokenCpu, &OneGpu);
        assert_eq!(d.cpu_name, "Unknown CPU");
        assert_eq!(d.gpu_name, "GeForce RTX 3060");
    }

    #[test]
    fn missing_gpu_capability_is_not_supported() {
        let d = resolve(&FixedCpu("Ryzen"), &NoCapability);
        assert_eq!(d.cpu_name, "Ryzen");
        assert_eq!(d.gpu_name, "GPU: not supported");
    }
}
