//! Optional GPU identification.
//!
//! A probe returns `Err(MonitorError::Unsupported)` when the capability it
//! relies on is absent, and `Ok(vec![])` when it works but finds no device.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;
use sysmon_core::{MonitorError, Result, SystemDescriptor};
use tracing::debug;

pub trait GpuProbe: Send + Sync {
    fn gpu_names(&self) -> Result<Vec<String>>;
}

/// Asks `nvidia-smi` for device names.
#[derive(Debug, Clone, Copy, Default)]
pub struct NvidiaSmi;

impl GpuProbe for NvidiaSmi {
    fn gpu_names(&self) -> Result<Vec<String>> {
        let output = Command::new("nvidia-smi")
            .args(["--query-gpu=name", "--format=csv,noheader"])
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => MonitorError::Unsupported("nvidia-smi not installed".into()),
                _ => MonitorError::from(e),
            })?;

        if !output.status.success() {
            // Installed but no driver / no device.
            return Ok(Vec::new());
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Linux DRM class directory: one `cardN/device/vendor` per display adapter.
#[derive(Debug, Clone)]
pub struct DrmProbe {
    root: PathBuf,
}

impl DrmProbe {
    pub fn new() -> Self {
        Self::at("/sys/class/drm")
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for DrmProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuProbe for DrmProbe {
    fn gpu_names(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| {
            MonitorError::Unsupported(format!("cannot read {}: {e}", self.root.display()))
        })?;

        let mut cards: Vec<(String, PathBuf)> = entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                is_card_dir(&name).then(|| (name, entry.path()))
            })
            .collect();
        cards.sort();

        Ok(cards
            .into_iter()
            .filter_map(|(_, path)| std::fs::read_to_string(path.join("device/vendor")).ok())
            .map(|vendor| vendor_label(vendor.trim()))
            .collect())
    }
}

/// Tries each probe in turn; the first one that finds a device wins.
pub struct FirstAvailable(pub Vec<Box<dyn GpuProbe>>);

impl GpuProbe for FirstAvailable {
    fn gpu_names(&self) -> Result<Vec<String>> {
        let mut supported = false;
        for probe in &self.0 {
            match probe.gpu_names() {
                Ok(names) if !names.is_empty() => return Ok(names),
                Ok(_) => supported = true,
                Err(e) => debug!("GPU probe skipped: {e}"),
            }
        }
        if supported {
            Ok(Vec::new())
        } else {
            Err(MonitorError::Unsupported("no GPU probe available".into()))
        }
    }
}

/// The probe chain for the platform this binary was built for.
pub fn platform_probe() -> Box<dyn GpuProbe> {
    if cfg!(target_os = "linux") {
        Box::new(FirstAvailable(vec![Box::new(NvidiaSmi), Box::new(DrmProbe::new())]))
    } else {
        Box::new(NvidiaSmi)
    }
}

/// First GPU name, or the matching sentinel.
pub fn gpu_label(probe: &dyn GpuProbe) -> String {
    match probe.gpu_names() {
        Ok(names) => names
            .into_iter()
            .next()
            .unwrap_or_else(|| SystemDescriptor::GPU_NOT_FOUND.to_string()),
        Err(e) => {
            debug!("GPU lookup unavailable: {e}");
            SystemDescriptor::GPU_NOT_SUPPORTED.to_string()
        }
    }
}

/// `card0`, `card1`… but not connector entries like `card0-HDMI-A-1`.
fn is_card_dir(name: &str) -> bool {
    name.strip_prefix("card")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

fn vendor_label(vendor_id: &str) -> String {
    match vendor_id {
        "0x1002" => "AMD GPU".to_string(),
        "0x8086" => "Intel GPU".to_string(),
        "0x10de" => "NVIDIA GPU".to_string(),
        "0x14e4" => "Broadcom GPU".to_string(),
        other => format!("GPU ({other})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<Vec<String>>);

    impl GpuProbe for Fixed {
        fn gpu_names(&self) -> Result<Vec<String>> {
            match &self.0 {
                Ok(v) => Ok(v.clone()),
                Err(e) => Err(MonitorError::Unsupported(e.to_string())),
            }
        }
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sysmon-drm-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn add_card(root: &std::path::Path, card: &str, vendor: &str) {
        let dev = root.join(card).join("device");
        std::fs::create_dir_all(&dev).unwrap();
        std::fs::write(dev.join("vendor"), format!("{vendor}\n")).unwrap();
    }

    #[test]
    fn unsupported_maps_to_sentinel() {
        let probe = Fixed(Err(MonitorError::Unsupported("x".into())));
        assert_eq!(gpu_label(&probe), "GPU: not supported");
    }

    #[test]
    fn no_devices_maps_to_not_found() {
        assert_eq!(gpu_label(&Fixed(Ok(Vec::new()))), "GPU: Not found");
    }

    #[test]
    fn first_device_wins() {
        let probe = Fixed(Ok(vec!["A".into(), "B".into()]));
        assert_eq!(gpu_label(&probe), "A");
    }

    #[test]
    fn chain_falls_through_unsupported() {
        let chain = FirstAvailable(vec![
            Box::new(Fixed(Err(MonitorError::Unsupported("x".into())))),
            Box::new(Fixed(Ok(vec!["Intel GPU".into()]))),
        ]);
        assert_eq!(chain.gpu_names().unwrap(), vec!["Intel GPU".to_string()]);
    }

    #[test]
    fn chain_of_empty_is_supported_but_empty() {
        let chain = FirstAvailable(vec![
            Box::new(Fixed(Err(MonitorError::Unsupported("x".into())))),
            Box::new(Fixed(Ok(Vec::new()))),
        ]);
        assert!(chain.gpu_names().unwrap().is_empty());
    }

    #[test]
    fn chain_of_unsupported_is_unsupported() {
        let chain = FirstAvailable(vec![Box::new(Fixed(Err(MonitorError::Unsupported("x".into()))))]);
        assert!(matches!(chain.gpu_names(), Err(MonitorError::Unsupported(_))));
    }

    #[test]
    fn drm_reads_vendor_ids_in_card_order() {
        let root = scratch_dir("vendors");
        add_card(&root, "card1", "0x10de");
        add_card(&root, "card0", "0x8086");
        add_card(&root, "card0-HDMI-A-1", "0x8086");
        let names = DrmProbe::at(&root).gpu_names().unwrap();
        assert_eq!(names, vec!["Intel GPU".to_string(), "NVIDIA GPU".to_string()]);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn drm_missing_root_is_unsupported() {
        let probe = DrmProbe::at("/nonexistent/sys/class/drm");
        assert!(matches!(probe.gpu_names(), Err(MonitorError::Unsupported(_))));
    }

    #[test]
    fn card_dir_names() {
        assert!(is_card_dir("card0"));
        assert!(is_card_dir("card12"));
        assert!(!is_card_dir("card"));
        assert!(!is_card_dir("card0-DP-1"));
        assert!(!is_card_dir("renderD128"));
    }

    #[test]
    fn unknown_vendor_keeps_id() {
        assert_eq!(vendor_label("0xabcd"), "GPU (0xabcd)");
    }
}
