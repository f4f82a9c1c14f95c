use std::path::Path;

use tl_core::ComputeDevice;

/// Reports which accelerators the host exposes.
pub trait DeviceProbe: Send + Sync {
    fn metal_available(&self) -> bool;
    fn cuda_available(&self) -> bool;
}

/// Inspects the running machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl DeviceProbe for SystemProbe {
    fn metal_available(&self) -> bool {
        cfg!(all(target_os = "macos", target_arch = "aarch64"))
    }

    fn cuda_available(&self) -> bool {
        // An empty or "-1" CUDA_VISIBLE_DEVICES hides every GPU from the runtime.
        if let Ok(visible) = std::env::var("CUDA_VISIBLE_DEVICES") {
            let visible = visible.trim();
            if visible.is_empty() || visible == "-1" {
                return false;
            }
        }
        Path::new("/proc/driver/nvidia/version").exists() || Path::new("/dev/nvidia0").exists()
    }
}

/// Pins selection to one device, e.g. from a `--device` flag.
#[derive(Debug, Clone, Copy)]
pub struct FixedDevice(pub ComputeDevice);

impl DeviceProbe for FixedDevice {
    fn metal_available(&self) -> bool {
        self.0 == ComputeDevice::Metal
    }

    fn cuda_available(&self) -> bool {
        self.0 == ComputeDevice::Cuda
    }
}

/// Metal first, then CUDA, then the CPU.
pub fn select_device(probe: &dyn DeviceProbe) -> ComputeDevice {
    if probe.metal_available() {
        ComputeDevice::Metal
    } else if probe.cuda_available() {
        ComputeDevice::Cuda
    } else {
        ComputeDevice::Cpu
    }
}

pub fn probe_for(forced: Option<ComputeDevice>) -> Box<dyn DeviceProbe> {
    match forced {
        Some(device) => Box::new(FixedDevice(device)),
        None => Box::new(SystemProbe),
    }
}
