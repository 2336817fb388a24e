//! Error types for the backdrop.
//!
//! None of these ever escape a frame tick: a failed surface disables the
//! backdrop, and numerical trouble is handled by respawning particles. They
//! surface only at setup time (configuration, GPU, window) and when saving
//! a snapshot.

use std::fmt;

/// Errors that can occur while acquiring a drawing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The requested surface has zero width or height.
    ZeroSize { width: u32, height: u32 },
    /// The requested surface would not fit in memory.
    TooLarge { width: u32, height: u32 },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::ZeroSize { width, height } => {
                write!(f, "Surface has no drawable area ({}x{})", width, height)
            }
            SurfaceError::TooLarge { width, height } => {
                write!(f, "Surface is too large to allocate ({}x{})", width, height)
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Invalid backdrop configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The particle count is zero.
    NoParticles,
    /// A duration measured in frames is zero.
    ZeroFrames(&'static str),
    /// The cycle range has `min > max`.
    EmptyCycleRange { min: u32, max: u32 },
    /// A length or rate that must be positive and finite is not.
    NotPositive(&'static str, f32),
    /// A probability lies outside `[0, 1]`.
    NotProbability(&'static str, f32),
    /// A spawn rule has a negative or non-finite extent, or could place
    /// particles beyond the bound radius.
    SpawnOutOfBound {
        rule: &'static str,
        reach: f32,
        bound: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoParticles => write!(f, "Particle count must be at least 1"),
            ConfigError::ZeroFrames(name) => write!(f, "`{}` must be at least one frame", name),
            ConfigError::EmptyCycleRange { min, max } => {
                write!(f, "Cycle range is empty: min {} > max {}", min, max)
            }
            ConfigError::NotPositive(name, value) => {
                write!(f, "`{}` must be positive and finite, got {}", name, value)
            }
            ConfigError::NotProbability(name, value) => {
                write!(f, "`{}` must lie in [0, 1], got {}", name, value)
            }
            ConfigError::SpawnOutOfBound { rule, reach, bound } => write!(
                f,
                "`{}` reaches {} but must lie within [0, {}]",
                rule, reach, bound
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for presenting.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The window surface reports no usable texture format.
    NoSurfaceFormat,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(
                f,
                "No compatible GPU adapter found. \
                 Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."
            ),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::NoSurfaceFormat => {
                write!(f, "Window surface has no supported texture format")
            }
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when saving a canvas snapshot.
#[derive(Debug)]
pub enum CaptureError {
    /// Failed to encode or write the image.
    Encode(image::ImageError),
    /// The pixel buffer does not match the canvas dimensions.
    BufferSize { expected: usize, actual: usize },
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Encode(e) => write!(f, "Failed to write snapshot: {}", e),
            CaptureError::BufferSize { expected, actual } => write!(
                f,
                "Snapshot buffer holds {} bytes, canvas needs {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for CaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaptureError::Encode(e) => Some(e),
            CaptureError::BufferSize { .. } => None,
        }
    }
}

impl From<image::ImageError> for CaptureError {
    fn from(e: image::ImageError) -> Self {
        CaptureError::Encode(e)
    }
}

/// Errors that can occur when running the windowed host.
#[derive(Debug)]
pub enum AppError {
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create the window.
    Window(winit::error::OsError),
    /// Invalid configuration.
    Config(ConfigError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::EventLoop(e) => write!(f, "Event loop failed: {}", e),
            AppError::Window(e) => write!(f, "Failed to create window: {}", e),
            AppError::Config(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::EventLoop(e) => Some(e),
            AppError::Window(e) => Some(e),
            AppError::Config(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for AppError {
    fn from(e: winit::error::EventLoopError) -> Self {
        AppError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for AppError {
    fn from(e: winit::error::OsError) -> Self {
        AppError::Window(e)
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}
