use std::env;

/// Operating systems the launcher knows how to bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Unsupported(String),
}

impl Platform {
    /// Detects the host OS from the compile-time target constant.
    pub fn detect() -> Platform {
        Platform::from_os(env::consts::OS)
    }

    pub fn from_os(os: &str) -> Platform {
        match os {
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            other => Platform::Unsupported(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
            Platform::Unsupported(os) => os.as_str(),
        }
    }

    /// Executable suffix used by binaries on this platform.
    pub fn exe_suffix(&self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            _ => "",
        }
    }
}

/// CPU architecture enumeration for installer selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    X86,      // 32-bit Intel/AMD
    X86_64,   // 64-bit Intel/AMD
    Arm,      // 32-bit ARM
    Arm64,    // 64-bit ARM (Apple Silicon, ARM laptops)
    Unknown,
}

impl Architecture {
    pub fn detect() -> Architecture {
        Architecture::from_arch(env::consts::ARCH)
    }

    pub fn from_arch(arch: &str) -> Architecture {
        match arch {
            "x86" => Architecture::X86,
            "x86_64" => Architecture::X86_64,
            "arm" => Architecture::Arm,
            "aarch64" => Architecture::Arm64,
            _ => Architecture::Unknown,
        }
    }

    /// Host triple of the Windows `rustup-init.exe` build for this architecture.
    pub fn windows_triple(&self) -> Option<&'static str> {
        match self {
            Architecture::X86_64 => Some("x86_64-pc-windows-msvc"),
            Architecture::Arm64 => Some("aarch64-pc-windows-msvc"),
            Architecture::X86 => Some("i686-pc-windows-msvc"),
            Architecture::Arm | Architecture::Unknown => None,
        }
    }
}
