//! nix-portable release assets.

pub const DEFAULT_RELEASE_URL: &str = "https://github.com/DavHau/nix-portable/releases/latest/download";

pub const BINARY_NAME: &str = "nix-portable";

/// CPU architectures nix-portable publishes binaries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    ARM64,
}

impl Arch {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "x86_64" | "amd64" => Some(Arch::X86_64),
            "aarch64" | "arm64" => Some(Arch::ARM64),
            _ => None,
        }
    }

    /// Architecture of the running binary.
    pub fn detect() -> Option<Self> {
        Self::from_name(std::env::consts::ARCH)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::ARM64 => "aarch64",
        }
    }
}

pub fn asset_url(base: &str, arch: Arch) -> String {
    format!("{}/{BINARY_NAME}-{}", base.trim_end_matches('/'), arch.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arch_aliases() {
        assert_eq!(Arch::from_name("amd64"), Some(Arch::X86_64));
        assert_eq!(Arch::from_name("arm64"), Some(Arch::ARM64));
        assert_eq!(Arch::from_name("riscv64"), None);
    }

    #[test]
    fn test_asset_url() {
        assert_eq!(
            asset_url(DEFAULT_RELEASE_URL, Arch::ARM64),
            "https://github.com/DavHau/nix-portable/releases/latest/download/nix-portable-aarch64"
        );
        assert_eq!(
            asset_url("https://mirror.example/np/", Arch::X86_64),
            "https://mirror.example/np/nix-portable-x86_64"
        );
    }
}
