// Compile-time constants from Cargo.toml and build.rs
pub const VERSION: &str = env!("TR_CODER_VERSION");

pub const HOMEPAGE: &str = "https://tokenring.ai";

pub const BANNER_NARROW: &str = include_str!("../assets/banner.narrow.txt");
pub const BANNER_WIDE: &str = include_str!("../assets/banner.wide.txt");

/// One-line banner shown on narrow terminals.
pub fn banner_compact() -> String {
    format!("🤖 TokenRing Coder {} - {}", VERSION, HOMEPAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_compact_mentions_version() {
        let banner = banner_compact();
        assert!(banner.contains(VERSION));
        assert!(banner.ends_with(HOMEPAGE));
    }

    #[test]
    fn test_banners_embedded() {
        assert!(!BANNER_NARROW.trim().is_empty());
        assert!(BANNER_WIDE.lines().count() >= BANNER_NARROW.lines().count() - 1);
    }
}
