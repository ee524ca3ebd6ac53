use std::path::Path;

use crate::error::Error;

/// File name of the optional project config, looked up in the project root.
pub const CONFIG_FILE: &str = ".pagecheck.toml";

/// Directories searched for page files, relative to the project root.
pub const DEFAULT_PAGE_DIRECTORIES: &[&str] = &[
    "resources/js/Pages",
    "resources/js/pages",
    "resources/ts/Pages",
    "resources/ts/pages",
    "resources/vue/Pages",
    "resources/vue/pages",
    "resources/react/Pages",
    "resources/react/pages",
];

/// Extensions a page file may carry, each with its leading dot.
pub const DEFAULT_PAGE_EXTENSIONS: &[&str] = &[".vue", ".jsx", ".tsx", ".js", ".ts"];

/// Where page files may live: every directory crossed with every extension.
/// Both lists are non-empty; construction enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionTable {
    directories: Vec<String>,
    extensions: Vec<String>,
}

impl ConventionTable {
    /// Build a table from explicit lists.
    ///
    /// # Errors
    ///
    /// Returns the violated constraint if either list is empty or an
    /// extension does not start with `.`.
    pub fn new(directories: Vec<String>, extensions: Vec<String>) -> Result<Self, String> {
        if directories.is_empty() {
            return Err("at least one page directory is required".to_string());
        }
        if extensions.is_empty() {
            return Err("at least one page extension is required".to_string());
        }
        if let Some(bad) = extensions.iter().find(|e| return !e.starts_with('.') || e.len() < 2) {
            return Err(format!("page extension `{bad}` must start with `.`"));
        }
        return Ok(Self { directories, extensions });
    }

    /// Directories in resolution order.
    pub fn directories(&self) -> &[String] {
        return &self.directories;
    }

    /// Extensions in resolution order.
    pub fn extensions(&self) -> &[String] {
        return &self.extensions;
    }

    /// Whether a file name ends in one of the configured extensions.
    /// Only the final extension counts: `Login.d.ts` matches `.ts`.
    pub fn has_page_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| return e.to_str()) else {
            return false;
        };
        return self
            .extensions
            .iter()
            .any(|known| return known.strip_prefix('.') == Some(ext));
    }
}

impl Default for ConventionTable {
    fn default() -> Self {
        return Self {
            directories: DEFAULT_PAGE_DIRECTORIES.iter().map(|d| return (*d).to_string()).collect(),
            extensions: DEFAULT_PAGE_EXTENSIONS.iter().map(|e| return (*e).to_string()).collect(),
        };
    }
}

/// Identifiers that mark a call as referencing a page by name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CallPatterns {
    /// Free functions whose first argument is a page name.
    pub helper_functions: Vec<String>,
    /// Instance methods whose first argument is a page name.
    pub instance_methods: Vec<String>,
    /// Static method on a renderer class whose first argument is a page name.
    pub render_method: String,
    /// Classes (simple or fully-qualified) that render pages.
    pub renderer_classes: Vec<String>,
    /// Static method on a router class whose second argument is a page name.
    pub route_method: String,
    /// Classes (simple or fully-qualified) that register page routes.
    pub router_classes: Vec<String>,
}

impl Default for CallPatterns {
    fn default() -> Self {
        return Self {
            helper_functions: vec!["inertia".to_string()],
            instance_methods: vec!["inertia".to_string()],
            render_method: "render".to_string(),
            renderer_classes: vec!["Inertia".to_string(), "Inertia\\Inertia".to_string()],
            route_method: "inertia".to_string(),
            router_classes: vec![
                "Route".to_string(),
                "Illuminate\\Support\\Facades\\Route".to_string(),
            ],
        };
    }
}

/// Project configuration loaded from `.pagecheck.toml`.
/// Include/exclude patterns are path prefixes applied to PHP source files.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Call shapes that reference pages.
    pub calls: CallPatterns,
    exclude: Vec<String>,
    include: Vec<String>,
    /// Where page files live.
    pub pages: ConventionTable,
}

/// Raw TOML structure for `.pagecheck.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct PagecheckTomlConfig {
    #[serde(default)]
    calls: CallPatterns,
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    pages: PagesTomlSection,
}

/// Raw `[pages]` table. Absent keys fall back to the defaults.
#[derive(Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct PagesTomlSection {
    directories: Option<Vec<String>>,
    extensions: Option<Vec<String>>,
}

impl Config {
    /// Load config from `.pagecheck.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed; a config the user
    /// wrote is never silently replaced by defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// `Error::TomlDe` if the TOML is malformed,
    /// or `Error::InvalidConfig` if the page lists are unusable.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        return Self::parse(&content).map_err(|e| {
            return match e {
                Error::InvalidConfig { reason, .. } => Error::InvalidConfig { path, reason },
                other => other,
            };
        });
    }

    /// Parse config from TOML content.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed,
    /// or `Error::InvalidConfig` (with an empty path) if the page lists are unusable.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: PagecheckTomlConfig = toml::from_str(content)?;
        let defaults = ConventionTable::default();
        let directories = raw.pages.directories.unwrap_or_else(|| return defaults.directories.clone());
        let extensions = raw.pages.extensions.unwrap_or_else(|| return defaults.extensions.clone());
        let pages = ConventionTable::new(directories, extensions).map_err(|reason| {
            return Error::InvalidConfig {
                path: std::path::PathBuf::new(),
                reason,
            };
        })?;

        return Ok(Self {
            calls: raw.calls,
            exclude: raw.exclude,
            include: raw.include,
            pages,
        });
    }

    /// Check whether a PHP file path should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        !self.exclude.iter().any(|p| relative_path.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_eight_directories_and_five_extensions() {
        let table = ConventionTable::default();
        assert_eq!(table.directories().len(), 8);
        assert_eq!(table.extensions(), [".vue", ".jsx", ".tsx", ".js", ".ts"]);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.pages, ConventionTable::default());
        assert_eq!(config.calls, CallPatterns::default());
        assert!(config.should_scan("app/Http/Controllers/HomeController.php"));
    }

    #[test]
    fn partial_pages_section_keeps_other_default() {
        let config = Config::parse("[pages]\nextensions = [\".svelte\"]\n").unwrap();
        assert_eq!(config.pages.extensions(), [".svelte"]);
        assert_eq!(config.pages.directories().len(), 8);
    }

    #[test]
    fn partial_calls_section_keeps_other_defaults() {
        let config = Config::parse("[calls]\nhelper_functions = [\"page\"]\n").unwrap();
        assert_eq!(config.calls.helper_functions, ["page"]);
        assert_eq!(config.calls.render_method, "render");
    }

    #[test]
    fn empty_directory_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[pages]\ndirectories = []\n").unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { ref path, .. } if path.ends_with(CONFIG_FILE)));
    }

    #[test]
    fn extension_without_dot_is_rejected() {
        let err = Config::parse("[pages]\nextensions = [\"vue\"]\n").unwrap_err();
        assert!(err.to_string().contains("`vue`"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(Config::parse("include = ["), Err(Error::TomlDe(_))));
    }

    #[test]
    fn include_and_exclude_prefixes() {
        let config = Config::parse("include = [\"app/\"]\nexclude = [\"app/Legacy/\"]\n").unwrap();
        assert!(config.should_scan("app/Http/Controllers/A.php"));
        assert!(!config.should_scan("app/Legacy/B.php"));
        assert!(!config.should_scan("routes/web.php"));
    }

    #[test]
    fn extension_match_uses_final_extension() {
        let table = ConventionTable::default();
        assert!(table.has_page_extension(Path::new("Auth/Login.vue")));
        assert!(table.has_page_extension(Path::new("types.d.ts")));
        assert!(!table.has_page_extension(Path::new("Auth/Login.php")));
        assert!(!table.has_page_extension(Path::new("README")));
    }
}
