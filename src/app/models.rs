/// Fallback values used when a prompt is left blank or never asked.
#[derive(Debug, Clone)]
pub struct Defaults {
    pub libft_dir: String,
    pub mlx_dir: String,
    pub include_dir: String,
    pub objs_dir: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            libft_dir: "libft".to_string(),
            mlx_dir: "minilibx-linux".to_string(),
            include_dir: "includes".to_string(),
            objs_dir: "objs".to_string(),
        }
    }
}

/// Represents the final configuration after merging presets, CLI args and prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub name: String,
    /// Directory of libft, present only when the project links it.
    pub libft: Option<String>,
    /// Directory of MiniLibX, present only when the project links it.
    pub mlx: Option<String>,
    pub include_dir: String,
    pub objs_dir: String,
    /// Emit `-MMD -MP` and include the generated `.d` files.
    pub track_dependencies: bool,
}

impl ProjectConfig {
    /// A configuration with both libraries disabled.
    pub fn new(name: impl Into<String>, defaults: &Defaults) -> Self {
        Self {
            name: name.into(),
            libft: None,
            mlx: None,
            include_dir: defaults.include_dir.clone(),
            objs_dir: defaults.objs_dir.clone(),
            track_dependencies: true,
        }
    }

    pub fn uses_libft(&self) -> bool {
        self.libft.is_some()
    }

    pub fn uses_mlx(&self) -> bool {
        self.mlx.is_some()
    }

    /// Library directories that must not be scanned for project sources.
    pub fn library_dirs(&self) -> Vec<String> {
        self.libft.iter().chain(self.mlx.iter()).cloned().collect()
    }
}

/// Relative, `/`-separated paths found by one scan, in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    paths: Vec<String>,
}

impl FileSet {
    pub fn new(mut paths: Vec<String>) -> Self {
        paths.sort();
        Self { paths }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_dirs_lists_enabled_libraries_only() {
        let mut config = ProjectConfig::new("demo", &Defaults::default());
        assert!(config.library_dirs().is_empty());

        config.mlx = Some("mlx".to_string());
        assert_eq!(config.library_dirs(), vec!["mlx".to_string()]);

        config.libft = Some("libft".to_string());
        assert_eq!(
            config.library_dirs(),
            vec!["libft".to_string(), "mlx".to_string()]
        );
    }

    #[test]
    fn file_set_is_sorted() {
        let set = FileSet::new(vec!["sub/b.c".into(), "a.c".into()]);
        assert_eq!(set.paths(), ["a.c".to_string(), "sub/b.c".to_string()]);
        assert_eq!(set.len(), 2);
    }
}
