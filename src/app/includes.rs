use crate::app::models::FileSet;
use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Local headers (`#include "..."`) referenced by each source file.
pub type IncludeMap = BTreeMap<String, BTreeSet<String>>;

pub fn scan_includes(root: &Path, sources: &FileSet) -> Result<IncludeMap> {
    let mut map = IncludeMap::new();
    for source in sources.iter() {
        let path = root.join(source);
        let bytes = fs::read(&path).with_context(|| format!("Failed to read {:?}", path))?;
        let text = String::from_utf8_lossy(&bytes);
        map.insert(source.to_string(), local_includes(&text));
    }
    Ok(map)
}

fn local_includes(text: &str) -> BTreeSet<String> {
    text.lines()
        .filter_map(|line| line.trim().strip_prefix("#include \""))
        .filter_map(|rest| rest.split('"').next())
        .filter(|header| !header.is_empty())
        .map(str::to_string)
        .collect()
}

/// `(source, header)` pairs whose header matches no discovered header file.
///
/// Matching is by file name only; include search paths are not resolved.
pub fn missing_headers(map: &IncludeMap, headers: &FileSet) -> Vec<(String, String)> {
    let known: BTreeSet<&str> = headers.iter().map(file_name).collect();
    let known = &known;

    map.iter()
        .flat_map(|(source, includes)| {
            includes
                .iter()
                .filter(move |header| !known.contains(file_name(header.as_str())))
                .map(move |header| (source.clone(), header.clone()))
        })
        .collect()
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn collects_quoted_includes_only() {
        let text = "#include <stdio.h>\n  #include \"minishell.h\"\n#include \"utils/str.h\" // x\n#define X \"y\"\n";
        let includes = local_includes(text);
        assert_eq!(
            includes.into_iter().collect::<Vec<_>>(),
            vec!["minishell.h".to_string(), "utils/str.h".to_string()]
        );
    }

    #[test]
    fn scans_each_source_relative_to_root() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("a.c"), "#include \"a.h\"\nint main(void) {}\n").unwrap();
        fs::write(temp.path().join("sub/b.c"), "int b;\n").unwrap();

        let sources = FileSet::new(vec!["a.c".into(), "sub/b.c".into()]);
        let map = scan_includes(temp.path(), &sources).unwrap();

        assert_eq!(map.len(), 2);
        assert!(map["a.c"].contains("a.h"));
        assert!(map["sub/b.c"].is_empty());
    }

    #[test]
    fn missing_source_file_is_an_error() {
        let temp = tempdir().unwrap();
        let sources = FileSet::new(vec!["gone.c".into()]);
        assert!(scan_includes(temp.path(), &sources).is_err());
    }

    #[test]
    fn reports_headers_not_found_by_file_name() {
        let mut map = IncludeMap::new();
        map.insert(
            "a.c".to_string(),
            ["a.h", "../inc/shared.h", "ghost.h"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        let headers = FileSet::new(vec!["inc/a.h".into(), "inc/shared.h".into()]);

        assert_eq!(
            missing_headers(&map, &headers),
            vec![("a.c".to_string(), "ghost.h".to_string())]
        );
    }
}
