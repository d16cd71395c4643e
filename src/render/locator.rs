use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::normalizers::NetworkOs;

/// Directory name used in place of a model (or family) for shared templates
const MAIN: &str = "main";

/// Ordered list of candidate templates directories; the first that exists wins
#[derive(Debug, Clone, Default)]
pub struct TemplateRoots {
    candidates: Vec<PathBuf>,
}

impl TemplateRoots {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Find the first candidate that is an existing directory
    pub fn locate(&self) -> Result<PathBuf> {
        for dir in &self.candidates {
            tracing::debug!("CHECK: templates_dir {}", dir.display());
            if dir.is_dir() {
                tracing::debug!("FOUND: templates_dir {}", dir.display());
                return Ok(dir.clone());
            }
        }

        tracing::debug!("NOT FOUND: templates_dir");
        Err(Error::TemplatesDirectoryNotFound {
            searched: self.candidates.clone(),
        })
    }
}

/// Hierarchy hints used to pick the most specific template
#[derive(Debug, Clone, Default)]
pub struct TemplateQuery<'a> {
    pub template_name: &'a str,
    pub solution: Option<&'a str>,
    pub family: Option<&'a str>,
    pub model: Option<&'a str>,
}

/// Candidate template paths, most specific first.
///
/// Order: solution/family/model, solution/family/main, solution/main,
/// family/model, family/main, main. Candidates whose hints are missing
/// are skipped.
pub fn candidate_paths(templates_dir: &Path, network_os: NetworkOs, query: &TemplateQuery<'_>) -> Vec<PathBuf> {
    let os_dir = templates_dir.join(network_os.as_str());
    let name = query.template_name;

    let levels: [Option<Vec<&str>>; 6] = [
        match (query.solution, query.family, query.model) {
            (Some(s), Some(f), Some(m)) => Some(vec![s, f, m]),
            _ => None,
        },
        match (query.solution, query.family) {
            (Some(s), Some(f)) => Some(vec![s, f, MAIN]),
            _ => None,
        },
        query.solution.map(|s| vec![s, MAIN]),
        match (query.family, query.model) {
            (Some(f), Some(m)) => Some(vec![f, m]),
            _ => None,
        },
        query.family.map(|f| vec![f, MAIN]),
        Some(vec![MAIN]),
    ];

    levels
        .into_iter()
        .flatten()
        .map(|parts| {
            let mut path = os_dir.clone();
            for part in parts {
                path.push(part);
            }
            path.join(name)
        })
        .collect()
}

/// Resolves templates for one network OS against a templates root strategy
#[derive(Debug, Clone)]
pub struct TemplateLocator {
    roots: TemplateRoots,
}

impl TemplateLocator {
    pub fn new(roots: TemplateRoots) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &TemplateRoots {
        &self.roots
    }

    /// Resolve an untrusted `src` to a canonical path inside the templates
    /// directory. Relative paths are taken from that directory. Missing files
    /// and paths outside it are both reported as not found.
    pub fn contained_src(&self, src: &str) -> Result<PathBuf> {
        let not_found = || Error::TemplateNotFound {
            template_name: None,
            src: Some(src.to_string()),
        };

        let root = self.roots.locate()?.canonicalize().map_err(|_| not_found())?;
        let path = root.join(src).canonicalize().map_err(|_| not_found())?;

        if !path.starts_with(&root) || !path.is_file() {
            tracing::warn!("rejected src outside templates directory: {}", src);
            return Err(not_found());
        }
        Ok(path)
    }

    /// Find a template. An explicit `src` skips all lookups and is only
    /// checked for existence.
    pub fn find_template(
        &self,
        network_os: NetworkOs,
        src: Option<&str>,
        query: &TemplateQuery<'_>,
    ) -> Result<PathBuf> {
        let candidates = match src {
            Some(src) => {
                tracing::debug!("'src' used {}", src);
                vec![PathBuf::from(src)]
            }
            None => {
                let templates_dir = self.roots.locate()?;
                candidate_paths(&templates_dir, network_os, query)
            }
        };

        for path in candidates {
            tracing::debug!("CHECK: templates_path {}", path.display());
            if path.is_file() {
                tracing::debug!("FOUND: templates_path {}", path.display());
                return Ok(path);
            }
        }

        tracing::debug!("NOT FOUND: templates_path");
        Err(Error::TemplateNotFound {
            template_name: Some(query.template_name.to_string()).filter(|n| !n.is_empty()),
            src: src.map(String::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "x").unwrap();
        path
    }

    fn full_query() -> TemplateQuery<'static> {
        TemplateQuery {
            template_name: "standard_acl.j2",
            solution: Some("campus"),
            family: Some("cat9k"),
            model: Some("c9300"),
        }
    }

    #[test]
    fn test_candidate_order() {
        let root = Path::new("/t");
        let paths = candidate_paths(root, NetworkOs::Ios, &full_query());
        let expected = [
            "/t/ios/campus/cat9k/c9300/standard_acl.j2",
            "/t/ios/campus/cat9k/main/standard_acl.j2",
            "/t/ios/campus/main/standard_acl.j2",
            "/t/ios/cat9k/c9300/standard_acl.j2",
            "/t/ios/cat9k/main/standard_acl.j2",
            "/t/ios/main/standard_acl.j2",
        ];
        assert_eq!(paths, expected.iter().map(PathBuf::from).collect::<Vec<_>>());
    }

    #[test]
    fn test_candidates_skip_missing_hints() {
        let query = TemplateQuery {
            template_name: "standard_acl.j2",
            solution: None,
            family: Some("cat9k"),
            model: None,
        };
        let paths = candidate_paths(Path::new("/t"), NetworkOs::Eos, &query);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/t/eos/cat9k/main/standard_acl.j2"),
                PathBuf::from("/t/eos/main/standard_acl.j2"),
            ]
        );
    }

    #[test]
    fn test_most_specific_existing_wins() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "ios/main/standard_acl.j2");
        touch(root, "ios/cat9k/main/standard_acl.j2");
        let expected = touch(root, "ios/campus/main/standard_acl.j2");

        let locator = TemplateLocator::new(TemplateRoots::new(vec![root.to_path_buf()]));
        let found = locator.find_template(NetworkOs::Ios, None, &full_query()).unwrap();
        assert_eq!(found, expected);

        let expected = touch(root, "ios/campus/cat9k/c9300/standard_acl.j2");
        let found = locator.find_template(NetworkOs::Ios, None, &full_query()).unwrap();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_first_existing_root_wins() {
        let missing = TempDir::new().unwrap().path().join("nope");
        let dir = TempDir::new().unwrap();
        let roots = TemplateRoots::new(vec![missing, dir.path().to_path_buf()]);
        assert_eq!(roots.locate().unwrap(), dir.path());
    }

    #[test]
    fn test_no_root_fails_before_candidates() {
        let dir = TempDir::new().unwrap();
        let locator = TemplateLocator::new(TemplateRoots::new(vec![dir.path().join("missing")]));
        let err = locator.find_template(NetworkOs::Ios, None, &full_query()).unwrap_err();
        assert_eq!(err.kind(), "templates_directory_not_found");
    }

    #[test]
    fn test_template_not_found() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "eos/main/standard_acl.j2");
        let locator = TemplateLocator::new(TemplateRoots::new(vec![dir.path().to_path_buf()]));
        let err = locator.find_template(NetworkOs::Ios, None, &full_query()).unwrap_err();
        assert_eq!(err.kind(), "template_not_found");
    }

    #[test]
    fn test_contained_src() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let inside = touch(dir.path(), "ios/main/standard_acl.j2");
        let secret = touch(outside.path(), "secret.txt");
        let locator = TemplateLocator::new(TemplateRoots::new(vec![dir.path().to_path_buf()]));

        let found = locator.contained_src("ios/main/standard_acl.j2").unwrap();
        assert_eq!(found, inside.canonicalize().unwrap());
        let found = locator.contained_src(inside.to_str().unwrap()).unwrap();
        assert_eq!(found, inside.canonicalize().unwrap());

        let escapes = [
            secret.to_str().unwrap().to_string(),
            format!("../{}/secret.txt", outside.path().file_name().unwrap().to_str().unwrap()),
            "ios/main".to_string(),
            "ios/main/missing.j2".to_string(),
        ];
        for src in &escapes {
            let err = locator.contained_src(src).unwrap_err();
            assert_eq!(err.kind(), "template_not_found", "{}", src);
        }
    }

    #[test]
    fn test_src_bypasses_roots() {
        let dir = TempDir::new().unwrap();
        let src = touch(dir.path(), "custom.j2");
        let locator = TemplateLocator::new(TemplateRoots::default());
        let found = locator
            .find_template(NetworkOs::Ios, src.to_str(), &full_query())
            .unwrap();
        assert_eq!(found, src);

        let missing = dir.path().join("missing.j2");
        let err = locator
            .find_template(NetworkOs::Ios, missing.to_str(), &full_query())
            .unwrap_err();
        assert_eq!(err.kind(), "template_not_found");
    }
}
