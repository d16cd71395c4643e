use std::env;
use std::path::PathBuf;

/// Fallback collection roots checked after the configured ones
const FALLBACK_COLLECTION_ROOTS: &[&str] = &[
    "/usr/local/share/ansible/collections",
    "/etc/ansible/collections",
];

/// Collection root used when ANSIBLE_COLLECTIONS_PATH is not set
const DEFAULT_COLLECTION_ROOT: &str = "/usr/share/ansible/collections";

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub templates_dir: Option<String>,
    pub collections_paths: Vec<String>,
    pub collection_namespace: String,
    pub collection_name: String,
    pub inventory_config: Option<String>,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            listen_addr: get_env("LISTEN_ADDR", "0.0.0.0:8080"),
            templates_dir: get_env_opt("TEMPLATES_DIR"),
            collections_paths: get_env_opt("ANSIBLE_COLLECTIONS_PATH")
                .map(|v| split_paths(&v))
                .unwrap_or_default(),
            collection_namespace: get_env("COLLECTION_NAMESPACE", "forge"),
            collection_name: get_env("COLLECTION_NAME", "render"),
            inventory_config: get_env_opt("INVENTORY_CONFIG"),
        }
    }

    /// Ordered templates directories to check, most preferred first.
    ///
    /// An explicit TEMPLATES_DIR comes first, then every collection root
    /// joined with `ansible_collections/<namespace>/<collection>/templates`.
    pub fn template_dir_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        // TEMPLATES_DIR points at the templates directory itself, no collection layout
        if let Some(dir) = &self.templates_dir {
            candidates.push(PathBuf::from(dir));
        }

        let mut roots: Vec<PathBuf> = if self.collections_paths.is_empty() {
            vec![PathBuf::from(DEFAULT_COLLECTION_ROOT)]
        } else {
            self.collections_paths.iter().map(PathBuf::from).collect()
        };
        roots.extend(FALLBACK_COLLECTION_ROOTS.iter().map(PathBuf::from));
        if let Some(home) = env::var_os("HOME") {
            roots.push(PathBuf::from(home).join(".ansible").join("collections"));
        }
        if let Ok(cwd) = env::current_dir() {
            roots.push(cwd.join("collections"));
        }

        candidates.extend(roots.into_iter().map(|root| {
            root.join("ansible_collections")
                .join(&self.collection_namespace)
                .join(&self.collection_name)
                .join("templates")
        }));

        candidates
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn split_paths(value: &str) -> Vec<String> {
    value
        .split(':')
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(templates_dir: Option<&str>, collections_paths: &[&str]) -> Config {
        Config {
            listen_addr: "127.0.0.1:0".into(),
            templates_dir: templates_dir.map(String::from),
            collections_paths: collections_paths.iter().map(|p| p.to_string()).collect(),
            collection_namespace: "forge".into(),
            collection_name: "render".into(),
            inventory_config: None,
        }
    }

    #[test]
    fn test_split_paths() {
        assert_eq!(split_paths("/a:/b::/c"), vec!["/a", "/b", "/c"]);
        assert!(split_paths("").is_empty());
    }

    #[test]
    fn test_candidates_order_with_collections_path() {
        let cfg = config(Some("/srv/templates"), &["/opt/one", "/opt/two"]);
        let candidates = cfg.template_dir_candidates();
        assert_eq!(candidates[0], PathBuf::from("/srv/templates"));
        assert_eq!(
            candidates[1],
            PathBuf::from("/opt/one/ansible_collections/forge/render/templates")
        );
        assert_eq!(
            candidates[2],
            PathBuf::from("/opt/two/ansible_collections/forge/render/templates")
        );
        assert_eq!(
            candidates[3],
            PathBuf::from("/usr/local/share/ansible/collections/ansible_collections/forge/render/templates")
        );
        assert!(!candidates.iter().any(|c| c.starts_with(DEFAULT_COLLECTION_ROOT)));
    }

    #[test]
    fn test_candidates_default_root() {
        let cfg = config(None, &[]);
        let candidates = cfg.template_dir_candidates();
        assert_eq!(
            candidates[0],
            PathBuf::from("/usr/share/ansible/collections/ansible_collections/forge/render/templates")
        );
    }
}
