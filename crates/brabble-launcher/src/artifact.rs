//! Where the compiled artifact lives.

use std::path::{Path, PathBuf};

use crate::config::Config;

/// Path of the artifact for `workdir`: `<workdir>/<bin_dir>/<program>`.
///
/// Used both for the existence check and as the executable that gets spawned.
/// An absolute `bin_dir` replaces `workdir` entirely.
pub fn locate(workdir: &Path, config: &Config) -> PathBuf {
    workdir.join(&config.bin_dir).join(&config.program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_bin_under_workdir() {
        let path = locate(Path::new("/home/me/brabble"), &Config::default());
        assert_eq!(path, PathBuf::from("/home/me/brabble/bin/brabble"));
    }

    #[test]
    fn same_workdir_gives_same_path() {
        let config = Config::default();
        let workdir = Path::new("/srv/app");
        assert_eq!(locate(workdir, &config), locate(workdir, &config));
    }

    #[test]
    fn absolute_bin_dir_ignores_workdir() {
        let config = Config {
            bin_dir: PathBuf::from("/opt/brabble/bin"),
            ..Default::default()
        };
        assert_eq!(
            locate(Path::new("/anywhere"), &config),
            PathBuf::from("/opt/brabble/bin/brabble")
        );
    }
}
