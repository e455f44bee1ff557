use super::*;

impl ClientHome {
    /// Creates the data directory with a default config. An existing config is only
    /// replaced with `force`.
    pub fn init(dir: &Path, force: bool) -> Result<Self> {
        if dir.join(CONFIG_FILE).exists() && !force {
            return Err(anyhow!(
                "{} is already initialised (use --force to re-init)",
                dir.display()
            ));
        }
        fs::create_dir_all(dir.join(MIRROR_DIR)).context("create mirror dir")?;

        let home = Self {
            root: dir.to_path_buf(),
        };
        home.write_config(&ClientConfig::default())?;
        home.write_settings(&ClientSettings::default())?;
        home.write_session(&SessionState::default())?;
        Ok(home)
    }

    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.join(CONFIG_FILE).is_file() {
            return Err(anyhow!(
                "no client data at {} (run `subtrack init`)",
                dir.display()
            ));
        }
        Ok(Self {
            root: dir.to_path_buf(),
        })
    }
}
