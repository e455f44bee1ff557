use super::*;

impl ClientHome {
    pub fn read_config(&self) -> Result<ClientConfig> {
        let cfg: ClientConfig = read_json_or_default(&self.root.join(CONFIG_FILE))?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported client config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ClientConfig) -> Result<()> {
        write_json(&self.root.join(CONFIG_FILE), cfg).context("write config.json")
    }

    pub fn read_settings(&self) -> Result<ClientSettings> {
        read_json_or_default(&self.root.join(SETTINGS_FILE))
    }

    pub fn write_settings(&self, settings: &ClientSettings) -> Result<()> {
        write_json(&self.root.join(SETTINGS_FILE), settings).context("write settings.json")
    }

    pub fn update_settings(&self, f: impl FnOnce(&mut ClientSettings)) -> Result<ClientSettings> {
        let mut settings = self.read_settings()?;
        f(&mut settings);
        self.write_settings(&settings)?;
        Ok(settings)
    }

    pub fn read_session(&self) -> Result<SessionState> {
        read_json_or_default(&self.root.join(SESSION_FILE))
    }

    pub fn write_session(&self, session: &SessionState) -> Result<()> {
        write_json(&self.root.join(SESSION_FILE), session).context("write session.json")
    }
}

#[cfg(test)]
#[path = "../tests/home/files_tests.rs"]
mod tests;
