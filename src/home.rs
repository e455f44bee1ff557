//! The client data directory: config, device settings, persisted session state and the
//! local mirror.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::{AccountId, ClientConfig, ClientSettings};
use crate::remote::HttpGateway;
use crate::session::SessionState;
use crate::store::{JsonMirror, write_atomic};
use crate::sync::SyncCoordinator;

mod files;
mod lifecycle;

pub const HOME_DIR: &str = ".subtrack";

const CONFIG_FILE: &str = "config.json";
const SETTINGS_FILE: &str = "settings.json";
const SESSION_FILE: &str = "session.json";
const MIRROR_DIR: &str = "mirror";

pub type HttpCoordinator = SyncCoordinator<HttpGateway, JsonMirror>;

#[derive(Clone, Debug)]
pub struct ClientHome {
    root: PathBuf,
}

impl ClientHome {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn open_mirror(&self) -> Result<JsonMirror> {
        JsonMirror::open(&self.root.join(MIRROR_DIR))
    }

    /// Builds a coordinator for the configured remote and account, restoring the last
    /// persisted session state.
    pub fn coordinator(&self) -> Result<HttpCoordinator> {
        let cfg = self.read_config()?;
        let remote = cfg
            .remote
            .ok_or_else(|| anyhow!("no remote configured (run `subtrack login`)"))?;
        let email = cfg
            .account
            .ok_or_else(|| anyhow!("not signed in (run `subtrack login`)"))?;
        let account = AccountId::parse(&email).context("configured account")?;

        let gateway = HttpGateway::new(&remote)?;
        let mirror = self.open_mirror()?;
        let session = self.read_session()?;
        Ok(SyncCoordinator::new(gateway, mirror, account, session))
    }
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serialize json")?;
    write_atomic(path, &bytes).with_context(|| format!("write {}", path.display()))
}
