use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

pub mod doubles;

pub const TOKEN: &str = "dev";

pub struct ServerGuard {
    pub base_url: String,
    pub token: String,
    _data_dir: Option<tempfile::TempDir>,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Starts a docstore on a fresh data dir, seeded with [`catalog_seed`].
pub fn spawn_server() -> Result<ServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;
    let seed = write_catalog_seed(data_dir.path())?;
    let mut guard = spawn_server_in(&data_dir.path().join("docs"), Some(&seed))?;
    guard._data_dir = Some(data_dir);
    Ok(guard)
}

/// Starts a docstore on `data_dir`; the caller owns the directory.
pub fn spawn_server_in(data_dir: &Path, seed: Option<&Path>) -> Result<ServerGuard> {
    std::fs::create_dir_all(data_dir).context("create docstore data dir")?;
    let addr_file = data_dir.with_extension("addr");
    let _ = std::fs::remove_file(&addr_file);

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_subtrack-docstore"));
    cmd.args([
        "--addr",
        "127.0.0.1:0",
        "--addr-file",
        addr_file.to_str().unwrap(),
        "--data-dir",
        data_dir.to_str().unwrap(),
        "--token",
        TOKEN,
    ]);
    if let Some(seed) = seed {
        cmd.args(["--seed", seed.to_str().unwrap()]);
    }
    let child = cmd
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn subtrack-docstore")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        token: TOKEN.to_string(),
        _data_dir: None,
        child,
    })
}

fn read_addr_file(addr_file: &Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Two catalog services with unsorted plans.
pub fn catalog_seed() -> serde_json::Value {
    serde_json::json!({
        "Services": {
            "Netflix": {
                "Type": "Video",
                "Plans": {"Premium": 22.99, "Basic": 9.99, "Standard": 15.49}
            },
            "Spotify": {
                "Type": "Music",
                "Plans": {"Family": 16.99, "Individual": 10.99}
            }
        }
    })
}

pub fn write_catalog_seed(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("seed.json");
    let bytes = serde_json::to_vec_pretty(&catalog_seed()).context("serialize seed")?;
    std::fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
