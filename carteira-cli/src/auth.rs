use anyhow::{Context, Result, bail};
use carteira_api::{ApiClient, LoginRequest, RegisterRequest, Session};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::Config;
use crate::state::ensure_carteira_home;

fn session_path() -> Result<PathBuf> {
    Ok(ensure_carteira_home()?.join("session.json"))
}

pub fn load_session() -> Result<Session> {
    load_session_from(&session_path()?)
}

pub fn load_session_from(p: &Path) -> Result<Session> {
    if !p.exists() {
        return Ok(Session::Anonymous);
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_session(session: &Session) -> Result<()> {
    save_session_to(session, &session_path()?)
}

pub fn save_session_to(session: &Session, p: &Path) -> Result<()> {
    let s = serde_json::to_string_pretty(session)?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Client carrying the stored session.
pub fn client(cfg: &Config) -> Result<ApiClient> {
    let session = load_session()?;
    ApiClient::new(&cfg.client_config(), session).context("building HTTP client")
}

/// Client for commands that need a logged-in user.
pub fn authed_client(cfg: &Config) -> Result<ApiClient> {
    let c = client(cfg)?;
    if !c.session().is_authenticated() {
        bail!("not logged in. Run: carteira login --user <name>");
    }
    Ok(c)
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    let password = match password {
        Some(p) => p,
        None => prompt("Senha")?,
    };
    if password.is_empty() {
        bail!("password must not be empty");
    }
    Ok(password)
}

pub async fn login(cfg: &Config, user: String, password: Option<String>) -> Result<()> {
    let mut c = client(cfg)?;
    let credentials = LoginRequest {
        user_name: user,
        password: password_or_prompt(password)?,
    };

    let resp = c.login(&credentials).await.context("login")?;
    if !c.session().is_authenticated() {
        bail!(
            "login refused: {}",
            resp.message.as_deref().unwrap_or("no token returned")
        );
    }

    save_session(c.session())?;
    let name = c
        .session()
        .user()
        .map(|u| u.user_name.clone())
        .unwrap_or(credentials.user_name);
    println!("Logged in as {}", name);
    Ok(())
}

pub async fn register(
    cfg: &Config,
    user: String,
    email: String,
    document: String,
    password: Option<String>,
) -> Result<()> {
    let mut c = client(cfg)?;
    let data = RegisterRequest {
        user_name: user,
        email,
        document,
        password: password_or_prompt(password)?,
    };

    let resp = c.register(&data).await.context("register")?;
    if !resp.success {
        bail!(
            "registration refused: {}",
            resp.message.as_deref().unwrap_or("unknown reason")
        );
    }

    if c.session().is_authenticated() {
        save_session(c.session())?;
        println!("Account created; logged in as {}", data.user_name);
    } else {
        println!("Account created. Next: carteira login --user {}", data.user_name);
    }
    Ok(())
}

pub async fn logout(cfg: &Config) -> Result<()> {
    let mut c = client(cfg)?;
    let remote = c.logout().await;
    // The local session goes away even if the server could not be told.
    save_session(c.session())?;
    if let Err(e) = remote {
        warn!(error = %e, "server logout failed");
    }
    println!("Logged out");
    Ok(())
}

pub async fn status(cfg: &Config) -> Result<()> {
    let mut c = client(cfg)?;
    if !c.session().is_authenticated() {
        println!("Not logged in ({})", c.base_url());
        return Ok(());
    }

    let valid = c.validate().await.context("validating session")?;
    if valid {
        let who = c
            .session()
            .user()
            .map(|u| u.user_name.as_str())
            .unwrap_or("(unknown user)");
        println!("Logged in as {} ({})", who, c.base_url());
    } else {
        save_session(c.session())?;
        println!("Session expired; log in again");
    }
    Ok(())
}
