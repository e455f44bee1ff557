use subtrack::model::{AccountId, RemoteConfig};
use subtrack::view::ProfileView;

use super::*;

pub(super) fn handle_login_command(
    home: &ClientHome,
    url: String,
    token: String,
    email: String,
) -> Result<()> {
    let account = AccountId::parse(&email)?;
    let mut cfg = home.read_config()?;

    // Another account's subscriptions must not survive in the mirror.
    if cfg
        .account
        .as_deref()
        .is_some_and(|current| current != account.as_str())
    {
        let previous = home.coordinator()?;
        previous
            .sign_out()
            .context("clear the previous account's mirrored subscriptions")?;
        save_session(home, &previous)?;
    }

    cfg.remote = Some(RemoteConfig {
        base_url: url,
        token,
    });
    cfg.account = Some(account.to_string());
    home.write_config(&cfg)?;
    home.update_settings(|s| s.is_user_logged_in = true)?;
    println!("Logged in as {}", account);
    Ok(())
}

pub(super) fn handle_logout_command(home: &ClientHome) -> Result<()> {
    let sync = home.coordinator()?;
    sync.sign_out().context("sign out")?;
    save_session(home, &sync)?;

    let mut cfg = home.read_config()?;
    cfg.account = None;
    home.write_config(&cfg)?;
    home.update_settings(|s| s.is_user_logged_in = false)?;
    println!("Logged out");
    Ok(())
}

pub(super) async fn handle_register_command(
    home: &ClientHome,
    name: &str,
    surname: &str,
) -> Result<()> {
    let sync = home.coordinator()?;
    let result = sync.create_account_document(name, surname).await;
    save_session(home, &sync)?;
    result.context("create account document")?;
    println!("Account document created for {}", sync.account());
    Ok(())
}

pub(super) async fn handle_profile_command(home: &ClientHome, json: bool) -> Result<()> {
    let sync = home.coordinator()?;
    let mut view = ProfileView::default();
    view.begin_load();
    view.apply(sync.load_profile().await);
    save_session(home, &sync)?;
    settled(view.state())?;

    let Some(profile) = view.profile() else {
        return Ok(());
    };
    if json {
        return print_json(profile, "profile");
    }
    println!("email: {}", profile.email);
    println!("name: {}", profile.full_name);
    println!("subscriptions: {}", profile.subscription_count);
    println!("monthly: {}", money(profile.monthly_spend));
    println!("annual: {}", money(profile.annual_spend()));
    Ok(())
}
