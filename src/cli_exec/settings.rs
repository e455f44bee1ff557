use super::*;

pub(super) fn handle_settings_command(home: &ClientHome, command: SettingsCommands) -> Result<()> {
    match command {
        SettingsCommands::Show { json } => {
            let settings = home.read_settings()?;
            if json {
                return print_json(&settings, "settings");
            }
            println!("logged_in: {}", settings.is_user_logged_in);
            println!("dark_mode: {}", settings.is_dark_mode);
            println!("language: {}", settings.selected_language);
        }
        SettingsCommands::Set {
            dark_mode,
            language,
        } => {
            if dark_mode.is_none() && language.is_none() {
                anyhow::bail!("nothing to change (pass --dark-mode and/or --language)");
            }
            home.update_settings(|s| {
                if let Some(dark_mode) = dark_mode {
                    s.is_dark_mode = dark_mode;
                }
                if let Some(language) = language {
                    s.selected_language = language;
                }
            })?;
            println!("Settings saved");
        }
    }
    Ok(())
}
