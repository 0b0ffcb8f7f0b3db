use crate::app::{App, StartOptions};
use crate::cli::UiMode;
use crate::error::Result;
use crate::plugins::Installer;
use crate::utils::style;

pub fn execute(options: &StartOptions) -> Result<()> {
    let app = App::bootstrap(options)?;
    let config = app.config();

    println!("{}", config.cli.banner_compact);
    println!(
        "{}",
        style::success(format!(
            "Loaded configuration from {}",
            config.config_file.display()
        ))
    );

    let mut plugins = Installer::new();
    let mut agents = Installer::new();
    app.start(&mut plugins, &mut agents)?;

    let configured = plugins.installed().iter().filter(|p| p.configured).count();
    println!(
        "{}",
        style::success(format!("Registered {} agents", agents.agents().len()))
    );
    println!(
        "{}",
        style::success(format!(
            "Installed {} plugins ({} configured)",
            plugins.installed().len(),
            configured
        ))
    );

    if let Some(web) = &config.web_host {
        let port = web
            .port
            .map(|p| p.to_string())
            .unwrap_or_else(|| "random port".to_string());
        let auth = match &web.auth {
            Some(auth) => format!("{} user(s)", auth.users.len()),
            None => "no auth".to_string(),
        };
        println!(
            "{}",
            style::info(format!("Web host on {}:{} ({})", web.host, port, auth))
        );
    }

    match app.ui() {
        UiMode::None => println!("{}", style::info("Running headless")),
        ui => println!(
            "{}",
            style::info(format!(
                "Starting {:?} UI with agent '{}'",
                ui, config.defaults.agent
            ))
        ),
    }

    Ok(())
}
