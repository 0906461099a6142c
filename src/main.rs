use anyhow::Result;
use tokio_util::sync::CancellationToken;

use skycast_screens::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    skycast_core::init()?;

    // Create the application from on-disk config
    let app = App::new()?;

    tracing::info!("Skycast application started");

    println!("Skycast - Weather Lookup");
    println!("Config directory: {}", app.config().config_dir.display());
    let unit = app.config().weather.temperature_unit;

    // Weather where we are
    let mut current = app.current_location_screen();
    current.refresh().await;
    match (current.weather(), current.error()) {
        (Some(data), _) => {
            let city = current
                .position()
                .and_then(|p| p.city.clone())
                .unwrap_or_else(|| "current location".to_string());
            match data.current_temperature() {
                Some(t) => println!("\n{}: {}", city, unit.format(t)),
                None => println!("\n{}: no temperature data", city),
            }
        }
        (None, Some(message)) => println!("\n{}", message),
        (None, None) => println!("\nStill loading..."),
    }

    // Saved favorites, each with fresh weather
    let mut saved = app.saved_locations_screen();
    let cancel = CancellationToken::new();
    saved.refresh(&cancel).await;

    if let Some(message) = saved.error() {
        println!("{}", message);
    } else if saved.rows().is_empty() {
        println!("\nNo saved locations yet.");
    } else {
        println!("\nSaved locations:");
        for row in saved.rows() {
            match (&row.weather, row.error) {
                (Some(data), _) => match data.current_temperature() {
                    Some(t) => println!("  {} - {}", row.city, unit.format(t)),
                    None => println!("  {} - no temperature data", row.city),
                },
                (None, Some(message)) => println!("  {} - {}", row.city, message),
                (None, None) => println!("  {} - pending", row.city),
            }
        }
    }

    tracing::info!("Skycast exiting");
    Ok(())
}
