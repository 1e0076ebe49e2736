use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use std::io::Stdout;
use std::time::Duration;
use tracing::warn;

use trove_storefront::catalogue;
use trove_storefront::domain::{CityFilter, Experience, ExperienceStatus, Location};

use crate::app::{handle_input, App};
use crate::ui;

/// Run the application in headless mode (no UI)
pub async fn run_headless(app: &App, json: bool) -> Result<()> {
    let summary = build_catalogue_summary(app).await;

    if json {
        let json = serde_json::to_string_pretty(&summary)?;
        println!("{json}");
    } else {
        render_catalogue_summary(&summary);
    }

    Ok(())
}

fn render_catalogue_summary(summary: &CatalogueSummary) {
    println!("\nTrove Catalogue");
    println!("===============");
    println!("Backend: {}", summary.api_base_url);
    if let Some(error) = &summary.location_error {
        println!("Locations: fallback data ({error})");
    }
    if let Some(error) = &summary.experience_error {
        println!("Experiences: unavailable ({error})");
    }

    println!("\nLocations:");
    for location in &summary.locations {
        println!("- {} ({})", location.name, location.location_id);
    }

    println!("\nCity filters:");
    for filter in &summary.city_filters {
        println!("- {}: {}", filter.code, filter.name);
    }

    if !summary.code_collisions.is_empty() {
        println!("\nCity code collisions:");
        for (code, names) in &summary.code_collisions {
            println!("- {code}: {}", names.join(", "));
        }
    }

    println!("\nExperiences by status:");
    for (status, count) in &summary.by_status {
        println!("- {status}: {count}");
    }

    println!("\nUpcoming ({} displayable):", summary.displayable);
    for item in &summary.upcoming {
        println!(
            "- {} | {} | {} | {:.2}",
            item.date, item.heading, item.location, item.price
        );
    }
}

async fn build_catalogue_summary(app: &App) -> CatalogueSummary {
    let store = app.actions.store();
    let client = app.actions.client();

    let (_, experiences) = tokio::join!(store.init(), client.fetch_experiences());

    let (all, experience_error): (Vec<Experience>, _) = match experiences {
        Ok(all) => (all.as_ref().clone(), None),
        Err(e) => {
            warn!(error = %e, "experiences unavailable in headless mode");
            (Vec::new(), Some(e.to_string()))
        }
    };

    let by_status = ExperienceStatus::ALL
        .iter()
        .map(|status| {
            let count = all.iter().filter(|exp| exp.status == *status).count();
            (status.as_str().to_string(), count)
        })
        .collect();

    let displayable = catalogue::displayable(&all, app.policy);
    let upcoming = catalogue::upcoming(&displayable, app.today)
        .into_iter()
        .map(|exp| UpcomingItem {
            date: exp.date().map(|d| d.to_string()).unwrap_or_default(),
            price: catalogue::discounted_price(&exp),
            location: exp.location.name,
            heading: exp.heading,
        })
        .collect();

    CatalogueSummary {
        api_base_url: client.base_url().to_string(),
        locations: store.locations(),
        location_error: store.error(),
        city_filters: store.city_filters(),
        code_collisions: store.code_collisions(),
        experience_error,
        by_status,
        displayable: displayable.len(),
        upcoming,
    }
}

#[derive(Serialize)]
struct CatalogueSummary {
    api_base_url: String,
    locations: Vec<Location>,
    location_error: Option<String>,
    city_filters: Vec<CityFilter>,
    code_collisions: Vec<(String, Vec<String>)>,
    experience_error: Option<String>,
    by_status: Vec<(String, usize)>,
    displayable: usize,
    upcoming: Vec<UpcomingItem>,
}

#[derive(Serialize)]
struct UpcomingItem {
    date: String,
    heading: String,
    location: String,
    price: f64,
}

/// Run the main application event loop
pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        app.tick();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {}
            }
        }
    }
    Ok(())
}
