//! Interactive form for GeoAid.
//!
//! Provides a menu-driven interface using `dialoguer`: pick a finder, fill
//! in its fields, see the results, repeat until "Quit". Each finder keeps
//! its own state between rounds.

use dialoguer::{Input, Select};
use geo_aid_cli_utils::MultiProgress;
use geo_aid_finder::{Finders, RoadPair};
use geo_aid_geocoder::GeocodingService;
use geo_aid_geocoder_models::Domain;

use crate::{input, render, with_spinner};

/// Top-level actions available in the interactive menu.
enum Action {
    FindIntersection,
    FindStreets,
    FindHighways,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::FindIntersection,
        Self::FindStreets,
        Self::FindHighways,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::FindIntersection => Domain::Intersection.title(),
            Self::FindStreets => Domain::Street.title(),
            Self::FindHighways => Domain::Highway.title(),
            Self::Quit => "Quit",
        }
    }
}

/// Prompts for a required text field.
fn prompt_required(prompt: &str) -> Result<String, dialoguer::Error> {
    Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(|value: &String| input::non_blank(value).map(|_| ()))
        .interact_text()
}

/// Runs the interactive loop until the user picks "Quit".
///
/// Search failures and empty results are shown inline and do not end the
/// loop.
///
/// # Errors
///
/// Returns an error if the terminal prompts fail.
pub async fn run<S: GeocodingService + ?Sized>(
    multi: &MultiProgress,
    finders: &mut Finders<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("GeoAid");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to find?")
            .items(&labels)
            .default(0)
            .interact()?;

        let output = match Action::ALL[idx] {
            Action::FindIntersection => {
                let road1 = prompt_required("First Road (e.g. Main Street)")?;
                let road2 = prompt_required("Second Road (e.g. Broadway)")?;
                let roads = RoadPair::new(road1, road2);
                let state = with_spinner(
                    Some(multi),
                    Domain::Intersection,
                    finders.find_intersection(&roads),
                )
                .await;
                render::text(Domain::Intersection, state)
            }
            Action::FindStreets => {
                let name = prompt_required("Street Name (e.g. Broadway)")?;
                let state =
                    with_spinner(Some(multi), Domain::Street, finders.find_streets(&name)).await;
                render::text(Domain::Street, state)
            }
            Action::FindHighways => {
                println!("Try including state/country for better results");
                let name = prompt_required("Highway Name/Number (e.g. MN-62, A1, Route 66)")?;
                let state =
                    with_spinner(Some(multi), Domain::Highway, finders.find_highways(&name)).await;
                render::text(Domain::Highway, state)
            }
            Action::Quit => break,
        };

        println!();
        println!("{output}");
    }

    Ok(())
}
