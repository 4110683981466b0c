use std::io::{self, Write};

use tracing_subscriber::EnvFilter;
use trip_planner::itinerary::REST_DAY_NOTE;
use trip_planner::{
    Activity, ContactDirectory, Direction, PlannerConfig, RestDayResolver, TripRequest,
    TripSession, load_catalog_from_json, load_directory_from_json, parse_date_key,
};

fn parse_csv_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn parse_index(s: Option<&str>) -> Option<usize> {
    s.and_then(|v| v.parse::<usize>().ok())
}

fn print_help() {
    println!(
        "Commands:\n  help                                         Show this help\n  catalog                                      List the whole activity catalog\n  trip <start> <end> [--prefs a,b] <destination>\n                                               Submit trip details (dates YYYY-MM-DD)\n  options                                      List activities offered for the trip\n  select <ids_csv>                             Build the itinerary from activity ids\n  show                                         Show the itinerary\n  up|down <day> <activity>                     Move an activity within its day\n  prev|next <day> <activity>                   Move an activity to the previous/next day\n  move <day> <activity> <to_day>               Move an activity to any day\n  info                                         Show contacts and holidays for the trip\n  quit|exit                                    Exit"
    );
}

fn render_activities(activities: &[Activity]) -> String {
    let mut out = String::new();
    for activity in activities {
        out.push_str(&format!("  [{}] {}\n", activity.id, activity.name));
        if !activity.description.is_empty() {
            out.push_str(&format!("      {}\n", activity.description));
        }
    }
    out
}

fn render_itinerary(session: &TripSession) -> String {
    let (Some(itinerary), Some(rest_days)) = (session.itinerary(), session.rest_days()) else {
        return "No itinerary yet. Use 'select <ids_csv>' first.\n".to_string();
    };
    let mut out = String::new();
    for (day_index, day) in itinerary.days().iter().enumerate() {
        out.push_str(&format!("[{day_index}] {}\n", day.title(rest_days)));
        for (activity_index, activity) in day.activities.iter().enumerate() {
            out.push_str(&format!("    {activity_index}. {}\n", activity.name));
        }
        if day.is_rest_day() {
            out.push_str(&format!("    {REST_DAY_NOTE}\n"));
        }
    }
    out
}

fn print_info(session: &TripSession, directory: &ContactDirectory) {
    let Some(info) = session.trip_info(directory) else {
        println!("Submit trip details first.");
        return;
    };
    if !info.contacts.is_empty() {
        println!("Chabad centres near {}:", info.destination);
        for center in &info.contacts {
            println!("  {} – {}", center.name, center.city);
            println!("    {}", center.address);
            if !center.notes.is_empty() {
                println!("    {}", center.notes);
            }
        }
    }
    if !info.holidays.is_empty() {
        println!("Jewish holidays during your trip:");
        for holiday in &info.holidays {
            println!("  {}: {}", holiday.date, holiday.title);
        }
    }
    if info.contacts.is_empty() && info.holidays.is_empty() {
        println!("No contacts or holidays for this trip.");
    }
}

const PREFS_FLAG: &str = "--prefs";

/// Splits `[--prefs a,b] <destination words...>` into the destination and
/// preference list. The flag may appear anywhere after the dates.
fn parse_trip_args<'a>(mut parts: impl Iterator<Item = &'a str>) -> (String, Vec<String>) {
    let mut destination = Vec::new();
    let mut preferences = Vec::new();
    while let Some(part) = parts.next() {
        if part == PREFS_FLAG {
            preferences.extend(parts.next().map(parse_csv_list).unwrap_or_default());
        } else {
            destination.push(part);
        }
    }
    (destination.join(" "), preferences)
}

async fn submit_trip<'a>(
    session: &mut TripSession,
    resolver: &RestDayResolver,
    mut parts: impl Iterator<Item = &'a str>,
) {
    let (Some(start_s), Some(end_s)) = (parts.next(), parts.next()) else {
        println!("Usage: trip <start> <end> [--prefs a,b] <destination>");
        return;
    };
    let (Some(start), Some(end)) = (parse_date_key(start_s), parse_date_key(end_s)) else {
        println!("Invalid date (YYYY-MM-DD)");
        return;
    };
    let (destination, preferences) = parse_trip_args(parts);
    let request = TripRequest {
        start_date: Some(start),
        end_date: Some(end),
        destination,
        preferences,
        ..TripRequest::default()
    };
    match session.submit_trip(&request, resolver).await {
        Ok(offered) => {
            println!("{} activities available:", offered.len());
            print!("{}", render_activities(offered));
        }
        Err(e) => println!("Error: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = PlannerConfig::from_env();
    let catalog = load_catalog_from_json(config.activities_path())?;
    let directory = load_directory_from_json(config.directory_path())?;
    let resolver = config.build_resolver()?;
    let mut session = TripSession::new(catalog);

    println!("Trip Planner (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "catalog" => print!("{}", render_activities(session.catalog().activities())),
            "trip" => submit_trip(&mut session, &resolver, parts).await,
            "options" => {
                if session.offered().is_empty() {
                    println!("No activities offered. Use 'trip' first.");
                } else {
                    print!("{}", render_activities(session.offered()));
                }
            }
            "select" => {
                let ids = parts.next().map(parse_csv_list).unwrap_or_default();
                let built = session.select_activities(ids.as_slice()).map(|_| ());
                match built {
                    Ok(()) => print!("{}", render_itinerary(&session)),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "show" => print!("{}", render_itinerary(&session)),
            "up" | "down" | "prev" | "next" => {
                let day = parse_index(parts.next());
                let activity = parse_index(parts.next());
                let (Some(day), Some(activity)) = (day, activity) else {
                    println!("Usage: {} <day> <activity>", cmd);
                    continue;
                };
                let direction = match cmd {
                    "up" | "prev" => Direction::Earlier,
                    _ => Direction::Later,
                };
                let moved = match cmd {
                    "up" | "down" => session.move_within_day(day, activity, direction),
                    _ => session.move_to_adjacent_day(day, activity, direction),
                };
                if !moved {
                    println!("Nothing to move.");
                }
                print!("{}", render_itinerary(&session));
            }
            "move" => {
                let day = parse_index(parts.next());
                let activity = parse_index(parts.next());
                let to_day = parse_index(parts.next());
                let (Some(day), Some(activity), Some(to_day)) = (day, activity, to_day) else {
                    println!("Usage: move <day> <activity> <to_day>");
                    continue;
                };
                if !session.move_to_day(day, activity, to_day) {
                    println!("Nothing to move.");
                }
                print!("{}", render_itinerary(&session));
            }
            "info" => print_info(&session, &directory),
            _ => println!("Unknown command '{}'. Type 'help'.", cmd),
        }
    }
    Ok(())
}
