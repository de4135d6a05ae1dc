//! Console front-end
//!
//! Binds the abstract session events to a line-based terminal loop. The
//! commands map one-to-one onto the form controls of the original page:
//! drawing, the period editor, the update button and the address search.

use chrono::NaiveDate;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{SessionError, SessionResult};
use crate::session_impl::MapSession;
use crate::traits::{AnalysisClient, Geocoder, InfoPanel, MapCanvas};
use crate::types::{LatLng, DATE_FORMAT};

/// One parsed console command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Draw(Vec<LatLng>),
    AddPeriod,
    RemovePeriod(usize),
    RenamePeriod { position: usize, name: String },
    SetDates { position: usize, start: NaiveDate, end: NaiveDate },
    ListPeriods,
    Update,
    Locate(String),
    ListLayers,
    Help,
    Quit,
}

/// Command reference printed at startup and on `help`
pub const HELP_TEXT: &str = "\
Commands:
  draw <lat,lng> <lat,lng> <lat,lng> [...]  draw the region of interest
  add                                       add a period
  remove <n>                                remove period n
  rename <n> <name>                         rename period n
  dates <n> <start> <end>                   set period n dates (YYYY-MM-DD)
  periods                                   list periods
  update                                    request statistics and tiles
  locate <address>                          center the map on an address
  layers                                    list layer control entries
  help                                      show this help
  quit                                      leave";

/// Parse one input line into a command
pub fn parse_command(line: &str) -> SessionResult<Command> {
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Err(SessionError::invalid_input("empty command"));
    };

    match keyword {
        "draw" => {
            let ring = tokens.map(parse_vertex).collect::<SessionResult<Vec<_>>>()?;
            if ring.len() < 3 {
                return Err(SessionError::invalid_input(
                    "draw needs at least three lat,lng vertices",
                ));
            }
            Ok(Command::Draw(ring))
        }
        "add" => Ok(Command::AddPeriod),
        "remove" => Ok(Command::RemovePeriod(parse_position(tokens.next())?)),
        "rename" => {
            let position = parse_position(tokens.next())?;
            let name = tokens.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                return Err(SessionError::invalid_input("rename needs a name"));
            }
            Ok(Command::RenamePeriod { position, name })
        }
        "dates" => {
            let position = parse_position(tokens.next())?;
            let start = parse_date(tokens.next())?;
            let end = parse_date(tokens.next())?;
            Ok(Command::SetDates { position, start, end })
        }
        "periods" => Ok(Command::ListPeriods),
        "update" => Ok(Command::Update),
        "locate" => {
            let address = tokens.collect::<Vec<_>>().join(" ");
            if address.is_empty() {
                return Err(SessionError::invalid_input("locate needs an address"));
            }
            Ok(Command::Locate(address))
        }
        "layers" => Ok(Command::ListLayers),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(SessionError::invalid_input(format!(
            "unknown command: {other} (try 'help')"
        ))),
    }
}

fn parse_vertex(token: &str) -> SessionResult<LatLng> {
    let (lat, lng) = token.split_once(',').ok_or_else(|| {
        SessionError::invalid_input(format!("expected lat,lng pair, got {token}"))
    })?;
    let lat = lat
        .trim()
        .parse()
        .map_err(|_| SessionError::invalid_input(format!("invalid latitude: {lat}")))?;
    let lng = lng
        .trim()
        .parse()
        .map_err(|_| SessionError::invalid_input(format!("invalid longitude: {lng}")))?;
    Ok(LatLng::new(lat, lng))
}

fn parse_position(token: Option<&str>) -> SessionResult<usize> {
    let token = token.ok_or_else(|| SessionError::invalid_input("missing period number"))?;
    let position: usize = token
        .parse()
        .map_err(|_| SessionError::invalid_input(format!("invalid period number: {token}")))?;
    if position == 0 {
        return Err(SessionError::invalid_input("period numbers start at 1"));
    }
    Ok(position)
}

fn parse_date(token: Option<&str>) -> SessionResult<NaiveDate> {
    let token = token.ok_or_else(|| SessionError::invalid_input("missing date (YYYY-MM-DD)"))?;
    NaiveDate::parse_from_str(token, DATE_FORMAT)
        .map_err(|err| SessionError::invalid_input(format!("invalid date {token}: {err}")))
}

/// Run the interactive loop until EOF or `quit`
pub async fn run<A, G, C, N>(session: &MapSession<A, G, C, N>) -> SessionResult<()>
where
    A: AnalysisClient + 'static,
    G: Geocoder + 'static,
    C: MapCanvas + 'static,
    N: InfoPanel + 'static,
{
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_command(line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Err(err) = dispatch(session, command).await {
                    eprintln!("command failed: {err}");
                }
            }
            Err(err) => eprintln!("{err}"),
        }
    }
    Ok(())
}

async fn dispatch<A, G, C, N>(
    session: &MapSession<A, G, C, N>,
    command: Command,
) -> SessionResult<()>
where
    A: AnalysisClient + 'static,
    G: Geocoder + 'static,
    C: MapCanvas + 'static,
    N: InfoPanel + 'static,
{
    match command {
        Command::Draw(ring) => session.on_region_drawn(ring).await,
        Command::AddPeriod => {
            let position = session.add_period().await;
            println!("Período {position} adicionado.");
            Ok(())
        }
        Command::RemovePeriod(position) => session.remove_period(position).await,
        Command::RenamePeriod { position, name } => session.rename_period(position, &name).await,
        Command::SetDates { position, start, end } => {
            session.set_period_dates(position, start, end).await
        }
        Command::ListPeriods => {
            for (index, period) in session.periods().await.iter().enumerate() {
                let position = index + 1;
                let range = match (period.start_date, period.end_date) {
                    (Some(start), Some(end)) => format!(
                        "{} - {}",
                        start.format(DATE_FORMAT),
                        end.format(DATE_FORMAT)
                    ),
                    _ => "datas incompletas".to_string(),
                };
                println!("{position}. {} ({range})", period.display_name(position));
            }
            Ok(())
        }
        Command::Update => session.on_update_requested().await,
        Command::Locate(address) => session.on_geocode_requested(&address).await,
        Command::ListLayers => {
            let registry = session.registry().await;
            for layer in &registry.base {
                println!("base:    {}", layer.name);
            }
            for layer in &registry.overlays {
                println!("overlay: {} ({})", layer.key, layer.tile_url);
            }
            Ok(())
        }
        Command::Help => {
            println!("{HELP_TEXT}");
            Ok(())
        }
        Command::Quit => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_draw_with_three_vertices() {
        let command = parse_command("draw -15.0,-47.0 -15.5,-47.0 -15.5,-47.5").unwrap();
        let Command::Draw(ring) = command else {
            panic!("expected draw");
        };
        assert_eq!(ring.len(), 3);
        assert_eq!(ring[0], LatLng::new(-15.0, -47.0));
    }

    #[test]
    fn draw_requires_three_vertices() {
        assert!(parse_command("draw 1,2 3,4").is_err());
        assert!(parse_command("draw").is_err());
    }

    #[test]
    fn parses_period_editor_commands() {
        assert_eq!(parse_command("add").unwrap(), Command::AddPeriod);
        assert_eq!(parse_command("remove 2").unwrap(), Command::RemovePeriod(2));
        assert_eq!(
            parse_command("rename 1 Estação Seca").unwrap(),
            Command::RenamePeriod {
                position: 1,
                name: "Estação Seca".to_string()
            }
        );
    }

    #[test]
    fn parses_dates_command() {
        let command = parse_command("dates 1 2023-06-01 2023-09-30").unwrap();
        assert_eq!(
            command,
            Command::SetDates {
                position: 1,
                start: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2023, 9, 30).unwrap(),
            }
        );
    }

    #[test]
    fn rejects_position_zero_and_bad_dates() {
        assert!(parse_command("remove 0").is_err());
        assert!(parse_command("dates 1 01/06/2023 30/09/2023").is_err());
        assert!(parse_command("dates 1 2023-06-01").is_err());
    }

    #[test]
    fn locate_joins_the_address_words() {
        assert_eq!(
            parse_command("locate Praça dos Três Poderes, Brasília").unwrap(),
            Command::Locate("Praça dos Três Poderes, Brasília".to_string())
        );
        assert!(parse_command("locate").is_err());
    }

    #[test]
    fn rejects_unknown_commands() {
        assert!(parse_command("fly").is_err());
        assert!(parse_command("").is_err());
    }

    #[test]
    fn quit_and_exit_are_synonyms() {
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
    }
}
