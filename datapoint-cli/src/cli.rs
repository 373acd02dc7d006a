use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use datapoint_core::{
    Config, DataPointClient, Forecast, LatestExtremes, Resolution, Site, SiteLookup, SiteRep,
    TimeSteps,
};
use serde::Serialize;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "datapoint", version, about = "Met Office DataPoint CLI")]
pub struct Cli {
    /// Print the full result as JSON instead of a summary.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key (and optionally a base URI) in the config file.
    Configure,

    /// List sites with forecasts.
    Sites,

    /// List sites with hourly observations.
    ObservationSites,

    /// Show which forecast timesteps are available.
    Capabilities {
        #[arg(long, default_value_t = Resolution::ThreeHourly)]
        res: Resolution,
    },

    /// Five day forecast for one site.
    Forecast {
        /// Site id, as listed by `datapoint sites`.
        id: i64,

        #[arg(long, default_value_t = Resolution::ThreeHourly)]
        res: Resolution,

        /// Pin a specific forecast run, e.g. 2024-03-01T09:00:00Z.
        #[arg(long)]
        time: Option<DateTime<Utc>>,
    },

    /// Five day forecast for every site.
    ForecastAll {
        #[arg(long, default_value_t = Resolution::Daily)]
        res: Resolution,

        #[arg(long)]
        time: Option<DateTime<Utc>>,
    },

    /// Last 24 hours of observations for one site.
    Observations {
        id: i64,
    },

    /// List regions with text forecasts.
    RegionalSites,

    /// Show when regional forecasts were last issued.
    RegionalCapabilities,

    /// Latest observed UK extremes.
    Extremes,

    /// Show when UK extremes were last issued.
    ExtremesCapabilities,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let json = self.json;

        match self.command {
            Command::Configure => configure()?,
            Command::Sites => {
                let sites = load_client()?.forecast_site_list().await?;
                emit(json, &sites, || print_sites(&sites))?;
            }
            Command::ObservationSites => {
                let sites = load_client()?.observation_site_list().await?;
                emit(json, &sites, || print_sites(&sites))?;
            }
            Command::Capabilities { res } => {
                let steps = load_client()?.forecast_time_step_capabilities(res).await?;
                emit(json, &steps, || print_time_steps(&steps))?;
            }
            Command::Forecast { id, res, time } => {
                let lookup = load_client()?.five_day_forecast(res, id, time).await?;
                print_lookup(json, id, lookup)?;
            }
            Command::ForecastAll { res, time } => {
                let reps = load_client()?
                    .five_day_forecast_for_all_locations(res, time)
                    .await?;
                emit(json, &reps, || {
                    for rep in &reps {
                        print_site_rep(rep);
                    }
                })?;
            }
            Command::Observations { id } => {
                let lookup = load_client()?.hourly_observations(id).await?;
                print_lookup(json, id, lookup)?;
            }
            Command::RegionalSites => {
                let sites = load_client()?.regional_forecast_site_list().await?;
                emit(json, &sites, || {
                    for site in &sites {
                        println!("{:>6}  {}", site.id, site.name);
                    }
                })?;
            }
            Command::RegionalCapabilities => {
                let caps = load_client()?.regional_forecast_capabilities().await?;
                emit(json, &caps, || println!("Issued at: {}", caps.issued_at))?;
            }
            Command::Extremes => {
                let latest = load_client()?.uk_extremes_latest().await?;
                emit(json, &latest, || print_extremes(&latest))?;
            }
            Command::ExtremesCapabilities => {
                let caps = load_client()?.uk_extremes_capabilities().await?;
                emit(json, &caps, || {
                    println!("Extreme date: {}", caps.extreme_date);
                    println!("Issued at:    {}", caps.issued_at);
                })?;
            }
        }

        Ok(())
    }
}

/// Stored settings with the environment key applied on top.
fn load_client() -> anyhow::Result<DataPointClient> {
    Config::load()?.with_env_override().client()
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let key = inquire::Password::new("DataPoint API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let base_uri = inquire::Text::new("Base URI (leave empty for the public service):")
        .with_default(cfg.base_uri.as_deref().unwrap_or_default())
        .prompt()
        .context("Failed to read base URI")?;

    cfg = cfg.override_api_key(Some(key));
    cfg.base_uri = Some(base_uri.trim().to_string()).filter(|uri| !uri.is_empty());

    let path = cfg.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce()) -> anyhow::Result<()> {
    if json {
        let text = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
        println!("{text}");
    } else {
        human();
    }
    Ok(())
}

fn print_lookup(json: bool, id: i64, lookup: SiteLookup) -> anyhow::Result<()> {
    match lookup {
        SiteLookup::Found(rep) => emit(json, &rep, || print_site_rep(&rep)),
        SiteLookup::NoData => {
            eprintln!("No data available for site {id}.");
            Ok(())
        }
    }
}

fn print_sites(sites: &[Site]) {
    for site in sites {
        println!(
            "{:>8}  {:<32} {:>9.4} {:>9.4}  {}",
            site.id, site.name, site.latitude, site.longitude, site.unitary_auth_area
        );
    }
    println!("{} sites", sites.len());
}

fn print_time_steps(steps: &TimeSteps) {
    println!(
        "{} ({}) data date {}",
        steps.kind, steps.resolution, steps.data_date
    );
    for ts in &steps.time_steps {
        println!("  {ts}");
    }
}

fn print_site_rep(rep: &SiteRep) {
    let loc = &rep.location;
    println!(
        "{} {} ({}, {}) - {} issued {}",
        loc.id, loc.name, loc.latitude, loc.longitude, rep.kind, rep.data_date
    );

    for period in &loc.periods {
        println!("  {} {}", period.kind, period.time.date_naive());
        for forecast in &period.forecasts {
            println!("    {}", summarize(forecast));
        }
    }
}

fn summarize(forecast: &Forecast) -> String {
    let mut parts = vec![forecast.time.format("%H:%M").to_string()];

    if let Some(t) = forecast.temperature() {
        parts.push(format!("{t}°C"));
    }
    if let Some(w) = forecast.weather_type() {
        parts.push(w.to_string());
    }
    if let Some(v) = forecast.visibility() {
        parts.push(format!("visibility {}", v.code()));
    }

    let rest: Vec<String> = forecast
        .string_params
        .iter()
        .filter(|(code, _)| code.as_str() != "V")
        .map(|(code, p)| format!("{code}={}", p.value))
        .collect();
    if !rest.is_empty() {
        parts.push(rest.join(" "));
    }

    parts.join("  ")
}

fn print_extremes(latest: &LatestExtremes) {
    println!(
        "Extremes for {} (issued {})",
        latest.extreme_date, latest.issued_at
    );
    for region in &latest.regions {
        println!("  {}", region.name);
        for e in &region.extremes {
            println!(
                "    {:<6} {:>7.1} {:<5} {}",
                e.kind, e.value, e.unit_of_measurement, e.location_name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn forecast_args_parse() {
        let cli = Cli::try_parse_from([
            "datapoint", "--json", "forecast", "310069", "--res", "daily", "--time",
            "2024-03-01T09:00:00Z",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Command::Forecast { id, res, time } => {
                assert_eq!(id, 310069);
                assert_eq!(res, Resolution::Daily);
                assert!(time.is_some());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn configure_takes_no_arguments() {
        let cli = Cli::try_parse_from(["datapoint", "configure"]).unwrap();
        assert!(matches!(cli.command, Command::Configure));

        assert!(Cli::try_parse_from(["datapoint", "configure", "KEY"]).is_err());
    }

    #[test]
    fn bad_resolution_is_rejected() {
        let res = Cli::try_parse_from(["datapoint", "capabilities", "--res", "weekly"]);
        assert!(res.is_err());
    }
}
