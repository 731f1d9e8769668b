use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use vrat_base::{
    AstronomicalRiseSet, AyanamshaModel, CoordinateZoneResolver, FixedZoneResolver, GeoLocation,
    RiseSetConfig, TimezoneResolver, parse_zone, rahu_kaal_for, rashi_from_sidereal,
    sidereal_solar_longitude, tithi_at,
};
use vrat_config::Settings;
use vrat_ephem::PositionProvider;
use vrat_search::{AssemblyOptions, EventSet, Observance, ObservanceEngine, coalesce_rahu_kaal};

mod ics;
mod render;

#[derive(Parser)]
#[command(name = "vrat", version, about = "Location-aware Hindu observance calendar")]
struct Cli {
    /// Settings file (TOML); ./vrat.toml is read when present
    #[arg(long, global = true)]
    config: Option<String>,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Observance calendar for a year or a range of years
    Events(EventsArgs),
    /// Tithi, paksha and solar sign at an instant
    Tithi {
        /// UTC instant (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        /// Ayanamsha model (lahiri_linear, lahiri_precessing)
        #[arg(long)]
        ayanamsha: Option<String>,
    },
    /// Amanta months opening around a civil year
    Lunations {
        #[arg(long)]
        year: i32,
        /// IANA zone for the printed times
        #[arg(long)]
        tz: Option<String>,
        #[arg(long)]
        ayanamsha: Option<String>,
    },
    /// Rahu Kaal window on one local date
    RahuKaal {
        #[command(flatten)]
        place: PlaceArgs,
        /// Local date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
    /// List the festival keys accepted by --festivals
    Festivals,
}

#[derive(Args)]
struct PlaceArgs {
    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,
    /// Altitude above sea level in meters
    #[arg(long)]
    alt: Option<f64>,
    /// IANA zone civil dates are counted in; looked up from the
    /// coordinates when unset
    #[arg(long)]
    tz: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Ics,
}

#[derive(Args)]
struct EventsArgs {
    #[command(flatten)]
    place: PlaceArgs,
    /// First civil year
    #[arg(long)]
    year: i32,
    /// Last civil year (inclusive); defaults to --year
    #[arg(long)]
    year_to: Option<i32>,
    /// Ekadashi rule set: smartha or vaishnava
    #[arg(long)]
    tradition: Option<String>,
    #[arg(long)]
    ayanamsha: Option<String>,
    /// "all" or comma-separated festival keys
    #[arg(long)]
    festivals: Option<String>,
    #[arg(long)]
    no_ekadashi: bool,
    #[arg(long)]
    no_sankashti: bool,
    /// Exclude Amavasya and Purnima
    #[arg(long = "no-ap")]
    no_amavasya_purnima: bool,
    #[arg(long = "no-rahukaal")]
    no_rahu_kaal: bool,
    #[arg(long)]
    no_festivals: bool,
    /// Keep one Rahu Kaal per date of this zone
    #[arg(long)]
    viewer_tz: Option<String>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Write to a file instead of stdout
    #[arg(long)]
    outfile: Option<PathBuf>,
    /// Calendar name for iCalendar output
    #[arg(long, default_value = ics::DEFAULT_CALNAME)]
    calname: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_ayanamsha(flag: Option<&str>, settings: &Settings) -> Result<AyanamshaModel> {
    match flag {
        Some(key) => key.parse().map_err(anyhow::Error::msg),
        None => Ok(settings.ayanamsha()?),
    }
}

/// Explicit label, then the configured zone, then the zone at the
/// location's coordinates. UTC when none of these is available.
fn resolve_zone(
    flag: Option<&str>,
    location: Option<&GeoLocation>,
    settings: &Settings,
) -> Result<Tz> {
    if let Some(label) = flag {
        return Ok(parse_zone(label)?);
    }
    if let Some(zone) = settings.zone()? {
        return Ok(zone);
    }
    Ok(match location {
        Some(location) => {
            let zone = CoordinateZoneResolver::default().zone_for(location);
            tracing::info!(zone = %zone.name(), "timezone looked up from coordinates");
            zone
        }
        None => FixedZoneResolver::from_label(None).zone(),
    })
}

fn resolve_place(place: &PlaceArgs, settings: &Settings) -> Result<(GeoLocation, Tz)> {
    let lat = place
        .lat
        .or(settings.location.latitude)
        .context("latitude required: pass --lat or set location.latitude")?;
    let lon = place
        .lon
        .or(settings.location.longitude)
        .context("longitude required: pass --lon or set location.longitude")?;
    let alt = place.alt.unwrap_or(settings.location.altitude_m);
    let location = GeoLocation::new(lat, lon, alt);
    location.validate()?;
    let zone = resolve_zone(place.tz.as_deref(), Some(&location), settings)?;
    Ok((location, zone))
}

fn build_engine(settings: &Settings, zone: Tz) -> Result<ObservanceEngine> {
    let positions: Arc<dyn PositionProvider> =
        vrat_ephem::global::init(settings.ephemeris_config())?;
    let rise_set = AstronomicalRiseSet::new(Arc::clone(&positions), RiseSetConfig::default());
    Ok(ObservanceEngine::new(
        positions,
        Arc::new(rise_set),
        Arc::new(FixedZoneResolver::new(zone)),
    ))
}

fn assembly_options(args: &EventsArgs, settings: &Settings) -> Result<AssemblyOptions> {
    let mut options = settings.assembly_options()?;
    if let Some(t) = &args.tradition {
        options.tradition = t.parse()?;
    }
    if let Some(f) = &args.festivals {
        options.festivals = f.parse()?;
    }
    options.ayanamsha = parse_ayanamsha(args.ayanamsha.as_deref(), settings)?;
    let flags = &mut options.categories;
    flags.ekadashi &= !args.no_ekadashi;
    flags.sankashti &= !args.no_sankashti;
    flags.amavasya_purnima &= !args.no_amavasya_purnima;
    flags.rahu_kaal &= !args.no_rahu_kaal;
    flags.festivals &= !args.no_festivals;
    Ok(options)
}

fn run_events(args: &EventsArgs, settings: &Settings) -> Result<()> {
    let (location, zone) = resolve_place(&args.place, settings)?;
    let options = assembly_options(args, settings)?;
    let engine = build_engine(settings, zone)?;
    let year_to = args.year_to.unwrap_or(args.year);

    let mut set: EventSet = engine.events_for_years(&location, args.year, year_to, &options)?;
    let mut tzid = zone.name().to_string();
    if let Some(viewer) = &args.viewer_tz {
        let coalesced = coalesce_rahu_kaal(set, viewer);
        match coalesced.skipped {
            Some(reason) => tracing::warn!(%reason, "Rahu Kaal left uncoalesced"),
            None => tzid = viewer.trim().to_string(),
        }
        set = coalesced.events;
    }

    let body = match args.format {
        Format::Text => render::text(&set),
        Format::Json => render::json(&set)?,
        Format::Ics => ics::render(
            &set,
            &ics::IcsOptions {
                calname: &args.calname,
                tzid: Some(&tzid),
                stamp: Utc::now(),
            },
        ),
    };

    match &args.outfile {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("Wrote {} ({} events)", path.display(), set.len());
        }
        None => print!("{body}"),
    }
    Ok(())
}

fn run_tithi(at: Option<DateTime<Utc>>, ayanamsha: Option<&str>, settings: &Settings) -> Result<()> {
    let model = parse_ayanamsha(ayanamsha, settings)?;
    let at = at.unwrap_or_else(Utc::now);
    let eph = vrat_ephem::global::init(settings.ephemeris_config())?;
    let longitudes = eph.ecliptic_longitudes(&at)?;
    let tithi = tithi_at(eph.as_ref(), &at)?;
    let sidereal = sidereal_solar_longitude(eph.as_ref(), model, &at)?;
    println!("Instant:     {}", at.to_rfc3339());
    println!("Elongation:  {:.4} deg", longitudes.elongation_deg());
    println!("Tithi:       {tithi}");
    println!(
        "Sun:         {:.4} deg sidereal ({})",
        sidereal,
        rashi_from_sidereal(sidereal).name()
    );
    Ok(())
}

fn run_lunations(year: i32, tz: Option<&str>, ayanamsha: Option<&str>, settings: &Settings) -> Result<()> {
    let zone = resolve_zone(tz, settings.location().as_ref(), settings)?;
    let model = parse_ayanamsha(ayanamsha, settings)?;
    let engine = build_engine(settings, zone)?;
    let intervals = engine.lunation_intervals(year, model)?;
    if intervals.is_empty() {
        bail!("no lunations found around {year}");
    }
    for interval in &intervals {
        println!(
            "{:<13} {}  ->  {}  ({:.2} d)",
            interval.masa.name(),
            interval.start.with_timezone(&zone).format("%Y-%m-%d %H:%M %Z"),
            interval.end.with_timezone(&zone).format("%Y-%m-%d %H:%M %Z"),
            interval.length_days()
        );
    }
    Ok(())
}

fn run_rahu_kaal(place: &PlaceArgs, date: NaiveDate, settings: &Settings) -> Result<()> {
    let (location, zone) = resolve_place(place, settings)?;
    let engine = build_engine(settings, zone)?;
    let window = rahu_kaal_for(engine.rise_set(), &location, date, &zone)?;
    println!(
        "{date}: Rahu Kaal {} - {} {} (segment {} of 8)",
        window.start.format("%H:%M"),
        window.end.format("%H:%M"),
        zone.name(),
        window.segment
    );
    if window.daylight_substituted {
        println!("  sunset does not follow sunrise; 12-hour daylight assumed");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("failed to load settings")?;
    init_tracing(cli.log_level.as_deref().unwrap_or(&settings.logging.level));

    match cli.command {
        Commands::Events(args) => run_events(&args, &settings),
        Commands::Tithi { at, ayanamsha } => run_tithi(at, ayanamsha.as_deref(), &settings),
        Commands::Lunations { year, tz, ayanamsha } => {
            run_lunations(year, tz.as_deref(), ayanamsha.as_deref(), &settings)
        }
        Commands::RahuKaal { place, date } => run_rahu_kaal(&place, date, &settings),
        Commands::Festivals => {
            for festival in Observance::festivals() {
                println!("{festival}");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_flag_then_config_then_coordinates() {
        let settings = Settings::defaults().unwrap();
        let mumbai = GeoLocation::new(19.076, 72.8777, 0.0);
        assert_eq!(
            resolve_zone(Some("Europe/Paris"), Some(&mumbai), &settings).unwrap(),
            chrono_tz::Europe::Paris
        );
        assert_eq!(
            resolve_zone(None, Some(&mumbai), &settings).unwrap(),
            chrono_tz::Asia::Kolkata
        );
        assert_eq!(resolve_zone(None, None, &settings).unwrap(), Tz::UTC);

        let configured =
            Settings::from_toml_str("[location]\ntimezone = \"Asia/Tokyo\"\n").unwrap();
        assert_eq!(
            resolve_zone(None, Some(&mumbai), &configured).unwrap(),
            chrono_tz::Asia::Tokyo
        );
    }
}
