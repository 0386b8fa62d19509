use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use geosat_look::angles::{AngleEngine, GeoPoint, Satellite};
use geosat_look::catalog::{parse_catalog_file, Catalog, CatalogError};
use geosat_look::web::{run_server, Config};

#[derive(Parser)]
#[command(name = "geosat-look")]
#[command(about = "Antenna look angles toward geostationary satellites")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ObserverArgs {
    /// Observer position as "lat,lon" in degrees
    #[arg(long, allow_hyphen_values = true)]
    at: String,
    /// Extra satellite list (YAML), may be repeated
    #[arg(long = "catalog")]
    catalogs: Vec<PathBuf>,
    /// Skip the built-in satellite list
    #[arg(long)]
    no_builtin: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print elevation and azimuth for every satellite
    Angles {
        #[command(flatten)]
        observer: ObserverArgs,
        /// Only list satellites above the horizon
        #[arg(long)]
        visible_only: bool,
    },
    /// Print polar plot coordinates as JSON
    Polar {
        #[command(flatten)]
        observer: ObserverArgs,
    },
    /// Validate a satellite list file
    Validate { catalog: PathBuf },
    /// Run the HTTP service
    Serve {
        #[arg(long, default_value = "config.yaml")]
        config: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Angles {
            observer,
            visible_only,
        } => angles(&observer, visible_only),
        Commands::Polar { observer } => polar(&observer),
        Commands::Validate { catalog } => validate(&catalog),
        Commands::Serve { config } => serve(&config),
    }
}

fn load_inputs(args: &ObserverArgs) -> Result<(GeoPoint, Vec<Satellite>), String> {
    let observer = GeoPoint::from_coordinates(&args.at).map_err(|e| e.to_string())?;

    let mut catalog = if args.no_builtin {
        Catalog::empty()
    } else {
        Catalog::with_builtin()
    };
    for path in &args.catalogs {
        let satellites = parse_catalog_file(path).map_err(|e| describe(path, e))?;
        catalog.extend_builtin(satellites);
    }

    Ok((observer, catalog.all()))
}

fn describe(path: &Path, err: CatalogError) -> String {
    format!("{}: {}", path.display(), err)
}

fn angles(args: &ObserverArgs, visible_only: bool) -> ExitCode {
    let (observer, satellites) = match load_inputs(args) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = AngleEngine::default().pointing_report(&observer, &satellites);

    println!(
        "{:<20} {:>9} {:>9} {:>9} {:>10} {:>8} {:>9}",
        "SATELLITE", "LON", "EL", "AZ", "RANGE km", "VISIBLE", "COVER km"
    );
    for entry in report
        .iter()
        .filter(|e| !visible_only || e.point.is_visible)
    {
        let p = &entry.point;
        println!(
            "{:<20} {:>9.2} {:>9.2} {:>9.2} {:>10.0} {:>8} {:>9.0}",
            p.satellite.name,
            p.satellite.longitude,
            p.elevation,
            p.azimuth,
            entry.slant_range_km,
            if p.is_visible { "yes" } else { "no" },
            entry.coverage_radius_km
        );
    }
    ExitCode::SUCCESS
}

fn polar(args: &ObserverArgs) -> ExitCode {
    let (observer, satellites) = match load_inputs(args) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let points = AngleEngine::default().calculate_polar_coordinates(
        observer.latitude,
        observer.longitude,
        &satellites,
    );
    match serde_json::to_string_pretty(&points) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn validate(path: &Path) -> ExitCode {
    match parse_catalog_file(path) {
        Ok(satellites) => {
            println!("Catalog is valid ({} satellites)", satellites.len());
            for (i, sat) in satellites.iter().enumerate() {
                println!("  {}: {} @ {:.2}", i + 1, sat.name, sat.longitude);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Invalid catalog: {}", describe(path, e));
            ExitCode::FAILURE
        }
    }
}

fn serve(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
