use std::error::Error;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use roadnet::layer::{self, PointSchema, RoadSchema};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct LayerError(PathBuf, #[source] layer::Error);

#[derive(Debug, thiserror::Error)]
#[error("analysis produced no results, see the log for details")]
struct AnalysisFailed;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    roads: RoadArgs,

    /// Maximum distance between a point and the road endpoint it's snapped to
    #[arg(long, global = true, default_value_t = roadnet::DEFAULT_SNAP_TOLERANCE)]
    snap_tolerance: f64,

    /// Coordinates closer than this distance are treated as the same node
    #[arg(long, global = true, default_value_t = roadnet::DEFAULT_PRECISION)]
    precision: f64,

    /// Zero and negative road costs are raised to this value
    #[arg(long, global = true, default_value_t = roadnet::DEFAULT_MIN_COST)]
    min_cost: f64,

    /// Log more details (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct RoadArgs {
    /// Path to the GeoJSON file with roads (LineString or MultiLineString features)
    #[arg(long)]
    roads: PathBuf,

    /// Road property with the direction code (0 - both ways, 1 - forward, 2 - backward, 3 - closed)
    #[arg(long)]
    direction_field: Option<String>,

    /// Road property with the traversal cost (road length is used if absent)
    #[arg(long)]
    cost_field: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Find the cheapest routes between every pair of points
    Routes {
        /// Path to the GeoJSON file with points
        #[arg(long)]
        points: PathBuf,

        /// Point property with the point identifier
        #[arg(long)]
        id_field: String,

        /// Where to write the routes (defaults to standard output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Find everything reachable from the origins within a cost threshold
    ServiceArea {
        /// Path to the GeoJSON file with origins
        #[arg(long)]
        points: PathBuf,

        /// Point property with the origin identifier
        #[arg(long)]
        id_field: String,

        /// Maximum total cost of a route
        #[arg(long)]
        threshold: f64,

        /// Where to write routes to reachable nodes
        #[arg(long)]
        lines: PathBuf,

        /// Where to write the convex hulls of reachable nodes
        #[arg(long)]
        polygons: PathBuf,
    },

    /// Assign every origin to the facility with the cheapest route
    Nearest {
        /// Path to the GeoJSON file with origins
        #[arg(long)]
        origins: PathBuf,

        /// Origin property with the origin identifier
        #[arg(long)]
        origin_id_field: String,

        /// Path to the GeoJSON file with facilities
        #[arg(long)]
        facilities: PathBuf,

        /// Facility property with the facility identifier
        #[arg(long)]
        facility_id_field: String,

        /// Where to write the assignments (as facility points)
        #[arg(long)]
        assignments: PathBuf,

        /// Where to write routes from origins to their facilities
        #[arg(long)]
        routes: PathBuf,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let options = roadnet::Options {
        precision: cli.precision,
        snap_tolerance: cli.snap_tolerance,
        min_cost: cli.min_cost,
    };
    let mut session = roadnet::Session::new(options);

    let roads = load_roads(&cli.roads)?;

    match cli.command {
        Command::Routes {
            points,
            id_field,
            output,
        } => {
            let points = load_points(&points, &id_field)?;
            let report = session.all_pairs(&roads, &points)?;
            ensure_success(report.is_success())?;

            let features = report.routes.iter().map(|r| r.to_feature());
            match output {
                Some(path) => write(&path, features)?,
                None => layer::write_features(io::stdout().lock(), features)
                    .map_err(|e| LayerError(PathBuf::from("-"), e))?,
            }
        }

        Command::ServiceArea {
            points,
            id_field,
            threshold,
            lines,
            polygons,
        } => {
            let origins = load_points(&points, &id_field)?;
            let report = session.service_area(&roads, &origins, threshold)?;
            ensure_success(report.is_success())?;

            write(&lines, report.routes.iter().map(|r| r.to_feature()))?;
            write(&polygons, report.areas.iter().map(|a| a.to_feature()))?;
        }

        Command::Nearest {
            origins,
            origin_id_field,
            facilities,
            facility_id_field,
            assignments,
            routes,
        } => {
            let origins = load_points(&origins, &origin_id_field)?;
            let facilities = load_points(&facilities, &facility_id_field)?;
            let report = session.nearest_facility(&roads, &origins, &facilities)?;
            ensure_success(report.is_success())?;

            write(&assignments, report.assignments.iter().map(|a| a.to_feature()))?;
            write(&routes, report.routes.iter().map(|r| r.to_feature()))?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => log::LevelFilter::Error,
        (false, 0) => log::LevelFilter::Info,
        (false, 1) => log::LevelFilter::Debug,
        (false, _) => log::LevelFilter::Trace,
    };
    colog::default_builder().filter_level(level).init();
}

fn ensure_success(success: bool) -> Result<(), AnalysisFailed> {
    if success {
        Ok(())
    } else {
        Err(AnalysisFailed)
    }
}

fn load_roads(args: &RoadArgs) -> Result<roadnet::RoadLayer, LayerError> {
    let schema = RoadSchema::new(args.direction_field.as_deref(), args.cost_field.as_deref());
    layer::read_roads_from_file(&schema, &args.roads)
        .map_err(|e| LayerError(args.roads.clone(), e))
}

fn load_points<P: AsRef<Path>>(
    path: P,
    id_field: &str,
) -> Result<Vec<roadnet::QueryPoint>, LayerError> {
    match layer::read_points_from_file(&PointSchema::new(id_field), path.as_ref()) {
        Ok(points) => Ok(points),
        Err(e) => Err(LayerError(PathBuf::from(path.as_ref()), e)),
    }
}

fn write<I: IntoIterator<Item = geojson::Feature>>(
    path: &Path,
    features: I,
) -> Result<(), LayerError> {
    File::create(path)
        .map_err(layer::Error::from)
        .and_then(|f| layer::write_features(f, features))
        .map_err(|e| LayerError(PathBuf::from(path), e))
}
