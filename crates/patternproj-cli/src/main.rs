use std::{error::Error, fs, path::Path};

use clap::Parser;
use patternproj_core::{mat3_to_rows, Pt2, Real, Unit};
use patternproj_pipeline::{
    LineMeasure, Mode, PersistedCalibration, PointRecord, ProjectorSession, SessionConfig,
};
use serde::{Deserialize, Serialize};

/// Report the transforms derived from a persisted projector calibration.
#[derive(Debug, Parser)]
#[command(author, version, about = "Projector-to-mat calibration report")]
struct Args {
    /// Path to JSON file containing the persisted calibration (points, width, height, unit).
    #[arg(long)]
    input: String,

    /// Optional path to JSON SessionConfig. Defaults are used if omitted.
    #[arg(long)]
    config: Option<String>,

    /// Document page size in pixels, e.g. `960x480`; the page is centred on the grid.
    #[arg(long, value_parser = parse_size)]
    document: Option<(Real, Real)>,

    /// Screen-space segment to measure on the mat, `x1,y1,x2,y2`.
    #[arg(long, value_parser = parse_segment, allow_hyphen_values = true)]
    measure: Option<[Real; 4]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MeasurementReport {
    length: Real,
    angle_degrees: Real,
    label: String,
}

impl MeasurementReport {
    fn new(measure: &LineMeasure, unit: Unit) -> Self {
        Self {
            length: measure.length,
            angle_degrees: measure.angle_degrees,
            label: format!("{} {}", measure.length_label(unit), measure.angle_label()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CalibrationReport {
    width: Real,
    height: Real,
    unit: Unit,
    /// Physical units to screen, row-major.
    perspective: [[Real; 3]; 3],
    /// Pattern px to screen, row-major.
    calibration_transform: [[Real; 3]; 3],
    css_transform: String,
    concave: bool,
    grid_center: Option<PointRecord>,
    measurement: Option<MeasurementReport>,
}

fn parse_size(text: &str) -> Result<(Real, Real), String> {
    let (w, h) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{text}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<Real>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| format!("invalid document size `{text}`"))
    };
    Ok((parse(w)?, parse(h)?))
}

fn parse_segment(text: &str) -> Result<[Real; 4], String> {
    let values = text
        .split(',')
        .map(|v| v.trim().parse::<Real>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid segment `{text}`: {e}"))?;
    <[Real; 4]>::try_from(values)
        .map_err(|v| format!("expected 4 comma-separated numbers, got {}", v.len()))
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let data = fs::read_to_string(path)?;
    let value = serde_json::from_str(&data)?;
    Ok(value)
}

fn build_report(
    session: &mut ProjectorSession,
    measure: Option<[Real; 4]>,
) -> Result<CalibrationReport, Box<dyn Error>> {
    let calibration = session.calibration();
    let derived = match (calibration.derived(), calibration.last_error()) {
        (Some(derived), None) => *derived,
        (_, Some(err)) => return Err(format!("calibration could not be solved: {err}").into()),
        (None, None) => return Err("calibration could not be solved".into()),
    };
    let dims = *calibration.dimensions();
    let concave = calibration.is_concave();
    let grid_center = calibration.grid_center().map(PointRecord::from);

    let measurement = match measure {
        Some([x1, y1, x2, y2]) => {
            session.set_mode(Mode::Measure);
            session.pointer_down(Pt2::new(x1, y1));
            session.pointer_move(Pt2::new(x2, y2), false);
            session.pointer_up();
            session
                .measure_selected_line()
                .map(|m| MeasurementReport::new(&m, dims.unit))
        }
        None => None,
    };

    Ok(CalibrationReport {
        width: dims.width,
        height: dims.height,
        unit: dims.unit,
        perspective: mat3_to_rows(&derived.perspective),
        calibration_transform: mat3_to_rows(&derived.calibration_transform),
        css_transform: session.document_css_transform()?,
        concave,
        grid_center,
        measurement,
    })
}

fn run_report_from_files(
    input_path: &str,
    config_path: Option<&str>,
    document: Option<(Real, Real)>,
    measure: Option<[Real; 4]>,
) -> Result<String, Box<dyn Error>> {
    let persisted: PersistedCalibration = load_json_file(Path::new(input_path))?;
    persisted.validate()?;

    let config = if let Some(cfg_path) = config_path {
        load_json_file::<SessionConfig>(Path::new(cfg_path))?
    } else {
        SessionConfig::default()
    };

    let mut session = ProjectorSession::from_persisted(&persisted, config)?;
    if let Some((width, height)) = document {
        session.load_document(width, height);
        session.recenter();
    }

    let report = build_report(&mut session, measure)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let json = run_report_from_files(
        &args.input,
        args.config.as_deref(),
        args.document,
        args.measure,
    )?;
    println!("{}", json);
    Ok(())
}
