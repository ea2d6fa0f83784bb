//! Walk through a projector session end to end.
//!
//! This example shows:
//! - Placing the four calibration corners
//! - Dragging a corner and reading the concavity flag
//! - Placing the document (recenter, rotate, nudge)
//! - Measuring a line on the mat
//! - Checkpointing the calibration to JSON
//!
//! Run with: cargo run --example session_basic

use patternproj_core::{PhysicalDimensions, Pt2, Unit};
use patternproj_pipeline::{
    ArrowKey, Calibration, Mode, PersistedCalibration, ProjectorSession, SessionConfig,
};

fn main() -> anyhow::Result<()> {
    println!("=== Projector Session Example ===\n");

    // Step 1: place four corners by clicking
    let dims = PhysicalDimensions::new(24.0, 18.0, Unit::Inches);
    let mut session = ProjectorSession::new(
        Calibration::from_points(Vec::new(), dims),
        SessionConfig::default(),
    );
    for (x, y) in [(110.0, 70.0), (820.0, 95.0), (790.0, 610.0), (95.0, 560.0)] {
        session.pointer_down(Pt2::new(x, y));
    }
    println!("✓ Placed corners: {:?}", session.calibration().points());

    // Step 2: drag the bottom-right corner inward past the diagonal
    session.pointer_down(Pt2::new(790.0, 610.0));
    session.pointer_move(Pt2::new(300.0, 200.0), false);
    println!("  concave while dragged: {}", session.calibration().is_concave());
    session.pointer_move(Pt2::new(800.0, 620.0), false);
    session.pointer_up();
    println!("✓ Corner released, concave: {}", session.calibration().is_concave());

    // Step 3: place the document
    session.load_document(2304.0, 1728.0);
    session.recenter();
    session.rotate_90();
    session.set_mode(Mode::Move);
    for _ in 0..4 {
        session.key_down(ArrowKey::Right);
    }
    session.key_up();
    println!("✓ Document transform: {}", session.document_css_transform()?);

    // Step 4: measure along the top edge with axis lock
    session.set_mode(Mode::Measure);
    session.pointer_down(Pt2::new(200.0, 150.0));
    session.pointer_move(Pt2::new(500.0, 160.0), true);
    session.pointer_up();
    if let Some(m) = session.measure_selected_line() {
        println!("✓ Measured {} at {}", m.length_label(session.unit()), m.angle_label());
    }

    // Step 5: checkpoint and restore
    let json = session.persisted().to_json()?;
    let restored = ProjectorSession::from_persisted(
        &PersistedCalibration::from_json(&json)?,
        SessionConfig::default(),
    )?;
    println!(
        "✓ Restored {} corners in {}",
        restored.calibration().points().len(),
        restored.unit()
    );

    Ok(())
}
