//! Interactive engines for aligning a projector with a cutting mat.
//!
//! - [`calibration`]: four screen corners and the physical rectangle they
//!   map to; derives the perspective and calibration transforms.
//! - [`local_transform`]: the user's pan/rotate/flip placement of the
//!   document as a reducer over [`LocalTransformCommand`]s.
//! - [`measurement`]: measurement lines kept in pattern space.
//! - [`session`]: [`ProjectorSession`], owning one of each and routing
//!   input to them.
//!
//! ```no_run
//! use patternproj_core::{Pt2, Unit};
//! use patternproj_pipeline::{Mode, PersistedCalibration, ProjectorSession, SessionConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let stored = std::fs::read_to_string("calibration.json")?;
//! let persisted = PersistedCalibration::from_json(&stored)?;
//! let mut session = ProjectorSession::from_persisted(&persisted, SessionConfig::default())?;
//!
//! session.set_mode(Mode::Measure);
//! session.pointer_down(Pt2::new(200.0, 200.0));
//! session.pointer_move(Pt2::new(296.0, 200.0), true);
//! session.pointer_up();
//! if let Some(m) = session.measure_selected_line() {
//!     println!("{} at {}", m.length_label(Unit::Inches), m.angle_label());
//! }
//! println!("{}", session.document_css_transform()?);
//! # Ok(())
//! # }
//! ```

pub mod calibration;
mod config;
mod error;
pub mod local_transform;
pub mod measurement;
mod nudge;
pub mod session;

pub use calibration::*;
pub use config::*;
pub use error::*;
pub use local_transform::*;
pub use measurement::*;
pub use nudge::*;
pub use session::*;
